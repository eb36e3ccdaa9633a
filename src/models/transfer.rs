//! Transfer calculator: outlet saturation and oxygen transfer rate
//!
//! One evaluation builds an [`OxygenatorModel`] session, marches the blood
//! partial pressure from the inlet (x = 0) to the end of the bundle with RK4
//! and converts the outlet pressure into saturation and transfer rate:
//!
//! ```text
//! S_out = S(P_out)
//! VO2   = Q·60/100 · (1.34·Hgb·(S_out - S_in) + k·(P_out - P_in))    [mL O2/min]
//! ```
//!
//! The first term is oxygen bound to hemoglobin, the second oxygen dissolved
//! in plasma; both are per 100 mL of blood, scaled by the flow in mL/min.
//!
//! # Example
//!
//! ```rust
//! use oxy_rs::models::device::{lpm_to_cm3_per_s, DevicePreset};
//! use oxy_rs::models::compute_transfer;
//! use oxy_rs::physics::BloodState;
//!
//! # fn main() -> Result<(), String> {
//! let preset = DevicePreset::IMPLANTABLE_LUNG;
//! let result = compute_transfer(
//!     35.4,
//!     lpm_to_cm3_per_s(5.0),
//!     &preset.geometry,
//!     &BloodState::new(10.7, 0.37, 37.0),
//!     &preset.coefficients,
//! )?;
//!
//! assert_eq!(result.steps, 700);
//! assert!(result.outlet_pressure > 35.4);
//! let (saturation, vo2) = result.as_pair();
//! assert!(saturation < 1.0 && vo2 > 0.0);
//! # Ok(())
//! # }
//! ```

use crate::models::device::{CorrelationCoefficients, DeviceGeometry, DevicePreset};
use crate::models::oxygenator::{
    OxygenatorModel, ATMOSPHERIC_PRESSURE, BLOOD_DENSITY, BLOOD_VISCOSITY,
    DEFAULT_GAS_OXYGEN_FRACTION,
};
use crate::physics::blood::BloodState;
use crate::physics::dissociation::DissociationCurve;
use crate::physics::sink::{SlopeMethod, HUFNER_CONSTANT};
use crate::physics::{PhysicalData, PhysicalQuantity, PhysicalState};
use crate::solver::{
    Remainder, RK4Solver, Scenario, SimulationResult, Solver, SolverConfiguration,
};
use nalgebra::DVector;

/// Axial step of the march [cm]
pub const DEFAULT_STEP_SIZE: f64 = 0.005;

/// Seconds per minute over milliliters per deciliter
const PER_MINUTE_PER_DECILITER: f64 = 60.0 / 100.0;

// =================================================================================================
// Result
// =================================================================================================

/// Outcome of one transfer calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferResult {
    /// Partial pressure at the end of the march [mmHg]
    pub outlet_pressure: f64,
    /// Hemoglobin saturation at the outlet [-]
    pub outlet_saturation: f64,
    /// Oxygen transfer rate VO2 [mL O2/min]
    pub transfer_rate: f64,
    /// Number of integration steps taken
    pub steps: usize,
}

impl TransferResult {
    /// `(outlet saturation, transfer rate)`
    pub fn as_pair(&self) -> (f64, f64) {
        (self.outlet_saturation, self.transfer_rate)
    }
}

/// Pressure and saturation along the bundle for one operating point
///
/// `profile` holds two vectors of the same length as `positions`:
/// [`PhysicalQuantity::PartialPressure`] and [`PhysicalQuantity::Saturation`].
#[derive(Debug, Clone)]
pub struct AxialProfile {
    /// Axial positions, inlet first [cm]
    pub positions: Vec<f64>,
    /// Pressure and saturation at each position
    pub profile: PhysicalState,
}

impl AxialProfile {
    /// Number of stations
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True when there is no station
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Values of one quantity at every station
    pub fn values(&self, quantity: PhysicalQuantity) -> Option<&DVector<f64>> {
        self.profile.get(quantity).and_then(|data| data.try_as_vector())
    }
}

// =================================================================================================
// Calculator
// =================================================================================================

/// Transfer calculator with overridable numerical and physical settings
///
/// The default settings reproduce [`compute_transfer`].
///
/// # Example
///
/// ```rust
/// use oxy_rs::models::TransferCalculator;
/// use oxy_rs::models::device::{lpm_to_cm3_per_s, DevicePreset};
/// use oxy_rs::physics::{BloodState, SlopeMethod};
/// use oxy_rs::solver::Remainder;
///
/// let calculator = TransferCalculator::default()
///     .with_step_size(0.01)
///     .with_slope_method(SlopeMethod::Analytic)
///     .with_remainder(Remainder::FinalPartialStep);
///
/// let result = calculator
///     .compute_preset(&DevicePreset::UNIVOX, 40.0, lpm_to_cm3_per_s(3.0), &BloodState::new(12.0, 0.36, 37.0))
///     .unwrap();
/// assert!(result.transfer_rate > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferCalculator {
    /// Axial step [cm]
    pub step_size: f64,
    /// Dissociation curve for S(P) and the sink term
    pub curve: DissociationCurve,
    /// dS/dP evaluation in the sink term
    pub slope_method: SlopeMethod,
    /// Handling of a bundle length not divisible by the step
    pub remainder: Remainder,
    /// Oxygen fraction of the sweep gas [-]
    pub gas_oxygen_fraction: f64,
    /// Blood dynamic viscosity [dyn·s/cm²]
    pub viscosity: f64,
    /// Blood density [g/cm³]
    pub density: f64,
}

impl Default for TransferCalculator {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_STEP_SIZE,
            curve: DissociationCurve::default(),
            slope_method: SlopeMethod::default(),
            remainder: Remainder::Truncate,
            gas_oxygen_fraction: DEFAULT_GAS_OXYGEN_FRACTION,
            viscosity: BLOOD_VISCOSITY,
            density: BLOOD_DENSITY,
        }
    }
}

impl TransferCalculator {
    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    pub fn with_curve(mut self, curve: DissociationCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_slope_method(mut self, slope_method: SlopeMethod) -> Self {
        self.slope_method = slope_method;
        self
    }

    pub fn with_remainder(mut self, remainder: Remainder) -> Self {
        self.remainder = remainder;
        self
    }

    pub fn with_gas_oxygen_fraction(mut self, fraction: f64) -> Self {
        self.gas_oxygen_fraction = fraction;
        self
    }

    /// Set blood viscosity [dyn·s/cm²] and density [g/cm³]
    pub fn with_rheology(mut self, viscosity: f64, density: f64) -> Self {
        self.viscosity = viscosity;
        self.density = density;
        self
    }

    /// Gas-side oxygen partial pressure P_g [mmHg]
    pub fn gas_pressure(&self) -> f64 {
        ATMOSPHERIC_PRESSURE * self.gas_oxygen_fraction
    }

    /// Check the calculator's own settings
    pub fn validate(&self) -> Result<(), String> {
        if !(self.gas_oxygen_fraction > 0.0 && self.gas_oxygen_fraction <= 1.0) {
            return Err(format!(
                "Gas oxygen fraction must be in ]0,1], got {}",
                self.gas_oxygen_fraction
            ));
        }
        if !(self.viscosity.is_finite() && self.viscosity > 0.0) {
            return Err(format!("Blood viscosity must be positive, got {}", self.viscosity));
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(format!("Blood density must be positive, got {}", self.density));
        }
        if let SlopeMethod::CenteredDifference { half_width } = self.slope_method
            && !(half_width.is_finite() && half_width > 0.0)
        {
            return Err(format!("Slope half width must be positive, got {}", half_width));
        }
        Ok(())
    }

    /// Build the per-call session
    fn session(
        &self,
        inlet_pressure: f64,
        blood_flow: f64,
        geometry: &DeviceGeometry,
        blood: &BloodState,
        coefficients: &CorrelationCoefficients,
    ) -> OxygenatorModel {
        OxygenatorModel::new(*geometry, *coefficients, *blood, blood_flow, inlet_pressure)
            .with_curve(self.curve)
            .with_slope_method(self.slope_method)
            .with_gas_pressure(self.gas_pressure())
            .with_rheology(self.viscosity, self.density)
    }

    /// Validate the inputs and march from the inlet to the end of the bundle
    ///
    /// Returns the simulation and the blood solubility k used by the session.
    fn march(
        &self,
        inlet_pressure: f64,
        blood_flow: f64,
        geometry: &DeviceGeometry,
        blood: &BloodState,
        coefficients: &CorrelationCoefficients,
    ) -> Result<(SimulationResult, f64), String> {
        // ====== Validation ======

        self.validate()?;
        geometry.validate()?;
        blood.validate()?;

        if !(inlet_pressure.is_finite() && inlet_pressure > 0.0) {
            return Err(format!("Inlet pressure must be positive, got {} mmHg", inlet_pressure));
        }
        if !(blood_flow.is_finite() && blood_flow > 0.0) {
            return Err(format!("Blood flow must be positive, got {} cm³/s", blood_flow));
        }

        // ====== Session and march ======

        let model = self.session(inlet_pressure, blood_flow, geometry, blood, coefficients);
        let solubility = model.properties().solubility;

        log::debug!(
            "Transfer setup: k = {:e}, D = {:e}, P_in = {} mmHg, Q = {} cm³/s, L = {} cm, h = {}",
            solubility,
            model.properties().diffusivity,
            inlet_pressure,
            blood_flow,
            geometry.length,
            self.step_size
        );

        let scenario = Scenario::from_model(Box::new(model));
        let config = SolverConfiguration::axial_march(0.0, geometry.length, self.step_size)
            .with_remainder(self.remainder);

        let simulation = RK4Solver::new().solve(&scenario, &config)?;

        Ok((simulation, solubility))
    }

    /// Outlet saturation and transfer rate for one operating point
    ///
    /// # Arguments
    ///
    /// * `inlet_pressure` - Blood O2 partial pressure at the inlet \[mmHg\]
    /// * `blood_flow` - Blood flow Q \[cm³/s\]
    /// * `geometry` - Fiber bundle geometry
    /// * `blood` - Hemoglobin, hematocrit, temperature
    /// * `coefficients` - Correlation exponents α, β
    ///
    /// # Errors
    ///
    /// - Invalid geometry, blood state, flow, inlet pressure or settings
    /// - Non-finite pressure during the march
    pub fn compute(
        &self,
        inlet_pressure: f64,
        blood_flow: f64,
        geometry: &DeviceGeometry,
        blood: &BloodState,
        coefficients: &CorrelationCoefficients,
    ) -> Result<TransferResult, String> {
        let (simulation, solubility) =
            self.march(inlet_pressure, blood_flow, geometry, blood, coefficients)?;

        let outlet_pressure = simulation
            .final_scalar(PhysicalQuantity::PartialPressure)
            .ok_or_else(|| "March ended without a partial pressure".to_string())?;

        let gas_pressure = self.gas_pressure();
        if outlet_pressure > gas_pressure {
            log::warn!(
                "Outlet pressure {} mmHg exceeds the gas-side pressure {} mmHg; \
                 the step size {} is too coarse for this operating point",
                outlet_pressure, gas_pressure, self.step_size
            );
        }

        // ====== Saturation and transfer rate ======

        let inlet_saturation = self.curve.saturation(inlet_pressure);
        let outlet_saturation = self.curve.saturation(outlet_pressure);

        let bound = HUFNER_CONSTANT * blood.hemoglobin * (outlet_saturation - inlet_saturation);
        let dissolved = solubility * (outlet_pressure - inlet_pressure);
        let transfer_rate = blood_flow * PER_MINUTE_PER_DECILITER * (bound + dissolved);

        Ok(TransferResult {
            outlet_pressure,
            outlet_saturation,
            transfer_rate,
            steps: simulation.steps(),
        })
    }

    /// Same as [`compute`](Self::compute) with the inlet given as a saturation
    ///
    /// The inlet pressure is recovered from the inverse dissociation curve.
    pub fn compute_from_saturation(
        &self,
        inlet_saturation: f64,
        blood_flow: f64,
        geometry: &DeviceGeometry,
        blood: &BloodState,
        coefficients: &CorrelationCoefficients,
    ) -> Result<TransferResult, String> {
        let inlet_pressure = self.curve.pressure_at(inlet_saturation)?;
        self.compute(inlet_pressure, blood_flow, geometry, blood, coefficients)
    }

    /// [`compute`](Self::compute) on a named device
    pub fn compute_preset(
        &self,
        preset: &DevicePreset,
        inlet_pressure: f64,
        blood_flow: f64,
        blood: &BloodState,
    ) -> Result<TransferResult, String> {
        self.compute(inlet_pressure, blood_flow, &preset.geometry, blood, &preset.coefficients)
    }

    /// Pressure and saturation at every station of the march
    ///
    /// Same inputs and errors as [`compute`](Self::compute). The saturation
    /// is the dissociation curve applied to the pressure profile.
    pub fn profile(
        &self,
        inlet_pressure: f64,
        blood_flow: f64,
        geometry: &DeviceGeometry,
        blood: &BloodState,
        coefficients: &CorrelationCoefficients,
    ) -> Result<AxialProfile, String> {
        let (simulation, _) = self.march(inlet_pressure, blood_flow, geometry, blood, coefficients)?;

        let pressure =
            PhysicalData::from_vec(simulation.scalar_profile(PhysicalQuantity::PartialPressure));

        let curve = self.curve;
        let mut saturation = pressure.clone();
        saturation.apply(|p| curve.saturation(p));

        let mut profile = PhysicalState::new(PhysicalQuantity::PartialPressure, pressure);
        profile.set(PhysicalQuantity::Saturation, saturation);

        Ok(AxialProfile { positions: simulation.positions, profile })
    }
}

/// Outlet saturation and transfer rate with the default settings
///
/// Step 0.005 cm, bovine curve at pH 7.4, centered-difference sink term,
/// 95 % oxygen sweep gas, truncated remainder.
pub fn compute_transfer(
    inlet_pressure: f64,
    blood_flow: f64,
    geometry: &DeviceGeometry,
    blood: &BloodState,
    coefficients: &CorrelationCoefficients,
) -> Result<TransferResult, String> {
    TransferCalculator::default().compute(inlet_pressure, blood_flow, geometry, blood, coefficients)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::device::lpm_to_cm3_per_s;
    use approx::assert_relative_eq;

    fn lung_blood() -> BloodState {
        BloodState::new(10.7, 0.37, 37.0)
    }

    fn lung(calculator: &TransferCalculator, inlet_pressure: f64) -> Result<TransferResult, String> {
        calculator.compute_preset(
            &DevicePreset::IMPLANTABLE_LUNG,
            inlet_pressure,
            lpm_to_cm3_per_s(5.0),
            &lung_blood(),
        )
    }

    #[test]
    fn test_default_settings() {
        let calculator = TransferCalculator::default();
        assert_eq!(calculator.step_size, 0.005);
        assert_eq!(calculator.remainder, Remainder::Truncate);
        assert_relative_eq!(calculator.gas_pressure(), 722.0, max_relative = 1e-12);
        assert!(calculator.validate().is_ok());
    }

    #[test]
    fn test_reference_operating_point() {
        let result = lung(&TransferCalculator::default(), 35.4).unwrap();

        assert_eq!(result.steps, 700);
        assert_relative_eq!(result.outlet_pressure, 92.50157382302137, max_relative = 1e-6);
        assert_relative_eq!(result.outlet_saturation, 0.9646272501426069, max_relative = 1e-6);
        assert_relative_eq!(result.transfer_rate, 233.98790916131134, max_relative = 1e-6);
    }

    #[test]
    fn test_transfer_rate_formula() {
        let result = lung(&TransferCalculator::default(), 35.4).unwrap();
        let curve = DissociationCurve::default();
        let k = crate::physics::blood::solubility(37.0, 0.37);
        let q = lpm_to_cm3_per_s(5.0);

        let expected = q * 60.0 / 100.0
            * (1.34 * 10.7 * (result.outlet_saturation - curve.saturation(35.4))
                + k * (result.outlet_pressure - 35.4));

        assert_relative_eq!(result.transfer_rate, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_free_function_matches_default_calculator() {
        let preset = DevicePreset::IMPLANTABLE_LUNG;
        let free = compute_transfer(
            35.4,
            lpm_to_cm3_per_s(5.0),
            &preset.geometry,
            &lung_blood(),
            &preset.coefficients,
        )
        .unwrap();

        assert_eq!(free, lung(&TransferCalculator::default(), 35.4).unwrap());
        assert_eq!(free.as_pair(), (free.outlet_saturation, free.transfer_rate));
    }

    #[test]
    fn test_from_saturation() {
        let calculator = TransferCalculator::default();
        let saturation = calculator.curve.saturation(35.4);

        let from_pressure = lung(&calculator, 35.4).unwrap();
        let from_saturation = calculator
            .compute_from_saturation(
                saturation,
                lpm_to_cm3_per_s(5.0),
                &DevicePreset::IMPLANTABLE_LUNG.geometry,
                &lung_blood(),
                &DevicePreset::IMPLANTABLE_LUNG.coefficients,
            )
            .unwrap();

        assert_relative_eq!(
            from_saturation.transfer_rate,
            from_pressure.transfer_rate,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_from_saturation_rejects_full_saturation() {
        let preset = DevicePreset::SMO;
        let result = TransferCalculator::default().compute_from_saturation(
            1.0,
            lpm_to_cm3_per_s(2.0),
            &preset.geometry,
            &lung_blood(),
            &preset.coefficients,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_analytic_slope_is_close_to_centered() {
        let centered = lung(&TransferCalculator::default(), 35.4).unwrap();
        let analytic = lung(
            &TransferCalculator::default().with_slope_method(SlopeMethod::Analytic),
            35.4,
        )
        .unwrap();

        assert_ne!(centered.outlet_pressure, analytic.outlet_pressure);
        assert_relative_eq!(centered.transfer_rate, analytic.transfer_rate, max_relative = 1e-3);
    }

    #[test]
    fn test_final_partial_step_reaches_bundle_end() {
        let truncated = lung(&TransferCalculator::default().with_step_size(0.008), 35.4).unwrap();
        let closed = lung(
            &TransferCalculator::default()
                .with_step_size(0.008)
                .with_remainder(Remainder::FinalPartialStep),
            35.4,
        )
        .unwrap();

        // 3.5 / 0.008 leaves a remainder
        assert_eq!(closed.steps, truncated.steps + 1);
        assert!(closed.outlet_pressure > truncated.outlet_pressure);
    }

    #[test]
    fn test_lower_gas_fraction_reduces_transfer() {
        let pure = lung(&TransferCalculator::default(), 35.4).unwrap();
        let air = lung(&TransferCalculator::default().with_gas_oxygen_fraction(0.21), 35.4).unwrap();
        assert!(air.transfer_rate < pure.transfer_rate);
    }

    #[test]
    fn test_invalid_inputs() {
        let calculator = TransferCalculator::default();
        let preset = DevicePreset::IMPLANTABLE_LUNG;
        let q = lpm_to_cm3_per_s(5.0);

        assert!(lung(&calculator, 0.0).is_err());
        assert!(lung(&calculator, f64::NAN).is_err());
        assert!(calculator.compute_preset(&preset, 35.4, 0.0, &lung_blood()).is_err());
        assert!(calculator
            .compute_preset(&preset, 35.4, q, &BloodState::new(10.7, 1.0, 37.0))
            .is_err());

        let mut geometry = preset.geometry;
        geometry.porosity = 1.0;
        let err = calculator
            .compute(35.4, q, &geometry, &lung_blood(), &preset.coefficients)
            .unwrap_err();
        assert!(err.contains("Porosity"));

        assert!(lung(&calculator.with_step_size(0.0), 35.4).is_err());
        assert!(lung(&calculator.with_gas_oxygen_fraction(1.5), 35.4).is_err());
        assert!(lung(&calculator.with_rheology(0.0, 1.0), 35.4).is_err());
    }

    #[test]
    fn test_profile_matches_compute() {
        let calculator = TransferCalculator::default();
        let preset = DevicePreset::IMPLANTABLE_LUNG;
        let q = lpm_to_cm3_per_s(5.0);

        let profile = calculator
            .profile(35.4, q, &preset.geometry, &lung_blood(), &preset.coefficients)
            .unwrap();
        let result = lung(&calculator, 35.4).unwrap();

        assert_eq!(profile.len(), 701);
        assert_eq!(profile.positions[0], 0.0);
        assert_relative_eq!(profile.positions[700], 3.5, max_relative = 1e-12);

        let pressure = profile.values(PhysicalQuantity::PartialPressure).unwrap();
        let saturation = profile.values(PhysicalQuantity::Saturation).unwrap();
        assert_eq!(pressure.len(), 701);
        assert_eq!(saturation.len(), 701);

        assert_eq!(pressure[0], 35.4);
        assert_eq!(pressure[700], result.outlet_pressure);
        assert_eq!(saturation[700], result.outlet_saturation);
        for i in 1..701 {
            assert!(saturation[i] > saturation[i - 1]);
        }
    }

    #[test]
    fn test_long_profile_saturation() {
        // 3501 stations, above the element-wise parallel threshold
        let calculator = TransferCalculator::default().with_step_size(0.001);
        let preset = DevicePreset::IMPLANTABLE_LUNG;

        let profile = calculator
            .profile(35.4, lpm_to_cm3_per_s(5.0), &preset.geometry, &lung_blood(), &preset.coefficients)
            .unwrap();

        assert_eq!(profile.len(), 3501);
        let pressure = profile.values(PhysicalQuantity::PartialPressure).unwrap();
        let saturation = profile.values(PhysicalQuantity::Saturation).unwrap();
        for (p, s) in pressure.iter().zip(saturation.iter()) {
            assert_eq!(*s, calculator.curve.saturation(*p));
        }
    }

    #[test]
    fn test_profile_rejects_invalid_inputs() {
        let preset = DevicePreset::IMPLANTABLE_LUNG;
        let result = TransferCalculator::default().profile(
            -1.0,
            lpm_to_cm3_per_s(5.0),
            &preset.geometry,
            &lung_blood(),
            &preset.coefficients,
        );
        assert!(result.unwrap_err().starts_with("Inlet pressure must be positive"));
    }

    #[test]
    fn test_tiny_step_is_rejected() {
        let calculator = TransferCalculator::default().with_step_size(1e-300);
        let err = calculator
            .compute_preset(
                &DevicePreset::IMPLANTABLE_LUNG,
                35.4,
                lpm_to_cm3_per_s(5.0),
                &lung_blood(),
            )
            .unwrap_err();
        assert!(err.contains("more than the limit"), "{}", err);
    }
}
