//! Hollow-fiber oxygenator: rate of partial-pressure rise along the bundle
//!
//! # Governing equation
//!
//! Blood flows across the fiber bundle over a length `L`. A boundary-layer
//! mass-transfer correlation of the form `Sh = α·Re^β·Sc^(1/3)` gives the
//! rise of the blood oxygen partial pressure `P` with axial position `x`:
//!
//! ```text
//! dP/dx = term1 · term2 · term3 · term4
//!
//! term1 = 4α/ε · ((1-ε)/d)^(2-β)          geometry
//! term2 = (A_f·ν / Q)^(1-β)               flow
//! term3 = (D / ν)^(2/3)                   diffusion (Schmidt-like)
//! term4 = (P_g - P) / (1 + λ(P))^(2/3)    driving force
//! ```
//!
//! where `ν = μ/ρ` is the blood kinematic viscosity, `P_g` the oxygen partial
//! pressure on the gas side, `D` the blood oxygen diffusivity and `λ(P)` the
//! hemoglobin sink term. The rate does not depend on `x` itself.
//!
//! # Session
//!
//! [`OxygenatorModel`] holds every immutable input of one evaluation
//! (geometry, correlation, blood, flow, derived k and D). It is built once per
//! transfer calculation and shared by reference with the solver.

use crate::models::device::{CorrelationCoefficients, DeviceGeometry};
use crate::physics::blood::{BloodProperties, BloodState};
use crate::physics::dissociation::DissociationCurve;
use crate::physics::sink::{SinkTerm, SlopeMethod};
use crate::physics::{PhysicalModel, PhysicalQuantity, PhysicalState, POSITION_KEY};

/// Atmospheric pressure [mmHg]
pub const ATMOSPHERIC_PRESSURE: f64 = 760.0;

/// Oxygen fraction of the sweep gas
pub const DEFAULT_GAS_OXYGEN_FRACTION: f64 = 0.95;

/// Blood dynamic viscosity μ [dyn·s/cm²]
pub const BLOOD_VISCOSITY: f64 = 0.03;

/// Blood density ρ [g/cm³]
pub const BLOOD_DENSITY: f64 = 1.0;

/// Oxygenator transfer model for one set of operating conditions
#[derive(Debug, Clone)]
pub struct OxygenatorModel {
    geometry: DeviceGeometry,
    coefficients: CorrelationCoefficients,
    blood: BloodState,
    properties: BloodProperties,
    /// Blood flow Q [cm³/s]
    blood_flow: f64,
    /// Inlet partial pressure [mmHg]
    inlet_pressure: f64,
    /// Gas-side oxygen partial pressure P_g [mmHg]
    gas_pressure: f64,
    /// Kinematic viscosity ν [cm²/s]
    kinematic_viscosity: f64,
    sink: SinkTerm,
}

impl OxygenatorModel {
    /// Build the session
    ///
    /// Derives k and D from `blood` once.
    ///
    /// # Arguments
    ///
    /// * `geometry` - Fiber bundle geometry
    /// * `coefficients` - Correlation exponents α, β
    /// * `blood` - Hemoglobin, hematocrit, temperature
    /// * `blood_flow` - Blood flow Q \[cm³/s\]
    /// * `inlet_pressure` - Oxygen partial pressure at x = 0 \[mmHg\]
    pub fn new(
        geometry: DeviceGeometry,
        coefficients: CorrelationCoefficients,
        blood: BloodState,
        blood_flow: f64,
        inlet_pressure: f64,
    ) -> Self {
        let properties = BloodProperties::derive(&blood);

        Self {
            geometry,
            coefficients,
            blood,
            properties,
            blood_flow,
            inlet_pressure,
            gas_pressure: ATMOSPHERIC_PRESSURE * DEFAULT_GAS_OXYGEN_FRACTION,
            kinematic_viscosity: BLOOD_VISCOSITY / BLOOD_DENSITY,
            sink: SinkTerm::new(blood.hemoglobin, properties.solubility),
        }
    }

    /// Use another dissociation curve in the sink term
    pub fn with_curve(mut self, curve: DissociationCurve) -> Self {
        self.sink = self.sink.with_curve(curve);
        self
    }

    /// Use another dS/dP evaluation in the sink term
    pub fn with_slope_method(mut self, method: SlopeMethod) -> Self {
        self.sink = self.sink.with_method(method);
        self
    }

    /// Set the gas-side oxygen partial pressure [mmHg]
    pub fn with_gas_pressure(mut self, gas_pressure: f64) -> Self {
        self.gas_pressure = gas_pressure;
        self
    }

    /// Set blood viscosity [dyn·s/cm²] and density [g/cm³]
    pub fn with_rheology(mut self, viscosity: f64, density: f64) -> Self {
        self.kinematic_viscosity = viscosity / density;
        self
    }

    pub fn geometry(&self) -> &DeviceGeometry {
        &self.geometry
    }

    pub fn blood(&self) -> &BloodState {
        &self.blood
    }

    /// Derived solubility and diffusivity
    pub fn properties(&self) -> &BloodProperties {
        &self.properties
    }

    pub fn curve(&self) -> &DissociationCurve {
        &self.sink.curve
    }

    pub fn sink(&self) -> &SinkTerm {
        &self.sink
    }

    pub fn blood_flow(&self) -> f64 {
        self.blood_flow
    }

    pub fn inlet_pressure(&self) -> f64 {
        self.inlet_pressure
    }

    pub fn gas_pressure(&self) -> f64 {
        self.gas_pressure
    }

    pub fn kinematic_viscosity(&self) -> f64 {
        self.kinematic_viscosity
    }

    /// Geometric factor `4α/ε · ((1-ε)/d)^(2-β)`
    #[inline]
    fn geometric_term(&self) -> f64 {
        let porosity = self.geometry.porosity;
        let alpha = self.coefficients.alpha;
        let beta = self.coefficients.beta;

        4.0 * alpha / porosity * ((1.0 - porosity) / self.geometry.fiber_diameter).powf(2.0 - beta)
    }

    /// Flow factor `(A_f·ν/Q)^(1-β)`
    #[inline]
    fn flow_term(&self) -> f64 {
        (self.geometry.frontal_area * self.kinematic_viscosity / self.blood_flow)
            .powf(1.0 - self.coefficients.beta)
    }

    /// Diffusion factor `(D/ν)^(2/3)`
    #[inline]
    fn diffusion_term(&self) -> f64 {
        (self.properties.diffusivity / self.kinematic_viscosity).powf(2.0 / 3.0)
    }

    /// Driving force `(P_g - P) / (1 + λ(P))^(2/3)`
    #[inline]
    fn driving_term(&self, pressure: f64) -> f64 {
        (self.gas_pressure - pressure) / (1.0 + self.sink.evaluate(pressure)).powf(2.0 / 3.0)
    }

    /// dP/dx [mmHg/cm] at axial position `_x` and partial pressure `pressure`
    ///
    /// The position is accepted for the ODE signature but does not enter the
    /// rate: the bundle is homogeneous along its length.
    pub fn dp_dx(&self, _x: f64, pressure: f64) -> f64 {
        self.geometric_term()
            * self.flow_term()
            * self.diffusion_term()
            * self.driving_term(pressure)
    }
}

impl PhysicalModel for OxygenatorModel {
    fn points(&self) -> usize {
        1
    }

    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
        let x = state.get_metadata(POSITION_KEY).unwrap_or(0.0);

        // A missing pressure yields NaN, which the solver reports
        let pressure = state
            .scalar(PhysicalQuantity::PartialPressure)
            .unwrap_or(f64::NAN);

        PhysicalState::scalar_state(PhysicalQuantity::PartialPressure, self.dp_dx(x, pressure))
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::scalar_state(PhysicalQuantity::PartialPressure, self.inlet_pressure)
    }

    fn name(&self) -> &str {
        "Hollow-fiber oxygenator"
    }

    fn description(&self) -> Option<&str> {
        Some(
            "Blood O2 partial pressure along the fiber bundle from a \
            Sherwood-number correlation with hemoglobin sink term."
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::device::{lpm_to_cm3_per_s, DevicePreset};
    use approx::assert_relative_eq;

    fn create_model() -> OxygenatorModel {
        let preset = DevicePreset::IMPLANTABLE_LUNG;
        OxygenatorModel::new(
            preset.geometry,
            preset.coefficients,
            BloodState::new(10.7, 0.37, 37.0),
            lpm_to_cm3_per_s(5.0),
            35.4,
        )
    }

    #[test]
    fn test_defaults() {
        let model = create_model();
        assert_eq!(model.points(), 1);
        assert_eq!(model.gas_pressure(), 722.0);
        assert_eq!(model.kinematic_viscosity(), 0.03);
        assert_eq!(model.curve(), &DissociationCurve::default());
    }

    #[test]
    fn test_rate_matches_closed_form() {
        let model = create_model();
        let p = 35.4;
        let (d, eps, af, q) = (0.038_f64, 0.53_f64, 128.0_f64, 5000.0 / 60.0);
        let (alpha, beta) = (0.363_f64, 0.725_f64);
        let nu = 0.03_f64;
        let diffusivity = model.properties().diffusivity;

        let term1 = 4.0 * alpha / eps * ((1.0 - eps) / d).powf(2.0 - beta);
        let term2 = (af * nu / q).powf(1.0 - beta);
        let term3 = (diffusivity / nu).powf(2.0 / 3.0);
        let term4 = (722.0 - p) / (1.0 + model.sink().evaluate(p)).powf(2.0 / 3.0);

        assert_relative_eq!(model.dp_dx(0.0, p), term1 * term2 * term3 * term4, max_relative = 1e-12);
    }

    #[test]
    fn test_position_does_not_change_rate() {
        let model = create_model();
        assert_eq!(model.dp_dx(0.0, 50.0), model.dp_dx(3.2, 50.0));
    }

    #[test]
    fn test_rate_sign_follows_driving_force() {
        let model = create_model();
        assert!(model.dp_dx(0.0, 35.4) > 0.0);
        assert_eq!(model.dp_dx(0.0, 722.0), 0.0);
        assert!(model.dp_dx(0.0, 730.0) < 0.0);
    }

    #[test]
    fn test_higher_flow_slows_pressure_rise() {
        let slow = create_model();
        let preset = DevicePreset::IMPLANTABLE_LUNG;
        let fast = OxygenatorModel::new(
            preset.geometry,
            preset.coefficients,
            BloodState::new(10.7, 0.37, 37.0),
            lpm_to_cm3_per_s(6.0),
            35.4,
        );
        assert!(fast.dp_dx(0.0, 35.4) < slow.dp_dx(0.0, 35.4));
    }

    #[test]
    fn test_compute_physics_reads_pressure() {
        let model = create_model();
        let mut state = model.setup_initial_state();
        state.set_metadata(POSITION_KEY, 1.0);

        let rate = model.compute_physics(&state);
        assert_eq!(
            rate.scalar(PhysicalQuantity::PartialPressure),
            Some(model.dp_dx(1.0, 35.4))
        );
    }

    #[test]
    fn test_missing_pressure_gives_nan() {
        let model = create_model();
        let rate = model.compute_physics(&PhysicalState::empty());
        assert!(rate.scalar(PhysicalQuantity::PartialPressure).unwrap().is_nan());
    }

    #[test]
    fn test_gas_pressure_override() {
        let model = create_model().with_gas_pressure(ATMOSPHERIC_PRESSURE * 0.21);
        assert_relative_eq!(model.gas_pressure(), 159.6, max_relative = 1e-12);
        assert!(model.dp_dx(0.0, 35.4) < create_model().dp_dx(0.0, 35.4));
    }
}
