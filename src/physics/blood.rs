//! Blood oxygen transport properties
//!
//! Closed-form empirical correlations for the physical solubility `k` and the
//! effective diffusivity `D` of oxygen in whole blood, as functions of
//! temperature and hematocrit.
//!
//! # Solubility
//!
//! Hematocrit-weighted mean of red-cell and plasma solubility, temperature
//! corrected by an empirical exponential factor:
//!
//! ```text
//! k = Hct·k_cell·1.01^(37-T) + (1-Hct)·k_plasma·1.01^(37-T)
//! ```
//!
//! # Diffusivity
//!
//! Maxwell two-phase effective medium. Plasma and cell permeabilities
//! (solubility × diffusivity) are combined with the shape parameter
//! `M = 0.283`:
//!
//! ```text
//! N = (k_cell·D_cell) / (k_pl·D_pl)
//! B = (N-1)/3 · (2/(1 + M/2·(N-1)) + 1/(1 + (N-1)(M-1)))
//! X = (1 - N(1-B)) / (N - 1 - B)
//! G = Hct(N-1) / (N + X)
//! D = D_pl·k_pl·(1 + X·G) / (k·(1 - G))
//! ```
//!
//! Units: `k` in mL O2 / (mL blood · mmHg), `D` in cm²/s, `T` in °C.

/// Oxygen solubility in red cells at 37 °C [mL O2 / (mL · mmHg)]
pub const CELL_SOLUBILITY: f64 = 4.658e-5;

/// Oxygen solubility in plasma at 37 °C [mL O2 / (mL · mmHg)]
pub const PLASMA_SOLUBILITY: f64 = 2.855e-5;

/// Oxygen diffusivity in plasma at 25 °C [cm²/s]
pub const PLASMA_DIFFUSIVITY: f64 = 1.62e-5;

/// Oxygen diffusivity in red cells at 25 °C [cm²/s]
pub const CELL_DIFFUSIVITY: f64 = 0.76e-5;

/// Temperature base of the solubility correction (per °C below 37 °C)
const SOLUBILITY_TEMPERATURE_BASE: f64 = 1.01;

/// Temperature base of the diffusivity correction (per °C above 25 °C)
const DIFFUSIVITY_TEMPERATURE_BASE: f64 = 1.025;

/// Reference temperature of the solubility data [°C]
const SOLUBILITY_REFERENCE_C: f64 = 37.0;

/// Reference temperature of the diffusivity data [°C]
const DIFFUSIVITY_REFERENCE_C: f64 = 25.0;

/// Maxwell shape parameter for red cells
const MAXWELL_SHAPE: f64 = 0.283;

// =================================================================================================
// Blood state
// =================================================================================================

/// Blood composition and temperature for one oxygenator evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloodState {
    /// Hemoglobin concentration [g/dL]
    pub hemoglobin: f64,
    /// Hematocrit (volume fraction of red cells) [-]
    pub hematocrit: f64,
    /// Temperature [°C]
    pub temperature: f64,
}

impl BloodState {
    /// Create a blood state
    pub fn new(hemoglobin: f64, hematocrit: f64, temperature: f64) -> Self {
        Self { hemoglobin, hematocrit, temperature }
    }

    /// Check the inputs the correlations can accept
    ///
    /// The correlations themselves never fail; this turns the degenerate
    /// inputs (hematocrit of one, negative hemoglobin) into explicit errors
    /// before an evaluation starts.
    pub fn validate(&self) -> Result<(), String> {
        if !self.hemoglobin.is_finite() || self.hemoglobin < 0.0 {
            return Err(format!(
                "Hemoglobin must be a finite non-negative value, got {} g/dL",
                self.hemoglobin
            ));
        }
        if !(0.0..1.0).contains(&self.hematocrit) {
            return Err(format!("Hematocrit must be in [0, 1), got {}", self.hematocrit));
        }
        if !self.temperature.is_finite() {
            return Err(format!("Temperature must be finite, got {}", self.temperature));
        }
        Ok(())
    }
}

// =================================================================================================
// Derived properties
// =================================================================================================

/// Oxygen solubility and diffusivity derived from a [`BloodState`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloodProperties {
    /// Solubility k [mL O2 / (mL · mmHg)]
    pub solubility: f64,
    /// Effective diffusivity D [cm²/s]
    pub diffusivity: f64,
}

impl BloodProperties {
    /// Evaluate both correlations once for the given blood
    pub fn derive(blood: &BloodState) -> Self {
        Self {
            solubility: solubility(blood.temperature, blood.hematocrit),
            diffusivity: diffusivity(blood.temperature, blood.hematocrit),
        }
    }
}

#[inline]
fn solubility_factor(temperature: f64) -> f64 {
    SOLUBILITY_TEMPERATURE_BASE.powf(SOLUBILITY_REFERENCE_C - temperature)
}

#[inline]
fn diffusivity_factor(temperature: f64) -> f64 {
    DIFFUSIVITY_TEMPERATURE_BASE.powf(temperature - DIFFUSIVITY_REFERENCE_C)
}

/// Oxygen solubility in whole blood
///
/// # Example
///
/// ```rust
/// use oxy_rs::physics::blood::{solubility, PLASMA_SOLUBILITY};
///
/// // Pure plasma at body temperature
/// assert_eq!(solubility(37.0, 0.0), PLASMA_SOLUBILITY);
/// ```
pub fn solubility(temperature: f64, hematocrit: f64) -> f64 {
    let factor = solubility_factor(temperature);
    hematocrit * CELL_SOLUBILITY * factor + (1.0 - hematocrit) * PLASMA_SOLUBILITY * factor
}

/// Effective oxygen diffusivity in whole blood (Maxwell mixture)
///
/// Divides by `k·(1-G)`; both stay positive for physiological inputs.
pub fn diffusivity(temperature: f64, hematocrit: f64) -> f64 {
    let exp_k = solubility_factor(temperature);
    let exp_d = diffusivity_factor(temperature);

    let k_plasma = PLASMA_SOLUBILITY * exp_k;
    let k_cell = CELL_SOLUBILITY * exp_k;
    let d_plasma = PLASMA_DIFFUSIVITY * exp_d;
    let d_cell = CELL_DIFFUSIVITY * exp_d;

    let n = k_cell * d_cell / (k_plasma * d_plasma);
    let m = MAXWELL_SHAPE;

    let b = (n - 1.0) / 3.0
        * (2.0 / (1.0 + m / 2.0 * (n - 1.0)) + 1.0 / (1.0 + (n - 1.0) * (m - 1.0)));
    let x = (1.0 - n * (1.0 - b)) / (n - 1.0 - b);
    let g = hematocrit * (n - 1.0) / (n + x);

    let k = solubility(temperature, hematocrit);

    d_plasma * k_plasma * (1.0 + x * g) / (k * (1.0 - g))
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solubility_pure_phase_limits() {
        for t in [20.0, 25.0, 30.0, 34.0, 37.0, 40.0] {
            let factor = 1.01_f64.powf(37.0 - t);
            assert_relative_eq!(solubility(t, 0.0), 2.855e-5 * factor, max_relative = 1e-14);
            assert_relative_eq!(solubility(t, 1.0), 4.658e-5 * factor, max_relative = 1e-14);
        }
    }

    #[test]
    fn test_solubility_increases_when_cooling() {
        assert!(solubility(30.0, 0.37) > solubility(37.0, 0.37));
    }

    #[test]
    fn test_reference_solubility() {
        // Hct 0.37 at 37 °C
        assert_relative_eq!(solubility(37.0, 0.37), 3.52211e-5, max_relative = 1e-12);
    }

    #[test]
    fn test_diffusivity_plasma_limit() {
        // Without cells G = 0 and the mixture collapses to plasma
        for t in [25.0, 30.0, 37.0] {
            let expected = 1.62e-5 * 1.025_f64.powf(t - 25.0);
            assert_relative_eq!(diffusivity(t, 0.0), expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_reference_diffusivity() {
        assert_relative_eq!(diffusivity(37.0, 0.37), 1.6152105498715718e-5, max_relative = 1e-9);
    }

    #[test]
    fn test_diffusivity_decreases_with_hematocrit() {
        let mut previous = diffusivity(37.0, 0.0);
        for hct in [0.1, 0.2, 0.3, 0.4, 0.5, 0.6] {
            let current = diffusivity(37.0, hct);
            assert!(current > 0.0);
            assert!(current < previous, "D({}) = {} not below {}", hct, current, previous);
            previous = current;
        }
    }

    #[test]
    fn test_derive_matches_free_functions() {
        let blood = BloodState::new(10.7, 0.37, 37.0);
        let properties = BloodProperties::derive(&blood);

        assert_eq!(properties.solubility, solubility(37.0, 0.37));
        assert_eq!(properties.diffusivity, diffusivity(37.0, 0.37));
    }

    #[test]
    fn test_blood_validation() {
        assert!(BloodState::new(10.7, 0.37, 37.0).validate().is_ok());
        assert!(BloodState::new(10.7, 0.0, 37.0).validate().is_ok());

        let err = BloodState::new(10.7, 1.0, 37.0).validate().unwrap_err();
        assert!(err.contains("Hematocrit"));

        assert!(BloodState::new(-1.0, 0.37, 37.0).validate().is_err());
        assert!(BloodState::new(10.7, 0.37, f64::NAN).validate().is_err());
    }
}
