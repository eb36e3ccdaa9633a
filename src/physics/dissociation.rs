//! Oxygen dissociation curve (Hill equation)
//!
//! Fractional hemoglobin saturation as a function of oxygen partial pressure:
//!
//! ```text
//! S(P) = X / (1 + X),    X = (P / P50)^n
//! ```
//!
//! `P50` is the pressure at half saturation and `n` the Hill coefficient.
//! The curve is not clamped: a negative pressure raised to the non-integer
//! power `n` yields NaN, which propagates to the caller.
//!
//! # Species parameters
//!
//! | Curve  | P50 (mmHg)                 | n    |
//! |--------|----------------------------|------|
//! | Bovine | 29 · 10^(0.41·(7.4 - pH))  | 2.85 |
//! | Human  | 26.6 · 10^(0.48·(7.4 - pH))| 2.85 |
//!
//! The bovine curve is the default.

/// Standard blood pH
pub const STANDARD_PH: f64 = 7.4;

/// Hill coefficient used for both species curves
pub const HILL_COEFFICIENT: f64 = 2.85;

/// Bovine P50 at pH 7.4 [mmHg]
const BOVINE_P50: f64 = 29.0;

/// Bovine Bohr coefficient
const BOVINE_BOHR: f64 = 0.41;

/// Human P50 at pH 7.4 [mmHg]
const HUMAN_P50: f64 = 26.6;

/// Human Bohr coefficient
const HUMAN_BOHR: f64 = 0.48;

/// Hill saturation `S = X/(1+X)` with `X = (p/p50)^n`
///
/// # Example
///
/// ```rust
/// use oxy_rs::physics::dissociation::hill;
///
/// assert_eq!(hill(29.0, 29.0, 2.85), 0.5);
/// ```
pub fn hill(pressure: f64, p50: f64, n: f64) -> f64 {
    let x = (pressure / p50).powf(n);
    x / (1.0 + x)
}

/// Hemoglobin oxygen dissociation curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DissociationCurve {
    /// Partial pressure at 50 % saturation [mmHg]
    pub p50: f64,
    /// Hill coefficient n [-]
    pub hill_coefficient: f64,
}

impl Default for DissociationCurve {
    /// Bovine curve at pH 7.4
    fn default() -> Self {
        Self::bovine(STANDARD_PH)
    }
}

impl DissociationCurve {
    /// Create a curve from explicit parameters
    pub fn new(p50: f64, hill_coefficient: f64) -> Self {
        Self { p50, hill_coefficient }
    }

    /// Bovine blood, Bohr-shifted to `ph`
    pub fn bovine(ph: f64) -> Self {
        Self::new(BOVINE_P50 * 10f64.powf(BOVINE_BOHR * (STANDARD_PH - ph)), HILL_COEFFICIENT)
    }

    /// Human blood, Bohr-shifted to `ph`
    pub fn human(ph: f64) -> Self {
        Self::new(HUMAN_P50 * 10f64.powf(HUMAN_BOHR * (STANDARD_PH - ph)), HILL_COEFFICIENT)
    }

    /// Saturation at `pressure` [mmHg]
    #[inline]
    pub fn saturation(&self, pressure: f64) -> f64 {
        hill(pressure, self.p50, self.hill_coefficient)
    }

    /// Exact slope dS/dP of the Hill curve [1/mmHg]
    ///
    /// `dS/dP = n·X / (P·(1+X)²)`, zero at `P = 0`.
    pub fn slope(&self, pressure: f64) -> f64 {
        if pressure == 0.0 {
            return 0.0;
        }
        let x = (pressure / self.p50).powf(self.hill_coefficient);
        self.hill_coefficient * x / (pressure * (1.0 + x) * (1.0 + x))
    }

    /// Inverse curve: partial pressure giving `saturation`
    ///
    /// `P = P50 · (S / (1 - S))^(1/n)`
    ///
    /// # Errors
    ///
    /// Returns an error when `saturation` is outside `[0, 1)`.
    pub fn pressure_at(&self, saturation: f64) -> Result<f64, String> {
        if !(0.0..1.0).contains(&saturation) {
            return Err(format!("Saturation must be in [0, 1), got {}", saturation));
        }
        Ok(self.p50 * (saturation / (1.0 - saturation)).powf(1.0 / self.hill_coefficient))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_half_saturation_at_p50() {
        for n in [0.5, 1.0, 2.0, 2.7, 2.85, 4.0] {
            assert_eq!(hill(26.8, 26.8, n), 0.5);
        }
    }

    #[test]
    fn test_monotonic_in_pressure() {
        let curve = DissociationCurve::default();
        let mut previous = curve.saturation(0.0);
        assert_eq!(previous, 0.0);

        for i in 1..=700 {
            let s = curve.saturation(i as f64);
            assert!(s >= previous, "S({}) = {} < {}", i, s, previous);
            previous = s;
        }
        assert!(previous < 1.0);
    }

    #[test]
    fn test_negative_pressure_is_nan() {
        assert!(hill(-1.0, 29.0, 2.85).is_nan());
    }

    #[test]
    fn test_default_is_bovine_standard() {
        let curve = DissociationCurve::default();
        assert_eq!(curve.p50, 29.0);
        assert_eq!(curve.hill_coefficient, 2.85);
    }

    #[test]
    fn test_bohr_shift() {
        // Acidosis shifts the curve right
        assert!(DissociationCurve::bovine(7.2).p50 > DissociationCurve::bovine(7.4).p50);
        assert_relative_eq!(DissociationCurve::human(7.4).p50, 26.6);
        assert_relative_eq!(
            DissociationCurve::human(7.3).p50,
            26.6 * 10f64.powf(0.048),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_inverse_round_trip() {
        let curve = DissociationCurve::default();
        for s in [0.1, 0.38, 0.5, 0.59, 0.83, 0.97] {
            let p = curve.pressure_at(s).unwrap();
            assert_relative_eq!(curve.saturation(p), s, max_relative = 1e-12);
        }
        assert_relative_eq!(curve.pressure_at(0.5).unwrap(), 29.0, max_relative = 1e-12);
    }

    #[test]
    fn test_inverse_rejects_full_saturation() {
        let curve = DissociationCurve::default();
        assert!(curve.pressure_at(1.0).is_err());
        assert!(curve.pressure_at(-0.1).is_err());
    }

    #[test]
    fn test_slope_matches_finite_difference() {
        let curve = DissociationCurve::default();
        for p in [10.0, 29.0, 35.4, 60.0, 120.0] {
            let h = 1e-5;
            let numeric = (curve.saturation(p + h) - curve.saturation(p - h)) / (2.0 * h);
            assert_relative_eq!(curve.slope(p), numeric, max_relative = 1e-6);
        }
        assert_eq!(curve.slope(0.0), 0.0);
    }
}
