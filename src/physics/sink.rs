//! Oxygen sink term
//!
//! Local effective oxygen-binding capacity of blood relative to its physical
//! solubility:
//!
//! ```text
//! λ(P) = 1.34 · Hgb / k · dS/dP · 0.01
//! ```
//!
//! - `1.34` is Hüfner's constant (mL O2 per g hemoglobin)
//! - `Hgb` is in g/dL, hence the `0.01` dL → mL conversion
//! - `dS/dP` is the slope of the dissociation curve
//!
//! The slope is taken by default as a centered finite difference of half
//! width 0.05 mmHg. The exact Hill derivative is available through
//! [`SlopeMethod::Analytic`]; it moves results slightly.

use crate::physics::dissociation::DissociationCurve;

/// Hüfner's constant [mL O2 / g Hb]
pub const HUFNER_CONSTANT: f64 = 1.34;

/// Converts a per-deciliter hemoglobin content to per-milliliter
pub const DECILITER_TO_MILLILITER: f64 = 0.01;

/// Default half width of the centered difference [mmHg]
pub const DEFAULT_HALF_WIDTH: f64 = 0.05;

/// How dS/dP is evaluated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlopeMethod {
    /// `(S(P + h) - S(P - h)) / 2h`
    ///
    /// Evaluates the curve below zero when `P < half_width`, which gives NaN.
    CenteredDifference {
        half_width: f64,
    },

    /// Closed-form derivative of the Hill equation
    Analytic,
}

impl Default for SlopeMethod {
    fn default() -> Self {
        SlopeMethod::CenteredDifference { half_width: DEFAULT_HALF_WIDTH }
    }
}

/// Sink term λ(P) for one blood sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkTerm {
    /// Hemoglobin concentration [g/dL]
    pub hemoglobin: f64,
    /// Oxygen solubility k [mL O2 / (mL · mmHg)]
    pub solubility: f64,
    /// Dissociation curve providing S(P)
    pub curve: DissociationCurve,
    /// Slope evaluation
    pub method: SlopeMethod,
}

impl SinkTerm {
    /// Sink term with the default curve and centered difference
    pub fn new(hemoglobin: f64, solubility: f64) -> Self {
        Self {
            hemoglobin,
            solubility,
            curve: DissociationCurve::default(),
            method: SlopeMethod::default(),
        }
    }

    /// Use another dissociation curve
    pub fn with_curve(mut self, curve: DissociationCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Use another slope evaluation
    pub fn with_method(mut self, method: SlopeMethod) -> Self {
        self.method = method;
        self
    }

    /// dS/dP at `pressure` according to [`SlopeMethod`]
    pub fn saturation_slope(&self, pressure: f64) -> f64 {
        match self.method {
            SlopeMethod::CenteredDifference { half_width } => {
                (self.curve.saturation(pressure + half_width)
                    - self.curve.saturation(pressure - half_width))
                    / (2.0 * half_width)
            }
            SlopeMethod::Analytic => self.curve.slope(pressure),
        }
    }

    /// λ(P) [-]
    pub fn evaluate(&self, pressure: f64) -> f64 {
        HUFNER_CONSTANT * self.hemoglobin / self.solubility
            * self.saturation_slope(pressure)
            * DECILITER_TO_MILLILITER
    }
}

// =================================================================================================
// Tests
// =================================================================================================
