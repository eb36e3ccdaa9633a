//! Oxygenator geometry and mass-transfer correlation coefficients
//!
//! A device is described by its fiber bundle geometry and by the two
//! empirical exponents (α, β) of its Sherwood-number correlation. Units
//! follow the CGS system used by the transfer model: lengths in cm, frontal
//! area in cm², flow in cm³/s. The membrane surface area is kept in m² as
//! quoted by manufacturers; it does not enter the transfer equation.
//!
//! # Presets
//!
//! | Device                        | d (µm) | ε     | A_f (cm²) | L (cm) | α     | β     |
//! |-------------------------------|--------|-------|-----------|--------|-------|-------|
//! | [`DevicePreset::SMO`]         | 290    | 0.576 | 36.88     | 9.5    | 0.136 | 0.832 |
//! | [`DevicePreset::UNIVOX`]      | 365    | 0.31  | 207.7     | 1.2    | 0.256 | 0.779 |
//! | [`DevicePreset::IMPLANTABLE_LUNG`] | 380 | 0.53 | 128 | 3.5 | 0.363 | 0.725 |

/// Fiber bundle geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceGeometry {
    /// Outer fiber diameter d [cm]
    pub fiber_diameter: f64,
    /// Bundle porosity ε [-]
    pub porosity: f64,
    /// Frontal area A_f [cm²]
    pub frontal_area: f64,
    /// Bundle length along the blood path L [cm]
    pub length: f64,
    /// Membrane surface area [m²]
    pub surface_area: f64,
}

impl DeviceGeometry {
    /// Create a geometry
    pub fn new(
        fiber_diameter: f64,
        porosity: f64,
        frontal_area: f64,
        length: f64,
        surface_area: f64,
    ) -> Self {
        Self { fiber_diameter, porosity, frontal_area, length, surface_area }
    }

    /// Check that the geometric terms of the correlation are defined
    pub fn validate(&self) -> Result<(), String> {
        if !(self.porosity > 0.0 && self.porosity < 1.0) {
            return Err(format!("Porosity must be in ]0,1[, got {}", self.porosity));
        }
        for (name, value) in [
            ("Fiber diameter", self.fiber_diameter),
            ("Frontal area", self.frontal_area),
            ("Bundle length", self.length),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be positive, got {}", name, value));
            }
        }
        Ok(())
    }
}

/// Exponents of the correlation `Sh = α · Re^β · Sc^(1/3)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationCoefficients {
    pub alpha: f64,
    pub beta: f64,
}

impl CorrelationCoefficients {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }
}

/// Named device design: geometry plus its fitted correlation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DevicePreset {
    pub name: &'static str,
    pub geometry: DeviceGeometry,
    pub coefficients: CorrelationCoefficients,
}

impl DevicePreset {
    /// Hollow-fiber oxygenator "SMO"
    pub const SMO: DevicePreset = DevicePreset {
        name: "SMO",
        geometry: DeviceGeometry {
            fiber_diameter: 0.029,
            porosity: 0.576,
            frontal_area: 36.88,
            length: 9.5,
            surface_area: 1.87,
        },
        coefficients: CorrelationCoefficients { alpha: 0.136, beta: 0.832 },
    };

    /// Univox oxygenator
    pub const UNIVOX: DevicePreset = DevicePreset {
        name: "Univox",
        geometry: DeviceGeometry {
            fiber_diameter: 0.0365,
            porosity: 0.31,
            frontal_area: 207.7,
            length: 1.2,
            surface_area: 1.8,
        },
        coefficients: CorrelationCoefficients { alpha: 0.256, beta: 0.779 },
    };

    /// Implantable total artificial lung (1994)
    pub const IMPLANTABLE_LUNG: DevicePreset = DevicePreset {
        name: "TAL",
        geometry: DeviceGeometry {
            fiber_diameter: 0.038,
            porosity: 0.53,
            frontal_area: 128.0,
            length: 3.5,
            surface_area: 2.2,
        },
        coefficients: CorrelationCoefficients { alpha: 0.363, beta: 0.725 },
    };

    /// All built-in presets
    pub fn all() -> [DevicePreset; 3] {
        [Self::SMO, Self::UNIVOX, Self::IMPLANTABLE_LUNG]
    }

    /// Look up a preset by name (case-insensitive)
    pub fn by_name(name: &str) -> Option<DevicePreset> {
        Self::all()
            .into_iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name))
    }
}

// =================================================================================================
// Unit helpers
// =================================================================================================

/// µm → cm
pub fn microns_to_cm(microns: f64) -> f64 {
    microns * 1e-4
}

/// L/min → cm³/s
pub fn lpm_to_cm3_per_s(lpm: f64) -> f64 {
    lpm * 1000.0 / 60.0
}

/// cm³/s → L/min
pub fn cm3_per_s_to_lpm(flow: f64) -> f64 {
    flow * 60.0 / 1000.0
}

// =================================================================================================
// Tests
// =================================================================================================
