//! Helper functions for integration tests

use oxy_rs::models::device::{lpm_to_cm3_per_s, DevicePreset};
use oxy_rs::physics::{BloodState, PhysicalModel, PhysicalQuantity, PhysicalState};
use oxy_rs::solver::Scenario;

/// First value of the partial pressure, scalar or vector
pub fn first_pressure(state: &PhysicalState) -> f64 {
    let data = state
        .get(PhysicalQuantity::PartialPressure)
        .expect("state has no partial pressure");

    match data.try_as_scalar() {
        Some(value) => value,
        None => data.as_vector()[0],
    }
}

/// Create a scenario whose inlet is the model's initial state
pub fn create_simple_scenario(model: Box<dyn PhysicalModel>) -> Scenario {
    Scenario::from_model(model)
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// One of the implantable-lung bench experiments
pub struct LungExperiment {
    pub inlet_pressure: f64,
    pub blood: BloodState,
    pub blood_flow: f64,
}

/// Implantable-lung bench experiments 2 to 5 (5 L/min, 37 °C)
pub fn lung_experiments() -> Vec<LungExperiment> {
    [(35.4, 10.7, 0.37), (35.4, 11.0, 0.37), (32.5, 8.0, 0.30), (29.8, 8.2, 0.31)]
        .into_iter()
        .map(|(inlet_pressure, hemoglobin, hematocrit)| LungExperiment {
            inlet_pressure,
            blood: BloodState::new(hemoglobin, hematocrit, 37.0),
            blood_flow: lpm_to_cm3_per_s(5.0),
        })
        .collect()
}

/// Geometry and coefficients of the implantable lung
pub fn lung() -> DevicePreset {
    DevicePreset::IMPLANTABLE_LUNG
}
