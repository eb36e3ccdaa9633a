//! Simulation scenario definition
//!
//! A scenario combines a physical model with boundary conditions.
use crate::physics::PhysicalModel;
use crate::solver::boundary::DomainBoundaries;

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Physical model (equations)
/// - Boundary conditions (domain boundaries)
///
/// The same scenario can be solved with different numerical methods.
/// This is the "WHAT to solve" (not "HOW to solve").
pub struct Scenario {
    /// Physical model (equations)
    pub model: Box<dyn PhysicalModel>,

    /// Conditions and boundaries
    pub conditions: DomainBoundaries,
}

impl Scenario {

    /// Create a scenario
    pub fn new(model: Box<dyn PhysicalModel>, conditions: DomainBoundaries) -> Self {
        Self { model, conditions }
    }

    /// Scenario whose inlet condition is the model's own initial state
    pub fn from_model(model: Box<dyn PhysicalModel>) -> Self {
        let conditions = DomainBoundaries::axial(model.setup_initial_state());
        Self::new(model, conditions)
    }

    /// Verifying scenario content (mainly boundaries)
    pub fn validate(&self) -> Result<(), String> {
        self.conditions.validate()
    }

    /// Get model name
    pub fn get_model_name(&self) -> &str {
        self.model.name()
    }

    /// Number of boundary dimensions
    pub fn ndim(&self) -> usize {
        self.conditions.ndim()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
        .field("name", &self.get_model_name())
        .field("dimension", &self.ndim())
        .field("Boundaries / conditions", &self.conditions)
        .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
