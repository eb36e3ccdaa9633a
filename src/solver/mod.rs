//! Numerical solvers
//!
//! This module provides traits and implementations for numerical solvers.
//! A numerical solver applies a numerical method to the equations provided
//! by a physical model within a specific scenario.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Physical model (equations)
//!    - Domain boundaries (inlet condition)
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Integration interval
//!    - Step size or step count, remainder policy
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - Applies the numerical scheme
//!    - Returns the trajectory
//!    - Independent of physics
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver`, `SolverType`, `SolverConfiguration`,
//!   `Discretization`, `SimulationResult`
//! - **`boundary`**: `DomainBoundaries`, `DimensionBoundary`
//! - **`scenario`**: `Scenario`
//! - **`methods`**: `RK4Solver` (classical Runge-Kutta), `EulerSolver`
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │  Physical Model │  (dP/dx)
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ Scenario        │ ← WHAT to solve (model + inlet)
//! └────────┬────────┘
//!          │
//! ┌────────▼─────────────┐
//! │ Solver Configuration │ ← HOW to solve (interval + step)
//! └────────┬─────────────┘
//!          │
//! ┌────────▼────────┐
//! │ Numerical Solver│ ← The method (RK4, Euler)
//! └────────┬────────┘
//!          │
//! ┌────────▼────────────┐
//! │ Simulation Result   │ ← positions + states + metadata
//! └─────────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use oxy_rs::models::OxygenatorModel;
//! use oxy_rs::models::device::{lpm_to_cm3_per_s, DevicePreset};
//! use oxy_rs::physics::{BloodState, PhysicalQuantity};
//! use oxy_rs::solver::{RK4Solver, Scenario, Solver, SolverConfiguration};
//!
//! # fn main() -> Result<(), String> {
//! let preset = DevicePreset::IMPLANTABLE_LUNG;
//! let model = OxygenatorModel::new(
//!     preset.geometry,
//!     preset.coefficients,
//!     BloodState::new(10.7, 0.37, 37.0),
//!     lpm_to_cm3_per_s(5.0),
//!     35.4,
//! );
//!
//! let scenario = Scenario::from_model(Box::new(model));
//! let config = SolverConfiguration::axial_march(0.0, preset.geometry.length, 0.005);
//!
//! let result = RK4Solver::new().solve(&scenario, &config)?;
//! assert_eq!(result.steps(), 700);
//! assert!(result.final_scalar(PhysicalQuantity::PartialPressure).unwrap() > 35.4);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All solver methods return `Result<T, String>`. Common errors:
//! - Invalid configuration (non-positive step, reversed interval)
//! - Invalid scenario (no inlet condition)
//! - Numerical breakdown (NaN or infinite pressure)

// =================================================================================================
// Module Declarations
// =================================================================================================
mod traits;
mod boundary;
mod scenario;
mod methods;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    Discretization,
    MAX_STEPS,
    Remainder,
    SimulationResult,
    Solver,
    SolverConfiguration,
    SolverType,
};

pub use boundary::{DimensionBoundary, DomainBoundaries};
pub use scenario::Scenario;

pub use methods::{integrate, EulerSolver, RK4Solver};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::physics::PhysicalState;

/// Validate physical state for numerical issues
///
/// # Arguments
///
/// * `state` - Physical state to validate
/// * `step` - Current step (for error reporting)
///
/// # Returns
///
/// `Ok(())` if state is valid, `Err(msg)` with diagnostic information otherwise
pub(crate) fn validate_state(state: &PhysicalState, step: usize) -> Result<(), String> {
    for (quantity, data) in state.iter() {
        // NaN arises from 0/0, a missing quantity or an undefined slope
        if data.has_nan() {
            return Err(format!(
                "NaN detected in {} at step {}. Check the model inputs \
                 (pressure must stay positive for the dissociation slope).",
                quantity, step
            ));
        }

        if data.has_infinite() {
            return Err(format!(
                "Infinity detected in {} at step {}. This indicates numerical overflow. \
                 Try reducing the step size.",
                quantity, step
            ));
        }
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
