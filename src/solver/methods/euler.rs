//! Forward Euler numerical solver
//!
//! # Mathematical Background
//!
//! ```text
//! y_{n+1} = y_n + h * f(x_n, y_n)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: First-order accurate (error ~ O(h))
//! - **Complexity**: 1 function evaluation per step
//!
//! Used as a low-order reference when checking the convergence of
//! [`RK4Solver`](crate::solver::RK4Solver); transfer calculations use RK4.

use crate::physics::{PhysicalState, POSITION_KEY};
use crate::solver::{validate_state, Scenario, SimulationResult, Solver, SolverConfiguration};

// =================================================================================================
// Forward Euler Solver
// =================================================================================================

/// Forward Euler solver
///
/// Shares the step layout of [`SolverConfiguration`] with the RK4 solver,
/// so both march over the same positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerSolver;

impl EulerSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for EulerSolver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, String> {
        let layout = config.discretization()?;
        scenario.validate()?;

        let mut state: PhysicalState = match scenario.conditions.initial_condition() {
            Some(initial_state) => initial_state.clone(),
            None => return Err("No initial condition found in domain boundaries".to_string()),
        };
        state.set_metadata(POSITION_KEY, layout.start);

        let steps = layout.steps();
        let mut positions = Vec::with_capacity(steps + 1);
        let mut state_trajectory = Vec::with_capacity(steps + 1);

        positions.push(layout.start);
        state_trajectory.push(state.clone());

        for step in 0..steps {
            let x = layout.position(step);
            let h = layout.step_length(step);

            let slope = scenario.model.compute_physics(&state);
            state = state + slope * h;

            let next_position = if h == layout.step_size {
                layout.position(step + 1)
            } else {
                x + h
            };
            state.set_metadata(POSITION_KEY, next_position);

            validate_state(&state, step + 1)?;

            positions.push(next_position);
            state_trajectory.push(state.clone());
        }

        let mut result = SimulationResult::new(positions, state_trajectory, state);

        result.add_metadata("solver", "Forward Euler");
        result.add_metadata("steps", &steps.to_string());
        result.add_metadata("step size", &layout.step_size.to_string());
        result.add_metadata("function evaluations", &steps.to_string());

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
