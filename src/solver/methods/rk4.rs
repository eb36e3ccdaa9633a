//! Runge-Kutta 4 (RK4) numerical solver
//!
//! # Mathematical Background
//!
//! The classical fourth-order Runge-Kutta method integrates
//!
//! ```text
//! dy/dx = f(x, y)
//! ```
//!
//! with a weighted average of four slope estimates per step of length h:
//!
//! ```text
//! k₁ = f(xₙ, yₙ)
//! k₂ = f(xₙ + h/2, yₙ + h/2 · k₁)
//! k₃ = f(xₙ + h/2, yₙ + h/2 · k₂)
//! k₄ = f(xₙ + h, yₙ + h · k₃)
//!
//! yₙ₊₁ = yₙ + h/6 · (k₁ + 2k₂ + 2k₃ + k₄)
//! ```
//!
//! Every stage is evaluated at the current state yₙ; the first slope of a step
//! always uses the state reached by the previous one.
//!
//! # Characteristics
//!
//! - **Order**: Fourth-order accurate (global error ~ O(h⁴))
//! - **Complexity**: 4 function evaluations per step
//! - **Memory**: stores the full trajectory (one state per step)
//!
//! # Step layout
//!
//! The step layout comes from [`SolverConfiguration::discretization`]. With an
//! axial march of step `h` over `[x₀, x_end]`, `floor((x_end - x₀)/h)` steps
//! are taken; a step longer than the interval performs no step and returns
//! the inlet state.

use crate::physics::{PhysicalModel, PhysicalQuantity, PhysicalState, POSITION_KEY};
use crate::solver::{
    validate_state, DomainBoundaries, Scenario, SimulationResult, Solver, SolverConfiguration,
};

// =================================================================================================
// RK4 Solver
// =================================================================================================

/// Classical fourth-order Runge-Kutta solver
///
/// # Example
///
/// ```rust
/// use oxy_rs::physics::{PhysicalModel, PhysicalQuantity, PhysicalState};
/// use oxy_rs::solver::{RK4Solver, Scenario, Solver, SolverConfiguration};
///
/// struct Linear;
///
/// impl PhysicalModel for Linear {
///     fn points(&self) -> usize { 1 }
///     fn compute_physics(&self, _state: &PhysicalState) -> PhysicalState {
///         PhysicalState::scalar_state(PhysicalQuantity::PartialPressure, 2.0)
///     }
///     fn setup_initial_state(&self) -> PhysicalState {
///         PhysicalState::scalar_state(PhysicalQuantity::PartialPressure, 1.0)
///     }
///     fn name(&self) -> &str { "Linear" }
/// }
///
/// # fn main() -> Result<(), String> {
/// let scenario = Scenario::from_model(Box::new(Linear));
/// let config = SolverConfiguration::fixed_steps(0.0, 1.0, 10);
///
/// let result = RK4Solver::new().solve(&scenario, &config)?;
/// let p = result.final_scalar(PhysicalQuantity::PartialPressure).unwrap();
/// assert!((p - 3.0).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Solver;

impl RK4Solver {
    /// Create a new RK4 solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use oxy_rs::solver::{RK4Solver, Solver};
    ///
    /// let solver = RK4Solver::new();
    /// assert_eq!(solver.name(), "Runge Kutta (RK4)");
    /// ```
    pub fn new() -> Self {
        Self
    }
}

/// Copy of `state` tagged with the position at which the model is evaluated
fn at_position(mut state: PhysicalState, position: f64) -> PhysicalState {
    state.set_metadata(POSITION_KEY, position);
    state
}

impl Solver for RK4Solver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, String> {

        // ====== Step 1: Validation ======

        let layout = config.discretization()?;
        scenario.validate()?;

        // ====== Step 2: Setup ======

        let mut state = match scenario.conditions.initial_condition() {
            Some(initial_state) => at_position(initial_state.clone(), layout.start),
            None => return Err("No initial condition found in domain boundaries".to_string()),
        };

        let steps = layout.steps();
        let mut positions = Vec::with_capacity(steps + 1);
        let mut state_trajectory = Vec::with_capacity(steps + 1);

        positions.push(layout.start);
        state_trajectory.push(state.clone());

        log::debug!(
            "RK4 march of '{}' over [{}, {}]: {} steps of {}",
            scenario.get_model_name(),
            layout.start,
            layout.end(),
            steps,
            layout.step_size
        );

        // ====== Step 3: Axial march ======

        for step in 0..steps {
            let x = layout.position(step);
            let h = layout.step_length(step);
            let model = &scenario.model;

            // k₁ = f(xₙ, yₙ)
            let k1 = model.compute_physics(&state);

            // k₂ = f(xₙ + h/2, yₙ + h/2·k₁)
            let state_k2 = at_position(state.clone() + k1.clone() * (h / 2.0), x + h / 2.0);
            let k2 = model.compute_physics(&state_k2);

            // k₃ = f(xₙ + h/2, yₙ + h/2·k₂)
            let state_k3 = at_position(state.clone() + k2.clone() * (h / 2.0), x + h / 2.0);
            let k3 = model.compute_physics(&state_k3);

            // k₄ = f(xₙ + h, yₙ + h·k₃)
            let state_k4 = at_position(state.clone() + k3.clone() * h, x + h);
            let k4 = model.compute_physics(&state_k4);

            let weighted_slope = k1 + k2 * 2.0 + k3 * 2.0 + k4;

            // Position from the index so rounding does not accumulate
            let next_position = if h == layout.step_size {
                layout.position(step + 1)
            } else {
                x + h
            };

            state = at_position(state + weighted_slope * (h / 6.0), next_position);

            validate_state(&state, step + 1)?;

            positions.push(next_position);
            state_trajectory.push(state.clone());
        }

        // ====== Step 4: Build Result ======

        let mut result = SimulationResult::new(positions, state_trajectory, state);

        result.add_metadata("solver", "Runge-Kutta 4");
        result.add_metadata("steps", &steps.to_string());
        result.add_metadata("step size", &layout.step_size.to_string());
        result.add_metadata("function evaluations", &(4 * steps).to_string());

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "Runge Kutta (RK4)"
    }
}

// =================================================================================================
// Convenience entry point
// =================================================================================================

/// Integrate a scalar partial-pressure model from `x0` to `x_end` with RK4
///
/// Runs an axial march of step `step_size` (floor step count, remainder
/// truncated) starting from `p0` and returns the final pressure.
///
/// # Errors
///
/// - Invalid interval or step size
/// - Non-finite pressure after a step
pub fn integrate(
    model: Box<dyn PhysicalModel>,
    x0: f64,
    p0: f64,
    x_end: f64,
    step_size: f64,
) -> Result<f64, String> {
    let inlet = PhysicalState::scalar_state(PhysicalQuantity::PartialPressure, p0);
    let scenario = Scenario::new(model, DomainBoundaries::axial(inlet));
    let config = SolverConfiguration::axial_march(x0, x_end, step_size);

    RK4Solver::new()
        .solve(&scenario, &config)?
        .final_scalar(PhysicalQuantity::PartialPressure)
        .ok_or_else(|| "Model did not return a partial pressure".to_string())
}

// =================================================================================================
// Tests
// =================================================================================================
