//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - Central enum `SolverType` defines the kind of march to perform
//! - `SolverConfiguration` wraps it with a validation step
//! - `SimulationResult` carries the trajectory plus string metadata
//! - `Solver` is the single entry point every method implements

use crate::physics::{PhysicalQuantity, PhysicalState};
use crate::solver::Scenario;
use std::collections::HashMap;

/// Largest number of full steps a march may take
///
/// The trajectory is stored in full, so the step count bounds memory as well
/// as work.
pub const MAX_STEPS: usize = 1_000_000;

// =================================================================================================
// Remainder policy
// =================================================================================================

/// What to do with the part of the interval left over when the step size
/// does not divide it
///
/// ```text
/// start                                end
///   |----h----|----h----|----h----|--r--|
///                                 ^ Truncate stops here
///                                       ^ FinalPartialStep stops here
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Remainder {
    /// Take `floor((end - start) / h)` full steps and stop
    #[default]
    Truncate,

    /// Take the full steps, then one shorter step of length `r`
    FinalPartialStep,
}

// =================================================================================================
// Central Solver Type Enumeration
// =================================================================================================

/// Type of march along the integration axis
///
/// # Examples
///
/// ```rust
/// use oxy_rs::solver::{SolverType, Remainder};
///
/// // Fixed step size, step count from floor division
/// let march = SolverType::AxialMarch {
///     start: 0.0,
///     end: 3.5,
///     step_size: 0.005,
///     remainder: Remainder::Truncate,
/// };
/// assert_eq!(march.discretization().unwrap().full_steps, 700);
///
/// // Fixed step count
/// let steps = SolverType::FixedSteps { start: 0.0, end: 1.0, steps: 10 };
/// assert_eq!(steps.discretization().unwrap().step_size, 0.1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum SolverType {
    /// March with a fixed step size
    ///
    /// # Parameters
    /// - `start`, `end`: Integration interval
    /// - `step_size`: Step length h
    /// - `remainder`: Handling of `(end - start) mod h`
    AxialMarch {
        start: f64,
        end: f64,
        step_size: f64,
        remainder: Remainder,
    },

    /// March with a fixed number of equal steps
    ///
    /// # Parameters
    /// - `start`, `end`: Integration interval
    /// - `steps`: Number of steps
    FixedSteps {
        start: f64,
        end: f64,
        steps: usize,
    },
}

/// Step layout produced from a [`SolverType`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretization {
    /// First abscissa
    pub start: f64,
    /// Length of the full steps
    pub step_size: f64,
    /// Number of full steps
    pub full_steps: usize,
    /// Length of the trailing partial step, if any
    pub final_step: Option<f64>,
}

impl Discretization {
    /// Total number of steps taken
    pub fn steps(&self) -> usize {
        self.full_steps.saturating_add(usize::from(self.final_step.is_some()))
    }

    /// Abscissa at the start of step `index`
    ///
    /// Computed from the index so that rounding does not accumulate.
    pub fn position(&self, index: usize) -> f64 {
        self.start + (index as f64) * self.step_size
    }

    /// Abscissa where the march ends
    pub fn end(&self) -> f64 {
        self.position(self.full_steps) + self.final_step.unwrap_or(0.0)
    }

    /// Length of step `index`
    pub fn step_length(&self, index: usize) -> f64 {
        match self.final_step {
            Some(last) if index == self.full_steps => last,
            _ => self.step_size,
        }
    }
}

impl SolverType {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            SolverType::AxialMarch { .. } => "AxialMarch",
            SolverType::FixedSteps { .. } => "FixedSteps",
        }
    }

    /// Validate that parameters are meaningful
    pub fn validate(&self) -> Result<(), String> {
        let (start, end) = match self {
            SolverType::AxialMarch { start, end, step_size, .. } => {
                if !(step_size.is_finite() && *step_size > 0.0) {
                    return Err(format!("Step size must be positive, got {}", step_size));
                }
                (*start, *end)
            }
            SolverType::FixedSteps { start, end, steps } => {
                if *steps > MAX_STEPS {
                    return Err(format!("{} steps exceed the limit of {}", steps, MAX_STEPS));
                }
                (*start, *end)
            }
        };

        if !(start.is_finite() && end.is_finite()) {
            return Err(format!("Interval bounds must be finite, got [{}, {}]", start, end));
        }
        if end < start {
            return Err(format!("Interval end {} lies before start {}", end, start));
        }
        Ok(())
    }

    /// Lay out the steps
    ///
    /// `AxialMarch` uses `floor((end - start) / h)` full steps; the leftover
    /// is dropped or taken as a final step according to [`Remainder`].
    /// `FixedSteps` with zero steps performs no step.
    pub fn discretization(&self) -> Result<Discretization, String> {
        self.validate()?;

        match *self {
            SolverType::AxialMarch { start, end, step_size, remainder } => {
                let ratio = ((end - start) / step_size).floor();
                if !(ratio.is_finite() && ratio <= MAX_STEPS as f64) {
                    return Err(format!(
                        "Step {} on [{}, {}] needs {} steps, more than the limit of {}",
                        step_size, start, end, ratio, MAX_STEPS
                    ));
                }

                let full_steps = ratio as usize;
                let leftover = end - (start + full_steps as f64 * step_size);

                // Leftovers below rounding noise are not a real partial step
                let significant = leftover > step_size * 1e-9;

                let final_step = match remainder {
                    Remainder::FinalPartialStep if significant => Some(leftover),
                    _ => None,
                };

                if significant && remainder == Remainder::Truncate {
                    log::warn!(
                        "Step {} does not divide [{}, {}]; march stops {} short of the end",
                        step_size, start, end, leftover
                    );
                }

                Ok(Discretization { start, step_size, full_steps, final_step })
            }
            SolverType::FixedSteps { start, end, steps } => {
                let step_size = if steps == 0 { 0.0 } else { (end - start) / steps as f64 };
                Ok(Discretization { start, step_size, full_steps: steps, final_step: None })
            }
        }
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration for numerical solver
///
/// # Examples
///
/// ```rust
/// use oxy_rs::solver::{SolverConfiguration, Remainder};
///
/// let config = SolverConfiguration::axial_march(0.0, 3.5, 0.005);
/// assert!(config.validate().is_ok());
///
/// let closed = SolverConfiguration::axial_march(0.0, 1.2, 0.007)
///     .with_remainder(Remainder::FinalPartialStep);
/// assert_eq!(closed.discretization().unwrap().end(), 1.2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Type of march and its parameters
    pub solver_type: SolverType,
}

impl SolverConfiguration {
    /// Create a new configuration with a given solver type
    pub fn new(solver_type: SolverType) -> Self {
        Self { solver_type }
    }

    /// Fixed step size march, truncating any remainder
    pub fn axial_march(start: f64, end: f64, step_size: f64) -> Self {
        Self::new(SolverType::AxialMarch {
            start,
            end,
            step_size,
            remainder: Remainder::Truncate,
        })
    }

    /// Fixed step count march
    pub fn fixed_steps(start: f64, end: f64, steps: usize) -> Self {
        Self::new(SolverType::FixedSteps { start, end, steps })
    }

    /// Builder pattern: set the remainder policy (axial march only)
    pub fn with_remainder(mut self, policy: Remainder) -> Self {
        if let SolverType::AxialMarch { remainder, .. } = &mut self.solver_type {
            *remainder = policy;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.solver_type.validate()
    }

    /// Step layout for this configuration
    pub fn discretization(&self) -> Result<Discretization, String> {
        self.solver_type.discretization()
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Result of a march
///
/// `positions[i]` is the abscissa of `state_trajectory[i]`; index 0 is the
/// initial condition.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Abscissae of the stored states
    pub positions: Vec<f64>,

    /// State at every position
    pub state_trajectory: Vec<PhysicalState>,

    /// Last state of the march
    pub final_state: PhysicalState,

    /// Free-form solver information
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Create a result
    pub fn new(
        positions: Vec<f64>,
        state_trajectory: Vec<PhysicalState>,
        final_state: PhysicalState,
    ) -> Self {
        Self {
            positions,
            state_trajectory,
            final_state,
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Get a metadata entry
    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Number of stored states
    pub fn len(&self) -> usize {
        self.state_trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state_trajectory.is_empty()
    }

    /// Number of steps taken
    pub fn steps(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Final abscissa
    pub fn final_position(&self) -> Option<f64> {
        self.positions.last().copied()
    }

    /// Final value of a scalar quantity
    pub fn final_scalar(&self, quantity: PhysicalQuantity) -> Option<f64> {
        self.final_state.scalar(quantity)
    }

    /// Profile of a scalar quantity along the march
    pub fn scalar_profile(&self, quantity: PhysicalQuantity) -> Vec<f64> {
        self.state_trajectory
            .iter()
            .filter_map(|state| state.scalar(quantity))
            .collect()
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Trait for numerical solvers
///
/// A solver applies one numerical method to the equations of the scenario's
/// model over the interval given by the configuration.
pub trait Solver {
    /// Run the march
    ///
    /// # Errors
    ///
    /// - Invalid configuration or scenario
    /// - Non-finite value in the state after a step
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, String>;

    /// Display name of the method
    fn name(&self) -> &'static str;
}

// =================================================================================================
// Tests
// =================================================================================================
