//! Numerical methods for solving differential equations
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! - **[`RK4Solver`]**: Classical fourth-order Runge-Kutta
//!   - Order: Fourth-order O(h⁴)
//!   - Cost: 4 function evaluations per step
//!   - Use: transfer calculations
//!
//! - **[`EulerSolver`]**: Forward Euler method
//!   - Order: First-order O(h)
//!   - Cost: 1 function evaluation per step
//!   - Use: convergence cross-checks
//!
//! Each solver is stateless and can be reused for any number of scenarios.

pub mod euler;
mod rk4;

// Re-exports for convenience
pub use euler::EulerSolver;
pub use rk4::{integrate, RK4Solver};
