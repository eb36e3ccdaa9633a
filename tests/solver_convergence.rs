//! Convergence tests for numerical solvers
//!
//! These tests verify that solvers exhibit the expected
//! convergence rates when refining the step.

use oxy_rs::solver::{EulerSolver, RK4Solver};
use oxy_rs::solver::{Solver, SolverConfiguration};

mod common;
use common::{create_simple_scenario, first_pressure, ExponentialDecay, LinearUptake};

fn decay_errors(solver: &dyn Solver, length: f64, steps_list: &[usize]) -> Vec<f64> {
    let decay_rate = 0.3;
    let exact = (-decay_rate * length).exp();

    steps_list
        .iter()
        .map(|&steps| {
            let scenario = create_simple_scenario(Box::new(ExponentialDecay::new(5, decay_rate)));
            let config = SolverConfiguration::fixed_steps(0.0, length, steps);
            let result = solver.solve(&scenario, &config).unwrap();

            (first_pressure(&result.final_state) - exact).abs()
        })
        .collect()
}

#[test]
fn test_euler_first_order_convergence() {
    // error ~ O(h): halving h halves the error
    let errors = decay_errors(&EulerSolver::new(), 10.0, &[100, 200, 400, 800]);

    for i in 0..errors.len() - 1 {
        let ratio = errors[i] / errors[i + 1];
        println!("Euler convergence ratio {}->{}: {}", i, i + 1, ratio);

        assert!(ratio > 1.8 && ratio < 2.2, "Convergence ratio {} not first-order", ratio);
    }
}

#[test]
fn test_rk4_fourth_order_convergence() {
    // error ~ O(h⁴): halving h divides the error by 16
    let errors = decay_errors(&RK4Solver::new(), 5.0, &[10, 20, 40, 80]);

    for i in 0..errors.len() - 1 {
        let ratio = errors[i] / errors[i + 1];
        println!("RK4 convergence ratio {}->{}: {}", i, i + 1, ratio);

        assert!(ratio > 12.0 && ratio < 20.0, "Convergence ratio {} not fourth-order", ratio);
    }
}

#[test]
fn test_rk4_converges_on_uptake_toward_gas_pressure() {
    let model = LinearUptake::new(0.8, 722.0, 35.4);
    let exact = model.analytical_solution(3.5);
    let rk4 = RK4Solver::new();

    let mut previous_error = f64::INFINITY;
    for step_size in [0.05, 0.025, 0.0125] {
        let scenario = create_simple_scenario(Box::new(LinearUptake::new(0.8, 722.0, 35.4)));
        let config = SolverConfiguration::axial_march(0.0, 3.5, step_size);
        let result = rk4.solve(&scenario, &config).unwrap();

        let error = (first_pressure(&result.final_state) - exact).abs();
        assert!(error < previous_error);
        previous_error = error;
    }

    assert!(previous_error < 1e-6);
}
