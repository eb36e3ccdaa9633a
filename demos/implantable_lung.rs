//! Example: Implantable lung bench experiments and an SMO flow sweep
//!
//! ## Structure
//!
//! **Phase 1: Bench experiments** (implantable lung, 5 L/min, 37 °C)
//! - Four venous inlet conditions, RK4 vs Euler outlet pressure
//!
//! **Phase 2: Flow sweep** (SMO, Hgb 13 g/dL, Hct 0.37)
//! - Inlet pressures 25, 33, 50 mmHg × flows 1..6 L/min
//!
//! **Parameters**:
//! - Sweep gas 95 % O2 at 760 mmHg (P_g = 722 mmHg)
//! - Bovine dissociation curve at pH 7.4, step 0.005 cm

use oxy_rs::{
    models::device::lpm_to_cm3_per_s,
    models::{DevicePreset, FlowSweep, OxygenatorModel, TransferCalculator},
    physics::{BloodState, PhysicalData, PhysicalQuantity},
    solver::{EulerSolver, RK4Solver, Scenario, Solver, SolverConfiguration},
};

use std::time::Instant;

// =============================================================================
// Helpers
// =============================================================================

/// Prints a titled section banner to stdout.
fn print_section(title: &str) {
    println!("\n═══════════════════════════════════════════════════════");
    println!("  {title}");
    println!("═══════════════════════════════════════════════════════\n");
}

/// Outlet pressure of one solver run on the implantable lung.
fn outlet_pressure(
    solver: &dyn Solver,
    blood: BloodState,
    inlet_pressure: f64,
    flow: f64,
) -> Result<f64, String> {
    let preset = DevicePreset::IMPLANTABLE_LUNG;
    let model = OxygenatorModel::new(preset.geometry, preset.coefficients, blood, flow, inlet_pressure);
    let scenario = Scenario::from_model(Box::new(model));
    let config = SolverConfiguration::axial_march(0.0, preset.geometry.length, 0.005);

    let result = solver.solve(&scenario, &config)?;

    match result.final_state.get(PhysicalQuantity::PartialPressure) {
        Some(PhysicalData::Scalar(p)) => Ok(*p),
        _ => Err("Partial pressure missing from the final state".to_string()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    print_section("Implantable Lung - Oxygen Transfer Study");

    // ====== Bench experiments: (Hgb [g/dL], Hct [-], P_in [mmHg]) ======

    let experiments = [
        ("Exp. 2", 10.7, 0.37, 35.4),
        ("Exp. 3", 11.0, 0.37, 35.4),
        ("Exp. 4", 8.0, 0.30, 32.5),
        ("Exp. 5", 8.2, 0.31, 29.8),
    ];

    let flow = lpm_to_cm3_per_s(5.0);
    let calculator = TransferCalculator::default();

    println!(
        "{:<8} {:>10} {:>12} {:>10} {:>14}",
        "Run", "P_in", "P_out", "S_out", "VO2 (mL/min)"
    );
    println!("{:-<58}", "");

    let current_time = Instant::now();

    for (name, hemoglobin, hematocrit, inlet_pressure) in experiments {
        let blood = BloodState::new(hemoglobin, hematocrit, 37.0);
        let result = calculator.compute_preset(&DevicePreset::IMPLANTABLE_LUNG, inlet_pressure, flow, &blood)?;

        println!(
            "{:<8} {:>10.1} {:>12.2} {:>10.4} {:>14.2}",
            name, inlet_pressure, result.outlet_pressure, result.outlet_saturation, result.transfer_rate
        );
    }

    println!("\n  {} runs in {:.3} ms", experiments.len(), current_time.elapsed().as_secs_f64() * 1e3);

    // =============================================================================================
    // Solver comparison
    // =============================================================================================

    print_section("Solver Comparison: Euler vs RK4 (P_out, mmHg)");

    let solvers: Vec<(&str, Box<dyn Solver>)> = vec![
        ("Euler", Box::new(EulerSolver::new())),
        ("Runge-Kutta", Box::new(RK4Solver::new())),
    ];

    println!("{:<8} {:>12} {:>12}", "Run", solvers[0].0, solvers[1].0);
    println!("{:-<34}", "");

    for (name, hemoglobin, hematocrit, inlet_pressure) in experiments {
        let blood = BloodState::new(hemoglobin, hematocrit, 37.0);
        let mut row = format!("{:<8}", name);

        for (_, solver) in &solvers {
            let p = outlet_pressure(solver.as_ref(), blood, inlet_pressure, flow)?;
            row.push_str(&format!(" {:>12.3}", p));
        }
        println!("{}", row);
    }

    // =============================================================================================
    // SMO sweep
    // =============================================================================================

    print_section("SMO Flow Sweep: VO2 (mL/min)");

    let sweep = FlowSweep::new(DevicePreset::SMO, BloodState::new(13.0, 0.37, 37.0))
        .with_inlet_pressures(vec![25.0, 33.0, 50.0]);
    let points = sweep.run()?;

    let mut header = format!("{:<12}", "P_in \\ Q");
    for flow_lpm in &sweep.flows_lpm {
        header.push_str(&format!(" {:>9.1}", flow_lpm));
    }
    println!("{}", header);
    println!("{:-<72}", "");

    for row in points.chunks(sweep.flows_lpm.len()) {
        let mut line = format!("{:<12.1}", row[0].inlet_pressure);
        for point in row {
            line.push_str(&format!(" {:>9.2}", point.transfer_rate));
        }
        println!("{}", line);
    }

    Ok(())
}
