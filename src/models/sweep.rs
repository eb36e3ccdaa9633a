//! Operating-point sweeps over blood flow and inlet pressure
//!
//! Every (inlet pressure, flow) pair is an independent transfer calculation.
//! With the `parallel` feature the pairs are evaluated on the rayon thread
//! pool; the output order does not depend on it.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::models::device::{lpm_to_cm3_per_s, DevicePreset};
use crate::models::transfer::TransferCalculator;
use crate::physics::blood::BloodState;

/// One evaluated operating point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    /// Blood flow [L/min]
    pub flow_lpm: f64,
    /// Inlet partial pressure [mmHg]
    pub inlet_pressure: f64,
    /// Outlet saturation [-]
    pub outlet_saturation: f64,
    /// Oxygen transfer rate [mL O2/min]
    pub transfer_rate: f64,
}

/// Grid of flows and inlet pressures on one device
///
/// # Example
///
/// ```rust
/// use oxy_rs::models::device::DevicePreset;
/// use oxy_rs::models::FlowSweep;
/// use oxy_rs::physics::BloodState;
///
/// let sweep = FlowSweep::new(DevicePreset::SMO, BloodState::new(13.0, 0.37, 37.0))
///     .with_flows_lpm(vec![1.0, 2.0])
///     .with_inlet_pressures(vec![25.0, 50.0]);
///
/// let points = sweep.run().unwrap();
/// assert_eq!(points.len(), 4);
/// // Row-major: inlet pressure first, then flow
/// assert_eq!((points[1].inlet_pressure, points[1].flow_lpm), (25.0, 2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSweep {
    pub device: DevicePreset,
    pub blood: BloodState,
    /// Blood flows [L/min]
    pub flows_lpm: Vec<f64>,
    /// Inlet partial pressures [mmHg]
    pub inlet_pressures: Vec<f64>,
    pub calculator: TransferCalculator,
}

impl FlowSweep {
    /// Sweep of 1 to 6 L/min at an inlet pressure of 35 mmHg
    pub fn new(device: DevicePreset, blood: BloodState) -> Self {
        Self {
            device,
            blood,
            flows_lpm: (1..=6).map(f64::from).collect(),
            inlet_pressures: vec![35.0],
            calculator: TransferCalculator::default(),
        }
    }

    pub fn with_flows_lpm(mut self, flows_lpm: Vec<f64>) -> Self {
        self.flows_lpm = flows_lpm;
        self
    }

    pub fn with_inlet_pressures(mut self, inlet_pressures: Vec<f64>) -> Self {
        self.inlet_pressures = inlet_pressures;
        self
    }

    pub fn with_calculator(mut self, calculator: TransferCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Number of operating points
    pub fn len(&self) -> usize {
        self.flows_lpm.len() * self.inlet_pressures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// (inlet pressure, flow) pairs in row-major order
    fn operating_points(&self) -> Vec<(f64, f64)> {
        self.inlet_pressures
            .iter()
            .flat_map(|&pressure| self.flows_lpm.iter().map(move |&flow| (pressure, flow)))
            .collect()
    }

    fn evaluate(&self, inlet_pressure: f64, flow_lpm: f64) -> Result<SweepPoint, String> {
        let result = self
            .calculator
            .compute_preset(&self.device, inlet_pressure, lpm_to_cm3_per_s(flow_lpm), &self.blood)
            .map_err(|e| {
                format!("{} at {} mmHg, {} L/min: {}", self.device.name, inlet_pressure, flow_lpm, e)
            })?;

        Ok(SweepPoint {
            flow_lpm,
            inlet_pressure,
            outlet_saturation: result.outlet_saturation,
            transfer_rate: result.transfer_rate,
        })
    }

    /// Evaluate every operating point
    ///
    /// # Errors
    ///
    /// The first failing point (in row-major order) aborts the sweep.
    pub fn run(&self) -> Result<Vec<SweepPoint>, String> {
        let points = self.operating_points();

        log::debug!("Sweeping {} operating points on {}", points.len(), self.device.name);

        #[cfg(feature = "parallel")]
        let results: Vec<Result<SweepPoint, String>> = points
            .par_iter()
            .map(|&(pressure, flow)| self.evaluate(pressure, flow))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results: Vec<Result<SweepPoint, String>> = points
            .iter()
            .map(|&(pressure, flow)| self.evaluate(pressure, flow))
            .collect();

        // Indexed collection keeps row-major order, so the first error is deterministic
        results.into_iter().collect()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
