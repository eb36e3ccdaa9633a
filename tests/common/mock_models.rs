//! Mock physical models for testing
//!
//! These models have known analytical solutions, making them
//! ideal for validating numerical solver accuracy.

use oxy_rs::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};

// =================================================================================================
// Exponential Decay: dP/dx = -k*P
// =================================================================================================

/// Exponential decay model: dP/dx = -k*P
///
/// Analytical solution: P(x) = P₀ * exp(-k*x)
pub struct ExponentialDecay {
    pub points: usize,
    pub decay_rate: f64,
}

impl ExponentialDecay {
    pub fn new(points: usize, decay_rate: f64) -> Self {
        Self { points, decay_rate }
    }

    /// Analytical solution at position x
    pub fn analytical_solution(&self, x: f64, p0: f64) -> f64 {
        p0 * (-self.decay_rate * x).exp()
    }
}

impl PhysicalModel for ExponentialDecay {
    fn points(&self) -> usize {
        self.points
    }

    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
        let mut result = state.clone();

        if let Some(pressure) = result.get_mut(PhysicalQuantity::PartialPressure) {
            pressure.apply(|p| -self.decay_rate * p);
        }

        result
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(
            PhysicalQuantity::PartialPressure,
            PhysicalData::uniform_vector(self.points, 1.0),
        )
    }

    fn name(&self) -> &str {
        "Exponential Decay"
    }
}

// =================================================================================================
// Constant Growth: dP/dx = c
// =================================================================================================

/// Constant growth model: dP/dx = c
///
/// Analytical solution: P(x) = P₀ + c*x. Euler and RK4 are both exact.
pub struct ConstantGrowth {
    pub points: usize,
    pub growth_rate: f64,
}

impl ConstantGrowth {
    pub fn new(points: usize, growth_rate: f64) -> Self {
        Self { points, growth_rate }
    }

    pub fn analytical_solution(&self, x: f64, p0: f64) -> f64 {
        p0 + self.growth_rate * x
    }
}

impl PhysicalModel for ConstantGrowth {
    fn points(&self) -> usize {
        self.points
    }

    fn compute_physics(&self, _state: &PhysicalState) -> PhysicalState {
        PhysicalState::new(
            PhysicalQuantity::PartialPressure,
            PhysicalData::uniform_vector(self.points, self.growth_rate),
        )
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(
            PhysicalQuantity::PartialPressure,
            PhysicalData::uniform_vector(self.points, 0.0),
        )
    }

    fn name(&self) -> &str {
        "Constant Growth"
    }
}

// =================================================================================================
// Linear uptake: dP/dx = c*(P_g - P)
// =================================================================================================

/// Uptake toward a gas-side pressure without hemoglobin: dP/dx = c*(P_g - P)
///
/// Analytical solution: P(x) = P_g - (P_g - P₀) * exp(-c*x)
pub struct LinearUptake {
    pub rate: f64,
    pub gas_pressure: f64,
    pub inlet_pressure: f64,
}

impl LinearUptake {
    pub fn new(rate: f64, gas_pressure: f64, inlet_pressure: f64) -> Self {
        Self { rate, gas_pressure, inlet_pressure }
    }

    pub fn analytical_solution(&self, x: f64) -> f64 {
        self.gas_pressure - (self.gas_pressure - self.inlet_pressure) * (-self.rate * x).exp()
    }
}

impl PhysicalModel for LinearUptake {
    fn points(&self) -> usize {
        1
    }

    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
        let p = state
            .scalar(PhysicalQuantity::PartialPressure)
            .unwrap_or(f64::NAN);
        PhysicalState::scalar_state(
            PhysicalQuantity::PartialPressure,
            self.rate * (self.gas_pressure - p),
        )
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::scalar_state(PhysicalQuantity::PartialPressure, self.inlet_pressure)
    }

    fn name(&self) -> &str {
        "Linear Uptake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_decay_analytical() {
        let model = ExponentialDecay::new(1, 0.1);
        assert!((model.analytical_solution(0.0, 1.0) - 1.0).abs() < 1e-12);
        assert!((model.analytical_solution(10.0, 1.0) - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_linear_uptake_analytical() {
        let model = LinearUptake::new(0.5, 722.0, 40.0);
        assert_eq!(model.analytical_solution(0.0), 40.0);
        assert!(model.analytical_solution(100.0) > 721.99);
    }
}
