//! oxy-rs: Hollow-Fiber Oxygenator Transfer Model
//!
//! Oxygen transfer across a hollow-fiber membrane oxygenator, obtained by
//! integrating the rise of blood oxygen partial pressure along the fiber
//! bundle with a classical Runge-Kutta march.
//!
//! # Architecture
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical models define equations (what to solve)
//!    - Numerical solvers provide methods (how to solve)
//!
//! 2. **Pipeline**
//!    - Blood properties (solubility k, diffusivity D)
//!    - Hill dissociation curve and hemoglobin sink term
//!    - dP/dx from a Sherwood-number correlation
//!    - RK4 march from the inlet to the bundle length
//!    - Outlet saturation and oxygen transfer rate VO2
//!
//! # Quick Start
//!
//! ```rust
//! use oxy_rs::prelude::*;
//! use oxy_rs::models::device::lpm_to_cm3_per_s;
//!
//! # fn main() -> Result<(), String> {
//! let preset = DevicePreset::IMPLANTABLE_LUNG;
//! let blood = BloodState::new(10.7, 0.37, 37.0);
//!
//! let result = compute_transfer(
//!     35.4,                    // inlet pressure [mmHg]
//!     lpm_to_cm3_per_s(5.0),   // blood flow [cm³/s]
//!     &preset.geometry,
//!     &blood,
//!     &preset.coefficients,
//! )?;
//!
//! println!("S_out = {:.4}, VO2 = {:.1} mL/min", result.outlet_saturation, result.transfer_rate);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: model traits, blood properties, dissociation curve, sink term
//! - [`models`]: device geometry, oxygenator model, transfer calculator, sweeps
//! - [`solver`]: numerical solvers (RK4, Euler)
//!
//! # Features
//!
//! - `parallel`: evaluate [`models::FlowSweep`] points on the rayon thread pool

// Core modules
pub mod physics;

pub mod models;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use oxy_rs::prelude::*;
    //! ```
    pub use crate::physics::{BloodState,
                             DissociationCurve,
                             PhysicalData,
                             PhysicalQuantity,
                             PhysicalState,
                             PhysicalModel,
                             SlopeMethod};
    pub use crate::models::{compute_transfer,
                            AxialProfile,
                            DevicePreset,
                            FlowSweep,
                            OxygenatorModel,
                            TransferCalculator,
                            TransferResult};
    pub use crate::solver::{Solver,
                            SolverConfiguration,
                            SolverType,
                            Remainder,
                            Scenario,
                            SimulationResult,
                            EulerSolver,
                            RK4Solver};
}
