//! Oxygenator models
//!
//! [`OxygenatorModel`] implements the [`PhysicalModel`](crate::physics::PhysicalModel)
//! trait: the solver calls `compute_physics` at each axial step, the model
//! returns dP/dx. The transfer calculator drives one march per operating point.
//!
//! # Contents
//!
//! ## [`device`]: fiber bundle geometry and correlation coefficients
//!
//! Plain values plus the built-in device presets (SMO, Univox, implantable lung).
//!
//! ## [`OxygenatorModel`]: dP/dx along the bundle
//!
//! Built once per calculation from geometry, correlation, blood and flow.
//!
//! ## [`TransferCalculator`] / [`compute_transfer`]: outlet saturation and VO2
//!
//! Runs the RK4 march from the inlet to the bundle length.
//! [`TransferCalculator::profile`] keeps the pressure and saturation at every
//! station as an [`AxialProfile`].
//!
//! ## [`FlowSweep`]: grids of operating points
//!
//! Evaluates many calculations, in parallel with the `parallel` feature.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod device;
pub mod oxygenator;
pub mod transfer;
pub mod sweep;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use device::{CorrelationCoefficients, DeviceGeometry, DevicePreset};
pub use oxygenator::OxygenatorModel;
pub use transfer::{
    compute_transfer, AxialProfile, TransferCalculator, TransferResult, DEFAULT_STEP_SIZE,
};
pub use sweep::{FlowSweep, SweepPoint};
