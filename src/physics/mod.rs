//! Physical models
//!
//! This module provides the model-side API and the blood oxygen physics.
//!
//! # Core Concepts
//!
//! - **Physical Model**: Computes `dy/dx` at a given state
//! - **Physical State**: Container for the physical quantities (partial pressure, ...)
//! - **Physical Quantity**: Type-safe identifier for physical variables
//!
//! # Architecture
//!
//! Physical models are **separate from numerical solvers**:
//! - The model provides the **equations** (physics)
//! - The solver provides the **method** to solve them (numerics)
//!
//! # Blood physics
//!
//! - [`blood`]: solubility and diffusivity from hematocrit and temperature
//! - [`dissociation`]: Hill oxyhemoglobin dissociation curve
//! - [`sink`]: hemoglobin sink term λ(P)
//!
//! # Example
//!
//! ```rust
//! use oxy_rs::physics::{BloodProperties, BloodState, DissociationCurve};
//!
//! let blood = BloodState::new(10.7, 0.37, 37.0);
//! let properties = BloodProperties::derive(&blood);
//! assert!(properties.solubility > 0.0);
//!
//! let curve = DissociationCurve::default();
//! assert!((curve.saturation(curve.p50) - 0.5).abs() < 1e-12);
//! ```
//!
//! # Implementing a New Physical Model
//!
//! ```rust
//! use oxy_rs::physics::{PhysicalModel, PhysicalQuantity, PhysicalState};
//!
//! /// dP/dx = -k·P
//! struct Decay {
//!     k: f64,
//! }
//!
//! impl PhysicalModel for Decay {
//!     fn points(&self) -> usize {
//!         1
//!     }
//!
//!     fn compute_physics(&self, state: &PhysicalState) -> PhysicalState {
//!         let p = state.scalar(PhysicalQuantity::PartialPressure).unwrap_or(f64::NAN);
//!         PhysicalState::scalar_state(PhysicalQuantity::PartialPressure, -self.k * p)
//!     }
//!
//!     fn setup_initial_state(&self) -> PhysicalState {
//!         PhysicalState::scalar_state(PhysicalQuantity::PartialPressure, 100.0)
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Decay"
//!     }
//! }
//! ```

// module declaration
pub mod traits;
pub mod data;
pub mod blood;
pub mod dissociation;
pub mod sink;

// re-export commonly used types for convenience
pub use data::PhysicalData;
pub use traits::{
    PhysicalModel,
    PhysicalQuantity,
    PhysicalState,
    POSITION_KEY,
};
pub use blood::{BloodProperties, BloodState};
pub use dissociation::{hill, DissociationCurve};
pub use sink::{SinkTerm, SlopeMethod};
