//! Physical models traits and types
//!
//! This module defines the core API for physical models:
//! - `PhysicalModel`: trait for all physical models
//! - `PhysicalState`: flexible state container
//! - `PhysicalQuantity`: type-safe quantity identifiers

use crate::physics::PhysicalData;
use std::collections::HashMap;
use std::fmt;

// =================================================================================================
// Physical quantities (Type-safe Identifiers)
// =================================================================================================

/// Known physical quantities (type-safe enum)
///
/// # Example
/// ```
/// use oxy_rs::physics::{PhysicalQuantity, PhysicalState, PhysicalData};
///
/// let mut state = PhysicalState::empty();
/// state.set(PhysicalQuantity::Custom("CO2 pressure"), PhysicalData::Scalar(45.0));
/// assert_eq!(state.scalar(PhysicalQuantity::Custom("CO2 pressure")), Some(45.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalQuantity {
    /// Blood oxygen partial pressure (mmHg)
    PartialPressure,

    /// Fractional hemoglobin oxygen saturation (-)
    Saturation,

    /// Custom quantity (for use extension)
    Custom(&'static str),
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalQuantity::PartialPressure => write!(f, "partial pressure"),
            PhysicalQuantity::Saturation => write!(f, "saturation"),
            PhysicalQuantity::Custom(name) => write!(f, "{}", name),
        }
    }
}

// =================================================================================================
// Physical State (Flexible State Container)
// =================================================================================================

/// Metadata key holding the current axial position [cm]
pub const POSITION_KEY: &str = "position";

/// Physical state of the system
///
/// Contains all physical quantities at a given position along the march axis,
/// plus scalar metadata. Solvers write the current axial position into the
/// `"position"` metadata entry before each model evaluation.
#[derive(Debug, Clone)]
pub struct PhysicalState {
    /// Physical quantities stored in a dictionary
    quantities: HashMap<PhysicalQuantity, PhysicalData>,

    /// Scalar metadata (optional, e.g. position)
    metadata: HashMap<String, f64>,
}

impl PhysicalState {
    /// Create a new state with primary quantity
    pub fn new(quantity: PhysicalQuantity, value: PhysicalData) -> Self {
        let mut quantities = HashMap::new();
        quantities.insert(quantity, value);

        Self {
            quantities,
            metadata: HashMap::new(),
        }
    }

    /// Create a state holding a single scalar quantity
    pub fn scalar_state(quantity: PhysicalQuantity, value: f64) -> Self {
        Self::new(quantity, PhysicalData::Scalar(value))
    }

    /// Create an empty state
    pub fn empty() -> Self {
        Self {
            quantities: HashMap::new(),
            metadata: HashMap::new(),
        }
    }

    /// Get a quantity by type
    pub fn get(&self, quantity: PhysicalQuantity) -> Option<&PhysicalData> {
        self.quantities.get(&quantity)
    }

    /// Get mutable reference to a quantity
    pub fn get_mut(&mut self, quantity: PhysicalQuantity) -> Option<&mut PhysicalData> {
        self.quantities.get_mut(&quantity)
    }

    /// Get a scalar quantity, `None` if absent or not a scalar
    pub fn scalar(&self, quantity: PhysicalQuantity) -> Option<f64> {
        self.get(quantity).and_then(PhysicalData::try_as_scalar)
    }

    /// Set a quantity
    pub fn set(&mut self, quantity: PhysicalQuantity, value: PhysicalData) {
        self.quantities.insert(quantity, value);
    }

    /// List of available physical state quantities
    pub fn available_quantities(&self) -> Vec<PhysicalQuantity> {
        self.quantities.keys().cloned().collect()
    }

    /// Iterate over (quantity, data) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&PhysicalQuantity, &PhysicalData)> {
        self.quantities.iter()
    }

    /// Get a metadata
    pub fn get_metadata(&self, key: &str) -> Option<f64> {
        self.metadata.get(key).copied()
    }

    /// Set a metadata
    pub fn set_metadata(&mut self, key: impl Into<String>, value: f64) {
        self.metadata.insert(key.into(), value);
    }
}

// Operator overloading for numerical operations

impl std::ops::Add for PhysicalState {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        for (quantity, value) in rhs.quantities {
            match self.quantities.remove(&quantity) {
                Some(existing) => {
                    self.quantities.insert(quantity, existing + value);
                }
                None => {
                    self.quantities.insert(quantity, value);
                }
            }
        }
        self
    }
}

impl std::ops::Mul<f64> for PhysicalState {
    type Output = Self;

    fn mul(mut self, scalar: f64) -> Self::Output {
        for data in self.quantities.values_mut() {
            data.apply(|x| x * scalar);
        }
        self
    }
}

// =================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for physical models
///
/// # Responsibility
/// Computes the right-hand side of `dy/dx = f(x, y)` at a given state.
/// Does NOT integrate it (that's the Solver's job).
///
/// The model provides the "physics" (equations), the Solver provides
/// the "numerics" (method to solve them).
pub trait PhysicalModel: Send + Sync {

    /// Number of independent values carried by the state
    fn points(&self) -> usize;

    /// Computes the derivative at a given state
    ///
    /// # Arguments
    /// * `state` - Current physical state; the solver stores the current
    ///   axial position in the `"position"` metadata entry.
    ///
    /// # Returns
    /// A state holding `dy/dx` for each integrated quantity.
    fn compute_physics(&self, state: &PhysicalState) -> PhysicalState;

    /// Creates the state at the start of the march (inlet conditions)
    fn setup_initial_state(&self) -> PhysicalState;

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }
}
