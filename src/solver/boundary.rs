//! Domain boundaries of the march
//!
//! # Design
//!
//! Boundaries are stored as named dimensions, each holding one or more
//! boundary states. One dimension may be flagged as the march axis: its
//! first state is the initial condition of the integration (the inlet of the
//! fiber bundle for the oxygenator).
//!
//! ```text
//! x = 0 (inlet)                          x = L (outlet)
//!    |=====================================|
//!    ^ march axis "x", states = [inlet]
//! ```

use crate::physics::PhysicalState;

// =================================================================================================
// Domain Boundaries
// =================================================================================================

/// Domain boundaries
///
/// # Examples
///
/// ```rust
/// use oxy_rs::physics::{PhysicalQuantity, PhysicalState};
/// use oxy_rs::solver::DomainBoundaries;
///
/// let inlet = PhysicalState::scalar_state(PhysicalQuantity::PartialPressure, 35.4);
/// let boundaries = DomainBoundaries::axial(inlet);
///
/// assert_eq!(boundaries.ndim(), 1);
/// assert!(boundaries.initial_condition().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DomainBoundaries {
    /// Boundaries for each dimension
    pub dimensions: Vec<DimensionBoundary>,

    /// Index of the dimension the solver marches along
    pub march_axis: Option<usize>,
}

impl DomainBoundaries {
    /// Create from dimensions and an optional march axis
    pub fn new(dimensions: Vec<DimensionBoundary>, march_axis: Option<usize>) -> Self {
        Self { dimensions, march_axis }
    }

    // ====================================== Factory methods ======================================

    /// Single axial dimension `"x"` whose first state is the inlet condition
    pub fn axial(inlet: PhysicalState) -> Self {
        Self::new(vec![DimensionBoundary::new("x", vec![inlet])], Some(0))
    }

    // ===================================== Query methods =========================================

    /// Number of dimensions
    pub fn ndim(&self) -> usize {
        self.dimensions.len()
    }

    /// Boundary of the march axis
    pub fn march_boundary(&self) -> Option<&DimensionBoundary> {
        self.march_axis.and_then(|index| self.dimensions.get(index))
    }

    /// Initial condition of the march (first state of the march axis)
    pub fn initial_condition(&self) -> Option<&PhysicalState> {
        self.march_boundary().and_then(DimensionBoundary::first)
    }

    /// Find a dimension by name
    pub fn get_boundary(&self, name: &str) -> Option<&DimensionBoundary> {
        self.dimensions.iter().find(|boundary| boundary.name == name)
    }

    /// Validate the domain
    pub fn validate(&self) -> Result<(), String> {
        if self.dimensions.is_empty() {
            return Err("Dimension boundaries cannot be empty.".into());
        }

        for dimension in &self.dimensions {
            dimension.validate()?;
        }

        let names: Vec<&str> = self.dimensions.iter().map(|d| d.name.as_str()).collect();
        let unicity: std::collections::HashSet<&str> = names.iter().copied().collect();

        if unicity.len() != names.len() {
            return Err("It is impossible to store two dimensions with the same name.".into());
        }

        if let Some(index) = self.march_axis
            && index >= self.dimensions.len()
        {
            return Err(format!(
                "March axis {} is out of range ({} dimensions)",
                index,
                self.dimensions.len()
            ));
        }

        Ok(())
    }
}

// =================================================================================================
// Dimension Boundary
// =================================================================================================

/// Boundary states along one dimension
#[derive(Debug, Clone)]
pub struct DimensionBoundary {
    /// Dimension name (e.g. "x")
    pub name: String,

    /// Boundary states, ordered from the lower bound
    pub states: Vec<PhysicalState>,
}

impl DimensionBoundary {
    pub fn new(name: impl Into<String>, states: Vec<PhysicalState>) -> Self {
        Self { name: name.into(), states }
    }

    pub fn first(&self) -> Option<&PhysicalState> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&PhysicalState> {
        self.states.last()
    }

    pub fn size(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err(format!(
                "Dimensions '{}' must have at least one boundary state",
                self.name)
            );
        }

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
