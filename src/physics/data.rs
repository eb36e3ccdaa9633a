//! Physical data types
//!
//! This module provides a container for physical quantities that can be
//! scalars or vectors depending on the problem's dimensionality.
//!
//! The oxygenator model marches a single scalar (the blood oxygen partial
//! pressure) along the fiber bundle. Vectors hold the axial profiles built
//! from the march, and vector-valued models integrate the same way.

use nalgebra::DVector;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of vector elements above which [`PhysicalData::apply`] hands the
/// work to rayon (only with the `parallel` feature).
const PARALLEL_THRESHOLD: usize = 1000;

/// Physical data container
///
/// # Storage Types
///
/// - **Scalar**: Single uniform value (0D)
/// - **Vector**: 1D array (e.g. one value per fiber layer)
///
/// # Examples
///
/// ```rust
/// use oxy_rs::physics::PhysicalData;
///
/// let pressure = PhysicalData::from_scalar(35.4);
/// assert_eq!(pressure.as_scalar(), 35.4);
///
/// let profile = PhysicalData::uniform_vector(10, 40.0);
/// assert_eq!(profile.len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicalData {
    /// Scalar value (0D)
    ///
    /// Use for: lumped quantities (outlet pressure, saturation)
    Scalar(f64),

    /// Vector (1D)
    ///
    /// Use for: profiles or several independent channels
    Vector(DVector<f64>),
}

impl PhysicalData {

    // ======================================= constructors =======================================

    /// Create from scalar
    pub fn from_scalar(value: f64) -> Self {
        Self::Scalar(value)
    }

    /// Create from vector
    pub fn from_vec(vector: Vec<f64>) -> Self {
        Self::Vector(DVector::from_vec(vector))
    }

    /// Create from DVector
    pub fn from_vector(vector: DVector<f64>) -> Self {
        Self::Vector(vector)
    }

    /// Create uniform vector
    pub fn uniform_vector(size: usize, value: f64) -> Self {
        Self::Vector(DVector::from_element(size, value))
    }

    // ========================================== Queries ==========================================

    /// Check data is scalar
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Check data is a vector
    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_))
    }

    /// Get data dimension: 0 (scalar), 1 (vector)
    pub fn ndim(&self) -> usize {
        match self {
            PhysicalData::Scalar(_) => 0,
            PhysicalData::Vector(_) => 1,
        }
    }

    /// Get length
    pub fn len(&self) -> usize {
        match self {
            PhysicalData::Scalar(_) => 1,
            PhysicalData::Vector(v) => v.len(),
        }
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when at least one element is NaN
    pub fn has_nan(&self) -> bool {
        match self {
            PhysicalData::Scalar(x) => x.is_nan(),
            PhysicalData::Vector(v) => v.iter().any(|x| x.is_nan()),
        }
    }

    /// True when at least one element is +/- infinity
    pub fn has_infinite(&self) -> bool {
        match self {
            PhysicalData::Scalar(x) => x.is_infinite(),
            PhysicalData::Vector(v) => v.iter().any(|x| x.is_infinite()),
        }
    }

    // ======================================== Extractions ========================================

    /// Extract as a scalar (panic if not)
    pub fn as_scalar(&self) -> f64 {
        match self {
            PhysicalData::Scalar(value) => *value,
            _ => panic!("Not a scalar value"),
        }
    }

    /// Try to extract as a scalar
    pub fn try_as_scalar(&self) -> Option<f64> {
        match self {
            PhysicalData::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Extract as a DVector (panic if not)
    pub fn as_vector(&self) -> &DVector<f64> {
        match self {
            PhysicalData::Vector(value) => value,
            _ => panic!("Not a vector value"),
        }
    }

    /// Try to extract as a DVector
    pub fn try_as_vector(&self) -> Option<&DVector<f64>> {
        match self {
            PhysicalData::Vector(value) => Some(value),
            _ => None,
        }
    }

    // ====================================== Apply functions ======================================

    /// Apply a function f to every element
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        match self {
            PhysicalData::Scalar(value) => *value = f(*value),

            PhysicalData::Vector(value) => {
                if value.len() >= PARALLEL_THRESHOLD {
                    #[cfg(feature = "parallel")]
                    value.as_mut_slice().par_iter_mut().for_each(|x| *x = f(*x));
                    #[cfg(not(feature = "parallel"))]
                    value.iter_mut().for_each(|x| *x = f(*x));
                } else {
                    value.iter_mut().for_each(|x| *x = f(*x));
                }
            }
        }
    }
}

// ================================== Simple arithmetic functions ==================================

impl std::ops::Add for PhysicalData {
    type Output = PhysicalData;
    fn add(self, rhs: Self) -> Self::Output {
        use PhysicalData::*;
        match (self, rhs) {
            (Scalar(x), Scalar(y)) => Scalar(x + y),
            (Scalar(x), Vector(y)) |
            (Vector(y), Scalar(x)) => Vector(y.map(|e| e + x)),

            (Vector(x), Vector(y)) => {
                assert_eq!(x.len(), y.len(), "Vector length must match");
                Vector(x + y)
            }
        }
    }
}

impl std::ops::Mul<f64> for PhysicalData {
    type Output = PhysicalData;
    fn mul(self, scalar: f64) -> Self::Output {
        match self {
            PhysicalData::Scalar(x) => PhysicalData::Scalar(x * scalar),
            PhysicalData::Vector(x) => PhysicalData::Vector(x * scalar),
        }
    }
}

impl std::ops::Mul<PhysicalData> for f64 {
    type Output = PhysicalData;
    fn mul(self, rhs: PhysicalData) -> Self::Output {
        rhs * self
    }
}

// ======================== Display ============================

impl fmt::Display for PhysicalData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalData::Scalar(value) => write!(f, "Scalar ({})", value),
            PhysicalData::Vector(value) => write!(f, "Vector [{}]", value.len()),
        }
    }
}

// ==================== Tests ====================
