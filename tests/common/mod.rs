//! Common utilities for integration tests
#![allow(dead_code)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
#[allow(unused_imports)]
pub use mock_models::{ConstantGrowth, ExponentialDecay, LinearUptake};
#[allow(unused_imports)]
pub use test_helpers::{
    create_simple_scenario,
    first_pressure,
    lung,
    lung_experiments,
    relative_error,
};
