//! Parameter Set Items

use std::fmt;

/// Stores a parameter set item consisting of a list of values of type `T`.
#[derive(Clone, Default, Debug)]
pub struct ParamSetItem<T: fmt::Display> {
    /// The values.
    pub values: Vec<T>,
}

impl<T: fmt::Display> ParamSetItem<T> {
    /// Create new `ParamSetItem<T>`.
    ///
    /// * `values` - The values.
    pub fn new(values: Vec<T>) -> Self {
        Self { values }
    }
}
