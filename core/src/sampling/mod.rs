//! Sampling

mod discrete_distribution;

// Re-export
pub use discrete_distribution::*;
