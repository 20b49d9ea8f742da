//! Core

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
pub mod error;
pub mod lanes;
pub mod parallel;
pub mod paramset;
pub mod pbrt;
pub mod rng;
pub mod sampling;
pub mod spectrum;
