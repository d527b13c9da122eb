//! Data sources other than user-supplied files: synthetic samples for demos and tests.

pub mod sample;

pub use sample::*;
