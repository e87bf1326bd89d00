//! Evolutionary search for test inputs that maximise a mutation kill score.

pub mod baseline;
pub mod config;
pub mod engines;
pub mod error;
pub mod problems;
pub mod types;

pub use error::{EvobugError, Result};
