//! Shared utilities for AgriProof.

pub mod logging;

pub use logging::{init_logging, LogFormat};
