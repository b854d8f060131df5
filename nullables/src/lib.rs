//! Nullable infrastructure for deterministic testing.
//!
//! The engine's external collaborators (the block-height clock and the
//! token-transfer primitive) sit behind plain values and traits. This crate
//! provides test-friendly stand-ins that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Can be told to fail on demand
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod transfer;

pub use clock::NullClock;
pub use transfer::NullTransfer;
