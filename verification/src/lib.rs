//! Agricultural practice verification engine.
//!
//! A verifier files a **request** for a farmer's practice (soil, agroforestry,
//! biodiversity), paying the configured fee to the authority. The same
//! verifier later **decides** it, approving with a score or rejecting with a
//! reason, and may **amend** a decided record any number of times.
//!
//! ```text
//!   request ──► Pending ──approve──► Approved ─┐
//!                  │                           ├─ update (score, reason)
//!                  └─────reject────► Rejected ─┘
//! ```
//!
//! Approvals raise the verifier's rating by one, rejections lower it by one
//! without going below zero. Every call validates fully before writing, so a
//! failed call leaves no trace.

pub mod config;
pub mod context;
pub mod error;
pub mod rating;
pub mod registry;
pub mod request;
pub mod state;

pub use config::VerificationConfig;
pub use context::CallContext;
pub use error::{SnapshotError, VerificationError};
pub use rating::VerifierRatings;
pub use registry::{RegistrySnapshot, VerificationEvent, VerificationRegistry};
pub use request::VerificationRequest;
pub use state::{Verification, VerificationUpdate};
