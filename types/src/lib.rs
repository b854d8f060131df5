//! Fundamental types for the AgriProof verification engine.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! principals, block heights, proof hashes, fee amounts, protocol parameters,
//! practice and status enums, and the token-transfer seam.

pub mod amount;
pub mod error;
pub mod hash;
pub mod height;
pub mod id;
pub mod params;
pub mod principal;
pub mod state;
pub mod transfer;

pub use amount::MicroStx;
pub use error::{ScoreBoundsError, TransferError, TypesError};
pub use hash::ProofHash;
pub use height::BlockHeight;
pub use id::VerificationId;
pub use params::VerificationParams;
pub use principal::Principal;
pub use state::{PracticeType, VerificationStatus};
pub use transfer::{FeeTransfer, TokenTransfer, TransferLog};
