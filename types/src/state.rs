//! State enums for verification records.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The agricultural practice a verification covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeType {
    /// Soil health: cover crops, reduced tillage, composting.
    Soil,
    /// Trees integrated with crops or pasture.
    Agroforestry,
    /// Habitat and species diversity on the farm.
    Biodiversity,
}

impl PracticeType {
    pub const ALL: [Self; 3] = [Self::Soil, Self::Agroforestry, Self::Biodiversity];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Soil => "soil",
            Self::Agroforestry => "agroforestry",
            Self::Biodiversity => "biodiversity",
        }
    }
}

impl fmt::Display for PracticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PracticeType {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TypesError::UnknownPracticeType(s.to_string()))
    }
}

/// Lifecycle status of a verification record.
///
/// `Pending` is left exactly once, for `Approved` or `Rejected`; neither
/// decided status transitions further.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
}

impl VerificationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Whether the record has been decided and may now be amended.
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
