//! Principals: the identities that call into and receive value from the engine.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A standard or contract principal, e.g. `ST1VERIFIER` or `ST2AUTH.registry`.
///
/// Principals are opaque to the engine apart from the reserved burn address,
/// which can never be installed as the fee-receiving authority.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    /// The reserved null/burn address. Value sent here is unrecoverable.
    pub const BURN_ADDRESS: &'static str = "SP000000000000000000002Q6VF78";

    /// Parse and validate a principal.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if Self::is_well_formed(&s) {
            Ok(Self(s))
        } else {
            Err(TypesError::InvalidPrincipal(s))
        }
    }

    /// The burn address as a principal.
    pub fn burn() -> Self {
        Self(Self::BURN_ADDRESS.to_string())
    }

    pub fn is_burn(&self) -> bool {
        self.0 == Self::BURN_ADDRESS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_well_formed(s: &str) -> bool {
        !s.is_empty()
            && !s.starts_with('.')
            && !s.ends_with('.')
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Principal {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Principal {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Principal> for String {
    fn from(p: Principal) -> Self {
        p.0
    }
}
