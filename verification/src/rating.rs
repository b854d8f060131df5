//! Verifier reputation ledger.

use agriproof_types::Principal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-verifier rating counters. Unknown verifiers rate 0; ratings never go
/// below 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierRatings {
    ratings: HashMap<Principal, u64>,
}

impl VerifierRatings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, verifier: &Principal) -> u64 {
        self.ratings.get(verifier).copied().unwrap_or(0)
    }

    /// Record an approval. Returns the new rating.
    pub fn reward(&mut self, verifier: &Principal) -> u64 {
        let rating = self.ratings.entry(verifier.clone()).or_insert(0);
        *rating = rating.saturating_add(1);
        *rating
    }

    /// Record a rejection. A verifier already at 0 stays at 0 and no entry
    /// is created. Returns the new rating.
    pub fn penalize(&mut self, verifier: &Principal) -> u64 {
        match self.ratings.get_mut(verifier) {
            Some(rating) if *rating > 0 => {
                *rating -= 1;
                *rating
            }
            _ => 0,
        }
    }

    /// Number of verifiers with a recorded rating.
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Principal {
        Principal::new(s).unwrap()
    }

    #[test]
    fn unknown_verifier_rates_zero() {
        let ratings = VerifierRatings::new();
        assert_eq!(ratings.get(&v("ST1VERIFIER")), 0);
    }

    #[test]
    fn reward_then_penalize() {
        let mut ratings = VerifierRatings::new();
        assert_eq!(ratings.reward(&v("ST1VERIFIER")), 1);
        assert_eq!(ratings.reward(&v("ST1VERIFIER")), 2);
        assert_eq!(ratings.penalize(&v("ST1VERIFIER")), 1);
        assert_eq!(ratings.get(&v("ST1VERIFIER")), 1);
    }

    #[test]
    fn penalize_floors_at_zero() {
        let mut ratings = VerifierRatings::new();
        assert_eq!(ratings.penalize(&v("ST1VERIFIER")), 0);
        assert!(ratings.is_empty());

        ratings.reward(&v("ST1VERIFIER"));
        ratings.penalize(&v("ST1VERIFIER"));
        assert_eq!(ratings.penalize(&v("ST1VERIFIER")), 0);
        assert_eq!(ratings.get(&v("ST1VERIFIER")), 0);
    }

    #[test]
    fn ratings_are_per_verifier() {
        let mut ratings = VerifierRatings::new();
        ratings.reward(&v("ST1A"));
        ratings.reward(&v("ST1A"));
        ratings.reward(&v("ST1B"));
        ratings.penalize(&v("ST1B"));
        assert_eq!(ratings.get(&v("ST1A")), 2);
        assert_eq!(ratings.get(&v("ST1B")), 0);
        assert_eq!(ratings.len(), 2);
    }
}
