use proptest::prelude::*;

use agriproof_nullables::NullTransfer;
use agriproof_types::{BlockHeight, Principal, VerificationId};
use agriproof_verification::{
    CallContext, VerificationConfig, VerificationRegistry, VerificationRequest,
};

fn verifier() -> Principal {
    Principal::new("ST1VERIFIER").unwrap()
}

fn request() -> VerificationRequest {
    VerificationRequest::new(
        1,
        [0u8; 32],
        "agroforestry",
        3,
        "North field",
        Principal::new("ST3FARMER").unwrap(),
    )
}

fn registry() -> VerificationRegistry<NullTransfer> {
    let mut reg = VerificationRegistry::new(VerificationConfig::default(), NullTransfer::new());
    reg.set_authority_contract(Principal::new("ST2AUTH").unwrap())
        .unwrap();
    reg
}

fn ctx(height: u64) -> CallContext {
    CallContext::new(verifier(), BlockHeight::new(height))
}

proptest! {
    /// Ids are handed out 0, 1, 2, ... and the count tracks them.
    #[test]
    fn ids_are_sequential(n in 1usize..40) {
        let mut reg = registry();
        for i in 0..n {
            let id = reg.request_verification(&ctx(i as u64), request()).unwrap();
            prop_assert_eq!(id, VerificationId::new(i as u64));
        }
        prop_assert_eq!(reg.verification_count(), n as u64);
    }

    /// Approving adds one to the rating, rejecting subtracts one but never
    /// below zero.
    #[test]
    fn rating_follows_saturating_model(decisions in prop::collection::vec(any::<bool>(), 1..30)) {
        let mut reg = registry();
        let mut expected: u64 = 0;
        for (i, approve) in decisions.iter().enumerate() {
            let height = i as u64;
            let id = reg.request_verification(&ctx(height), request()).unwrap();
            if *approve {
                reg.approve_practice(&ctx(height), id, 75, None).unwrap();
                expected += 1;
            } else {
                reg.reject_practice(&ctx(height), id, "Insufficient evidence".into())
                    .unwrap();
                expected = expected.saturating_sub(1);
            }
            prop_assert_eq!(reg.verifier_rating(&verifier()), expected);
        }
    }

    /// An approval succeeds exactly when the score is within the bounds.
    #[test]
    fn approval_iff_score_in_bounds(score in 0u32..200) {
        let mut reg = registry();
        let id = reg.request_verification(&ctx(1), request()).unwrap();
        let result = reg.approve_practice(&ctx(2), id, score, None);
        prop_assert_eq!(result.is_ok(), (50..=100).contains(&score));
        if let Err(e) = result {
            prop_assert_eq!(e.code(), 105);
            prop_assert!(reg.get_verification(id).unwrap().status().is_pending());
        }
    }

    /// Requests with a malformed field never create a record.
    #[test]
    fn invalid_requests_leave_no_trace(
        hash_len in 0usize..64,
        impact_level in 0u32..20,
        practice_type in prop::sample::select(vec!["soil", "agroforestry", "biodiversity", "compost"]),
    ) {
        let mut reg = registry();
        let mut req = request();
        req.proof_hash = vec![0u8; hash_len];
        req.impact_level = impact_level;
        req.practice_type = practice_type.to_string();

        let valid = hash_len == 32
            && (1..=10).contains(&impact_level)
            && practice_type != "compost";
        let result = reg.request_verification(&ctx(1), req);
        prop_assert_eq!(result.is_ok(), valid);
        prop_assert_eq!(reg.verification_count(), u64::from(valid));
        prop_assert_eq!(reg.transfer().transfers().len(), usize::from(valid));
    }

    /// Reads never change what later reads observe.
    #[test]
    fn reads_are_idempotent(score in 50u32..=100, probe in 0u64..5) {
        let mut reg = registry();
        let id = reg.request_verification(&ctx(1), request()).unwrap();
        reg.approve_practice(&ctx(2), id, score, None).unwrap();

        let probe = VerificationId::new(probe);
        let first = reg.get_verification(probe).cloned();
        let rating = reg.verifier_rating(&verifier());
        let count = reg.verification_count();
        prop_assert_eq!(reg.get_verification(probe).cloned(), first);
        prop_assert_eq!(reg.verifier_rating(&verifier()), rating);
        prop_assert_eq!(reg.verification_count(), count);
        prop_assert_eq!(reg.snapshot(), reg.snapshot());
    }
}
