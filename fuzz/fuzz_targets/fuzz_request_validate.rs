#![no_main]

use agriproof_types::{BlockHeight, Principal, TransferLog};
use agriproof_verification::{
    CallContext, VerificationConfig, VerificationRegistry, VerificationRequest,
};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    practice_id: u64,
    proof_hash: Vec<u8>,
    practice_type: String,
    impact_level: u32,
    location: String,
    evidence_url: Option<String>,
    score: u32,
    reason: Option<String>,
}

fuzz_target!(|input: Input| {
    // Arbitrary request fields must be accepted or refused with a code,
    // never panic, and a refused request must leave the registry empty.
    let Ok(verifier) = Principal::new("ST1VERIFIER") else {
        return;
    };
    let Ok(authority) = Principal::new("ST2AUTH") else {
        return;
    };
    let mut registry =
        VerificationRegistry::new(VerificationConfig::default(), TransferLog::new());
    if registry.set_authority_contract(authority).is_err() {
        return;
    }
    let ctx = CallContext::new(verifier.clone(), BlockHeight::new(1));

    let request = VerificationRequest {
        practice_id: input.practice_id,
        proof_hash: input.proof_hash,
        practice_type: input.practice_type,
        impact_level: input.impact_level,
        location: input.location,
        evidence_url: input.evidence_url,
        farmer: verifier,
    };

    match registry.request_verification(&ctx, request) {
        Ok(id) => {
            let _ = registry.approve_practice(&ctx, id, input.score, input.reason);
            assert_eq!(registry.verification_count(), 1);
        }
        Err(e) => {
            assert!(e.code() > 0);
            assert_eq!(registry.verification_count(), 0);
            assert!(registry.transfer().transfers().is_empty());
        }
    }
});
