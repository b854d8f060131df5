//! End-to-end scenarios against nullable collaborators.

use agriproof_nullables::{NullClock, NullTransfer};
use agriproof_types::{
    BlockHeight, MicroStx, Principal, TransferError, VerificationId, VerificationParams,
    VerificationStatus,
};
use agriproof_verification::{
    CallContext, VerificationConfig, VerificationEvent, VerificationRegistry, VerificationRequest,
};

fn p(s: &str) -> Principal {
    Principal::new(s).unwrap()
}

fn authority() -> Principal {
    p("ST2AUTH")
}

fn verifier() -> Principal {
    p("ST1VERIFIER")
}

fn farmer() -> Principal {
    p("ST3FARMER")
}

fn soil_request() -> VerificationRequest {
    VerificationRequest::new(1, [0u8; 32], "soil", 5, "Farm Location", farmer())
        .with_evidence_url("https://evidence.com")
}

fn registry_with(transfer: NullTransfer) -> VerificationRegistry<NullTransfer> {
    let mut reg = VerificationRegistry::new(VerificationConfig::default(), transfer);
    reg.set_authority_contract(authority()).unwrap();
    reg.drain_events();
    reg
}

#[test]
fn request_approve_amend_across_blocks() {
    let clock = NullClock::new(100);
    let mut reg = registry_with(NullTransfer::new());

    let ctx = CallContext::new(verifier(), clock.now());
    let id = reg.request_verification(&ctx, soil_request()).unwrap();
    assert_eq!(id, VerificationId::FIRST);

    clock.advance(10);
    let ctx = CallContext::new(verifier(), clock.now());
    reg.approve_practice(&ctx, id, 80, Some("Good practice".into()))
        .unwrap();

    clock.advance(5);
    let ctx = CallContext::new(verifier(), clock.now());
    reg.update_verification(&ctx, id, 90, Some("Updated review".into()))
        .unwrap();

    let record = reg.get_verification(id).unwrap();
    assert_eq!(record.status(), VerificationStatus::Approved);
    assert_eq!(record.score(), 90);
    assert_eq!(record.timestamp().as_u64(), 115);

    let update = reg.get_verification_update(id).unwrap();
    assert_eq!(update.update_score, 90);
    assert_eq!(update.update_status, VerificationStatus::Approved);
    assert_eq!(update.update_timestamp.as_u64(), 115);
    assert_eq!(update.updater, verifier());

    assert_eq!(reg.verifier_rating(&verifier()), 1);
    assert_eq!(reg.transfer().transfers().len(), 1);
    assert_eq!(reg.transfer().transfers()[0].to, authority());
    assert_eq!(reg.transfer().transfers()[0].amount, MicroStx::new(500));

    let events = reg.drain_events();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], VerificationEvent::FeeTransferred(_)));
    assert!(matches!(
        events[1],
        VerificationEvent::VerificationRequested { .. }
    ));
    assert!(matches!(
        events[2],
        VerificationEvent::PracticeApproved { rating: 1, .. }
    ));
    assert!(matches!(
        events[3],
        VerificationEvent::VerificationUpdated { score: 90, .. }
    ));
}

#[test]
fn failed_transfer_leaves_no_record_and_no_event() {
    let mut transfer = NullTransfer::new();
    transfer.fail_next(TransferError::InsufficientBalance {
        needed: 500,
        available: 0,
    });
    let mut reg = registry_with(transfer);
    let ctx = CallContext::new(verifier(), BlockHeight::new(1));

    let err = reg.request_verification(&ctx, soil_request()).unwrap_err();
    assert_eq!(err.code(), 1);
    assert_eq!(reg.verification_count(), 0);
    assert!(reg.get_verification(VerificationId::FIRST).is_none());
    assert!(reg.drain_events().is_empty());

    // The queued failure is spent; the retry takes id 0.
    let id = reg.request_verification(&ctx, soil_request()).unwrap();
    assert_eq!(id, VerificationId::FIRST);
}

#[test]
fn strict_transfer_moves_balances() {
    let mut transfer = NullTransfer::strict();
    transfer.fund(&verifier(), MicroStx::new(700));
    let mut reg = registry_with(transfer);
    let ctx = CallContext::new(verifier(), BlockHeight::new(1));

    reg.request_verification(&ctx, soil_request()).unwrap();
    assert_eq!(reg.transfer().balance(&verifier()), MicroStx::new(200));
    assert_eq!(reg.transfer().balance(&authority()), MicroStx::new(500));

    let err = reg.request_verification(&ctx, soil_request()).unwrap_err();
    assert_eq!(err.code(), 1);
    assert_eq!(reg.verification_count(), 1);
}

#[test]
fn strict_transfer_refuses_authority_paying_itself() {
    let mut transfer = NullTransfer::strict();
    transfer.fund(&authority(), MicroStx::new(1_000));
    let mut reg = registry_with(transfer);
    let ctx = CallContext::new(authority(), BlockHeight::new(1));

    let err = reg.request_verification(&ctx, soil_request()).unwrap_err();
    assert_eq!(err.code(), 2);
    assert_eq!(reg.verification_count(), 0);
}

#[test]
fn zero_fee_is_refused_by_strict_transfer() {
    let mut reg = registry_with(NullTransfer::strict());
    reg.set_verification_fee(MicroStx::ZERO).unwrap();
    let ctx = CallContext::new(verifier(), BlockHeight::new(1));

    let err = reg.request_verification(&ctx, soil_request()).unwrap_err();
    assert_eq!(err.code(), 3);
}

#[test]
fn capacity_is_enforced_from_config() {
    let params = VerificationParams {
        max_verifications: 2,
        ..VerificationParams::default()
    };
    let config = VerificationConfig::from_params(params).unwrap();
    let mut reg = VerificationRegistry::new(config, NullTransfer::new());
    reg.set_authority_contract(authority()).unwrap();
    let ctx = CallContext::new(verifier(), BlockHeight::new(1));

    reg.request_verification(&ctx, soil_request()).unwrap();
    reg.request_verification(&ctx, soil_request()).unwrap();
    let err = reg.request_verification(&ctx, soil_request()).unwrap_err();
    assert_eq!(err.code(), 112);
    assert_eq!(reg.verification_count(), 2);
}

#[test]
fn rejection_lowers_rating_and_blocks_further_decisions() {
    let mut reg = registry_with(NullTransfer::new());
    let ctx = CallContext::new(verifier(), BlockHeight::new(1));

    let first = reg.request_verification(&ctx, soil_request()).unwrap();
    let second = reg.request_verification(&ctx, soil_request()).unwrap();

    reg.approve_practice(&ctx.next_block(), first, 70, None)
        .unwrap();
    reg.reject_practice(&ctx.next_block(), second, "Insufficient evidence".into())
        .unwrap();
    assert_eq!(reg.verifier_rating(&verifier()), 0);

    let err = reg
        .approve_practice(&ctx.next_block(), second, 80, None)
        .unwrap_err();
    assert_eq!(err.code(), 106);

    let rejected = reg.get_verification(second).unwrap();
    assert_eq!(rejected.status(), VerificationStatus::Rejected);
    assert_eq!(rejected.score(), 0);
}

#[test]
fn snapshot_survives_restore_with_fresh_transfer() {
    let mut reg = registry_with(NullTransfer::new());
    let ctx = CallContext::new(verifier(), BlockHeight::new(1));
    let id = reg.request_verification(&ctx, soil_request()).unwrap();
    reg.approve_practice(&ctx, id, 75, None).unwrap();

    let bytes = bincode::serialize(&reg.snapshot()).unwrap();
    let mut restored =
        VerificationRegistry::restore(bincode::deserialize(&bytes).unwrap(), NullTransfer::new())
            .unwrap();

    assert_eq!(restored.verification_count(), 1);
    assert_eq!(restored.get_verification(id), reg.get_verification(id));
    assert_eq!(restored.verifier_rating(&verifier()), 1);
    assert!(restored.drain_events().is_empty());

    let next = restored
        .request_verification(&ctx, soil_request())
        .unwrap();
    assert_eq!(next.as_u64(), 1);
    assert_eq!(restored.transfer().transfers().len(), 1);
}
