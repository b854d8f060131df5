//! Transaction scripts: a JSON list of contract calls replayed against a
//! registry, one receipt per call.
//!
//! ```json
//! { "transactions": [
//!   { "sender": "ST2AUTH", "height": 0,
//!     "call": { "op": "set-authority-contract", "principal": "ST2AUTH" } },
//!   { "sender": "ST1VERIFIER", "height": 1,
//!     "call": { "op": "request-verification", "practice_id": 1,
//!               "proof_hash": "<64 hex digits>", "practice_type": "soil",
//!               "impact_level": 5, "location": "Farm", "farmer": "ST3FARMER" } }
//! ] }
//! ```

use agriproof_types::{BlockHeight, MicroStx, Principal, TokenTransfer, VerificationId};
use agriproof_verification::{
    CallContext, VerificationError, VerificationRegistry, VerificationRequest,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Clone, Debug, Deserialize)]
pub struct Script {
    pub transactions: Vec<Transaction>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Transaction {
    pub sender: Principal,
    #[serde(default)]
    pub height: BlockHeight,
    pub call: Call,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Call {
    SetAuthorityContract {
        principal: Principal,
    },
    SetVerificationFee {
        fee: MicroStx,
    },
    SetMinVerificationScore {
        min: u32,
    },
    SetMaxVerificationScore {
        max: u32,
    },
    RequestVerification {
        practice_id: u64,
        /// Hex-encoded; the decoded length is checked by the registry.
        proof_hash: String,
        practice_type: String,
        impact_level: u32,
        location: String,
        #[serde(default)]
        evidence_url: Option<String>,
        farmer: Principal,
    },
    ApprovePractice {
        id: VerificationId,
        score: u32,
        #[serde(default)]
        reason: Option<String>,
    },
    RejectPractice {
        id: VerificationId,
        reason: String,
    },
    UpdateVerification {
        id: VerificationId,
        score: u32,
        #[serde(default)]
        reason: Option<String>,
    },
    GetVerification {
        id: VerificationId,
    },
    GetVerificationUpdate {
        id: VerificationId,
    },
    GetVerificationCount,
    GetVerifierRating {
        verifier: Principal,
    },
}

impl Call {
    pub fn op(&self) -> &'static str {
        match self {
            Self::SetAuthorityContract { .. } => "set-authority-contract",
            Self::SetVerificationFee { .. } => "set-verification-fee",
            Self::SetMinVerificationScore { .. } => "set-min-verification-score",
            Self::SetMaxVerificationScore { .. } => "set-max-verification-score",
            Self::RequestVerification { .. } => "request-verification",
            Self::ApprovePractice { .. } => "approve-practice",
            Self::RejectPractice { .. } => "reject-practice",
            Self::UpdateVerification { .. } => "update-verification",
            Self::GetVerification { .. } => "get-verification",
            Self::GetVerificationUpdate { .. } => "get-verification-update",
            Self::GetVerificationCount => "get-verification-count",
            Self::GetVerifierRating { .. } => "get-verifier-rating",
        }
    }
}

/// Outcome of one call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Receipt {
    pub index: usize,
    pub op: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Receipt {
    fn from_result(index: usize, op: &'static str, result: Result<Value, VerificationError>) -> Self {
        match result {
            Ok(value) => Self {
                index,
                op,
                ok: true,
                value: Some(value),
                code: None,
                error: None,
            },
            Err(e) => Self {
                index,
                op,
                ok: false,
                value: None,
                code: Some(e.code()),
                error: Some(e.to_string()),
            },
        }
    }
}

pub fn parse(json: &str) -> anyhow::Result<Script> {
    serde_json::from_str(json).context("malformed transaction script")
}

/// Execute every transaction in order. Contract failures become failed
/// receipts; only malformed input aborts the replay.
pub fn replay<T: TokenTransfer>(
    registry: &mut VerificationRegistry<T>,
    script: Script,
) -> anyhow::Result<Vec<Receipt>> {
    script
        .transactions
        .into_iter()
        .enumerate()
        .map(|(index, tx)| {
            let op = tx.call.op();
            let ctx = CallContext::new(tx.sender, tx.height);
            let result = execute(registry, &ctx, tx.call)
                .with_context(|| format!("transaction {index} ({op})"))?;
            Ok(Receipt::from_result(index, op, result))
        })
        .collect()
}

fn execute<T: TokenTransfer>(
    registry: &mut VerificationRegistry<T>,
    ctx: &CallContext,
    call: Call,
) -> anyhow::Result<Result<Value, VerificationError>> {
    let done = |r: Result<(), VerificationError>| r.map(|()| Value::Bool(true));

    let result = match call {
        Call::SetAuthorityContract { principal } => done(registry.set_authority_contract(principal)),
        Call::SetVerificationFee { fee } => done(registry.set_verification_fee(fee)),
        Call::SetMinVerificationScore { min } => done(registry.set_min_verification_score(min)),
        Call::SetMaxVerificationScore { max } => done(registry.set_max_verification_score(max)),
        Call::RequestVerification {
            practice_id,
            proof_hash,
            practice_type,
            impact_level,
            location,
            evidence_url,
            farmer,
        } => {
            let proof_hash = hex::decode(&proof_hash).context("proof_hash is not valid hex")?;
            let request = VerificationRequest {
                practice_id,
                proof_hash,
                practice_type,
                impact_level,
                location,
                evidence_url,
                farmer,
            };
            registry
                .request_verification(ctx, request)
                .map(|id| json!(id.as_u64()))
        }
        Call::ApprovePractice { id, score, reason } => {
            done(registry.approve_practice(ctx, id, score, reason))
        }
        Call::RejectPractice { id, reason } => done(registry.reject_practice(ctx, id, reason)),
        Call::UpdateVerification { id, score, reason } => {
            done(registry.update_verification(ctx, id, score, reason))
        }
        Call::GetVerification { id } => registry
            .get_verification(id)
            .map(serde_json::to_value)
            .transpose()?
            .ok_or(VerificationError::NotFound(id)),
        Call::GetVerificationUpdate { id } => Ok(registry
            .get_verification_update(id)
            .map(serde_json::to_value)
            .transpose()?
            .unwrap_or(Value::Null)),
        Call::GetVerificationCount => Ok(json!(registry.verification_count())),
        Call::GetVerifierRating { verifier } => Ok(json!(registry.verifier_rating(&verifier))),
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agriproof_types::TransferLog;

    const HASH32: &str = "0000000000000000000000000000000000000000000000000000000000000000";

    fn run(script: &str) -> (VerificationRegistry<TransferLog>, Vec<Receipt>) {
        let mut registry = VerificationRegistry::default();
        let receipts = replay(&mut registry, parse(script).unwrap()).unwrap();
        (registry, receipts)
    }

    #[test]
    fn replays_full_lifecycle() {
        let script = format!(
            r#"{{ "transactions": [
                {{ "sender": "ST2AUTH", "call": {{ "op": "set-authority-contract", "principal": "ST2AUTH" }} }},
                {{ "sender": "ST1VERIFIER", "height": 1, "call": {{
                    "op": "request-verification", "practice_id": 1, "proof_hash": "{HASH32}",
                    "practice_type": "soil", "impact_level": 5, "location": "Farm Location",
                    "evidence_url": "https://evidence.com", "farmer": "ST3FARMER" }} }},
                {{ "sender": "ST1VERIFIER", "height": 2, "call": {{
                    "op": "approve-practice", "id": 0, "score": 80, "reason": "Good practice" }} }},
                {{ "sender": "ST1VERIFIER", "height": 3, "call": {{
                    "op": "get-verifier-rating", "verifier": "ST1VERIFIER" }} }},
                {{ "sender": "ST1VERIFIER", "height": 3, "call": {{ "op": "get-verification-count" }} }}
            ] }}"#
        );
        let (registry, receipts) = run(&script);

        assert!(receipts.iter().all(|r| r.ok), "{receipts:?}");
        assert_eq!(receipts[1].value, Some(json!(0)));
        assert_eq!(receipts[3].value, Some(json!(1)));
        assert_eq!(receipts[4].value, Some(json!(1)));
        assert_eq!(registry.transfer().transfers().len(), 1);
    }

    #[test]
    fn contract_failures_become_receipts() {
        let script = r#"{ "transactions": [
            { "sender": "ST2AUTH", "call": { "op": "set-authority-contract", "principal": "ST2AUTH" } },
            { "sender": "ST2AUTH", "call": { "op": "set-min-verification-score", "min": 101 } },
            { "sender": "ST1VERIFIER", "call": {
                "op": "request-verification", "practice_id": 1, "proof_hash": "00",
                "practice_type": "soil", "impact_level": 5, "location": "Farm", "farmer": "ST3FARMER" } },
            { "sender": "ST1VERIFIER", "call": { "op": "get-verification", "id": 0 } }
        ] }"#;
        let (_, receipts) = run(script);

        assert!(receipts[0].ok);
        assert_eq!(receipts[1].code, Some(124));
        assert_eq!(receipts[2].code, Some(103));
        assert_eq!(receipts[3].code, Some(107));
        assert_eq!(receipts[3].op, "get-verification");
    }

    #[test]
    fn malformed_hex_aborts_replay() {
        let script = r#"{ "transactions": [
            { "sender": "ST1VERIFIER", "call": {
                "op": "request-verification", "practice_id": 1, "proof_hash": "xyz",
                "practice_type": "soil", "impact_level": 5, "location": "Farm", "farmer": "ST3FARMER" } }
        ] }"#;
        let mut registry: VerificationRegistry<TransferLog> = VerificationRegistry::default();
        let err = replay(&mut registry, parse(script).unwrap()).unwrap_err();
        assert!(format!("{err:#}").contains("transaction 0"));
    }

    #[test]
    fn unknown_op_is_a_parse_error() {
        let script = r#"{ "transactions": [ { "sender": "ST1", "call": { "op": "mint" } } ] }"#;
        assert!(parse(script).is_err());
    }

    #[test]
    fn receipts_serialize_compactly() {
        let receipt = Receipt::from_result(
            2,
            "approve-practice",
            Err(VerificationError::NotFound(VerificationId::new(9))),
        );
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["code"], json!(107));
        assert!(json.get("value").is_none());
    }
}
