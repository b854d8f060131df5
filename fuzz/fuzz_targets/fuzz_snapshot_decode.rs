#![no_main]

use agriproof_types::TransferLog;
use agriproof_verification::{RegistrySnapshot, VerificationRegistry, VerificationRequest};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding untrusted snapshot bytes must never panic, and whatever
    // decodes must either restore or be refused.
    if let Ok(snapshot) = bincode::deserialize::<RegistrySnapshot>(data) {
        let _ = VerificationRegistry::restore(snapshot, TransferLog::new());
    }
    if let Ok(snapshot) = serde_json::from_slice::<RegistrySnapshot>(data) {
        let _ = VerificationRegistry::restore(snapshot, TransferLog::new());
    }
    let _ = serde_json::from_slice::<VerificationRequest>(data);
});
