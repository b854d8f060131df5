//! Blake2b hashing of off-chain evidence bundles into proof hashes.

use agriproof_types::ProofHash;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use std::io::{self, Read};

type Blake2b256 = Blake2b<U32>;

/// Hash a stream into a proof hash without buffering it whole.
pub fn proof_hash_reader<R: Read>(mut reader: R) -> io::Result<ProofHash> {
    let mut hasher = Blake2b256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(finish(hasher))
}

fn finish(hasher: Blake2b256) -> ProofHash {
    let mut output = [0u8; ProofHash::LEN];
    output.copy_from_slice(&hasher.finalize());
    ProofHash::new(output)
}
