use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::canonical::to_canonical_vec;
use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::Transaction;

/// A single block in the ledger. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // seconds since epoch (UTC), microsecond resolution
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis() -> Self {
        Self::new(1, Vec::new(), GENESIS_PROOF, GENESIS_PREVIOUS_HASH.to_string())
    }

    /// Create a block stamped with the current time.
    pub fn new(
        index: u64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self::new_with_timestamp(index, now_secs(), transactions, proof, previous_hash)
    }

    pub fn new_with_timestamp(
        index: u64,
        timestamp: f64,
        transactions: Vec<Transaction>,
        proof: u64,
        previous_hash: String,
    ) -> Self {
        Self {
            index,
            timestamp,
            transactions,
            proof,
            previous_hash,
        }
    }

    /// Canonical serialization: keys sorted at every level, `", "`/`": "`
    /// separators, non-ASCII escaped. Equal field values always produce
    /// identical bytes, whatever order the block was built in.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        to_canonical_vec(self).expect("serialize block")
    }

    /// SHA-256 of the canonical serialization, hex-encoded.
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 1
            && self.proof == GENESIS_PROOF
            && self.previous_hash == GENESIS_PREVIOUS_HASH
    }
}

fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
