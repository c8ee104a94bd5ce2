use crate::blockchain::Block;
use crate::ledger::LedgerEngine;
use crate::transaction::Transaction;
use serde::Serialize;

/// Shared application state: the ledger and this node's identity.
pub struct AppState {
    pub engine: LedgerEngine,
    pub node_id: String,
}

impl AppState {
    pub fn new(engine: LedgerEngine, node_id: impl Into<String>) -> Self {
        Self {
            engine,
            node_id: node_id.into(),
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: u32,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

impl From<Block> for MineResponse {
    fn from(block: Block) -> Self {
        Self {
            message: "New Block Forged",
            index: block.index,
            transactions: block.transactions,
            proof: block.proof,
            previous_hash: block.previous_hash,
        }
    }
}

/* ---------- TX API Models ---------- */

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct MempoolResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

#[derive(Serialize)]
pub struct HealthResponse<'a> {
    pub status: &'static str,
    pub node_id: &'a str,
    pub difficulty: u32,
}
