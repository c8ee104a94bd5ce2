use log::{debug, info};
use std::sync::Mutex;
use std::time::Instant;

use crate::blockchain::{Block, Blockchain, ProofOfWork};
use crate::transaction::{Transaction, TransactionPool};

/// Chain and pool are mutated together, so they share one lock.
#[derive(Debug, Default)]
struct LedgerState {
    chain: Blockchain,
    pool: TransactionPool,
}

/// Owns the chain and the pending pool and serializes every write to them.
///
/// `submit` and the assembly step of `mine` each run inside one critical
/// section. The puzzle search runs without the state lock, so readers see
/// either the chain before a mine or the chain with the new block appended.
#[derive(Debug)]
pub struct LedgerEngine {
    state: Mutex<LedgerState>,
    // Held for a whole mine: two mines never solve against the same tip.
    mining: Mutex<()>,
    pow: ProofOfWork,
}

impl LedgerEngine {
    pub fn new(difficulty: u32) -> Self {
        Self {
            state: Mutex::new(LedgerState::default()),
            mining: Mutex::new(()),
            pow: ProofOfWork::new(difficulty),
        }
    }

    pub fn difficulty(&self) -> u32 {
        self.pow.difficulty()
    }

    /// Queue a transaction and return the index of the block that will hold it.
    pub fn submit(&self, tx: Transaction) -> u64 {
        let mut state = self.state.lock().expect("mutex poisoned");
        state.pool.push(tx);
        let index = state.chain.len() as u64 + 1;
        debug!(
            "POOL - queued tx for block #{} (pending={})",
            index,
            state.pool.len()
        );
        index
    }

    /// Solve the puzzle against the current tip, credit `miner` and forge a
    /// block holding everything pending at assembly time.
    pub fn mine(&self, miner: &str) -> Block {
        let _mining = self.mining.lock().expect("mutex poisoned");

        let last_proof = {
            let state = self.state.lock().expect("mutex poisoned");
            state.chain.last_block().proof
        };

        let t0 = Instant::now();
        let proof = self.pow.solve(last_proof);
        debug!(
            "MINER - proof {} found for last_proof {} ({} ms, difficulty={})",
            proof,
            last_proof,
            t0.elapsed().as_millis(),
            self.pow.difficulty()
        );

        let mut state = self.state.lock().expect("mutex poisoned");
        // Only `mine` appends and `_mining` is held, so the tip is unchanged.
        let last = state.chain.last_block();
        let index = last.index + 1;
        let previous_hash = last.compute_hash();

        state.pool.push(Transaction::reward(miner));
        let transactions = state.pool.drain();
        debug!("POOL - drained {} txs into block #{}", transactions.len(), index);

        let block = Block::new(index, transactions, proof, previous_hash);
        let block = state.chain.append(block).clone();
        info!(
            "MINER - forged block #{} (proof={}, txs={}, prev={})",
            block.index,
            block.proof,
            block.transactions.len(),
            block.previous_hash
        );
        block
    }

    /// Consistent snapshot of the whole chain.
    pub fn chain(&self) -> Vec<Block> {
        let state = self.state.lock().expect("mutex poisoned");
        state.chain.blocks().to_vec()
    }

    pub fn len(&self) -> usize {
        self.state.lock().expect("mutex poisoned").chain.len()
    }

    /// Snapshot of the pending pool, in submission order.
    pub fn pending(&self) -> Vec<Transaction> {
        let state = self.state.lock().expect("mutex poisoned");
        state.pool.iter().cloned().collect()
    }

    /// Check genesis, indices, hash linkage and proofs of the whole chain.
    pub fn validate(&self) -> bool {
        let state = self.state.lock().expect("mutex poisoned");
        state.chain.is_valid_chain(&self.pow)
    }
}
