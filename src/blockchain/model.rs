use super::{Block, ProofOfWork};

/// Append-only in-memory chain. Never empty: genesis is pushed on creation.
#[derive(Debug)]
pub struct Blockchain {
    pub chain: Vec<Block>,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Blockchain {
    /// Initialize a new chain with its genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
        }
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Blockchain should always have at least the genesis block")
    }

    /// Append a block. Linkage is the caller's responsibility.
    pub fn append(&mut self, block: Block) -> &Block {
        self.chain.push(block);
        self.last_block()
    }

    /// Validate the entire chain: genesis, indices, linkage, proofs, and a
    /// single trailing reward in every mined block.
    pub fn is_valid_chain(&self, pow: &ProofOfWork) -> bool {
        let Some(genesis) = self.chain.first() else {
            return false;
        };
        if !genesis.is_genesis() {
            return false;
        }

        self.chain.windows(2).all(|pair| {
            let (prev, current) = (&pair[0], &pair[1]);
            current.index == prev.index + 1
                && current.previous_hash == prev.compute_hash()
                && pow.is_valid(prev.proof, current.proof)
                && has_single_trailing_reward(current)
        })
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }
}

fn has_single_trailing_reward(block: &Block) -> bool {
    let rewards = block.transactions.iter().filter(|t| t.is_reward()).count();
    rewards == 1 && block.transactions.last().is_some_and(|t| t.is_reward())
}
