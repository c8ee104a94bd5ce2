use serde::{Deserialize, Serialize};

use crate::blockchain::{MINING_REWARD, REWARD_SENDER};

/// A value transfer between two opaque addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: u64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: u64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    /// The transaction crediting a miner for a newly forged block.
    pub fn reward(miner: impl Into<String>) -> Self {
        Self::new(REWARD_SENDER, miner, MINING_REWARD)
    }

    pub fn is_reward(&self) -> bool {
        self.sender == REWARD_SENDER && self.amount == MINING_REWARD
    }
}
