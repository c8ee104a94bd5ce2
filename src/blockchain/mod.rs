pub mod block;
mod canonical;
pub mod model;
pub mod pow;

pub use block::Block;
pub use model::Blockchain;
pub use pow::ProofOfWork;

/// Default Proof-of-Work difficulty (number of leading zero hex chars).
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Upper bound accepted from configuration (keeps dev nodes usable).
pub const MAX_DIFFICULTY: u32 = 8;

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel previous-hash of the genesis block. Not a digest.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// Amount credited to the miner of each block.
pub const MINING_REWARD: u64 = 1;

/// Sender of the reward transaction.
pub const REWARD_SENDER: &str = "0";
