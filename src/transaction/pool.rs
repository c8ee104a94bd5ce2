use super::Transaction;

/// Pending transactions waiting for the next mined block, in submission order.
#[derive(Debug, Default)]
pub struct TransactionPool {
    pending: Vec<Transaction>,
}

impl TransactionPool {
    pub fn push(&mut self, tx: Transaction) {
        self.pending.push(tx);
    }

    /// Take every pending transaction and leave the pool empty.
    pub fn drain(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.pending.iter()
    }
}
