use sha2::{Digest, Sha256};

use super::DEFAULT_DIFFICULTY;

/// Proof-of-Work puzzle: find `p` such that `sha256("{last_proof}{p}")`
/// starts with `difficulty` zero hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: u32,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl ProofOfWork {
    pub fn new(difficulty: u32) -> Self {
        Self { difficulty }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Hex digest of the decimal concatenation of both proofs (no separator).
    pub fn guess_hash(last_proof: u64, candidate: u64) -> String {
        let guess = format!("{last_proof}{candidate}");
        let mut hasher = Sha256::new();
        hasher.update(guess.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn is_valid(&self, last_proof: u64, candidate: u64) -> bool {
        Self::guess_hash(last_proof, candidate)
            .chars()
            .take(self.difficulty as usize)
            .all(|c| c == '0')
    }

    /// Smallest non-negative candidate accepted by `is_valid`.
    /// Runs until found; callers that must stay responsive should run this
    /// off their request threads.
    pub fn solve(&self, last_proof: u64) -> u64 {
        let mut proof = 0u64;
        while !self.is_valid(last_proof, proof) {
            proof = proof.wrapping_add(1);
        }
        proof
    }
}

#[cfg(test)]
mod tests {
    use super::ProofOfWork;

    #[test]
    fn default_difficulty_is_four() {
        assert_eq!(ProofOfWork::default().difficulty(), 4);
    }

    #[test]
    fn guess_hash_concatenates_decimal_forms() {
        // "10035" and "100" + "35" are the same preimage
        assert_eq!(
            ProofOfWork::guess_hash(100, 35),
            ProofOfWork::guess_hash(1003, 5)
        );
        assert_ne!(
            ProofOfWork::guess_hash(100, 35),
            ProofOfWork::guess_hash(100, 36)
        );
    }

    #[test]
    fn validity_matches_leading_zero_prefix() {
        let pow = ProofOfWork::new(4);
        for candidate in 0..2_000 {
            let h = ProofOfWork::guess_hash(7, candidate);
            assert_eq!(pow.is_valid(7, candidate), h.starts_with("0000"));
        }
    }

    #[test]
    fn solve_returns_minimal_valid_candidate() {
        let pow = ProofOfWork::new(2);
        for last in [0u64, 100, 12345] {
            let p = pow.solve(last);
            assert!(pow.is_valid(last, p));
            assert!((0..p).all(|q| !pow.is_valid(last, q)));
        }
    }

    #[test]
    fn solve_at_default_difficulty() {
        let pow = ProofOfWork::default();
        let p = pow.solve(100);
        assert!(ProofOfWork::guess_hash(100, p).starts_with("0000"));
    }

    #[test]
    fn zero_difficulty_accepts_first_candidate() {
        assert_eq!(ProofOfWork::new(0).solve(42), 0);
    }
}
