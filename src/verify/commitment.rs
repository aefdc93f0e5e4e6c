//! Seed Commitment Check
//!
//! The operator publishes `keccak256(seed_bytes)` before play and reveals
//! the seed afterwards. A reveal is honest iff the digest of the revealed
//! seed equals the published commitment.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::hash::{HashProvider, KeccakHmacProvider};
use crate::core::hex::{self, DecodingError};

/// A published commitment, stored in canonical lowercase form.
///
/// The width is whatever the publisher used; 64 hex characters is the
/// canonical Keccak-256 width, but shorter or longer strings are kept
/// and simply never match.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment {
    hash_hex: String,
}

impl Commitment {
    /// Wrap a published commitment string.
    pub fn new(hash_hex: &str) -> Self {
        Self {
            hash_hex: hex::canonical(hash_hex),
        }
    }

    /// Compute the commitment for a seed.
    pub fn from_seed(seed_hex: &str) -> Result<Self, DecodingError> {
        Self::from_seed_with(&KeccakHmacProvider, seed_hex)
    }

    /// Compute the commitment for a seed with a given provider.
    pub fn from_seed_with<H: HashProvider>(provider: &H, seed_hex: &str) -> Result<Self, DecodingError> {
        let seed = hex::decode(seed_hex.trim())?;
        Ok(Self {
            hash_hex: hex::encode(&provider.digest(&seed)),
        })
    }

    /// Canonical hex form.
    pub fn as_hex(&self) -> &str {
        &self.hash_hex
    }

    /// Verify that a revealed seed matches this commitment.
    pub fn verify(&self, seed_hex: &str) -> Result<bool, DecodingError> {
        self.verify_with(&KeccakHmacProvider, seed_hex)
    }

    /// Verify a revealed seed with a given provider.
    pub fn verify_with<H: HashProvider>(&self, provider: &H, seed_hex: &str) -> Result<bool, DecodingError> {
        let computed = Self::from_seed_with(provider, seed_hex)?;
        let valid = computed == *self;
        debug!(
            "Commitment check: expected={} computed={} valid={}",
            self.hash_hex, computed.hash_hex, valid
        );
        Ok(valid)
    }
}

/// Check a revealed seed against a published commitment.
///
/// Comparison is case-insensitive. Fails only when `seed_hex` is not
/// valid even-length hex; a malformed commitment is simply a mismatch.
pub fn verify_commitment(seed_hex: &str, commitment_hex: &str) -> Result<bool, DecodingError> {
    Commitment::new(commitment_hex).verify(seed_hex)
}

/// Lowercase hex digest of a seed.
pub fn commitment_of(seed_hex: &str) -> Result<String, DecodingError> {
    Commitment::from_seed(seed_hex).map(|c| c.hash_hex)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "00ff";
    const COMMITMENT: &str = "0050c0bb1a7f44340fff58dc7250ec88a127ad18267a1cadbb0839d5d67566d8";

    #[test]
    fn test_commitment_of_known_seed() {
        assert_eq!(commitment_of(SEED).unwrap(), COMMITMENT);
    }

    #[test]
    fn test_verify_matching_seed() {
        assert!(verify_commitment(SEED, COMMITMENT).unwrap());
    }

    #[test]
    fn test_verify_case_insensitive() {
        let upper = COMMITMENT.to_ascii_uppercase();
        assert_eq!(
            verify_commitment(SEED, &upper).unwrap(),
            verify_commitment(SEED, COMMITMENT).unwrap()
        );
        assert!(verify_commitment("00FF", &upper).unwrap());
    }

    #[test]
    fn test_wrong_commitment_fails() {
        let mut wrong = COMMITMENT.to_string();
        wrong.replace_range(0..1, "1");
        assert!(!verify_commitment(SEED, &wrong).unwrap());
    }

    #[test]
    fn test_wrong_seed_fails() {
        assert!(!verify_commitment("00fe", COMMITMENT).unwrap());
    }

    #[test]
    fn test_malformed_commitment_is_mismatch() {
        assert!(!verify_commitment(SEED, "not hex at all").unwrap());
        assert!(!verify_commitment(SEED, "").unwrap());
        assert!(!verify_commitment(SEED, &COMMITMENT[..32]).unwrap());
    }

    #[test]
    fn test_malformed_seed_is_error() {
        assert_eq!(
            verify_commitment("abc", COMMITMENT),
            Err(DecodingError::OddLength { len: 3 })
        );
        assert!(matches!(
            verify_commitment("12g4", COMMITMENT),
            Err(DecodingError::InvalidCharacter { ch: 'g', .. })
        ));
    }

    #[test]
    fn test_commitment_determinism() {
        let a = Commitment::from_seed(SEED).unwrap();
        let b = Commitment::from_seed(SEED).unwrap();
        assert_eq!(a, b);
        assert!(a.verify(SEED).unwrap());
    }
}
