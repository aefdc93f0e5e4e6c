//! Hashing Capability
//!
//! Two primitives back the whole verifier:
//! - the commitment digest (Keccak-256 over the seed bytes)
//! - the keyed per-round digest (HMAC-SHA256)
//!
//! They are exposed through the [`HashProvider`] trait so the verifier
//! takes the capability as a parameter instead of probing for it.
//!
//! Keccak-256 here is the original submission padding (`0x01`), not
//! NIST SHA3-256 (`0x06`). The two produce different digests for every
//! input and published commitments use the Keccak variant.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use sha3::{Digest, Keccak256};

use crate::core::rng::DerivationError;

/// Digest output type (256 bits / 32 bytes).
pub type Digest32 = [u8; 32];

/// Width of a canonical commitment in hex characters.
pub const DIGEST_HEX_LEN: usize = 64;

type HmacSha256 = Hmac<Sha256>;

/// Hashing capability used by the verifier.
pub trait HashProvider {
    /// Commitment digest of raw seed bytes.
    fn digest(&self, data: &[u8]) -> Digest32;

    /// Keyed digest of a round message.
    fn hmac_digest(&self, key: &[u8], message: &[u8]) -> Result<Digest32, DerivationError>;
}

/// Keccak-256 commitments with HMAC-SHA256 round derivation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeccakHmacProvider;

impl HashProvider for KeccakHmacProvider {
    fn digest(&self, data: &[u8]) -> Digest32 {
        keccak256(data)
    }

    fn hmac_digest(&self, key: &[u8], message: &[u8]) -> Result<Digest32, DerivationError> {
        hmac_sha256(key, message)
    }
}

impl<H: HashProvider + ?Sized> HashProvider for &H {
    fn digest(&self, data: &[u8]) -> Digest32 {
        (**self).digest(data)
    }

    fn hmac_digest(&self, key: &[u8], message: &[u8]) -> Result<Digest32, DerivationError> {
        (**self).hmac_digest(key, message)
    }
}

/// Keccak-256 of arbitrary data.
pub fn keccak256(data: &[u8]) -> Digest32 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// HMAC-SHA256 of `message` under `key`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<Digest32, DerivationError> {
    // HMAC accepts keys of any length; the error arm is kept for the trait contract.
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| DerivationError::InvalidKey)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().into())
}

// =============================================================================
// TESTS
// =============================================================================
