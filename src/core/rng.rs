//! Deterministic Round Derivation
//!
//! Maps `(seed, round, outcome_space)` to a single index with no hidden
//! state. Given the same seed, produces identical indices on every platform.
//!
//! ```text
//! message = "<seed_hex>:<round>"
//! digest  = HMAC-SHA256(key = seed_hex, message)
//! value   = u32 from digest[0..4], big-endian
//! index   = floor(value / 0xFFFFFFFF * outcome_space)
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::hash::{Digest32, HashProvider};

/// Divisor used to map a round value onto `[0, 1]`.
///
/// This is `2^32 - 1`, not `2^32`; stored outcomes depend on it.
pub const UNIT_DIVISOR: f64 = u32::MAX as f64;

/// Separator between seed and round number in the round message.
pub const ROUND_SEPARATOR: char = ':';

/// How to treat the one value that maps exactly to `1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Clamp the index to `outcome_space - 1`.
    #[default]
    Clamp,
    /// Return the raw floor, which equals `outcome_space` when
    /// `value == u32::MAX`.
    Unclamped,
}

/// Errors deriving a single round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    /// Round has no selectable positions.
    #[error("round {round} has an empty outcome space")]
    EmptyOutcomeSpace {
        /// Zero-based round index.
        round: usize,
    },

    /// The MAC rejected the key.
    #[error("invalid HMAC key")]
    InvalidKey,
}

/// Everything derived for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundDerivation {
    /// Full keyed digest.
    pub digest: Digest32,
    /// Leading 32 bits of the digest.
    pub value: u32,
    /// Selected index.
    pub index: u32,
    /// Whether the boundary clamp changed the index.
    pub clamped: bool,
}

/// Build the message for a round: `"<seed_hex>:<round>"`.
#[inline]
pub fn round_message(seed_hex: &str, round: usize) -> String {
    format!("{}{}{}", seed_hex, ROUND_SEPARATOR, round)
}

/// Leading 32 bits of a digest, most significant byte first.
///
/// Equivalent to parsing the first 8 hex characters of the digest.
#[inline]
pub fn leading_u32(digest: &Digest32) -> u32 {
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Map a round value onto the unit interval `[0, 1]`.
#[inline]
pub fn unit_interval(value: u32) -> f64 {
    value as f64 / UNIT_DIVISOR
}

/// Map a round value to an index in `[0, outcome_space)`.
///
/// Returns the index and whether it was clamped. With
/// [`BoundaryMode::Unclamped`] the result can equal `outcome_space`.
///
/// `outcome_space` must be at least 1.
pub fn index_from_value(value: u32, outcome_space: u32, mode: BoundaryMode) -> (u32, bool) {
    debug_assert!(outcome_space >= 1);

    // f64 holds every u32 exactly and the product stays below 2^64.
    let raw = (unit_interval(value) * outcome_space as f64).floor() as u32;

    match mode {
        BoundaryMode::Clamp if raw >= outcome_space => (outcome_space.saturating_sub(1), true),
        _ => (raw, false),
    }
}

/// Derive the index for a single round.
///
/// `seed_hex` must already be canonical (lowercase); it is used both as
/// the HMAC key and as the message prefix.
pub fn derive_round<H: HashProvider>(
    provider: &H,
    seed_hex: &str,
    round: usize,
    outcome_space: u32,
    mode: BoundaryMode,
) -> Result<RoundDerivation, DerivationError> {
    if outcome_space == 0 {
        return Err(DerivationError::EmptyOutcomeSpace { round });
    }

    let message = round_message(seed_hex, round);
    let digest = provider.hmac_digest(seed_hex.as_bytes(), message.as_bytes())?;
    let value = leading_u32(&digest);
    let (index, clamped) = index_from_value(value, outcome_space, mode);

    Ok(RoundDerivation {
        digest,
        value,
        index,
        clamped,
    })
}

// =============================================================================
// TESTS
// =============================================================================
