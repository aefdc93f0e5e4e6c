//! Outcome Reconstruction
//!
//! Re-derives the outcome index of every round from a revealed seed.
//! Rounds are independent: round `i` depends only on the seed, `i` and
//! its own outcome space.
//!
//! A round whose derivation fails falls back to index 0. The fallback is
//! logged and recorded so callers and tests can see it; it never aborts
//! the other rounds.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::hash::{HashProvider, KeccakHmacProvider};
use crate::core::hex;
use crate::core::rng::{derive_round, BoundaryMode};

/// Diagnostic record for one reconstructed round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Zero-based round number.
    pub round: usize,
    /// Number of selectable positions.
    pub outcome_space: u32,
    /// Keyed digest as 64 hex chars. None on fallback.
    pub digest_hex: Option<String>,
    /// Leading 32 bits of the digest (0 on fallback).
    pub value: u32,
    /// Selected zero-based index.
    pub index: u32,
    /// Boundary clamp was applied.
    pub clamped: bool,
    /// Derivation failed and index 0 was substituted.
    pub fallback: bool,
}

impl RoundOutcome {
    fn fallback(round: usize, outcome_space: u32) -> Self {
        Self {
            round,
            outcome_space,
            digest_hex: None,
            value: 0,
            index: 0,
            clamped: false,
            fallback: true,
        }
    }
}

/// Full per-round reconstruction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconstruction {
    /// One record per configured round, in order.
    pub rounds: Vec<RoundOutcome>,
}

impl Reconstruction {
    /// Selected indices, one per round.
    pub fn indices(&self) -> Vec<u32> {
        self.rounds.iter().map(|r| r.index).collect()
    }

    /// Rounds that fell back to index 0.
    pub fn fallback_rounds(&self) -> Vec<usize> {
        self.rounds
            .iter()
            .filter(|r| r.fallback)
            .map(|r| r.round)
            .collect()
    }

    /// Rounds where the boundary clamp was applied.
    pub fn clamped_rounds(&self) -> Vec<usize> {
        self.rounds
            .iter()
            .filter(|r| r.clamped)
            .map(|r| r.round)
            .collect()
    }
}

/// Reconstruct the selected index of every round.
///
/// The result has one entry per element of `round_config` and each
/// entry is below its round's size.
pub fn reconstruct(seed_hex: &str, round_config: &[u32]) -> Vec<u32> {
    reconstruct_detailed(seed_hex, round_config).indices()
}

/// Reconstruct with per-round diagnostics.
pub fn reconstruct_detailed(seed_hex: &str, round_config: &[u32]) -> Reconstruction {
    reconstruct_with(&KeccakHmacProvider, seed_hex, round_config, BoundaryMode::default())
}

/// Reconstruct with an explicit provider and boundary mode.
pub fn reconstruct_with<H: HashProvider>(
    provider: &H,
    seed_hex: &str,
    round_config: &[u32],
    mode: BoundaryMode,
) -> Reconstruction {
    let seed = hex::canonical(seed_hex);

    let rounds = round_config
        .iter()
        .enumerate()
        .map(|(round, &outcome_space)| {
            match derive_round(provider, &seed, round, outcome_space, mode) {
                Ok(derived) => {
                    debug!(
                        "Round {}: value={:#010x} space={} index={}{}",
                        round,
                        derived.value,
                        outcome_space,
                        derived.index,
                        if derived.clamped { " (clamped)" } else { "" }
                    );
                    RoundOutcome {
                        round,
                        outcome_space,
                        digest_hex: Some(hex::encode(&derived.digest)),
                        value: derived.value,
                        index: derived.index,
                        clamped: derived.clamped,
                        fallback: false,
                    }
                }
                Err(e) => {
                    warn!("Round {} derivation failed, using index 0: {}", round, e);
                    RoundOutcome::fallback(round, outcome_space)
                }
            }
        })
        .collect();

    Reconstruction { rounds }
}

// =============================================================================
// TESTS
// =============================================================================
