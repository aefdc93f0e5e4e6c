//! Input Normalization
//!
//! Turns the three raw strings a caller collects (commitment, seed,
//! round sizes) into a [`VerificationRequest`] whose invariants the rest
//! of the verifier can rely on.
//!
//! Hex fields are strict. The round list is lenient: tokens that do not
//! parse as a positive integer are dropped. Every problem found is
//! reported at once.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::VerifierConfig;
use crate::core::hex;

/// Separator between round sizes in the raw round list.
pub const ROUND_LIST_SEPARATOR: char = ',';

// =============================================================================
// ERRORS
// =============================================================================

/// Which hex input a problem refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexField {
    /// The published commitment hash.
    Commitment,
    /// The revealed seed.
    Seed,
}

impl fmt::Display for HexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commitment => write!(f, "commitment hash"),
            Self::Seed => write!(f, "seed"),
        }
    }
}

/// A single problem found while normalizing input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationProblem {
    /// Field is empty after trimming.
    #[error("{0} is empty")]
    Empty(HexField),

    /// Field contains a non-hex character.
    #[error("{field} contains non-hexadecimal character {ch:?} at position {index}")]
    NonHex {
        /// Offending field.
        field: HexField,
        /// First offending character.
        ch: char,
        /// Character position after trimming.
        index: usize,
    },

    /// Field has an odd number of hex digits.
    #[error("{field} has odd length {len}")]
    OddLength {
        /// Offending field.
        field: HexField,
        /// Length after trimming.
        len: usize,
    },

    /// No usable round sizes remain.
    #[error("round configuration has no positive round sizes")]
    NoRounds,

    /// A typed round size was zero.
    #[error("round {round} has an outcome space of 0")]
    ZeroOutcomeSpace {
        /// Zero-based round index.
        round: usize,
    },

    /// A typed round size exceeds the configured cap.
    #[error("round {round} has outcome space {size}, above the limit of {max}")]
    OutcomeSpaceTooLarge {
        /// Zero-based round index.
        round: usize,
        /// Requested size.
        size: u32,
        /// Configured cap.
        max: u32,
    },

    /// More rounds than the configured cap.
    #[error("{count} rounds exceeds the limit of {max}")]
    TooManyRounds {
        /// Number of rounds supplied.
        count: usize,
        /// Configured cap.
        max: usize,
    },
}

/// Every problem found in one normalization pass.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}", join_problems(.problems))]
pub struct ValidationError {
    /// Problems in the order they were found.
    pub problems: Vec<ValidationProblem>,
}

impl ValidationError {
    /// Human-readable message per problem.
    pub fn messages(&self) -> Vec<String> {
        self.problems.iter().map(ToString::to_string).collect()
    }

    /// Check whether a specific problem was reported.
    pub fn contains(&self, problem: &ValidationProblem) -> bool {
        self.problems.contains(problem)
    }
}

fn join_problems(problems: &[ValidationProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// REQUEST
// =============================================================================

/// A validated verification request.
///
/// Both hex fields are trimmed, lowercased, non-empty, even-length hex.
/// The round list is non-empty and every size is at least 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRequest")]
pub struct VerificationRequest {
    commitment_hash: String,
    seed: String,
    round_config: Vec<u32>,
}

/// Unchecked request shape, used for deserialization.
#[derive(Deserialize)]
struct RawRequest {
    commitment_hash: String,
    seed: String,
    round_config: Vec<u32>,
}

impl TryFrom<RawRequest> for VerificationRequest {
    type Error = ValidationError;

    fn try_from(raw: RawRequest) -> Result<Self, Self::Error> {
        Self::new(&raw.commitment_hash, &raw.seed, raw.round_config)
    }
}

impl VerificationRequest {
    /// Build a request from already-typed parts.
    ///
    /// Unlike [`normalize`], zero round sizes are reported rather than
    /// dropped.
    pub fn new(
        commitment_hash: &str,
        seed: &str,
        round_config: Vec<u32>,
    ) -> Result<Self, ValidationError> {
        Self::new_with(commitment_hash, seed, round_config, &VerifierConfig::default())
    }

    /// Build a request from typed parts under a caller policy.
    pub fn new_with(
        commitment_hash: &str,
        seed: &str,
        round_config: Vec<u32>,
        config: &VerifierConfig,
    ) -> Result<Self, ValidationError> {
        let mut problems = Vec::new();

        let commitment_hash = check_hex(HexField::Commitment, commitment_hash, &mut problems);
        let seed = check_hex(HexField::Seed, seed, &mut problems);

        if round_config.is_empty() {
            problems.push(ValidationProblem::NoRounds);
        }
        for (round, &size) in round_config.iter().enumerate() {
            if size == 0 {
                problems.push(ValidationProblem::ZeroOutcomeSpace { round });
            } else if let Some(max) = config.max_outcome_space.filter(|max| size > *max) {
                problems.push(ValidationProblem::OutcomeSpaceTooLarge { round, size, max });
            }
        }
        check_round_count(round_config.len(), config, &mut problems);

        match (commitment_hash, seed) {
            (Some(commitment_hash), Some(seed)) if problems.is_empty() => Ok(Self {
                commitment_hash,
                seed,
                round_config,
            }),
            _ => Err(ValidationError { problems }),
        }
    }

    /// Canonical (lowercase) commitment hash.
    pub fn commitment_hash(&self) -> &str {
        &self.commitment_hash
    }

    /// Canonical (lowercase) seed.
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Outcome space size per round.
    pub fn round_config(&self) -> &[u32] {
        &self.round_config
    }

    /// Number of rounds.
    pub fn round_count(&self) -> usize {
        self.round_config.len()
    }
}

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Normalize raw caller input with no policy caps.
///
/// `raw_config` is a comma-separated list of round sizes; tokens that are
/// not positive integers are dropped.
pub fn normalize(
    raw_hash: &str,
    raw_seed: &str,
    raw_config: &str,
) -> Result<VerificationRequest, ValidationError> {
    normalize_with(raw_hash, raw_seed, raw_config, &VerifierConfig::default())
}

/// Normalize raw caller input under a caller policy.
///
/// Round sizes above `config.max_outcome_space` are dropped like
/// malformed tokens. Exceeding `config.max_rounds` is a problem.
pub fn normalize_with(
    raw_hash: &str,
    raw_seed: &str,
    raw_config: &str,
    config: &VerifierConfig,
) -> Result<VerificationRequest, ValidationError> {
    let mut problems = Vec::new();

    let commitment_hash = check_hex(HexField::Commitment, raw_hash, &mut problems);
    let seed = check_hex(HexField::Seed, raw_seed, &mut problems);

    let round_config: Vec<u32> = parse_round_list(raw_config)
        .into_iter()
        .filter(|&size| config.accepts_outcome_space(size))
        .collect();

    if round_config.is_empty() {
        problems.push(ValidationProblem::NoRounds);
    }
    check_round_count(round_config.len(), config, &mut problems);

    match (commitment_hash, seed) {
        (Some(commitment_hash), Some(seed)) if problems.is_empty() => Ok(VerificationRequest {
            commitment_hash,
            seed,
            round_config,
        }),
        _ => Err(ValidationError { problems }),
    }
}

/// Parse a comma-separated round list, keeping positive integers only.
pub fn parse_round_list(raw: &str) -> Vec<u32> {
    raw.split(ROUND_LIST_SEPARATOR)
        .filter_map(|token| token.trim().parse::<u32>().ok())
        .filter(|&size| size >= 1)
        .collect()
}

/// Validate one hex field, returning its canonical form when valid.
fn check_hex(field: HexField, raw: &str, problems: &mut Vec<ValidationProblem>) -> Option<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        problems.push(ValidationProblem::Empty(field));
        return None;
    }

    if let Some((index, ch)) = hex::first_invalid_char(trimmed) {
        problems.push(ValidationProblem::NonHex { field, ch, index });
        return None;
    }

    if trimmed.len() % 2 != 0 {
        problems.push(ValidationProblem::OddLength {
            field,
            len: trimmed.len(),
        });
        return None;
    }

    Some(hex::canonical(trimmed))
}

fn check_round_count(count: usize, config: &VerifierConfig, problems: &mut Vec<ValidationProblem>) {
    if let Some(max) = config.max_rounds.filter(|max| count > *max) {
        problems.push(ValidationProblem::TooManyRounds { count, max });
    }
}

// =============================================================================
// TESTS
// =============================================================================
