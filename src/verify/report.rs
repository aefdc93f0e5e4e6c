//! Result Export
//!
//! Renders a verification as plain text or JSON. Pure functions: the
//! caller decides whether the text goes to a terminal, a file or a
//! clipboard.

use std::fmt::Write as _;

use serde::Serialize;

use crate::verify::input::VerificationRequest;
use crate::verify::result::VerificationResult;

/// Document written by [`render_json`].
#[derive(Debug, Serialize)]
pub struct VerificationReport<'a> {
    /// Crate version that produced the report.
    pub verifier_version: &'static str,
    /// The normalized input.
    pub request: &'a VerificationRequest,
    /// The outcome.
    pub result: &'a VerificationResult,
}

impl<'a> VerificationReport<'a> {
    /// Pair a request with its result.
    pub fn new(request: &'a VerificationRequest, result: &'a VerificationResult) -> Self {
        Self {
            verifier_version: crate::VERSION,
            request,
            result,
        }
    }
}

/// Status word shown for a result.
pub fn status_label(result: &VerificationResult) -> &'static str {
    if result.seed_valid {
        "VALID"
    } else {
        "INVALID"
    }
}

/// Plain-text summary, one line per round.
pub fn render_text(request: &VerificationRequest, result: &VerificationResult) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "Seed verification: {}", status_label(result));
    let _ = writeln!(out, "Seed:                  {}", request.seed());
    let _ = writeln!(out, "Published commitment:  {}", request.commitment_hash());
    let _ = writeln!(out, "Computed commitment:   {}", result.computed_commitment);
    let _ = writeln!(
        out,
        "Rounds: {} (total outcome space {})",
        result.round_count, result.total_outcome_space
    );

    for (round, (index, size)) in result
        .outcome_indices
        .iter()
        .zip(request.round_config())
        .enumerate()
    {
        let marker = if result.fallback_rounds.contains(&round) {
            " [fallback]"
        } else {
            ""
        };
        let _ = writeln!(out, "Round {}: {}/{}{}", round + 1, index, size, marker);
    }

    if !result.seed_valid {
        let _ = writeln!(
            out,
            "Warning: seed does not match the commitment; outcomes above are for inspection only."
        );
    }

    out
}

/// Pretty-printed JSON report.
pub fn render_json(
    request: &VerificationRequest,
    result: &VerificationResult,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&VerificationReport::new(request, result))
}

// =============================================================================
// TESTS
// =============================================================================
