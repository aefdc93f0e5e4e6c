//! Fairplay Verify
//!
//! Command-line front end for the verifier. Prints a report on stdout and
//! logs on stderr.
//!
//! Exit status: 0 when the seed matches the commitment, 1 when it does
//! not, 2 when the input is rejected, 3 when the report cannot be produced.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fairplay::{
    config::{parse_boundary_mode, VerifierConfig},
    verify::{render_json, render_text},
    BoundaryMode, Verifier, VERSION,
};

/// Report format.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Process outcome, one exit status each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    /// Seed matches the commitment.
    Valid,
    /// Seed does not match the commitment.
    Invalid,
    /// Input failed normalization.
    Rejected,
    /// Internal failure after verification.
    Internal,
}

impl Outcome {
    fn exit_status(self) -> u8 {
        match self {
            Self::Valid => 0,
            Self::Invalid => 1,
            Self::Rejected => 2,
            Self::Internal => 3,
        }
    }
}

/// Verify a revealed seed against its published commitment and
/// reconstruct the outcome of every round.
#[derive(Debug, Parser)]
#[command(name = "fairplay-verify", version, about)]
struct Args {
    /// Published commitment hash (hex).
    #[arg(long, env = "FAIRPLAY_COMMITMENT")]
    commitment: String,

    /// Revealed seed (hex).
    #[arg(long, env = "FAIRPLAY_SEED")]
    seed: String,

    /// Comma-separated outcome space per round, e.g. "6,4,2,3".
    #[arg(long, env = "FAIRPLAY_ROUNDS")]
    rounds: String,

    /// Report format.
    #[arg(long, value_enum, default_value = "text", env = "FAIRPLAY_FORMAT")]
    format: OutputFormat,

    /// Boundary handling: clamp or unclamped. Falls back to
    /// FAIRPLAY_BOUNDARY_MODE.
    #[arg(long, value_parser = parse_boundary_arg)]
    boundary_mode: Option<BoundaryMode>,

    /// Drop round sizes above this value. Falls back to
    /// FAIRPLAY_MAX_OUTCOME_SPACE.
    #[arg(long)]
    max_outcome_space: Option<u32>,

    /// Reject inputs with more rounds than this. Falls back to
    /// FAIRPLAY_MAX_ROUNDS.
    #[arg(long)]
    max_rounds: Option<usize>,

    /// Log every round's digest and value.
    #[arg(long, env = "FAIRPLAY_DETAILED")]
    detailed: bool,
}

fn parse_boundary_arg(s: &str) -> Result<BoundaryMode, String> {
    parse_boundary_mode(s).ok_or_else(|| format!("unknown boundary mode {:?}", s))
}

impl Args {
    /// Environment config with command-line overrides.
    fn config(&self) -> VerifierConfig {
        let mut config = VerifierConfig::from_env();
        if let Some(mode) = self.boundary_mode {
            config.boundary_mode = mode;
        }
        if self.max_outcome_space.is_some() {
            config.max_outcome_space = self.max_outcome_space;
        }
        if self.max_rounds.is_some() {
            config.max_rounds = self.max_rounds;
        }
        config
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fairplay=info,fairplay_verify=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<Outcome> {
    let config = args.config();
    info!("Fairplay Verifier v{}", VERSION);
    info!("Boundary mode: {:?}", config.boundary_mode);

    let verifier = Verifier::new(config);

    let request = match verifier.normalize(&args.commitment, &args.seed, &args.rounds) {
        Ok(request) => request,
        Err(err) => {
            for message in err.messages() {
                eprintln!("error: {}", message);
            }
            return Ok(Outcome::Rejected);
        }
    };

    let (result, detail) = verifier.verify_detailed(&request);

    if args.detailed {
        for round in &detail.rounds {
            info!(
                "Round {}: digest={} value={} index={}/{}{}",
                round.round + 1,
                round.digest_hex.as_deref().unwrap_or("-"),
                round.value,
                round.index,
                round.outcome_space,
                if round.clamped { " (clamped)" } else { "" }
            );
        }
    }

    if !result.fallback_rounds.is_empty() {
        warn!("Rounds fell back to index 0: {:?}", result.fallback_rounds);
    }

    let report = match args.format {
        OutputFormat::Text => render_text(&request, &result),
        OutputFormat::Json => render_json(&request, &result).context("Failed to encode report")?,
    };
    println!("{}", report.trim_end());

    if result.seed_valid {
        info!("Seed matches commitment");
        Ok(Outcome::Valid)
    } else {
        warn!("Seed does NOT match commitment");
        Ok(Outcome::Invalid)
    }
}

/// Run and fold internal errors into their own status.
fn execute(args: &Args) -> Outcome {
    run(args).unwrap_or_else(|e| {
        error!("{:#}", e);
        Outcome::Internal
    })
}

fn main() -> ExitCode {
    init_logging();
    ExitCode::from(execute(&Args::parse()).exit_status())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "00ff";
    const COMMITMENT: &str = "0050c0bb1a7f44340fff58dc7250ec88a127ad18267a1cadbb0839d5d67566d8";

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["fairplay-verify"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_valid_seed_exits_zero() {
        let args = args(&["--commitment", COMMITMENT, "--seed", SEED, "--rounds", "10,10,10"]);
        let outcome = execute(&args);
        assert_eq!(outcome, Outcome::Valid);
        assert_eq!(outcome.exit_status(), 0);
    }

    #[test]
    fn test_forged_seed_exits_one() {
        let args = args(&["--commitment", COMMITMENT, "--seed", "00fe", "--rounds", "10,10,10"]);
        let outcome = execute(&args);
        assert_eq!(outcome, Outcome::Invalid);
        assert_eq!(outcome.exit_status(), 1);
    }

    #[test]
    fn test_malformed_seed_exits_two() {
        let args = args(&["--commitment", COMMITMENT, "--seed", "12g4", "--rounds", "10"]);
        let outcome = execute(&args);
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(outcome.exit_status(), 2);
    }

    #[test]
    fn test_json_format_keeps_status() {
        let args = args(&[
            "--commitment", COMMITMENT,
            "--seed", SEED,
            "--rounds", "2,3",
            "--format", "json",
            "--detailed",
        ]);
        assert_eq!(execute(&args), Outcome::Valid);
    }

    #[test]
    fn test_internal_status_distinct() {
        let statuses = [
            Outcome::Valid.exit_status(),
            Outcome::Invalid.exit_status(),
            Outcome::Rejected.exit_status(),
            Outcome::Internal.exit_status(),
        ];
        assert_eq!(statuses, [0, 1, 2, 3]);
    }

    #[test]
    fn test_flags_override_policy() {
        let args = args(&[
            "--commitment", COMMITMENT,
            "--seed", SEED,
            "--rounds", "2",
            "--boundary-mode", "unclamped",
            "--max-outcome-space", "10",
            "--max-rounds", "5",
        ]);
        let config = args.config();
        assert_eq!(config.boundary_mode, BoundaryMode::Unclamped);
        assert_eq!(config.max_outcome_space, Some(10));
        assert_eq!(config.max_rounds, Some(5));
    }

    #[test]
    fn test_unknown_boundary_mode_rejected_by_parser() {
        let argv = [
            "fairplay-verify", "--commitment", COMMITMENT, "--seed", SEED,
            "--rounds", "2", "--boundary-mode", "sometimes",
        ];
        assert!(Args::try_parse_from(argv).is_err());
    }
}
