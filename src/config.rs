//! Verifier Configuration
//!
//! Caller policy that sits on top of the algorithm. None of these change
//! how a round is derived; they only restrict what input is accepted and
//! how the single boundary value is reported.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::rng::BoundaryMode;

/// Verifier configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Treatment of the value that maps exactly to `1.0`.
    #[serde(default)]
    pub boundary_mode: BoundaryMode,

    /// Largest accepted outcome space per round. If None, any positive
    /// size is accepted.
    #[serde(default)]
    pub max_outcome_space: Option<u32>,

    /// Largest accepted number of rounds. If None, unlimited.
    #[serde(default)]
    pub max_rounds: Option<usize>,
}

impl VerifierConfig {
    /// Create config from environment variables.
    ///
    /// - `FAIRPLAY_BOUNDARY_MODE`: `clamp` or `unclamped`
    /// - `FAIRPLAY_MAX_OUTCOME_SPACE`: positive integer
    /// - `FAIRPLAY_MAX_ROUNDS`: positive integer
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self {
            boundary_mode: std::env::var("FAIRPLAY_BOUNDARY_MODE")
                .ok()
                .and_then(|v| parse_env("FAIRPLAY_BOUNDARY_MODE", &v, parse_boundary_mode))
                .unwrap_or_default(),
            max_outcome_space: std::env::var("FAIRPLAY_MAX_OUTCOME_SPACE")
                .ok()
                .and_then(|v| parse_env("FAIRPLAY_MAX_OUTCOME_SPACE", &v, parse_positive)),
            max_rounds: std::env::var("FAIRPLAY_MAX_ROUNDS")
                .ok()
                .and_then(|v| parse_env("FAIRPLAY_MAX_ROUNDS", &v, parse_positive)),
        }
    }

    /// Policy used by the original web UI: 1 to 10 positions per round.
    pub fn web_ui() -> Self {
        Self {
            max_outcome_space: Some(10),
            ..Self::default()
        }
    }

    /// Check whether an outcome space passes the configured cap.
    #[inline]
    pub fn accepts_outcome_space(&self, size: u32) -> bool {
        size >= 1 && self.max_outcome_space.map_or(true, |max| size <= max)
    }
}

/// Parse a boundary mode name (case-insensitive).
pub fn parse_boundary_mode(s: &str) -> Option<BoundaryMode> {
    match s.trim().to_ascii_lowercase().as_str() {
        "clamp" | "strict" => Some(BoundaryMode::Clamp),
        "unclamped" | "raw" => Some(BoundaryMode::Unclamped),
        _ => None,
    }
}

fn parse_positive<T>(s: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    s.trim().parse::<T>().ok().filter(|v| *v > T::default())
}

fn parse_env<T>(name: &str, raw: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let parsed = parse(raw);
    if parsed.is_none() {
        warn!("Ignoring invalid {}={:?}", name, raw);
    }
    parsed
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VerifierConfig::default();
        assert_eq!(config.boundary_mode, BoundaryMode::Clamp);
        assert_eq!(config.max_outcome_space, None);
        assert_eq!(config.max_rounds, None);
        assert!(config.accepts_outcome_space(1));
        assert!(config.accepts_outcome_space(u32::MAX));
        assert!(!config.accepts_outcome_space(0));
    }

    #[test]
    fn test_web_ui_policy() {
        let config = VerifierConfig::web_ui();
        assert!(config.accepts_outcome_space(10));
        assert!(!config.accepts_outcome_space(11));
    }

    #[test]
    fn test_parse_boundary_mode() {
        assert_eq!(parse_boundary_mode("clamp"), Some(BoundaryMode::Clamp));
        assert_eq!(parse_boundary_mode(" UNCLAMPED "), Some(BoundaryMode::Unclamped));
        assert_eq!(parse_boundary_mode("sometimes"), None);
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive::<u32>("10"), Some(10));
        assert_eq!(parse_positive::<u32>("0"), None);
        assert_eq!(parse_positive::<usize>("-1"), None);
        assert_eq!(parse_positive::<usize>("ten"), None);
    }

    #[test]
    fn test_config_serde() {
        let json = r#"{"boundary_mode":"unclamped","max_outcome_space":10}"#;
        let config: VerifierConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.boundary_mode, BoundaryMode::Unclamped);
        assert_eq!(config.max_outcome_space, Some(10));
        assert_eq!(config.max_rounds, None);
    }

    #[test]
    fn test_from_env_reads_and_ignores_invalid() {
        // Only test in this crate that touches these variables.
        std::env::set_var("FAIRPLAY_BOUNDARY_MODE", "Unclamped");
        std::env::set_var("FAIRPLAY_MAX_OUTCOME_SPACE", "10");
        std::env::set_var("FAIRPLAY_MAX_ROUNDS", "bogus");

        let config = VerifierConfig::from_env();

        std::env::remove_var("FAIRPLAY_BOUNDARY_MODE");
        std::env::remove_var("FAIRPLAY_MAX_OUTCOME_SPACE");
        std::env::remove_var("FAIRPLAY_MAX_ROUNDS");

        assert_eq!(config.boundary_mode, BoundaryMode::Unclamped);
        assert_eq!(config.max_outcome_space, Some(10));
        assert_eq!(config.max_rounds, None);

        assert_eq!(VerifierConfig::from_env(), VerifierConfig::default());
    }
}
