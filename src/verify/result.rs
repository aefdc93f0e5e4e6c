//! Verification API
//!
//! Combines the commitment check and the outcome reconstruction into a
//! single [`VerificationResult`]. Reconstruction always runs, even when
//! the seed does not match, so a caller can show what the revealed seed
//! would have produced.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::VerifierConfig;
use crate::core::hash::{HashProvider, KeccakHmacProvider};
use crate::verify::commitment::Commitment;
use crate::verify::input::{normalize_with, ValidationError, VerificationRequest};
use crate::verify::reconstruct::{reconstruct_with, Reconstruction};

/// Verification result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Did the revealed seed hash to the published commitment?
    pub seed_valid: bool,

    /// Selected index per round.
    pub outcome_indices: Vec<u32>,

    /// Number of rounds.
    pub round_count: usize,

    /// Sum of all round sizes.
    pub total_outcome_space: u64,

    /// Digest of the revealed seed (lowercase hex).
    pub computed_commitment: String,

    /// Rounds that fell back to index 0.
    pub fallback_rounds: Vec<usize>,
}

impl VerificationResult {
    /// Assemble a result from its parts.
    pub fn assemble(
        request: &VerificationRequest,
        computed: &Commitment,
        reconstruction: &Reconstruction,
    ) -> Self {
        let seed_valid = computed.as_hex() == request.commitment_hash();

        Self {
            seed_valid,
            outcome_indices: reconstruction.indices(),
            round_count: request.round_count(),
            total_outcome_space: request.round_config().iter().map(|&n| n as u64).sum(),
            computed_commitment: computed.as_hex().to_string(),
            fallback_rounds: reconstruction.fallback_rounds(),
        }
    }

    /// Seed is valid and no round needed a fallback.
    pub fn is_clean(&self) -> bool {
        self.seed_valid && self.fallback_rounds.is_empty()
    }
}

/// Verifier with an injected hash capability.
#[derive(Clone, Debug, Default)]
pub struct Verifier<H = KeccakHmacProvider> {
    provider: H,
    config: VerifierConfig,
}

impl Verifier<KeccakHmacProvider> {
    /// Create a verifier with the canonical provider.
    pub fn new(config: VerifierConfig) -> Self {
        Self::with_provider(KeccakHmacProvider, config)
    }
}

impl<H: HashProvider> Verifier<H> {
    /// Create a verifier with a custom provider.
    pub fn with_provider(provider: H, config: VerifierConfig) -> Self {
        Self { provider, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Normalize raw input under this verifier's policy.
    pub fn normalize(
        &self,
        raw_hash: &str,
        raw_seed: &str,
        raw_config: &str,
    ) -> Result<VerificationRequest, ValidationError> {
        normalize_with(raw_hash, raw_seed, raw_config, &self.config)
    }

    /// Verify a normalized request.
    pub fn verify(&self, request: &VerificationRequest) -> VerificationResult {
        self.verify_detailed(request).0
    }

    /// Verify and also return per-round diagnostics.
    pub fn verify_detailed(&self, request: &VerificationRequest) -> (VerificationResult, Reconstruction) {
        // The request seed is already validated hex.
        let computed = match Commitment::from_seed_with(&self.provider, request.seed()) {
            Ok(c) => c,
            Err(e) => {
                warn!("Seed failed to decode after normalization: {}", e);
                Commitment::new("")
            }
        };

        let reconstruction = reconstruct_with(
            &self.provider,
            request.seed(),
            request.round_config(),
            self.config.boundary_mode,
        );

        let result = VerificationResult::assemble(request, &computed, &reconstruction);

        debug!(
            "Verified {} rounds: seed_valid={} fallbacks={}",
            result.round_count,
            result.seed_valid,
            result.fallback_rounds.len()
        );

        (result, reconstruction)
    }

    /// Normalize and verify in one call.
    pub fn verify_raw(
        &self,
        raw_hash: &str,
        raw_seed: &str,
        raw_config: &str,
    ) -> Result<VerificationResult, ValidationError> {
        let request = self.normalize(raw_hash, raw_seed, raw_config)?;
        Ok(self.verify(&request))
    }
}

/// Verify a normalized request with the canonical provider and defaults.
pub fn verify(request: &VerificationRequest) -> VerificationResult {
    Verifier::new(VerifierConfig::default()).verify(request)
}

// =============================================================================
// TESTS
// =============================================================================
