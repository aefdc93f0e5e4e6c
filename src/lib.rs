//! # Fairplay Verifier
//!
//! Independent verification of commit-reveal game seeds.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    FAIRPLAY VERIFIER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                 │
//! │  ├── hex.rs      - Strict hex codec                         │
//! │  ├── hash.rs     - Keccak-256 / HMAC-SHA256 provider        │
//! │  └── rng.rs      - Per-round index derivation               │
//! │                                                             │
//! │  verify/         - Verification pipeline                    │
//! │  ├── input.rs    - Input normalization                      │
//! │  ├── commitment.rs - Commitment check                       │
//! │  ├── reconstruct.rs - Outcome reconstruction                │
//! │  ├── result.rs   - Result assembly                          │
//! │  └── report.rs   - Text / JSON export                       │
//! │                                                             │
//! │  config.rs       - Caller policy                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Every operation is a pure function of its inputs:
//! - No process-wide state
//! - No system time or randomness
//! - No I/O
//!
//! Given the same seed and round sizes, reconstruction produces
//! **identical indices** on any platform, and independent verifications
//! can run concurrently without locking.
//!
//! ## Example
//!
//! ```
//! use fairplay::{normalize, verify};
//!
//! let request = normalize(
//!     "0050c0bb1a7f44340fff58dc7250ec88a127ad18267a1cadbb0839d5d67566d8",
//!     "00ff",
//!     "10,10,10",
//! ).unwrap();
//!
//! let result = verify(&request);
//! assert!(result.seed_valid);
//! assert_eq!(result.outcome_indices, vec![4, 4, 2]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod verify;

// Re-export commonly used types
pub use crate::config::VerifierConfig;
pub use crate::core::hash::{HashProvider, KeccakHmacProvider};
pub use crate::core::hex::DecodingError;
pub use crate::core::rng::BoundaryMode;
pub use crate::verify::{
    normalize, reconstruct, verify, verify_commitment,
    ValidationError, VerificationRequest, VerificationResult, Verifier,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
