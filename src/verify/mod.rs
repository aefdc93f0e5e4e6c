//! Verification Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    VERIFICATION                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  input.rs        - Raw input normalization                  │
//! │  commitment.rs   - Seed vs. published commitment            │
//! │  reconstruct.rs  - Per-round outcome reconstruction         │
//! │  result.rs       - Result assembly, Verifier                │
//! │  report.rs       - Text / JSON export                       │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod input;
pub mod commitment;
pub mod reconstruct;
pub mod result;
pub mod report;

// Re-export key types
pub use input::{
    normalize, normalize_with, parse_round_list,
    HexField, ValidationError, ValidationProblem, VerificationRequest,
};
pub use commitment::{verify_commitment, commitment_of, Commitment};
pub use reconstruct::{
    reconstruct, reconstruct_detailed, reconstruct_with,
    Reconstruction, RoundOutcome,
};
pub use result::{verify, VerificationResult, Verifier};
pub use report::{render_json, render_text, VerificationReport};
