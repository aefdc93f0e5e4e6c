//! Core deterministic primitives.
//!
//! Pure functions only: no I/O, no clocks, no process-wide state.
//! Everything the verifier computes is built from these.

pub mod hex;
pub mod hash;
pub mod rng;

// Re-export core types
pub use self::hex::DecodingError;
pub use self::hash::{Digest32, HashProvider, KeccakHmacProvider, keccak256, hmac_sha256};
pub use self::rng::{BoundaryMode, DerivationError, RoundDerivation, derive_round, index_from_value};
