//! Strict Hex Codec
//!
//! Seeds and commitments travel as hex text. Decoding is strict:
//! every character must be a hex digit and the length must be even.
//! Nothing is stripped or repaired.

use thiserror::Error;

/// Errors from decoding a hex string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodingError {
    /// Input was empty.
    #[error("hex string is empty")]
    Empty,

    /// Input has an odd number of characters.
    #[error("hex string has odd length {len}")]
    OddLength {
        /// Length of the offending input.
        len: usize,
    },

    /// Input contains a non-hex character.
    #[error("invalid hex character {ch:?} at position {index}")]
    InvalidCharacter {
        /// The offending character.
        ch: char,
        /// Character position in the input.
        index: usize,
    },
}

/// Check whether every character is a hex digit.
///
/// Returns `false` for the empty string.
#[inline]
pub fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Position and value of the first non-hex character, if any.
pub fn first_invalid_char(s: &str) -> Option<(usize, char)> {
    s.chars()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_hexdigit())
}

/// Decode a hex string into bytes, high nibble first.
///
/// Mixed case is accepted.
pub fn decode(s: &str) -> Result<Vec<u8>, DecodingError> {
    if s.is_empty() {
        return Err(DecodingError::Empty);
    }

    // Report the character error first so the position is meaningful
    // even for odd-length input.
    if let Some((index, ch)) = first_invalid_char(s) {
        return Err(DecodingError::InvalidCharacter { ch, index });
    }

    if s.len() % 2 != 0 {
        return Err(DecodingError::OddLength { len: s.len() });
    }

    hex::decode(s).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => {
            DecodingError::InvalidCharacter { ch: c, index }
        }
        // OddLength is ruled out above; InvalidStringLength only comes
        // from decode_to_slice.
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
            DecodingError::OddLength { len: s.len() }
        }
    })
}

/// Encode bytes as lowercase hex.
#[inline]
pub fn encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Canonical textual form of a hex string: trimmed and lowercased.
///
/// Does not validate; pair with [`decode`] or [`is_hex`].
#[inline]
pub fn canonical(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

// =============================================================================
// TESTS
// =============================================================================
