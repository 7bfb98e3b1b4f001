//! Error types for `totp-core`.

use thiserror::Error;

/// Errors produced by one-time password generation.
///
/// No variant ever carries key material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OtpError {
    /// Requested code width is outside `MIN_DIGITS..=MAX_DIGITS`.
    #[error("digit length {digits} out of range (expected 1..=9)")]
    InvalidLength {
        /// The rejected width.
        digits: u8,
    },

    /// The moving counter could not be derived or encoded as 8 bytes.
    #[error("counter serialization failed: {0}")]
    Serialization(String),

    /// Time step of zero seconds.
    #[error("time step must be > 0")]
    InvalidStep,

    /// HMAC output too short for dynamic truncation.
    #[error("digest of {len} bytes is too short for dynamic truncation")]
    DigestTooShort {
        /// Length of the offending digest.
        len: usize,
    },

    /// Algorithm name not recognised.
    #[error("unknown HMAC algorithm: {0}")]
    UnknownAlgorithm(String),
}
