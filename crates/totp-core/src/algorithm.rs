//! Keyed-digest capability used by the OTP engine.
//!
//! The engine never switches on a concrete hash: it only needs something
//! that turns `(key, message)` into an HMAC tag. [`OtpAlgorithm`] covers the
//! three RFC 6238 algorithms; any `ring::hmac::Algorithm` (for instance
//! `HMAC_SHA384`) can be passed directly, and foreign implementations only
//! have to implement [`HmacAlgorithm`].

use std::fmt;
use std::str::FromStr;

use ring::hmac;
use serde::{Deserialize, Serialize};

use crate::error::OtpError;

/// Something that produces an HMAC over arbitrary-length keys.
///
/// # Digest length
///
/// Dynamic truncation reads four bytes at an offset of up to 15, so the tag
/// must be at least 19 bytes long. Shorter tags are rejected with
/// [`OtpError::DigestTooShort`] rather than read out of bounds.
pub trait HmacAlgorithm: Send + Sync {
    /// The raw tag type.
    type Digest: AsRef<[u8]>;

    /// Compute `HMAC(key, message)`.
    fn sign(&self, key: &[u8], message: &[u8]) -> Self::Digest;
}

impl HmacAlgorithm for hmac::Algorithm {
    type Digest = hmac::Tag;

    fn sign(&self, key: &[u8], message: &[u8]) -> hmac::Tag {
        let key = hmac::Key::new(*self, key);
        hmac::sign(&key, message)
    }
}

/// HMAC algorithm used for OTP generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtpAlgorithm {
    /// HMAC-SHA1 (RFC 4226 default, used by most authenticator apps).
    #[default]
    Sha1,
    /// HMAC-SHA256.
    Sha256,
    /// HMAC-SHA512.
    Sha512,
}

impl OtpAlgorithm {
    /// All built-in algorithms.
    pub const ALL: [Self; 3] = [Self::Sha1, Self::Sha256, Self::Sha512];

    /// Map to the corresponding `ring::hmac::Algorithm`.
    #[must_use]
    pub const fn to_ring_algorithm(self) -> hmac::Algorithm {
        match self {
            Self::Sha1 => hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Self::Sha256 => hmac::HMAC_SHA256,
            Self::Sha512 => hmac::HMAC_SHA512,
        }
    }

    /// Canonical upper-case name as used in `otpauth` parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}

impl HmacAlgorithm for OtpAlgorithm {
    type Digest = hmac::Tag;

    fn sign(&self, key: &[u8], message: &[u8]) -> hmac::Tag {
        self.to_ring_algorithm().sign(key, message)
    }
}

impl fmt::Display for OtpAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OtpAlgorithm {
    type Err = OtpError;

    /// Accepts `sha1`, `SHA-256`, `Sha512` and similar spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(OtpError::UnknownAlgorithm(s.to_owned())),
        }
    }
}
