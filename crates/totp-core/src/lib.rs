//! `totp-core`: RFC 6238 TOTP and RFC 4226 HOTP code generation.
//!
//! A pure, stateless engine: no I/O, no clock, no logging, no globals.
//! Callers supply the key, the Unix timestamp, the keyed digest and the code
//! width; reading clocks, storing secrets and checking submitted codes are
//! left to the caller.
//!
//! ```
//! use totp_core::{generate_totp, OtpAlgorithm};
//!
//! let code = generate_totp(b"12345678901234567890", 59, &OtpAlgorithm::Sha1, 8)?;
//! assert_eq!(code, "94287082");
//! # Ok::<(), totp_core::OtpError>(())
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod algorithm;
pub mod error;
pub mod hotp;
pub mod params;
pub mod totp;

pub use algorithm::{HmacAlgorithm, OtpAlgorithm};
pub use error::OtpError;
pub use hotp::{generate_hotp, MAX_DIGITS, MIN_DIGITS};
pub use params::{TotpParams, DEFAULT_EPOCH, DEFAULT_STEP};
pub use totp::{generate_totp, generate_totp_with, TotpGenerator, DEFAULT_DIGITS};
