//! RFC 6238 TOTP generation.
//!
//! `code = HOTP(key, (timestamp - epoch) / step)`, rendered as a zero-padded
//! decimal string of 1 to 9 digits. Every function here is pure: no clock,
//! no logging, no shared state.

use crate::algorithm::{HmacAlgorithm, OtpAlgorithm};
use crate::error::OtpError;
use crate::hotp::{check_digits, code_for_message};
use crate::params::TotpParams;

/// Default code width used by [`TotpGenerator::default`].
pub const DEFAULT_DIGITS: u8 = 6;

/// Generate a TOTP code with RFC 6238 defaults (`step = 30`, `epoch = 0`).
///
/// # Arguments
/// - `key`: shared secret bytes; empty keys are accepted
/// - `timestamp`: Unix time in seconds, may be negative
/// - `algorithm`: keyed digest to use
/// - `digits`: code width, 1 through 9
///
/// # Errors
/// See [`generate_totp_with`].
#[must_use = "OTP code should be used or stored"]
pub fn generate_totp<A>(
    key: &[u8],
    timestamp: i64,
    algorithm: &A,
    digits: u8,
) -> Result<String, OtpError>
where
    A: HmacAlgorithm + ?Sized,
{
    generate_totp_with(key, timestamp, algorithm, digits, &TotpParams::default())
}

/// Generate a TOTP code with explicit time-step parameters.
///
/// # Errors
/// - [`OtpError::InvalidLength`] if `digits` is outside `1..=9`; checked
///   before anything else
/// - [`OtpError::InvalidStep`] if `params.step` is 0
/// - [`OtpError::Serialization`] if the counter cannot be derived
/// - [`OtpError::DigestTooShort`] if `algorithm` yields a short tag
#[must_use = "OTP code should be used or stored"]
pub fn generate_totp_with<A>(
    key: &[u8],
    timestamp: i64,
    algorithm: &A,
    digits: u8,
    params: &TotpParams,
) -> Result<String, OtpError>
where
    A: HmacAlgorithm + ?Sized,
{
    check_digits(digits)?;
    let message = params.encode_counter(timestamp)?;
    code_for_message(key, &message, algorithm, digits)
}

/// A validated TOTP configuration: algorithm, width and time step.
///
/// Construction checks everything that can be checked without a key, so
/// [`generate`](Self::generate) only fails on counter overflow or a short
/// foreign digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TotpGenerator<A = OtpAlgorithm> {
    algorithm: A,
    digits: u8,
    params: TotpParams,
}

impl<A: HmacAlgorithm> TotpGenerator<A> {
    /// Build a generator.
    ///
    /// # Errors
    /// [`OtpError::InvalidLength`] or [`OtpError::InvalidStep`].
    pub fn new(algorithm: A, digits: u8, params: TotpParams) -> Result<Self, OtpError> {
        check_digits(digits)?;
        let params = TotpParams::new(params.step, params.epoch)?;
        Ok(Self {
            algorithm,
            digits,
            params,
        })
    }

    /// The keyed digest in use.
    pub const fn algorithm(&self) -> &A {
        &self.algorithm
    }

    /// Code width.
    pub const fn digits(&self) -> u8 {
        self.digits
    }

    /// Time-step parameters.
    pub const fn params(&self) -> &TotpParams {
        &self.params
    }

    /// Code for `key` at `timestamp`.
    ///
    /// # Errors
    /// [`OtpError::Serialization`] or [`OtpError::DigestTooShort`].
    #[must_use = "OTP code should be used or stored"]
    pub fn generate(&self, key: &[u8], timestamp: i64) -> Result<String, OtpError> {
        generate_totp_with(key, timestamp, &self.algorithm, self.digits, &self.params)
    }

    /// Counter in effect at `timestamp`.
    ///
    /// # Errors
    /// [`OtpError::Serialization`] on overflow.
    pub fn counter_at(&self, timestamp: i64) -> Result<i64, OtpError> {
        self.params.counter_at(timestamp)
    }

    /// Seconds the code at `timestamp` stays valid.
    ///
    /// # Errors
    /// [`OtpError::Serialization`] on overflow.
    pub fn seconds_remaining(&self, timestamp: i64) -> Result<u32, OtpError> {
        self.params.seconds_remaining(timestamp)
    }
}

impl Default for TotpGenerator<OtpAlgorithm> {
    fn default() -> Self {
        Self {
            algorithm: OtpAlgorithm::Sha1,
            digits: DEFAULT_DIGITS,
            params: TotpParams::default(),
        }
    }
}
