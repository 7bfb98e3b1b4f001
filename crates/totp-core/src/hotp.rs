//! RFC 4226 HOTP: HMAC over a moving counter, dynamic truncation and
//! decimal formatting. TOTP reuses every stage here with a time-derived
//! counter.

use crate::algorithm::HmacAlgorithm;
use crate::error::OtpError;

/// Shortest code width accepted.
pub const MIN_DIGITS: u8 = 1;

/// Longest code width accepted. A 31-bit value reduced modulo 10^9 never
/// needs more.
pub const MAX_DIGITS: u8 = 9;

const TRUNCATION_MODULUS: u32 = 1_000_000_000;

/// Width of the canonical zero-padded rendering before the suffix is taken.
const PADDED_WIDTH: usize = 10;

/// Reject widths outside `MIN_DIGITS..=MAX_DIGITS`.
///
/// # Errors
/// Returns [`OtpError::InvalidLength`].
pub const fn check_digits(digits: u8) -> Result<u8, OtpError> {
    if digits < MIN_DIGITS || digits > MAX_DIGITS {
        return Err(OtpError::InvalidLength { digits });
    }
    Ok(digits)
}

/// Dynamic truncation (RFC 4226 §5.3).
///
/// The low nibble of the last byte picks a 4-byte window; its top bit is
/// cleared so the result is a non-negative 31-bit integer.
///
/// # Errors
/// Returns [`OtpError::DigestTooShort`] if the window runs past the end of
/// `digest` (including an empty digest).
pub fn dynamic_truncate(digest: &[u8]) -> Result<u32, OtpError> {
    let too_short = || OtpError::DigestTooShort { len: digest.len() };
    let last = digest.last().ok_or_else(too_short)?;
    let offset = usize::from(last & 0x0F);
    let window: [u8; 4] = offset
        .checked_add(4)
        .and_then(|end| digest.get(offset..end))
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(too_short)?;
    Ok(u32::from_be_bytes(window) & 0x7FFF_FFFF)
}

/// Render a truncated value as a `digits`-wide decimal code.
///
/// The value is reduced modulo 10^9, zero-padded to ten characters and the
/// rightmost `digits` characters are kept.
///
/// # Errors
/// Returns [`OtpError::InvalidLength`] if `digits` is out of range.
pub fn format_code(bin_code: u32, digits: u8) -> Result<String, OtpError> {
    let width = usize::from(check_digits(digits)?);
    // Modulus is a non-zero constant.
    #[allow(clippy::arithmetic_side_effects)]
    let truncated = bin_code % TRUNCATION_MODULUS;
    let padded = format!("{truncated:010}");
    let start = PADDED_WIDTH.saturating_sub(width);
    Ok(padded[start..].to_owned())
}

/// HMAC the 8-byte counter message, truncate and format.
pub(crate) fn code_for_message<A>(
    key: &[u8],
    message: &[u8; 8],
    algorithm: &A,
    digits: u8,
) -> Result<String, OtpError>
where
    A: HmacAlgorithm + ?Sized,
{
    let digest = algorithm.sign(key, message);
    let bin_code = dynamic_truncate(digest.as_ref())?;
    format_code(bin_code, digits)
}

/// Generate an HOTP code per RFC 4226.
///
/// # Arguments
/// - `key`: shared secret bytes; any length, including empty
/// - `counter`: moving factor, hashed as 8 big-endian bytes
/// - `algorithm`: keyed digest to use
/// - `digits`: code width, 1 through 9
///
/// # Errors
/// [`OtpError::InvalidLength`] for a bad width, [`OtpError::DigestTooShort`]
/// if `algorithm` produces a tag too short to truncate.
#[must_use = "OTP code should be used or stored"]
pub fn generate_hotp<A>(
    key: &[u8],
    counter: u64,
    algorithm: &A,
    digits: u8,
) -> Result<String, OtpError>
where
    A: HmacAlgorithm + ?Sized,
{
    check_digits(digits)?;
    code_for_message(key, &counter.to_be_bytes(), algorithm, digits)
}
