//! Decoding of the shared secret supplied on the command line.
//!
//! Decoded bytes live in [`Zeroizing`] buffers and are never logged.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use data_encoding::{BASE32_NOPAD, HEXLOWER_PERMISSIVE};
use zeroize::Zeroizing;

/// Text encoding of the `--secret` value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SecretEncoding {
    /// RFC 4648 base32, as shown by most provisioning screens.
    #[default]
    Base32,
    /// Hexadecimal, either case.
    Hex,
    /// Raw bytes of the UTF-8 string.
    Ascii,
}

/// Decode `input` into key bytes.
///
/// Base32 input is case-insensitive; spaces, dashes and `=` padding are
/// ignored. Hex input may contain whitespace.
pub fn decode_secret(input: &str, encoding: SecretEncoding) -> Result<Zeroizing<Vec<u8>>> {
    let key = match encoding {
        SecretEncoding::Base32 => {
            let normalized: Zeroizing<String> = Zeroizing::new(
                input
                    .chars()
                    .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '='))
                    .map(|c| c.to_ascii_uppercase())
                    .collect(),
            );
            BASE32_NOPAD
                .decode(normalized.as_bytes())
                .context("secret is not valid base32")?
        }
        SecretEncoding::Hex => {
            let normalized: Zeroizing<String> =
                Zeroizing::new(input.chars().filter(|c| !c.is_whitespace()).collect());
            HEXLOWER_PERMISSIVE
                .decode(normalized.as_bytes())
                .context("secret is not valid hex")?
        }
        SecretEncoding::Ascii => input.as_bytes().to_vec(),
    };
    if key.is_empty() {
        bail!("secret decodes to zero bytes");
    }
    Ok(Zeroizing::new(key))
}
