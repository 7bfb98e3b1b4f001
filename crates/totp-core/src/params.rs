//! Time-step configuration (RFC 6238 §4).
//!
//! [`TotpParams`] maps a Unix timestamp onto the moving counter fed to HOTP:
//! `T = (timestamp - epoch) / step`, truncating toward zero. The defaults are
//! the RFC values (`step = 30`, `epoch = 0`); both are plain data so tests and
//! non-standard deployments can inject their own without shared state.

use serde::{Deserialize, Serialize};

use crate::error::OtpError;

/// Default time step in seconds (RFC 6238 §4).
pub const DEFAULT_STEP: u32 = 30;

/// Default epoch offset `T0` in Unix seconds (RFC 6238 §4).
pub const DEFAULT_EPOCH: i64 = 0;

/// Time-step parameters.
///
/// Fields are public for serde and struct-literal construction; every
/// operation re-checks `step != 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TotpParams {
    /// Length of one time step in seconds.
    pub step: u32,
    /// Unix time at which counting starts.
    pub epoch: i64,
}

impl Default for TotpParams {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            epoch: DEFAULT_EPOCH,
        }
    }
}

impl TotpParams {
    /// Build a validated parameter set.
    ///
    /// # Errors
    /// Returns [`OtpError::InvalidStep`] if `step` is 0.
    pub const fn new(step: u32, epoch: i64) -> Result<Self, OtpError> {
        if step == 0 {
            return Err(OtpError::InvalidStep);
        }
        Ok(Self { step, epoch })
    }

    fn step_i64(&self) -> Result<i64, OtpError> {
        if self.step == 0 {
            return Err(OtpError::InvalidStep);
        }
        Ok(i64::from(self.step))
    }

    fn elapsed(&self, timestamp: i64) -> Result<i64, OtpError> {
        timestamp.checked_sub(self.epoch).ok_or_else(|| {
            OtpError::Serialization(format!(
                "timestamp {timestamp} minus epoch {} overflows i64",
                self.epoch
            ))
        })
    }

    /// Counter for `timestamp`.
    ///
    /// Division truncates toward zero, so timestamps just before the epoch
    /// share counter 0 with those just after it. Negative counters are valid.
    ///
    /// # Errors
    /// [`OtpError::InvalidStep`] for a zero step, [`OtpError::Serialization`]
    /// if `timestamp - epoch` overflows.
    pub fn counter_at(&self, timestamp: i64) -> Result<i64, OtpError> {
        let step = self.step_i64()?;
        let elapsed = self.elapsed(timestamp)?;
        // step is in 1..=u32::MAX, so neither zero nor -1.
        elapsed
            .checked_div(step)
            .ok_or_else(|| OtpError::Serialization(format!("cannot divide {elapsed} by {step}")))
    }

    /// Counter for `timestamp` as the 8-byte big-endian two's-complement
    /// message that gets HMACed.
    ///
    /// # Errors
    /// Same as [`Self::counter_at`].
    pub fn encode_counter(&self, timestamp: i64) -> Result<[u8; 8], OtpError> {
        self.counter_at(timestamp).map(i64::to_be_bytes)
    }

    /// Seconds until the counter next changes, in `1..=step`.
    ///
    /// # Errors
    /// Same as [`Self::counter_at`].
    pub fn seconds_remaining(&self, timestamp: i64) -> Result<u32, OtpError> {
        let step = self.step_i64()?;
        let elapsed = self.elapsed(timestamp)?;
        let into_step = elapsed.rem_euclid(step);
        #[allow(clippy::arithmetic_side_effects)]
        // 0 <= into_step < step <= u32::MAX
        let remaining = step - into_step;
        u32::try_from(remaining)
            .map_err(|_| OtpError::Serialization(format!("remaining {remaining} exceeds u32")))
    }
}
