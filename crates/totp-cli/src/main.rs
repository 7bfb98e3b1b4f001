//! totp - print the current time-based one-time password for a shared secret.
//!
//! Thin front end over `totp-core`: it reads the clock and the secret, the
//! library does the rest.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use totp_core::{OtpAlgorithm, TotpGenerator, TotpParams, DEFAULT_EPOCH, DEFAULT_STEP};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod secret;

use secret::{decode_secret, SecretEncoding};

/// totp - RFC 6238 one-time password generator
// No `Debug`: the struct holds the raw secret.
#[derive(Parser)]
#[command(name = "totp")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Shared secret
    #[arg(short, long, env = "TOTP_SECRET", hide_env_values = true)]
    secret: String,

    /// Encoding of the secret
    #[arg(short, long, value_enum, env = "TOTP_ENCODING", default_value_t = SecretEncoding::Base32)]
    encoding: SecretEncoding,

    /// HMAC algorithm (sha1, sha256, sha512)
    #[arg(short, long, env = "TOTP_ALGORITHM", default_value_t = OtpAlgorithm::Sha1)]
    algorithm: OtpAlgorithm,

    /// Number of digits in the code (1-9)
    #[arg(short, long, env = "TOTP_DIGITS", default_value_t = 6)]
    digits: u8,

    /// Time step in seconds
    #[arg(long, env = "TOTP_STEP", default_value_t = DEFAULT_STEP)]
    step: u32,

    /// Unix time at which counting starts
    #[arg(long, env = "TOTP_EPOCH", default_value_t = DEFAULT_EPOCH, allow_hyphen_values = true)]
    epoch: i64,

    /// Unix time to generate the code for (defaults to now)
    #[arg(short, long, allow_hyphen_values = true)]
    time: Option<i64>,

    /// Print a JSON report instead of the bare code
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// Everything the CLI prints in `--json` mode.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct Report {
    code: String,
    counter: i64,
    seconds_remaining: u32,
    algorithm: OtpAlgorithm,
    digits: u8,
}

/// Current Unix time in whole seconds; negative if the clock is before 1970.
fn now() -> Result<i64> {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).context("system clock out of range"),
        Err(err) => {
            let before = i64::try_from(err.duration().as_secs())
                .context("system clock out of range")?;
            Ok(before.saturating_neg())
        }
    }
}

fn generate_report(cli: &Cli, key: &[u8], timestamp: i64) -> Result<Report> {
    let params = TotpParams::new(cli.step, cli.epoch).context("invalid time step")?;
    let generator =
        TotpGenerator::new(cli.algorithm, cli.digits, params).context("invalid TOTP settings")?;

    let counter = generator.counter_at(timestamp)?;
    let seconds_remaining = generator.seconds_remaining(timestamp)?;
    tracing::debug!(
        algorithm = %cli.algorithm,
        digits = cli.digits,
        step = params.step,
        epoch = params.epoch,
        timestamp,
        counter,
        "generating TOTP"
    );

    let code = generator
        .generate(key, timestamp)
        .context("TOTP generation failed")?;
    tracing::info!(counter, seconds_remaining, "code generated");

    Ok(Report {
        code,
        counter,
        seconds_remaining,
        algorithm: cli.algorithm,
        digits: cli.digits,
    })
}

fn run(cli: &Cli) -> Result<()> {
    let key = decode_secret(&cli.secret, cli.encoding)?;
    let timestamp = match cli.time {
        Some(time) => time,
        None => now()?,
    };

    let report = generate_report(cli, &key, timestamp)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.code);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    run(&cli)
}
