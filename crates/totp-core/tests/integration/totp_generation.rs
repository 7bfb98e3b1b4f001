//! Integration tests for the TOTP generator: configuration, window
//! boundaries, pluggable digests and concurrent use.

use std::thread;

use ring::hmac;
use totp_core::{
    generate_totp, generate_totp_with, HmacAlgorithm, OtpAlgorithm, OtpError, TotpGenerator,
    TotpParams,
};

const SECRET_20: &[u8] = b"12345678901234567890";

/// Codes are stable across a whole 30-second window and change at its edge.
#[test]
fn window_boundaries() {
    let start = 1_700_000_010i64;
    let code = generate_totp(SECRET_20, start, &OtpAlgorithm::Sha1, 6).expect("generate");
    for offset in 0..30 {
        let again =
            generate_totp(SECRET_20, start + offset, &OtpAlgorithm::Sha1, 6).expect("generate");
        assert_eq!(code, again, "code changed inside the window at +{offset}");
    }
    let params = TotpParams::default();
    assert_ne!(
        params.counter_at(start).unwrap(),
        params.counter_at(start + 30).unwrap()
    );
}

/// A generator built from deserialized configuration matches the free
/// function with the same parameters.
#[test]
fn generator_from_config() {
    let params: TotpParams = serde_json::from_str(r#"{"step":60,"epoch":-3600}"#).unwrap();
    let algorithm: OtpAlgorithm = serde_json::from_str(r#""sha256""#).unwrap();
    let generator = TotpGenerator::new(algorithm, 8, params).unwrap();

    let time = 1_700_000_000;
    assert_eq!(
        generator.generate(SECRET_20, time).unwrap(),
        generate_totp_with(SECRET_20, time, &OtpAlgorithm::Sha256, 8, &params).unwrap()
    );
    assert_eq!(generator.counter_at(time).unwrap(), (time + 3600) / 60);
}

/// A digest not known to the crate plugs in through the trait.
struct CountingSha384;

impl HmacAlgorithm for CountingSha384 {
    type Digest = hmac::Tag;

    fn sign(&self, key: &[u8], message: &[u8]) -> hmac::Tag {
        hmac::sign(&hmac::Key::new(hmac::HMAC_SHA384, key), message)
    }
}

#[test]
fn foreign_algorithm_plugs_in() {
    let custom = generate_totp(SECRET_20, 59, &CountingSha384, 8).unwrap();
    let ring = generate_totp(SECRET_20, 59, &hmac::HMAC_SHA384, 8).unwrap();
    assert_eq!(custom, ring);
}

#[test]
fn trait_objects_are_supported() {
    let algorithms: [&dyn HmacAlgorithm<Digest = hmac::Tag>; 3] = [
        &OtpAlgorithm::Sha1,
        &OtpAlgorithm::Sha256,
        &OtpAlgorithm::Sha512,
    ];
    for algorithm in algorithms {
        let code = generate_totp(SECRET_20, 59, algorithm, 6).unwrap();
        assert_eq!(code.len(), 6);
    }
}

/// Different algorithms give different codes for the same inputs.
#[test]
fn algorithms_are_distinguished() {
    let codes: Vec<String> = OtpAlgorithm::ALL
        .iter()
        .map(|a| generate_totp(SECRET_20, 1_234_567_890, a, 6).unwrap())
        .collect();
    assert_eq!(codes, ["005924", "829826", "671578"]);
}

/// Invalid input yields an error and nothing else.
#[test]
fn errors_carry_no_partial_code() {
    let result = generate_totp(SECRET_20, 59, &OtpAlgorithm::Sha1, 10);
    assert_eq!(result, Err(OtpError::InvalidLength { digits: 10 }));

    let params = TotpParams::new(30, 1).unwrap();
    let result = generate_totp_with(SECRET_20, i64::MIN, &OtpAlgorithm::Sha1, 6, &params);
    assert!(matches!(result, Err(OtpError::Serialization(_))));
}

/// Concurrent callers sharing a generator and a key never interfere.
#[test]
fn concurrent_generation_is_consistent() {
    let generator = TotpGenerator::new(OtpAlgorithm::Sha1, 8, TotpParams::default()).unwrap();
    let expected: Vec<String> = (0..64)
        .map(|i| generator.generate(SECRET_20, i * 30).unwrap())
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    (0..64)
                        .map(|i| generator.generate(SECRET_20, i * 30).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
