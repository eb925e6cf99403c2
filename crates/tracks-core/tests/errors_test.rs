//! Tests for error codes and the fatal/transient split.

use tracks_core::errors::{ConfigError, TracksError, TracksErrorCode};

#[test]
fn every_variant_has_a_stable_code() {
    let cases = [
        (TracksError::invalid_argument("name", "empty"), "INVALID_ARGUMENT"),
        (TracksError::persistence("disk full"), "PERSISTENCE_FAILURE"),
        (TracksError::corruption("bad page"), "STORAGE_CORRUPTION"),
        (
            TracksError::from(ConfigError::FileNotFound {
                path: "tracks.toml".into(),
            }),
            "CONFIG_ERROR",
        ),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code);
    }
}

#[test]
fn only_corruption_is_fatal() {
    assert!(TracksError::corruption("x").is_fatal());
    assert!(!TracksError::persistence("x").is_fatal());
    assert!(!TracksError::invalid_argument("f", "x").is_fatal());
}

#[test]
fn messages_carry_context() {
    let err = TracksError::invalid_argument("anonymous_username", "must not be empty");
    assert_eq!(
        err.to_string(),
        "invalid argument `anonymous_username`: must not be empty"
    );
    assert_eq!(
        TracksError::persistence("disk full").coded_string(),
        "[PERSISTENCE_FAILURE] persistence failure: disk full"
    );
}
