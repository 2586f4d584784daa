//! Option loading from files and the environment.
//!
//! Only one test in this binary touches `QUXDIFF_VARIANT_THRESHOLD`, so the
//! process-wide environment is not raced.

use quxdiff_core::{CompareOptions, QuxError, VARIANT_THRESHOLD_ENV};
use tempfile::tempdir;

#[test]
fn toml_file_overrides_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("quxdiff.toml");
    std::fs::write(&path, "variant_threshold = 0.5\n").expect("write config");

    let options = CompareOptions::from_toml_file(&path).expect("load config");
    assert_eq!(options.variant_threshold, 0.5);
    assert!(options.validate().is_ok());
}

#[test]
fn missing_toml_file_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = CompareOptions::from_toml_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, QuxError::Io(_)));
}

#[test]
fn out_of_range_file_value_fails_validation() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("quxdiff.toml");
    std::fs::write(&path, "variant_threshold = 1.5\n").expect("write config");

    let options = CompareOptions::from_toml_file(&path).expect("parse still succeeds");
    assert!(matches!(
        options.validate(),
        Err(QuxError::InvalidVariantThreshold(t)) if t == 1.5
    ));
}

#[test]
fn environment_overrides_file_value() {
    std::env::set_var(VARIANT_THRESHOLD_ENV, "0.8");
    let options = CompareOptions::default()
        .with_variant_threshold(0.5)
        .with_env_overrides()
        .expect("env override");
    assert_eq!(options.variant_threshold, 0.8);

    std::env::set_var(VARIANT_THRESHOLD_ENV, "not-a-number");
    let err = CompareOptions::default().with_env_overrides().unwrap_err();
    assert!(matches!(err, QuxError::Config(_)));

    std::env::remove_var(VARIANT_THRESHOLD_ENV);
    let options = CompareOptions::default()
        .with_env_overrides()
        .expect("no override");
    assert_eq!(options, CompareOptions::default());
}
