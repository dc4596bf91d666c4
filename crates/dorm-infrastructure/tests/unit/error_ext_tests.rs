//! Error extension tests

use dorm_domain::error::{Error, Result};
use dorm_infrastructure::error_ext::{ErrorContext, to_domain_error};
use std::io;

#[test]
fn test_io_context_keeps_source() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read mapping");

    match result {
        Err(Error::Io { message, source }) => {
            assert!(message.contains("failed to read mapping"));
            assert!(source.is_some());
        }
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn test_config_context_is_configuration_error() {
    let result: Result<()> = Err(io::Error::other("bad toml")).config_context("Failed to extract");
    let err = result.unwrap_err();
    assert!(err.is_configuration_error());
    assert!(err.to_string().contains("Failed to extract"));
}

#[test]
fn test_db_context_is_database_error() {
    let result: Result<()> = Err(io::Error::other("refused")).db_context("connect");
    assert!(matches!(result, Err(Error::Database { .. })));
}

#[test]
fn test_with_context_is_lazy() {
    let ok: std::result::Result<u8, io::Error> = Ok(1);
    let called = std::cell::Cell::new(false);
    let value = ok
        .with_context(|| {
            called.set(true);
            "unused"
        })
        .unwrap();
    assert_eq!(value, 1);
    assert!(!called.get());
}

#[test]
fn test_to_domain_error() {
    let err = to_domain_error(io::Error::other("boom"), "while testing");
    assert!(matches!(err, Error::Internal { .. }));
    assert!(err.to_string().contains("while testing"));
}
