//! Tests for error conversions
//!
//! Checks that the From implementations let the `?` operator carry foreign
//! errors into BokiError and Failure.

use crate::error::{BokiError, Failure};

#[test]
fn test_toml_error_conversion() {
    fn parse() -> Result<toml::Value, BokiError> {
        let value = toml::from_str::<toml::Value>("not = [valid")?;
        Ok(value)
    }

    assert!(matches!(parse(), Err(BokiError::TomlError(_))));
}

#[test]
fn test_from_many() {
    assert!(BokiError::from_many("config", vec![]).is_ok());

    let single = BokiError::from_many(
        "config",
        vec![BokiError::invalid_operation("validate", "nothing to report")],
    );
    assert!(matches!(single, Err(BokiError::InvalidOperation { .. })));

    let many = BokiError::from_many(
        "config",
        vec![
            BokiError::configuration("a", "bad"),
            BokiError::configuration("b", "worse"),
        ],
    )
    .unwrap_err();
    let rendered = many.to_string();
    assert!(rendered.contains("1. Configuration error in a: bad"));
    assert!(rendered.contains("2. Configuration error in b: worse"));
}

#[test]
fn test_question_mark_into_failure() {
    fn storage_call() -> Result<(), Failure> {
        let io: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "sqlite: disk I/O error",
        ));
        io?;
        Ok(())
    }

    let failure = storage_call().unwrap_err();
    assert!(!failure.is_classified());
    assert_eq!(failure.message(), "sqlite: disk I/O error");
}
