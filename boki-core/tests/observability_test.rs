//! Global subscriber installation
//!
//! Lives in its own test binary because it installs the process-wide
//! tracing subscriber.

use boki_core::config::LoggingConfig;
use boki_core::observability::init_tracing;
use boki_core::ErrorDispatcher;

#[test]
fn test_repeated_init_is_harmless() {
    let config = LoggingConfig {
        format: "json".to_string(),
        ..Default::default()
    };

    assert!(init_tracing(&config).unwrap());
    assert!(!init_tracing(&config).unwrap());
    assert!(!init_tracing(&LoggingConfig::default()).unwrap());

    // Dispatching through the installed JSON layer must not panic
    let error = ErrorDispatcher::new().handle("database is locked", None);
    assert_eq!(error.code(), "DB_LOCKED");
}
