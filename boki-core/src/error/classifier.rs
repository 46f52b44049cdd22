//! Pattern-based classification of storage-layer failures
//!
//! Storage failures arrive as unstructured text. Classification is a pure,
//! case-insensitive substring match over a fixed rule list where the first
//! matching rule wins. Lock contention and missing schema are checked before
//! the generic syntax rule so they are never shadowed by it.

use super::codes::StorageCode;
use super::severity::Severity;

/// Result of classifying a storage failure message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub code: StorageCode,
    pub severity: Severity,
}

/// A single classification rule: lowercase needle and its outcome
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub pattern: &'static str,
    pub code: StorageCode,
    pub severity: Severity,
}

/// Lowercase text of a lock contention failure; the only retryable storage failure
pub const LOCK_PATTERN: &str = "database is locked";

/// Rules in priority order
pub const RULES: &[ClassificationRule] = &[
    ClassificationRule {
        pattern: LOCK_PATTERN,
        code: StorageCode::Locked,
        severity: Severity::Critical,
    },
    ClassificationRule {
        pattern: "foreign key",
        code: StorageCode::ForeignKeyViolation,
        severity: Severity::High,
    },
    ClassificationRule {
        pattern: "no such table",
        code: StorageCode::TableNotFound,
        severity: Severity::Critical,
    },
    ClassificationRule {
        pattern: "syntax",
        code: StorageCode::SyntaxError,
        severity: Severity::Medium,
    },
];

/// Outcome when no rule matches
pub const FALLBACK: Classification = Classification {
    code: StorageCode::General,
    severity: Severity::High,
};

/// Keywords marking a generic failure as storage-related
pub const STORAGE_KEYWORDS: &[&str] = &["database", "sqlite", "sql", "table"];

/// Map a raw storage message to a code and severity
pub fn classify(raw_message: &str) -> Classification {
    let haystack = raw_message.to_lowercase();
    RULES
        .iter()
        .find(|rule| haystack.contains(rule.pattern))
        .map(|rule| Classification {
            code: rule.code,
            severity: rule.severity,
        })
        .unwrap_or(FALLBACK)
}

/// Whether a generic failure message mentions the storage layer
pub fn is_storage_related(raw_message: &str) -> bool {
    let haystack = raw_message.to_lowercase();
    STORAGE_KEYWORDS.iter().any(|kw| haystack.contains(kw))
}

/// Whether a message signals transient lock contention
pub fn is_lock_contention(raw_message: &str) -> bool {
    raw_message.to_lowercase().contains(LOCK_PATTERN)
}
