//! Machine-stable error codes
//!
//! Codes are plain strings so callers can introduce their own business-rule
//! codes. The storage codes form a closed set, modelled by [`StorageCode`].

use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
pub const GENERAL_ERROR: &str = "GENERAL_ERROR";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const BUSINESS_LOGIC_ERROR: &str = "BUSINESS_LOGIC_ERROR";

pub const DB_LOCKED: &str = "DB_LOCKED";
pub const DB_FK_VIOLATION: &str = "DB_FK_VIOLATION";
pub const DB_TABLE_NOT_FOUND: &str = "DB_TABLE_NOT_FOUND";
pub const DB_SYNTAX_ERROR: &str = "DB_SYNTAX_ERROR";
pub const DB_GENERAL_ERROR: &str = "DB_GENERAL_ERROR";

/// The codes a Storage Error may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageCode {
    #[serde(rename = "DB_LOCKED")]
    Locked,
    #[serde(rename = "DB_FK_VIOLATION")]
    ForeignKeyViolation,
    #[serde(rename = "DB_TABLE_NOT_FOUND")]
    TableNotFound,
    #[serde(rename = "DB_SYNTAX_ERROR")]
    SyntaxError,
    #[serde(rename = "DB_GENERAL_ERROR")]
    General,
}

impl StorageCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageCode::Locked => DB_LOCKED,
            StorageCode::ForeignKeyViolation => DB_FK_VIOLATION,
            StorageCode::TableNotFound => DB_TABLE_NOT_FOUND,
            StorageCode::SyntaxError => DB_SYNTAX_ERROR,
            StorageCode::General => DB_GENERAL_ERROR,
        }
    }
}

impl fmt::Display for StorageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
