//! Error conversion implementations for BokiError

use super::types::BokiError;

impl From<toml::de::Error> for BokiError {
    fn from(err: toml::de::Error) -> Self {
        BokiError::TomlError(Box::new(err))
    }
}
