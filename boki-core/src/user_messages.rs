//! Localized, user-safe display text for classified errors

use crate::error::{codes, AppError};

pub const FALLBACK_MESSAGE: &str = "予期しないエラーが発生しました。";

/// Message to show the end user for `error`, keyed on its code only
pub fn user_friendly_message(error: &AppError) -> &'static str {
    message_for_code(error.code())
}

pub fn message_for_code(code: &str) -> &'static str {
    match code {
        codes::DB_LOCKED => "データベースが使用中です。しばらく待ってから再試行してください。",
        codes::DB_TABLE_NOT_FOUND => "データベースの設定に問題があります。アプリを再起動してください。",
        codes::DB_FK_VIOLATION => "データの整合性に問題があります。",
        codes::VALIDATION_ERROR => "入力内容に問題があります。",
        codes::BUSINESS_LOGIC_ERROR => "処理を完了できませんでした。",
        _ => FALLBACK_MESSAGE,
    }
}

impl AppError {
    pub fn user_message(&self) -> &'static str {
        user_friendly_message(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorContext, RawFailure, Severity};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_storage_codes() {
        let locked = AppError::storage("x", &RawFailure::new("database is locked"), ErrorContext::new());
        assert_eq!(
            locked.user_message(),
            "データベースが使用中です。しばらく待ってから再試行してください。"
        );

        let missing = AppError::storage("x", &RawFailure::new("no such table: t"), ErrorContext::new());
        assert_eq!(
            missing.user_message(),
            "データベースの設定に問題があります。アプリを再起動してください。"
        );

        let fk = AppError::storage(
            "x",
            &RawFailure::new("FOREIGN KEY constraint failed"),
            ErrorContext::new(),
        );
        assert_eq!(fk.user_message(), "データの整合性に問題があります。");
    }

    #[test]
    fn test_validation_and_business_rule() {
        let v = AppError::validation("bad", "amount", "positive", ErrorContext::new());
        assert_eq!(user_friendly_message(&v), "入力内容に問題があります。");

        let b = AppError::business_rule_default("unbalanced", ErrorContext::new());
        assert_eq!(user_friendly_message(&b), "処理を完了できませんでした。");
    }

    #[test]
    fn test_unmapped_codes_fall_back() {
        let syntax = AppError::storage("x", &RawFailure::new("syntax error"), ErrorContext::new());
        assert_eq!(syntax.user_message(), FALLBACK_MESSAGE);

        let general = AppError::builder("boom")
            .code("GENERAL_ERROR")
            .severity(Severity::Medium)
            .build();
        assert_eq!(general.user_message(), FALLBACK_MESSAGE);

        // Custom business codes are not in the table
        let custom = AppError::business_rule("closed", "PERIOD_CLOSED", ErrorContext::new());
        assert_eq!(custom.user_message(), FALLBACK_MESSAGE);

        assert_eq!(message_for_code(""), FALLBACK_MESSAGE);
    }
}
