//! Error types for the WisePick activity.

use crate::budget::format_won;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire activity.
///
/// Every variant is recoverable: the session never dies on an error, the
/// caller surfaces the message and stays on (or returns to) an interactive
/// screen.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WisepickError {
    /// Empty or malformed user input. Blocks the transition inline; no
    /// service call is made.
    #[error("{0}")]
    Validation(String),

    /// Network or parse failure from the generation service. The phase that
    /// initiated the call is restored and confirmed session data is kept.
    #[error("Service error: {message}")]
    Service { message: String },

    /// Summary image capture failed. The share screen stays intact and the
    /// user may retry.
    #[error("Export error: {0}")]
    Export(String),

    /// Blocking advisory raised when the price criterion gets the maximum
    /// score on an alternative the budget cannot cover. The rating is not
    /// applied.
    #[error("{}", nudge_message(.alternative, .price, .budget, .overage))]
    Nudge {
        alternative: String,
        price: u32,
        budget: u32,
        overage: u32,
    },

    /// An operation was invoked from a phase that does not allow it.
    #[error("'{operation}' is not allowed in phase {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WisepickError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Service error
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    /// Creates an Export error
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates an InvalidPhase error
    pub fn invalid_phase(operation: &'static str, phase: impl Into<String>) -> Self {
        Self::InvalidPhase {
            operation,
            phase: phase.into(),
        }
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Service error
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    /// Check if this is a Nudge advisory
    pub fn is_nudge(&self) -> bool {
        matches!(self, Self::Nudge { .. })
    }

    /// Check if this is an Export error
    pub fn is_export(&self) -> bool {
        matches!(self, Self::Export(_))
    }
}

/// The advisory text shown when a student rates price 5/5 on an alternative
/// the budget cannot cover.
fn nudge_message(alternative: &str, price: &u32, budget: &u32, overage: &u32) -> String {
    format!(
        "어? 🤔\n\n\"{alternative}\"은 {}인데,\n가진 돈은 {}이야.\n\n예산을 {}이나 초과했는데\n가격 점수가 만점이라고?\n\n다시 한번 생각해볼까? 💭",
        format_won(*price),
        format_won(*budget),
        format_won(*overage),
    )
}

impl From<serde_json::Error> for WisepickError {
    fn from(err: serde_json::Error) -> Self {
        Self::Service {
            message: format!("JSON parse error: {err}"),
        }
    }
}

/// A type alias for `Result<T, WisepickError>`.
pub type Result<T> = std::result::Result<T, WisepickError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nudge_message_quotes_name_and_exact_overage() {
        let err = WisepickError::Nudge {
            alternative: "프리미엄 필통".to_string(),
            price: 12_000,
            budget: 8_000,
            overage: 4_000,
        };
        let text = err.to_string();
        assert!(text.contains("\"프리미엄 필통\""));
        assert!(text.contains("12,000원"));
        assert!(text.contains("8,000원"));
        assert!(text.contains("4,000원이나 초과"));
    }

    #[test]
    fn json_errors_map_to_service() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: WisepickError = parse_err.into();
        assert!(err.is_service());
    }
}
