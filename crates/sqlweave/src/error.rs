//! Error types for sqlweave

use crate::condition::ConditionSlot;
use thiserror::Error;

/// Result type alias for sqlweave operations
pub type WeaveResult<T> = Result<T, WeaveError>;

/// Errors raised while escaping values or assembling statements
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeaveError {
    /// An enumerated argument (match mode, UNION modifier, join type, ...) was not recognized
    #[error("Invalid argument for {argument}: '{value}' (expected {expected})")]
    InvalidArgument {
        argument: &'static str,
        value: String,
        expected: &'static str,
    },

    /// `end_group` was called on a slot with no open group
    #[error("Unbalanced group: no open group to close in {slot}")]
    UnbalancedGroup { slot: ConditionSlot },

    /// Groups were left open at validation time
    #[error("Unclosed group: {depth} group(s) still open in {slot}")]
    UnclosedGroup { slot: ConditionSlot, depth: usize },

    /// Identifier, collation or charset name that cannot be escaped safely
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The dialect cannot express the requested construct
    #[error("Unsupported by {dialect}: {message}")]
    Unsupported {
        dialect: &'static str,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WeaveError {
    /// Create an invalid argument error
    pub fn invalid_argument(
        argument: &'static str,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidArgument {
            argument,
            value: value.into(),
            expected,
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier(message.into())
    }

    /// Create an unsupported-construct error
    pub fn unsupported(dialect: &'static str, message: impl Into<String>) -> Self {
        Self::Unsupported {
            dialect,
            message: message.into(),
        }
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if this is a group balance error (either direction)
    pub fn is_group_error(&self) -> bool {
        matches!(
            self,
            Self::UnbalancedGroup { .. } | Self::UnclosedGroup { .. }
        )
    }
}

impl From<toml::de::Error> for WeaveError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
