//! Error types for the indentation rule.

use sheetlint_syntax::NodeId;

/// Result type alias for indentation checks.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the indentation rule.
///
/// Indentation mismatches are never errors; they are reported as
/// [`Violation`](crate::Violation)s.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failure while parsing or reading the stylesheet.
    #[error(transparent)]
    Syntax(#[from] sheetlint_syntax::Error),

    /// Invalid configuration value.
    #[error("Invalid value for option '{option}': {message}")]
    InvalidOption { option: String, message: String },

    /// The tree handed to the rule breaks its structural contract.
    #[error("Malformed tree at node {node:?}: {message}")]
    MalformedTree { node: NodeId, message: String },

    /// File watcher error.
    #[cfg(feature = "watch")]
    #[error("Watch error: {0}")]
    Watch(String),
}

impl Error {
    /// Create an option error.
    pub fn invalid_option(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }

    /// Create a malformed-tree error.
    pub fn malformed(node: NodeId, message: impl Into<String>) -> Self {
        Self::MalformedTree {
            node,
            message: message.into(),
        }
    }
}
