//! Error types for the syntax tree.

use std::path::PathBuf;

use crate::tree::NodeId;

/// Result type alias for syntax operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading a stylesheet tree.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The tokenizer reported an error of its own.
    ///
    /// This happens only if a block is left with unread tokens. The statement
    /// loops read every block to its end, so no stylesheet text, valid or
    /// not, produces this variant; seeing it means the parser itself is broken.
    #[error("CSS parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: u32,
        column: u32,
    },

    /// A node id that does not belong to this stylesheet.
    #[error("Unknown node {0:?}")]
    UnknownNode(NodeId),

    /// File I/O error.
    #[error("Failed to read stylesheet '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a parse error.
    pub fn parse(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
