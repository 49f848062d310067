//! Whitespace-preserving stylesheet syntax tree for sheetlint.
//!
//! This crate turns stylesheet text into an arena-backed tree of rules,
//! at-rules, declarations and comments. Lint rules read the tree; nothing in
//! it is ever rewritten.
//!
//! - **Tree**: [`Stylesheet`] owns every [`Node`]; links are [`NodeId`] keys
//! - **Raws**: the exact whitespace before each node and before each closing brace
//! - **Spans**: 1-indexed start and end lines for every node
//! - **Walk**: depth-first traversal in document order
//!
//! # Example
//!
//! ```
//! use sheetlint_syntax::prelude::*;
//!
//! let sheet = parse(".card {\n  padding: 0;\n}\n")?;
//! for (_, node) in sheet.walk() {
//!     println!("{:?} at line {}", node.kind(), node.span.start_line);
//! }
//! # Ok::<(), sheetlint_syntax::Error>(())
//! ```

pub mod parser;
pub mod tree;

mod error;

pub use error::{Error, Result};
pub use parser::{parse, parse_file};
pub use tree::{Node, NodeData, NodeId, NodeKind, Raws, SourceSpan, Stylesheet, Walk};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::parser::{parse, parse_file};
    pub use crate::tree::{Node, NodeData, NodeId, NodeKind, Raws, SourceSpan, Stylesheet};
}
