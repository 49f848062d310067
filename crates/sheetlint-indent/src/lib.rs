//! Indentation rule for sheetlint.
//!
//! The rule infers the indentation level every node of a stylesheet should
//! have and reports each line whose leading whitespace differs:
//!
//! - **Levels**: tree depth, optionally flattened for nested blocks
//! - **Hierarchical selectors**: flat sibling rules nested by selector prefix
//! - **Whitespace checks**: before nodes, before closing braces, and inside
//!   multi-line selectors and values
//! - **Watch mode**: re-check files as they change (`watch` feature)
//!
//! Every check builds its own hierarchy state, so checking the same tree twice
//! gives the same result and unrelated stylesheets never influence each other.
//!
//! # Example
//!
//! ```
//! use sheetlint_indent::prelude::*;
//!
//! let options = IndentationOptions::new(IndentSize::Tab).without_exceptions();
//! let rule = Indentation::new(options);
//!
//! let violations = rule.check_source("a {\n\tcolor: red;\n }\n")?;
//! assert_eq!(violations[0].message, "Expected indentation of 0 tabs at line 3");
//! # Ok::<(), sheetlint_indent::Error>(())
//! ```

pub mod hierarchy;
pub mod level;
pub mod options;
pub mod resolver;
pub mod rule;
pub mod unit;
pub mod validate;

#[cfg(feature = "watch")]
pub mod watch;

mod error;

pub use error::{Error, Result};
pub use hierarchy::{HierarchyEntry, HierarchyMap};
pub use options::{Exception, IndentSize, IndentationOptions};
pub use rule::{Indentation, RULE_NAME, Reporter, Violation};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::options::{Exception, IndentSize, IndentationOptions};
    pub use crate::rule::{Indentation, Reporter, Violation};
    pub use sheetlint_syntax::{NodeId, Stylesheet, parse};

    #[cfg(feature = "watch")]
    pub use crate::watch::IndentationWatcher;
}
