//! Rule configuration.

use std::collections::BTreeSet;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::{Error, Result};

const DEFAULT_SPACES: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(n) => n,
    None => unreachable!(),
};

/// Width of one indentation level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndentSize {
    /// A fixed number of space characters per level.
    Spaces(NonZeroUsize),
    /// Exactly one tab character per level.
    Tab,
}

impl IndentSize {
    /// Space indentation; zero is rejected.
    pub fn spaces(count: usize) -> Result<Self> {
        NonZeroUsize::new(count)
            .map(Self::Spaces)
            .ok_or_else(|| Error::invalid_option("indent", "space count must be positive"))
    }

    /// The whitespace for a single level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(count) => " ".repeat(count.get()),
            Self::Tab => "\t".to_string(),
        }
    }

    /// Singular name of the unit used in messages.
    pub fn unit_name(&self) -> &'static str {
        match self {
            Self::Spaces(_) => "space",
            Self::Tab => "tab",
        }
    }
}

impl Default for IndentSize {
    fn default() -> Self {
        Self::Spaces(DEFAULT_SPACES)
    }
}

impl FromStr for IndentSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("tab") {
            return Ok(Self::Tab);
        }
        let count = s.parse::<usize>().map_err(|_| {
            Error::invalid_option("indent", format!("expected \"tab\" or a positive integer, got '{s}'"))
        })?;
        Self::spaces(count)
    }
}

impl fmt::Display for IndentSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spaces(count) => write!(f, "{count}"),
            Self::Tab => write!(f, "tab"),
        }
    }
}

/// Situations where the expected level deviates from plain tree depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Exception {
    /// Rules and at-rules sit flush with their parent instead of one level deeper.
    Block,
    /// Continuation lines of multi-line values sit at the declaration's level.
    Value,
}

impl Exception {
    /// Configuration keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Value => "value",
        }
    }
}

impl FromStr for Exception {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "block" => Ok(Self::Block),
            "value" => Ok(Self::Value),
            other => Err(Error::invalid_option(
                "except",
                format!("unknown exception '{other}', expected \"block\" or \"value\""),
            )),
        }
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for the indentation rule.
///
/// # Example
///
/// ```
/// use sheetlint_indent::{Exception, IndentSize, IndentationOptions};
///
/// let options = IndentationOptions::new(IndentSize::Tab)
///     .with_exceptions([Exception::Value])
///     .hierarchical_selectors(true);
///
/// assert!(options.has_exception(Exception::Value));
/// assert!(!options.has_exception(Exception::Block));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentationOptions {
    /// Width of one level.
    pub indent: IndentSize,
    /// Enabled exceptions.
    pub except: BTreeSet<Exception>,
    /// Treat sibling rules whose selectors extend a preceding selector as nested.
    pub hierarchical_selectors: bool,
}

impl IndentationOptions {
    /// Options with the given indent and the default exceptions.
    pub fn new(indent: IndentSize) -> Self {
        Self {
            indent,
            ..Self::default()
        }
    }

    /// Replace the exception set.
    pub fn with_exceptions(mut self, except: impl IntoIterator<Item = Exception>) -> Self {
        self.except = except.into_iter().collect();
        self
    }

    /// Disable every exception.
    pub fn without_exceptions(mut self) -> Self {
        self.except.clear();
        self
    }

    /// Enable or disable hierarchical selectors.
    pub fn hierarchical_selectors(mut self, enabled: bool) -> Self {
        self.hierarchical_selectors = enabled;
        self
    }

    /// Check if an exception is enabled.
    pub fn has_exception(&self, exception: Exception) -> bool {
        self.except.contains(&exception)
    }
}

impl Default for IndentationOptions {
    fn default() -> Self {
        Self {
            indent: IndentSize::default(),
            except: BTreeSet::from([Exception::Block, Exception::Value]),
            hierarchical_selectors: false,
        }
    }
}
