//! The `indentation` rule: level inference plus whitespace checks.

use std::fmt;
use std::path::Path;

use sheetlint_syntax::{NodeId, Stylesheet};

use crate::Result;
use crate::hierarchy::HierarchyMap;
use crate::level::LevelCalculator;
use crate::options::{IndentSize, IndentationOptions};
use crate::resolver::resolve_level;
use crate::unit::expectation;
use crate::validate::WhitespaceValidator;

/// Identifier attached to every violation this rule reports.
pub const RULE_NAME: &str = "indentation";

/// A line whose indentation differs from the expected level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Always [`RULE_NAME`].
    pub rule: &'static str,
    /// `Expected indentation of <N> <unit>[s] at line <L>`.
    pub message: String,
    /// The node whose whitespace was checked.
    pub node: NodeId,
    /// 1-indexed line of the offending whitespace.
    pub line: usize,
}

impl Violation {
    /// Create a violation for whitespace expected at `level`.
    pub fn new(node: NodeId, line: usize, indent: IndentSize, level: usize) -> Self {
        Self {
            rule: RULE_NAME,
            message: format!(
                "Expected indentation of {} at line {line}",
                expectation(indent, level)
            ),
            node,
            line,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.line, self.message, self.rule)
    }
}

/// Sink receiving violations as they are found.
pub trait Reporter {
    /// Accept one violation.
    fn report(&mut self, violation: Violation);
}

impl Reporter for Vec<Violation> {
    fn report(&mut self, violation: Violation) {
        self.push(violation);
    }
}

/// The indentation rule.
///
/// # Example
///
/// ```
/// use sheetlint_indent::{Indentation, IndentationOptions};
///
/// let rule = Indentation::new(IndentationOptions::default());
/// let violations = rule.check_source("a {\n   color: red;\n}\n")?;
///
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].message, "Expected indentation of 2 spaces at line 2");
/// # Ok::<(), sheetlint_indent::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Indentation {
    options: IndentationOptions,
}

impl Indentation {
    /// Create the rule with the given options.
    pub fn new(options: IndentationOptions) -> Self {
        Self { options }
    }

    /// The configured options.
    pub fn options(&self) -> &IndentationOptions {
        &self.options
    }

    /// Check a stylesheet and collect every violation.
    pub fn check(&self, sheet: &Stylesheet) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();
        self.check_with(sheet, &mut violations)?;
        Ok(violations)
    }

    /// Check a stylesheet, handing violations to `reporter` as they are found.
    ///
    /// Every call starts from an empty hierarchy.
    #[tracing::instrument(level = "info", skip_all, fields(nodes = sheet.len()))]
    pub fn check_with<R: Reporter + ?Sized>(
        &self,
        sheet: &Stylesheet,
        reporter: &mut R,
    ) -> Result<()> {
        CheckRun::new(sheet, &self.options).run(reporter)
    }

    /// Parse and check stylesheet text.
    pub fn check_source(&self, css: &str) -> Result<Vec<Violation>> {
        let sheet = sheetlint_syntax::parse(css)?;
        self.check(&sheet)
    }

    /// Read, parse and check a stylesheet file.
    pub fn check_file(&self, path: impl AsRef<Path>) -> Result<Vec<Violation>> {
        let sheet = sheetlint_syntax::parse_file(path)?;
        self.check(&sheet)
    }
}

/// State of a single check: one tree, one configuration, one hierarchy.
struct CheckRun<'a> {
    sheet: &'a Stylesheet,
    options: &'a IndentationOptions,
    hierarchy: HierarchyMap,
}

impl<'a> CheckRun<'a> {
    fn new(sheet: &'a Stylesheet, options: &'a IndentationOptions) -> Self {
        Self {
            sheet,
            options,
            hierarchy: HierarchyMap::new(),
        }
    }

    fn run<R: Reporter + ?Sized>(mut self, reporter: &mut R) -> Result<()> {
        let sheet = self.sheet;
        let validator = WhitespaceValidator::new(self.options);

        for (id, node) in sheet.walk() {
            let level = self.level(id, node.is_rule())?;
            validator.check(sheet, id, node, level, reporter);
        }

        tracing::debug!(recorded = self.hierarchy.len(), "indentation check finished");
        Ok(())
    }

    fn level(&mut self, id: NodeId, is_rule: bool) -> Result<usize> {
        let naive = LevelCalculator::new(self.sheet, self.options, &self.hierarchy).level(id)?;
        let level = if self.options.hierarchical_selectors && is_rule {
            resolve_level(self.sheet, &mut self.hierarchy, id, naive)?
        } else {
            naive
        };

        tracing::trace!(?id, naive, level, "computed level");
        Ok(level)
    }
}
