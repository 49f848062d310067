//! Whitespace comparison against the expected level.
//!
//! Four regions are inspected per node: the whitespace before it, the
//! whitespace before its closing brace, continuation lines of a declaration
//! value, and continuation lines of a rule selector.

use sheetlint_syntax::{Node, NodeData, NodeId, Stylesheet};

use crate::options::{Exception, IndentationOptions};
use crate::rule::{Reporter, Violation};
use crate::unit::expected_whitespace;

/// The run of spaces and tabs at the start of `text`.
pub fn leading_whitespace(text: &str) -> &str {
    let end = text
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(text.len());
    &text[..end]
}

/// Everything after the last newline, or `None` without a newline.
pub fn after_last_newline(text: &str) -> Option<&str> {
    text.rfind('\n').map(|index| &text[index + 1..])
}

/// Compares a node's whitespace regions with the expected indentation.
pub struct WhitespaceValidator<'a> {
    options: &'a IndentationOptions,
}

impl<'a> WhitespaceValidator<'a> {
    /// Create a validator for one set of options.
    pub fn new(options: &'a IndentationOptions) -> Self {
        Self { options }
    }

    /// Run every check that applies to `node`.
    pub fn check<R: Reporter + ?Sized>(
        &self,
        sheet: &Stylesheet,
        id: NodeId,
        node: &Node,
        level: usize,
        reporter: &mut R,
    ) {
        self.check_before(sheet, id, node, level, reporter);
        self.check_after(id, node, level, reporter);

        match &node.data {
            NodeData::Declaration { value, .. } => {
                self.check_value(id, value, node.span.start_line, level, reporter);
            }
            NodeData::Rule { selector } => {
                self.check_selector(id, selector, node.span.start_line, level, reporter);
            }
            NodeData::AtRule { .. } | NodeData::Comment { .. } => {}
        }
    }

    /// Whitespace before the node, checked for the first node of the
    /// stylesheet or whenever it contains a newline.
    pub fn check_before<R: Reporter + ?Sized>(
        &self,
        sheet: &Stylesheet,
        id: NodeId,
        node: &Node,
        level: usize,
        reporter: &mut R,
    ) {
        let before = node.raws.before.as_str();
        let actual = match after_last_newline(before) {
            Some(actual) => actual,
            None if sheet.first() == Some(id) => before,
            None => return,
        };

        if actual != expected_whitespace(self.options.indent, level) {
            self.report(id, node.span.start_line, level, reporter);
        }
    }

    /// Whitespace before the closing brace of a node with a body.
    pub fn check_after<R: Reporter + ?Sized>(
        &self,
        id: NodeId,
        node: &Node,
        level: usize,
        reporter: &mut R,
    ) {
        let Some(actual) = node.raws.after.as_deref().and_then(after_last_newline) else {
            return;
        };

        if actual != expected_whitespace(self.options.indent, level) {
            self.report(id, node.span.end_line, level, reporter);
        }
    }

    /// Continuation lines of a declaration value.
    ///
    /// They belong one level deeper than the declaration unless the value
    /// exception is enabled.
    pub fn check_value<R: Reporter + ?Sized>(
        &self,
        id: NodeId,
        value: &str,
        start_line: usize,
        level: usize,
        reporter: &mut R,
    ) {
        let value_level = if self.options.has_exception(Exception::Value) {
            level
        } else {
            level + 1
        };
        self.check_lines(id, value, start_line, value_level, reporter);
    }

    /// Continuation lines of a rule selector, expected at the rule's own level.
    pub fn check_selector<R: Reporter + ?Sized>(
        &self,
        id: NodeId,
        selector: &str,
        start_line: usize,
        level: usize,
        reporter: &mut R,
    ) {
        self.check_lines(id, selector, start_line, level, reporter);
    }

    /// Leading whitespace of every line after the first in `text`.
    ///
    /// The n-th newline maps to `start_line + n`.
    pub fn check_lines<R: Reporter + ?Sized>(
        &self,
        id: NodeId,
        text: &str,
        start_line: usize,
        level: usize,
        reporter: &mut R,
    ) {
        if !text.contains('\n') {
            return;
        }

        let expected = expected_whitespace(self.options.indent, level);
        for (ordinal, (index, _)) in text.match_indices('\n').enumerate() {
            if leading_whitespace(&text[index + 1..]) != expected {
                self.report(id, start_line + ordinal + 1, level, reporter);
            }
        }
    }

    fn report<R: Reporter + ?Sized>(&self, id: NodeId, line: usize, level: usize, reporter: &mut R) {
        let violation = Violation::new(id, line, self.options.indent, level);
        tracing::debug!(line, message = %violation.message, "indentation violation");
        reporter.report(violation);
    }
}
