//! Expected indentation level of a node.

use sheetlint_syntax::{NodeId, NodeKind, Stylesheet};

use crate::hierarchy::HierarchyMap;
use crate::options::{Exception, IndentationOptions};
use crate::{Error, Result};

/// Upper bound on the ancestor chain walked for one node.
pub const MAX_DEPTH: usize = 1024;

/// Computes levels from tree depth, hierarchy shortcuts and the block exception.
///
/// The calculator only reads the hierarchy; recording entries is up to the caller.
pub struct LevelCalculator<'a> {
    sheet: &'a Stylesheet,
    options: &'a IndentationOptions,
    hierarchy: &'a HierarchyMap,
}

impl<'a> LevelCalculator<'a> {
    /// Create a calculator over one run's state.
    pub fn new(
        sheet: &'a Stylesheet,
        options: &'a IndentationOptions,
        hierarchy: &'a HierarchyMap,
    ) -> Self {
        Self {
            sheet,
            options,
            hierarchy,
        }
    }

    /// Level of `node`: 0 for top-level nodes, otherwise one more than the parent.
    ///
    /// A recorded hierarchy entry for the parent replaces the parent's own
    /// computation. With [`Exception::Block`], rules and at-rules below the top
    /// level lose one level so they sit flush with their parent.
    pub fn level(&self, node: NodeId) -> Result<usize> {
        self.level_at(node, 0)
    }

    fn level_at(&self, id: NodeId, depth: usize) -> Result<usize> {
        if depth > MAX_DEPTH {
            return Err(Error::malformed(
                id,
                format!("ancestor chain is deeper than {MAX_DEPTH}"),
            ));
        }

        let node = self.sheet.node(id)?;
        let Some(parent) = node.parent() else {
            return Ok(0);
        };

        let candidate = match self.hierarchy.lookup(parent) {
            Some(entry) => entry.level + 1,
            None => self.level_at(parent, depth + 1)? + 1,
        };

        if self.options.has_exception(Exception::Block) && opens_block(node.kind()) {
            Ok(candidate.saturating_sub(1))
        } else {
            Ok(candidate)
        }
    }
}

fn opens_block(kind: NodeKind) -> bool {
    match kind {
        NodeKind::Rule | NodeKind::AtRule => true,
        NodeKind::Declaration | NodeKind::Comment => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetlint_syntax::{NodeData, Raws, SourceSpan, parse};

    const NESTED: &str = "a {\n  top: 0;\n  b {\n    left: 0;\n    c {\n      right: 0;\n    }\n  }\n}";

    fn levels(css: &str, options: &IndentationOptions, hierarchy: &HierarchyMap) -> Vec<usize> {
        let sheet = parse(css).unwrap();
        let calc = LevelCalculator::new(&sheet, options, hierarchy);
        sheet.walk().map(|(id, _)| calc.level(id).unwrap()).collect()
    }

    #[test]
    fn level_is_depth_without_exceptions() {
        let options = IndentationOptions::default().without_exceptions();
        let levels = levels(NESTED, &options, &HierarchyMap::new());
        assert_eq!(levels, vec![0, 1, 1, 2, 2, 3]);
    }

    #[test]
    fn block_exception_flattens_nested_blocks() {
        let options = IndentationOptions::default().with_exceptions([Exception::Block]);
        let levels = levels(NESTED, &options, &HierarchyMap::new());
        // a, top, b, left, c, right
        assert_eq!(levels, vec![0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn hierarchy_entry_shortcuts_parent() {
        let sheet = parse(".a {}\n.a .b {\n  top: 0;\n}").unwrap();
        let ids: Vec<_> = sheet.walk().map(|(id, _)| id).collect();
        let options = IndentationOptions::default().without_exceptions();

        let mut hierarchy = HierarchyMap::new();
        hierarchy.record(ids[1], ids[0], 1);

        let calc = LevelCalculator::new(&sheet, &options, &hierarchy);
        assert_eq!(calc.level(ids[1]).unwrap(), 0);
        assert_eq!(calc.level(ids[2]).unwrap(), 2);
    }

    #[test]
    fn comments_are_leaves_under_block_exception() {
        let options = IndentationOptions::default();
        let levels = levels("a {\n  /* note */\n}", &options, &HierarchyMap::new());
        assert_eq!(levels, vec![0, 1]);
    }

    #[test]
    fn deep_nesting_hits_guard() {
        let mut sheet = Stylesheet::new();
        let mut parent = None;
        for _ in 0..MAX_DEPTH + 2 {
            let data = NodeData::Rule {
                selector: "a".to_string(),
            };
            let id = sheet
                .append(parent, data, Raws::default(), SourceSpan::line(1))
                .unwrap();
            parent = Some(id);
        }
        let options = IndentationOptions::default();
        let hierarchy = HierarchyMap::new();
        let calc = LevelCalculator::new(&sheet, &options, &hierarchy);

        let err = calc.level(parent.unwrap()).unwrap_err();
        assert!(matches!(err, Error::MalformedTree { .. }));
    }
}
