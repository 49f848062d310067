//! Per-run memo of confirmed indentation levels.
//!
//! The map is the substrate of hierarchical selectors: an entry says that a
//! node is indented one level under (or as a peer under) its superordinate.
//! The level calculator reads it as a shortcut when computing a child's level.
//!
//! A map belongs to exactly one check run. Keys are only valid for the
//! stylesheet they came from, so a map must never outlive its run.

use sheetlint_syntax::NodeId;
use slotmap::SecondaryMap;

/// Where a node sits in the virtual hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyEntry {
    /// The node this one is considered subordinate to. Lookup only.
    pub superordinate: NodeId,
    /// Confirmed indentation level of the node.
    pub level: usize,
}

/// Write-once mapping from node to [`HierarchyEntry`].
#[derive(Debug, Default)]
pub struct HierarchyMap {
    entries: SecondaryMap<NodeId, HierarchyEntry>,
}

impl HierarchyMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the entry for `node`.
    ///
    /// Returns `false` and leaves the map untouched if `node` already has one.
    pub fn record(&mut self, node: NodeId, superordinate: NodeId, level: usize) -> bool {
        if self.entries.contains_key(node) {
            tracing::debug!(?node, ?superordinate, level, "hierarchy entry already recorded");
            return false;
        }
        self.entries.insert(
            node,
            HierarchyEntry {
                superordinate,
                level,
            },
        );
        true
    }

    /// Look up the entry for `node`.
    pub fn lookup(&self, node: NodeId) -> Option<HierarchyEntry> {
        self.entries.get(node).copied()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetlint_syntax::parse;

    #[test]
    fn record_is_write_once() {
        let sheet = parse(".a {}\n.a .b {}\n.c {}").unwrap();
        let ids: Vec<_> = sheet.walk().map(|(id, _)| id).collect();

        let mut map = HierarchyMap::new();
        assert!(map.is_empty());
        assert!(map.record(ids[1], ids[0], 1));
        assert!(!map.record(ids[1], ids[2], 5));

        assert_eq!(
            map.lookup(ids[1]),
            Some(HierarchyEntry {
                superordinate: ids[0],
                level: 1,
            })
        );
        assert_eq!(map.lookup(ids[0]), None);
        assert_eq!(map.len(), 1);
    }
}
