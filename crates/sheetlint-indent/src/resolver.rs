//! Hierarchical selectors: virtual nesting of flat sibling rules.
//!
//! With hierarchical selectors enabled, a rule whose selector starts with the
//! selector of the rule right before it is indented one level deeper:
//!
//! ```css
//! .nav {}
//!   .nav .item {}
//!     .nav .item a {}
//!   .nav .link {}
//! ```
//!
//! The last rule does not extend `.nav .item a`, so the resolver walks up the
//! recorded superordinates until it finds a selector it does extend (`.nav`)
//! and places the rule as a peer of `.nav .item`.
//!
//! Matching is a plain string prefix test: `.foo` is a prefix of `.foobar`.

use sheetlint_syntax::{NodeId, Stylesheet};

use crate::Result;
use crate::hierarchy::HierarchyMap;

/// Upper bound on superordinate hops during the peer search.
pub const MAX_CHAIN: usize = 1024;

/// Resolve the level of a rule given its tree-derived `naive` level.
///
/// Records an entry for `node` when it is found to be subordinate to, or a
/// peer of, a preceding rule. Everything else gets `naive` back unrecorded.
pub fn resolve_level(
    sheet: &Stylesheet,
    hierarchy: &mut HierarchyMap,
    id: NodeId,
    naive: usize,
) -> Result<usize> {
    let node = sheet.node(id)?;
    let Some(selector) = node.selector() else {
        return Ok(naive);
    };
    let Some(prev_id) = node.prev() else {
        return Ok(naive);
    };
    let Some(prev_selector) = sheet.node(prev_id)?.selector() else {
        return Ok(naive);
    };

    if selector.starts_with(prev_selector) {
        let level = hierarchy
            .lookup(prev_id)
            .map_or(naive + 1, |entry| entry.level + 1);
        hierarchy.record(id, prev_id, level);
        tracing::trace!(?id, superordinate = ?prev_id, level, "subordinate selector");
        return Ok(level);
    }

    let mut candidate = prev_id;
    for _ in 0..MAX_CHAIN {
        let Some(entry) = hierarchy.lookup(candidate) else {
            return Ok(naive);
        };

        let superordinate = sheet.node(entry.superordinate)?;
        if superordinate
            .selector()
            .is_some_and(|prefix| selector.starts_with(prefix))
        {
            hierarchy.record(id, entry.superordinate, entry.level);
            tracing::trace!(?id, peer = ?candidate, level = entry.level, "peer selector");
            return Ok(entry.level);
        }

        candidate = entry.superordinate;
    }

    tracing::warn!(?id, "superordinate chain longer than {MAX_CHAIN}, keeping tree level");
    Ok(naive)
}
