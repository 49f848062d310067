//! Expected whitespace strings and their human-readable form.

use crate::options::IndentSize;

/// The exact whitespace expected in front of content at `level`.
pub fn expected_whitespace(indent: IndentSize, level: usize) -> String {
    indent.unit().repeat(level)
}

/// `"<N> <unit>[s]"`, counting characters: spaces × level, or one tab per level.
pub fn expectation(indent: IndentSize, level: usize) -> String {
    let count = match indent {
        IndentSize::Spaces(size) => size.get() * level,
        IndentSize::Tab => level,
    };
    let name = indent.unit_name();
    if count == 1 {
        format!("{count} {name}")
    } else {
        format!("{count} {name}s")
    }
}
