//! Staleness check between a notebook and a freshly derived counterpart.
//!
//! Only cell sources take part: each notebook is reduced to its sources
//! joined by [`LINE_SEPARATOR`](crate::notebook::LINE_SEPARATOR) and the two
//! texts are compared line by line.

use crate::notebook::Notebook;
use similar::{DiffTag, TextDiff};

/// Line-based comparison of two notebooks' sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookDiff {
    unified: String,
}

impl NotebookDiff {
    /// True when the sources match line for line.
    pub fn is_empty(&self) -> bool {
        self.unified.is_empty()
    }

    /// Unified diff text; empty when the sources match.
    pub fn unified(&self) -> &str {
        &self.unified
    }
}

impl std::fmt::Display for NotebookDiff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.unified)
    }
}

/// Compares `before` against `after`, labelling the diff with the given names.
pub fn compare_notebooks(before: &Notebook, after: &Notebook, from: &str, to: &str) -> NotebookDiff {
    compare_text(&before.joined_source(), &after.joined_source(), from, to)
}

/// Compares two texts line by line.
pub fn compare_text(before: &str, after: &str, from: &str, to: &str) -> NotebookDiff {
    let diff = TextDiff::from_lines(before, after);
    let changed = diff.ops().iter().any(|op| op.tag() != DiffTag::Equal);
    let unified = if changed {
        diff.unified_diff().header(from, to).to_string()
    } else {
        String::new()
    };
    NotebookDiff { unified }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::Cell;
    use serde_json::Value;

    #[test]
    fn identical_sources_with_different_metadata_have_no_diff() {
        let a = Notebook::new(vec![Cell::markdown("# A", &["x"]), Cell::code("x = 1", &[])]);
        let mut b = Notebook::new(vec![Cell::markdown("# A", &[]), Cell::code("x = 1", &["y"])]);
        b.metadata.insert("kernelspec".into(), Value::from("other"));
        assert!(compare_notebooks(&a, &b, "a", "b").is_empty());
    }

    #[test]
    fn cell_type_does_not_matter() {
        let a = Notebook::new(vec![Cell::markdown("x = 1", &[])]);
        let b = Notebook::new(vec![Cell::code("x = 1", &[])]);
        assert!(compare_notebooks(&a, &b, "a", "b").is_empty());
    }

    #[test]
    fn changed_source_yields_unified_diff() {
        let a = Notebook::new(vec![Cell::markdown("# A", &[]), Cell::code("x = 1", &[])]);
        let b = Notebook::new(vec![Cell::markdown("# A", &[]), Cell::code("x = 2", &[])]);
        let diff = compare_notebooks(&a, &b, "lesson.ipynb", "solution.ipynb");
        assert!(!diff.is_empty());
        let text = diff.unified();
        assert!(text.starts_with("--- lesson.ipynb\n+++ solution.ipynb\n"));
        assert!(text.contains("-x = 1"));
        assert!(text.contains("+x = 2"));
        assert!(text.contains(" # A"));
    }

    #[test]
    fn extra_cell_is_a_difference() {
        let a = Notebook::new(vec![Cell::markdown("# A", &[])]);
        let b = Notebook::new(vec![Cell::markdown("# A", &[]), Cell::markdown("", &[])]);
        assert!(!compare_notebooks(&a, &b, "a", "b").is_empty());
    }
}
