//! Table of contents synthesis.
//!
//! The list is rendered from a heading sequence and written into the anchor
//! cell, the first cell tagged [`ANCHOR_TAG`]. Callers leave the anchor cell
//! out of the heading sequence by ignoring that tag at extraction time.

use crate::TocError;
use crate::headings::Heading;
use crate::notebook::{LINE_SEPARATOR, Notebook};
use crate::slug::slugify;

/// Tag marking the cell that receives the table of contents.
pub const ANCHOR_TAG: &str = "toc";

/// First line of every generated table of contents.
pub const TOC_HEADER: &str = "# Table of Contents";

/// Renders headings as a nested markdown list.
///
/// Each item is indented two spaces per level below the shallowest heading
/// present.
pub fn render_toc(headings: &[Heading]) -> String {
    let Some(min_level) = headings.iter().map(|h| h.level).min() else {
        return String::new();
    };
    headings
        .iter()
        .map(|heading| {
            let indent = "  ".repeat(usize::from(heading.level - min_level));
            format!("{indent}* [{}](#{})", heading.text, slugify(&heading.text))
        })
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

/// Full anchor cell content for a rendered list.
pub fn toc_cell_source(toc: &str) -> String {
    if toc.is_empty() {
        TOC_HEADER.to_string()
    } else {
        [TOC_HEADER, toc].join(LINE_SEPARATOR)
    }
}

/// Index of the anchor cell; the first tagged cell wins.
pub fn find_anchor(notebook: &Notebook) -> Option<usize> {
    notebook.cells.iter().position(|cell| cell.has_tag(ANCHOR_TAG))
}

/// Result of writing a table of contents into a notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocInsertion {
    /// Index of the anchor cell.
    pub cell: usize,
    /// New source of the anchor cell.
    pub content: String,
}

/// Replaces the anchor cell's source with a table of contents for `headings`.
///
/// Other cells are untouched. Without an anchor cell the notebook is left
/// unchanged and [`TocError::MissingAnchor`] is returned.
pub fn insert_toc(notebook: &mut Notebook, headings: &[Heading]) -> Result<TocInsertion, TocError> {
    let cell = find_anchor(notebook).ok_or(TocError::MissingAnchor)?;
    let content = toc_cell_source(&render_toc(headings));
    notebook.cells[cell].set_source(content.clone());
    Ok(TocInsertion { cell, content })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::Cell;

    fn heading(level: u8, text: &str) -> Heading {
        Heading::new(level, text, 0)
    }

    #[test]
    fn renders_nested_list_relative_to_min_level() {
        let headings = vec![
            heading(2, "Intro"),
            heading(3, "Getting Started"),
            heading(4, "Install"),
            heading(2, "Summary"),
        ];
        insta::assert_snapshot!(render_toc(&headings), @r"
        * [Intro](#Intro)
          * [Getting Started](#Getting-Started)
            * [Install](#Install)
        * [Summary](#Summary)
        ");
    }

    #[test]
    fn rendering_is_idempotent() {
        let headings = vec![heading(1, "A b"), heading(3, "C"), heading(2, "A b")];
        assert_eq!(render_toc(&headings), render_toc(&headings));
    }

    #[test]
    fn duplicate_texts_share_a_slug() {
        let toc = render_toc(&[heading(1, "Notes"), heading(1, "Notes")]);
        assert_eq!(toc, "* [Notes](#Notes)\n* [Notes](#Notes)");
    }

    #[test]
    fn empty_sequence_renders_nothing() {
        assert_eq!(render_toc(&[]), "");
        assert_eq!(toc_cell_source(""), "# Table of Contents");
    }

    #[test]
    fn inserts_into_first_anchor_only() {
        let mut nb = Notebook::new(vec![
            Cell::markdown("# Title", &[]),
            Cell::markdown("old", &["toc"]),
            Cell::markdown("other", &["toc"]),
        ]);
        let insertion = insert_toc(&mut nb, &[heading(1, "Title")]).unwrap();
        assert_eq!(insertion.cell, 1);
        assert_eq!(insertion.content, "# Table of Contents\n* [Title](#Title)");
        assert_eq!(nb.cells[1].source().as_str(), insertion.content);
        assert_eq!(nb.cells[0].source().as_str(), "# Title");
        assert_eq!(nb.cells[2].source().as_str(), "other");
    }

    #[test]
    fn missing_anchor_leaves_notebook_unchanged() {
        let mut nb = Notebook::new(vec![Cell::markdown("# Title", &[])]);
        let before = nb.clone();
        assert_eq!(
            insert_toc(&mut nb, &[heading(1, "Title")]),
            Err(TocError::MissingAnchor)
        );
        assert_eq!(nb, before);
    }

    #[test]
    fn anchor_may_be_a_code_cell() {
        let nb = Notebook::new(vec![Cell::code("", &["toc"])]);
        assert_eq!(find_anchor(&nb), Some(0));
    }
}
