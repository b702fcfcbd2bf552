//! Heading extraction from markdown cells.
//!
//! Only headings that are direct children of a cell's document root are
//! collected; headings inside block quotes, list items or other containers
//! are ignored. The heading text is the literal text of the first leaf
//! reached by following first children, which drops emphasis, link and
//! code-span markup.

use crate::NotebookError;
use crate::notebook::{Cell, Notebook, TagSet};
use crate::parse::{ParseOptions, parse_mdast};
use markdown::mdast::Node;

/// A heading found in a markdown cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading level (1-6, 1 is the highest).
    pub level: u8,
    /// Resolved heading text without markup.
    pub text: String,
    /// Index of the owning cell.
    pub cell: usize,
}

impl Heading {
    /// Creates a heading.
    pub fn new(level: u8, text: impl Into<String>, cell: usize) -> Self {
        Self {
            level,
            text: text.into(),
            cell,
        }
    }

    /// Markdown form of the heading, e.g. `### Setup`.
    pub fn markup(&self) -> String {
        format!("{} {}", "#".repeat(usize::from(self.level)), self.text)
    }
}

/// Minimal tree interface used to resolve heading text.
pub trait HeadingNode: Sized {
    /// Child nodes, empty for leaves.
    fn children(&self) -> &[Self];

    /// Literal text carried by a leaf.
    fn leaf_text(&self) -> &str;
}

impl HeadingNode for Node {
    fn children(&self) -> &[Node] {
        Node::children(self).map(Vec::as_slice).unwrap_or_default()
    }

    fn leaf_text(&self) -> &str {
        match self {
            Node::Text(text) => &text.value,
            Node::InlineCode(code) => &code.value,
            Node::InlineMath(math) => &math.value,
            Node::Html(html) => &html.value,
            _ => "",
        }
    }
}

/// Follows first children down to a leaf and returns its text.
pub fn resolve_text<N: HeadingNode>(node: &N) -> &str {
    let mut current = node;
    while let Some(first) = current.children().first() {
        current = first;
    }
    current.leaf_text()
}

/// Extracts the top-level headings of one markdown source.
pub fn headings_in_source(
    source: &str,
    cell: usize,
    options: &ParseOptions,
) -> Result<Vec<Heading>, NotebookError> {
    let root = parse_mdast(source, cell, options)?;
    let headings = HeadingNode::children(&root)
        .iter()
        .filter_map(|node| match node {
            Node::Heading(heading) => Some(Heading::new(heading.depth, resolve_text(node), cell)),
            _ => None,
        })
        .collect();
    Ok(headings)
}

/// Extracts the heading sequence of a notebook.
///
/// Markdown cells carrying any of `ignore_tags` are skipped.
pub fn extract_headings(
    notebook: &Notebook,
    ignore_tags: &TagSet,
    options: &ParseOptions,
) -> Result<Vec<Heading>, NotebookError> {
    let mut headings = Vec::new();
    for (index, cell) in notebook.cells.iter().enumerate() {
        if let Cell::Markdown(markdown) = cell {
            if cell.has_any_tag(ignore_tags) {
                continue;
            }
            headings.extend(headings_in_source(markdown.source.as_str(), index, options)?);
        }
    }
    Ok(headings)
}
