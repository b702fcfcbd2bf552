//! Markdown parsing for notebook cells.

use crate::NotebookError;
use markdown::mdast::Node;
use markdown::message::{Message, Place};
use serde::Deserialize;

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseOptions {
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Recognise raw HTML blocks and inline HTML.
    pub raw_html: bool,
    /// Enable math constructs ($inline$ and $$block$$).
    pub math: bool,
}

impl ParseOptions {
    /// Notebook defaults: CommonMark plus GFM, HTML allowed, no frontmatter.
    pub const fn notebook() -> Self {
        Self {
            gfm: true,
            raw_html: true,
            math: false,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: false,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.math {
            constructs.math_flow = true;
            constructs.math_text = true;
        }

        markdown::ParseOptions {
            constructs,
            math_text_single_dollar: self.math,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::notebook()
    }
}

/// Parse the source of markdown cell `cell` into an MDAST tree.
pub fn parse_mdast(input: &str, cell: usize, options: &ParseOptions) -> Result<Node, NotebookError> {
    markdown::to_mdast(input, &options.to_markdown()).map_err(|err| {
        let (line, column) = message_position(&err);
        NotebookError::markdown(err.to_string(), cell, line, column)
    })
}

fn message_position(message: &Message) -> (usize, usize) {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => (point.line, point.column),
            Place::Position(position) => (position.start.line, position.start.column),
        },
        None => (1, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_rule_is_not_frontmatter() {
        let root = parse_mdast("---\ntitle: x\n---\n# Heading", 0, &ParseOptions::default()).unwrap();
        let children = root.children().unwrap();
        assert!(matches!(children.first(), Some(Node::ThematicBreak(_))));
        assert!(children.iter().any(|node| matches!(node, Node::Heading(_))));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: ParseOptions = serde_json::from_str(r#"{"math": true}"#).unwrap();
        assert_eq!(
            options,
            ParseOptions {
                math: true,
                ..ParseOptions::notebook()
            }
        );
    }
}
