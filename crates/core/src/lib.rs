#![deny(missing_docs)]
//! nbtidy core: notebook model, heading rules, tables of contents and solution hiding.

/// Notebook source diffing.
pub mod diff;
/// Core error types.
pub mod error;
/// Heading extraction from markdown cells.
pub mod headings;
/// Solution cell hiding.
pub mod hide;
/// Kernel spec check and fix.
pub mod kernel;
/// Typed notebook document model.
pub mod notebook;
/// Markdown parsing options and adapter.
pub mod parse;
/// Heading hierarchy rules.
pub mod rules;
/// TOC link fragments.
pub mod slug;
/// Table of contents synthesis.
pub mod toc;

pub use diff::{NotebookDiff, compare_notebooks, compare_text};
pub use error::{ConfigError, HideError, KernelError, NotebookError, SourceLocation, TocError};
pub use headings::{Heading, HeadingNode, extract_headings, headings_in_source, resolve_text};
pub use hide::{CellHider, HiddenNotebook};
pub use kernel::KernelSpec;
pub use notebook::{
    Cell, CellMetadata, CodeCell, LINE_SEPARATOR, MarkdownCell, Notebook, RawCell, Source, TagSet,
    tag_set,
};
pub use parse::{ParseOptions, parse_mdast};
pub use rules::{
    DedentRule, FirstHeadingRule, HeadingRule, IndentRule, Offending, RuleKind, RuleSet,
    SingleRootRule, Violation,
};
pub use slug::slugify;
pub use toc::{ANCHOR_TAG, TOC_HEADER, TocInsertion, find_anchor, insert_toc, render_toc};
