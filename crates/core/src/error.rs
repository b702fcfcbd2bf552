use thiserror::Error;

use crate::rules::RuleKind;

/// Location of a problem inside a notebook's markdown source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Index of the cell in the notebook.
    pub cell: usize,
    /// Line number within the cell source (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(cell: usize, line: usize, column: usize) -> Self {
        Self { cell, line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cell {}:{}:{}", self.cell, self.line, self.column)
    }
}

/// Errors that make a notebook unreadable or unwritable.
///
/// These abort processing of the affected file only.
#[derive(Debug, Error)]
pub enum NotebookError {
    /// IO error while reading or writing a notebook.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Serialized output was not valid UTF-8.
    #[error("Encoding error: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),
    /// The document is not valid notebook JSON.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// markdown-rs rejected the source of a markdown cell.
    #[error("Markdown error at {location}: {message}")]
    Markdown {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
}

impl NotebookError {
    /// Create a markdown error for the given cell and position.
    pub fn markdown(message: impl Into<String>, cell: usize, line: usize, column: usize) -> Self {
        Self::Markdown {
            message: message.into(),
            location: SourceLocation::new(cell, line, column),
        }
    }
}

/// Failure to place a table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TocError {
    /// No cell carries the anchor tag.
    #[error("missing toc cell: notebook is unchanged")]
    MissingAnchor,
}

/// Failure to hide solution cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HideError {
    /// No cell carries any of the tags to hide.
    #[error("no cells tagged with any of {tags:?}")]
    MissingTaggedCells {
        /// Tags that were searched for, sorted.
        tags: Vec<String>,
    },
}

/// Kernel metadata does not match the expected kernel spec.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// `metadata.kernelspec` is absent or not an object.
    #[error("notebook is missing a kernel spec")]
    MissingKernelSpec,
    /// One or more expected kernel spec fields differ.
    #[error("{report}")]
    KernelSpecMismatch {
        /// Kernel spec found in the notebook.
        actual: serde_json::Map<String, serde_json::Value>,
        /// Fields that were expected.
        expected: serde_json::Map<String, serde_json::Value>,
        /// YAML rendering of both maps.
        report: String,
    },
}

/// Invalid hook configuration, detected before any file is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A rule name that does not match any [`RuleKind`].
    #[error("unknown heading rule '{0}' (expected one of: {known})", known = RuleKind::names().join(", "))]
    UnknownRule(String),
    /// The expected kernel spec was not a JSON object.
    #[error("kernel spec must be a JSON object: {0}")]
    InvalidKernelSpec(String),
}
