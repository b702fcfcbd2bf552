//! Typed notebook document model.
//!
//! Cells are a tagged union on `cell_type`. Fields the model does not name
//! (cell ids, attachments, notebook-level extras) are carried through
//! untouched so a read/write cycle preserves the document.

use crate::NotebookError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Separator used when joining cell sources and rendered lines.
pub const LINE_SEPARATOR: &str = "\n";

/// Unordered, case-sensitive set of cell tags.
pub type TagSet = BTreeSet<String>;

/// Builds a [`TagSet`] from any iterable of string-likes.
pub fn tag_set<I, S>(tags: I) -> TagSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tags.into_iter().map(Into::into).collect()
}

/// Cell source text.
///
/// Accepted as a single string or as an array of lines; arrays are joined
/// as-is since each line keeps its own terminator. Always written as an
/// array of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source(String);

impl Source {
    /// Returns the full source text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over lines, each keeping its `\n` terminator.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.split_inclusive('\n')
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSource {
    Text(String),
    Lines(Vec<String>),
}

impl<'de> Deserialize<'de> for Source {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawSource::deserialize(deserializer)? {
            RawSource::Text(text) => Source(text),
            RawSource::Lines(lines) => Source(lines.concat()),
        })
    }
}

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.lines())
    }
}

/// Per-cell metadata; only `tags` is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellMetadata {
    /// Free-form labels used for selection and exclusion.
    ///
    /// `None` when the key is absent, so an empty `tags` array survives a
    /// read/write cycle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Any other metadata keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CellMetadata {
    /// Tags in stored order; empty when the key is absent.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

/// A code cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeCell {
    /// Cell source.
    pub source: Source,
    /// Execution counter, written as `null` when absent.
    #[serde(default)]
    pub execution_count: Option<u64>,
    /// Raw output objects.
    #[serde(default)]
    pub outputs: Vec<Value>,
    /// Cell metadata.
    #[serde(default)]
    pub metadata: CellMetadata,
    /// Fields not modelled explicitly (e.g. `id`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A markdown cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkdownCell {
    /// Cell source.
    pub source: Source,
    /// Cell metadata.
    #[serde(default)]
    pub metadata: CellMetadata,
    /// Fields not modelled explicitly (e.g. `id`, `attachments`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A raw cell. Never inspected for headings and never hidden.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCell {
    /// Cell source.
    pub source: Source,
    /// Cell metadata.
    #[serde(default)]
    pub metadata: CellMetadata,
    /// Fields not modelled explicitly.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One notebook cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    /// Executable code.
    Code(CodeCell),
    /// Rendered markdown.
    Markdown(MarkdownCell),
    /// Unrendered text passed through by notebook tools.
    Raw(RawCell),
}

impl Cell {
    /// Creates a markdown cell with the given source and tags.
    pub fn markdown(source: impl Into<String>, tags: &[&str]) -> Self {
        Cell::Markdown(MarkdownCell {
            source: Source(source.into()),
            metadata: metadata_with_tags(tags),
            extra: Map::new(),
        })
    }

    /// Creates an unexecuted code cell with the given source and tags.
    pub fn code(source: impl Into<String>, tags: &[&str]) -> Self {
        Cell::Code(CodeCell {
            source: Source(source.into()),
            metadata: metadata_with_tags(tags),
            ..CodeCell::default()
        })
    }

    /// Returns the cell source.
    pub fn source(&self) -> &Source {
        match self {
            Cell::Code(cell) => &cell.source,
            Cell::Markdown(cell) => &cell.source,
            Cell::Raw(cell) => &cell.source,
        }
    }

    /// Replaces the cell source.
    pub fn set_source(&mut self, source: impl Into<String>) {
        let source = Source(source.into());
        match self {
            Cell::Code(cell) => cell.source = source,
            Cell::Markdown(cell) => cell.source = source,
            Cell::Raw(cell) => cell.source = source,
        }
    }

    /// Returns the cell metadata.
    pub fn metadata(&self) -> &CellMetadata {
        match self {
            Cell::Code(cell) => &cell.metadata,
            Cell::Markdown(cell) => &cell.metadata,
            Cell::Raw(cell) => &cell.metadata,
        }
    }

    /// Returns the cell tags in stored order.
    pub fn tags(&self) -> &[String] {
        self.metadata().tags()
    }

    /// True if the cell carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }

    /// True if the cell's tags intersect `tags`.
    pub fn has_any_tag(&self, tags: &TagSet) -> bool {
        self.tags().iter().any(|t| tags.contains(t))
    }

    /// The `cell_type` discriminator.
    pub fn kind(&self) -> &'static str {
        match self {
            Cell::Code(_) => "code",
            Cell::Markdown(_) => "markdown",
            Cell::Raw(_) => "raw",
        }
    }
}

fn metadata_with_tags(tags: &[&str]) -> CellMetadata {
    CellMetadata {
        tags: (!tags.is_empty()).then(|| tags.iter().map(|t| t.to_string()).collect()),
        extra: Map::new(),
    }
}

fn default_nbformat() -> u32 {
    4
}

fn default_nbformat_minor() -> u32 {
    5
}

/// A notebook document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    /// Cells in document order.
    pub cells: Vec<Cell>,
    /// Notebook-level metadata (kernel spec, language info, ...).
    #[serde(default)]
    pub metadata: Map<String, Value>,
    /// Major format version.
    #[serde(default = "default_nbformat")]
    pub nbformat: u32,
    /// Minor format version.
    #[serde(default = "default_nbformat_minor")]
    pub nbformat_minor: u32,
    /// Unmodelled top-level fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Notebook {
    /// Creates a notebook with the given cells and empty metadata.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            metadata: Map::new(),
            nbformat: default_nbformat(),
            nbformat_minor: default_nbformat_minor(),
            extra: Map::new(),
        }
    }

    /// Parses notebook JSON.
    pub fn from_json(input: &str) -> Result<Self, NotebookError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Serializes to notebook JSON: one-space indent, sorted keys, trailing newline.
    pub fn to_json(&self) -> Result<String, NotebookError> {
        // Round-trip through `Value` so every object, flattened extras
        // included, comes out with sorted keys.
        let value = serde_json::to_value(self)?;
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;
        buf.push(b'\n');
        Ok(String::from_utf8(buf)?)
    }

    /// All cell sources joined with [`LINE_SEPARATOR`].
    pub fn joined_source(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.source().as_str())
            .collect::<Vec<_>>()
            .join(LINE_SEPARATOR)
    }

    /// Indices of cells carrying `tag`, in document order.
    pub fn cells_tagged(&self, tag: &str) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.has_tag(tag))
            .map(|(index, _)| index)
            .collect()
    }
}
