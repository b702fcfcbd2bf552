//! Solution hiding.
//!
//! Tagged code cells become markdown cells whose source is a collapsed
//! `<details>` block with the original code inside a fenced code block.
//! Markdown and raw cells keep their content even when tagged.

use crate::HideError;
use crate::notebook::{Cell, MarkdownCell, Notebook, Source, TagSet};
use serde::Deserialize;

/// Fence language used when none is configured.
pub const DEFAULT_LANGUAGE: &str = "python";

const SUMMARY: &str = "<summary>👉 <b>click to see solution</b></summary>";

/// Converts tagged code cells into collapsed solution blocks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CellHider {
    /// Cells carrying any of these tags are hidden.
    pub tags: TagSet,
    /// Info string of the fenced code block.
    pub language: String,
}

impl Default for CellHider {
    fn default() -> Self {
        Self {
            tags: TagSet::new(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// A notebook with its solution cells hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct HiddenNotebook {
    /// The transformed notebook.
    pub notebook: Notebook,
    /// Number of code cells that were converted.
    pub hidden: usize,
}

impl CellHider {
    /// Creates a hider for the given tags.
    pub fn new(tags: TagSet) -> Self {
        Self {
            tags,
            ..Self::default()
        }
    }

    /// Renders the collapsed block for one code cell's source.
    pub fn render(&self, source: &str) -> String {
        let fence = "`".repeat(fence_length(source));
        format!(
            "<details>\n        {SUMMARY}\n\n    {fence}{language}\n    {source}\n    {fence}\n    </details>",
            language = self.language
        )
    }

    /// Returns a copy of `notebook` with tagged code cells hidden.
    ///
    /// Fails with [`HideError::MissingTaggedCells`] when no cell of any type
    /// carries one of the tags.
    pub fn hide(&self, notebook: &Notebook) -> Result<HiddenNotebook, HideError> {
        if !notebook.cells.iter().any(|cell| cell.has_any_tag(&self.tags)) {
            return Err(HideError::MissingTaggedCells {
                tags: self.tags.iter().cloned().collect(),
            });
        }

        let mut hidden = 0;
        let cells = notebook
            .cells
            .iter()
            .map(|cell| match cell {
                Cell::Code(code) if cell.has_any_tag(&self.tags) => {
                    hidden += 1;
                    Cell::Markdown(MarkdownCell {
                        source: Source::from(self.render(code.source.as_str())),
                        metadata: code.metadata.clone(),
                        extra: code.extra.clone(),
                    })
                }
                _ => cell.clone(),
            })
            .collect();

        Ok(HiddenNotebook {
            notebook: Notebook {
                cells,
                metadata: notebook.metadata.clone(),
                nbformat: notebook.nbformat,
                nbformat_minor: notebook.nbformat_minor,
                extra: notebook.extra.clone(),
            },
            hidden,
        })
    }
}

/// Backtick fence long enough that `source` cannot close it.
fn fence_length(source: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for ch in source.chars() {
        if ch == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    if longest >= 3 { longest + 1 } else { 3 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::{CodeCell, tag_set};
    use serde_json::{Map, Value};

    fn hider() -> CellHider {
        CellHider::new(tag_set(["solution"]))
    }

    #[test]
    fn renders_fixed_template() {
        assert_eq!(
            hider().render("x = 1"),
            "<details>\n        <summary>👉 <b>click to see solution</b></summary>\n\n    ```python\n    x = 1\n    ```\n    </details>"
        );
    }

    #[test]
    fn later_source_lines_are_embedded_verbatim() {
        insta::assert_snapshot!(hider().render("x = 1\nprint(x)"), @r"
        <details>
                <summary>👉 <b>click to see solution</b></summary>

            ```python
            x = 1
        print(x)
            ```
            </details>
        ");
    }

    #[test]
    fn hides_tagged_code_cell() {
        let mut extra = Map::new();
        extra.insert("id".into(), Value::from("c1"));
        let code = Cell::Code(CodeCell {
            source: Source::from("answer = 42"),
            execution_count: Some(7),
            outputs: vec![Value::from("out")],
            metadata: crate::notebook::CellMetadata {
                tags: Some(vec!["solution".into()]),
                extra: Map::new(),
            },
            extra,
        });
        let nb = Notebook::new(vec![code]);

        let hidden = hider().hide(&nb).unwrap();
        assert_eq!(hidden.hidden, 1);
        let Cell::Markdown(cell) = &hidden.notebook.cells[0] else {
            panic!("expected a markdown cell");
        };
        assert!(cell.source.as_str().contains("```python\n    answer = 42\n    ```"));
        assert_eq!(cell.metadata.tags(), ["solution".to_string()]);
        assert_eq!(cell.extra.get("id"), Some(&Value::from("c1")));

        let json = hidden.notebook.to_json().unwrap();
        assert!(!json.contains("execution_count"));
        assert!(!json.contains("outputs"));
    }

    #[test]
    fn tagged_markdown_cell_is_unchanged() {
        let nb = Notebook::new(vec![Cell::markdown("The answer is 42.", &["solution"])]);
        let hidden = hider().hide(&nb).unwrap();
        assert_eq!(hidden.hidden, 0);
        assert_eq!(hidden.notebook, nb);
    }

    #[test]
    fn untagged_cells_are_unchanged() {
        let nb = Notebook::new(vec![
            Cell::code("setup()", &[]),
            Cell::code("solve()", &["solution"]),
            Cell::code("check()", &["other"]),
        ]);
        let hidden = hider().hide(&nb).unwrap();
        assert_eq!(hidden.hidden, 1);
        assert_eq!(hidden.notebook.cells[0], nb.cells[0]);
        assert_eq!(hidden.notebook.cells[2], nb.cells[2]);
        assert_eq!(hidden.notebook.cells[1].kind(), "markdown");
    }

    #[test]
    fn input_notebook_is_not_modified() {
        let nb = Notebook::new(vec![Cell::code("solve()", &["solution"])]);
        let before = nb.clone();
        let _ = hider().hide(&nb).unwrap();
        assert_eq!(nb, before);
    }

    #[test]
    fn no_tagged_cells_is_an_error() {
        let nb = Notebook::new(vec![Cell::code("solve()", &["other"])]);
        assert_eq!(
            hider().hide(&nb),
            Err(HideError::MissingTaggedCells {
                tags: vec!["solution".into()]
            })
        );
    }

    #[test]
    fn fence_grows_past_backticks_in_source() {
        let rendered = hider().render("s = \"\"\"\n```\nnot closed\n```\n\"\"\"");
        assert!(rendered.contains("\n    ````python\n"));
        assert!(rendered.ends_with("\n    ````\n    </details>"));
        assert_eq!(fence_length("`a` ``b``"), 3);
    }

    #[test]
    fn language_is_configurable() {
        let hider: CellHider =
            serde_json::from_str(r#"{"tags": ["solution"], "language": "r"}"#).unwrap();
        assert!(hider.render("1 + 1").contains("```r\n    1 + 1\n    ```"));
    }
}
