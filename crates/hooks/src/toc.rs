//! Table of contents hook.

use crate::Reporter;
use crate::files::{read_or_report, write_notebook};
use nbtidy_core::toc::{ANCHOR_TAG, insert_toc as insert_into};
use nbtidy_core::{ParseOptions, TagSet, TocError, extract_headings};
use serde::Deserialize;
use std::io::Write;
use std::path::Path;

/// Destination of rewritten notebooks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Output {
    /// Write the JSON to the reporter's output.
    #[default]
    Stdout,
    /// Replace the notebook file.
    InPlace,
}

/// Options for [`insert_toc`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TocOptions {
    /// Markdown cells with any of these tags are left out of the TOC.
    /// The anchor cell is always left out.
    pub ignore_tags: TagSet,
    /// Skip notebooks without an anchor cell instead of counting an error.
    pub allow_missing: bool,
    /// Where rewritten notebooks go.
    pub output: Output,
    /// Markdown parser options.
    pub parse: ParseOptions,
}

/// Writes a table of contents into the anchor cell of each notebook.
pub fn insert_toc<P, W>(paths: &[P], options: &TocOptions, reporter: &mut Reporter<W>) -> usize
where
    P: AsRef<Path>,
    W: Write,
{
    let mut ignore_tags = options.ignore_tags.clone();
    ignore_tags.insert(ANCHOR_TAG.to_string());

    for path in paths {
        let path = path.as_ref();
        log::info!("checking: {}", path.display());

        let Some(mut notebook) = read_or_report(path, reporter) else {
            continue;
        };
        let headings = match extract_headings(&notebook, &ignore_tags, &options.parse) {
            Ok(headings) => headings,
            Err(err) => {
                reporter.error(format!("{}: {err}", path.display()));
                continue;
            }
        };

        let anchors = notebook.cells_tagged(ANCHOR_TAG);
        if anchors.len() > 1 {
            log::warn!(
                "{}: cells {anchors:?} are all tagged '{ANCHOR_TAG}', using cell {}",
                path.display(),
                anchors[0]
            );
        }

        let inserted = match insert_into(&mut notebook, &headings) {
            Ok(insertion) => {
                log::info!(
                    "{}: inserted table of contents into cell {}\n{}",
                    path.display(),
                    insertion.cell,
                    insertion.content
                );
                true
            }
            Err(TocError::MissingAnchor) if options.allow_missing => {
                log::info!("{}: {}, skipping", path.display(), TocError::MissingAnchor);
                false
            }
            Err(err) => {
                reporter.error(format!("{}: {err}", path.display()));
                false
            }
        };

        match options.output {
            Output::InPlace if inserted => match write_notebook(path, &notebook) {
                Ok(true) => log::info!("{}: overwriting", path.display()),
                Ok(false) => log::debug!("{}: unchanged", path.display()),
                Err(err) => reporter.error(format!("{}: {err}", path.display())),
            },
            Output::InPlace => {}
            Output::Stdout => match notebook.to_json() {
                Ok(json) => reporter.emit(json),
                Err(err) => reporter.error(format!("{}: {err}", path.display())),
            },
        }
    }

    reporter.finish()
}
