//! Heading hooks: hierarchy checks and heading listings.

use crate::Reporter;
use crate::files::read_or_report;
use nbtidy_core::{ParseOptions, RuleKind, RuleSet, TagSet, extract_headings, render_toc};
use serde::Deserialize;
use std::io::Write;
use std::path::Path;

/// Options for [`check_heading_levels`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HeadingCheckOptions {
    /// Markdown cells with any of these tags are not checked.
    pub ignore_tags: TagSet,
    /// Enabled rules, in reporting order.
    pub rules: Vec<RuleKind>,
    /// Markdown parser options.
    pub parse: ParseOptions,
}

impl Default for HeadingCheckOptions {
    fn default() -> Self {
        Self {
            ignore_tags: TagSet::new(),
            rules: RuleKind::ALL.to_vec(),
            parse: ParseOptions::default(),
        }
    }
}

/// Checks the heading hierarchy of each notebook.
///
/// Every violation is one error. For each violation a summary line
/// `path:rule:level=L(cell=C)...` is written to the output and the offending
/// headings are logged.
pub fn check_heading_levels<P, W>(
    paths: &[P],
    options: &HeadingCheckOptions,
    reporter: &mut Reporter<W>,
) -> usize
where
    P: AsRef<Path>,
    W: Write,
{
    let rules = RuleSet::new(options.rules.iter().copied());
    if rules.is_empty() {
        log::debug!("no heading rules enabled");
        return reporter.finish();
    }
    log::debug!("heading rules: {rules:?}");

    for path in paths {
        let path = path.as_ref();
        log::info!("checking: {}", path.display());

        let Some(notebook) = read_or_report(path, reporter) else {
            continue;
        };
        let headings = match extract_headings(&notebook, &options.ignore_tags, &options.parse) {
            Ok(headings) => headings,
            Err(err) => {
                reporter.error(format!("{}: {err}", path.display()));
                continue;
            }
        };

        for violation in rules.validate(&headings) {
            reporter.emit(format!("{}:{violation}", path.display()));
            let details: Vec<String> = violation
                .offending
                .headings()
                .iter()
                .map(|heading| format!("{}: {}", heading.cell, heading.markup()))
                .collect();
            reporter.error(format!("{}\n{}", path.display(), details.join("\n")));
        }
    }

    reporter.finish()
}

/// Options for [`list_headings`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ListOptions {
    /// Markdown cells with any of these tags are not listed.
    pub ignore_tags: TagSet,
    /// Markdown parser options.
    pub parse: ParseOptions,
}

/// Writes the heading list of each notebook, in table-of-contents form.
pub fn list_headings<P, W>(paths: &[P], options: &ListOptions, reporter: &mut Reporter<W>) -> usize
where
    P: AsRef<Path>,
    W: Write,
{
    for path in paths {
        let path = path.as_ref();
        log::info!("checking: {}", path.display());

        let Some(notebook) = read_or_report(path, reporter) else {
            continue;
        };
        match extract_headings(&notebook, &options.ignore_tags, &options.parse) {
            Ok(headings) => reporter.emit(render_toc(&headings)),
            Err(err) => reporter.error(format!("{}: {err}", path.display())),
        }
    }

    reporter.finish()
}
