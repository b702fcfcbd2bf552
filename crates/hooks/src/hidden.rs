//! Solution hiding hooks.
//!
//! Each path names a problem notebook. Its solution notebook is found by
//! [`paired_solution`]; the solution's tagged code cells are hidden and the
//! result is compared against, or written over, the problem notebook.

use crate::Reporter;
use crate::files::{paired_solution, read_notebook, read_or_report, write_notebook};
use nbtidy_core::hide::DEFAULT_LANGUAGE;
use nbtidy_core::{CellHider, Notebook, TagSet, compare_notebooks};
use serde::Deserialize;
use std::io::Write;
use std::path::Path;

/// Suffix of solution notebooks when none is configured.
pub const DEFAULT_SOLUTION_SUFFIX: &str = ".ipynb";

/// What [`hide_solution_cells`] does with the hidden notebook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HideMode {
    /// Overwrite the problem notebook.
    #[default]
    Fix,
    /// Report the path of each stale problem notebook.
    Check,
    /// Report a unified diff for each stale problem notebook.
    Diff,
    /// Write the hidden notebook JSON to the output.
    Print,
}

/// Options for [`hide_solution_cells`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HideOptions {
    /// Code cells with any of these tags are hidden.
    pub tags: TagSet,
    /// Info string of the generated code fence.
    pub language: String,
    /// Suffix that replaces the problem notebook's inner extension.
    pub solution_suffix: String,
    /// Output mode.
    pub mode: HideMode,
}

impl Default for HideOptions {
    fn default() -> Self {
        Self {
            tags: TagSet::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            solution_suffix: DEFAULT_SOLUTION_SUFFIX.to_string(),
            mode: HideMode::default(),
        }
    }
}

impl HideOptions {
    fn hider(&self) -> CellHider {
        CellHider {
            tags: self.tags.clone(),
            language: self.language.clone(),
        }
    }
}

/// Regenerates problem notebooks from their solutions.
pub fn hide_solution_cells<P, W>(
    paths: &[P],
    options: &HideOptions,
    reporter: &mut Reporter<W>,
) -> usize
where
    P: AsRef<Path>,
    W: Write,
{
    if options.tags.is_empty() {
        reporter.warning("no tags given, nothing to hide");
    }
    if paths.is_empty() {
        reporter.warning("no files given");
    }
    let hider = options.hider();

    for dst in paths {
        let dst = dst.as_ref();
        let Some(src) = paired_solution(dst, &options.solution_suffix) else {
            continue;
        };
        log::info!("solution-notebook: {}", src.display());
        log::info!("problem-notebook: {}", dst.display());

        let Some(solution) = read_or_report(&src, reporter) else {
            continue;
        };
        let hidden = match hider.hide(&solution) {
            Ok(hidden) => {
                log::debug!("{}: hid {} cells", src.display(), hidden.hidden);
                hidden.notebook
            }
            Err(err) => {
                reporter.error(format!("{}: {err}", src.display()));
                continue;
            }
        };

        match options.mode {
            HideMode::Fix => match write_notebook(dst, &hidden) {
                Ok(true) => log::info!("{}: overwriting", dst.display()),
                Ok(false) => log::debug!("{}: up to date", dst.display()),
                Err(err) => reporter.error(format!("{}: {err}", dst.display())),
            },
            HideMode::Check | HideMode::Diff => {
                compare_with_problem(dst, &src, &hidden, options.mode, reporter);
            }
            HideMode::Print => match hidden.to_json() {
                Ok(json) => reporter.emit(json),
                Err(err) => reporter.error(format!("{}: {err}", dst.display())),
            },
        }
    }

    reporter.finish()
}

fn compare_with_problem<W: Write>(
    dst: &Path,
    src: &Path,
    hidden: &Notebook,
    mode: HideMode,
    reporter: &mut Reporter<W>,
) {
    let problem = match read_notebook(dst) {
        Ok(problem) => problem,
        Err(err) => {
            reporter.error(format!("{}: {err}", dst.display()));
            return;
        }
    };
    let dst_name = dst.display().to_string();
    let src_name = src.display().to_string();
    let diff = compare_notebooks(&problem, hidden, &dst_name, &src_name);
    if diff.is_empty() {
        log::debug!("{dst_name}: up to date");
        return;
    }

    if mode == HideMode::Diff {
        reporter.emit(diff.unified());
    } else {
        reporter.emit(&dst_name);
    }
    reporter.error(format!("{dst_name}: needs updating"));
}

/// Options for [`check_hidden_notebooks`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CheckHiddenOptions {
    /// Code cells with any of these tags are hidden.
    pub tags: TagSet,
    /// Info string of the generated code fence.
    pub language: String,
    /// Suffix that replaces the problem notebook's inner extension.
    pub solution_suffix: String,
    /// Report diffs instead of paths.
    pub diff: bool,
}

impl Default for CheckHiddenOptions {
    fn default() -> Self {
        Self {
            tags: TagSet::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            solution_suffix: DEFAULT_SOLUTION_SUFFIX.to_string(),
            diff: false,
        }
    }
}

impl From<&CheckHiddenOptions> for HideOptions {
    fn from(options: &CheckHiddenOptions) -> Self {
        Self {
            tags: options.tags.clone(),
            language: options.language.clone(),
            solution_suffix: options.solution_suffix.clone(),
            mode: if options.diff {
                HideMode::Diff
            } else {
                HideMode::Check
            },
        }
    }
}

/// Reports problem notebooks that are out of date with their solutions.
///
/// Nothing is written to disk.
pub fn check_hidden_notebooks<P, W>(
    paths: &[P],
    options: &CheckHiddenOptions,
    reporter: &mut Reporter<W>,
) -> usize
where
    P: AsRef<Path>,
    W: Write,
{
    hide_solution_cells(paths, &HideOptions::from(options), reporter)
}
