#![deny(missing_docs)]
//! nbtidy hooks: batch entry points over notebook files.
//!
//! Every hook takes an ordered list of paths, an options struct and a
//! [`Reporter`], processes the files one at a time and returns the number of
//! errors. A failure on one file never stops the batch.

/// Notebook file access.
pub mod files;
/// Heading checks and listings.
pub mod headings;
/// Solution hiding and staleness checks.
pub mod hidden;
/// Kernel spec checks.
pub mod kernel;
/// Reporting sink.
pub mod report;
/// Table of contents insertion.
pub mod toc;

pub use files::{paired_solution, read_file_list, read_notebook, solution_path, write_notebook};
pub use headings::{HeadingCheckOptions, ListOptions, check_heading_levels, list_headings};
pub use hidden::{
    CheckHiddenOptions, DEFAULT_SOLUTION_SUFFIX, HideMode, HideOptions, check_hidden_notebooks,
    hide_solution_cells,
};
pub use kernel::{KernelOptions, check_kernel};
pub use report::Reporter;
pub use toc::{Output, TocOptions, insert_toc};
