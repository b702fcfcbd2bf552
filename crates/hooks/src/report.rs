//! Per-invocation reporting sink.

use std::fmt::Display;
use std::io::{self, Write};

/// Collects the outcome of one hook invocation.
///
/// Status messages go to the `log` facade; results meant for the user
/// (summary lines, diffs, rewritten notebooks) go to the output writer.
/// The error count becomes the process exit status.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    errors: usize,
    warnings: usize,
    warning_is_error: bool,
}

impl Reporter<io::Stdout> {
    /// Reporter writing results to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    /// Reporter writing results to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            errors: 0,
            warnings: 0,
            warning_is_error: false,
        }
    }

    /// Counts warnings as errors.
    pub fn with_warning_is_error(mut self, warning_is_error: bool) -> Self {
        if warning_is_error {
            log::info!("treating warnings as errors");
        }
        self.warning_is_error = warning_is_error;
        self
    }

    /// Logs and counts an error.
    pub fn error(&mut self, message: impl Display) {
        log::error!("{message}");
        self.errors += 1;
    }

    /// Logs and counts a warning.
    pub fn warning(&mut self, message: impl Display) {
        log::warn!("{message}");
        self.warnings += 1;
    }

    /// Writes `text` to the output, adding a final newline if missing.
    ///
    /// A failed write is itself counted as an error.
    pub fn emit(&mut self, text: impl Display) {
        let text = text.to_string();
        let result = if text.ends_with('\n') {
            self.out.write_all(text.as_bytes())
        } else {
            writeln!(self.out, "{text}")
        };
        if let Err(err) = result {
            self.error(format!("failed to write output: {err}"));
        }
    }

    /// Errors so far, plus warnings when they count as errors.
    pub fn error_count(&self) -> usize {
        if self.warning_is_error {
            self.errors + self.warnings
        } else {
            self.errors
        }
    }

    /// Warnings so far.
    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    /// Logs the final verdict and returns the error count.
    pub fn finish(&mut self) -> usize {
        if let Err(err) = self.out.flush() {
            self.error(format!("failed to flush output: {err}"));
        }
        let count = self.error_count();
        if count == 0 {
            log::info!("❤️");
        } else {
            log::error!("💔");
        }
        count
    }

    /// Output written so far.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Consumes the reporter, returning its output writer.
    pub fn into_output(self) -> W {
        self.out
    }
}
