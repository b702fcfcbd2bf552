//! Kernel spec hook.

use crate::Reporter;
use crate::files::{read_or_report, write_notebook};
use nbtidy_core::KernelSpec;
use serde::Deserialize;
use std::io::Write;
use std::path::Path;

/// Options for [`check_kernel`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct KernelOptions {
    /// Expected kernel spec fields.
    pub kernel: KernelSpec,
    /// Rewrite notebooks that do not match.
    pub fix: bool,
}

/// Checks each notebook's kernel spec, optionally fixing it in place.
///
/// A notebook that does not match counts as an error even when it was fixed.
pub fn check_kernel<P, W>(paths: &[P], options: &KernelOptions, reporter: &mut Reporter<W>) -> usize
where
    P: AsRef<Path>,
    W: Write,
{
    if options.kernel.is_empty() {
        reporter.warning("no kernel spec fields given, nothing to check");
    }

    for path in paths {
        let path = path.as_ref();
        log::info!("checking: {}", path.display());

        let Some(mut notebook) = read_or_report(path, reporter) else {
            continue;
        };
        let Err(err) = options.kernel.check(&notebook) else {
            continue;
        };

        reporter.emit(path.display());
        reporter.error(format!("{}: {err}", path.display()));

        if options.fix {
            options.kernel.fix(&mut notebook);
            match write_notebook(path, &notebook) {
                Ok(_) => log::info!("{}: fixed kernel spec", path.display()),
                Err(err) => reporter.error(format!("{}: {err}", path.display())),
            }
        }
    }

    reporter.finish()
}
