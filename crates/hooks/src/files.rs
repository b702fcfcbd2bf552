//! Notebook files: scoped reads, atomic writes, file lists and solution pairing.

use crate::Reporter;
use nbtidy_core::{Notebook, NotebookError};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Reads and parses a notebook.
pub fn read_notebook(path: &Path) -> Result<Notebook, NotebookError> {
    let text = fs::read_to_string(path)?;
    Notebook::from_json(&text)
}

/// Reads a notebook, counting an error on the reporter when that fails.
pub(crate) fn read_or_report<W: Write>(path: &Path, reporter: &mut Reporter<W>) -> Option<Notebook> {
    match read_notebook(path) {
        Ok(notebook) => Some(notebook),
        Err(err) => {
            reporter.error(format!("{}: {err}", path.display()));
            None
        }
    }
}

/// Writes a notebook atomically.
///
/// The JSON goes to a temporary file next to `path` which then replaces it,
/// so a failure never leaves a half-written notebook. Existing permissions
/// are kept. Returns `false` without touching the file when its content
/// would not change.
pub fn write_notebook(path: &Path, notebook: &Notebook) -> Result<bool, NotebookError> {
    let json = notebook.to_json()?;
    if fs::read_to_string(path).is_ok_and(|current| current == json) {
        return Ok(false);
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    if let Ok(metadata) = fs::metadata(path) {
        file.as_file().set_permissions(metadata.permissions())?;
    }
    file.write_all(json.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(true)
}

/// Reads paths from a file, one per line; blank lines are skipped.
pub fn read_file_list(path: &Path) -> io::Result<Vec<PathBuf>> {
    Ok(fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Path of the solution notebook paired with `problem`.
///
/// The last extension is dropped and the one before it, if any, is
/// replaced by `suffix`: `lesson.problem.ipynb` pairs with `lesson.ipynb`
/// for the suffix `.ipynb`.
pub fn solution_path(problem: &Path, suffix: &str) -> PathBuf {
    problem
        .with_extension("")
        .with_extension(suffix.trim_start_matches('.'))
}

/// Solution notebook for `problem`, if it exists and is a different file.
pub fn paired_solution(problem: &Path, suffix: &str) -> Option<PathBuf> {
    let solution = solution_path(problem, suffix);
    if !solution.is_file() {
        log::debug!("{}: source file not found.", solution.display());
        return None;
    }
    if is_same_file(problem, &solution) {
        log::debug!(
            "{}: source and destination file are the same.",
            problem.display()
        );
        return None;
    }
    Some(solution)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbtidy_core::Cell;

    #[test]
    fn solution_path_replaces_inner_extension() {
        let path = Path::new("lessons/intro.problem.ipynb");
        assert_eq!(solution_path(path, ".ipynb"), PathBuf::from("lessons/intro.ipynb"));
        assert_eq!(
            solution_path(path, ".solution.ipynb"),
            PathBuf::from("lessons/intro.solution.ipynb")
        );
        assert_eq!(solution_path(Path::new("intro.ipynb"), ".ipynb"), PathBuf::from("intro.ipynb"));
    }

    #[test]
    fn pairing_skips_missing_and_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let problem = dir.path().join("intro.problem.ipynb");
        assert_eq!(paired_solution(&problem, ".ipynb"), None);

        let solution = dir.path().join("intro.ipynb");
        fs::write(&solution, "{}").unwrap();
        assert_eq!(paired_solution(&problem, ".ipynb"), Some(solution.clone()));
        assert_eq!(paired_solution(&solution, ".ipynb"), None);
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nb.ipynb");
        let nb = Notebook::new(vec![Cell::markdown("# Title\n\ntext", &["toc"])]);
        assert!(write_notebook(&path, &nb).unwrap());
        assert_eq!(read_notebook(&path).unwrap(), nb);
        assert!(!write_notebook(&path, &nb).unwrap());
    }

    #[test]
    fn unparseable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ipynb");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(read_notebook(&path), Err(NotebookError::JsonError(_))));
        assert!(matches!(
            read_notebook(&dir.path().join("missing.ipynb")),
            Err(NotebookError::IoError(_))
        ));
    }

    #[test]
    fn file_list_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("files.txt");
        fs::write(&list, "a.ipynb\n\n  b.ipynb  \n").unwrap();
        assert_eq!(
            read_file_list(&list).unwrap(),
            vec![PathBuf::from("a.ipynb"), PathBuf::from("b.ipynb")]
        );
    }
}
