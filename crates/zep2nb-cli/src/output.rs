//! Output file naming
//!
//! When no target path is given the notebook is named after the note. An
//! existing file is never replaced: `Name.ipynb`, `Name (1).ipynb`, ...
//! `Name (999).ipynb` are tried in turn and the first free one is created.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of written notebooks
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Number of file names tried before giving up
pub const MAX_CANDIDATES: usize = 1000;

/// Error type for writing the notebook
#[derive(Error, Debug)]
pub enum OutputError {
    /// Every candidate file name is taken
    #[error("Cannot write '{name}': {attempts} versions already exist")]
    CollisionExhausted {
        /// Note name the file names derive from
        name: String,
        /// Candidates tried
        attempts: usize,
    },

    /// Explicit target exists and overwriting was refused
    #[error("Output file already exists: {0}")]
    AlreadyExists(PathBuf),

    /// I/O error when creating or writing the file
    #[error("Failed to write {path}: {source}")]
    Io {
        /// File being written
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}

/// File stem for a note name.
///
/// Zeppelin names may contain folder separators (`team/reports/sales`); those
/// would otherwise point into directories that do not exist.
#[must_use]
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    let stem = stem.trim();
    if stem.is_empty() {
        "Untitled".to_string()
    } else {
        stem.to_string()
    }
}

/// Candidate file names for a note, in the order they are tried
pub fn candidates(name: &str) -> impl Iterator<Item = String> {
    let stem = file_stem(name);
    (0..MAX_CANDIDATES).map(move |n| {
        if n == 0 {
            format!("{stem}.{NOTEBOOK_EXTENSION}")
        } else {
            format!("{stem} ({n}).{NOTEBOOK_EXTENSION}")
        }
    })
}

/// Create the first free candidate file in `dir`.
///
/// Files are opened with `create_new`, so an existing file is never touched.
///
/// # Errors
///
/// Returns [`OutputError::CollisionExhausted`] when all candidates exist.
pub fn create_unique(dir: &Path, name: &str) -> Result<(PathBuf, File), OutputError> {
    for candidate in candidates(name) {
        let path = dir.join(candidate);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                log::trace!("{} exists, trying next name", path.display());
            }
            Err(source) => return Err(OutputError::Io { path, source }),
        }
    }

    Err(OutputError::CollisionExhausted {
        name: name.to_string(),
        attempts: MAX_CANDIDATES,
    })
}

/// Write `content` to a new file named after the note in `dir`
///
/// # Errors
///
/// Returns an error if no free name exists or writing fails. A file that
/// fails mid-write is removed.
pub fn write_derived(dir: &Path, name: &str, content: &str) -> Result<PathBuf, OutputError> {
    let (path, mut file) = create_unique(dir, name)?;
    if let Err(source) = file.write_all(content.as_bytes()) {
        drop(file);
        let _ = fs::remove_file(&path);
        return Err(OutputError::Io { path, source });
    }
    Ok(path)
}

/// Write `content` to an explicit path
///
/// Without `no_clobber` an existing file is replaced through a sibling
/// temporary file, so a failed write leaves the old file intact.
///
/// # Errors
///
/// Returns [`OutputError::AlreadyExists`] if `no_clobber` is set and the path
/// exists, or an I/O error.
pub fn write_explicit(path: &Path, content: &str, no_clobber: bool) -> Result<(), OutputError> {
    let io_error = |source: io::Error| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    if no_clobber {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(OutputError::AlreadyExists(path.to_path_buf()));
            }
            Err(source) => return Err(io_error(source)),
        };
        if let Err(source) = file.write_all(content.as_bytes()) {
            drop(file);
            let _ = fs::remove_file(path);
            return Err(io_error(source));
        }
        return Ok(());
    }

    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staged = tempfile::Builder::new()
        .prefix(".zep2nb-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(io_error)?;
    staged.write_all(content.as_bytes()).map_err(io_error)?;
    staged.persist(path).map_err(|e| io_error(e.error))?;
    log::trace!("replaced {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_candidates() {
        let names: Vec<String> = candidates("Sales").collect();
        assert_eq!(names.len(), MAX_CANDIDATES);
        assert_eq!(names[0], "Sales.ipynb");
        assert_eq!(names[1], "Sales (1).ipynb");
        assert_eq!(names[999], "Sales (999).ipynb");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("team/reports/sales"), "team_reports_sales");
        assert_eq!(file_stem("a\\b"), "a_b");
        assert_eq!(file_stem("  "), "Untitled");
        assert_eq!(file_stem("Quarterly Sales"), "Quarterly Sales");
    }

    #[test]
    fn test_create_unique_tries_numbered_suffixes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("N.ipynb"), "old").unwrap();
        fs::write(dir.path().join("N (1).ipynb"), "old").unwrap();

        let path = write_derived(dir.path(), "N", "new").unwrap();
        assert_eq!(path, dir.path().join("N (2).ipynb"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(fs::read_to_string(dir.path().join("N.ipynb")).unwrap(), "old");
    }

    #[test]
    fn test_collision_exhausted() {
        let dir = TempDir::new().unwrap();
        for candidate in candidates("Full") {
            fs::write(dir.path().join(candidate), "").unwrap();
        }

        let err = write_derived(dir.path(), "Full", "x").unwrap_err();
        assert!(matches!(
            err,
            OutputError::CollisionExhausted { attempts: 1000, .. }
        ));
        assert!(!dir.path().join("Full (1000).ipynb").exists());
    }

    #[test]
    fn test_write_explicit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.ipynb");

        write_explicit(&path, "one", false).unwrap();
        write_explicit(&path, "two", false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");

        let err = write_explicit(&path, "three", true).unwrap_err();
        assert!(matches!(err, OutputError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
    }

    #[test]
    fn test_overwrite_leaves_no_staging_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.ipynb");
        fs::write(&path, "old").unwrap();

        write_explicit(&path, "new", false).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.ipynb")]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_explicit_into_missing_directory_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        for no_clobber in [false, true] {
            let err = write_explicit(&missing.join("out.ipynb"), "x", no_clobber).unwrap_err();
            assert!(matches!(err, OutputError::Io { .. }));
        }
        assert!(!missing.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = write_derived(&dir.path().join("missing"), "N", "x").unwrap_err();
        assert!(matches!(err, OutputError::Io { .. }));
    }
}
