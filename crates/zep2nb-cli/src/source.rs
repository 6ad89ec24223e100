//! Reading the source note

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

/// Location meaning "read from stdin"
pub const STDIN: &str = "-";

/// Error type for reading a note
#[derive(Error, Debug)]
pub enum SourceError {
    /// The note lives in a remote store this tool cannot reach
    #[error("Unsupported note location '{0}': only local paths and '-' (stdin) are supported")]
    UnsupportedScheme(String),

    /// I/O error when reading the note
    #[error("Failed to read note from {location}: {source}")]
    Io {
        /// Path or `-`
        location: String,
        /// Underlying error
        source: io::Error,
    },
}

/// Read the raw text of a note.
///
/// `location` is a local path, or `-` for stdin. URLs such as `s3://...` are
/// rejected.
///
/// # Errors
///
/// Returns an error if the location is remote or cannot be read.
pub fn read_source(location: &str) -> Result<String, SourceError> {
    if location == STDIN {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .map_err(|source| SourceError::Io {
                location: "stdin".to_string(),
                source,
            })?;
        return Ok(content);
    }

    if let Some((scheme, _)) = location.split_once("://") {
        if !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SourceError::UnsupportedScheme(location.to_string()));
        }
    }

    read_path(Path::new(location))
}

fn read_path(path: &Path) -> Result<String, SourceError> {
    log::debug!("reading note from {}", path.display());
    fs::read_to_string(path).map_err(|source| SourceError::Io {
        location: path.display().to_string(),
        source,
    })
}
