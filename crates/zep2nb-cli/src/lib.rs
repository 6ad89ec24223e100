//! Plumbing for the `zep2nb` command-line tool
//!
//! The conversion itself lives in `zep2nb-notebook`. This crate handles the
//! parts around it:
//! - reading the note from a file or stdin ([`source`])
//! - choosing a free output file name ([`output`])
//! - `.zep2nb.toml` configuration discovery and merging ([`config`])
//!
//! # Usage
//!
//! ```bash
//! # Writes "<note name>.ipynb" in the current directory
//! zep2nb note.json
//!
//! # Explicit target
//! zep2nb note.json converted/sales.ipynb
//!
//! # Read from stdin, write into a directory
//! cat note.json | zep2nb - --output-dir notebooks/
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [bootstrap]
//! jdbc_host = "jr1000-splice-hregion"
//! sql_datasource = true
//!
//! [convert]
//! index_policy = "code-only"
//! output_dir = "notebooks"
//! ```

pub mod config;
pub mod output;
pub mod source;
