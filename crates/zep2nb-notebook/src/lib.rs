//! # zep2nb-notebook
//!
//! Converts Apache Zeppelin notes into Jupyter notebooks (nbformat 4.2).
//!
//! Each Zeppelin paragraph is classified by its interpreter directive and
//! rewritten into one Jupyter cell:
//! - `%md` paragraphs become markdown cells
//! - `%spark.pyspark` paragraphs become plain Python code cells
//! - `%spark` paragraphs become `%%scala` code cells
//! - `%splicemachine` paragraphs become `%%sql` code cells
//! - anything else is kept as a code cell unchanged
//!
//! A configurable set of bootstrap cells, which recreate the Spark session and
//! database connection Zeppelin provides implicitly, is placed first.
//!
//! ## Example
//!
//! ```
//! use zep2nb_notebook::{convert_json, to_ipynb_string, Style};
//!
//! let note = r#"{"name": "Demo", "paragraphs": [{"text": "%md # Hello"}]}"#;
//! let notebook = convert_json(note)?;
//! assert_eq!(notebook.name, "Demo");
//! let ipynb = to_ipynb_string(&notebook, Style::Pretty)?;
//! assert!(ipynb.contains("\"# Hello\""));
//! # Ok::<(), zep2nb_notebook::NotebookError>(())
//! ```

/// Bootstrap cell configuration
pub mod bootstrap;
/// Target notebook cells
pub mod cell;
/// Note to notebook conversion
pub mod convert;
/// Paragraph classification
pub mod dialect;
/// Error types for conversion
pub mod error;
/// Zeppelin note model
pub mod note;
/// Target notebook document
pub mod notebook;
/// Notebook serialization
pub mod writer;

pub use bootstrap::BootstrapConfig;
pub use cell::{CellKind, CellMetadata, TargetCell};
pub use convert::{
    convert_json, convert_note, convert_reader, ConvertOptions, Converter, IndexPolicy,
};
pub use dialect::{classify, Dialect};
pub use error::{NotebookError, Result};
pub use note::{parse_note_from_reader, parse_note_from_str, SourceDocument, SourceParagraph};
pub use notebook::{NotebookMetadata, TargetDocument};
pub use writer::{to_ipynb_string, write_ipynb, Style};
