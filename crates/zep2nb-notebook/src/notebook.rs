//! Target notebook document and its fixed metadata envelope
//!
//! Field order in these structs is alphabetical so the serialized notebook
//! matches nbformat's sorted-key output.

use crate::cell::{CellKind, TargetCell};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// nbformat major version written by the converter
pub const NBFORMAT_MAJOR: u32 = 4;
/// nbformat minor version written by the converter
pub const NBFORMAT_MINOR: u32 = 2;

/// A converted Jupyter notebook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDocument {
    /// Notebook name, used to derive the output file name.
    ///
    /// Not part of the nbformat schema, so it is never serialized.
    #[serde(skip)]
    pub name: String,
    /// Cells in notebook order
    pub cells: Vec<TargetCell>,
    /// Notebook-level metadata
    pub metadata: NotebookMetadata,
    /// Major format version
    pub nbformat: u32,
    /// Minor format version
    pub nbformat_minor: u32,
}

impl TargetDocument {
    /// Wrap cells in the fixed envelope
    #[must_use]
    pub fn new(name: impl Into<String>, cells: Vec<TargetCell>) -> Self {
        Self {
            name: name.into(),
            cells,
            metadata: NotebookMetadata::default(),
            nbformat: NBFORMAT_MAJOR,
            nbformat_minor: NBFORMAT_MINOR,
        }
    }

    /// Format version as `(major, minor)`
    #[inline]
    #[must_use]
    pub const fn format_version(&self) -> (u32, u32) {
        (self.nbformat, self.nbformat_minor)
    }

    /// Number of cells of the given kind
    #[must_use]
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind() == kind).count()
    }
}

/// Notebook-level metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookMetadata {
    /// Kernel the notebook runs on
    pub kernelspec: KernelSpec,
    /// Language of the kernel
    pub language_info: LanguageInfo,
    /// Table-of-contents extension settings
    pub toc: TocSettings,
}

/// Kernel descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelSpec {
    /// Human-readable kernel name
    pub display_name: String,
    /// Kernel language
    pub language: String,
    /// Kernel identifier
    pub name: String,
}

impl Default for KernelSpec {
    fn default() -> Self {
        Self {
            display_name: "Python 3".to_string(),
            language: "python".to_string(),
            name: "python3".to_string(),
        }
    }
}

/// Language descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// Editor highlighting mode
    pub codemirror_mode: CodemirrorMode,
    /// Extension for exported scripts
    pub file_extension: String,
    /// MIME type of exported scripts
    pub mimetype: String,
    /// Language name
    pub name: String,
    /// nbconvert exporter
    pub nbconvert_exporter: String,
    /// Pygments lexer
    pub pygments_lexer: String,
    /// Language version
    pub version: String,
}

impl Default for LanguageInfo {
    fn default() -> Self {
        Self {
            codemirror_mode: CodemirrorMode::default(),
            file_extension: ".py".to_string(),
            mimetype: "text/x-python".to_string(),
            name: "python".to_string(),
            nbconvert_exporter: "python".to_string(),
            pygments_lexer: "ipython3".to_string(),
            version: "3.7.3".to_string(),
        }
    }
}

/// CodeMirror mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodemirrorMode {
    /// Mode name
    pub name: String,
    /// Mode version
    pub version: u32,
}

impl Default for CodemirrorMode {
    fn default() -> Self {
        Self {
            name: "ipython".to_string(),
            version: 3,
        }
    }
}

/// Settings for the `toc2` notebook extension
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocSettings {
    /// Number given to the first heading
    pub base_numbering: u32,
    /// Navigation menu state
    pub nav_menu: Map<String, Value>,
    /// Prefix headings with section numbers
    pub number_sections: bool,
    /// Show the table of contents in a sidebar
    #[serde(rename = "sideBar")]
    pub side_bar: bool,
    /// Leave the first level-1 heading out of the table
    pub skip_h1_title: bool,
    /// Title of the table-of-contents cell
    pub title_cell: String,
    /// Title of the sidebar
    pub title_sidebar: String,
    /// Insert a table-of-contents cell into the notebook
    pub toc_cell: bool,
    /// Saved window position
    pub toc_position: Map<String, Value>,
    /// Show the section list when the notebook opens
    pub toc_section_display: bool,
    /// Show the floating window when the notebook opens
    pub toc_window_display: bool,
}

impl Default for TocSettings {
    fn default() -> Self {
        Self {
            base_numbering: 1,
            nav_menu: Map::new(),
            number_sections: false,
            side_bar: false,
            skip_h1_title: false,
            title_cell: "Table of Contents".to_string(),
            title_sidebar: "Contents".to_string(),
            toc_cell: false,
            toc_position: Map::new(),
            toc_section_display: false,
            toc_window_display: false,
        }
    }
}
