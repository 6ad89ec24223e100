//! Zeppelin note to Jupyter notebook conversion

use crate::bootstrap::BootstrapConfig;
use crate::cell::{CellKind, TargetCell};
use crate::dialect::classify;
use crate::error::{NotebookError, Result};
use crate::note::{parse_note_from_reader, parse_note_from_str, SourceDocument};
use crate::notebook::TargetDocument;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// When the execution counter advances
///
/// Zeppelin has no execution counts, so converted code cells are numbered in
/// paragraph order starting at 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexPolicy {
    /// Advance after every converted paragraph, markdown included.
    /// Code cells following markdown cells show gaps in their numbering.
    #[default]
    EveryParagraph,
    /// Advance only after code cells, numbering them without gaps
    CodeOnly,
}

impl std::fmt::Display for IndexPolicy {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::EveryParagraph => "every-paragraph",
            Self::CodeOnly => "code-only",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for IndexPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "every-paragraph" | "every" | "all" => Ok(Self::EveryParagraph),
            "code-only" | "code" => Ok(Self::CodeOnly),
            _ => Err(format!(
                "Unknown index policy '{s}'. Expected: every-paragraph, code-only"
            )),
        }
    }
}

/// Options controlling a conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConvertOptions {
    /// Bootstrap cells placed before the converted paragraphs
    pub bootstrap: BootstrapConfig,
    /// Execution counter policy
    pub index_policy: IndexPolicy,
}

/// Converts Zeppelin notes into Jupyter notebooks
///
/// Conversion is a pure function of the note and the options: converting the
/// same note twice yields identical notebooks.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with the given options
    #[inline]
    #[must_use]
    pub const fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Options in use
    #[inline]
    #[must_use]
    pub const fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a parsed note
    ///
    /// Paragraphs without text are skipped and do not advance the execution
    /// counter.
    ///
    /// # Errors
    ///
    /// Returns [`NotebookError::MissingRequiredField`] if the note has no name.
    pub fn convert(&self, note: &SourceDocument) -> Result<TargetDocument> {
        let name = note
            .name
            .as_deref()
            .ok_or(NotebookError::MissingRequiredField("name"))?;

        let mut cells: Vec<TargetCell> = self.options.bootstrap.cells();
        let bootstrap_len = cells.len();
        let mut index: u32 = 0;

        for (position, paragraph) in note.paragraphs.iter().enumerate() {
            let Some(text) = paragraph.content() else {
                log::debug!("skipping empty paragraph {position} in '{name}'");
                continue;
            };

            let cell = classify(text, index);
            let advance = match self.options.index_policy {
                IndexPolicy::EveryParagraph => true,
                IndexPolicy::CodeOnly => cell.kind() == CellKind::Code,
            };
            if advance {
                index += 1;
            }
            cells.push(cell);
        }

        let doc = TargetDocument::new(name, cells);
        log::info!(
            "converted '{}': {} paragraphs -> {} code and {} markdown cells ({} bootstrap)",
            name,
            note.paragraphs.len(),
            doc.count(CellKind::Code),
            doc.count(CellKind::Markdown),
            bootstrap_len
        );

        Ok(doc)
    }

    /// Parse and convert a note from its JSON export
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the note has no name.
    pub fn convert_json(&self, content: &str) -> Result<TargetDocument> {
        let note = parse_note_from_str(content)?;
        self.convert(&note)
    }

    /// Parse and convert a note's JSON export from a reader
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails, the JSON is malformed or the note
    /// has no name.
    pub fn convert_reader<R: Read>(&self, reader: R) -> Result<TargetDocument> {
        let note = parse_note_from_reader(reader)?;
        self.convert(&note)
    }
}

/// Convert a parsed note with default options
///
/// # Errors
///
/// Returns an error if the note has no name.
#[must_use = "this function returns the converted notebook"]
pub fn convert_note(note: &SourceDocument) -> Result<TargetDocument> {
    Converter::new().convert(note)
}

/// Parse and convert a note's JSON export with default options
///
/// # Errors
///
/// Returns an error if the JSON is malformed or the note has no name.
#[must_use = "this function returns the converted notebook"]
pub fn convert_json(content: &str) -> Result<TargetDocument> {
    Converter::new().convert_json(content)
}

/// Parse and convert a note's JSON export from a reader with default options
///
/// # Errors
///
/// Returns an error if reading fails, the JSON is malformed or the note has
/// no name.
#[must_use = "this function returns the converted notebook"]
pub fn convert_reader<R: Read>(reader: R) -> Result<TargetDocument> {
    Converter::new().convert_reader(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::SourceParagraph;

    fn no_bootstrap(index_policy: IndexPolicy) -> Converter {
        Converter::with_options(ConvertOptions {
            bootstrap: BootstrapConfig {
                enabled: false,
                ..BootstrapConfig::default()
            },
            index_policy,
        })
    }

    #[test]
    fn test_missing_name() {
        let note = SourceDocument {
            name: None,
            paragraphs: vec![SourceParagraph {
                text: Some("1+1".to_string()),
            }],
        };
        let err = convert_note(&note).unwrap_err();
        assert!(matches!(err, NotebookError::MissingRequiredField("name")));
    }

    #[test]
    fn test_bootstrap_cells_come_first() {
        let doc = convert_note(&SourceDocument::new("N", ["%md intro"])).unwrap();
        assert_eq!(doc.cells.len(), 3);
        assert_eq!(doc.cells[0], BootstrapConfig::default().cells()[0]);
        assert_eq!(doc.cells[2].kind(), CellKind::Markdown);
    }

    #[test]
    fn test_every_paragraph_policy_counts_markdown() {
        let doc = no_bootstrap(IndexPolicy::EveryParagraph)
            .convert(&SourceDocument::new("N", ["a", "%md b", "c"]))
            .unwrap();
        let indices: Vec<_> = doc.cells.iter().map(TargetCell::execution_index).collect();
        assert_eq!(indices, vec![Some(0), None, Some(2)]);
    }

    #[test]
    fn test_code_only_policy_has_no_gaps() {
        let doc = no_bootstrap(IndexPolicy::CodeOnly)
            .convert(&SourceDocument::new("N", ["a", "%md b", "c", "%spark d"]))
            .unwrap();
        let indices: Vec<_> = doc.cells.iter().map(TargetCell::execution_index).collect();
        assert_eq!(indices, vec![Some(0), None, Some(1), Some(2)]);
    }

    #[test]
    fn test_empty_paragraphs_do_not_advance() {
        let note = SourceDocument {
            name: Some("N".to_string()),
            paragraphs: vec![
                SourceParagraph {
                    text: Some("first".to_string()),
                },
                SourceParagraph { text: None },
                SourceParagraph {
                    text: Some(String::new()),
                },
                SourceParagraph {
                    text: Some(" \n ".to_string()),
                },
                SourceParagraph {
                    text: Some("second".to_string()),
                },
            ],
        };
        let doc = no_bootstrap(IndexPolicy::EveryParagraph)
            .convert(&note)
            .unwrap();
        assert_eq!(doc.cells.len(), 2);
        assert_eq!(doc.cells[1].execution_index(), Some(1));
    }

    #[test]
    fn test_convert_json() {
        let doc = convert_json(r#"{"name": "J", "paragraphs": [{"text": "%spark 1"}]}"#).unwrap();
        assert_eq!(doc.name, "J");
        assert_eq!(doc.cells.last().unwrap().source(), "%%scala  1");

        assert!(matches!(
            convert_json("{"),
            Err(NotebookError::JsonError(_))
        ));
    }

    #[test]
    fn test_convert_reader() {
        let json = br#"{"name": "R", "paragraphs": [{"text": "%md a"}, {"text": "b"}]}"#;
        let doc = convert_reader(&json[..]).unwrap();
        assert_eq!(doc.name, "R");
        assert_eq!(doc.count(CellKind::Markdown), 1);
        assert_eq!(doc.cells.last().unwrap().execution_index(), Some(1));

        let doc = no_bootstrap(IndexPolicy::CodeOnly)
            .convert_reader(&json[..])
            .unwrap();
        assert_eq!(doc.cells.len(), 2);
        assert_eq!(doc.cells[1].execution_index(), Some(0));

        assert!(matches!(
            convert_reader(&b"{\"paragraphs\": []}"[..]),
            Err(NotebookError::MissingRequiredField("name"))
        ));
    }

    #[test]
    fn test_index_policy_parse() {
        assert_eq!("code-only".parse::<IndexPolicy>().unwrap(), IndexPolicy::CodeOnly);
        assert_eq!("CODE_ONLY".parse::<IndexPolicy>().unwrap(), IndexPolicy::CodeOnly);
        assert_eq!(
            "every-paragraph".parse::<IndexPolicy>().unwrap(),
            IndexPolicy::EveryParagraph
        );
        assert!("sometimes".parse::<IndexPolicy>().is_err());
        assert_eq!(IndexPolicy::CodeOnly.to_string(), "code-only");
    }
}
