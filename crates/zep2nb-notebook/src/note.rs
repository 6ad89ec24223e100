//! Zeppelin note (source document) model
//!
//! Only the fields the converter reads are modelled. Everything else in a
//! Zeppelin export (`config`, `results`, `dateUpdated`, ...) is ignored.

use crate::error::Result;
use serde::Deserialize;
use std::io::Read;

/// A Zeppelin note as exported to JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SourceDocument {
    /// Note name; required for conversion
    #[serde(default)]
    pub name: Option<String>,
    /// Paragraphs in display order
    #[serde(default)]
    pub paragraphs: Vec<SourceParagraph>,
}

/// One Zeppelin paragraph
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SourceParagraph {
    /// Paragraph text, including its leading interpreter directive
    #[serde(default)]
    pub text: Option<String>,
}

impl SourceDocument {
    /// Create a note from a name and paragraph texts
    #[must_use]
    pub fn new<N, I, T>(name: N, texts: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: Some(name.into()),
            paragraphs: texts
                .into_iter()
                .map(|t| SourceParagraph {
                    text: Some(t.into()),
                })
                .collect(),
        }
    }
}

impl SourceParagraph {
    /// Paragraph text with leading whitespace removed, or `None` when the
    /// paragraph carries nothing to convert.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim_start)
            .filter(|text| !text.is_empty())
    }
}

/// Parse a Zeppelin note from a JSON string
///
/// # Errors
///
/// Returns an error if the JSON is malformed or is not a note object.
pub fn parse_note_from_str(content: &str) -> Result<SourceDocument> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a Zeppelin note from a reader
///
/// # Errors
///
/// Returns an error if reading fails or the JSON is malformed.
pub fn parse_note_from_reader<R: Read>(reader: R) -> Result<SourceDocument> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_extra_fields() {
        let json = r#"{
            "name": "Sales",
            "id": "2ABCDEF",
            "config": {"looknfeel": "default"},
            "paragraphs": [
                {"text": "%md # Title", "status": "FINISHED", "results": {"code": "SUCCESS"}},
                {"title": "no text here"},
                {"text": null}
            ]
        }"#;

        let note = parse_note_from_str(json).unwrap();
        assert_eq!(note.name.as_deref(), Some("Sales"));
        assert_eq!(note.paragraphs.len(), 3);
        assert_eq!(note.paragraphs[0].text.as_deref(), Some("%md # Title"));
        assert_eq!(note.paragraphs[1].text, None);
        assert_eq!(note.paragraphs[2].text, None);
    }

    #[test]
    fn test_parse_missing_name_and_paragraphs() {
        let note = parse_note_from_str("{}").unwrap();
        assert_eq!(note.name, None);
        assert!(note.paragraphs.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(parse_note_from_str("[1, 2]").is_err());
        assert!(parse_note_from_str("not json").is_err());
    }

    #[test]
    fn test_paragraph_content() {
        let blank = SourceParagraph {
            text: Some("  \n\t".to_string()),
        };
        let empty = SourceParagraph {
            text: Some(String::new()),
        };
        let absent = SourceParagraph { text: None };
        let code = SourceParagraph {
            text: Some("\n  print(1)".to_string()),
        };

        assert_eq!(blank.content(), None);
        assert_eq!(empty.content(), None);
        assert_eq!(absent.content(), None);
        assert_eq!(code.content(), Some("print(1)"));
    }

    #[test]
    fn test_parse_from_reader() {
        let json = br#"{"name": "R", "paragraphs": [{"text": "1+1"}]}"#;
        let note = parse_note_from_reader(&json[..]).unwrap();
        assert_eq!(note, SourceDocument::new("R", ["1+1"]));
    }
}
