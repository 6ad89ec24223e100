//! Notebook serialization
//!
//! Output follows nbformat's own writer: sorted keys, one-space indent,
//! non-ASCII text kept verbatim and a trailing newline.

use crate::error::Result;
use crate::notebook::TargetDocument;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter};
use std::io::Write;

/// JSON layout of the written notebook
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Style {
    /// Indented the way Jupyter writes notebooks (default)
    #[default]
    Pretty,
    /// Single line
    Compact,
}

/// Write a notebook to `writer`
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_ipynb<W: Write>(doc: &TargetDocument, mut writer: W, style: Style) -> Result<()> {
    match style {
        Style::Pretty => {
            let mut ser =
                serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b" "));
            doc.serialize(&mut ser)?;
        }
        Style::Compact => {
            let mut ser = serde_json::Serializer::with_formatter(&mut writer, CompactFormatter);
            doc.serialize(&mut ser)?;
        }
    }
    writer.write_all(b"\n")?;
    Ok(())
}

/// Serialize a notebook to a string
///
/// # Errors
///
/// Returns an error if serialization fails.
#[must_use = "this function returns the serialized notebook"]
pub fn to_ipynb_string(doc: &TargetDocument, style: Style) -> Result<String> {
    let mut buf = Vec::new();
    write_ipynb(doc, &mut buf, style)?;
    // serde_json only emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
