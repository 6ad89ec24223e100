//! Target notebook cells (nbformat 4)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Cell-level metadata object
pub type CellMetadata = Map<String, Value>;

/// Type of notebook cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Executable code cell
    #[default]
    Code,
    /// Markdown documentation cell
    Markdown,
}

impl std::fmt::Display for CellKind {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Code => "code",
            Self::Markdown => "markdown",
        };
        write!(f, "{s}")
    }
}

/// One cell of the target notebook
///
/// Markdown cells carry neither an execution count nor outputs; nbformat
/// rejects those keys on markdown cells, so they only exist on `Code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum TargetCell {
    /// Code cell
    Code {
        /// Execution index; `None` for cells that have never run
        execution_count: Option<u32>,
        /// Display hints
        metadata: CellMetadata,
        /// Captured outputs (never populated by the converter)
        outputs: Vec<Value>,
        /// Cell source
        #[serde(with = "multiline")]
        source: String,
    },
    /// Markdown cell
    Markdown {
        /// Display hints
        metadata: CellMetadata,
        /// Markdown source
        #[serde(with = "multiline")]
        source: String,
    },
}

impl TargetCell {
    /// Create a code cell with no outputs
    #[must_use]
    pub fn code(source: impl Into<String>, execution_count: Option<u32>) -> Self {
        Self::Code {
            execution_count,
            metadata: CellMetadata::new(),
            outputs: Vec::new(),
            source: source.into(),
        }
    }

    /// Create a markdown cell
    #[must_use]
    pub fn markdown(source: impl Into<String>) -> Self {
        Self::Markdown {
            metadata: CellMetadata::new(),
            source: source.into(),
        }
    }

    /// Add a metadata entry, returning the cell
    #[must_use]
    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        match &mut self {
            Self::Code { metadata, .. } | Self::Markdown { metadata, .. } => {
                metadata.insert(key.to_string(), value.into());
            }
        }
        self
    }

    /// Kind of the cell
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> CellKind {
        match self {
            Self::Code { .. } => CellKind::Code,
            Self::Markdown { .. } => CellKind::Markdown,
        }
    }

    /// Execution index, present only on code cells converted from paragraphs
    #[inline]
    #[must_use]
    pub const fn execution_index(&self) -> Option<u32> {
        match self {
            Self::Code {
                execution_count, ..
            } => *execution_count,
            Self::Markdown { .. } => None,
        }
    }

    /// Cell source text
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Code { source, .. } | Self::Markdown { source, .. } => source,
        }
    }

    /// Cell metadata
    #[inline]
    #[must_use]
    pub const fn metadata(&self) -> &CellMetadata {
        match self {
            Self::Code { metadata, .. } | Self::Markdown { metadata, .. } => metadata,
        }
    }

    /// Cell outputs (empty for markdown cells)
    #[inline]
    #[must_use]
    pub fn outputs(&self) -> &[Value] {
        match self {
            Self::Code { outputs, .. } => outputs,
            Self::Markdown { .. } => &[],
        }
    }
}

/// nbformat "multiline string": written as a list of lines that keep their
/// line endings, read back from either a list or a plain string.
mod multiline {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(source: &str, serializer: S) -> Result<S::Ok, S::Error> {
        let lines: Vec<&str> = source.split_inclusive('\n').collect();
        let mut seq = serializer.serialize_seq(Some(lines.len()))?;
        for line in lines {
            seq.serialize_element(line)?;
        }
        seq.end()
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Multiline {
        Text(String),
        Lines(Vec<String>),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Multiline::deserialize(deserializer)? {
            Multiline::Text(text) => text,
            Multiline::Lines(lines) => lines.concat(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_cell_json_shape() {
        let cell = TargetCell::code("x = 1\nprint(x)", Some(3));
        let value = serde_json::to_value(&cell).unwrap();
        assert_eq!(
            value,
            json!({
                "cell_type": "code",
                "execution_count": 3,
                "metadata": {},
                "outputs": [],
                "source": ["x = 1\n", "print(x)"]
            })
        );
    }

    #[test]
    fn test_markdown_cell_has_no_outputs_key() {
        let cell = TargetCell::markdown("# Title\n");
        let value = serde_json::to_value(&cell).unwrap();
        assert_eq!(
            value,
            json!({
                "cell_type": "markdown",
                "metadata": {},
                "source": ["# Title\n"]
            })
        );
        assert!(cell.outputs().is_empty());
        assert_eq!(cell.execution_index(), None);
    }

    #[test]
    fn test_empty_source_is_empty_list() {
        let value = serde_json::to_value(TargetCell::code("", None)).unwrap();
        assert_eq!(value["source"], json!([]));
        assert_eq!(value["execution_count"], Value::Null);
    }

    #[test]
    fn test_deserialize_string_or_lines() {
        let from_lines: TargetCell = serde_json::from_value(json!({
            "cell_type": "code",
            "execution_count": null,
            "metadata": {"autoscroll": "auto"},
            "outputs": [],
            "source": ["a\n", "b"]
        }))
        .unwrap();
        assert_eq!(from_lines.source(), "a\nb");
        assert_eq!(from_lines.metadata()["autoscroll"], "auto");

        let from_text: TargetCell = serde_json::from_value(json!({
            "cell_type": "markdown",
            "metadata": {},
            "source": "hello"
        }))
        .unwrap();
        assert_eq!(from_text, TargetCell::markdown("hello"));
    }

    #[test]
    fn test_with_metadata() {
        let cell = TargetCell::code("1+1", Some(0)).with_metadata("autoscroll", "auto");
        assert_eq!(cell.metadata().get("autoscroll"), Some(&json!("auto")));
        assert_eq!(cell.kind(), CellKind::Code);
    }

    #[test]
    fn test_cell_kind_display() {
        assert_eq!(CellKind::Code.to_string(), "code");
        assert_eq!(CellKind::Markdown.to_string(), "markdown");
    }
}
