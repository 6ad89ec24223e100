//! Paragraph classification and rewriting
//!
//! A Zeppelin paragraph starts with an interpreter directive such as `%md` or
//! `%spark.pyspark`. The directive decides which kind of Jupyter cell the
//! paragraph becomes and how its text is rewritten.

use crate::cell::TargetCell;

/// Cell magic prepended to Scala paragraphs
pub const SCALA_MAGIC: &str = "%%scala ";
/// Cell magic prepended to Splice Machine SQL paragraphs
pub const SQL_MAGIC: &str = "%%sql ";

/// Interpreter dialect of a paragraph, identified by its leading directive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `%md` - markdown prose
    Markup,
    /// `%spark.pyspark` - Python on Spark
    PysparkCode,
    /// `%spark` - Scala on Spark
    ScalaCode,
    /// `%splicemachine` - Splice Machine SQL
    SqlCode,
    /// No recognized directive
    #[default]
    PlainCode,
}

impl Dialect {
    /// Dialects with a directive, in match priority order.
    ///
    /// `%spark` is a prefix of `%spark.pyspark`, so pyspark must be tried first.
    pub const PRIORITY: [Self; 4] = [
        Self::Markup,
        Self::PysparkCode,
        Self::ScalaCode,
        Self::SqlCode,
    ];

    /// Leading directive for this dialect
    #[inline]
    #[must_use]
    pub const fn marker(self) -> Option<&'static str> {
        match self {
            Self::Markup => Some("%md"),
            Self::PysparkCode => Some("%spark.pyspark"),
            Self::ScalaCode => Some("%spark"),
            Self::SqlCode => Some("%splicemachine"),
            Self::PlainCode => None,
        }
    }

    /// Detect the dialect of (already left-trimmed) paragraph text
    #[must_use]
    pub fn detect(text: &str) -> Self {
        Self::PRIORITY
            .into_iter()
            .find(|dialect| dialect.marker().is_some_and(|m| text.starts_with(m)))
            .unwrap_or_default()
    }

    /// Remove this dialect's directive from the front of `text`.
    ///
    /// Only the literal directive is removed; the rest of the text is kept.
    #[must_use]
    pub fn strip_marker(self, text: &str) -> &str {
        self.marker()
            .and_then(|marker| text.strip_prefix(marker))
            .unwrap_or(text)
    }

}

impl std::fmt::Display for Dialect {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Markup => "markdown",
            Self::PysparkCode => "pyspark",
            Self::ScalaCode => "scala",
            Self::SqlCode => "sql",
            Self::PlainCode => "plain",
        };
        write!(f, "{s}")
    }
}

/// Classify one paragraph and rewrite it into a notebook cell.
///
/// `index` becomes the execution count of code cells; markdown cells ignore
/// it. Leading whitespace is trimmed before the directive is matched. Every
/// text classifies: anything without a known directive is plain code.
#[must_use]
pub fn classify(text: &str, index: u32) -> TargetCell {
    let text = text.trim_start();
    let dialect = Dialect::detect(text);
    let body = dialect.strip_marker(text);

    log::trace!("paragraph {index} classified as {dialect}");

    match dialect {
        Dialect::Markup => TargetCell::markdown(
            body.trim_start_matches([' ', '\t'])
                .trim_start_matches(['\r', '\n']),
        ),
        Dialect::PysparkCode => TargetCell::code(body, Some(index)),
        Dialect::ScalaCode => TargetCell::code(format!("{SCALA_MAGIC}{body}"), Some(index)),
        Dialect::SqlCode => TargetCell::code(format!("{SQL_MAGIC}{body}"), Some(index)),
        Dialect::PlainCode => {
            TargetCell::code(text, Some(index)).with_metadata("autoscroll", "auto")
        }
    }
}
