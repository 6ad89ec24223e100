//! Bootstrap cells prepended to every converted notebook
//!
//! These cells recreate the Spark session and the Splice Machine connection
//! that Zeppelin interpreters provide implicitly. Connection details come from
//! [`BootstrapConfig`].

use crate::cell::TargetCell;
use serde::{Deserialize, Serialize};

/// Connection settings used to render the bootstrap cells
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Emit bootstrap cells at all
    pub enabled: bool,
    /// Splice Machine region server host
    pub jdbc_host: String,
    /// JDBC port
    pub jdbc_port: u16,
    /// Database name
    pub database: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Python interpreter the Spark workers should use
    pub python_path: String,
    /// Also emit a `%%sql` cell that sets the default datasource
    pub sql_datasource: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jdbc_host: "localhost".to_string(),
            jdbc_port: 1527,
            database: "splicedb".to_string(),
            user: "splice".to_string(),
            password: "admin".to_string(),
            python_path: "/usr/bin/python3".to_string(),
            sql_datasource: false,
        }
    }
}

impl BootstrapConfig {
    /// JDBC URL for the configured database
    #[must_use]
    pub fn jdbc_url(&self) -> String {
        format!(
            "jdbc:splice://{}:{}/{};user={};password={}",
            self.jdbc_host, self.jdbc_port, self.database, self.user, self.password
        )
    }

    /// Render the bootstrap cells, in notebook order
    #[must_use]
    pub fn cells(&self) -> Vec<TargetCell> {
        if !self.enabled {
            return Vec::new();
        }

        let mut cells = vec![
            TargetCell::code(self.environment_source(), None),
            TargetCell::code(self.connection_source(), None),
        ];
        if self.sql_datasource {
            cells.push(TargetCell::code(
                format!("%%sql\n%defaultDatasource {}", self.jdbc_url()),
                None,
            ));
        }
        cells
    }

    fn environment_source(&self) -> String {
        format!(
            "import os\nos.environ['JDBC_HOST'] = '{}'\n",
            py_escape(&self.jdbc_host)
        )
    }

    fn connection_source(&self) -> String {
        // Host is read back from JDBC_HOST, set by the environment cell
        let url = format!(
            "jdbc:splice://{{jdbc_host}}:{}/{};user={};password={}",
            self.jdbc_port,
            fstring_escape(&self.database),
            fstring_escape(&self.user),
            fstring_escape(&self.password)
        );
        [
            "# setup-- \n",
            "import os\n",
            "import pyspark\n",
            "from splicemachine.spark.context import PySpliceContext\n",
            "from pyspark.conf import SparkConf\n",
            "from pyspark.sql import SparkSession\n",
            "\n",
            "# make sure pyspark tells workers to use python3 not 2 if both are installed\n",
            format!(
                "os.environ['PYSPARK_PYTHON'] = '{}'\n",
                py_escape(&self.python_path)
            )
            .as_str(),
            "jdbc_host = os.environ['JDBC_HOST']\n",
            "\n",
            "conf = pyspark.SparkConf()\n",
            "sc = pyspark.SparkContext(conf=conf)\n",
            "\n",
            "spark = SparkSession.builder.config(conf=conf).getOrCreate()\n",
            "\n",
            format!("splicejdbc=f'{url}'\n").as_str(),
            "\n",
            "splice = PySpliceContext(spark, splicejdbc)\n",
        ]
        .concat()
    }
}

/// Escape text for a single-quoted Python string literal
fn py_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape text for a single-quoted Python f-string literal
fn fstring_escape(value: &str) -> String {
    py_escape(value).replace('{', "{{").replace('}', "}}")
}
