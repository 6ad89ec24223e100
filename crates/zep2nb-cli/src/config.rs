//! Configuration file support for `.zep2nb.toml`
//!
//! Configuration files can be placed in:
//! - User home directory: `~/.zep2nb.toml` (user defaults)
//! - Project directory: `./.zep2nb.toml` (project defaults)
//! - Custom location via `--config` (replaces both)
//!
//! Precedence order (highest to lowest):
//! 1. Command-line arguments
//! 2. Project config
//! 3. User config
//! 4. Built-in defaults

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zep2nb_notebook::{BootstrapConfig, ConvertOptions, IndexPolicy};

/// File name looked up in the home and current directories
pub const CONFIG_FILE_NAME: &str = ".zep2nb.toml";

/// Error type for loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },
}

/// Contents of a `.zep2nb.toml` file. Every field is optional so files can
/// be layered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Bootstrap cell settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap: Option<BootstrapSettings>,

    /// Conversion settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convert: Option<ConvertSettings>,
}

/// `[bootstrap]` section; unset fields fall back to [`BootstrapConfig`] defaults
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapSettings {
    /// Emit bootstrap cells at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Splice Machine region server host
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jdbc_host: Option<String>,
    /// JDBC port
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jdbc_port: Option<u16>,
    /// Database name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Database user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Database password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Python interpreter for Spark workers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python_path: Option<String>,
    /// Emit the `%%sql` default datasource cell
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql_datasource: Option<bool>,
}

/// `[convert]` section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertSettings {
    /// When the execution counter advances
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_policy: Option<IndexPolicy>,

    /// Directory for notebooks named after their note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Write single-line JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact: Option<bool>,
}

/// Fully resolved settings, as printed by `--print-config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    /// Bootstrap cell settings
    pub bootstrap: BootstrapConfig,
    /// Conversion settings
    pub convert: EffectiveConvert,
}

/// Resolved `[convert]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConvert {
    /// When the execution counter advances
    pub index_policy: IndexPolicy,
    /// Directory for notebooks named after their note
    pub output_dir: PathBuf,
    /// Write single-line JSON
    pub compact: bool,
}

impl EffectiveConfig {
    /// Options for the converter
    #[must_use]
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            bootstrap: self.bootstrap.clone(),
            index_policy: self.convert.index_policy,
        }
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find and merge the user and project configuration files.
    ///
    /// Files that fail to load are skipped with a warning.
    #[must_use]
    pub fn discover() -> Self {
        let user = dirs::home_dir()
            .and_then(|home| Self::load_optional(&home.join(CONFIG_FILE_NAME)));
        let project = Self::load_optional(Path::new(CONFIG_FILE_NAME));

        user.unwrap_or_default().merge(project.unwrap_or_default())
    }

    fn load_optional(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => {
                log::debug!("loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                log::warn!("{e}");
                None
            }
        }
    }

    /// Merge `other` over `self`; values set in `other` win
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            bootstrap: merge_option(self.bootstrap, other.bootstrap, BootstrapSettings::merge),
            convert: merge_option(self.convert, other.convert, ConvertSettings::merge),
        }
    }

    /// Apply the built-in defaults
    #[must_use]
    pub fn resolve(&self) -> EffectiveConfig {
        let bootstrap = self
            .bootstrap
            .as_ref()
            .map(|b| b.apply(BootstrapConfig::default()))
            .unwrap_or_default();
        let convert = self.convert.clone().unwrap_or_default();

        EffectiveConfig {
            bootstrap,
            convert: EffectiveConvert {
                index_policy: convert.index_policy.unwrap_or_default(),
                output_dir: convert.output_dir.unwrap_or_else(|| PathBuf::from(".")),
                compact: convert.compact.unwrap_or(false),
            },
        }
    }
}

impl BootstrapSettings {
    fn merge(self, other: Self) -> Self {
        Self {
            enabled: other.enabled.or(self.enabled),
            jdbc_host: other.jdbc_host.or(self.jdbc_host),
            jdbc_port: other.jdbc_port.or(self.jdbc_port),
            database: other.database.or(self.database),
            user: other.user.or(self.user),
            password: other.password.or(self.password),
            python_path: other.python_path.or(self.python_path),
            sql_datasource: other.sql_datasource.or(self.sql_datasource),
        }
    }

    fn apply(&self, base: BootstrapConfig) -> BootstrapConfig {
        let settings = self.clone();
        BootstrapConfig {
            enabled: settings.enabled.unwrap_or(base.enabled),
            jdbc_host: settings.jdbc_host.unwrap_or(base.jdbc_host),
            jdbc_port: settings.jdbc_port.unwrap_or(base.jdbc_port),
            database: settings.database.unwrap_or(base.database),
            user: settings.user.unwrap_or(base.user),
            password: settings.password.unwrap_or(base.password),
            python_path: settings.python_path.unwrap_or(base.python_path),
            sql_datasource: settings.sql_datasource.unwrap_or(base.sql_datasource),
        }
    }
}

impl ConvertSettings {
    fn merge(self, other: Self) -> Self {
        Self {
            index_policy: other.index_policy.or(self.index_policy),
            output_dir: other.output_dir.or(self.output_dir),
            compact: other.compact.or(self.compact),
        }
    }
}

fn merge_option<T>(base: Option<T>, over: Option<T>, merge: fn(T, T) -> T) -> Option<T> {
    match (base, over) {
        (Some(base), Some(over)) => Some(merge(base, over)),
        (base, over) => over.or(base),
    }
}
