//! Application configuration.
//!
//! # Responsibility
//! - Describe every externally supplied setting in one typed struct.
//! - Load it from an optional TOML file and turn it into a `StoreConfig`.
//!
//! # Invariants
//! - Every key is optional; missing keys take documented defaults.
//! - Relative paths are resolved against an explicit base directory, never
//!   against the process location implicitly.

use crate::model::field::Field;
use crate::notify::DEFAULT_ORGANIZATION;
use crate::store::{StoreConfig, DEFAULT_DELIMITER};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_DATA_FILE: &str = "employees.csv";
const DEFAULT_ADDRESS_FILE: &str = "username.txt";
const DEFAULT_OUTBOX_DIR: &str = "outbox";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "could not read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterConfig {
    /// Backing file for employee records.
    pub data_file: PathBuf,
    /// Single-character field delimiter.
    pub delimiter: char,
    /// Column order of the backing file; canonical order when unset.
    pub field_order: Option<Vec<Field>>,
    pub logging: LoggingConfig,
    pub notify: NotifyConfig,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            delimiter: DEFAULT_DELIMITER,
            field_order: None,
            logging: LoggingConfig::default(),
            notify: NotifyConfig::default(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `trace|debug|info|warn|error`; build-mode default when unset.
    pub level: Option<String>,
    /// Log directory; defaults to `logs/` next to the data file.
    pub dir: Option<PathBuf>,
}

/// `[notify]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifyConfig {
    pub enabled: bool,
    pub sender_address_file: PathBuf,
    /// Optional sender secret; read only when set.
    pub sender_secret_file: Option<PathBuf>,
    pub outbox_dir: PathBuf,
    pub organization: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sender_address_file: PathBuf::from(DEFAULT_ADDRESS_FILE),
            sender_secret_file: None,
            outbox_dir: PathBuf::from(DEFAULT_OUTBOX_DIR),
            organization: DEFAULT_ORGANIZATION.to_string(),
        }
    }
}

impl RosterConfig {
    /// Reads a TOML config file and resolves its relative paths against the
    /// file's own directory.
    ///
    /// # Errors
    /// - `Io` when the file cannot be read.
    /// - `Parse` on malformed TOML, unknown keys, or a multi-character delimiter.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve_relative(base))
    }

    /// Rewrites every relative path as `base.join(path)`.
    pub fn resolve_relative(mut self, base: &Path) -> Self {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        resolve(&mut self.data_file);
        if let Some(dir) = self.logging.dir.as_mut() {
            resolve(dir);
        }
        resolve(&mut self.notify.sender_address_file);
        if let Some(path) = self.notify.sender_secret_file.as_mut() {
            resolve(path);
        }
        resolve(&mut self.notify.outbox_dir);
        self
    }

    /// Log directory, falling back to `logs/` beside the data file.
    pub fn log_dir(&self) -> PathBuf {
        match &self.logging.dir {
            Some(dir) => dir.clone(),
            None => self
                .data_file
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join("logs"),
        }
    }

    /// Store settings derived from this config.
    pub fn store_config(&self) -> StoreConfig {
        let config = StoreConfig::new(self.data_file.clone()).with_delimiter(self.delimiter);
        match &self.field_order {
            Some(order) => config.with_field_order(order.clone()),
            None => config,
        }
    }
}
