//! Command-line arguments and their merge onto the file config.
//!
//! # Invariants
//! - Flags override config-file values; unset flags leave them alone.
//! - Relative flag paths resolve against the working directory.

use clap::Parser;
use roster_core::{ConfigError, RosterConfig};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Interactive employee record manager")]
pub struct Cli {
    #[arg(long, env = "ROSTER_CONFIG", help = "TOML config file")]
    pub config: Option<PathBuf>,
    #[arg(long, env = "ROSTER_DATA_FILE", help = "Employee data file")]
    pub data_file: Option<PathBuf>,
    #[arg(long, env = "ROSTER_DELIMITER", help = "Single-character field delimiter")]
    pub delimiter: Option<char>,
    #[arg(long, env = "ROSTER_LOG_LEVEL", help = "trace|debug|info|warn|error")]
    pub log_level: Option<String>,
    #[arg(long, env = "ROSTER_LOG_DIR", help = "Directory for rolling log files")]
    pub log_dir: Option<PathBuf>,
    #[arg(long, env = "ROSTER_OUTBOX_DIR", help = "Pickup directory for welcome emails")]
    pub outbox_dir: Option<PathBuf>,
    #[arg(long, help = "File holding the sender email address")]
    pub sender_address_file: Option<PathBuf>,
    #[arg(long, help = "File holding the sender secret (optional)")]
    pub sender_secret_file: Option<PathBuf>,
    #[arg(long, default_value_t = false, help = "Do not send welcome emails")]
    pub no_notify: bool,
}

impl Cli {
    /// Builds the effective config: file (or defaults), then flags.
    pub fn resolve_config(&self, cwd: &Path) -> Result<RosterConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => RosterConfig::load(&absolutize(cwd, path))?,
            None => RosterConfig::default().resolve_relative(cwd),
        };

        if let Some(path) = &self.data_file {
            config.data_file = absolutize(cwd, path);
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = Some(level.clone());
        }
        if let Some(dir) = &self.log_dir {
            config.logging.dir = Some(absolutize(cwd, dir));
        }
        if let Some(dir) = &self.outbox_dir {
            config.notify.outbox_dir = absolutize(cwd, dir);
        }
        if let Some(path) = &self.sender_address_file {
            config.notify.sender_address_file = absolutize(cwd, path);
        }
        if let Some(path) = &self.sender_secret_file {
            config.notify.sender_secret_file = Some(absolutize(cwd, path));
        }
        if self.no_notify {
            config.notify.enabled = false;
        }
        Ok(config)
    }
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
