//! Flat-file employee record store.
//!
//! # Responsibility
//! - Own the in-memory employee collection and mirror it to one delimited
//!   text file.
//! - Provide lookup, mutation, listing and department grouping operations.
//!
//! # Invariants
//! - Stored order is insertion/load order; sorting is always on a copy.
//! - Every mutation rewrites the whole backing file.
//! - A failed save never rolls back the in-memory change.
//! - Load never fails as a whole: bad lines are skipped and reported.
//!
//! # See also
//! - `store::codec` for the line format.

use crate::model::field::{default_field_order, Field};
use crate::model::validation::FieldError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

mod codec;
mod employee_store;
pub mod report;

pub use employee_store::{EmployeeStore, LoadDiagnostic, LoadReport, SkipReason};
pub use report::{DepartmentGroup, DepartmentReport, UNCATEGORIZED};

/// Default single-character field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error.
#[derive(Debug)]
pub enum StoreError {
    /// Store configuration cannot describe a readable file.
    InvalidConfig(String),
    /// Backing file could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// No record carries the requested id.
    NotFound(String),
    /// Supplied field values failed validation.
    Validation(FieldError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(message) => write!(f, "invalid store config: {message}"),
            Self::Io { path, source } => write!(f, "I/O error on `{}`: {source}", path.display()),
            Self::NotFound(id) => write!(f, "Employee not found with ID '{id}'."),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Validation(err) => Some(err),
            Self::InvalidConfig(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<FieldError> for StoreError {
    fn from(value: FieldError) -> Self {
        Self::Validation(value)
    }
}

/// Result of the save that follows a mutation.
///
/// The mutation itself has already been applied in memory either way.
#[must_use]
#[derive(Debug)]
pub enum SaveOutcome {
    Saved,
    Failed(StoreError),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    /// Returns the save error, if any.
    pub fn error(&self) -> Option<&StoreError> {
        match self {
            Self::Saved => None,
            Self::Failed(err) => Some(err),
        }
    }
}

impl From<StoreResult<()>> for SaveOutcome {
    fn from(value: StoreResult<()>) -> Self {
        match value {
            Ok(()) => Self::Saved,
            Err(err) => Self::Failed(err),
        }
    }
}

/// Explicit location and layout of the backing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Backing file path.
    pub path: PathBuf,
    /// Single-character field delimiter.
    pub delimiter: char,
    /// Column order used for both reading and writing.
    pub field_order: Vec<Field>,
}

impl StoreConfig {
    /// Creates a config with the default delimiter and canonical field order.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: DEFAULT_DELIMITER,
            field_order: default_field_order(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_field_order(mut self, field_order: Vec<Field>) -> Self {
        self.field_order = field_order;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checks that the config describes a parseable file layout.
    ///
    /// # Errors
    /// - Delimiter is a line break.
    /// - Field order is not a permutation of all six fields.
    pub fn validate(&self) -> StoreResult<()> {
        if matches!(self.delimiter, '\n' | '\r') {
            return Err(StoreError::InvalidConfig(
                "delimiter cannot be a line break".to_string(),
            ));
        }
        if self.field_order.len() != Field::ALL.len() {
            return Err(StoreError::InvalidConfig(format!(
                "field order must list {} fields, got {}",
                Field::ALL.len(),
                self.field_order.len()
            )));
        }
        for field in Field::ALL {
            if !self.field_order.contains(&field) {
                return Err(StoreError::InvalidConfig(format!(
                    "field order is missing `{field}`"
                )));
            }
        }
        Ok(())
    }
}
