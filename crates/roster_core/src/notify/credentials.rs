//! Sender credential loading.
//!
//! # Responsibility
//! - Read the sender address and optional secret from single-value files.
//!
//! # Invariants
//! - Only the first line of each file is used, trimmed.
//! - The address is required; the secret is read only when a path is given.
//! - A named file that is missing or empty is an error at this boundary.
//! - The secret never appears in `Debug` output or logs.

use crate::model::validation::validate_email;
use log::{error, info};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Which credential file an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    Address,
    Secret,
}

impl Display for CredentialKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address => f.write_str("sender address"),
            Self::Secret => f.write_str("sender secret"),
        }
    }
}

#[derive(Debug)]
pub enum CredentialError {
    Missing { kind: CredentialKind, path: PathBuf },
    Empty { kind: CredentialKind, path: PathBuf },
    InvalidAddress(String),
    Io {
        kind: CredentialKind,
        path: PathBuf,
        source: io::Error,
    },
}

impl Display for CredentialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { kind, path } => {
                write!(f, "{kind} file not found at {}", path.display())
            }
            Self::Empty { kind, path } => write!(f, "{kind} file at {} is empty", path.display()),
            Self::InvalidAddress(reason) => write!(f, "sender address is invalid: {reason}"),
            Self::Io { kind, path, source } => {
                write!(f, "could not read {kind} file {}: {source}", path.display())
            }
        }
    }
}

impl Error for CredentialError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Secret text with redacted formatting.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret([redacted])")
    }
}

/// Sender identity handed to whatever builds a notifier.
///
/// The outbox transport only needs `address`; `secret` is carried for
/// transports that authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderCredentials {
    pub address: String,
    pub secret: Option<Secret>,
}

impl SenderCredentials {
    /// Reads the sender address and, when `secret_path` is given, the secret.
    ///
    /// # Errors
    /// - `Missing` / `Io` when a named file cannot be read.
    /// - `Empty` when a named file's first line is blank.
    /// - `InvalidAddress` when the address is not email-shaped.
    pub fn load(address_path: &Path, secret_path: Option<&Path>) -> Result<Self, CredentialError> {
        let result = Self::load_inner(address_path, secret_path);
        match &result {
            Ok(credentials) => info!(
                "event=credentials_load module=notify status=ok secret={}",
                if credentials.secret.is_some() { "present" } else { "absent" }
            ),
            Err(err) => error!("event=credentials_load module=notify status=error error={err}"),
        }
        result
    }

    fn load_inner(address_path: &Path, secret_path: Option<&Path>) -> Result<Self, CredentialError> {
        let address = read_first_line(CredentialKind::Address, address_path)?;
        validate_email(&address).map_err(|err| CredentialError::InvalidAddress(err.to_string()))?;
        let secret = secret_path
            .map(|path| read_first_line(CredentialKind::Secret, path))
            .transpose()?
            .map(Secret::new);
        Ok(Self { address, secret })
    }
}

fn read_first_line(kind: CredentialKind, path: &Path) -> Result<String, CredentialError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            CredentialError::Missing {
                kind,
                path: path.to_path_buf(),
            }
        } else {
            CredentialError::Io {
                kind,
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let value = content.lines().next().unwrap_or("").trim().to_string();
    if value.is_empty() {
        return Err(CredentialError::Empty {
            kind,
            path: path.to_path_buf(),
        });
    }
    Ok(value)
}
