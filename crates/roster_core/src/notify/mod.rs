//! Notification port for post-creation messages.
//!
//! # Responsibility
//! - Define the `Notifier` capability the service calls after an add.
//! - Render the welcome message for a new employee.
//!
//! # Invariants
//! - Notification failures never affect store state; the record is
//!   committed before `send` is called.
//! - Implementations log their own failures.

use crate::model::employee::Employee;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

mod credentials;
mod outbox;

pub use credentials::{CredentialError, CredentialKind, Secret, SenderCredentials};
pub use outbox::OutboxNotifier;

/// Default organization name used in welcome messages.
pub const DEFAULT_ORGANIZATION: &str = "BitFutura";

/// One outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient_name: String,
    pub recipient_address: String,
    pub subject: String,
    pub body: String,
}

/// Transport-level notification failure.
#[derive(Debug)]
pub enum NotifyError {
    /// Message could not be handed to the transport.
    Io { path: PathBuf, source: io::Error },
    /// Transport refused the message.
    Rejected(String),
}

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "could not write message to `{}`: {source}", path.display())
            }
            Self::Rejected(reason) => write!(f, "message rejected: {reason}"),
        }
    }
}

impl Error for NotifyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Rejected(_) => None,
        }
    }
}

/// Capability for sending one message.
pub trait Notifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        (**self).send(notification)
    }
}

/// Welcome message sent when an employee record is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeTemplate {
    pub organization: String,
}

impl Default for WelcomeTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_ORGANIZATION)
    }
}

impl WelcomeTemplate {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
        }
    }

    pub fn subject(&self) -> String {
        format!("Welcome to {}!", self.organization)
    }

    /// Renders the message addressed to `employee`.
    pub fn render(&self, employee: &Employee) -> Notification {
        let body = format!(
            "Hi {name},\n\n\
             Welcome aboard to {org}! We are excited to have you join our team.\n\n\
             Your employee record (ID: {id}) has been successfully created in our system.\n\n\
             Best regards,\n\
             {org} HR\n",
            name = employee.name(),
            org = self.organization,
            id = employee.id(),
        );
        Notification {
            recipient_name: employee.name().to_string(),
            recipient_address: employee.email().to_string(),
            subject: self.subject(),
            body,
        }
    }
}
