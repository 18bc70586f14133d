//! Core domain logic for the roster employee record manager.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod store;

pub use config::{ConfigError, LoggingConfig, NotifyConfig, RosterConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{format_salary, Employee, EmployeeDraft, EmployeeUpdate, FieldMap};
pub use model::field::Field;
pub use model::validation::{
    validate_contact, validate_department, validate_email, validate_field, validate_id,
    validate_name, validate_salary, FieldCheck, FieldError,
};
pub use notify::{
    CredentialError, Notification, Notifier, NotifyError, OutboxNotifier, SenderCredentials,
    WelcomeTemplate,
};
pub use service::employee_service::{
    AddOutcome, DeleteOutcome, EmployeeService, NotificationOutcome, ServiceError, ServiceResult,
    UpdateOutcome,
};
pub use store::{
    DepartmentGroup, DepartmentReport, EmployeeStore, LoadDiagnostic, LoadReport, SaveOutcome,
    SkipReason, StoreConfig, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
