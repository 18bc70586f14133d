//! Employee use-case service.
//!
//! # Responsibility
//! - Perform the caller-side checks the store leaves to its callers
//!   (id uniqueness on add, non-empty updates).
//! - Drive store mutations, then the optional welcome notification.
//!
//! # Invariants
//! - A duplicate id is rejected before anything is persisted.
//! - Notification runs after the add has been applied and saved, and its
//!   failure never undoes the add.
//! - Operations are unconditional once called; confirmation is the
//!   caller's job.

use crate::model::employee::{Employee, EmployeeDraft, EmployeeUpdate};
use crate::model::validation::FieldError;
use crate::notify::{Notifier, WelcomeTemplate};
use crate::store::{DepartmentReport, EmployeeStore, SaveOutcome, StoreError, StoreResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case level error.
#[derive(Debug)]
pub enum ServiceError {
    /// A field value failed validation.
    Validation(FieldError),
    /// Another record already uses this id.
    DuplicateId(String),
    /// No record carries this id.
    NotFound(String),
    /// Update supplied no fields.
    NoChanges,
    /// Store-level failure other than not-found/validation.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "Employee ID '{id}' already exists."),
            Self::NotFound(id) => write!(f, "Employee not found with ID '{id}'."),
            Self::NoChanges => write!(f, "No changes entered. Update cancelled."),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for ServiceError {
    fn from(value: FieldError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::Validation(err) => Self::Validation(err),
            other => Self::Store(other),
        }
    }
}

/// What happened to the welcome notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Sent,
    /// No notifier is configured.
    Disabled,
    /// Transport failed; the message is the transport's error text.
    Failed(String),
}

#[derive(Debug)]
pub struct AddOutcome {
    pub employee: Employee,
    pub save: SaveOutcome,
    pub notification: NotificationOutcome,
}

#[derive(Debug)]
pub struct UpdateOutcome {
    pub employee: Employee,
    pub save: SaveOutcome,
}

#[derive(Debug)]
pub struct DeleteOutcome {
    pub employee: Employee,
    pub save: SaveOutcome,
}

/// Service facade over one store and an optional notifier.
pub struct EmployeeService {
    store: EmployeeStore,
    notifier: Option<Box<dyn Notifier>>,
    welcome: WelcomeTemplate,
}

impl EmployeeService {
    /// Creates a service with notifications disabled.
    pub fn new(store: EmployeeStore) -> Self {
        Self {
            store,
            notifier: None,
            welcome: WelcomeTemplate::default(),
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_welcome_template(mut self, welcome: WelcomeTemplate) -> Self {
        self.welcome = welcome;
        self
    }

    /// Read access for lookups (`is_id_unique`, `find_by_id`, ...).
    pub fn store(&self) -> &EmployeeStore {
        &self.store
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    /// Validates, adds and saves a new record, then sends the welcome message.
    ///
    /// # Errors
    /// - `Validation` for the first invalid field.
    /// - `DuplicateId` when the id is taken; the store is unchanged.
    pub fn add_employee(&mut self, draft: &EmployeeDraft) -> ServiceResult<AddOutcome> {
        let employee = draft.build()?;
        if !self.store.is_id_unique(employee.id()) {
            warn!(
                "event=employee_add module=service status=warn reason=duplicate_id id={}",
                employee.id()
            );
            return Err(ServiceError::DuplicateId(employee.id().to_string()));
        }

        let save = self.store.add(employee.clone());
        info!(
            "event=employee_add module=service status=ok id={} saved={}",
            employee.id(),
            save.is_saved()
        );

        let notification = self.notify_created(&employee);
        Ok(AddOutcome {
            employee,
            save,
            notification,
        })
    }

    /// Looks up one record by (trimmed) id.
    pub fn view_employee(&self, id: &str) -> ServiceResult<&Employee> {
        let id = id.trim();
        self.store
            .find_by_id(id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// Applies a partial update and saves.
    ///
    /// # Errors
    /// - `NoChanges` when `update` is empty.
    /// - `NotFound` / `Validation` from the store; nothing changes.
    pub fn update_employee(
        &mut self,
        id: &str,
        update: &EmployeeUpdate,
    ) -> ServiceResult<UpdateOutcome> {
        if update.is_empty() {
            return Err(ServiceError::NoChanges);
        }
        let id = id.trim();
        let save = self.store.update(id, update)?;
        let employee = self
            .store
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))?;
        info!(
            "event=employee_update module=service status=ok id={} saved={}",
            id,
            save.is_saved()
        );
        Ok(UpdateOutcome { employee, save })
    }

    /// Deletes one record and saves.
    pub fn delete_employee(&mut self, id: &str) -> ServiceResult<DeleteOutcome> {
        let id = id.trim();
        let (employee, save) = self.store.delete(id)?;
        info!(
            "event=employee_delete module=service status=ok id={} saved={}",
            id,
            save.is_saved()
        );
        Ok(DeleteOutcome { employee, save })
    }

    /// All records sorted by id.
    pub fn list_employees(&self) -> Vec<&Employee> {
        self.store.list_sorted()
    }

    pub fn department_report(&self) -> DepartmentReport {
        self.store.department_report()
    }

    /// Final save at clean shutdown.
    pub fn shutdown(&self) -> StoreResult<()> {
        info!(
            "event=shutdown module=service status=start records={}",
            self.store.len()
        );
        self.store.save()
    }

    fn notify_created(&self, employee: &Employee) -> NotificationOutcome {
        let Some(notifier) = self.notifier.as_ref() else {
            return NotificationOutcome::Disabled;
        };

        let message = self.welcome.render(employee);
        match notifier.send(&message) {
            Ok(()) => {
                info!(
                    "event=employee_notify module=service status=ok id={}",
                    employee.id()
                );
                NotificationOutcome::Sent
            }
            Err(err) => {
                warn!(
                    "event=employee_notify module=service status=warn id={} error={}",
                    employee.id(),
                    err
                );
                NotificationOutcome::Failed(err.to_string())
            }
        }
    }
}
