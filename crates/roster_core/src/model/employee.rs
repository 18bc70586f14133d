//! Employee record domain model.
//!
//! # Responsibility
//! - Define the validated employee value object.
//! - Convert records to and from the fixed-order field mapping used by storage.
//!
//! # Invariants
//! - Every constructed `Employee` satisfies all six field validators.
//! - String fields are stored trimmed; salary is stored as a finite `f64 >= 0`.
//! - `id` is never changed after construction; `apply` carries it over.
//!
//! # See also
//! - `model::validation` for the per-field rules.

use crate::model::field::Field;
use crate::model::validation::{
    parse_salary, validate_contact, validate_department, validate_email, validate_id,
    validate_name, validate_salary, FieldError,
};
use log::warn;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Raw field values keyed by field, as read from one persisted line.
pub type FieldMap = BTreeMap<Field, String>;

/// One validated employee record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    id: String,
    name: String,
    department: String,
    salary: f64,
    email: String,
    contact: String,
}

impl Employee {
    /// Builds a record from six raw values.
    ///
    /// Validators run in field order; the first failure is returned and no
    /// record is produced.
    pub fn new(
        id: &str,
        name: &str,
        department: &str,
        salary: &str,
        email: &str,
        contact: &str,
    ) -> Result<Self, FieldError> {
        validate_id(id)?;
        validate_name(name)?;
        validate_department(department)?;
        let salary = validate_salary(salary)?;
        validate_email(email)?;
        validate_contact(contact)?;

        Ok(Self {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            department: department.trim().to_string(),
            salary,
            email: email.trim().to_string(),
            contact: contact.trim().to_string(),
        })
    }

    /// Rebuilds a record from a persisted field mapping.
    ///
    /// Returns `Ok(None)` when the salary text is not a number (the caller
    /// should skip the line); any other validation failure is returned as
    /// `Err`. Missing keys read as empty, except salary which reads as `0`.
    pub fn from_fields(fields: &FieldMap) -> Result<Option<Self>, FieldError> {
        let value = |field: Field| fields.get(&field).map(String::as_str).unwrap_or("");
        let salary_text = fields
            .get(&Field::Salary)
            .map(String::as_str)
            .unwrap_or("0");

        if parse_salary(salary_text).is_none() {
            warn!(
                "event=record_parse module=model status=warn reason=salary_not_numeric id={}",
                value(Field::Id).trim()
            );
            return Ok(None);
        }

        Self::new(
            value(Field::Id),
            value(Field::Name),
            value(Field::Department),
            salary_text,
            value(Field::Email),
            value(Field::Contact),
        )
        .map(Some)
    }

    /// Returns `(field, text)` pairs in canonical field order.
    ///
    /// Salary is rendered with exactly two decimals.
    pub fn to_fields(&self) -> Vec<(Field, String)> {
        Field::ALL
            .iter()
            .map(|field| (*field, self.field_text(*field)))
            .collect()
    }

    /// Renders one field as persisted text.
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::Id => self.id.clone(),
            Field::Name => self.name.clone(),
            Field::Department => self.department.clone(),
            Field::Salary => format_salary(self.salary),
            Field::Email => self.email.clone(),
            Field::Contact => self.contact.clone(),
        }
    }

    /// Returns a copy with the supplied update fields replaced.
    ///
    /// The id is always carried over. Supplied values are validated and
    /// trimmed exactly as in [`Employee::new`].
    pub fn apply(&self, update: &EmployeeUpdate) -> Result<Self, FieldError> {
        let salary = match update.salary.as_deref() {
            Some(raw) => raw.to_string(),
            None => format_salary(self.salary),
        };
        let mut next = Self::new(
            &self.id,
            update.name.as_deref().unwrap_or(&self.name),
            update.department.as_deref().unwrap_or(&self.department),
            &salary,
            update.email.as_deref().unwrap_or(&self.email),
            update.contact.as_deref().unwrap_or(&self.contact),
        )?;
        if update.salary.is_none() {
            next.salary = self.salary;
        }
        Ok(next)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn salary(&self) -> f64 {
        self.salary
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Dept: {}, Salary: {:.2}, Email: {}, Contact: {}",
            self.id, self.name, self.department, self.salary, self.email, self.contact
        )
    }
}

/// Raw input for creating one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub id: String,
    pub name: String,
    pub department: String,
    pub salary: String,
    pub email: String,
    pub contact: String,
}

impl EmployeeDraft {
    /// Validates the draft into a record.
    pub fn build(&self) -> Result<Employee, FieldError> {
        Employee::new(
            &self.id,
            &self.name,
            &self.department,
            &self.salary,
            &self.email,
            &self.contact,
        )
    }
}

/// Partial update: `None` keeps the current value.
///
/// Has no id field: ids are immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub salary: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

impl EmployeeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn department(mut self, value: impl Into<String>) -> Self {
        self.department = Some(value.into());
        self
    }

    pub fn salary(mut self, value: impl Into<String>) -> Self {
        self.salary = Some(value.into());
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn contact(mut self, value: impl Into<String>) -> Self {
        self.contact = Some(value.into());
        self
    }

    /// Returns whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.salary.is_none()
            && self.email.is_none()
            && self.contact.is_none()
    }
}

/// Formats a salary the way it is persisted and displayed.
pub fn format_salary(value: f64) -> String {
    format!("{value:.2}")
}
