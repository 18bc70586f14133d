//! Field-level format validators.
//!
//! # Responsibility
//! - Check raw text for each of the six employee fields.
//! - Produce specific, user-displayable failure messages.
//!
//! # Invariants
//! - Validators are pure: no I/O, no logging, no panics.
//! - Blank checks run before pattern checks.
//! - Expected-invalid input is a returned `Err`, never a panic.

use crate::model::field::Field;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z ]+$").expect("valid name regex"));
static DEPARTMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9 \-]+$").expect("valid department regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email regex"));

/// Outcome of one field check: `Ok(())` or the reason it failed.
pub type FieldCheck = Result<(), FieldError>;

/// Validation failure for a single field.
///
/// `Display` renders the exact message shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Field is empty (or blank after trimming).
    Empty(Field),
    /// Field text does not match the allowed character set/shape.
    BadFormat(Field),
    /// Salary text is not a finite number.
    SalaryNotANumber,
    /// Salary parsed but is below zero.
    SalaryNegative,
}

impl FieldError {
    /// Field the failure belongs to.
    pub fn field(&self) -> Field {
        match self {
            Self::Empty(field) | Self::BadFormat(field) => *field,
            Self::SalaryNotANumber | Self::SalaryNegative => Field::Salary,
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::Empty(Field::Id) => "Employee ID cannot be empty.",
            Self::Empty(Field::Name) => "Name cannot be empty.",
            Self::Empty(Field::Department) => "Department cannot be empty.",
            Self::Empty(Field::Salary) => "Salary cannot be empty.",
            Self::Empty(Field::Email) => "Email cannot be empty.",
            Self::Empty(Field::Contact) => "Contact Details cannot be empty.",
            Self::BadFormat(Field::Id) => {
                "Employee ID must be alphanumeric (letters and numbers only)."
            }
            Self::BadFormat(Field::Name) => {
                "Name must contain only alphabetic characters and spaces."
            }
            Self::BadFormat(Field::Department) => {
                "Department can only contain letters, numbers, spaces, and hyphens."
            }
            Self::BadFormat(Field::Salary) | Self::SalaryNotANumber => {
                "Salary must be a valid number (e.g., 50000 or 65000.50)."
            }
            Self::BadFormat(Field::Email) => {
                "Invalid email format (must contain '@' and '.', no spaces allowed)."
            }
            Self::BadFormat(Field::Contact) => "Contact Details are invalid.",
            Self::SalaryNegative => "Salary cannot be negative.",
        };
        f.write_str(message)
    }
}

impl Error for FieldError {}

/// Dispatches to the validator for `field`.
pub fn validate_field(field: Field, raw: &str) -> FieldCheck {
    match field {
        Field::Id => validate_id(raw),
        Field::Name => validate_name(raw),
        Field::Department => validate_department(raw),
        Field::Salary => validate_salary(raw).map(|_| ()),
        Field::Email => validate_email(raw),
        Field::Contact => validate_contact(raw),
    }
}

/// Employee id: non-empty, letters and digits only.
///
/// The check runs on the raw text, so surrounding whitespace is rejected
/// as a format error rather than trimmed away.
pub fn validate_id(raw: &str) -> FieldCheck {
    if raw.is_empty() {
        return Err(FieldError::Empty(Field::Id));
    }
    if !raw.chars().all(char::is_alphanumeric) {
        return Err(FieldError::BadFormat(Field::Id));
    }
    Ok(())
}

/// Name: non-blank, ASCII letters and spaces only.
pub fn validate_name(raw: &str) -> FieldCheck {
    check_blank_then_pattern(raw, Field::Name, &NAME_RE)
}

/// Department: non-blank, ASCII letters, digits, spaces and hyphens.
pub fn validate_department(raw: &str) -> FieldCheck {
    check_blank_then_pattern(raw, Field::Department, &DEPARTMENT_RE)
}

/// Salary: non-blank, finite real number, not negative.
///
/// Returns the parsed value so callers need not parse twice.
pub fn validate_salary(raw: &str) -> Result<f64, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty(Field::Salary));
    }
    let value = parse_salary(trimmed).ok_or(FieldError::SalaryNotANumber)?;
    if value < 0.0 {
        return Err(FieldError::SalaryNegative);
    }
    Ok(value)
}

/// Email: non-blank, `local@domain.tld` shape with no whitespace anywhere.
pub fn validate_email(raw: &str) -> FieldCheck {
    check_blank_then_pattern(raw, Field::Email, &EMAIL_RE)
}

/// Contact details: non-blank free text.
pub fn validate_contact(raw: &str) -> FieldCheck {
    if raw.trim().is_empty() {
        return Err(FieldError::Empty(Field::Contact));
    }
    Ok(())
}

/// Parses trimmed salary text into a finite number.
///
/// `inf`/`nan` spellings parse as floats but are not salaries.
pub(crate) fn parse_salary(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn check_blank_then_pattern(raw: &str, field: Field, pattern: &Regex) -> FieldCheck {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty(field));
    }
    if !pattern.is_match(trimmed) {
        return Err(FieldError::BadFormat(field));
    }
    Ok(())
}
