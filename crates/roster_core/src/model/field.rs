//! Canonical employee field identifiers.
//!
//! # Responsibility
//! - Name the six record fields once, in canonical serialization order.
//! - Map fields to their persisted header names.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One of the six employee record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Name,
    Department,
    Salary,
    Email,
    Contact,
}

impl Field {
    /// All fields in canonical order (id, name, department, salary, email, contact).
    pub const ALL: [Field; 6] = [
        Field::Id,
        Field::Name,
        Field::Department,
        Field::Salary,
        Field::Email,
        Field::Contact,
    ];

    /// Column name written to the header line of the backing file.
    pub fn header_name(self) -> &'static str {
        match self {
            Self::Id => "Employee ID",
            Self::Name => "Name",
            Self::Department => "Department",
            Self::Salary => "Salary",
            Self::Email => "Email",
            Self::Contact => "Contact Details",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header_name())
    }
}

/// Returns the canonical field order as an owned vector.
pub fn default_field_order() -> Vec<Field> {
    Field::ALL.to_vec()
}
