//! Employee domain model.
//!
//! # Responsibility
//! - Define the record shape, its fields, and their validation rules.
//!
//! # Invariants
//! - No partially-valid `Employee` can be constructed.
//! - Validators are the single source of truth for field formats.

pub mod employee;
pub mod field;
pub mod validation;
