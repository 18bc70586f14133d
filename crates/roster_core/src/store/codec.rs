//! Delimited line encoding for the backing file.
//!
//! # Invariants
//! - One record per line, fields joined by a single delimiter character.
//! - No quoting or escaping: a value containing the delimiter will split
//!   into extra columns on reload.

use crate::model::employee::{Employee, FieldMap};
use crate::model::field::Field;

/// Builds the header line (no trailing newline).
pub(crate) fn header_line(order: &[Field], delimiter: char) -> String {
    join(order.iter().map(|field| field.header_name().to_string()), delimiter)
}

/// Builds one record line (no trailing newline).
pub(crate) fn encode_line(employee: &Employee, order: &[Field], delimiter: char) -> String {
    join(order.iter().map(|field| employee.field_text(*field)), delimiter)
}

/// Returns the fields of `employee` whose text contains `delimiter`.
pub(crate) fn fields_containing(
    employee: &Employee,
    order: &[Field],
    delimiter: char,
) -> Vec<Field> {
    order
        .iter()
        .copied()
        .filter(|field| employee.field_text(*field).contains(delimiter))
        .collect()
}

/// Splits a trimmed line and zips it with `order`.
///
/// Returns `Err(found)` with the column count when it does not match.
pub(crate) fn decode_line(line: &str, order: &[Field], delimiter: char) -> Result<FieldMap, usize> {
    let values: Vec<&str> = line.split(delimiter).collect();
    if values.len() != order.len() {
        return Err(values.len());
    }
    Ok(order
        .iter()
        .copied()
        .zip(values.into_iter().map(str::to_string))
        .collect())
}

fn join(values: impl Iterator<Item = String>, delimiter: char) -> String {
    let mut out = String::new();
    for (index, value) in values.enumerate() {
        if index > 0 {
            out.push(delimiter);
        }
        out.push_str(&value);
    }
    out
}
