//! Department-grouped report over a record slice.
//!
//! # Invariants
//! - Grouping key is the trimmed, lower-cased department; blank maps to
//!   [`UNCATEGORIZED`].
//! - A group's display name is the trimmed department of its first member
//!   in stored order.
//! - Groups are ordered by display name, members by name.

use crate::model::employee::Employee;
use std::collections::HashMap;

/// Display name for records whose department is blank.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Records sharing one normalized department.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentGroup {
    /// Normalized grouping key.
    pub key: String,
    pub display_name: String,
    /// Members sorted by name ascending.
    pub members: Vec<Employee>,
    pub employee_count: usize,
    pub salary_total: f64,
}

/// Full department report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentReport {
    pub groups: Vec<DepartmentGroup>,
    /// Employees across all groups.
    pub total_employees: usize,
}

impl DepartmentReport {
    pub fn department_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Finds a group by department name, case-insensitively.
    pub fn group(&self, department: &str) -> Option<&DepartmentGroup> {
        let (key, _) = department_key(department);
        self.groups.iter().find(|group| group.key == key)
    }
}

pub(crate) fn build_department_report(records: &[Employee]) -> DepartmentReport {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<DepartmentGroup> = Vec::new();

    for employee in records {
        let (key, display_name) = department_key(employee.department());
        let position = *positions.entry(key.clone()).or_insert_with(|| {
            groups.push(DepartmentGroup {
                key,
                display_name,
                members: Vec::new(),
                employee_count: 0,
                salary_total: 0.0,
            });
            groups.len() - 1
        });
        groups[position].members.push(employee.clone());
    }

    for group in &mut groups {
        group.members.sort_by(|a, b| a.name().cmp(b.name()));
        group.employee_count = group.members.len();
        group.salary_total = group.members.iter().map(Employee::salary).sum();
    }
    groups.sort_by(|a, b| a.display_name.cmp(&b.display_name));

    let total_employees = groups.iter().map(|group| group.employee_count).sum();
    DepartmentReport {
        groups,
        total_employees,
    }
}

fn department_key(department: &str) -> (String, String) {
    let trimmed = department.trim();
    if trimmed.is_empty() {
        return (UNCATEGORIZED.to_lowercase(), UNCATEGORIZED.to_string());
    }
    (trimmed.to_lowercase(), trimmed.to_string())
}
