//! Text layouts for listings, reports and load summaries.

use roster_core::{format_salary, DepartmentReport, Employee, LoadReport};
use std::io::{self, Write};
use std::path::Path;

const LIST_RULE_WIDTH: usize = 60;
const REPORT_RULE_WIDTH: usize = 75;

/// Startup summary: one line per skipped record, then the outcome.
pub fn load_summary(out: &mut impl Write, report: &LoadReport, path: &Path) -> io::Result<()> {
    for diagnostic in &report.skipped {
        writeln!(out, "{diagnostic}")?;
    }
    if let Some(message) = &report.read_error {
        writeln!(out, "{message}")
    } else if report.file_found {
        writeln!(
            out,
            "Successfully loaded {} employee records from {}.",
            report.loaded,
            path.display()
        )
    } else {
        writeln!(
            out,
            "No data file found ({}). Starting with an empty list.",
            path.display()
        )
    }
}

/// Labelled field block used by view/update/delete.
pub fn employee_details(out: &mut impl Write, id_label: &str, employee: &Employee) -> io::Result<()> {
    writeln!(out, "  {id_label}: {}", employee.id())?;
    writeln!(out, "  Name: {}", employee.name())?;
    writeln!(out, "  Department: {}", employee.department())?;
    writeln!(out, "  Salary: {}", format_salary(employee.salary()))?;
    writeln!(out, "  Email: {}", employee.email())?;
    writeln!(out, "  Contact Details: {}", employee.contact())
}

/// Id/name/department table with a total line.
pub fn employee_table(out: &mut impl Write, employees: &[&Employee]) -> io::Result<()> {
    let rule = "-".repeat(LIST_RULE_WIDTH);
    writeln!(out, "{:<15} {:<25} {:<20}", "Employee ID", "Name", "Department")?;
    writeln!(out, "{rule}")?;
    for employee in employees {
        writeln!(
            out,
            "{:<15} {:<25} {:<20}",
            employee.id(),
            employee.name(),
            employee.department()
        )?;
    }
    writeln!(out, "{rule}")?;
    writeln!(out, "Total Employees: {}", employees.len())
}

/// Per-department tables with subtotals, then the grand total.
pub fn department_report(out: &mut impl Write, report: &DepartmentReport) -> io::Result<()> {
    let banner = "=".repeat(REPORT_RULE_WIDTH);
    let rule = "-".repeat(REPORT_RULE_WIDTH);

    writeln!(out, "\n{banner}")?;
    writeln!(out, " Overall Employee Distribution by Department")?;
    writeln!(out, "{banner}")?;

    for group in &report.groups {
        writeln!(out, "\n--- Department: {} ---", group.display_name.to_uppercase())?;
        writeln!(
            out,
            "{:<15} {:<25} {:<15} {:<25}",
            "Employee ID", "Name", "Salary", "Email"
        )?;
        writeln!(out, "{rule}")?;
        for employee in &group.members {
            writeln!(
                out,
                "{:<15} {:<25} {:<15.2} {:<25}",
                employee.id(),
                employee.name(),
                employee.salary(),
                employee.email()
            )?;
        }
        writeln!(out, "{rule}")?;
        writeln!(
            out,
            "Total Employees in {}: {}",
            group.display_name, group.employee_count
        )?;
        writeln!(
            out,
            "Total Salary for {}: {}",
            group.display_name,
            format_salary(group.salary_total)
        )?;
        writeln!(out, "{rule}")?;
    }

    writeln!(out, "\n{banner}")?;
    writeln!(
        out,
        "Report Complete. Found {} departments.",
        report.department_count()
    )?;
    writeln!(
        out,
        "Total Employees Across All Departments: {}",
        report.total_employees
    )?;
    writeln!(out, "{banner}")
}
