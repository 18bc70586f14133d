//! Interactive menu shell.
//!
//! # Responsibility
//! - Collect and pre-validate user input, then call the employee service.
//! - Ask for confirmation before destructive or multi-field changes.
//!
//! # Invariants
//! - End of input at any prompt ends the session with a final save.
//! - Store and service calls are unconditional; confirmation happens here.

use crate::render;
use log::info;
use roster_core::{
    validate_field, validate_id, Employee, EmployeeDraft, EmployeeService, EmployeeUpdate, Field,
    NotificationOutcome,
};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

const AFFIRMATIVE: [&str; 2] = ["yes", "y"];

/// Yes/no question capability.
pub trait Confirm {
    /// Returns `true` only for an affirmative answer; end of input is `false`.
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Line-oriented terminal: prompts on `output`, answers from `input`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Shows `label` and reads one trimmed line; `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }
}

impl<R: BufRead, W: Write> Confirm for Console<R, W> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.prompt(question)?.unwrap_or_default().to_lowercase();
        Ok(AFFIRMATIVE.contains(&answer.as_str()))
    }
}

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    EndOfInput,
}

macro_rules! read_or_end {
    ($expr:expr) => {
        match $expr? {
            Some(value) => value,
            None => return Ok(Flow::EndOfInput),
        }
    };
}

pub struct Shell<R, W> {
    console: Console<R, W>,
    service: EmployeeService,
    organization: String,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(console: Console<R, W>, service: EmployeeService, organization: &str) -> Self {
        Self {
            console,
            service,
            organization: organization.to_string(),
        }
    }

    /// Runs the menu loop until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        let welcome = format!(
            "\nWelcome to the {} Employee Management System",
            self.organization
        );
        self.console.say(welcome)?;
        info!("event=shell_start module=cli status=ok");

        loop {
            self.print_menu()?;
            let Some(choice) = self.console.prompt("Enter your choice (1-7): ")? else {
                self.console
                    .say("\nExiting due to unexpected end of input. Saving data...")?;
                return self.exit();
            };

            let flow = match choice.as_str() {
                "1" => self.add_employee()?,
                "2" => self.view_employee()?,
                "3" => self.update_employee()?,
                "4" => self.delete_employee()?,
                "5" => self.list_employees()?,
                "6" => self.department_report()?,
                "7" => {
                    self.console
                        .say("Exiting Employee Management System. Saving data...")?;
                    return self.exit();
                }
                _ => {
                    self.console
                        .say("Invalid choice. Please enter a number between 1 and 7.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::EndOfInput {
                self.console
                    .say("\nExiting due to unexpected end of input. Saving data...")?;
                return self.exit();
            }
        }
    }

    #[cfg(test)]
    fn into_parts(self) -> (EmployeeService, W) {
        (self.service, self.console.output)
    }

    fn print_menu(&mut self) -> io::Result<()> {
        self.console.say("\n--- Main Menu ---")?;
        for entry in [
            "1. Add Employee",
            "2. View Employee",
            "3. Update Employee",
            "4. Delete Employee",
            "5. List All Employees",
            "6. Department Wise Report",
            "7. Exit",
        ] {
            self.console.say(entry)?;
        }
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        if let Err(err) = self.service.shutdown() {
            self.console
                .say(format_args!("An error occurred while saving data: {err}"))?;
        }
        info!("event=shell_exit module=cli status=ok");
        self.console.say("Goodbye!")
    }

    fn add_employee(&mut self) -> io::Result<Flow> {
        self.console.say("\n--- Add New Employee ---")?;

        let id = loop {
            let id = read_or_end!(self.console.prompt("Enter Employee ID: "));
            if let Err(err) = validate_id(&id) {
                self.console.say(format_args!("Validation failed: {err}"))?;
                continue;
            }
            if !self.service.store().is_id_unique(&id) {
                self.console.say(format_args!(
                    "Validation failed: Employee ID '{id}' already exists."
                ))?;
                continue;
            }
            break id;
        };
        let name = read_or_end!(self.prompt_valid("Enter Employee Name: ", Field::Name));
        let department = read_or_end!(self.prompt_valid("Enter Department: ", Field::Department));
        let salary = read_or_end!(self.prompt_valid("Enter Salary: ", Field::Salary));
        let email = read_or_end!(self.prompt_valid("Enter Employee Email: ", Field::Email));
        let contact = read_or_end!(self.prompt_valid(
            "Enter Contact Details (e.g., Phone/Address): ",
            Field::Contact
        ));

        let draft = EmployeeDraft {
            id,
            name,
            department,
            salary,
            email,
            contact,
        };
        let outcome = match self.service.add_employee(&draft) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.console
                    .say(format_args!("Error creating employee record: {err}"))?;
                return Ok(Flow::Continue);
            }
        };

        if let Some(err) = outcome.save.error() {
            self.console.say(format_args!(
                "An error occurred while saving data: {err}"
            ))?;
        }
        self.console.say(format_args!(
            "\nConfirmation: Employee '{}' (ID: {}) has been successfully added.",
            outcome.employee.name(),
            outcome.employee.id()
        ))?;
        match outcome.notification {
            NotificationOutcome::Sent => self.console.say(format_args!(
                "Confirmation email queued for {}.",
                outcome.employee.email()
            ))?,
            NotificationOutcome::Disabled => {}
            NotificationOutcome::Failed(reason) => self
                .console
                .say(format_args!("Confirmation email was not sent: {reason}"))?,
        }
        Ok(Flow::Continue)
    }

    fn view_employee(&mut self) -> io::Result<Flow> {
        self.console.say("\n--- View Employee Details ---")?;
        if self.service.store().is_empty() {
            self.console.say("No employee records available to view.")?;
            return Ok(Flow::Continue);
        }
        let id = read_or_end!(self.console.prompt("Enter Employee ID to view: "));
        let Some(employee) = self.lookup(&id)? else {
            return Ok(Flow::Continue);
        };

        self.console.say("\nEmployee Details:")?;
        render::employee_details(self.console.output(), "Employee ID", &employee)?;
        Ok(Flow::Continue)
    }

    fn update_employee(&mut self) -> io::Result<Flow> {
        self.console.say("\n--- Update Employee Details ---")?;
        if self.service.store().is_empty() {
            self.console.say("No employee records available to update.")?;
            return Ok(Flow::Continue);
        }
        let id = read_or_end!(self.console.prompt("Enter Employee ID to update: "));
        let Some(current) = self.lookup(&id)? else {
            return Ok(Flow::Continue);
        };

        self.console.say("\nCurrent Employee Details:")?;
        render::employee_details(self.console.output(), "ID", &current)?;
        self.console
            .say("\nEnter new details (press Enter to keep current value):")?;

        let mut update = EmployeeUpdate::new();
        for (field, label, shown) in [
            (Field::Name, "Name", current.name().to_string()),
            (Field::Department, "Department", current.department().to_string()),
            (Field::Salary, "Salary", current.field_text(Field::Salary)),
            (Field::Email, "Email", current.email().to_string()),
            (Field::Contact, "Contact Details", current.contact().to_string()),
        ] {
            let value = read_or_end!(self
                .console
                .prompt(&format!("Enter new {label} ({shown}): ")));
            if value.is_empty() {
                continue;
            }
            if let Err(err) = validate_field(field, &value) {
                self.console
                    .say(format_args!("Update aborted: Invalid {label} - {err}"))?;
                return Ok(Flow::Continue);
            }
            update = match field {
                Field::Name => update.name(value),
                Field::Department => update.department(value),
                Field::Salary => update.salary(value),
                Field::Email => update.email(value),
                Field::Contact => update.contact(value),
                Field::Id => update,
            };
        }

        if update.is_empty() {
            self.console.say("No changes entered. Update cancelled.")?;
            return Ok(Flow::Continue);
        }
        let preview = match current.apply(&update) {
            Ok(preview) => preview,
            Err(err) => {
                self.console.say(format_args!("Update aborted: {err}"))?;
                return Ok(Flow::Continue);
            }
        };

        self.console.say("\nPreview of updated details:")?;
        self.console.say(format_args!("  Name: {}", preview.name()))?;
        self.console
            .say(format_args!("  Department: {}", preview.department()))?;
        self.console
            .say(format_args!("  Salary: {}", preview.field_text(Field::Salary)))?;
        self.console.say(format_args!("  Email: {}", preview.email()))?;
        self.console
            .say(format_args!("  Contact Details: {}", preview.contact()))?;

        if !self.console.confirm("\nSave these changes? (yes/no): ")? {
            self.console.say("Update cancelled. No changes were saved.")?;
            return Ok(Flow::Continue);
        }
        match self.service.update_employee(current.id(), &update) {
            Ok(outcome) => match outcome.save.error() {
                None => self.console.say("Employee details updated successfully.")?,
                Some(err) => self.console.say(format_args!(
                    "An error occurred while saving the update: {err}"
                ))?,
            },
            Err(err) => self.console.say(format_args!("Error: {err}"))?,
        }
        Ok(Flow::Continue)
    }

    fn delete_employee(&mut self) -> io::Result<Flow> {
        self.console.say("\n--- Delete Employee Record ---")?;
        if self.service.store().is_empty() {
            self.console.say("No employee records available to delete.")?;
            return Ok(Flow::Continue);
        }
        let id = read_or_end!(self.console.prompt("Enter Employee ID to delete: "));
        let Some(employee) = self.lookup(&id)? else {
            return Ok(Flow::Continue);
        };

        self.console.say("\nEmployee Details to Delete:")?;
        self.console
            .say(format_args!("  Employee ID: {}", employee.id()))?;
        self.console.say(format_args!("  Name: {}", employee.name()))?;
        self.console
            .say(format_args!("  Department: {}", employee.department()))?;

        let question = "\nAre you sure you want to permanently delete this employee? (yes/no): ";
        if !self.console.confirm(question)? {
            self.console.say("Deletion cancelled.")?;
            return Ok(Flow::Continue);
        }
        match self.service.delete_employee(employee.id()) {
            Ok(outcome) => {
                if let Some(err) = outcome.save.error() {
                    self.console
                        .say(format_args!("An error occurred during deletion: {err}"))?;
                } else {
                    self.console.say(format_args!(
                        "Employee with ID '{}' has been successfully deleted.",
                        outcome.employee.id()
                    ))?;
                }
            }
            Err(err) => self.console.say(format_args!("Error: {err}"))?,
        }
        Ok(Flow::Continue)
    }

    fn list_employees(&mut self) -> io::Result<Flow> {
        self.console.say("\n--- List All Employees ---")?;
        let employees = self.service.list_employees();
        if employees.is_empty() {
            self.console.say("No employee records found.")?;
        } else {
            render::employee_table(self.console.output(), &employees)?;
        }
        Ok(Flow::Continue)
    }

    fn department_report(&mut self) -> io::Result<Flow> {
        self.console.say("\n--- Employee Report by Department ---")?;
        let report = self.service.department_report();
        if report.is_empty() {
            self.console
                .say("No employee records available to generate reports.")?;
        } else {
            render::department_report(self.console.output(), &report)?;
        }
        Ok(Flow::Continue)
    }

    /// Re-prompts until `field` validates; `None` at end of input.
    fn prompt_valid(&mut self, label: &str, field: Field) -> io::Result<Option<String>> {
        loop {
            let Some(value) = self.console.prompt(label)? else {
                return Ok(None);
            };
            match validate_field(field, &value) {
                Ok(()) => return Ok(Some(value)),
                Err(err) => self.console.say(format_args!("Validation failed: {err}"))?,
            }
        }
    }

    /// Validates an entered id and fetches a copy of its record, printing
    /// the reason when there is none.
    fn lookup(&mut self, id: &str) -> io::Result<Option<Employee>> {
        if let Err(err) = validate_id(id) {
            self.console.say(format_args!("Invalid input: {err}"))?;
            return Ok(None);
        }
        match self.service.view_employee(id) {
            Ok(employee) => Ok(Some(employee.clone())),
            Err(err) => {
                self.console.say(format_args!("Error: {err}"))?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Confirm, Console, Shell};
    use roster_core::{EmployeeService, EmployeeStore, StoreConfig};
    use std::fs;
    use std::io::Cursor;
    use std::path::{Path, PathBuf};

    const ADD_ALICE: &str = "1\nBF001\nAlice Smith\nEngineering\n75000.50\nalice.s@bitfutura.test\n123-456-7890\n";

    fn run_session(data_file: &Path, script: &str) -> (EmployeeService, String) {
        let store = EmployeeStore::open(StoreConfig::new(data_file)).unwrap();
        let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let mut shell = Shell::new(console, EmployeeService::new(store), "BitFutura");
        shell.run().unwrap();
        let (service, output) = shell.into_parts();
        (service, String::from_utf8(output).unwrap())
    }

    fn data_file(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("employees.csv")
    }

    #[test]
    fn confirm_accepts_yes_and_y_only() {
        for (answer, expected) in [("yes\n", true), ("Y\n", true), ("no\n", false), ("", false)] {
            let mut console = Console::new(Cursor::new(answer.as_bytes().to_vec()), Vec::new());
            assert_eq!(console.confirm("ok? ").unwrap(), expected, "answer {answer:?}");
        }
    }

    #[test]
    fn add_reprompts_until_each_field_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let script = "1\nBF 1\nBF1\nAnn1\nAnn\nOps@\nOps\n-5\n5\nbad\nann@x.io\n\nx\n7\n";
        let (service, output) = run_session(&data_file(&dir), script);

        assert!(output.contains(
            "Validation failed: Employee ID must be alphanumeric (letters and numbers only)."
        ));
        assert!(output.contains(
            "Validation failed: Name must contain only alphabetic characters and spaces."
        ));
        assert!(output.contains("Validation failed: Salary cannot be negative."));
        assert!(output.contains("Validation failed: Contact Details cannot be empty."));
        assert!(output.contains("Employee 'Ann' (ID: BF1) has been successfully added."));
        assert_eq!(service.store().len(), 1);
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn add_rejects_duplicate_id_and_reprompts() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!("{ADD_ALICE}1\nBF001\nBF002\nBob\nOps\n1\nbob@x.io\n9\n7\n");
        let (service, output) = run_session(&data_file(&dir), &script);

        assert!(output.contains("Validation failed: Employee ID 'BF001' already exists."));
        assert_eq!(service.store().len(), 2);
    }

    #[test]
    fn update_keeps_blank_fields_and_saves_on_yes() {
        let dir = tempfile::tempdir().unwrap();
        let path = data_file(&dir);
        let script = format!("{ADD_ALICE}3\nBF001\n\nResearch\n80000\n\n\ny\n7\n");
        let (service, output) = run_session(&path, &script);

        assert!(output.contains("Enter new Salary (75000.50): "));
        assert!(output.contains("  Department: Research"));
        assert!(output.contains("Employee details updated successfully."));

        let record = service.view_employee("BF001").unwrap();
        assert_eq!(record.department(), "Research");
        assert_eq!(record.name(), "Alice Smith");
        assert!(fs::read_to_string(&path).unwrap().contains("Research,80000.00"));
    }

    #[test]
    fn update_without_changes_or_with_no_answer_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!("{ADD_ALICE}3\nBF001\n\n\n\n\n\n3\nBF001\nBob\n\n\n\n\nno\n7\n");
        let (service, output) = run_session(&data_file(&dir), &script);

        assert!(output.contains("No changes entered. Update cancelled."));
        assert!(output.contains("Update cancelled. No changes were saved."));
        assert_eq!(service.view_employee("BF001").unwrap().name(), "Alice Smith");
    }

    #[test]
    fn update_aborts_on_invalid_value() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!("{ADD_ALICE}3\nBF001\n\n\nlots\n7\n");
        let (_service, output) = run_session(&data_file(&dir), &script);

        assert!(output.contains(
            "Update aborted: Invalid Salary - Salary must be a valid number (e.g., 50000 or 65000.50)."
        ));
    }

    #[test]
    fn delete_requires_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let path = data_file(&dir);
        let script = format!("{ADD_ALICE}4\nBF001\nn\n4\nBF001\nyes\n7\n");
        let (service, output) = run_session(&path, &script);

        assert!(output.contains("Deletion cancelled."));
        assert!(output.contains("Employee with ID 'BF001' has been successfully deleted."));
        assert!(service.store().is_empty());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Employee ID,Name,Department,Salary,Email,Contact Details\n"
        );
    }

    #[test]
    fn lookups_report_bad_and_unknown_ids() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!("2\n{ADD_ALICE}2\nBF 9\n2\nBF9\n2\nBF001\n7\n");
        let (_service, output) = run_session(&data_file(&dir), &script);

        assert!(output.contains("No employee records available to view."));
        assert!(output.contains("Invalid input: Employee ID must be alphanumeric"));
        assert!(output.contains("Error: Employee not found with ID 'BF9'."));
        assert!(output.contains("  Employee ID: BF001\n  Name: Alice Smith\n"));
        assert!(output.contains("  Salary: 75000.50\n"));
    }

    #[test]
    fn list_and_report_render_current_records() {
        let dir = tempfile::tempdir().unwrap();
        let script = format!("5\n6\n{ADD_ALICE}5\n6\n7\n");
        let (_service, output) = run_session(&data_file(&dir), &script);

        assert!(output.contains("No employee records found."));
        assert!(output.contains("No employee records available to generate reports."));
        assert!(output.contains("Total Employees: 1"));
        assert!(output.contains("--- Department: ENGINEERING ---"));
    }

    #[test]
    fn invalid_choice_and_end_of_input() {
        let dir = tempfile::tempdir().unwrap();
        let (_service, output) = run_session(&data_file(&dir), "9\n1\nBF1\n");

        assert!(output.contains("Invalid choice. Please enter a number between 1 and 7."));
        assert!(output.contains("Exiting due to unexpected end of input. Saving data..."));
        assert!(output.ends_with("Goodbye!\n"));
        assert!(data_file(&dir).exists());
    }
}
