//! Employee store: in-memory collection mirrored to a delimited file.
//!
//! # Responsibility
//! - Load records at open time, skipping and reporting bad lines.
//! - Rewrite the backing file after every mutation.
//! - Answer id/department lookups and build sorted/grouped views.
//!
//! # Invariants
//! - `records` is private; only the methods below mutate it.
//! - `add` does not check id uniqueness; callers must use `is_id_unique`.
//! - `update` and `delete` are unconditional once called.

use super::codec::{decode_line, encode_line, fields_containing, header_line};
use super::report::{build_department_report, DepartmentReport};
use super::{SaveOutcome, StoreConfig, StoreError, StoreResult};
use crate::model::employee::{Employee, EmployeeUpdate};
use crate::model::validation::FieldError;
use log::{error, info, warn};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::time::Instant;

/// Why one persisted line was skipped at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Column count differs from the configured field order.
    FieldCount { expected: usize, found: usize },
    /// Salary column is not a number.
    UnparseableSalary,
    /// Some other field failed validation.
    Invalid(FieldError),
    /// Id already accepted earlier in the same file.
    DuplicateId(String),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldCount { expected, found } => {
                write!(f, "expected {expected} values, got {found}")
            }
            Self::UnparseableSalary => write!(f, "salary is not a valid number"),
            Self::Invalid(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "duplicate Employee ID '{id}'"),
        }
    }
}

impl SkipReason {
    fn code(&self) -> &'static str {
        match self {
            Self::FieldCount { .. } => "field_count",
            Self::UnparseableSalary => "salary_not_numeric",
            Self::Invalid(_) => "invalid_field",
            Self::DuplicateId(_) => "duplicate_id",
        }
    }
}

/// One skipped line from the backing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadDiagnostic {
    /// 1-based line number; the header is line 1.
    pub line: usize,
    pub reason: SkipReason,
    /// Trimmed line text.
    pub content: String,
}

impl Display for LoadDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Skipping line {} ({}): {}", self.line, self.reason, self.content)
    }
}

/// Summary of the most recent load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Whether the backing file existed.
    pub file_found: bool,
    /// Number of records accepted.
    pub loaded: usize,
    /// Lines skipped, in file order.
    pub skipped: Vec<LoadDiagnostic>,
    /// Read fault message; the collection is empty when set.
    pub read_error: Option<String>,
}

/// File-backed employee collection.
#[derive(Debug)]
pub struct EmployeeStore {
    config: StoreConfig,
    records: Vec<Employee>,
    load_report: LoadReport,
}

impl EmployeeStore {
    /// Validates `config` and loads the backing file.
    ///
    /// A missing file yields an empty store. Read faults and bad lines are
    /// reported through [`EmployeeStore::load_report`], never returned.
    ///
    /// # Errors
    /// - Returns `InvalidConfig` when `config.validate()` fails.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        let (records, load_report) = load_records(&config);
        Ok(Self {
            config,
            records,
            load_report,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Report from the load performed by `open`.
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Records in stored (insertion) order.
    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Employee> {
        self.records.iter().find(|employee| employee.id() == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|employee| employee.id() == id)
    }

    pub fn is_id_unique(&self, id: &str) -> bool {
        self.find_by_id(id).is_none()
    }

    /// Case-insensitive, trimmed department match against every record.
    pub fn department_exists(&self, name: &str) -> bool {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return false;
        }
        self.records
            .iter()
            .any(|employee| employee.department().trim().to_lowercase() == wanted)
    }

    /// Appends `employee` and saves.
    pub fn add(&mut self, employee: Employee) -> SaveOutcome {
        let id = employee.id().to_string();
        self.records.push(employee);
        self.persist("add", &id)
    }

    /// Replaces the supplied fields of record `id` and saves.
    ///
    /// # Errors
    /// - `NotFound` when no record has `id`.
    /// - `Validation` when a supplied value is invalid; nothing changes.
    pub fn update(&mut self, id: &str, update: &EmployeeUpdate) -> StoreResult<SaveOutcome> {
        let index = self
            .index_of(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let next = self.records[index].apply(update)?;
        self.records[index] = next;
        Ok(self.persist("update", id))
    }

    /// Removes record `id` and saves, returning the removed record.
    ///
    /// # Errors
    /// - `NotFound` when no record has `id`.
    pub fn delete(&mut self, id: &str) -> StoreResult<(Employee, SaveOutcome)> {
        let index = self
            .index_of(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = self.records.remove(index);
        let outcome = self.persist("delete", id);
        Ok((removed, outcome))
    }

    /// All records sorted by id ascending; stored order is untouched.
    pub fn list_sorted(&self) -> Vec<&Employee> {
        let mut sorted: Vec<&Employee> = self.records.iter().collect();
        sorted.sort_by(|a, b| a.id().cmp(b.id()));
        sorted
    }

    /// Groups records by normalized department.
    pub fn department_report(&self) -> DepartmentReport {
        build_department_report(&self.records)
    }

    /// Rewrites the backing file from the current collection.
    ///
    /// # Side effects
    /// - Creates missing parent directories.
    /// - Emits `store_save` logging events.
    pub fn save(&self) -> StoreResult<()> {
        let started_at = Instant::now();
        let order = &self.config.field_order;
        let delimiter = self.config.delimiter;

        let mut content = header_line(order, delimiter);
        content.push('\n');
        for employee in &self.records {
            let unsafe_fields = fields_containing(employee, order, delimiter);
            if !unsafe_fields.is_empty() {
                warn!(
                    "event=store_save module=store status=warn reason=delimiter_in_value id={} fields={:?}",
                    employee.id(),
                    unsafe_fields
                );
            }
            content.push_str(&encode_line(employee, order, delimiter));
            content.push('\n');
        }

        let path = &self.config.path;
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, content.as_bytes())
        };

        match write() {
            Ok(()) => {
                info!(
                    "event=store_save module=store status=ok records={} duration_ms={}",
                    self.records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(source) => {
                error!(
                    "event=store_save module=store status=error path={} duration_ms={} error={}",
                    path.display(),
                    started_at.elapsed().as_millis(),
                    source
                );
                Err(StoreError::Io {
                    path: path.clone(),
                    source,
                })
            }
        }
    }

    fn persist(&self, operation: &str, id: &str) -> SaveOutcome {
        info!("event=store_{operation} module=store status=ok id={id}");
        SaveOutcome::from(self.save())
    }
}

fn load_records(config: &StoreConfig) -> (Vec<Employee>, LoadReport) {
    let started_at = Instant::now();
    let path = &config.path;

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                "event=store_load module=store status=ok file_found=false path={}",
                path.display()
            );
            return (Vec::new(), LoadReport::default());
        }
        Err(err) => {
            error!(
                "event=store_load module=store status=error path={} error={}",
                path.display(),
                err
            );
            let report = LoadReport {
                file_found: path.exists(),
                read_error: Some(format!(
                    "An error occurred while loading data from {}: {err}",
                    path.display()
                )),
                ..LoadReport::default()
            };
            return (Vec::new(), report);
        }
    };

    let (records, skipped) = parse_content(&content, config);
    for diagnostic in &skipped {
        warn!(
            "event=store_load_skip module=store status=warn line={} reason={}",
            diagnostic.line,
            diagnostic.reason.code()
        );
    }
    info!(
        "event=store_load module=store status=ok file_found=true loaded={} skipped={} duration_ms={}",
        records.len(),
        skipped.len(),
        started_at.elapsed().as_millis()
    );

    let report = LoadReport {
        file_found: true,
        loaded: records.len(),
        skipped,
        read_error: None,
    };
    (records, report)
}

fn parse_content(content: &str, config: &StoreConfig) -> (Vec<Employee>, Vec<LoadDiagnostic>) {
    let order = &config.field_order;
    let mut records: Vec<Employee> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut skipped = Vec::new();

    // Line 1 is the header and is not checked against the field order.
    for (index, raw_line) in content.lines().enumerate().skip(1) {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let mut skip = |reason: SkipReason| {
            skipped.push(LoadDiagnostic {
                line: line_number,
                reason,
                content: line.to_string(),
            });
        };

        let fields = match decode_line(line, order, config.delimiter) {
            Ok(fields) => fields,
            Err(found) => {
                skip(SkipReason::FieldCount {
                    expected: order.len(),
                    found,
                });
                continue;
            }
        };

        match Employee::from_fields(&fields) {
            Ok(Some(employee)) => {
                if seen_ids.insert(employee.id().to_string()) {
                    records.push(employee);
                } else {
                    skip(SkipReason::DuplicateId(employee.id().to_string()));
                }
            }
            Ok(None) => skip(SkipReason::UnparseableSalary),
            Err(err) => skip(SkipReason::Invalid(err)),
        }
    }

    (records, skipped)
}
