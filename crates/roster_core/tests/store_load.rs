use roster_core::{EmployeeStore, Field, FieldError, SkipReason, StoreConfig};
use std::fs;

const HEADER: &str = "Employee ID,Name,Department,Salary,Email,Contact Details";

fn open_with(content: &str) -> (tempfile::TempDir, EmployeeStore) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.csv");
    fs::write(&path, content).unwrap();
    let store = EmployeeStore::open(StoreConfig::new(&path)).unwrap();
    (dir, store)
}

#[test]
fn missing_file_opens_empty_without_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let store = EmployeeStore::open(StoreConfig::new(dir.path().join("absent.csv"))).unwrap();

    assert!(store.is_empty());
    let report = store.load_report();
    assert!(!report.file_found);
    assert_eq!(report.loaded, 0);
    assert!(report.skipped.is_empty());
    assert!(report.read_error.is_none());
    assert!(!dir.path().join("absent.csv").exists());
}

#[test]
fn bad_lines_are_skipped_and_good_lines_kept() {
    let content = format!(
        "{HEADER}\n\
         BF001,Alice Smith,Engineering,75000.50,alice@x.io,123\n\
         BF002,Bob,Sales\n\
         BF003,Carol,Sales,lots,carol@x.io,456\n"
    );
    let (_dir, store) = open_with(&content);

    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].id(), "BF001");

    let report = store.load_report();
    assert!(report.file_found);
    assert_eq!(report.loaded, 1);
    assert_eq!(report.skipped.len(), 2);

    assert_eq!(report.skipped[0].line, 3);
    assert_eq!(
        report.skipped[0].reason,
        SkipReason::FieldCount {
            expected: 6,
            found: 3
        }
    );
    assert_eq!(report.skipped[1].line, 4);
    assert_eq!(report.skipped[1].reason, SkipReason::UnparseableSalary);
    assert!(report.skipped[1]
        .to_string()
        .starts_with("Skipping line 4 (salary is not a valid number): BF003"));
}

#[test]
fn invalid_fields_and_blank_lines() {
    let content = format!(
        "{HEADER}\n\
         \n\
         BF001,Alice,Engineering,-10,alice@x.io,123\n\
         BF 02,Bob,Sales,10,bob@x.io,456\n\
         \x20\x20BF003,Carol,Sales,10,carol@x.io,789\x20\x20\n"
    );
    let (_dir, store) = open_with(&content);

    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].id(), "BF003");

    let skipped = &store.load_report().skipped;
    assert_eq!(skipped.len(), 2);
    assert_eq!(skipped[0].line, 3);
    assert_eq!(skipped[0].reason, SkipReason::Invalid(FieldError::SalaryNegative));
    assert_eq!(skipped[1].line, 4);
    assert_eq!(
        skipped[1].reason,
        SkipReason::Invalid(FieldError::BadFormat(Field::Id))
    );
}

#[test]
fn duplicate_ids_keep_first_occurrence() {
    let content = format!(
        "{HEADER}\n\
         BF001,Alice,Engineering,1,alice@x.io,1\n\
         BF001,Impostor,Sales,2,imp@x.io,2\n"
    );
    let (_dir, store) = open_with(&content);

    assert_eq!(store.len(), 1);
    assert_eq!(store.find_by_id("BF001").unwrap().name(), "Alice");
    assert_eq!(
        store.load_report().skipped[0].reason,
        SkipReason::DuplicateId("BF001".to_string())
    );
}

#[test]
fn header_only_file_is_empty_but_found() {
    let (_dir, store) = open_with(&format!("{HEADER}\n"));

    assert!(store.is_empty());
    assert!(store.load_report().file_found);
    assert!(store.load_report().skipped.is_empty());
}

#[test]
fn header_line_is_not_validated() {
    let (_dir, store) = open_with("anything at all\nBF1,Ann,Ops,5,a@b.co,x\n");
    assert_eq!(store.len(), 1);
}

#[test]
fn unreadable_path_reports_read_error_and_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = EmployeeStore::open(StoreConfig::new(dir.path())).unwrap();

    assert!(store.is_empty());
    let report = store.load_report();
    let message = report.read_error.as_deref().unwrap();
    assert!(message.starts_with("An error occurred while loading data from"));
}

#[test]
fn undecodable_file_opens_empty_and_next_save_overwrites_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.csv");
    fs::write(&path, b"Employee ID,Name\n\xff\xfe,broken\n").unwrap();

    let store = EmployeeStore::open(StoreConfig::new(&path)).unwrap();
    assert!(store.is_empty());
    let report = store.load_report();
    assert!(report.file_found);
    assert!(report.read_error.is_some());

    store.save().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), format!("{HEADER}\n"));
}

#[test]
fn invalid_store_configs_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.csv");

    let newline = StoreConfig::new(&path).with_delimiter('\n');
    assert!(EmployeeStore::open(newline).is_err());

    let short = StoreConfig::new(&path).with_field_order(vec![Field::Id, Field::Name]);
    let err = EmployeeStore::open(short).unwrap_err();
    assert!(err.to_string().contains("field order"));

    let repeated = StoreConfig::new(&path).with_field_order(vec![Field::Id; 6]);
    assert!(EmployeeStore::open(repeated).is_err());
}
