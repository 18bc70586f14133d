use roster_core::{Employee, EmployeeDraft, EmployeeUpdate, Field, FieldError, FieldMap};

fn alice() -> Employee {
    Employee::new(
        "BF001",
        "Alice Smith",
        "Engineering",
        "75000.50",
        "alice.s@bitfutura.test",
        "123-456-7890",
    )
    .unwrap()
}

fn fields_of(employee: &Employee) -> FieldMap {
    employee.to_fields().into_iter().collect()
}

#[test]
fn new_trims_strings_and_parses_salary() {
    let employee = Employee::new(
        "BF7",
        "  Bob Jones ",
        " Ops ",
        " 60000 ",
        " bob@x.io ",
        "  ext 12 ",
    )
    .unwrap();

    assert_eq!(employee.id(), "BF7");
    assert_eq!(employee.name(), "Bob Jones");
    assert_eq!(employee.department(), "Ops");
    assert_eq!(employee.salary(), 60000.0);
    assert_eq!(employee.email(), "bob@x.io");
    assert_eq!(employee.contact(), "ext 12");
}

#[test]
fn new_reports_first_failure_in_field_order() {
    let err = Employee::new("", "", "", "-1", "bad", "").unwrap_err();
    assert_eq!(err, FieldError::Empty(Field::Id));

    let err = Employee::new("BF1", "Ann", "Ops", "-1", "bad", "").unwrap_err();
    assert_eq!(err, FieldError::SalaryNegative);

    let err = Employee::new("BF1", "Ann", "Ops", "1", "a@b.c", " ").unwrap_err();
    assert_eq!(err.to_string(), "Contact Details cannot be empty.");
}

#[test]
fn to_fields_uses_canonical_order_and_two_decimal_salary() {
    let fields = alice().to_fields();
    let keys: Vec<Field> = fields.iter().map(|(field, _)| *field).collect();
    assert_eq!(keys, Field::ALL.to_vec());
    assert_eq!(fields[3].1, "75000.50");

    let round = Employee::new("A1", "Ann", "Ops", "60000", "a@b.c", "1").unwrap();
    assert_eq!(round.field_text(Field::Salary), "60000.00");
}

#[test]
fn from_fields_round_trips_valid_records() {
    for employee in [
        alice(),
        Employee::new("Z9", "Zed", "QA-2", "0", "z@q.a", "n/a").unwrap(),
        Employee::new("M3", "Mo", "Ops", "1234.567", "m@o.ps", "9").unwrap(),
    ] {
        let decoded = Employee::from_fields(&fields_of(&employee)).unwrap().unwrap();
        assert_eq!(decoded.id(), employee.id());
        assert_eq!(decoded.name(), employee.name());
        assert_eq!(decoded.department(), employee.department());
        assert_eq!(decoded.email(), employee.email());
        assert_eq!(decoded.contact(), employee.contact());
        assert_eq!(
            format!("{:.2}", decoded.salary()),
            format!("{:.2}", employee.salary())
        );
    }
}

#[test]
fn from_fields_skips_non_numeric_salary_without_error() {
    let mut fields = fields_of(&alice());
    fields.insert(Field::Salary, "not-a-number".to_string());

    assert_eq!(Employee::from_fields(&fields).unwrap(), None);
}

#[test]
fn from_fields_propagates_other_validation_failures() {
    let mut fields = fields_of(&alice());
    fields.insert(Field::Department, String::new());

    let err = Employee::from_fields(&fields).unwrap_err();
    assert_eq!(err.to_string(), "Department cannot be empty.");
}

#[test]
fn from_fields_treats_negative_salary_as_validation_failure() {
    let mut fields = fields_of(&alice());
    fields.insert(Field::Salary, "-5".to_string());

    assert_eq!(
        Employee::from_fields(&fields).unwrap_err(),
        FieldError::SalaryNegative
    );
}

#[test]
fn apply_replaces_only_supplied_fields_and_keeps_id() {
    let original = alice();
    let updated = original
        .apply(&EmployeeUpdate::new().department(" Research ").salary("80000"))
        .unwrap();

    assert_eq!(updated.id(), "BF001");
    assert_eq!(updated.name(), "Alice Smith");
    assert_eq!(updated.department(), "Research");
    assert_eq!(updated.salary(), 80000.0);
    assert_eq!(updated.email(), original.email());

    let untouched = original.apply(&EmployeeUpdate::new().name("Alice Jones")).unwrap();
    assert_eq!(untouched.salary(), original.salary());
}

#[test]
fn apply_rejects_invalid_values() {
    let err = alice()
        .apply(&EmployeeUpdate::new().email("no-at-sign"))
        .unwrap_err();
    assert_eq!(err, FieldError::BadFormat(Field::Email));
}

#[test]
fn display_matches_summary_layout() {
    assert_eq!(
        alice().to_string(),
        "ID: BF001, Name: Alice Smith, Dept: Engineering, Salary: 75000.50, \
         Email: alice.s@bitfutura.test, Contact: 123-456-7890"
    );
}

#[test]
fn draft_build_and_update_emptiness() {
    let draft = EmployeeDraft {
        id: "BF2".to_string(),
        name: "Bob".to_string(),
        department: "Ops".to_string(),
        salary: "1".to_string(),
        email: "b@o.b".to_string(),
        contact: "x".to_string(),
    };
    assert_eq!(draft.build().unwrap().id(), "BF2");

    assert!(EmployeeUpdate::new().is_empty());
    assert!(!EmployeeUpdate::new().contact("y").is_empty());
}

#[test]
fn serialization_uses_snake_case_field_names() {
    let json = serde_json::to_value(alice()).unwrap();
    assert_eq!(json["id"], "BF001");
    assert_eq!(json["department"], "Engineering");
    assert_eq!(json["salary"], 75000.5);
    assert_eq!(json["contact"], "123-456-7890");
}
