use roster_core::{
    CredentialError, Employee, Notifier, OutboxNotifier, SenderCredentials, WelcomeTemplate,
};
use std::fs;
use std::path::Path;

fn write_credentials(dir: &Path, address: &str, secret: &str) -> SenderCredentials {
    let address_path = dir.join("username.txt");
    let secret_path = dir.join("password.txt");
    fs::write(&address_path, address).unwrap();
    fs::write(&secret_path, secret).unwrap();
    SenderCredentials::load(&address_path, Some(&secret_path)).unwrap()
}

#[test]
fn credentials_use_first_trimmed_line() {
    let dir = tempfile::tempdir().unwrap();
    let credentials = write_credentials(dir.path(), "  hr@bitfutura.test \nignored\n", "s3cret\n");

    assert_eq!(credentials.address, "hr@bitfutura.test");
    assert_eq!(credentials.secret.as_ref().unwrap().expose(), "s3cret");
    assert!(!format!("{credentials:?}").contains("s3cret"));
}

#[test]
fn credential_failures_are_specific() {
    let dir = tempfile::tempdir().unwrap();
    let address = dir.path().join("username.txt");
    let secret = dir.path().join("password.txt");

    let err = SenderCredentials::load(&address, Some(&secret)).unwrap_err();
    assert!(matches!(err, CredentialError::Missing { .. }));

    fs::write(&address, "\n").unwrap();
    let err = SenderCredentials::load(&address, Some(&secret)).unwrap_err();
    assert!(matches!(err, CredentialError::Empty { .. }));

    fs::write(&address, "not an address").unwrap();
    let err = SenderCredentials::load(&address, Some(&secret)).unwrap_err();
    assert!(matches!(err, CredentialError::InvalidAddress(_)));

    fs::write(&address, "hr@x.io").unwrap();
    let err = SenderCredentials::load(&address, Some(&secret)).unwrap_err();
    assert!(err.to_string().contains("sender secret file not found"));
}

#[test]
fn secret_is_optional_for_the_outbox() {
    let dir = tempfile::tempdir().unwrap();
    let address_path = dir.path().join("username.txt");
    fs::write(&address_path, "hr@bitfutura.test\n").unwrap();
    assert!(!dir.path().join("password.txt").exists());

    let credentials = SenderCredentials::load(&address_path, None).unwrap();
    assert_eq!(credentials.address, "hr@bitfutura.test");
    assert!(credentials.secret.is_none());

    let notifier = OutboxNotifier::new(dir.path().join("outbox"), &credentials);
    let employee = Employee::new("BF1", "Ann Lee", "Ops", "1", "ann@x.io", "1").unwrap();
    notifier
        .send(&WelcomeTemplate::default().render(&employee))
        .unwrap();

    let files: Vec<_> = fs::read_dir(notifier.dir()).unwrap().collect();
    assert_eq!(files.len(), 1);
}

#[test]
fn outbox_writes_one_message_file_per_send() {
    let dir = tempfile::tempdir().unwrap();
    let credentials = write_credentials(dir.path(), "hr@bitfutura.test", "pw");
    let outbox_dir = dir.path().join("outbox");
    let notifier = OutboxNotifier::new(&outbox_dir, &credentials);

    let employee = Employee::new("BF1", "Ann Lee", "Ops", "1", "ann@x.io", "1").unwrap();
    let message = WelcomeTemplate::default().render(&employee);
    notifier.send(&message).unwrap();
    notifier.send(&message).unwrap();

    let mut files: Vec<_> = fs::read_dir(notifier.dir())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    assert_eq!(files.len(), 2);
    assert!(files
        .iter()
        .all(|path| path.extension().and_then(|ext| ext.to_str()) == Some("eml")));

    let content = fs::read_to_string(&files[0]).unwrap();
    assert!(content.starts_with("From: hr@bitfutura.test\r\n"));
    assert!(content.contains("To: Ann Lee <ann@x.io>\r\n"));
    assert!(content.contains("Subject: Welcome to BitFutura!\r\n"));
    assert!(content.contains("Your employee record (ID: BF1) has been successfully created"));
    assert!(content.contains("BitFutura HR\r\n"));
    assert!(!content.contains("pw"));
}

#[test]
fn outbox_reports_io_failures() {
    let dir = tempfile::tempdir().unwrap();
    let credentials = write_credentials(dir.path(), "hr@x.io", "pw");
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "file").unwrap();
    let notifier = OutboxNotifier::new(blocker.join("outbox"), &credentials);

    let employee = Employee::new("BF1", "Ann", "Ops", "1", "ann@x.io", "1").unwrap();
    let err = notifier
        .send(&WelcomeTemplate::default().render(&employee))
        .unwrap_err();
    assert!(err.to_string().starts_with("could not write message to"));
}
