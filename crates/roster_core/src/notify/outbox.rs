//! Outbox notifier: drops message files into a pickup directory.
//!
//! # Responsibility
//! - Serialize each notification as one plain-text message file.
//! - Leave delivery to the relay that watches the directory.
//!
//! # Invariants
//! - Existing files are never overwritten (`create_new`).
//! - Header values are single-line; CR/LF are replaced with spaces.
//! - Only the sender address is used; no secret is needed.

use super::{Notification, Notifier, NotifyError, SenderCredentials};
use log::{error, info};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const MESSAGE_EXTENSION: &str = "eml";

/// File-drop transport for notifications.
#[derive(Debug)]
pub struct OutboxNotifier {
    dir: PathBuf,
    sender_address: String,
    sequence: AtomicU64,
}

impl OutboxNotifier {
    pub fn new(dir: impl Into<PathBuf>, sender: &SenderCredentials) -> Self {
        Self {
            dir: dir.into(),
            sender_address: sender.address.clone(),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn next_path(&self) -> PathBuf {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or(0);
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!("{millis}-{sequence:04}.{MESSAGE_EXTENSION}"))
    }
}

impl Notifier for OutboxNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let path = self.next_path();
        let message = render_message(&self.sender_address, notification);

        let write = || -> std::io::Result<()> {
            fs::create_dir_all(&self.dir)?;
            let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
            file.write_all(message.as_bytes())?;
            file.flush()
        };

        match write() {
            Ok(()) => {
                info!(
                    "event=notify_send module=notify status=ok transport=outbox file={}",
                    path.display()
                );
                Ok(())
            }
            Err(source) => {
                error!(
                    "event=notify_send module=notify status=error transport=outbox file={} error={}",
                    path.display(),
                    source
                );
                Err(NotifyError::Io { path, source })
            }
        }
    }
}

fn render_message(from: &str, notification: &Notification) -> String {
    let mut out = String::new();
    push_header(&mut out, "From", from);
    push_header(
        &mut out,
        "To",
        &format!(
            "{} <{}>",
            notification.recipient_name, notification.recipient_address
        ),
    );
    push_header(&mut out, "Subject", &notification.subject);
    push_header(&mut out, "MIME-Version", "1.0");
    push_header(&mut out, "Content-Type", "text/plain; charset=utf-8");
    out.push_str("\r\n");
    for line in notification.body.lines() {
        out.push_str(line);
        out.push_str("\r\n");
    }
    out
}

fn push_header(out: &mut String, name: &str, value: &str) {
    let single_line = value.replace(['\r', '\n'], " ");
    out.push_str(name);
    out.push_str(": ");
    out.push_str(&single_line);
    out.push_str("\r\n");
}
