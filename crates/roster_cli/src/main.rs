//! `roster` entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open the store.
//! - Wire the optional welcome-email notifier and hand over to the shell.

mod args;
mod render;
mod shell;

use args::Cli;
use clap::Parser;
use log::{info, warn};
use roster_core::{
    default_log_level, init_logging, EmployeeService, EmployeeStore, OutboxNotifier, RosterConfig,
    SenderCredentials, WelcomeTemplate,
};
use shell::{Console, Shell};
use std::error::Error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("roster: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let cwd = std::env::current_dir()?;
    let config = cli.resolve_config(&cwd)?;

    let level = config
        .logging
        .level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, &config.log_dir()) {
        eprintln!("roster: logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        roster_core::core_version()
    );

    let store = EmployeeStore::open(config.store_config())?;
    let mut stdout = io::stdout().lock();
    render::load_summary(&mut stdout, store.load_report(), &config.data_file)?;

    let service = build_service(store, &config);
    let console = Console::new(io::stdin().lock(), stdout);
    Shell::new(console, service, &config.notify.organization).run()?;
    Ok(())
}

fn build_service(store: EmployeeStore, config: &RosterConfig) -> EmployeeService {
    let notify = &config.notify;
    let service = EmployeeService::new(store)
        .with_welcome_template(WelcomeTemplate::new(notify.organization.clone()));
    if !notify.enabled {
        info!("event=notify_setup module=cli status=ok enabled=false");
        return service;
    }

    let secret_file = notify.sender_secret_file.as_deref();
    match SenderCredentials::load(&notify.sender_address_file, secret_file) {
        Ok(credentials) => {
            info!(
                "event=notify_setup module=cli status=ok enabled=true outbox={}",
                notify.outbox_dir.display()
            );
            service.with_notifier(Box::new(OutboxNotifier::new(
                notify.outbox_dir.clone(),
                &credentials,
            )))
        }
        Err(err) => {
            warn!("event=notify_setup module=cli status=warn enabled=false");
            println!("Confirmation emails disabled: {err}");
            service
        }
    }
}
