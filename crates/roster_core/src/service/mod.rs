//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store and notifier calls into use-case level APIs.
//! - Keep the CLI decoupled from storage details.

pub mod employee_service;
