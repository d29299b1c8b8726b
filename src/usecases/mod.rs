//! Use case layer: application workflows and the session orchestrator.

pub mod bootstrap;
pub mod context;
pub mod contracts;
pub mod load_contacts;
pub mod load_history;
pub mod mark_read;
pub mod send_message;
pub mod session;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
