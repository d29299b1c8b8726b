//! Domain layer: core entities and session-state rules.

pub mod compose_state;
pub mod contact;
pub mod conversation_state;
pub mod events;
pub mod message;
pub mod roster_state;
pub mod shell_state;

/// Opaque backend identifier for a user on either side of the marketplace.
pub type UserId = i64;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
