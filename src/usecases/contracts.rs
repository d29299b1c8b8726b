use anyhow::Result;

use crate::domain::{events::AppEvent, message::ChatMessage, shell_state::ShellState, UserId};

/// Feed of interleaved terminal input and backend completions for the
/// single-threaded session loop.
pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait SessionOrchestrator {
    fn state(&self) -> &ShellState;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}

/// Failure to hand a message to the live channel. Sends are
/// fire-and-forget: callers log this and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    ChannelClosed,
}

impl std::fmt::Display for PublishError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChannelClosed => f.write_str("live channel is closed"),
        }
    }
}

impl std::error::Error for PublishError {}

/// Fire-and-forget requests into the backend workers. Completions come
/// back as [`AppEvent`]s with no ordering guarantees.
pub trait BackendRequests {
    fn request_roster(&self);
    fn request_history(&self, request_seq: u64, contact_id: UserId);
    fn request_mark_read(&self, contact_id: UserId);
    fn publish(&self, message: &ChatMessage) -> Result<(), PublishError>;
}

impl<B: BackendRequests + ?Sized> BackendRequests for &B {
    fn request_roster(&self) {
        (*self).request_roster();
    }

    fn request_history(&self, request_seq: u64, contact_id: UserId) {
        (*self).request_history(request_seq, contact_id);
    }

    fn request_mark_read(&self, contact_id: UserId) {
        (*self).request_mark_read(contact_id);
    }

    fn publish(&self, message: &ChatMessage) -> Result<(), PublishError> {
        (*self).publish(message)
    }
}
