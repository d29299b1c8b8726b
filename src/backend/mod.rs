//! QuickHire backend integration: REST fetches, the STOMP live channel,
//! and the worker plumbing that turns their completions into session
//! events.

pub mod live;
pub mod rest;
pub mod stomp;
pub mod wire;
pub mod worker;

use std::sync::mpsc::Sender;

use crate::{
    domain::{message::ChatMessage, UserId},
    usecases::contracts::{BackendRequests, PublishError},
};

use live::LiveChannelHandle;
use worker::BackendRequest;

const BACKEND_WORKER_GONE: &str = "BACKEND_WORKER_GONE";

/// The orchestrator's one way into the backend: fire-and-forget requests
/// to the REST worker plus publishes onto the live channel.
pub struct BackendHandle {
    requests: Sender<BackendRequest>,
    live: LiveChannelHandle,
}

impl BackendHandle {
    pub fn new(requests: Sender<BackendRequest>, live: LiveChannelHandle) -> Self {
        Self { requests, live }
    }

    fn enqueue(&self, request: BackendRequest) {
        if self.requests.send(request).is_err() {
            tracing::warn!(
                code = BACKEND_WORKER_GONE,
                "backend request dropped; worker has shut down"
            );
        }
    }
}

impl BackendRequests for BackendHandle {
    fn request_roster(&self) {
        self.enqueue(BackendRequest::Roster);
    }

    fn request_history(&self, request_seq: u64, contact_id: UserId) {
        self.enqueue(BackendRequest::History {
            request_seq,
            contact_id,
        });
    }

    fn request_mark_read(&self, contact_id: UserId) {
        self.enqueue(BackendRequest::MarkRead { contact_id });
    }

    fn publish(&self, message: &ChatMessage) -> Result<(), PublishError> {
        self.live.publish(message)
    }
}

/// Returns the backend module name for smoke checks.
pub fn module_name() -> &'static str {
    "backend"
}
