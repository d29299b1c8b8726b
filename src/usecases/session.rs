//! The session orchestrator: one user's live view of their conversations.
//!
//! Owns the [`ShellState`] and reacts to the interleaved event stream
//! (terminal input, fetch completions, live deliveries). All mutation
//! happens here, on the single session thread; the backend workers only
//! ever hand events in.

use anyhow::Result;

use crate::domain::{
    conversation_state::DeliveryOutcome,
    events::{AppEvent, KeyInput},
    message::ChatMessage,
    roster_state::RosterNoteOutcome,
    shell_state::{ActivePane, ShellState},
    UserId,
};

use super::{
    contracts::{BackendRequests, SessionOrchestrator},
    send_message::{prepare_outgoing, SendMessageError},
};

const SEND_DROPPED_NOT_CONNECTED: &str = "SEND_DROPPED_NOT_CONNECTED";
const PUBLISH_FAILED: &str = "PUBLISH_FAILED";
const STALE_HISTORY_DISCARDED: &str = "STALE_HISTORY_DISCARDED";
const DELIVERY_SENDER_UNKNOWN: &str = "DELIVERY_SENDER_UNKNOWN";

pub struct ChatSessionOrchestrator<B: BackendRequests> {
    state: ShellState,
    current_user_id: UserId,
    backend: B,
}

impl<B: BackendRequests> ChatSessionOrchestrator<B> {
    pub fn new(current_user_id: UserId, backend: B) -> Self {
        Self {
            state: ShellState::default(),
            current_user_id,
            backend,
        }
    }

    /// Issues the roster fetch for a freshly mounted session.
    pub fn request_initial_roster(&self) {
        self.backend.request_roster();
    }

    /// Opens the contact under the roster cursor: clears the buffer,
    /// issues a sequence-tagged history fetch, and acknowledges the unread
    /// messages. The live channel is user-scoped and is left untouched.
    fn open_selected_contact(&mut self) {
        let Some(contact) = self.state.roster().selected_contact() else {
            return;
        };
        let contact_id = contact.contact_id;
        let contact_name = contact.display_name.clone();

        let request_seq = self
            .state
            .conversation_mut()
            .begin_history_fetch(contact_id, contact_name);
        self.backend.request_history(request_seq, contact_id);
        self.backend.request_mark_read(contact_id);
        self.state.roster_mut().clear_unread(contact_id);
    }

    /// Sends whatever is composed. Every rejection is a silent no-op; a
    /// successful send appends the optimistic copy immediately, regardless
    /// of how the transport-level publish fares.
    fn submit_compose(&mut self) {
        let text = self.state.compose().text().to_owned();
        let prepared = prepare_outgoing(
            self.current_user_id,
            self.state.conversation().contact_id(),
            self.state.connectivity(),
            &text,
        );

        match prepared {
            Ok(message) => {
                if let Err(error) = self.backend.publish(&message) {
                    tracing::warn!(
                        code = PUBLISH_FAILED,
                        error = %error,
                        "outgoing message publish failed; optimistic copy kept"
                    );
                }

                self.state
                    .roster_mut()
                    .refresh_preview(message.receiver_id, &message.content);
                self.state.conversation_mut().push_outgoing(message);
                let _ = self.state.compose_mut().take();
            }
            Err(SendMessageError::NotConnected) => {
                tracing::debug!(
                    code = SEND_DROPPED_NOT_CONNECTED,
                    "message dropped; live channel not connected"
                );
            }
            Err(SendMessageError::EmptyMessage | SendMessageError::NoActiveConversation) => {}
        }
    }

    fn on_delivery(&mut self, message: ChatMessage) {
        let outcome = self
            .state
            .conversation_mut()
            .apply_delivery(&message, self.current_user_id);

        match outcome {
            DeliveryOutcome::AppendedToActive => {
                let counterpart = if message.is_from(self.current_user_id) {
                    message.receiver_id
                } else {
                    message.sender_id
                };
                self.state
                    .roster_mut()
                    .refresh_preview(counterpart, &message.content);
            }
            DeliveryOutcome::DuplicateEchoSuppressed => {}
            DeliveryOutcome::OwnEchoElsewhere => {
                self.state
                    .roster_mut()
                    .refresh_preview(message.receiver_id, &message.content);
            }
            DeliveryOutcome::BackgroundMessage => {
                if self.state.roster_mut().note_background_message(&message)
                    == RosterNoteOutcome::UnknownSender
                {
                    tracing::debug!(
                        code = DELIVERY_SENDER_UNKNOWN,
                        sender_id = message.sender_id,
                        "delivery from sender missing in roster; refreshing"
                    );
                    self.backend.request_roster();
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyInput) {
        match self.state.active_pane() {
            ActivePane::Roster => self.handle_roster_key(key),
            ActivePane::Compose => self.handle_compose_key(key),
        }
    }

    fn handle_roster_key(&mut self, key: KeyInput) {
        match key.key.as_str() {
            "q" => self.state.stop(),
            "j" | "down" => self.state.roster_mut().select_next(),
            "k" | "up" => self.state.roster_mut().select_previous(),
            "enter" => self.open_selected_contact(),
            "r" => self.backend.request_roster(),
            "i" => {
                if self.state.conversation().is_open() {
                    self.state.focus_pane(ActivePane::Compose);
                }
            }
            _ => {}
        }
    }

    fn handle_compose_key(&mut self, key: KeyInput) {
        match key.key.as_str() {
            "esc" => self.state.focus_pane(ActivePane::Roster),
            "enter" => self.submit_compose(),
            "backspace" => self.state.compose_mut().delete_before_cursor(),
            "left" => self.state.compose_mut().move_cursor_left(),
            "right" => self.state.compose_mut().move_cursor_right(),
            _ => {
                if key.ctrl {
                    return;
                }
                let mut chars = key.key.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    self.state.compose_mut().insert_char(ch);
                }
            }
        }
    }
}

impl<B: BackendRequests> SessionOrchestrator for ChatSessionOrchestrator<B> {
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::InputKey(key) => self.handle_key(key),
            AppEvent::ConnectivityChanged(status) => self.state.set_connectivity(status),
            AppEvent::RosterLoaded(contacts) => {
                self.state.roster_mut().set_ready(contacts);
                if !self.state.conversation().is_open() {
                    self.open_selected_contact();
                }
            }
            AppEvent::RosterLoadFailed => self.state.roster_mut().keep_stale(),
            AppEvent::HistoryLoaded {
                request_seq,
                contact_id,
                messages,
            } => {
                if !self
                    .state
                    .conversation_mut()
                    .apply_history(request_seq, contact_id, messages)
                {
                    tracing::debug!(
                        code = STALE_HISTORY_DISCARDED,
                        request_seq,
                        contact_id,
                        "history completion superseded by a newer fetch"
                    );
                }
            }
            AppEvent::HistoryLoadFailed {
                request_seq,
                contact_id,
            } => {
                let _ = self
                    .state
                    .conversation_mut()
                    .apply_history_failure(request_seq, contact_id);
            }
            AppEvent::Delivery(message) => self.on_delivery(message),
        }

        Ok(())
    }
}
