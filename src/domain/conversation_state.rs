use std::collections::VecDeque;

use super::{message::ChatMessage, UserId};

/// Remember this many outstanding optimistic sends for echo matching.
/// Anything older has either been echoed already or never will be.
const PENDING_ECHO_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationUiState {
    /// No conversation opened yet.
    Empty,
    /// A history fetch is in flight for the active contact.
    Loading,
    /// History has resolved (possibly degraded to an empty buffer).
    Ready,
}

/// Where an inbound live-channel delivery ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Appended to the active conversation buffer.
    AppendedToActive,
    /// Server echo of a local optimistic send; suppressed to keep the
    /// sender's view at exactly one copy.
    DuplicateEchoSuppressed,
    /// Our own message for a conversation that is no longer active. The
    /// optimistic copy already showed it; nothing to count as unread.
    OwnEchoElsewhere,
    /// A counterpart messaged us in a conversation that is not on screen.
    BackgroundMessage,
}

/// The active conversation: one contact, an append-ordered message buffer,
/// and the bookkeeping that keeps racing fetch completions and live
/// deliveries from corrupting it.
///
/// The buffer is insertion-ordered, never timestamp-sorted. History fetches
/// replace it wholesale; deliveries and optimistic sends append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    contact_id: Option<UserId>,
    contact_name: String,
    messages: Vec<ChatMessage>,
    ui_state: ConversationUiState,
    /// Monotonic token for history fetches. Only the completion carrying
    /// the latest issued value may touch the buffer; anything older lost
    /// the race to a newer contact switch.
    latest_request_seq: u64,
    /// Correlation ids of optimistic sends still awaiting their server
    /// echo. Survives contact switches so a late echo for a previous
    /// conversation is still recognized.
    pending_echoes: VecDeque<String>,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            contact_id: None,
            contact_name: String::new(),
            messages: Vec::new(),
            ui_state: ConversationUiState::Empty,
            latest_request_seq: 0,
            pending_echoes: VecDeque::new(),
        }
    }
}

impl ConversationState {
    pub fn contact_id(&self) -> Option<UserId> {
        self.contact_id
    }

    pub fn contact_name(&self) -> &str {
        &self.contact_name
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn ui_state(&self) -> ConversationUiState {
        self.ui_state
    }

    pub fn is_open(&self) -> bool {
        self.contact_id.is_some()
    }

    pub fn latest_request_seq(&self) -> u64 {
        self.latest_request_seq
    }

    /// Switches the active contact, discarding the previous buffer, and
    /// returns the sequence token the matching history completion must
    /// carry.
    pub fn begin_history_fetch(&mut self, contact_id: UserId, contact_name: String) -> u64 {
        self.contact_id = Some(contact_id);
        self.contact_name = contact_name;
        self.messages.clear();
        self.ui_state = ConversationUiState::Loading;
        self.latest_request_seq += 1;
        self.latest_request_seq
    }

    /// Applies a resolved history fetch. Returns false when the completion
    /// is stale (superseded by a later fetch) or aimed at a contact that is
    /// no longer active, in which case the buffer is left alone.
    pub fn apply_history(
        &mut self,
        request_seq: u64,
        contact_id: UserId,
        messages: Vec<ChatMessage>,
    ) -> bool {
        if !self.accepts_completion(request_seq, contact_id) {
            return false;
        }

        self.messages = messages;
        self.ui_state = ConversationUiState::Ready;
        true
    }

    /// Applies a failed history fetch: the conversation degrades to an
    /// empty, usable buffer rather than surfacing an error. Stale failures
    /// are ignored like stale successes.
    pub fn apply_history_failure(&mut self, request_seq: u64, contact_id: UserId) -> bool {
        if !self.accepts_completion(request_seq, contact_id) {
            return false;
        }

        self.messages.clear();
        self.ui_state = ConversationUiState::Ready;
        true
    }

    /// A completion may touch the buffer only when it carries the latest
    /// issued token and names the contact that is still active.
    fn accepts_completion(&self, request_seq: u64, contact_id: UserId) -> bool {
        self.latest_request_seq == request_seq && self.contact_id == Some(contact_id)
    }

    /// Optimistic local append: the sender sees their message immediately,
    /// before (and regardless of) any transport outcome.
    pub fn push_outgoing(&mut self, message: ChatMessage) {
        if let Some(correlation_id) = &message.correlation_id {
            if self.pending_echoes.len() == PENDING_ECHO_CAPACITY {
                self.pending_echoes.pop_front();
            }
            self.pending_echoes.push_back(correlation_id.clone());
        }
        self.messages.push(message);
    }

    /// Routes an inbound live-channel delivery. The channel is scoped to
    /// the user, not the active pair, so deliveries for other conversations
    /// arrive here too and must not be appended to the visible buffer.
    pub fn apply_delivery(
        &mut self,
        message: &ChatMessage,
        current_user_id: UserId,
    ) -> DeliveryOutcome {
        if let Some(correlation_id) = &message.correlation_id {
            if let Some(position) = self
                .pending_echoes
                .iter()
                .position(|pending| pending == correlation_id)
            {
                self.pending_echoes.remove(position);
                return DeliveryOutcome::DuplicateEchoSuppressed;
            }
        }

        if let Some(active_id) = self.contact_id {
            if message.involves_pair(active_id, current_user_id) {
                self.messages.push(message.clone());
                return DeliveryOutcome::AppendedToActive;
            }
        }

        if message.is_from(current_user_id) {
            return DeliveryOutcome::OwnEchoElsewhere;
        }

        DeliveryOutcome::BackgroundMessage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: UserId = 4;
    const CONTACT_A: UserId = 1;
    const CONTACT_B: UserId = 2;

    fn inbound(sender: UserId, receiver: UserId, content: &str) -> ChatMessage {
        ChatMessage {
            sender_id: sender,
            receiver_id: receiver,
            content: content.to_owned(),
            timestamp_unix_ms: Some(1_700_000_000_000),
            correlation_id: None,
        }
    }

    fn outgoing(content: &str, correlation_id: &str) -> ChatMessage {
        ChatMessage {
            sender_id: USER,
            receiver_id: CONTACT_A,
            content: content.to_owned(),
            timestamp_unix_ms: None,
            correlation_id: Some(correlation_id.to_owned()),
        }
    }

    #[test]
    fn default_state_is_closed_and_empty() {
        let state = ConversationState::default();

        assert!(!state.is_open());
        assert!(state.messages().is_empty());
        assert_eq!(state.ui_state(), ConversationUiState::Empty);
    }

    #[test]
    fn begin_history_fetch_clears_buffer_and_issues_fresh_seq() {
        let mut state = ConversationState::default();
        let first = state.begin_history_fetch(CONTACT_A, "BuildCo".to_owned());
        state.push_outgoing(outgoing("hi", "c1"));

        let second = state.begin_history_fetch(CONTACT_B, "HomeWorks".to_owned());

        assert!(second > first);
        assert!(state.messages().is_empty());
        assert_eq!(state.contact_id(), Some(CONTACT_B));
        assert_eq!(state.ui_state(), ConversationUiState::Loading);
    }

    #[test]
    fn history_replaces_buffer_wholesale() {
        let mut state = ConversationState::default();
        let seq = state.begin_history_fetch(CONTACT_A, "BuildCo".to_owned());

        let applied = state.apply_history(
            seq,
            CONTACT_A,
            vec![inbound(CONTACT_A, USER, "m1"), inbound(USER, CONTACT_A, "m2")],
        );

        assert!(applied);
        assert_eq!(state.messages().len(), 2);
        assert_eq!(state.ui_state(), ConversationUiState::Ready);
    }

    #[test]
    fn contact_switch_discards_previous_history_completion() {
        let mut state = ConversationState::default();
        let seq_a = state.begin_history_fetch(CONTACT_A, "BuildCo".to_owned());
        let seq_b = state.begin_history_fetch(CONTACT_B, "HomeWorks".to_owned());

        assert!(state.apply_history(seq_b, CONTACT_B, vec![inbound(CONTACT_B, USER, "fresh")]));

        // A's response resolves after B's: it lost the race and is dropped.
        assert!(!state.apply_history(seq_a, CONTACT_A, vec![inbound(CONTACT_A, USER, "stale")]));
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].content, "fresh");
    }

    #[test]
    fn latest_completion_wins_regardless_of_arrival_order() {
        let mut state = ConversationState::default();
        let _seq_a = state.begin_history_fetch(CONTACT_A, "BuildCo".to_owned());
        let seq_b = state.begin_history_fetch(CONTACT_B, "HomeWorks".to_owned());

        // B's response arrives even though A's never does.
        assert!(state.apply_history(seq_b, CONTACT_B, vec![]));
        assert_eq!(state.ui_state(), ConversationUiState::Ready);
    }

    #[test]
    fn completion_for_a_different_contact_is_rejected_even_with_the_latest_seq() {
        let mut state = ConversationState::default();
        let seq = state.begin_history_fetch(CONTACT_A, "BuildCo".to_owned());

        // Same token, wrong contact: neither success nor failure applies.
        assert!(!state.apply_history(seq, CONTACT_B, vec![inbound(CONTACT_B, USER, "misfiled")]));
        assert!(!state.apply_history_failure(seq, CONTACT_B));
        assert_eq!(state.ui_state(), ConversationUiState::Loading);
        assert!(state.messages().is_empty());
    }

    #[test]
    fn history_failure_degrades_to_empty_ready_buffer() {
        let mut state = ConversationState::default();
        let seq = state.begin_history_fetch(CONTACT_A, "BuildCo".to_owned());

        assert!(state.apply_history_failure(seq, CONTACT_A));
        assert!(state.messages().is_empty());
        assert_eq!(state.ui_state(), ConversationUiState::Ready);
    }

    #[test]
    fn stale_failure_does_not_clobber_newer_history() {
        let mut state = ConversationState::default();
        let seq_a = state.begin_history_fetch(CONTACT_A, "BuildCo".to_owned());
        let seq_b = state.begin_history_fetch(CONTACT_B, "HomeWorks".to_owned());
        state.apply_history(seq_b, CONTACT_B, vec![inbound(CONTACT_B, USER, "keep me")]);

        assert!(!state.apply_history_failure(seq_a, CONTACT_A));
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn echo_with_matching_correlation_id_is_suppressed() {
        let mut state = ConversationState::default();
        let seq = state.begin_history_fetch(CONTACT_A, "BuildCo".to_owned());
        state.apply_history(seq, CONTACT_A, vec![]);
        state.push_outgoing(outgoing("hello", "c-123"));

        let mut echo = inbound(USER, CONTACT_A, "hello");
        echo.correlation_id = Some("c-123".to_owned());

        let outcome = state.apply_delivery(&echo, USER);

        assert_eq!(outcome, DeliveryOutcome::DuplicateEchoSuppressed);
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn structurally_identical_delivery_without_correlation_match_is_appended() {
        let mut state = ConversationState::default();
        let seq = state.begin_history_fetch(CONTACT_A, "BuildCo".to_owned());
        state.apply_history(seq, CONTACT_A, vec![]);
        state.push_outgoing(outgoing("hello", "c-123"));

        // Same text, same pair, but no correlation id: there is no
        // structural dedup, so it shows up twice.
        let duplicate = inbound(USER, CONTACT_A, "hello");
        let outcome = state.apply_delivery(&duplicate, USER);

        assert_eq!(outcome, DeliveryOutcome::AppendedToActive);
        assert_eq!(state.messages().len(), 2);
    }

    #[test]
    fn echo_is_suppressed_only_once_per_send() {
        let mut state = ConversationState::default();
        let seq = state.begin_history_fetch(CONTACT_A, "BuildCo".to_owned());
        state.apply_history(seq, CONTACT_A, vec![]);
        state.push_outgoing(outgoing("hello", "c-123"));

        let mut echo = inbound(USER, CONTACT_A, "hello");
        echo.correlation_id = Some("c-123".to_owned());

        assert_eq!(
            state.apply_delivery(&echo, USER),
            DeliveryOutcome::DuplicateEchoSuppressed
        );
        // A second frame with the same id is no longer pending and follows
        // the ordinary routing rules.
        assert_eq!(
            state.apply_delivery(&echo, USER),
            DeliveryOutcome::AppendedToActive
        );
    }

    #[test]
    fn delivery_for_inactive_pair_is_not_appended() {
        let mut state = ConversationState::default();
        let seq = state.begin_history_fetch(CONTACT_A, "BuildCo".to_owned());
        state.apply_history(seq, CONTACT_A, vec![]);

        let outcome = state.apply_delivery(&inbound(CONTACT_B, USER, "psst"), USER);

        assert_eq!(outcome, DeliveryOutcome::BackgroundMessage);
        assert!(state.messages().is_empty());
    }

    #[test]
    fn late_echo_after_contact_switch_is_still_recognized() {
        let mut state = ConversationState::default();
        let seq = state.begin_history_fetch(CONTACT_A, "BuildCo".to_owned());
        state.apply_history(seq, CONTACT_A, vec![]);
        state.push_outgoing(outgoing("bye", "c-9"));

        let seq_b = state.begin_history_fetch(CONTACT_B, "HomeWorks".to_owned());
        state.apply_history(seq_b, CONTACT_B, vec![]);

        let mut echo = inbound(USER, CONTACT_A, "bye");
        echo.correlation_id = Some("c-9".to_owned());

        assert_eq!(
            state.apply_delivery(&echo, USER),
            DeliveryOutcome::DuplicateEchoSuppressed
        );
        assert!(state.messages().is_empty());
    }

    #[test]
    fn own_message_for_other_pair_without_pending_echo_is_ignored() {
        let mut state = ConversationState::default();
        let seq = state.begin_history_fetch(CONTACT_B, "HomeWorks".to_owned());
        state.apply_history(seq, CONTACT_B, vec![]);

        let outcome = state.apply_delivery(&inbound(USER, CONTACT_A, "sent elsewhere"), USER);

        assert_eq!(outcome, DeliveryOutcome::OwnEchoElsewhere);
        assert!(state.messages().is_empty());
    }

    #[test]
    fn pending_echo_list_is_bounded() {
        let mut state = ConversationState::default();
        state.begin_history_fetch(CONTACT_A, "BuildCo".to_owned());

        for index in 0..(PENDING_ECHO_CAPACITY + 1) {
            state.push_outgoing(outgoing("x", &format!("c-{index}")));
        }

        // The oldest id was evicted; its echo now routes normally.
        let mut echo = inbound(USER, CONTACT_A, "x");
        echo.correlation_id = Some("c-0".to_owned());
        assert_eq!(
            state.apply_delivery(&echo, USER),
            DeliveryOutcome::AppendedToActive
        );
    }
}
