use super::{contact::Contact, message::ChatMessage, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterUiState {
    /// Initial fetch still in flight.
    Loading,
    /// Roster resolved; `contacts` may legitimately be empty.
    Ready,
}

/// What became of an inbound message that was routed to the roster instead
/// of the visible conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterNoteOutcome {
    Noted,
    /// The sender is not in the roster; the caller should refresh it.
    UnknownSender,
}

/// The contact list and its selection cursor.
///
/// A failed roster fetch never empties an already-populated list: the view
/// degrades to stale entries rather than losing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterState {
    contacts: Vec<Contact>,
    ui_state: RosterUiState,
    selected_index: Option<usize>,
}

impl Default for RosterState {
    fn default() -> Self {
        Self {
            contacts: Vec::new(),
            ui_state: RosterUiState::Loading,
            selected_index: None,
        }
    }
}

impl RosterState {
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn ui_state(&self) -> RosterUiState {
        self.ui_state
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.selected_index.and_then(|index| self.contacts.get(index))
    }

    /// Replaces the roster with fresh entries. The selection is re-anchored
    /// to the same contact when it survives the refresh.
    pub fn set_ready(&mut self, contacts: Vec<Contact>) {
        let previously_selected = self.selected_contact().map(|contact| contact.contact_id);

        self.contacts = contacts;
        self.ui_state = RosterUiState::Ready;
        self.selected_index = previously_selected
            .and_then(|id| self.position_of(id))
            .or(if self.contacts.is_empty() { None } else { Some(0) });
    }

    /// Marks the fetch as settled without touching whatever entries are
    /// already there (possibly none).
    pub fn keep_stale(&mut self) {
        self.ui_state = RosterUiState::Ready;
        if self.selected_index.is_none() && !self.contacts.is_empty() {
            self.selected_index = Some(0);
        }
    }

    pub fn select_next(&mut self) {
        if self.contacts.is_empty() {
            return;
        }

        self.selected_index = match self.selected_index {
            None => Some(0),
            Some(index) if index + 1 < self.contacts.len() => Some(index + 1),
            Some(index) => Some(index),
        };
    }

    pub fn select_previous(&mut self) {
        if self.contacts.is_empty() {
            return;
        }

        self.selected_index = match self.selected_index {
            None => Some(0),
            Some(0) => Some(0),
            Some(index) => Some(index - 1),
        };
    }

    /// Zeroes the unread badge for a contact, done when their conversation
    /// is opened and the mark-read call is issued.
    pub fn clear_unread(&mut self, contact_id: UserId) {
        if let Some(contact) = self.contact_mut(contact_id) {
            contact.unread_count = 0;
        }
    }

    /// Refreshes the preview line for a contact without touching unread
    /// counts, used for traffic already visible on screen.
    pub fn refresh_preview(&mut self, contact_id: UserId, content: &str) {
        if let Some(contact) = self.contact_mut(contact_id) {
            contact.last_message_preview = Some(content.to_owned());
        }
    }

    /// Records a message that arrived for a conversation that is not on
    /// screen: unread badge and preview move, the buffer does not.
    pub fn note_background_message(&mut self, message: &ChatMessage) -> RosterNoteOutcome {
        match self.contact_mut(message.sender_id) {
            Some(contact) => {
                contact.note_background_message(&message.content);
                RosterNoteOutcome::Noted
            }
            None => RosterNoteOutcome::UnknownSender,
        }
    }

    fn position_of(&self, contact_id: UserId) -> Option<usize> {
        self.contacts
            .iter()
            .position(|contact| contact.contact_id == contact_id)
    }

    fn contact_mut(&mut self, contact_id: UserId) -> Option<&mut Contact> {
        self.contacts
            .iter_mut()
            .find(|contact| contact.contact_id == contact_id)
    }
}
