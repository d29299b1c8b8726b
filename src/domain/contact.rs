use super::UserId;

/// A counterpart the current user can message: a worker sees contractors
/// here, a contractor sees workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub contact_id: UserId,
    pub display_name: String,
    /// Most recent message text as reported by the roster endpoint. May be
    /// stale relative to live deliveries until locally refreshed.
    pub last_message_preview: Option<String>,
    pub unread_count: u32,
}

impl Contact {
    /// Marks one more unseen message from this contact and refreshes the
    /// preview line.
    pub fn note_background_message(&mut self, content: &str) {
        self.unread_count = self.unread_count.saturating_add(1);
        self.last_message_preview = Some(content.to_owned());
    }
}
