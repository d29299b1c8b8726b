use super::UserId;

/// One chat line, either fetched from history, delivered over the live
/// channel, or appended optimistically on send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
    /// Server-recorded time. `None` until the backend has persisted the
    /// message, which is always the case for optimistic local appends.
    pub timestamp_unix_ms: Option<i64>,
    /// Client-generated token used to match a local optimistic append with
    /// its eventual server echo. `None` for messages authored elsewhere.
    pub correlation_id: Option<String>,
}

impl ChatMessage {
    pub fn is_from(&self, user_id: UserId) -> bool {
        self.sender_id == user_id
    }

    /// True when the message belongs to the conversation between `a` and
    /// `b`, in either direction.
    pub fn involves_pair(&self, a: UserId, b: UserId) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }

    /// True for locally-originated messages still waiting on the server
    /// record.
    pub fn is_pending(&self) -> bool {
        self.timestamp_unix_ms.is_none()
    }
}
