use super::{contact::Contact, message::ChatMessage, UserId};

/// Live-channel state as observed by the session. History and roster
/// fetches succeed or fail independently of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityStatus {
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectivityStatus {
    /// Status-line indicator, mirroring the web client's wording.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Connected => "\u{25cf} Connected",
            Self::Connecting => "\u{25cb} Connecting\u{2026}",
            Self::Disconnected => "\u{25cb} Disconnected",
        }
    }
}

/// Everything the session loop can react to: terminal input, backend fetch
/// completions, and live-channel traffic. Completions race freely; the
/// orchestrator decides what still applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    ConnectivityChanged(ConnectivityStatus),
    RosterLoaded(Vec<Contact>),
    RosterLoadFailed,
    HistoryLoaded {
        request_seq: u64,
        contact_id: UserId,
        messages: Vec<ChatMessage>,
    },
    HistoryLoadFailed {
        request_seq: u64,
        contact_id: UserId,
    },
    Delivery(ChatMessage),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }
}
