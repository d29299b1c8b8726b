use serde::{Deserialize, Serialize};

use crate::domain::UserId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    /// HTTP base of the QuickHire backend, without a trailing slash.
    pub base_url: String,
    pub request_timeout_ms: u64,
    /// Fixed delay before the live channel retries after a drop.
    pub reconnect_delay_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            request_timeout_ms: 10_000,
            reconnect_delay_ms: 5_000,
        }
    }
}

impl BackendConfig {
    /// The live channel endpoint: same host as the REST base with the
    /// scheme switched to WebSocket, mirroring how the web client derives
    /// it.
    pub fn ws_url(&self) -> String {
        let base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.base_url.clone()
        };

        format!("{}/ws", base.trim_end_matches('/'))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Authenticated user id; usually supplied via `--user-id` instead.
    pub user_id: Option<UserId>,
    pub history_page_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_id: None,
            history_page_size: 50,
        }
    }
}
