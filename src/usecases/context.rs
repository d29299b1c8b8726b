use crate::{domain::UserId, infra::config::AppConfig};

/// Explicit session context threaded into the chat view: configuration and
/// the authenticated user's identity. Nothing in the session reads ambient
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    pub config: AppConfig,
    pub user_id: UserId,
}

impl AppContext {
    pub fn new(config: AppConfig, user_id: UserId) -> Self {
        Self { config, user_id }
    }
}
