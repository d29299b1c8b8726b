use crate::domain::{message::ChatMessage, UserId};

const DEFAULT_HISTORY_PAGE_SIZE: usize = 50;
const MAX_HISTORY_PAGE_SIZE: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadHistoryQuery {
    pub user_id: UserId,
    pub contact_id: UserId,
    pub limit: usize,
}

impl LoadHistoryQuery {
    pub fn new(user_id: UserId, contact_id: UserId) -> Self {
        Self {
            user_id,
            contact_id,
            limit: DEFAULT_HISTORY_PAGE_SIZE,
        }
    }

    fn normalized_limit(&self) -> usize {
        match self.limit {
            0 => DEFAULT_HISTORY_PAGE_SIZE,
            value if value > MAX_HISTORY_PAGE_SIZE => MAX_HISTORY_PAGE_SIZE,
            value => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadHistoryOutput {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistorySourceError {
    Unauthorized,
    Unavailable,
    InvalidData,
    ContactNotFound,
}

pub trait HistorySource {
    /// Returns the full conversation between the two users in the
    /// backend's order (oldest first).
    fn conversation_history(
        &self,
        user_id: UserId,
        contact_id: UserId,
    ) -> Result<Vec<ChatMessage>, HistorySourceError>;
}

impl<T> HistorySource for &T
where
    T: HistorySource + ?Sized,
{
    fn conversation_history(
        &self,
        user_id: UserId,
        contact_id: UserId,
    ) -> Result<Vec<ChatMessage>, HistorySourceError> {
        (*self).conversation_history(user_id, contact_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadHistoryError {
    Unauthorized,
    TemporarilyUnavailable,
    DataContractViolation,
    ContactNotFound,
}

/// Fetches the conversation and keeps only the most recent page. The
/// history endpoint has no server-side limit, so the page is cut here.
pub fn load_history(
    source: &dyn HistorySource,
    query: LoadHistoryQuery,
) -> Result<LoadHistoryOutput, LoadHistoryError> {
    let limit = query.normalized_limit();
    let mut messages = source
        .conversation_history(query.user_id, query.contact_id)
        .map_err(map_source_error)?;

    if messages.len() > limit {
        messages.drain(..messages.len() - limit);
    }

    Ok(LoadHistoryOutput { messages })
}

fn map_source_error(error: HistorySourceError) -> LoadHistoryError {
    match error {
        HistorySourceError::Unauthorized => LoadHistoryError::Unauthorized,
        HistorySourceError::Unavailable => LoadHistoryError::TemporarilyUnavailable,
        HistorySourceError::InvalidData => LoadHistoryError::DataContractViolation,
        HistorySourceError::ContactNotFound => LoadHistoryError::ContactNotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubSource {
        result: Result<Vec<ChatMessage>, HistorySourceError>,
        captured_pair: std::sync::Mutex<Option<(UserId, UserId)>>,
    }

    impl StubSource {
        fn with_result(result: Result<Vec<ChatMessage>, HistorySourceError>) -> Self {
            Self {
                result,
                captured_pair: std::sync::Mutex::new(None),
            }
        }
    }

    impl HistorySource for StubSource {
        fn conversation_history(
            &self,
            user_id: UserId,
            contact_id: UserId,
        ) -> Result<Vec<ChatMessage>, HistorySourceError> {
            *self.captured_pair.lock().expect("pair lock") = Some((user_id, contact_id));
            self.result.clone()
        }
    }

    fn message(content: &str) -> ChatMessage {
        ChatMessage {
            sender_id: 1,
            receiver_id: 4,
            content: content.to_owned(),
            timestamp_unix_ms: Some(1_700_000_000_000),
            correlation_id: None,
        }
    }

    #[test]
    fn passes_conversation_pair_to_source() {
        let source = StubSource::with_result(Ok(vec![]));

        let _ = load_history(&source, LoadHistoryQuery::new(4, 1)).expect("load should succeed");

        assert_eq!(
            *source.captured_pair.lock().expect("pair lock"),
            Some((4, 1))
        );
    }

    #[test]
    fn keeps_short_histories_untouched() {
        let messages = vec![message("a"), message("b")];
        let source = StubSource::with_result(Ok(messages.clone()));

        let output =
            load_history(&source, LoadHistoryQuery::new(4, 1)).expect("load should succeed");

        assert_eq!(output.messages, messages);
    }

    #[test]
    fn trims_to_most_recent_page() {
        let messages: Vec<ChatMessage> =
            (0..60).map(|index| message(&format!("m{index}"))).collect();
        let source = StubSource::with_result(Ok(messages));

        let output =
            load_history(&source, LoadHistoryQuery::new(4, 1)).expect("load should succeed");

        assert_eq!(output.messages.len(), 50);
        assert_eq!(output.messages[0].content, "m10");
        assert_eq!(output.messages[49].content, "m59");
    }

    #[test]
    fn zero_limit_falls_back_to_default() {
        let messages: Vec<ChatMessage> =
            (0..60).map(|index| message(&format!("m{index}"))).collect();
        let source = StubSource::with_result(Ok(messages));

        let query = LoadHistoryQuery {
            user_id: 4,
            contact_id: 1,
            limit: 0,
        };
        let output = load_history(&source, query).expect("load should succeed");

        assert_eq!(output.messages.len(), 50);
    }

    #[test]
    fn oversized_limit_is_capped() {
        let messages: Vec<ChatMessage> =
            (0..300).map(|index| message(&format!("m{index}"))).collect();
        let source = StubSource::with_result(Ok(messages));

        let query = LoadHistoryQuery {
            user_id: 4,
            contact_id: 1,
            limit: 999,
        };
        let output = load_history(&source, query).expect("load should succeed");

        assert_eq!(output.messages.len(), 200);
    }

    #[test]
    fn maps_contact_not_found_error() {
        let source = StubSource::with_result(Err(HistorySourceError::ContactNotFound));

        let err = load_history(&source, LoadHistoryQuery::new(4, 1)).expect_err("must fail");

        assert_eq!(err, LoadHistoryError::ContactNotFound);
    }

    #[test]
    fn maps_unavailable_error() {
        let source = StubSource::with_result(Err(HistorySourceError::Unavailable));

        let err = load_history(&source, LoadHistoryQuery::new(4, 1)).expect_err("must fail");

        assert_eq!(err, LoadHistoryError::TemporarilyUnavailable);
    }
}
