//! Serde shapes for the QuickHire chat API. The backend speaks camelCase
//! JSON and reports timestamps as zone-less `yyyy-MM-ddTHH:mm:ss` strings,
//! which we treat as UTC.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{contact::Contact, message::ChatMessage};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// One roster entry as returned by `GET /api/chat/{userId}/contacts`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub user: UserRecord,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub last_message_time: Option<String>,
    #[serde(default)]
    pub unread_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
}

impl From<ContactRecord> for Contact {
    fn from(record: ContactRecord) -> Self {
        Self {
            contact_id: record.user.id,
            display_name: record.user.name,
            last_message_preview: record.last_message.filter(|preview| !preview.is_empty()),
            unread_count: record.unread_count,
        }
    }
}

/// A persisted message, both in history responses and in live deliveries.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

impl From<MessageRecord> for ChatMessage {
    fn from(record: MessageRecord) -> Self {
        Self {
            sender_id: record.sender_id,
            receiver_id: record.receiver_id,
            content: record.content,
            timestamp_unix_ms: record.timestamp.as_deref().and_then(parse_timestamp),
            correlation_id: record.correlation_id,
        }
    }
}

/// The payload published to `/app/chat.send`. The server assigns the id
/// and timestamp and echoes the correlation id back on delivery.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessageRecord {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl From<&ChatMessage> for OutgoingMessageRecord {
    fn from(message: &ChatMessage) -> Self {
        Self {
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content.clone(),
            correlation_id: message.correlation_id.clone(),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .ok()
        .map(|timestamp| timestamp.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_roster_entry() {
        let raw = r#"{
            "user": {"id": 7, "name": "Marta Kowalska"},
            "lastMessage": "See you at 9",
            "lastMessageTime": "2025-03-14T10:15:30",
            "unreadCount": 2
        }"#;

        let record: ContactRecord = serde_json::from_str(raw).expect("must decode");
        let contact = Contact::from(record);

        assert_eq!(contact.contact_id, 7);
        assert_eq!(contact.display_name, "Marta Kowalska");
        assert_eq!(contact.last_message_preview.as_deref(), Some("See you at 9"));
        assert_eq!(contact.unread_count, 2);
    }

    #[test]
    fn roster_entry_without_history_maps_to_empty_preview() {
        let raw = r#"{"user": {"id": 3, "name": "Jan"}, "lastMessage": ""}"#;

        let record: ContactRecord = serde_json::from_str(raw).expect("must decode");
        let contact = Contact::from(record);

        assert_eq!(contact.last_message_preview, None);
        assert_eq!(contact.unread_count, 0);
    }

    #[test]
    fn decodes_a_history_message() {
        let raw = r#"{
            "id": 41,
            "senderId": 7,
            "receiverId": 4,
            "content": "hello",
            "timestamp": "2025-03-14T10:15:30.5",
            "read": false
        }"#;

        let record: MessageRecord = serde_json::from_str(raw).expect("must decode");
        let message = ChatMessage::from(record);

        assert_eq!(message.sender_id, 7);
        assert_eq!(message.receiver_id, 4);
        assert_eq!(message.content, "hello");
        assert_eq!(message.timestamp_unix_ms, Some(1_741_947_330_500));
        assert_eq!(message.correlation_id, None);
    }

    #[test]
    fn unparseable_timestamp_degrades_to_pending() {
        let raw = r#"{"senderId": 1, "receiverId": 2, "content": "x", "timestamp": "yesterday"}"#;

        let record: MessageRecord = serde_json::from_str(raw).expect("must decode");
        let message = ChatMessage::from(record);

        assert_eq!(message.timestamp_unix_ms, None);
    }

    #[test]
    fn delivery_keeps_the_correlation_id() {
        let raw = r#"{
            "senderId": 4,
            "receiverId": 7,
            "content": "on my way",
            "correlationId": "b2c9"
        }"#;

        let record: MessageRecord = serde_json::from_str(raw).expect("must decode");
        let message = ChatMessage::from(record);

        assert_eq!(message.correlation_id.as_deref(), Some("b2c9"));
    }

    #[test]
    fn outgoing_payload_uses_camel_case_and_omits_server_fields() {
        let message = ChatMessage {
            sender_id: 4,
            receiver_id: 7,
            content: "hi".to_owned(),
            timestamp_unix_ms: None,
            correlation_id: Some("abc-123".to_owned()),
        };

        let json =
            serde_json::to_string(&OutgoingMessageRecord::from(&message)).expect("must encode");

        assert!(json.contains(r#""senderId":4"#));
        assert!(json.contains(r#""receiverId":7"#));
        assert!(json.contains(r#""correlationId":"abc-123""#));
        assert!(!json.contains("timestamp"));
        assert!(!json.contains(r#""id""#));
    }
}
