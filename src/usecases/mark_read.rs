//! Marks a conversation as read when it is opened.
//!
//! Mirrors the backend's read-receipt endpoint: the *contact* is the sender
//! whose messages are being acknowledged, the current user the receiver.

use crate::domain::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadReceiptSourceError {
    Unauthorized,
    Unavailable,
}

pub trait ReadReceiptSink {
    fn mark_read(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Result<(), ReadReceiptSourceError>;
}

impl<T: ReadReceiptSink + ?Sized> ReadReceiptSink for &T {
    fn mark_read(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Result<(), ReadReceiptSourceError> {
        (*self).mark_read(sender_id, receiver_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkReadError {
    Unauthorized,
    TemporarilyUnavailable,
}

pub fn mark_conversation_read(
    sink: &dyn ReadReceiptSink,
    contact_id: UserId,
    user_id: UserId,
) -> Result<(), MarkReadError> {
    sink.mark_read(contact_id, user_id).map_err(map_source_error)
}

fn map_source_error(error: ReadReceiptSourceError) -> MarkReadError {
    match error {
        ReadReceiptSourceError::Unauthorized => MarkReadError::Unauthorized,
        ReadReceiptSourceError::Unavailable => MarkReadError::TemporarilyUnavailable,
    }
}
