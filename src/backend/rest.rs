//! Blocking REST client for the QuickHire chat endpoints. Lives on the
//! backend worker thread, never on the UI thread.

use std::time::Duration;

use reqwest::{blocking::Client, StatusCode};
use thiserror::Error;

use crate::{
    domain::{contact::Contact, message::ChatMessage, UserId},
    infra::config::BackendConfig,
    usecases::{
        load_contacts::{ContactsSource, ContactsSourceError},
        load_history::{HistorySource, HistorySourceError},
        mark_read::{ReadReceiptSink, ReadReceiptSourceError},
    },
};

use crate::backend::wire::{ContactRecord, MessageRecord};

#[derive(Debug, Error)]
pub enum RestClientError {
    #[error("failed to build the http client: {0}")]
    Build(#[source] reqwest::Error),
}

pub struct QuickHireRestClient {
    http: Client,
    base_url: String,
}

impl QuickHireRestClient {
    pub fn new(config: &BackendConfig) -> Result<Self, RestClientError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(RestClientError::Build)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl ContactsSource for QuickHireRestClient {
    fn list_contacts(&self, user_id: UserId) -> Result<Vec<Contact>, ContactsSourceError> {
        let response = self
            .http
            .get(self.url(&format!("/api/chat/{user_id}/contacts")))
            .send()
            .map_err(|_| ContactsSourceError::Unavailable)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ContactsSourceError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ContactsSourceError::Unavailable);
        }

        let records: Vec<ContactRecord> = response
            .json()
            .map_err(|_| ContactsSourceError::InvalidData)?;

        Ok(records.into_iter().map(Contact::from).collect())
    }
}

impl HistorySource for QuickHireRestClient {
    fn conversation_history(
        &self,
        user_id: UserId,
        contact_id: UserId,
    ) -> Result<Vec<ChatMessage>, HistorySourceError> {
        let response = self
            .http
            .get(self.url("/api/chat"))
            .query(&[("senderId", user_id), ("receiverId", contact_id)])
            .send()
            .map_err(|_| HistorySourceError::Unavailable)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(HistorySourceError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(HistorySourceError::ContactNotFound);
        }
        if !status.is_success() {
            return Err(HistorySourceError::Unavailable);
        }

        let records: Vec<MessageRecord> = response
            .json()
            .map_err(|_| HistorySourceError::InvalidData)?;

        Ok(records.into_iter().map(ChatMessage::from).collect())
    }
}

impl ReadReceiptSink for QuickHireRestClient {
    fn mark_read(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
    ) -> Result<(), ReadReceiptSourceError> {
        let response = self
            .http
            .put(self.url("/api/chat/mark-read"))
            .query(&[("senderId", sender_id), ("receiverId", receiver_id)])
            .send()
            .map_err(|_| ReadReceiptSourceError::Unavailable)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ReadReceiptSourceError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ReadReceiptSourceError::Unavailable);
        }

        Ok(())
    }
}
