//! Dedicated thread for blocking REST calls. The session loop enqueues
//! requests and keeps rendering; completions come back as app events.

use std::{
    io,
    sync::mpsc::{self, Receiver, Sender},
    thread::{self, JoinHandle},
};

use thiserror::Error;

use crate::{
    domain::{events::AppEvent, UserId},
    usecases::{
        load_contacts::{self, ContactsSource, LoadContactsQuery},
        load_history::{self, HistorySource, LoadHistoryQuery},
        mark_read::{self, ReadReceiptSink},
    },
};

const ROSTER_FETCH_FAILED: &str = "ROSTER_FETCH_FAILED";
const HISTORY_FETCH_FAILED: &str = "HISTORY_FETCH_FAILED";
const MARK_READ_FAILED: &str = "MARK_READ_FAILED";
const REST_WORKER_PANICKED: &str = "REST_WORKER_PANICKED";

#[derive(Debug)]
pub enum BackendRequest {
    Roster,
    History { request_seq: u64, contact_id: UserId },
    MarkRead { contact_id: UserId },
    Shutdown,
}

#[derive(Debug, Error)]
pub enum WorkerStartError {
    #[error("failed to spawn the backend worker thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Owns the worker thread; dropping it drains the queue and joins.
pub struct RestWorker {
    request_tx: Sender<BackendRequest>,
    worker: Option<JoinHandle<()>>,
}

impl RestWorker {
    pub fn start<C>(
        client: C,
        user_id: UserId,
        history_page_size: usize,
        events_tx: Sender<AppEvent>,
    ) -> Result<Self, WorkerStartError>
    where
        C: ContactsSource + HistorySource + ReadReceiptSink + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("qhchat-rest".to_owned())
            .spawn(move || run_worker(client, user_id, history_page_size, request_rx, events_tx))
            .map_err(WorkerStartError::Spawn)?;

        Ok(Self {
            request_tx,
            worker: Some(worker),
        })
    }

    pub fn request_tx(&self) -> Sender<BackendRequest> {
        self.request_tx.clone()
    }
}

impl Drop for RestWorker {
    fn drop(&mut self) {
        let _ = self.request_tx.send(BackendRequest::Shutdown);

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!(code = REST_WORKER_PANICKED, "backend worker panicked");
            }
        }
    }
}

fn run_worker<C>(
    client: C,
    user_id: UserId,
    history_page_size: usize,
    request_rx: Receiver<BackendRequest>,
    events_tx: Sender<AppEvent>,
) where
    C: ContactsSource + HistorySource + ReadReceiptSink,
{
    while let Ok(request) = request_rx.recv() {
        let delivered = match request {
            BackendRequest::Shutdown => return,
            BackendRequest::Roster => handle_roster(&client, user_id, &events_tx),
            BackendRequest::History {
                request_seq,
                contact_id,
            } => handle_history(
                &client,
                user_id,
                contact_id,
                request_seq,
                history_page_size,
                &events_tx,
            ),
            BackendRequest::MarkRead { contact_id } => {
                handle_mark_read(&client, user_id, contact_id);
                true
            }
        };

        // The session loop is gone; nothing left to report to.
        if !delivered {
            return;
        }
    }
}

fn handle_roster(source: &dyn ContactsSource, user_id: UserId, events_tx: &Sender<AppEvent>) -> bool {
    let event = match load_contacts::load_contacts(source, LoadContactsQuery { user_id }) {
        Ok(output) => AppEvent::RosterLoaded(output.contacts),
        Err(error) => {
            tracing::warn!(code = ROSTER_FETCH_FAILED, ?error, "roster fetch failed");
            AppEvent::RosterLoadFailed
        }
    };

    events_tx.send(event).is_ok()
}

fn handle_history(
    source: &dyn HistorySource,
    user_id: UserId,
    contact_id: UserId,
    request_seq: u64,
    history_page_size: usize,
    events_tx: &Sender<AppEvent>,
) -> bool {
    let query = LoadHistoryQuery {
        user_id,
        contact_id,
        limit: history_page_size,
    };

    let event = match load_history::load_history(source, query) {
        Ok(output) => AppEvent::HistoryLoaded {
            request_seq,
            contact_id,
            messages: output.messages,
        },
        Err(error) => {
            tracing::warn!(
                code = HISTORY_FETCH_FAILED,
                contact_id,
                ?error,
                "history fetch failed"
            );
            AppEvent::HistoryLoadFailed {
                request_seq,
                contact_id,
            }
        }
    };

    events_tx.send(event).is_ok()
}

fn handle_mark_read(sink: &dyn ReadReceiptSink, user_id: UserId, contact_id: UserId) {
    // Fire-and-forget: the unread badge was already cleared locally.
    if let Err(error) = mark_read::mark_conversation_read(sink, contact_id, user_id) {
        tracing::warn!(code = MARK_READ_FAILED, contact_id, ?error, "mark-read failed");
    }
}
