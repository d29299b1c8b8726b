//! The live message channel: STOMP over WebSocket against the backend's
//! `/ws` endpoint. One subscription per session, scoped to the user's
//! inbox topic; switching conversations never touches it.
//!
//! Runs as a task on the app-owned Tokio runtime. Drops are reported as
//! `ConnectivityChanged(Disconnected)` and retried after a fixed delay,
//! matching the web client's reconnect policy.

use std::{sync::mpsc::Sender, time::Duration};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc as tokio_mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{
    domain::{
        events::{AppEvent, ConnectivityStatus},
        message::ChatMessage,
        UserId,
    },
    usecases::contracts::PublishError,
};

use crate::backend::{
    stomp::{Command, Frame},
    wire::{MessageRecord, OutgoingMessageRecord},
};

const INBOUND_TOPIC_PREFIX: &str = "/topic/messages/";
const SEND_DESTINATION: &str = "/app/chat.send";
const SUBSCRIPTION_ID: &str = "sub-0";

const LIVE_CHANNEL_STOPPED: &str = "LIVE_CHANNEL_STOPPED";
const LIVE_CONNECT_FAILED: &str = "LIVE_CONNECT_FAILED";
const LIVE_PROTOCOL_ERROR: &str = "LIVE_PROTOCOL_ERROR";
const LIVE_FRAME_IGNORED: &str = "LIVE_FRAME_IGNORED";

/// Publishing half handed to the session's backend facade.
#[derive(Clone)]
pub struct LiveChannelHandle {
    outbound_tx: tokio_mpsc::UnboundedSender<ChatMessage>,
}

impl LiveChannelHandle {
    pub fn publish(&self, message: &ChatMessage) -> Result<(), PublishError> {
        self.outbound_tx
            .send(message.clone())
            .map_err(|_| PublishError::ChannelClosed)
    }
}

/// Owns the channel task; dropping it signals the task to stop.
pub struct LiveChannelMonitor {
    stop_tx: watch::Sender<bool>,
}

impl LiveChannelMonitor {
    pub fn start(
        runtime: &tokio::runtime::Runtime,
        ws_url: String,
        user_id: UserId,
        reconnect_delay: Duration,
        events_tx: Sender<AppEvent>,
    ) -> (Self, LiveChannelHandle) {
        let (stop_tx, stop_rx) = watch::channel(false);
        let (outbound_tx, outbound_rx) = tokio_mpsc::unbounded_channel();

        runtime.spawn(run_channel(
            ws_url,
            user_id,
            reconnect_delay,
            events_tx,
            stop_rx,
            outbound_rx,
        ));

        (Self { stop_tx }, LiveChannelHandle { outbound_tx })
    }
}

impl Drop for LiveChannelMonitor {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(true);
    }
}

enum ServeEnd {
    Stopped,
    SessionGone,
    ConnectionLost,
}

async fn run_channel(
    ws_url: String,
    user_id: UserId,
    reconnect_delay: Duration,
    events_tx: Sender<AppEvent>,
    mut stop_rx: watch::Receiver<bool>,
    mut outbound_rx: tokio_mpsc::UnboundedReceiver<ChatMessage>,
) {
    loop {
        if *stop_rx.borrow() {
            break;
        }

        if !emit(&events_tx, ConnectivityStatus::Connecting) {
            break;
        }

        match serve_connection(&ws_url, user_id, &events_tx, &mut stop_rx, &mut outbound_rx).await
        {
            ServeEnd::Stopped | ServeEnd::SessionGone => break,
            ServeEnd::ConnectionLost => {
                if !emit(&events_tx, ConnectivityStatus::Disconnected) {
                    break;
                }

                tokio::select! {
                    _ = tokio::time::sleep(reconnect_delay) => {}
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        }
    }

    let _ = events_tx.send(AppEvent::ConnectivityChanged(
        ConnectivityStatus::Disconnected,
    ));
    tracing::info!(code = LIVE_CHANNEL_STOPPED, "live channel stopped");
}

async fn serve_connection(
    ws_url: &str,
    user_id: UserId,
    events_tx: &Sender<AppEvent>,
    stop_rx: &mut watch::Receiver<bool>,
    outbound_rx: &mut tokio_mpsc::UnboundedReceiver<ChatMessage>,
) -> ServeEnd {
    let stream = match connect_async(ws_url).await {
        Ok((stream, _response)) => stream,
        Err(error) => {
            tracing::warn!(code = LIVE_CONNECT_FAILED, %error, "websocket connect failed");
            return ServeEnd::ConnectionLost;
        }
    };
    let (mut sink, mut stream) = stream.split();

    let connect = Frame::connect(host_of(ws_url));
    if sink
        .send(Message::Text(connect.encode().into()))
        .await
        .is_err()
    {
        return ServeEnd::ConnectionLost;
    }

    // STOMP handshake: wait for CONNECTED before subscribing.
    loop {
        tokio::select! {
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    return ServeEnd::Stopped;
                }
            }
            incoming = stream.next() => match incoming {
                None => return ServeEnd::ConnectionLost,
                Some(Err(error)) => {
                    tracing::warn!(code = LIVE_CONNECT_FAILED, %error, "websocket read failed");
                    return ServeEnd::ConnectionLost;
                }
                Some(Ok(Message::Text(text))) => match Frame::parse(text.as_str()) {
                    Ok(Some(frame)) if frame.command == Command::Connected => break,
                    Ok(Some(frame)) if frame.command == Command::Error => {
                        tracing::warn!(
                            code = LIVE_PROTOCOL_ERROR,
                            detail = frame.header("message"),
                            "broker rejected the connection"
                        );
                        return ServeEnd::ConnectionLost;
                    }
                    Ok(_) => {}
                    Err(error) => {
                        tracing::debug!(code = LIVE_FRAME_IGNORED, %error, "unparseable frame");
                    }
                },
                Some(Ok(Message::Close(_))) => return ServeEnd::ConnectionLost,
                Some(Ok(_)) => {}
            }
        }
    }

    let subscribe = Frame::subscribe(SUBSCRIPTION_ID, &inbound_topic(user_id));
    if sink
        .send(Message::Text(subscribe.encode().into()))
        .await
        .is_err()
    {
        return ServeEnd::ConnectionLost;
    }

    if !emit(events_tx, ConnectivityStatus::Connected) {
        return ServeEnd::SessionGone;
    }

    loop {
        tokio::select! {
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    let goodbye = Frame::disconnect();
                    let _ = sink.send(Message::Text(goodbye.encode().into())).await;
                    return ServeEnd::Stopped;
                }
            }
            outgoing = outbound_rx.recv() => match outgoing {
                // All publish handles dropped; the session is over.
                None => return ServeEnd::Stopped,
                Some(message) => {
                    let record = OutgoingMessageRecord::from(&message);
                    match serde_json::to_string(&record) {
                        Ok(body) => {
                            let frame = Frame::send_json(SEND_DESTINATION, body);
                            if sink.send(Message::Text(frame.encode().into())).await.is_err() {
                                return ServeEnd::ConnectionLost;
                            }
                        }
                        Err(error) => {
                            tracing::warn!(code = LIVE_PROTOCOL_ERROR, %error, "encode failed");
                        }
                    }
                }
            },
            incoming = stream.next() => match incoming {
                None => return ServeEnd::ConnectionLost,
                Some(Err(error)) => {
                    tracing::warn!(code = LIVE_CONNECT_FAILED, %error, "websocket read failed");
                    return ServeEnd::ConnectionLost;
                }
                Some(Ok(Message::Text(text))) => match Frame::parse(text.as_str()) {
                    Ok(Some(frame)) => match frame.command {
                        Command::Message => match delivery_from_frame(&frame) {
                            Some(delivery) => {
                                if !emit_event(events_tx, AppEvent::Delivery(delivery)) {
                                    return ServeEnd::SessionGone;
                                }
                            }
                            None => {
                                tracing::debug!(
                                    code = LIVE_FRAME_IGNORED,
                                    "message frame with undecodable body"
                                );
                            }
                        },
                        Command::Error => {
                            tracing::warn!(
                                code = LIVE_PROTOCOL_ERROR,
                                detail = frame.header("message"),
                                "broker error frame"
                            );
                            return ServeEnd::ConnectionLost;
                        }
                        _ => {}
                    },
                    Ok(None) => {}
                    Err(error) => {
                        tracing::debug!(code = LIVE_FRAME_IGNORED, %error, "unparseable frame");
                    }
                },
                Some(Ok(Message::Close(_))) => return ServeEnd::ConnectionLost,
                Some(Ok(_)) => {}
            }
        }
    }
}

fn inbound_topic(user_id: UserId) -> String {
    format!("{INBOUND_TOPIC_PREFIX}{user_id}")
}

fn host_of(ws_url: &str) -> &str {
    let without_scheme = ws_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(ws_url);
    without_scheme
        .split(['/', ':'])
        .next()
        .unwrap_or(without_scheme)
}

fn delivery_from_frame(frame: &Frame) -> Option<ChatMessage> {
    let record: MessageRecord = serde_json::from_str(&frame.body).ok()?;
    Some(ChatMessage::from(record))
}

fn emit(events_tx: &Sender<AppEvent>, status: ConnectivityStatus) -> bool {
    emit_event(events_tx, AppEvent::ConnectivityChanged(status))
}

fn emit_event(events_tx: &Sender<AppEvent>, event: AppEvent) -> bool {
    events_tx.send(event).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_topic_is_scoped_to_the_user() {
        assert_eq!(inbound_topic(4), "/topic/messages/4");
    }

    #[test]
    fn host_is_extracted_from_the_ws_url() {
        assert_eq!(host_of("ws://localhost:8080/ws"), "localhost");
        assert_eq!(host_of("wss://chat.quickhire.example/ws"), "chat.quickhire.example");
    }

    #[test]
    fn message_frame_decodes_into_a_delivery() {
        let frame = Frame {
            command: Command::Message,
            headers: vec![("destination".to_owned(), inbound_topic(4))],
            body: r#"{"senderId":7,"receiverId":4,"content":"hi","timestamp":"2025-03-14T10:15:30","correlationId":"c-1"}"#.to_owned(),
        };

        let delivery = delivery_from_frame(&frame).expect("must decode");

        assert_eq!(delivery.sender_id, 7);
        assert_eq!(delivery.receiver_id, 4);
        assert_eq!(delivery.content, "hi");
        assert!(delivery.timestamp_unix_ms.is_some());
        assert_eq!(delivery.correlation_id.as_deref(), Some("c-1"));
    }

    #[test]
    fn undecodable_message_body_is_dropped() {
        let frame = Frame {
            command: Command::Message,
            headers: Vec::new(),
            body: "not json".to_owned(),
        };

        assert!(delivery_from_frame(&frame).is_none());
    }

    #[test]
    fn publish_fails_once_the_channel_task_is_gone() {
        let (outbound_tx, outbound_rx) = tokio_mpsc::unbounded_channel::<ChatMessage>();
        let handle = LiveChannelHandle { outbound_tx };
        drop(outbound_rx);

        let message = ChatMessage {
            sender_id: 4,
            receiver_id: 7,
            content: "hi".to_owned(),
            timestamp_unix_ms: None,
            correlation_id: None,
        };

        assert_eq!(handle.publish(&message), Err(PublishError::ChannelClosed));
    }

    #[test]
    fn monitor_signals_stop_on_drop() {
        let (stop_tx, stop_rx) = watch::channel(false);
        let monitor = LiveChannelMonitor { stop_tx };

        drop(monitor);

        assert!(*stop_rx.borrow());
    }
}
