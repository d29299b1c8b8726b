use std::{sync::mpsc::Receiver, time::Duration};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    domain::events::{AppEvent, KeyInput},
    usecases::contracts::AppEventSource,
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Interleaves backend completions with terminal input. Backend events
/// are drained first so deliveries and fetch results never wait behind
/// an idle poll timeout.
pub struct CompositeEventSource {
    backend_rx: Receiver<AppEvent>,
}

impl CompositeEventSource {
    pub fn new(backend_rx: Receiver<AppEvent>) -> Self {
        Self { backend_rx }
    }
}

impl AppEventSource for CompositeEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if let Ok(backend_event) = self.backend_rx.try_recv() {
            return Ok(Some(backend_event));
        }

        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(Some(AppEvent::Tick));
        }

        if let Event::Key(key) = event::read()? {
            return Ok(key_event_to_app_event(key));
        }

        Ok(None)
    }
}

/// Maps a terminal key press to a session event. Quit is only hardwired
/// for ctrl-c; everything else, including 'q', is pane-sensitive and
/// left to the orchestrator.
fn key_event_to_app_event(key: KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if key.code == KeyCode::Char('c') && ctrl {
        return Some(AppEvent::QuitRequested);
    }

    let input = match key.code {
        KeyCode::Char(ch) => KeyInput::new(ch.to_string(), ctrl),
        KeyCode::Enter => KeyInput::new("enter", ctrl),
        KeyCode::Backspace => KeyInput::new("backspace", ctrl),
        KeyCode::Esc => KeyInput::new("esc", ctrl),
        KeyCode::Left => KeyInput::new("left", ctrl),
        KeyCode::Right => KeyInput::new("right", ctrl),
        KeyCode::Up => KeyInput::new("up", ctrl),
        KeyCode::Down => KeyInput::new("down", ctrl),
        _ => return None,
    };

    Some(AppEvent::InputKey(input))
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}
