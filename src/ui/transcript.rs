//! Transcript rendering: turns the conversation buffer into styled lines.
//!
//! Messages are rendered strictly in buffer order; optimistic sends show
//! a pending marker until the server echo replaces nothing (the buffer
//! keeps the optimistic copy, the marker just reflects its missing
//! timestamp).

use chrono::{Local, TimeZone};
use ratatui::text::{Line, Span};

use crate::domain::{message::ChatMessage, UserId};

use super::styles;

const PENDING_CLOCK: &str = "··:··";
const BLANK_CLOCK: &str = "     ";
const CONTINUATION_INDENT: &str = "        ";

/// Display name for a message's sender within the active conversation.
pub fn sender_label(message: &ChatMessage, current_user_id: UserId, contact_name: &str) -> String {
    if message.is_from(current_user_id) {
        "You".to_owned()
    } else {
        contact_name.to_owned()
    }
}

/// Wall-clock column for a message; pending sends get a placeholder.
pub fn format_clock(timestamp_unix_ms: Option<i64>) -> String {
    let Some(timestamp_ms) = timestamp_unix_ms else {
        return PENDING_CLOCK.to_owned();
    };

    match Local.timestamp_millis_opt(timestamp_ms) {
        chrono::LocalResult::Single(at) => at.format("%H:%M").to_string(),
        chrono::LocalResult::Ambiguous(at, _) => at.format("%H:%M").to_string(),
        chrono::LocalResult::None => BLANK_CLOCK.to_owned(),
    }
}

/// Greedy word wrap to the panel's inner width. Words longer than the
/// width are split hard.
pub fn wrap_content(content: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![content.to_owned()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in content.split_whitespace() {
        let word_len = word.chars().count();

        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len > width {
            // Hard-split an overlong word across as many lines as needed.
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }

            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                let piece: String = chunk.iter().collect();
                if piece.chars().count() == width {
                    lines.push(piece);
                } else {
                    current_len = piece.chars().count();
                    current = piece;
                }
            }
            continue;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Builds the full transcript for the messages panel, newest last.
pub fn build_transcript_lines(
    messages: &[ChatMessage],
    current_user_id: UserId,
    contact_name: &str,
    width: usize,
) -> Vec<Line<'static>> {
    let content_width = width.saturating_sub(CONTINUATION_INDENT.len());
    let mut lines = Vec::new();

    for message in messages {
        let label = sender_label(message, current_user_id, contact_name);
        let sender_style = if message.is_from(current_user_id) {
            styles::own_sender_style()
        } else {
            styles::contact_sender_style()
        };
        let clock_style = if message.is_pending() {
            styles::pending_marker_style()
        } else {
            styles::timestamp_style()
        };

        let mut wrapped = wrap_content(&message.content, content_width.max(1)).into_iter();

        let first = wrapped.next().unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format_clock(message.timestamp_unix_ms), clock_style),
            Span::raw(" "),
            Span::styled(format!("{label}: "), sender_style),
            Span::styled(first, styles::message_text_style()),
        ]));

        for continuation in wrapped {
            lines.push(Line::from(vec![
                Span::raw(CONTINUATION_INDENT),
                Span::styled(continuation, styles::message_text_style()),
            ]));
        }
    }

    lines
}
