//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Roster styles
// =============================================================================

/// Style for contact names (bold, bright).
pub fn contact_name_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for last-message previews (dimmed).
pub fn contact_preview_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for unread count badges (green).
pub fn unread_badge_style() -> Style {
    Style::default().fg(Color::Green)
}

// =============================================================================
// Transcript styles
// =============================================================================

/// Style for message timestamps.
pub fn timestamp_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for the current user's name in the transcript.
pub fn own_sender_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Style for the contact's name in the transcript.
pub fn contact_sender_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Style for message text content.
pub fn message_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for the not-yet-confirmed marker on optimistic sends.
pub fn pending_marker_style() -> Style {
    Style::default().fg(Color::Yellow)
}

// =============================================================================
// Chrome styles
// =============================================================================

/// Border style for the focused panel.
pub fn active_panel_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Border style for unfocused panels.
pub fn inactive_panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for the compose prompt symbol.
pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Style for typed compose text.
pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for the compose placeholder.
pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for the status line hints.
pub fn status_hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_name_style_is_bold_white() {
        let style = contact_name_style();
        assert_eq!(style.fg, Some(Color::White));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn unread_badge_style_is_green() {
        let style = unread_badge_style();
        assert_eq!(style.fg, Some(Color::Green));
    }

    #[test]
    fn pending_marker_style_is_yellow() {
        let style = pending_marker_style();
        assert_eq!(style.fg, Some(Color::Yellow));
    }

    #[test]
    fn active_border_differs_from_inactive() {
        assert_ne!(active_panel_border_style(), inactive_panel_border_style());
    }
}
