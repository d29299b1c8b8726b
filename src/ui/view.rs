use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::domain::{
    contact::Contact,
    conversation_state::ConversationUiState,
    roster_state::RosterUiState,
    shell_state::{ActivePane, ShellState},
    UserId,
};

use super::message_input::render_compose;
use super::styles;
use super::transcript::build_transcript_lines;

pub fn render(frame: &mut Frame<'_>, state: &ShellState, current_user_id: UserId) {
    let [content_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(frame.area());

    let [roster_area, conversation_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .areas(content_area);

    // 3 lines for the compose field: border + text + border.
    let [messages_area, compose_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .areas(conversation_area);

    let active_pane = state.active_pane();
    render_roster_panel(frame, roster_area, state, active_pane);
    render_messages_panel(frame, messages_area, state, current_user_id);
    render_compose(frame, compose_area, state.compose(), active_pane);

    let status = Paragraph::new(status_line(state));
    frame.render_widget(status, status_area);
}

fn render_roster_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &ShellState,
    active_pane: ActivePane,
) {
    let border_style = if active_pane == ActivePane::Roster {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let roster = state.roster();
    match roster.ui_state() {
        RosterUiState::Loading => {
            render_roster_notice(frame, area, "Loading conversations...", border_style);
        }
        RosterUiState::Ready if roster.contacts().is_empty() => {
            render_roster_notice(
                frame,
                area,
                "No conversations yet. Press 'r' to refresh.",
                border_style,
            );
        }
        RosterUiState::Ready => {
            let title = format!("Contacts ({})", roster.contacts().len());
            let items: Vec<ListItem<'static>> =
                roster.contacts().iter().map(roster_item).collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .title(title)
                        .borders(Borders::ALL)
                        .border_style(border_style),
                )
                .highlight_style(
                    Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
                );

            let mut list_state = ListState::default();
            list_state.select(roster.selected_index());
            frame.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn render_roster_notice(frame: &mut Frame<'_>, area: Rect, notice: &str, border_style: Style) {
    let paragraph = Paragraph::new(notice).block(
        Block::default()
            .title("Contacts")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);
}

fn roster_item(contact: &Contact) -> ListItem<'static> {
    ListItem::new(roster_item_lines(contact))
}

/// Two rows per contact: name with an unread badge, then the preview.
fn roster_item_lines(contact: &Contact) -> Vec<Line<'static>> {
    let mut name_spans = vec![Span::styled(
        contact.display_name.clone(),
        styles::contact_name_style(),
    )];

    if contact.unread_count > 0 {
        name_spans.push(Span::styled(
            format!(" [{}]", contact.unread_count),
            styles::unread_badge_style(),
        ));
    }

    let preview = contact
        .last_message_preview
        .clone()
        .unwrap_or_else(|| "No messages yet".to_owned());

    vec![
        Line::from(name_spans),
        Line::from(vec![Span::styled(
            format!("  {preview}"),
            styles::contact_preview_style(),
        )]),
    ]
}

fn render_messages_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &ShellState,
    current_user_id: UserId,
) {
    let border_style = styles::inactive_panel_border_style();
    let conversation = state.conversation();

    let title = if conversation.contact_name().is_empty() {
        "Messages".to_owned()
    } else {
        conversation.contact_name().to_owned()
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let notice = match conversation.ui_state() {
        ConversationUiState::Empty => Some("Select a contact and press Enter."),
        ConversationUiState::Loading => Some("Loading messages..."),
        ConversationUiState::Ready if conversation.messages().is_empty() => {
            Some("No messages yet. Say hello!")
        }
        ConversationUiState::Ready => None,
    };

    if let Some(notice) = notice {
        frame.render_widget(Paragraph::new(notice).block(block), area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    let mut lines = build_transcript_lines(
        conversation.messages(),
        current_user_id,
        conversation.contact_name(),
        inner_width,
    );

    // Keep the newest lines in view.
    if lines.len() > inner_height {
        lines.drain(..lines.len() - inner_height);
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn status_line(state: &ShellState) -> Line<'static> {
    let hints = match state.active_pane() {
        ActivePane::Roster => "j/k move · enter open · i write · r refresh · q quit",
        ActivePane::Compose => "enter send · esc back",
    };

    Line::from(vec![
        Span::raw(state.connectivity().indicator()),
        Span::raw("  "),
        Span::styled(hints.to_owned(), styles::status_hint_style()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::ConnectivityStatus;

    fn contact(id: i64, name: &str, unread: u32, preview: Option<&str>) -> Contact {
        Contact {
            contact_id: id,
            display_name: name.to_owned(),
            last_message_preview: preview.map(str::to_owned),
            unread_count: unread,
        }
    }

    fn rendered(line: &Line<'_>) -> String {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn roster_item_shows_the_unread_badge() {
        let lines = roster_item_lines(&contact(7, "Marta", 3, Some("see you")));

        assert_eq!(rendered(&lines[0]), "Marta [3]");
        assert_eq!(rendered(&lines[1]), "  see you");
    }

    #[test]
    fn roster_item_hides_a_zero_badge() {
        let lines = roster_item_lines(&contact(7, "Marta", 0, None));

        assert_eq!(rendered(&lines[0]), "Marta");
        assert_eq!(rendered(&lines[1]), "  No messages yet");
    }

    #[test]
    fn status_line_leads_with_connectivity() {
        let mut state = ShellState::default();
        state.set_connectivity(ConnectivityStatus::Connected);

        let line = status_line(&state);

        assert!(rendered(&line).starts_with("● Connected"));
    }

    #[test]
    fn status_hints_follow_the_focused_pane() {
        let mut state = ShellState::default();

        state.focus_pane(ActivePane::Compose);
        assert!(rendered(&status_line(&state)).contains("esc back"));

        state.focus_pane(ActivePane::Roster);
        assert!(rendered(&status_line(&state)).contains("q quit"));
    }
}
