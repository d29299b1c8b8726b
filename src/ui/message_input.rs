//! Compose field rendering.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::{compose_state::ComposeState, shell_state::ActivePane};

use super::styles;

/// Placeholder text shown when the compose field is not focused and empty.
const PLACEHOLDER_TEXT: &str = "Press 'i' to write a message...";

/// Prompt symbol shown before the typed text.
const PROMPT_SYMBOL: &str = "> ";

pub fn render_compose(
    frame: &mut Frame<'_>,
    area: Rect,
    compose: &ComposeState,
    active_pane: ActivePane,
) {
    let is_focused = active_pane == ActivePane::Compose;

    let border_style = if is_focused {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let line = build_input_line(compose, is_focused);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(paragraph, area);

    if is_focused {
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(PROMPT_SYMBOL.len() as u16)
            .saturating_add(compose.cursor().min(u16::MAX as usize) as u16);
        let cursor_y = area.y.saturating_add(1);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn build_input_line(compose: &ComposeState, is_focused: bool) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if !is_focused && compose.is_empty() {
        return Line::from(vec![
            prompt,
            Span::styled(
                PLACEHOLDER_TEXT.to_owned(),
                styles::input_placeholder_style(),
            ),
        ]);
    }

    Line::from(vec![
        prompt,
        Span::styled(compose.text().to_owned(), styles::input_text_style()),
    ])
}
