//! State for the message composition field.

/// Hard cap on composed message length, matching the backend's column size.
const MAX_COMPOSE_LENGTH: usize = 2000;

/// Text being composed plus a character-indexed cursor. Byte positions are
/// derived on demand so multi-byte input stays editable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposeState {
    text: String,
    cursor: usize,
}

impl ComposeState {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Inserts at the cursor; returns false once the length cap is hit.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if self.text.chars().count() >= MAX_COMPOSE_LENGTH {
            return false;
        }

        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
        true
    }

    pub fn delete_before_cursor(&mut self) {
        if self.cursor == 0 {
            return;
        }

        self.cursor -= 1;
        let start = self.byte_index(self.cursor);
        let end = self.byte_index(self.cursor + 1);
        self.text.drain(start..end);
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.text.chars().count() {
            self.cursor += 1;
        }
    }

    /// Takes the composed text and resets the field, done on send.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(byte_index, _)| byte_index)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composed(text: &str) -> ComposeState {
        let mut state = ComposeState::default();
        for ch in text.chars() {
            state.insert_char(ch);
        }
        state
    }

    #[test]
    fn insert_appends_and_advances_cursor() {
        let state = composed("hi");

        assert_eq!(state.text(), "hi");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn insert_in_the_middle_respects_cursor() {
        let mut state = composed("ho");
        state.move_cursor_left();

        state.insert_char('l');

        assert_eq!(state.text(), "hlo");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut state = composed("a");
        state.move_cursor_left();

        state.delete_before_cursor();

        assert_eq!(state.text(), "a");
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn backspace_removes_multibyte_chars_cleanly() {
        let mut state = composed("пока");

        state.delete_before_cursor();

        assert_eq!(state.text(), "пок");
        assert_eq!(state.cursor(), 3);
    }

    #[test]
    fn cursor_clamps_at_text_bounds() {
        let mut state = composed("ab");

        state.move_cursor_right();
        assert_eq!(state.cursor(), 2);

        state.move_cursor_left();
        state.move_cursor_left();
        state.move_cursor_left();
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn take_returns_text_and_resets() {
        let mut state = composed("sell me your ladder");

        assert_eq!(state.take(), "sell me your ladder");
        assert!(state.is_empty());
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn insert_rejects_input_past_the_cap() {
        let mut state = ComposeState::default();
        for _ in 0..MAX_COMPOSE_LENGTH {
            assert!(state.insert_char('x'));
        }

        assert!(!state.insert_char('y'));
        assert_eq!(state.text().chars().count(), MAX_COMPOSE_LENGTH);
    }
}
