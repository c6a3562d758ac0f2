//! Message input box rendering.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::domain::message_input_state::MessageInputState;

use super::styles;

/// Placeholder text shown while the input is empty.
const PLACEHOLDER_TEXT: &str = "Send a message...";

/// Prompt symbol shown before the input text.
const PROMPT_SYMBOL: &str = "┃ ";

/// Renders the input box. The input always receives typing, so the terminal
/// cursor is placed in it regardless of which pane is emphasized.
pub fn render_message_input(
    frame: &mut Frame<'_>,
    area: Rect,
    input_state: &MessageInputState,
    emphasized: bool,
) {
    let border_style = if emphasized {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let inner_width = usize::from(area.width.saturating_sub(2));
    let prompt_width = PROMPT_SYMBOL.width();
    let before_cursor = input_state.text_before_cursor().width();
    let skip = horizontal_skip(prompt_width + before_cursor, inner_width);

    let paragraph = Paragraph::new(build_input_line(input_state))
        .scroll((0, skip.min(usize::from(u16::MAX)) as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        );

    frame.render_widget(paragraph, area);

    let cursor_column = (prompt_width + before_cursor - skip).min(usize::from(u16::MAX)) as u16;
    let cursor_x = area.x.saturating_add(1).saturating_add(cursor_column);
    let cursor_y = area.y.saturating_add(1);
    frame.set_cursor_position((cursor_x, cursor_y));
}

/// Columns to hide on the left so the cursor stays inside the box.
fn horizontal_skip(cursor_column: usize, inner_width: usize) -> usize {
    cursor_column.saturating_sub(inner_width.saturating_sub(1))
}

/// Builds the line content for the input box.
fn build_input_line(input_state: &MessageInputState) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if input_state.is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(
                PLACEHOLDER_TEXT.to_owned(),
                styles::input_placeholder_style(),
            ),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(input_state.text().to_owned(), styles::input_text_style()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::KeyInput;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn shows_placeholder_when_empty() {
        let state = MessageInputState::default();
        let text = line_text(&build_input_line(&state));

        assert!(text.starts_with(PROMPT_SYMBOL));
        assert!(text.contains(PLACEHOLDER_TEXT));
    }

    #[test]
    fn shows_text_instead_of_placeholder() {
        let mut state = MessageInputState::default();
        state.apply_key(KeyInput::Char('H'));
        state.apply_key(KeyInput::Char('i'));

        let text = line_text(&build_input_line(&state));

        assert_eq!(text, format!("{PROMPT_SYMBOL}Hi"));
    }

    #[test]
    fn no_skip_while_cursor_fits() {
        assert_eq!(horizontal_skip(10, 40), 0);
        assert_eq!(horizontal_skip(39, 40), 0);
    }

    #[test]
    fn skips_overflow_to_keep_cursor_visible() {
        assert_eq!(horizontal_skip(50, 40), 11);
    }
}
