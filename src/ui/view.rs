use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::domain::{
    roster::RosterEntry,
    session_state::{FocusState, SessionState},
    transcript::{LineKind, TranscriptLine},
};

use super::message_input::render_message_input;
use super::styles;

const WELCOME_LINES: [&str; 2] = [
    "Welcome to the chat room!",
    "Type a message and press Enter to send.",
];
const ROSTER_MIN_WIDTH: u16 = 16;
const ROSTER_MAX_WIDTH: u16 = 30;
/// Border + text row + border.
const INPUT_HEIGHT: u16 = 3;

/// Which panes are drawn with the active border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Emphasis {
    transcript: bool,
    input: bool,
    roster: bool,
}

impl Emphasis {
    fn for_focus(focus: FocusState) -> Self {
        match focus {
            FocusState::Unfocused => Self {
                transcript: true,
                input: false,
                roster: false,
            },
            FocusState::ChatFocused => Self {
                transcript: true,
                input: true,
                roster: false,
            },
            FocusState::UserListFocused => Self {
                transcript: false,
                input: false,
                roster: true,
            },
        }
    }
}

/// Draws the whole session. Reads state only.
pub fn render(frame: &mut Frame<'_>, state: &SessionState) {
    let [content_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .areas(frame.area());

    let [chat_area, roster_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(roster_width(state.viewport().0)),
        ])
        .areas(content_area);

    let [transcript_area, input_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(INPUT_HEIGHT)])
        .areas(chat_area);

    let emphasis = Emphasis::for_focus(state.focus());
    render_transcript_panel(frame, transcript_area, state, emphasis.transcript);
    render_message_input(frame, input_area, state.input(), emphasis.input);
    render_roster_panel(frame, roster_area, state, emphasis.roster);

    frame.render_widget(Paragraph::new(status_line(state)), status_area);
}

fn border_style(emphasized: bool) -> Style {
    if emphasized {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    }
}

fn roster_width(viewport_width: u16) -> u16 {
    (viewport_width / 4).clamp(ROSTER_MIN_WIDTH, ROSTER_MAX_WIDTH)
}

fn render_transcript_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &SessionState,
    emphasized: bool,
) {
    let transcript = state.transcript();
    let hidden_below = state.scroll_from_bottom();
    let title = if hidden_below > 0 {
        format!("Chat (+{hidden_below} below)")
    } else {
        "Chat".to_owned()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(emphasized));

    if transcript.is_empty() {
        let welcome: Vec<Line<'static>> = WELCOME_LINES
            .iter()
            .map(|text| Line::styled(*text, styles::welcome_style()))
            .collect();
        frame.render_widget(Paragraph::new(welcome).block(block), area);
        return;
    }

    let inner_width = usize::from(area.width.saturating_sub(2));
    let viewport_height = usize::from(area.height.saturating_sub(2));
    let shown = &transcript.lines()[..transcript.len().saturating_sub(hidden_below)];
    let rows: Vec<Line<'static>> = shown
        .iter()
        .flat_map(|line| wrap_line(transcript_line(line), inner_width))
        .collect();
    let offset = if hidden_below > 0 && hidden_below == state.max_scroll() {
        0
    } else {
        scroll_offset(rows.len(), viewport_height)
    };

    let paragraph = Paragraph::new(rows)
        .block(block)
        .scroll((offset.min(usize::from(u16::MAX)) as u16, 0));
    frame.render_widget(paragraph, area);
}

/// First visible row so the last row sits at the bottom of the pane.
fn scroll_offset(total_rows: usize, viewport_height: usize) -> usize {
    total_rows.saturating_sub(viewport_height)
}

/// Breaks `line` into rows of at most `width` display columns, keeping span
/// and line styles.
fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![line];
    }

    let line_style = line.style;
    let mut rows = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in line.spans {
        let mut chunk = String::new();
        for ch in span.content.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used > 0 && used + ch_width > width {
                if !chunk.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut chunk), span.style));
                }
                rows.push(Line::from(std::mem::take(&mut current)).style(line_style));
                used = 0;
            }
            chunk.push(ch);
            used += ch_width;
        }
        if !chunk.is_empty() {
            current.push(Span::styled(chunk, span.style));
        }
    }

    rows.push(Line::from(current).style(line_style));
    rows
}

fn transcript_line(line: &TranscriptLine) -> Line<'static> {
    match &line.kind {
        LineKind::Chat { sender } => match line.text.strip_prefix(sender.as_str()) {
            Some(rest) => Line::from(vec![
                Span::styled(sender.clone(), styles::chat_sender_style()),
                Span::styled(rest.to_owned(), styles::chat_body_style()),
            ]),
            None => Line::styled(line.text.clone(), styles::chat_body_style()),
        },
        LineKind::Presence => Line::styled(line.text.clone(), styles::presence_line_style()),
    }
}

fn render_roster_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &SessionState,
    emphasized: bool,
) {
    let roster = state.roster();
    let items: Vec<ListItem<'static>> = roster.snapshot().iter().map(roster_item).collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!("Users ({})", roster.online_count()))
            .borders(Borders::ALL)
            .border_style(border_style(emphasized)),
    );
    frame.render_widget(list, area);
}

fn roster_item(entry: &RosterEntry) -> ListItem<'static> {
    ListItem::new(roster_line(entry))
}

fn roster_line(entry: &RosterEntry) -> Line<'static> {
    if entry.logged_in {
        Line::from(vec![
            Span::styled(format!(" {}", entry.name), styles::roster_online_style()),
            Span::styled(" \u{25CF}", styles::online_indicator_style()),
        ])
    } else {
        Line::styled(format!(" {}", entry.name), styles::roster_offline_style())
    }
}

fn status_line(state: &SessionState) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(
            "{} | Ctrl+←/→ focus | PgUp/PgDn scroll | Esc quit",
            state.self_name()
        ),
        styles::status_style(),
    )];

    if let Some(error) = state.last_error() {
        spans.push(Span::styled(
            format!(" | error: {error}"),
            styles::status_error_style(),
        ));
    }

    Line::from(spans)
}
