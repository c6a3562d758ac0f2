//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Panel styles
// =============================================================================

/// Border of the emphasized pane.
pub fn active_panel_border_style() -> Style {
    Style::default().fg(Color::Indexed(62))
}

pub fn inactive_panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Transcript styles
// =============================================================================

/// Style for the sender name in chat lines (magenta, bold).
pub fn chat_sender_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

pub fn chat_body_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for "logged in" / "logged out" lines.
pub fn presence_line_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

pub fn welcome_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

// =============================================================================
// Roster styles
// =============================================================================

pub fn roster_online_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn roster_offline_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn online_indicator_style() -> Style {
    Style::default().fg(Color::Green)
}

// =============================================================================
// Input and status styles
// =============================================================================

pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Indexed(62))
}

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn status_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn status_error_style() -> Style {
    Style::default().fg(Color::Red)
}
