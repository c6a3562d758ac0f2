use super::message::{ChatMessage, PresenceEvent};

/// Everything the session controller reacts to, delivered one at a time
/// through a single inbound channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    RemoteChat(ChatMessage),
    RemotePresence(PresenceEvent),
    KeyInput(KeyInput),
    Resize { width: u16, height: u16 },
    InternalError(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    Home,
    End,
    Enter,
    Escape,
    CtrlC,
    /// Move focus to the chat pane.
    NavigateLeft,
    /// Move focus to the user list.
    NavigateRight,
    ScrollUp,
    ScrollDown,
}

impl KeyInput {
    pub fn is_quit(self) -> bool {
        matches!(self, Self::Escape | Self::CtrlC)
    }
}
