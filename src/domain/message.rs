//! Values that travel over the bus and into the session.

/// A chat line published by some participant (possibly ourselves).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender_name: String,
    pub body: String,
}

impl ChatMessage {
    pub fn new(sender_name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender_name: sender_name.into(),
            body: body.into(),
        }
    }

    /// Transcript form: `"<sender>: <body>"`.
    pub fn transcript_text(&self) -> String {
        format!("{}: {}", self.sender_name, self.body)
    }
}

/// A user joining or leaving the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEvent {
    pub user_name: String,
    pub logged_in: bool,
}

impl PresenceEvent {
    pub fn new(user_name: impl Into<String>, logged_in: bool) -> Self {
        Self {
            user_name: user_name.into(),
            logged_in,
        }
    }

    pub fn transcript_text(&self) -> String {
        if self.logged_in {
            format!("{} logged in", self.user_name)
        } else {
            format!("{} logged out", self.user_name)
        }
    }
}
