use std::time::Duration;

use anyhow::Result;

use crate::{
    bus::BusError,
    domain::{
        events::AppEvent,
        message::{ChatMessage, PresenceEvent},
        session_state::SessionState,
    },
};

pub const CHAT_TOPIC: &str = "chat";
pub const USER_TOPIC: &str = "user";

pub trait AppEventSource {
    /// Blocks until the next event arrives. `None` means every producer is gone.
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait SessionController {
    fn state(&self) -> &SessionState;
    /// Actions to run once when the session starts.
    fn announce(&self) -> Vec<OutboundAction>;
    fn handle_event(&mut self, event: AppEvent) -> Vec<OutboundAction>;
}

/// Fire-and-forget publishing side of the message bus.
pub trait MessageBus {
    fn publish(&self, publication: &Publication) -> Result<(), BusError>;
    /// Best-effort flush of queued publications before the connection closes.
    fn drain(&mut self, timeout: Duration) -> Result<(), BusError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Publication {
    Chat(ChatMessage),
    Presence(PresenceEvent),
}

impl Publication {
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Chat(_) => CHAT_TOPIC,
            Self::Presence(_) => USER_TOPIC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundAction {
    Publish(Publication),
    Drain,
    Exit,
}
