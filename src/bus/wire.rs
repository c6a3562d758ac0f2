//! JSON payloads for the `chat` and `user` topics.
//!
//! Inbound payloads are decode-or-drop: anything that does not parse into the
//! expected shape is logged and discarded before it reaches the controller.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        events::AppEvent,
        message::{ChatMessage, PresenceEvent},
    },
    usecases::contracts::{Publication, CHAT_TOPIC, USER_TOPIC},
};

const WIRE_PAYLOAD_DROPPED: &str = "BUS_PAYLOAD_DROPPED";

#[derive(Debug, Serialize, Deserialize)]
struct ChatPayload {
    name: String,
    msg: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct UserPayload {
    #[serde(rename = "Name", alias = "name")]
    name: String,
    #[serde(rename = "LoggedIn", alias = "loggedIn", alias = "logged_in")]
    logged_in: bool,
}

pub fn encode(publication: &Publication) -> Result<Vec<u8>, serde_json::Error> {
    match publication {
        Publication::Chat(message) => serde_json::to_vec(&ChatPayload {
            name: message.sender_name.clone(),
            msg: message.body.clone(),
        }),
        Publication::Presence(event) => serde_json::to_vec(&UserPayload {
            name: event.user_name.clone(),
            logged_in: event.logged_in,
        }),
    }
}

pub fn decode(topic: &str, payload: &[u8]) -> Option<AppEvent> {
    let decoded = match topic {
        CHAT_TOPIC => serde_json::from_slice::<ChatPayload>(payload)
            .map(|chat| AppEvent::RemoteChat(ChatMessage::new(chat.name, chat.msg))),
        USER_TOPIC => serde_json::from_slice::<UserPayload>(payload)
            .map(|user| AppEvent::RemotePresence(PresenceEvent::new(user.name, user.logged_in))),
        _ => {
            tracing::debug!(code = WIRE_PAYLOAD_DROPPED, topic, "payload on unknown topic");
            return None;
        }
    };

    match decoded {
        Ok(event) => Some(event),
        Err(error) => {
            tracing::debug!(
                code = WIRE_PAYLOAD_DROPPED,
                topic,
                bytes = payload.len(),
                error = %error,
                "malformed payload dropped"
            );
            None
        }
    }
}
