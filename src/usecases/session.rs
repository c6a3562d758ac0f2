//! The session controller: folds every inbound event into [`SessionState`]
//! and reports the bus work the event requires.
//!
//! The controller owns no timers and performs no I/O, so the resulting state
//! is a deterministic function of the event sequence fed to it.

use crate::domain::{
    events::{AppEvent, KeyInput},
    message::{ChatMessage, PresenceEvent},
    session_state::{FocusState, SessionState},
    transcript::{LineKind, TranscriptLine},
};

use super::contracts::{OutboundAction, Publication, SessionController};

pub struct DefaultSessionController {
    state: SessionState,
}

impl DefaultSessionController {
    pub fn initialize(self_name: impl Into<String>) -> Self {
        Self {
            state: SessionState::new(self_name),
        }
    }

    fn handle_remote_chat(&mut self, message: ChatMessage) {
        if self.is_confirmed_echo(&message) {
            if self.state.input().text().trim() == message.body {
                self.state.input_mut().clear();
            }
            self.state.set_pending_echo(None);
        }

        let text = message.transcript_text();
        self.state.append_line(TranscriptLine {
            kind: LineKind::Chat {
                sender: message.sender_name,
            },
            text,
        });
    }

    fn is_confirmed_echo(&self, message: &ChatMessage) -> bool {
        message.sender_name == self.state.self_name()
            && self.state.pending_echo() == Some(message.body.as_str())
    }

    fn handle_remote_presence(&mut self, event: PresenceEvent) {
        self.state
            .roster_mut()
            .upsert(&event.user_name, event.logged_in);
        self.state.append_line(TranscriptLine {
            kind: LineKind::Presence,
            text: event.transcript_text(),
        });
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<OutboundAction> {
        match key {
            key if key.is_quit() => self.quit(),
            KeyInput::Enter => self.send_input(),
            KeyInput::NavigateLeft => {
                self.state.set_focus(FocusState::ChatFocused);
                Vec::new()
            }
            KeyInput::NavigateRight => {
                self.state.set_focus(FocusState::UserListFocused);
                Vec::new()
            }
            KeyInput::ScrollUp => {
                self.state.scroll_up();
                Vec::new()
            }
            KeyInput::ScrollDown => {
                self.state.scroll_down();
                Vec::new()
            }
            other => {
                self.state.input_mut().apply_key(other);
                Vec::new()
            }
        }
    }

    /// Publishes the input without echoing it locally; the transcript line
    /// appears once the bus delivers our own message back.
    fn send_input(&mut self) -> Vec<OutboundAction> {
        let body = self.state.input().text().trim().to_owned();
        if body.is_empty() {
            return Vec::new();
        }

        tracing::debug!(chars = body.chars().count(), "publishing chat message");
        self.state.set_pending_echo(Some(body.clone()));
        vec![OutboundAction::Publish(Publication::Chat(ChatMessage::new(
            self.state.self_name(),
            body,
        )))]
    }

    fn quit(&mut self) -> Vec<OutboundAction> {
        tracing::info!(user = self.state.self_name(), "quit requested");
        self.state.quit();
        vec![
            OutboundAction::Publish(Publication::Presence(PresenceEvent::new(
                self.state.self_name(),
                false,
            ))),
            OutboundAction::Drain,
            OutboundAction::Exit,
        ]
    }
}

impl SessionController for DefaultSessionController {
    fn state(&self) -> &SessionState {
        &self.state
    }

    fn announce(&self) -> Vec<OutboundAction> {
        vec![OutboundAction::Publish(Publication::Presence(
            PresenceEvent::new(self.state.self_name(), true),
        ))]
    }

    fn handle_event(&mut self, event: AppEvent) -> Vec<OutboundAction> {
        if !self.state.is_running() {
            if let AppEvent::InternalError(cause) = event {
                self.state.set_last_error(cause);
            }
            return Vec::new();
        }

        match event {
            AppEvent::RemoteChat(message) => {
                self.handle_remote_chat(message);
                Vec::new()
            }
            AppEvent::RemotePresence(presence) => {
                self.handle_remote_presence(presence);
                Vec::new()
            }
            AppEvent::KeyInput(key) => self.handle_key(key),
            AppEvent::Resize { width, height } => {
                self.state.set_viewport(width, height);
                Vec::new()
            }
            AppEvent::InternalError(cause) => {
                tracing::warn!(error = %cause, "session recorded internal error");
                self.state.set_last_error(cause);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELF: &str = "me";

    fn controller() -> DefaultSessionController {
        DefaultSessionController::initialize(SELF)
    }

    fn key(key: KeyInput) -> AppEvent {
        AppEvent::KeyInput(key)
    }

    fn chat(sender: &str, body: &str) -> AppEvent {
        AppEvent::RemoteChat(ChatMessage::new(sender, body))
    }

    fn presence(name: &str, logged_in: bool) -> AppEvent {
        AppEvent::RemotePresence(PresenceEvent::new(name, logged_in))
    }

    fn type_text(controller: &mut DefaultSessionController, text: &str) {
        for ch in text.chars() {
            assert!(controller.handle_event(key(KeyInput::Char(ch))).is_empty());
        }
    }

    fn transcript(controller: &DefaultSessionController) -> Vec<String> {
        controller
            .state()
            .transcript()
            .lines()
            .iter()
            .map(|line| line.text.clone())
            .collect()
    }

    fn roster(controller: &DefaultSessionController) -> Vec<(String, bool)> {
        controller
            .state()
            .roster()
            .snapshot()
            .iter()
            .map(|entry| (entry.name.clone(), entry.logged_in))
            .collect()
    }

    fn run(events: &[AppEvent]) -> (SessionState, Vec<Vec<OutboundAction>>) {
        let mut controller = controller();
        let actions = events
            .iter()
            .cloned()
            .map(|event| controller.handle_event(event))
            .collect();
        (controller.state().clone(), actions)
    }

    #[test]
    fn mixed_remote_and_local_events_reconcile_into_one_view() {
        let mut controller = controller();
        controller.handle_event(presence("Ann", true));
        controller.handle_event(chat("Ann", "hi"));
        controller.handle_event(presence("Bob", true));
        type_text(&mut controller, "hello");

        let actions = controller.handle_event(key(KeyInput::Enter));

        assert_eq!(
            transcript(&controller),
            vec!["Ann logged in", "Ann: hi", "Bob logged in"]
        );
        assert_eq!(
            actions,
            vec![OutboundAction::Publish(Publication::Chat(ChatMessage::new(
                SELF, "hello"
            )))]
        );
        assert_eq!(
            roster(&controller),
            vec![("Ann".to_owned(), true), ("Bob".to_owned(), true)]
        );
    }

    #[test]
    fn login_then_logout_keeps_single_roster_entry() {
        let mut controller = controller();
        controller.handle_event(presence("Ann", true));
        controller.handle_event(chat("Cid", "unrelated"));
        controller.handle_event(presence("Ann", false));

        assert_eq!(roster(&controller), vec![("Ann".to_owned(), false)]);
        assert_eq!(
            transcript(&controller),
            vec!["Ann logged in", "Cid: unrelated", "Ann logged out"]
        );
    }

    #[test]
    fn enter_on_empty_or_blank_input_publishes_nothing() {
        let mut controller = controller();
        assert!(controller.handle_event(key(KeyInput::Enter)).is_empty());

        type_text(&mut controller, "   ");
        assert!(controller.handle_event(key(KeyInput::Enter)).is_empty());
        assert!(controller.state().pending_echo().is_none());
    }

    #[test]
    fn enter_does_not_echo_locally() {
        let mut controller = controller();
        type_text(&mut controller, "hello");
        controller.handle_event(key(KeyInput::Enter));

        assert!(controller.state().transcript().is_empty());
        assert_eq!(controller.state().input().text(), "hello");
        assert_eq!(controller.state().pending_echo(), Some("hello"));
    }

    #[test]
    fn confirmed_self_echo_clears_input() {
        let mut controller = controller();
        type_text(&mut controller, "hello");
        controller.handle_event(key(KeyInput::Enter));

        controller.handle_event(chat(SELF, "hello"));

        assert!(controller.state().input().is_empty());
        assert!(controller.state().pending_echo().is_none());
        assert_eq!(transcript(&controller), vec!["me: hello"]);
    }

    #[test]
    fn remote_chat_from_others_keeps_input() {
        let mut controller = controller();
        type_text(&mut controller, "draft");

        controller.handle_event(chat("Ann", "draft"));

        assert_eq!(controller.state().input().text(), "draft");
    }

    #[test]
    fn echo_does_not_wipe_text_typed_after_sending() {
        let mut controller = controller();
        type_text(&mut controller, "first");
        controller.handle_event(key(KeyInput::Enter));
        type_text(&mut controller, " and more");

        controller.handle_event(chat(SELF, "first"));

        assert_eq!(controller.state().input().text(), "first and more");
        assert!(controller.state().pending_echo().is_none());
    }

    #[test]
    fn lost_publication_leaves_text_for_resend() {
        let mut controller = controller();
        type_text(&mut controller, "again");
        let first = controller.handle_event(key(KeyInput::Enter));
        let second = controller.handle_event(key(KeyInput::Enter));

        assert_eq!(first, second);
        assert_eq!(controller.state().input().text(), "again");
    }

    #[test]
    fn navigation_keys_only_change_focus() {
        let mut controller = controller();
        type_text(&mut controller, "abc");
        let before = controller.state().clone();

        controller.handle_event(key(KeyInput::NavigateRight));
        assert_eq!(controller.state().focus(), FocusState::UserListFocused);

        controller.handle_event(key(KeyInput::NavigateLeft));
        assert_eq!(controller.state().focus(), FocusState::ChatFocused);
        assert_eq!(controller.state().input(), before.input());
        assert_eq!(controller.state().transcript(), before.transcript());
    }

    #[test]
    fn focus_does_not_gate_event_processing() {
        let mut controller = controller();
        controller.handle_event(key(KeyInput::NavigateRight));
        type_text(&mut controller, "x");
        controller.handle_event(chat("Ann", "hi"));

        assert_eq!(controller.state().input().text(), "x");
        assert_eq!(transcript(&controller), vec!["Ann: hi"]);
    }

    #[test]
    fn quit_publishes_logout_then_drains_then_exits() {
        for quit_key in [KeyInput::Escape, KeyInput::CtrlC] {
            let mut controller = controller();

            let actions = controller.handle_event(key(quit_key));

            assert_eq!(
                actions,
                vec![
                    OutboundAction::Publish(Publication::Presence(PresenceEvent::new(
                        SELF, false
                    ))),
                    OutboundAction::Drain,
                    OutboundAction::Exit,
                ]
            );
            assert!(!controller.state().is_running());
        }
    }

    #[test]
    fn quit_is_terminal_except_for_last_error() {
        let mut controller = controller();
        controller.handle_event(key(KeyInput::Escape));
        let frozen = controller.state().clone();

        let follow_ups = [
            chat("Ann", "late"),
            presence("Bob", true),
            key(KeyInput::Char('z')),
            key(KeyInput::Enter),
            key(KeyInput::NavigateRight),
            key(KeyInput::CtrlC),
            AppEvent::Resize {
                width: 10,
                height: 5,
            },
        ];
        for event in follow_ups {
            assert!(controller.handle_event(event).is_empty());
        }
        assert_eq!(controller.state(), &frozen);

        controller.handle_event(AppEvent::InternalError("late failure".to_owned()));
        assert_eq!(controller.state().last_error(), Some("late failure"));
        assert_eq!(controller.state().transcript(), frozen.transcript());
    }

    #[test]
    fn internal_error_is_recorded_and_session_continues() {
        let mut controller = controller();
        let actions = controller.handle_event(AppEvent::InternalError("slow consumer".to_owned()));

        assert!(actions.is_empty());
        assert!(controller.state().is_running());
        assert_eq!(controller.state().last_error(), Some("slow consumer"));

        controller.handle_event(chat("Ann", "still here"));
        assert_eq!(transcript(&controller), vec!["Ann: still here"]);
    }

    #[test]
    fn resize_only_updates_viewport() {
        let mut controller = controller();
        let actions = controller.handle_event(AppEvent::Resize {
            width: 120,
            height: 40,
        });

        assert!(actions.is_empty());
        assert_eq!(controller.state().viewport(), (120, 40));
        assert!(controller.state().transcript().is_empty());
    }

    #[test]
    fn max_length_is_enforced_through_key_input() {
        let mut controller = controller();
        for _ in 0..300 {
            controller.handle_event(key(KeyInput::Char('a')));
        }

        assert_eq!(controller.state().input().text().chars().count(), 280);
        assert!(controller.state().last_error().is_none());
    }

    #[test]
    fn announce_publishes_self_login() {
        let controller = controller();

        assert_eq!(
            controller.announce(),
            vec![OutboundAction::Publish(Publication::Presence(
                PresenceEvent::new(SELF, true)
            ))]
        );
    }

    #[test]
    fn same_event_sequence_yields_identical_results() {
        let events = vec![
            presence("Ann", true),
            key(KeyInput::Char('h')),
            key(KeyInput::Char('i')),
            chat("Ann", "yo"),
            key(KeyInput::NavigateRight),
            key(KeyInput::Enter),
            AppEvent::InternalError("boom".to_owned()),
            chat(SELF, "hi"),
            presence("Ann", false),
            key(KeyInput::ScrollUp),
            key(KeyInput::Escape),
            chat("Ann", "ignored"),
        ];

        assert_eq!(run(&events), run(&events));
    }

    #[test]
    fn transcript_only_grows_and_never_rewrites_lines() {
        let events = vec![
            presence("Ann", true),
            chat("Ann", "one"),
            key(KeyInput::Char('x')),
            presence("Ann", false),
            chat("Bob", "two"),
            AppEvent::InternalError("noise".to_owned()),
        ];

        let mut controller = controller();
        let mut previous: Vec<String> = Vec::new();
        for event in events {
            controller.handle_event(event);
            let current = transcript(&controller);
            assert!(current.len() >= previous.len());
            assert_eq!(&current[..previous.len()], previous.as_slice());
            previous = current;
        }
    }

    #[test]
    fn remote_lines_scroll_transcript_back_to_bottom() {
        let mut controller = controller();
        controller.handle_event(AppEvent::Resize {
            width: 80,
            height: 2,
        });
        for idx in 0..4 {
            controller.handle_event(chat("Ann", &idx.to_string()));
        }
        controller.handle_event(key(KeyInput::ScrollUp));
        assert_eq!(controller.state().scroll_from_bottom(), 1);

        controller.handle_event(presence("Bob", true));

        assert_eq!(controller.state().scroll_from_bottom(), 0);
    }
}
