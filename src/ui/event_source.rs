use std::{
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
    thread::{self, JoinHandle},
    time::Duration,
};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    domain::events::{AppEvent, KeyInput},
    usecases::contracts::AppEventSource,
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);
const INPUT_READER_FAILED: &str = "TERMINAL_INPUT_READER_FAILED";
const INPUT_READER_SHUTDOWN_FAILED: &str = "TERMINAL_INPUT_READER_SHUTDOWN_FAILED";

/// The single ordered inbound queue. Bus subscriptions and the terminal
/// reader only ever enqueue into it.
pub struct ChannelEventSource {
    inbound_rx: Receiver<AppEvent>,
}

impl ChannelEventSource {
    pub fn new(inbound_rx: Receiver<AppEvent>) -> Self {
        Self { inbound_rx }
    }
}

impl AppEventSource for ChannelEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.inbound_rx.recv().ok())
    }
}

/// Background thread translating crossterm events into [`AppEvent`]s.
#[derive(Debug)]
pub struct TerminalInputReader {
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl TerminalInputReader {
    pub fn start(inbound_tx: Sender<AppEvent>) -> Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let worker = thread::Builder::new()
            .name("termchat-input".to_owned())
            .spawn(move || run_reader(inbound_tx, stop_rx))?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        })
    }
}

impl Drop for TerminalInputReader {
    fn drop(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        if let Some(worker) = self.worker.take() {
            if let Err(error) = worker.join() {
                tracing::warn!(
                    code = INPUT_READER_SHUTDOWN_FAILED,
                    error = ?error,
                    "terminal input reader panicked on shutdown"
                );
            }
        }
    }
}

fn run_reader(inbound_tx: Sender<AppEvent>, stop_rx: Receiver<()>) {
    loop {
        match stop_rx.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => return,
            Err(TryRecvError::Empty) => {}
        }

        let read = event::poll(EVENT_POLL_TIMEOUT).and_then(|ready| {
            if ready {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        });

        let app_event = match read {
            Ok(Some(event)) => map_event(event),
            Ok(None) => None,
            Err(error) => {
                tracing::error!(
                    code = INPUT_READER_FAILED,
                    error = %error,
                    "terminal input reader stopped"
                );
                let _ = inbound_tx.send(AppEvent::InternalError(format!(
                    "terminal input failed: {error}"
                )));
                return;
            }
        };

        if let Some(app_event) = app_event {
            if inbound_tx.send(app_event).is_err() {
                return;
            }
        }
    }
}

fn map_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key).map(AppEvent::KeyInput),
        Event::Resize(width, height) => Some(AppEvent::Resize { width, height }),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<KeyInput> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let input = match key.code {
        KeyCode::Char('c') if ctrl => KeyInput::CtrlC,
        KeyCode::Char(_) if ctrl || alt => return None,
        KeyCode::Char(ch) => KeyInput::Char(ch),
        KeyCode::Esc => KeyInput::Escape,
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Left if ctrl || alt => KeyInput::NavigateLeft,
        KeyCode::Right if ctrl || alt => KeyInput::NavigateRight,
        KeyCode::Left => KeyInput::CursorLeft,
        KeyCode::Right => KeyInput::CursorRight,
        KeyCode::Home => KeyInput::Home,
        KeyCode::End => KeyInput::End,
        KeyCode::Backspace => KeyInput::Backspace,
        KeyCode::Delete => KeyInput::Delete,
        KeyCode::PageUp => KeyInput::ScrollUp,
        KeyCode::PageDown => KeyInput::ScrollDown,
        _ => return None,
    };

    Some(input)
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}
