use super::{
    message_input_state::MessageInputState,
    roster::PresenceRoster,
    transcript::{TranscriptBuffer, TranscriptLine},
};

const DEFAULT_VIEWPORT: (u16, u16) = (80, 24);
/// Status bar, input box and the transcript pane's own borders.
const TRANSCRIPT_CHROME_ROWS: u16 = 6;

/// Which pane gets emphasized rendering. Never gates event processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Unfocused,
    ChatFocused,
    UserListFocused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionPhase {
    Running,
    Quitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    self_name: String,
    phase: SessionPhase,
    roster: PresenceRoster,
    transcript: TranscriptBuffer,
    input: MessageInputState,
    focus: FocusState,
    last_error: Option<String>,
    viewport: (u16, u16),
    /// Transcript lines hidden below the viewport; 0 means pinned to bottom.
    scroll_from_bottom: usize,
    pending_echo: Option<String>,
}

impl SessionState {
    pub fn new(self_name: impl Into<String>) -> Self {
        Self {
            self_name: self_name.into(),
            phase: SessionPhase::Running,
            roster: PresenceRoster::default(),
            transcript: TranscriptBuffer::default(),
            input: MessageInputState::default(),
            focus: FocusState::default(),
            last_error: None,
            viewport: DEFAULT_VIEWPORT,
            scroll_from_bottom: 0,
            pending_echo: None,
        }
    }

    pub fn self_name(&self) -> &str {
        &self.self_name
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn quit(&mut self) {
        self.phase = SessionPhase::Quitting;
    }

    pub fn roster(&self) -> &PresenceRoster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut PresenceRoster {
        &mut self.roster
    }

    pub fn transcript(&self) -> &TranscriptBuffer {
        &self.transcript
    }

    /// Appends a line and scrolls the viewport back to the bottom.
    pub fn append_line(&mut self, line: TranscriptLine) {
        self.transcript.append(line);
        self.scroll_from_bottom = 0;
    }

    pub fn input(&self) -> &MessageInputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut MessageInputState {
        &mut self.input
    }

    pub fn focus(&self) -> FocusState {
        self.focus
    }

    pub fn set_focus(&mut self, focus: FocusState) {
        self.focus = focus;
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_last_error(&mut self, error: String) {
        self.last_error = Some(error);
    }

    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        self.scroll_from_bottom = self.scroll_from_bottom.min(self.max_scroll());
    }

    /// Rows the transcript pane shows for the current viewport.
    pub fn transcript_rows(&self) -> usize {
        usize::from(self.viewport.1.saturating_sub(TRANSCRIPT_CHROME_ROWS)).max(1)
    }

    /// Largest useful offset: the first line sits at the top of the pane.
    pub fn max_scroll(&self) -> usize {
        self.transcript.len().saturating_sub(self.transcript_rows())
    }

    pub fn scroll_from_bottom(&self) -> usize {
        self.scroll_from_bottom
    }

    /// Half the transcript pane, at least one line.
    fn scroll_page(&self) -> usize {
        (self.transcript_rows() / 2).max(1)
    }

    pub fn scroll_up(&mut self) {
        self.scroll_from_bottom =
            (self.scroll_from_bottom + self.scroll_page()).min(self.max_scroll());
    }

    pub fn scroll_down(&mut self) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(self.scroll_page());
    }

    pub fn pending_echo(&self) -> Option<&str> {
        self.pending_echo.as_deref()
    }

    pub fn set_pending_echo(&mut self, body: Option<String>) {
        self.pending_echo = body;
    }
}
