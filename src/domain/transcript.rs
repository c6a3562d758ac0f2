//! Append-only log of chat and presence lines.
//!
//! Lines are never removed or reordered, so the buffer grows for the lifetime
//! of the session.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Chat { sender: String },
    Presence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub kind: LineKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranscriptBuffer {
    lines: Vec<TranscriptLine>,
}

impl TranscriptBuffer {
    pub fn append(&mut self, line: TranscriptLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Joins every line in arrival order with newlines.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
