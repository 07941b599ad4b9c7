//! The chat stream: an append-only ordered log.

/// One chat message as the client saw it arrive.
///
/// `sequence` is assigned locally as the arrival index. It exists for
/// display identity: a rendering layer needs a stable, unique key per
/// message, and two messages must never share one within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// The message text, verbatim.
    pub text: String,

    /// Arrival index, starting at 0, strictly increasing by 1.
    pub sequence: usize,
}

/// An append-only ordered log of chat messages.
///
/// Insertion order is significant and nothing is ever edited or
/// removed. The log is unbounded — bounding it is a production
/// hardening concern that lives outside this core.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message, assigning it the next sequence number.
    /// Returns the assigned sequence.
    pub fn append(&mut self, text: impl Into<String>) -> usize {
        let sequence = self.messages.len();
        self.messages.push(ChatMessage {
            text: text.into(),
            sequence,
        });
        sequence
    }

    /// The messages in arrival order, read-only.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// `true` if nothing has arrived yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
