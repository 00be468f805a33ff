use crate::transcript::ChatMessage;
use std::time::Instant;

/// Conversation model: the message list plus the draft under composition.
pub struct ConversationState {
    pub(in crate::app) messages: Vec<ChatMessage>,
    pub(in crate::app) draft: String,
    /// When a simulated reply is due to arrive.
    pub(in crate::app) pending_reply: Option<Instant>,
}

impl ConversationState {
    pub(in crate::app) fn new(messages: Vec<ChatMessage>) -> Self {
        ConversationState {
            messages,
            draft: String::new(),
            pending_reply: None,
        }
    }

    pub(in crate::app) fn trimmed_draft(&self) -> &str {
        self.draft.trim()
    }

    pub(in crate::app) fn can_send(&self) -> bool {
        !self.trimmed_draft().is_empty()
    }
}
