use super::super::state::App;
use super::Effect;
use crate::transcript::{ChatMessage, REPLY_POOL, Sender};
use chrono::Local;
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};
use tracing::{debug, info};

impl App {
    pub(super) fn handle_draft_changed(&mut self, draft: String, effects: &mut Vec<Effect>) {
        self.conversation.draft = draft;
        if self.layout.input_focused {
            // Keep the last message visible while the draft grows.
            self.request_layout(true);
        } else {
            // Typing into the field is what summons the keyboard.
            self.handle_input_focused(effects);
        }
    }

    pub(super) fn handle_send_draft(&mut self) {
        let body = self.conversation.trimmed_draft().to_string();
        if body.is_empty() {
            return;
        }
        self.conversation.draft.clear();
        info!(chars = body.len(), "Sending message");
        self.append_message(ChatMessage::text(Sender::Me, body, Local::now()));
        self.schedule_reply();
    }

    pub(super) fn append_message(&mut self, message: ChatMessage) {
        self.conversation.messages.push(message);
        self.request_layout(true);
    }

    fn schedule_reply(&mut self) {
        let lo = self.config.reply_delay_min_ms.min(self.config.reply_delay_max_ms);
        let hi = self.config.reply_delay_min_ms.max(self.config.reply_delay_max_ms);
        let delay = rand::thread_rng().gen_range(lo..=hi);
        debug!(delay_ms = delay, "Scheduled simulated reply");
        self.conversation.pending_reply = Some(Instant::now() + Duration::from_millis(delay));
    }

    pub(super) fn deliver_due_reply(&mut self, now: Instant) {
        let Some(due_at) = self.conversation.pending_reply else {
            return;
        };
        if now < due_at {
            return;
        }
        self.conversation.pending_reply = None;

        let reply = REPLY_POOL
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("👍");
        info!(reply, "Delivering simulated reply");
        self.append_message(ChatMessage::text(Sender::Peer, reply, Local::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::transcript::seed_transcript;

    fn build_test_app() -> App {
        let (app, _task) = App::bootstrap(seed_transcript(), AppConfig::default());
        app
    }

    #[test]
    fn whitespace_drafts_are_not_sent() {
        let mut app = build_test_app();
        let before = app.conversation.messages.len();
        app.conversation.draft = "   ".to_string();
        app.handle_send_draft();
        assert_eq!(app.conversation.messages.len(), before);
        assert!(app.conversation.pending_reply.is_none());
    }

    #[test]
    fn sending_appends_and_schedules_a_reply() {
        let mut app = build_test_app();
        let before = app.conversation.messages.len();
        app.conversation.draft = "  hello there  ".to_string();
        app.handle_send_draft();

        assert_eq!(app.conversation.messages.len(), before + 1);
        assert!(app.conversation.draft.is_empty());
        assert!(app.conversation.pending_reply.is_some());
        assert!(app.layout.pending_scroll.is_some());
        match &app.conversation.messages.last().unwrap().body {
            crate::transcript::MessageBody::Text(body) => assert_eq!(body, "hello there"),
            other => panic!("expected a text message, got {other:?}"),
        }
    }

    #[test]
    fn due_reply_arrives_once() {
        let mut app = build_test_app();
        app.conversation.draft = "ping".to_string();
        app.handle_send_draft();
        let before = app.conversation.messages.len();

        let long_after = Instant::now() + Duration::from_secs(60);
        app.deliver_due_reply(long_after);
        assert_eq!(app.conversation.messages.len(), before + 1);
        assert_eq!(
            app.conversation.messages.last().unwrap().sender,
            Sender::Peer
        );

        app.deliver_due_reply(long_after);
        assert_eq!(app.conversation.messages.len(), before + 1);
    }
}
