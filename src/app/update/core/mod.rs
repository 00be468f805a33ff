mod reducer;
mod runtime;

use super::super::messages::Message;
use super::super::state::{App, TICK_INTERVAL_MS};
use iced::event;
use iced::time;
use iced::{Subscription, Task};
use std::time::Duration;

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions: Vec<Subscription<Message>> =
            vec![event::listen_with(runtime::runtime_event_to_message)];

        if app.needs_tick() {
            subscriptions.push(
                time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick),
            );
        }

        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }

    /// The frame-paced loop runs only while something needs it; there is a
    /// single loop instance at most.
    fn needs_tick(&self) -> bool {
        self.player.is_playing()
            || self.layout.animation.is_some()
            || self.layout.pending_scroll.is_some()
            || self.conversation.pending_reply.is_some()
            || !self.ui.toasts.is_empty()
    }
}
