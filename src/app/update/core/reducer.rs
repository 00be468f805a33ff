use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use std::time::Instant;

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::DraftChanged(draft) => self.handle_draft_changed(draft, &mut effects),
            Message::SendDraft => self.handle_send_draft(),
            Message::ToolPressed(tool) => self.handle_tool_pressed(tool),
            Message::InputFocused => self.handle_input_focused(&mut effects),
            Message::InputBlurred => self.handle_input_blurred(),
            Message::CardActivated(card) => self.handle_card_activated(card, &mut effects),
            Message::PlaybackReady {
                card,
                request_id,
                duration,
            } => self.handle_playback_ready(card, request_id, duration, &mut effects),
            Message::PlaybackFailed {
                card,
                request_id,
                error,
            } => self.handle_playback_failed(card, request_id, error, &mut effects),
            Message::ScrubHovered { card, fraction } => self.handle_scrub_hovered(card, fraction),
            Message::ScrubPressed { card } => self.handle_scrub_pressed(card, &mut effects),
            Message::PointerReleased => self.handle_pointer_released(&mut effects),
            Message::PhotoClicked(index) => self.handle_photo_clicked(index),
            Message::LightboxDismissed => self.handle_lightbox_dismissed(),
            Message::ToggleTheme => self.handle_toggle_theme(),
            Message::ToastDismissed(id) => self.handle_toast_dismissed(id),
            Message::WindowResized { width, height } => self.handle_window_resized(width, height),
            Message::KeyPressed { key, modifiers } => self.handle_key_pressed(key, modifiers),
            Message::Scrolled {
                offset,
                viewport_height,
                content_height,
            } => self.handle_scrolled(offset, viewport_height, content_height),
            Message::Tick(now) => self.handle_tick(now, &mut effects),
        }

        effects
    }

    fn handle_tick(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        self.run_due_scroll(now, effects);
        self.run_scroll_animation(now, effects);
        self.poll_playback(effects);
        self.deliver_due_reply(now);
        self.prune_toasts(now);
    }
}
