use super::super::messages::ToolButton;
use super::super::state::App;
use crate::config::ThemeMode;
use crate::transcript::MessageBody;
use iced::keyboard::{Key, Modifiers, key::Named};
use std::time::Instant;
use tracing::debug;

impl App {
    pub(super) fn handle_tool_pressed(&mut self, tool: ToolButton) {
        debug!(?tool, "Tool button pressed");
        self.push_toast(tool.unavailable_notice());
    }

    pub(super) fn handle_photo_clicked(&mut self, index: usize) {
        let is_photo = self
            .conversation
            .messages
            .get(index)
            .map(|message| matches!(message.body, MessageBody::Photo { .. }))
            .unwrap_or(false);
        if is_photo {
            debug!(index, "Opening lightbox");
            self.ui.lightbox = Some(index);
        }
    }

    pub(super) fn handle_lightbox_dismissed(&mut self) {
        self.ui.lightbox = None;
    }

    pub(super) fn handle_toast_dismissed(&mut self, id: u64) {
        self.ui.dismiss_toast(id);
    }

    pub(super) fn handle_toggle_theme(&mut self) {
        self.config.theme = match self.config.theme {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        };
    }

    pub(super) fn prune_toasts(&mut self, now: Instant) {
        self.ui.prune_expired_toasts(now);
    }

    pub(super) fn handle_key_pressed(&mut self, key: Key, _modifiers: Modifiers) {
        if let Key::Named(Named::Escape) = key {
            if self.ui.lightbox.is_some() {
                self.ui.lightbox = None;
            } else {
                self.handle_input_blurred();
            }
        }
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

    fn photo_index(app: &App) -> usize {
        app.conversation
            .messages
            .iter()
            .position(|m| matches!(m.body, MessageBody::Photo { .. }))
            .expect("seed contains a photo")
    }

    #[test]
    fn lightbox_opens_only_for_photo_messages() {
        let mut app = build_test_app();
        app.handle_photo_clicked(0);
        assert_eq!(app.ui.lightbox, None);

        let photo = photo_index(&app);
        app.handle_photo_clicked(photo);
        assert_eq!(app.ui.lightbox, Some(photo));
    }

    #[test]
    fn escape_closes_the_lightbox_before_the_keyboard() {
        let mut app = build_test_app();
        let photo = photo_index(&app);
        app.layout.input_focused = true;
        app.ui.lightbox = Some(photo);

        app.handle_key_pressed(Key::Named(Named::Escape), Modifiers::default());
        assert_eq!(app.ui.lightbox, None);
        assert!(app.layout.input_focused);

        app.handle_key_pressed(Key::Named(Named::Escape), Modifiers::default());
        assert!(!app.layout.input_focused);
    }

    #[test]
    fn tool_buttons_surface_a_toast() {
        let mut app = build_test_app();
        app.handle_tool_pressed(ToolButton::Voice);
        assert_eq!(app.ui.toasts.len(), 1);
    }
}
