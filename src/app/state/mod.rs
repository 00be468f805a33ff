mod constants;
mod conversation;
mod layout;
mod player;
mod ui;

use crate::audio::AudioPlayer;
use crate::config::AppConfig;
use crate::transcript::{ChatMessage, MessageBody};
use iced::Task;
use iced::widget::image;
use iced::widget::scrollable::RelativeOffset;
use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::messages::Message;

pub(crate) use constants::*;
pub(in crate::app) use conversation::ConversationState;
pub(in crate::app) use layout::{LayoutState, PendingScroll, ScrollAnimation, ViewportFrame};
pub(in crate::app) use player::{DragState, PlayerLifecycle, PlayerState};
pub(in crate::app) use ui::UiState;

/// Core application state composed of sub-models.
pub struct App {
    pub(super) conversation: ConversationState,
    pub(super) layout: LayoutState,
    pub(super) player: PlayerState,
    pub(super) ui: UiState,
    pub(super) config: AppConfig,
    pub(super) peer_avatar: Option<image::Handle>,
    pub(super) own_avatar: Option<image::Handle>,
    /// Decoded handles for photo messages, keyed by message index; `None`
    /// marks a photo whose file is missing on disk.
    pub(super) photo_handles: HashMap<usize, Option<image::Handle>>,
}

impl App {
    pub(super) fn bootstrap(
        messages: Vec<ChatMessage>,
        config: AppConfig,
    ) -> (App, Task<Message>) {
        let audio = match AudioPlayer::new() {
            Ok(player) => Some(player),
            Err(err) => {
                warn!("Audio output unavailable; cards will surface errors: {err:#}");
                None
            }
        };

        let peer_avatar = avatar_handle(&config.peer_avatar);
        let own_avatar = avatar_handle(&config.own_avatar);
        let photo_handles = index_photo_handles(&messages);

        let mut app = App {
            conversation: ConversationState::new(messages),
            layout: LayoutState::new(config.window_width, config.window_height),
            player: PlayerState::new(audio),
            ui: UiState::new(),
            peer_avatar,
            own_avatar,
            photo_handles,
            config,
        };

        app.reconcile_layout();
        // First paint must land on the latest message without an animated
        // scroll from the top: jump immediately, then re-settle once real
        // geometry has been reported.
        app.request_scroll(false);
        info!(
            messages = app.conversation.messages.len(),
            list_height = app.layout.frame.list_height,
            "Initialized chat state"
        );

        let task = iced::widget::scrollable::snap_to(LIST_SCROLL_ID.clone(), RelativeOffset::END);
        (app, task)
    }

    pub(super) fn push_toast(&mut self, body: impl Into<String>) {
        let expires_at = Instant::now() + Duration::from_millis(self.config.toast_duration_ms);
        self.ui.push_toast(body, expires_at);
    }
}

fn avatar_handle(path: &str) -> Option<image::Handle> {
    let path = Path::new(path);
    if path.exists() {
        Some(image::Handle::from_path(path))
    } else {
        // Missing avatars degrade to an initial placeholder in the view.
        None
    }
}

fn index_photo_handles(messages: &[ChatMessage]) -> HashMap<usize, Option<image::Handle>> {
    messages
        .iter()
        .enumerate()
        .filter_map(|(idx, message)| match &message.body {
            MessageBody::Photo { source, .. } => {
                let handle = if source.exists() {
                    Some(image::Handle::from_path(source))
                } else {
                    warn!(source = %source.display(), "Photo file missing; rendering placeholder");
                    None
                };
                Some((idx, handle))
            }
            _ => None,
        })
        .collect()
}
