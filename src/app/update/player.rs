mod transitions;

use super::super::state::App;
use super::Effect;
use crate::audio::clamp_fraction;
use crate::transcript::AudioAttachment;
use anyhow::anyhow;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};
use transitions::{PlayerAction, PlayerEvent, transition};

impl App {
    pub(super) fn handle_card_activated(&mut self, card: usize, effects: &mut Vec<Effect>) {
        let Some(source) = self.card_source(card) else {
            debug!(card, "Activation target is not an audio card");
            return;
        };
        let actions = transition(&mut self.player, PlayerEvent::Activated { card, source });
        self.run_player_actions(actions, effects);
    }

    pub(super) fn handle_playback_ready(
        &mut self,
        card: usize,
        request_id: u64,
        duration: Duration,
        effects: &mut Vec<Effect>,
    ) {
        let Some(source) = self.card_source(card) else {
            // The card disappeared while its source was loading.
            let actions = transition(
                &mut self.player,
                PlayerEvent::LoadFailed {
                    card,
                    request_id,
                    error: "card no longer present".to_string(),
                },
            );
            self.run_player_actions(actions, effects);
            return;
        };
        let actions = transition(
            &mut self.player,
            PlayerEvent::LoadSucceeded {
                card,
                request_id,
                source,
                duration,
            },
        );
        self.run_player_actions(actions, effects);
    }

    pub(super) fn handle_playback_failed(
        &mut self,
        card: usize,
        request_id: u64,
        error: String,
        effects: &mut Vec<Effect>,
    ) {
        let actions = transition(
            &mut self.player,
            PlayerEvent::LoadFailed {
                card,
                request_id,
                error,
            },
        );
        self.run_player_actions(actions, effects);
    }

    pub(super) fn handle_scrub_hovered(&mut self, card: usize, fraction: f32) {
        let fraction = clamp_fraction(fraction);
        self.player.hover = Some(super::super::state::DragState { card, fraction });
        if self.player.drag.map(|d| d.card) == Some(card) {
            let actions = transition(&mut self.player, PlayerEvent::ScrubMoved { fraction });
            debug_assert!(actions.is_empty());
        }
    }

    pub(super) fn handle_scrub_pressed(&mut self, card: usize, effects: &mut Vec<Effect>) {
        // The press commits the most recently hovered pointer fraction for
        // this control; a press with no recorded hover has no position.
        let Some(hover) = self.player.hover.filter(|h| h.card == card) else {
            debug!(card, "Scrub press with no hover position");
            return;
        };
        let actions = transition(
            &mut self.player,
            PlayerEvent::ScrubPressed {
                card,
                fraction: hover.fraction,
            },
        );
        self.run_player_actions(actions, effects);
    }

    pub(super) fn handle_pointer_released(&mut self, effects: &mut Vec<Effect>) {
        if self.player.drag.is_none() {
            return;
        }
        let actions = transition(&mut self.player, PlayerEvent::ScrubReleased);
        self.run_player_actions(actions, effects);
    }

    /// Frame-paced playback bookkeeping: progress refresh and natural-end
    /// detection. Skipped while a drag owns the visual position.
    pub(super) fn poll_playback(&mut self, effects: &mut Vec<Effect>) {
        if !self.player.is_playing() {
            return;
        }
        let Some(audio) = &self.player.audio else {
            return;
        };

        if audio.is_drained() {
            let actions = transition(&mut self.player, PlayerEvent::Drained);
            self.run_player_actions(actions, effects);
            return;
        }

        if self.player.drag.is_none() {
            self.player.progress = audio.progress();
        }
    }

    fn card_source(&self, card: usize) -> Option<PathBuf> {
        self.conversation
            .messages
            .get(card)
            .and_then(|message| message.audio_attachment())
            .map(|attachment: &AudioAttachment| attachment.source.clone())
    }

    fn run_player_actions(&mut self, actions: Vec<PlayerAction>, effects: &mut Vec<Effect>) {
        for action in actions {
            match action {
                PlayerAction::ResetResource => {
                    if let Some(audio) = &mut self.player.audio {
                        audio.reset();
                    }
                }
                PlayerAction::BeginLoad {
                    card,
                    source,
                    request_id,
                } => effects.push(Effect::PreparePlayback {
                    card,
                    source,
                    request_id,
                }),
                PlayerAction::StartResource { source } => {
                    let result = self
                        .player
                        .audio
                        .as_mut()
                        .ok_or_else(|| anyhow!("No audio output device"))
                        .and_then(|audio| audio.load(&source));
                    match result {
                        Ok(duration) => {
                            // The decoder's duration is authoritative over the
                            // earlier probe.
                            self.player.duration = duration;
                        }
                        Err(err) => {
                            warn!(source = %source.display(), "Failed to start playback: {err:#}");
                            let follow_up = transition(
                                &mut self.player,
                                PlayerEvent::PlaybackError {
                                    error: format!("{err:#}"),
                                },
                            );
                            self.run_player_actions(follow_up, effects);
                        }
                    }
                }
                PlayerAction::Resume => {
                    if let Some(audio) = &self.player.audio {
                        audio.play();
                    }
                }
                PlayerAction::Pause => {
                    if let Some(audio) = &self.player.audio {
                        audio.pause();
                    }
                }
                PlayerAction::SeekTo { fraction } => {
                    if let Some(audio) = &self.player.audio {
                        if let Err(err) = audio.seek_to_fraction(fraction) {
                            warn!(fraction, "Seek failed: {err:#}");
                        }
                    }
                }
                PlayerAction::Notify(body) => self.push_toast(body),
            }
        }
    }
}
