use crate::audio::AudioPlayer;
use std::time::Duration;

/// Lifecycle of the shared playback resource. At most one card index is ever
/// referenced, so the "one playing card" rule holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerLifecycle {
    Idle,
    Starting { card: usize, request_id: u64 },
    Playing { card: usize },
    Paused { card: usize },
}

/// An active pointer-drag on a progress control. Exists only between
/// pointer-down and pointer-up; there is no timeout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub(in crate::app) card: usize,
    pub(in crate::app) fraction: f32,
}

/// Runtime player model (tunables live in `AppConfig`).
pub struct PlayerState {
    /// The owned playback resource; `None` when no output device exists.
    pub(in crate::app) audio: Option<AudioPlayer>,
    pub(in crate::app) lifecycle: PlayerLifecycle,
    pub(in crate::app) request_id: u64,
    pub(in crate::app) duration: Duration,
    /// Last rendered playback fraction, `[0, 1]`.
    pub(in crate::app) progress: f32,
    pub(in crate::app) drag: Option<DragState>,
    /// Pointer fraction most recently hovered over a progress control; a
    /// press commits it.
    pub(in crate::app) hover: Option<DragState>,
}

impl PlayerState {
    pub(in crate::app) fn new(audio: Option<AudioPlayer>) -> Self {
        PlayerState {
            audio,
            lifecycle: PlayerLifecycle::Idle,
            request_id: 0,
            duration: Duration::ZERO,
            progress: 0.0,
            drag: None,
            hover: None,
        }
    }

    pub(in crate::app) fn active_card(&self) -> Option<usize> {
        match self.lifecycle {
            PlayerLifecycle::Idle => None,
            PlayerLifecycle::Starting { card, .. }
            | PlayerLifecycle::Playing { card }
            | PlayerLifecycle::Paused { card } => Some(card),
        }
    }

    pub(in crate::app) fn is_playing(&self) -> bool {
        matches!(self.lifecycle, PlayerLifecycle::Playing { .. })
    }

    pub(in crate::app) fn card_is_playing(&self, card: usize) -> bool {
        matches!(self.lifecycle, PlayerLifecycle::Playing { card: c } if c == card)
    }

    /// The fraction shown on the given card's progress control. A drag owns
    /// the visual position for its card; otherwise only the active card shows
    /// playback progress.
    pub(in crate::app) fn display_fraction(&self, card: usize) -> f32 {
        if let Some(drag) = &self.drag {
            if drag.card == card {
                return drag.fraction;
            }
        }
        if self.active_card() == Some(card) {
            self.progress
        } else {
            0.0
        }
    }

    pub(in crate::app) fn clear_transient_playback_state(&mut self) {
        self.duration = Duration::ZERO;
        self.progress = 0.0;
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_most_one_card_is_ever_active() {
        let mut player = PlayerState::new(None);
        assert_eq!(player.active_card(), None);

        player.lifecycle = PlayerLifecycle::Playing { card: 3 };
        assert!(player.card_is_playing(3));
        assert!(!player.card_is_playing(4));

        player.lifecycle = PlayerLifecycle::Paused { card: 5 };
        assert_eq!(player.active_card(), Some(5));
        assert!(!player.card_is_playing(3));
    }

    #[test]
    fn drag_owns_the_displayed_fraction() {
        let mut player = PlayerState::new(None);
        player.lifecycle = PlayerLifecycle::Playing { card: 1 };
        player.progress = 0.8;
        player.drag = Some(DragState {
            card: 1,
            fraction: 0.25,
        });
        assert_eq!(player.display_fraction(1), 0.25);
        assert_eq!(player.display_fraction(2), 0.0);
    }

    #[test]
    fn inactive_cards_show_zero_progress() {
        let mut player = PlayerState::new(None);
        player.lifecycle = PlayerLifecycle::Playing { card: 0 };
        player.progress = 0.6;
        assert_eq!(player.display_fraction(0), 0.6);
        assert_eq!(player.display_fraction(7), 0.0);
    }
}
