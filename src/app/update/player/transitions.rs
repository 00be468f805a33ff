use super::super::super::state::{DragState, PlayerLifecycle, PlayerState};
use crate::audio::clamp_fraction;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Everything that can happen to the playback state machine.
#[derive(Debug)]
pub(super) enum PlayerEvent {
    Activated {
        card: usize,
        source: PathBuf,
    },
    LoadSucceeded {
        card: usize,
        request_id: u64,
        source: PathBuf,
        duration: Duration,
    },
    LoadFailed {
        card: usize,
        request_id: u64,
        error: String,
    },
    /// The resource refused to start or resume after a successful load.
    PlaybackError {
        error: String,
    },
    /// The queued source played to its natural end.
    Drained,
    ScrubPressed {
        card: usize,
        fraction: f32,
    },
    ScrubMoved {
        fraction: f32,
    },
    ScrubReleased,
}

/// Work the transition asks the caller to perform against the audio resource
/// or the surrounding app. Order matters: a switch resets the old card before
/// anything touches the new one.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum PlayerAction {
    ResetResource,
    BeginLoad {
        card: usize,
        source: PathBuf,
        request_id: u64,
    },
    StartResource {
        source: PathBuf,
    },
    Resume,
    Pause,
    SeekTo {
        fraction: f32,
    },
    Notify(String),
}

pub(super) fn transition(player: &mut PlayerState, event: PlayerEvent) -> Vec<PlayerAction> {
    match event {
        PlayerEvent::Activated { card, source } => on_activated(player, card, source),
        PlayerEvent::LoadSucceeded {
            card,
            request_id,
            source,
            duration,
        } => on_load_succeeded(player, card, request_id, source, duration),
        PlayerEvent::LoadFailed {
            card,
            request_id,
            error,
        } => on_load_failed(player, card, request_id, error),
        PlayerEvent::PlaybackError { error } => on_playback_error(player, error),
        PlayerEvent::Drained => on_drained(player),
        PlayerEvent::ScrubPressed { card, fraction } => on_scrub_pressed(player, card, fraction),
        PlayerEvent::ScrubMoved { fraction } => on_scrub_moved(player, fraction),
        PlayerEvent::ScrubReleased => on_scrub_released(player),
    }
}

fn on_activated(player: &mut PlayerState, card: usize, source: PathBuf) -> Vec<PlayerAction> {
    match player.lifecycle {
        PlayerLifecycle::Playing { card: active } if active == card => {
            debug!(card, "Pausing active card");
            player.lifecycle = PlayerLifecycle::Paused { card };
            vec![PlayerAction::Pause]
        }
        PlayerLifecycle::Paused { card: active } if active == card => {
            debug!(card, "Resuming active card");
            player.lifecycle = PlayerLifecycle::Playing { card };
            vec![PlayerAction::Resume]
        }
        PlayerLifecycle::Starting { card: active, .. } if active == card => {
            debug!(card, "Ignoring duplicate activation while loading");
            Vec::new()
        }
        _ => {
            // A different card (or none) holds the resource: fully reset the
            // old card's playback before the new one is touched.
            player.clear_transient_playback_state();
            player.request_id = player.request_id.wrapping_add(1);
            let request_id = player.request_id;
            player.lifecycle = PlayerLifecycle::Starting { card, request_id };
            info!(card, request_id, source = %source.display(), "Activating card");
            vec![
                PlayerAction::ResetResource,
                PlayerAction::BeginLoad {
                    card,
                    source,
                    request_id,
                },
            ]
        }
    }
}

fn on_load_succeeded(
    player: &mut PlayerState,
    card: usize,
    request_id: u64,
    source: PathBuf,
    duration: Duration,
) -> Vec<PlayerAction> {
    if !load_is_current(player, card, request_id) {
        debug!(
            card,
            request_id,
            current = player.request_id,
            "Ignoring stale load result"
        );
        return Vec::new();
    }

    player.lifecycle = PlayerLifecycle::Playing { card };
    player.duration = duration;
    player.progress = 0.0;
    info!(card, duration_ms = duration.as_millis(), "Playback starting");
    vec![PlayerAction::StartResource { source }]
}

fn on_load_failed(
    player: &mut PlayerState,
    card: usize,
    request_id: u64,
    error: String,
) -> Vec<PlayerAction> {
    if !load_is_current(player, card, request_id) {
        debug!(card, request_id, "Ignoring stale load failure");
        return Vec::new();
    }
    on_playback_error(player, error)
}

fn on_playback_error(player: &mut PlayerState, error: String) -> Vec<PlayerAction> {
    info!(%error, "Playback failed; returning to idle");
    player.lifecycle = PlayerLifecycle::Idle;
    player.clear_transient_playback_state();
    vec![
        PlayerAction::ResetResource,
        PlayerAction::Notify("Could not play this audio".to_string()),
    ]
}

fn on_drained(player: &mut PlayerState) -> Vec<PlayerAction> {
    if !matches!(player.lifecycle, PlayerLifecycle::Playing { .. }) {
        return Vec::new();
    }
    debug!("Playback reached its natural end");
    player.lifecycle = PlayerLifecycle::Idle;
    player.clear_transient_playback_state();
    vec![PlayerAction::ResetResource]
}

fn on_scrub_pressed(player: &mut PlayerState, card: usize, fraction: f32) -> Vec<PlayerAction> {
    if player.active_card() != Some(card) {
        debug!(card, "Ignoring scrub on an inactive card");
        return Vec::new();
    }

    let fraction = clamp_fraction(fraction);
    player.drag = Some(DragState { card, fraction });
    // A plain click is a drag that never moves: seek right away so the press
    // itself repositions playback.
    vec![PlayerAction::SeekTo { fraction }]
}

fn on_scrub_moved(player: &mut PlayerState, fraction: f32) -> Vec<PlayerAction> {
    if let Some(drag) = &mut player.drag {
        // Visual update only; the resource is not seeked until release.
        drag.fraction = clamp_fraction(fraction);
    }
    Vec::new()
}

fn on_scrub_released(player: &mut PlayerState) -> Vec<PlayerAction> {
    let Some(drag) = player.drag.take() else {
        return Vec::new();
    };
    player.progress = drag.fraction;
    debug!(fraction = drag.fraction, "Drag finished; committing seek");
    vec![PlayerAction::SeekTo {
        fraction: drag.fraction,
    }]
}

fn load_is_current(player: &PlayerState, card: usize, request_id: u64) -> bool {
    matches!(
        player.lifecycle,
        PlayerLifecycle::Starting {
            card: active,
            request_id: active_request,
        } if active == card && active_request == request_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerState {
        PlayerState::new(None)
    }

    fn source(name: &str) -> PathBuf {
        PathBuf::from(format!("assets/audio/{name}.ogg"))
    }

    fn activate(player: &mut PlayerState, card: usize) -> Vec<PlayerAction> {
        transition(
            player,
            PlayerEvent::Activated {
                card,
                source: source("track"),
            },
        )
    }

    fn finish_load(player: &mut PlayerState, card: usize) -> Vec<PlayerAction> {
        let request_id = match player.lifecycle {
            PlayerLifecycle::Starting { request_id, .. } => request_id,
            other => panic!("expected a load in flight, got {other:?}"),
        };
        transition(
            player,
            PlayerEvent::LoadSucceeded {
                card,
                request_id,
                source: source("track"),
                duration: Duration::from_secs(120),
            },
        )
    }

    #[test]
    fn idle_activation_begins_a_load() {
        let mut player = player();
        let actions = activate(&mut player, 2);
        assert!(matches!(
            player.lifecycle,
            PlayerLifecycle::Starting { card: 2, .. }
        ));
        assert_eq!(actions[0], PlayerAction::ResetResource);
        assert!(matches!(
            actions[1],
            PlayerAction::BeginLoad { card: 2, .. }
        ));
    }

    #[test]
    fn successful_load_starts_playback() {
        let mut player = player();
        activate(&mut player, 2);
        let actions = finish_load(&mut player, 2);
        assert_eq!(player.lifecycle, PlayerLifecycle::Playing { card: 2 });
        assert_eq!(player.duration, Duration::from_secs(120));
        assert_eq!(player.progress, 0.0);
        assert!(matches!(actions[0], PlayerAction::StartResource { .. }));
    }

    #[test]
    fn same_card_toggles_pause_and_resume() {
        let mut player = player();
        activate(&mut player, 1);
        finish_load(&mut player, 1);

        let actions = activate(&mut player, 1);
        assert_eq!(player.lifecycle, PlayerLifecycle::Paused { card: 1 });
        assert_eq!(actions, vec![PlayerAction::Pause]);

        let actions = activate(&mut player, 1);
        assert_eq!(player.lifecycle, PlayerLifecycle::Playing { card: 1 });
        assert_eq!(actions, vec![PlayerAction::Resume]);
    }

    #[test]
    fn switching_cards_resets_before_loading() {
        let mut player = player();
        activate(&mut player, 1);
        finish_load(&mut player, 1);

        let actions = activate(&mut player, 2);
        // The old card's resource is torn down before the new load starts.
        assert_eq!(actions[0], PlayerAction::ResetResource);
        assert!(matches!(
            actions[1],
            PlayerAction::BeginLoad { card: 2, .. }
        ));
        assert_eq!(player.active_card(), Some(2));
        assert!(!player.card_is_playing(1));
    }

    #[test]
    fn stale_load_results_cannot_resurrect_old_cards() {
        let mut player = player();
        activate(&mut player, 1);
        let old_request = match player.lifecycle {
            PlayerLifecycle::Starting { request_id, .. } => request_id,
            _ => unreachable!(),
        };

        activate(&mut player, 2);
        let actions = transition(
            &mut player,
            PlayerEvent::LoadSucceeded {
                card: 1,
                request_id: old_request,
                source: source("stale"),
                duration: Duration::from_secs(30),
            },
        );
        assert!(actions.is_empty());
        assert_eq!(player.active_card(), Some(2));
    }

    #[test]
    fn duplicate_activation_while_loading_is_ignored() {
        let mut player = player();
        activate(&mut player, 1);
        let request_before = player.request_id;
        let actions = activate(&mut player, 1);
        assert!(actions.is_empty());
        assert_eq!(player.request_id, request_before);
    }

    #[test]
    fn natural_end_returns_to_idle_with_position_reset() {
        let mut player = player();
        activate(&mut player, 1);
        finish_load(&mut player, 1);
        player.progress = 0.97;

        let actions = transition(&mut player, PlayerEvent::Drained);
        assert_eq!(player.lifecycle, PlayerLifecycle::Idle);
        assert_eq!(player.progress, 0.0);
        assert_eq!(player.active_card(), None);
        assert_eq!(actions, vec![PlayerAction::ResetResource]);
    }

    #[test]
    fn error_notifies_and_recovers_to_a_usable_idle() {
        let mut player = player();
        activate(&mut player, 1);
        let request_id = player.request_id;
        let actions = transition(
            &mut player,
            PlayerEvent::LoadFailed {
                card: 1,
                request_id,
                error: "decode failure".to_string(),
            },
        );
        assert_eq!(player.lifecycle, PlayerLifecycle::Idle);
        assert!(actions.iter().any(|a| matches!(a, PlayerAction::Notify(_))));

        // The controller must keep working afterwards.
        let actions = activate(&mut player, 3);
        assert!(matches!(
            actions[1],
            PlayerAction::BeginLoad { card: 3, .. }
        ));
    }

    #[test]
    fn press_performs_a_one_shot_seek_and_opens_a_drag() {
        let mut player = player();
        activate(&mut player, 1);
        finish_load(&mut player, 1);

        let actions = transition(
            &mut player,
            PlayerEvent::ScrubPressed {
                card: 1,
                fraction: 0.3,
            },
        );
        assert_eq!(actions, vec![PlayerAction::SeekTo { fraction: 0.3 }]);
        assert!(player.drag.is_some());
    }

    #[test]
    fn drag_moves_update_the_visual_only() {
        let mut player = player();
        activate(&mut player, 1);
        finish_load(&mut player, 1);
        transition(
            &mut player,
            PlayerEvent::ScrubPressed {
                card: 1,
                fraction: 0.0,
            },
        );

        let actions = transition(&mut player, PlayerEvent::ScrubMoved { fraction: 0.4 });
        assert!(actions.is_empty());
        assert_eq!(player.drag.map(|d| d.fraction), Some(0.4));
    }

    #[test]
    fn release_commits_the_final_seek() {
        let mut player = player();
        activate(&mut player, 1);
        finish_load(&mut player, 1);
        transition(
            &mut player,
            PlayerEvent::ScrubPressed {
                card: 1,
                fraction: 0.0,
            },
        );
        transition(&mut player, PlayerEvent::ScrubMoved { fraction: 0.5 });

        let actions = transition(&mut player, PlayerEvent::ScrubReleased);
        assert_eq!(actions, vec![PlayerAction::SeekTo { fraction: 0.5 }]);
        assert!(player.drag.is_none());
        assert_eq!(player.progress, 0.5);
        // For a 120s track the committed position is 60s.
        assert_eq!(
            crate::audio::fraction_to_position(0.5, player.duration),
            Duration::from_secs(60)
        );
    }

    #[test]
    fn scrub_fractions_clamp_to_the_track() {
        let mut player = player();
        activate(&mut player, 1);
        finish_load(&mut player, 1);
        transition(
            &mut player,
            PlayerEvent::ScrubPressed {
                card: 1,
                fraction: -2.0,
            },
        );
        assert_eq!(player.drag.map(|d| d.fraction), Some(0.0));
        transition(&mut player, PlayerEvent::ScrubMoved { fraction: 9.0 });
        assert_eq!(player.drag.map(|d| d.fraction), Some(1.0));
    }

    #[test]
    fn scrubs_on_inactive_cards_are_ignored() {
        let mut player = player();
        activate(&mut player, 1);
        finish_load(&mut player, 1);
        let actions = transition(
            &mut player,
            PlayerEvent::ScrubPressed {
                card: 7,
                fraction: 0.5,
            },
        );
        assert!(actions.is_empty());
        assert!(player.drag.is_none());
    }

    #[test]
    fn only_one_card_reports_playing_across_activations() {
        let mut player = player();
        for card in [0usize, 1, 2, 1, 0] {
            activate(&mut player, card);
            finish_load(&mut player, card);
            let playing: Vec<usize> = (0..5).filter(|c| player.card_is_playing(*c)).collect();
            assert_eq!(playing, vec![card]);
        }
    }
}
