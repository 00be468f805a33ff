use iced::widget::scrollable::RelativeOffset;
use std::path::PathBuf;

mod compose;
mod core;
mod layout;
mod player;
mod ui;

/// Describes work that must be performed outside the pure reducer.
pub(super) enum Effect {
    /// Validate and probe an audio source off the UI thread before playback.
    PreparePlayback {
        card: usize,
        source: PathBuf,
        request_id: u64,
    },
    SnapScroll(RelativeOffset),
    FocusDraft,
}
