use iced::widget::scrollable::Id as ScrollId;
use iced::widget::text_input::Id as InputId;
use once_cell::sync::Lazy;

/// Fixed chrome dimensions. Keep these values in sync with the `view.rs`
/// layout; the reconciler assumes them when real measurements are missing.
pub(crate) const HEADER_HEIGHT: f32 = 64.0;
pub(crate) const INPUT_BAR_HEIGHT: f32 = 72.0;

pub(crate) const AVATAR_SIZE: f32 = 40.0;
pub(crate) const MESSAGE_SPACING: f32 = 12.0;
pub(crate) const BUBBLE_MAX_TEXT_WIDTH: f32 = 240.0;
pub(crate) const BUBBLE_VERTICAL_PADDING: f32 = 10.0;
pub(crate) const TIMESTAMP_ROW_HEIGHT: f32 = 24.0;
pub(crate) const PHOTO_PREVIEW_HEIGHT: f32 = 180.0;
pub(crate) const CARD_COMPACT_HEIGHT: f32 = 84.0;
pub(crate) const CARD_LEGACY_HEIGHT: f32 = 64.0;

/// Progress control geometry; pointer fractions are computed against the
/// track width.
pub(crate) const PROGRESS_TRACK_WIDTH: f32 = 180.0;
pub(crate) const PROGRESS_TRACK_HEIGHT: f32 = 6.0;
pub(crate) const PROGRESS_HANDLE_SIZE: f32 = 12.0;

/// Estimated average glyph width as a fraction of the font size, used for
/// text wrap estimation.
pub(crate) const GLYPH_WIDTH_FACTOR: f32 = 0.55;
pub(crate) const LINE_HEIGHT_FACTOR: f32 = 1.3;

pub(crate) const TICK_INTERVAL_MS: u64 = 16;

pub(crate) static LIST_SCROLL_ID: Lazy<ScrollId> = Lazy::new(|| ScrollId::new("message-list"));
pub(crate) static DRAFT_INPUT_ID: Lazy<InputId> = Lazy::new(|| InputId::new("draft-input"));
