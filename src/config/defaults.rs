pub(crate) fn default_window_width() -> f32 {
    420.0
}

pub(crate) fn default_window_height() -> f32 {
    800.0
}

pub(crate) fn default_gap_px() -> f32 {
    12.0
}

pub(crate) fn default_min_list_height() -> f32 {
    120.0
}

pub(crate) fn default_keyboard_height() -> f32 {
    260.0
}

pub(crate) fn default_keyboard_threshold() -> f32 {
    100.0
}

pub(crate) fn default_assume_visual_viewport() -> bool {
    true
}

/// The toolkit exposes no layout-settled signal, so scroll positioning waits
/// this long after a layout change before reading geometry.
pub(crate) fn default_settle_delay_ms() -> u64 {
    80
}

pub(crate) fn default_scroll_animation_ms() -> u64 {
    220
}

pub(crate) fn default_reply_delay_min_ms() -> u64 {
    1_000
}

pub(crate) fn default_reply_delay_max_ms() -> u64 {
    3_000
}

pub(crate) fn default_toast_duration_ms() -> u64 {
    2_000
}

pub(crate) fn default_timestamp_gap_minutes() -> i64 {
    10
}

pub(crate) fn default_font_size() -> f32 {
    16.0
}

pub(crate) fn default_peer_name() -> String {
    "Harper".to_string()
}

pub(crate) fn default_peer_avatar() -> String {
    "assets/avatars/peer.png".to_string()
}

pub(crate) fn default_own_avatar() -> String {
    "assets/avatars/me.png".to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}
