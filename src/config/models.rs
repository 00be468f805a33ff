use serde::Deserialize;

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    /// Fixed distance kept between the last message and the input bar.
    #[serde(default = "crate::config::defaults::default_gap_px")]
    pub gap_px: f32,
    /// The message list never shrinks below this height.
    #[serde(default = "crate::config::defaults::default_min_list_height")]
    pub min_list_height: f32,
    /// Height of the simulated on-screen keyboard panel.
    #[serde(default = "crate::config::defaults::default_keyboard_height")]
    pub keyboard_height: f32,
    /// Window-height drop that counts as "keyboard opened" on the fallback
    /// path (no visual-viewport reporting).
    #[serde(default = "crate::config::defaults::default_keyboard_threshold")]
    pub keyboard_threshold: f32,
    /// When false, the reconciler exercises the window-height fallback path
    /// instead of the visual-viewport path.
    #[serde(default = "crate::config::defaults::default_assume_visual_viewport")]
    pub assume_visual_viewport: bool,
    #[serde(default = "crate::config::defaults::default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default = "crate::config::defaults::default_scroll_animation_ms")]
    pub scroll_animation_ms: u64,
    #[serde(default = "crate::config::defaults::default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u64,
    #[serde(default = "crate::config::defaults::default_reply_delay_max_ms")]
    pub reply_delay_max_ms: u64,
    #[serde(default = "crate::config::defaults::default_toast_duration_ms")]
    pub toast_duration_ms: u64,
    /// A centered time row is inserted between messages further apart than
    /// this many minutes.
    #[serde(default = "crate::config::defaults::default_timestamp_gap_minutes")]
    pub timestamp_gap_minutes: i64,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: f32,
    #[serde(default = "crate::config::defaults::default_peer_name")]
    pub peer_name: String,
    #[serde(default = "crate::config::defaults::default_peer_avatar")]
    pub peer_avatar: String,
    #[serde(default = "crate::config::defaults::default_own_avatar")]
    pub own_avatar: String,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::default(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            gap_px: crate::config::defaults::default_gap_px(),
            min_list_height: crate::config::defaults::default_min_list_height(),
            keyboard_height: crate::config::defaults::default_keyboard_height(),
            keyboard_threshold: crate::config::defaults::default_keyboard_threshold(),
            assume_visual_viewport: crate::config::defaults::default_assume_visual_viewport(),
            settle_delay_ms: crate::config::defaults::default_settle_delay_ms(),
            scroll_animation_ms: crate::config::defaults::default_scroll_animation_ms(),
            reply_delay_min_ms: crate::config::defaults::default_reply_delay_min_ms(),
            reply_delay_max_ms: crate::config::defaults::default_reply_delay_max_ms(),
            toast_duration_ms: crate::config::defaults::default_toast_duration_ms(),
            timestamp_gap_minutes: crate::config::defaults::default_timestamp_gap_minutes(),
            font_size: crate::config::defaults::default_font_size(),
            peer_name: crate::config::defaults::default_peer_name(),
            peer_avatar: crate::config::defaults::default_peer_avatar(),
            own_avatar: crate::config::defaults::default_own_avatar(),
            log_level: crate::config::defaults::default_log_level(),
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    Night,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Day
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
