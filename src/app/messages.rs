use iced::keyboard::{Key, Modifiers};
use iced::widget::scrollable::RelativeOffset;
use std::time::{Duration, Instant};

/// Messages emitted by the UI and the runtime.
#[derive(Debug, Clone)]
pub enum Message {
    // Composition.
    DraftChanged(String),
    SendDraft,
    ToolPressed(ToolButton),

    // Simulated keyboard focus.
    InputFocused,
    InputBlurred,

    // Audio cards.
    CardActivated(usize),
    PlaybackReady {
        card: usize,
        request_id: u64,
        duration: Duration,
    },
    PlaybackFailed {
        card: usize,
        request_id: u64,
        error: String,
    },
    ScrubHovered {
        card: usize,
        fraction: f32,
    },
    ScrubPressed {
        card: usize,
    },
    PointerReleased,

    // Photo lightbox.
    PhotoClicked(usize),
    LightboxDismissed,

    // Chrome.
    ToggleTheme,
    ToastDismissed(u64),

    // Runtime events.
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    Scrolled {
        offset: RelativeOffset,
        viewport_height: f32,
        content_height: f32,
    },
    Tick(Instant),
}

/// Input-bar tool buttons that only surface a "not available" toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolButton {
    Voice,
    Emoji,
    Attach,
}

impl ToolButton {
    pub fn unavailable_notice(self) -> &'static str {
        match self {
            ToolButton::Voice => "Voice messages are not available yet",
            ToolButton::Emoji => "The emoji picker is not available yet",
            ToolButton::Attach => "Attachments are not available yet",
        }
    }
}
