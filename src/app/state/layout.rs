use std::time::{Duration, Instant};

/// The applied geometry of the message list: a pixel height plus the bottom
/// padding that keeps the last bubble clear of the input bar. Derived, never
/// persisted; recomputed on every trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportFrame {
    pub(in crate::app) list_height: f32,
    pub(in crate::app) bottom_padding: f32,
}

/// A scroll requested by a layout trigger, deferred until geometry settles.
#[derive(Debug, Clone, Copy)]
pub struct PendingScroll {
    pub(in crate::app) smooth: bool,
    pub(in crate::app) due_at: Instant,
}

/// An in-flight animated scroll toward a relative target offset.
#[derive(Debug, Clone, Copy)]
pub struct ScrollAnimation {
    pub(in crate::app) from: f32,
    pub(in crate::app) to: f32,
    pub(in crate::app) started_at: Instant,
    pub(in crate::app) duration: Duration,
}

/// Viewport and scroll tracking model.
pub struct LayoutState {
    pub(in crate::app) window_width: f32,
    pub(in crate::app) window_height: f32,
    /// Window height recorded at startup; the fallback keyboard heuristic
    /// compares live heights against it.
    pub(in crate::app) initial_inner_height: f32,
    pub(in crate::app) input_focused: bool,
    pub(in crate::app) frame: ViewportFrame,
    /// Relative scroll position last reported by the list, `[0, 1]`.
    pub(in crate::app) scroll_y: f32,
    pub(in crate::app) viewport_height: f32,
    pub(in crate::app) content_height: f32,
    pub(in crate::app) pending_scroll: Option<PendingScroll>,
    pub(in crate::app) animation: Option<ScrollAnimation>,
}

impl LayoutState {
    pub(in crate::app) fn new(window_width: f32, window_height: f32) -> Self {
        LayoutState {
            window_width,
            window_height,
            initial_inner_height: window_height,
            input_focused: false,
            frame: ViewportFrame {
                list_height: window_height,
                bottom_padding: 0.0,
            },
            scroll_y: 0.0,
            viewport_height: 0.0,
            content_height: 0.0,
            pending_scroll: None,
            animation: None,
        }
    }

    /// True when the list has reported geometry at least once.
    pub(in crate::app) fn has_metrics(&self) -> bool {
        self.viewport_height > 0.0 && self.content_height > 0.0
    }

    pub(in crate::app) fn sanitize_fraction(value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}
