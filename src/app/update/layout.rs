use super::super::state::{
    App, AVATAR_SIZE, BUBBLE_MAX_TEXT_WIDTH, BUBBLE_VERTICAL_PADDING, CARD_COMPACT_HEIGHT,
    CARD_LEGACY_HEIGHT, GLYPH_WIDTH_FACTOR, HEADER_HEIGHT, INPUT_BAR_HEIGHT, LINE_HEIGHT_FACTOR,
    LayoutState, PHOTO_PREVIEW_HEIGHT, PendingScroll, ScrollAnimation, ViewportFrame,
};
use super::Effect;
use crate::transcript::{CardLayout, ChatMessage, MessageBody};
use iced::widget::scrollable::RelativeOffset;
use std::time::{Duration, Instant};
use tracing::debug;

/// How the platform reports the visible drawing area. The visual variant is
/// preferred; the window variant relies on a height-drop heuristic to detect
/// an open keyboard.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ViewportProbe {
    Visual { height: f32, offset_top: f32 },
    Window { inner_height: f32 },
}

/// Inputs to one reconciliation pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrameInputs {
    pub(crate) probe: ViewportProbe,
    pub(crate) header_height: f32,
    pub(crate) input_height: f32,
    pub(crate) gap: f32,
    pub(crate) min_list_height: f32,
    pub(crate) initial_inner_height: f32,
    pub(crate) keyboard_threshold: f32,
}

/// Compute the message-list frame for the given viewport report. Pure; the
/// result is clamped so the list can never collapse below the floor height.
pub(crate) fn reconcile_frame(inputs: &FrameInputs) -> ViewportFrame {
    let chrome = inputs.header_height + inputs.input_height + inputs.gap;

    let available = match inputs.probe {
        ViewportProbe::Visual { height, offset_top } => {
            let mut available = height - chrome;
            // Some platforms shift the visual viewport down instead of
            // shrinking it; a nonzero top offset eats into usable height.
            if offset_top > 0.0 {
                available -= offset_top;
            }
            available
        }
        ViewportProbe::Window { inner_height } => {
            let keyboard_height = (inputs.initial_inner_height - inner_height).max(0.0);
            if keyboard_height > inputs.keyboard_threshold {
                inner_height - chrome
            } else {
                inputs.initial_inner_height - chrome
            }
        }
    };

    ViewportFrame {
        list_height: available.max(inputs.min_list_height),
        bottom_padding: inputs.gap,
    }
}

/// Geometry snapshot used to position the last message above the fold.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ListGeometry {
    pub(crate) viewport_height: f32,
    pub(crate) content_height: f32,
    /// Current relative scroll position, `[0, 1]`.
    pub(crate) scroll_y: f32,
    pub(crate) bottom_padding: f32,
    pub(crate) last_message_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ScrollPlan {
    /// The last message already sits at least `gap` clear of the fold.
    AlreadyInPlace,
    Snap(RelativeOffset),
    Animate(RelativeOffset),
}

/// Resolve where the list should scroll, trying strategies in priority
/// order. Each tier has a precondition; the chain always produces a plan and
/// never fails.
pub(crate) fn plan_scroll(
    geometry: Option<&ListGeometry>,
    gap: f32,
    smooth: bool,
    has_messages: bool,
) -> ScrollPlan {
    // Tier 1: precise positioning with the configured gap, when geometry has
    // been reported and the last message height can be estimated.
    if let Some(geometry) = geometry {
        if let Some(plan) = plan_precise(geometry, gap, smooth) {
            return plan;
        }
    }

    // Tier 2: generic scroll-last-into-view.
    if has_messages {
        return if smooth {
            ScrollPlan::Animate(RelativeOffset::END)
        } else {
            ScrollPlan::Snap(RelativeOffset::END)
        };
    }

    // Tier 3: coarsest fallback, jump to the maximum offset.
    ScrollPlan::Snap(RelativeOffset::END)
}

fn plan_precise(geometry: &ListGeometry, gap: f32, smooth: bool) -> Option<ScrollPlan> {
    if geometry.viewport_height <= 0.0
        || geometry.content_height <= 0.0
        || geometry.last_message_height <= 0.0
    {
        return None;
    }
    if geometry.content_height <= geometry.viewport_height {
        // Everything fits; there is nothing to scroll.
        return Some(ScrollPlan::AlreadyInPlace);
    }

    let last_bottom = geometry.content_height - geometry.bottom_padding;
    let max_scroll = geometry.content_height - geometry.viewport_height;
    let desired = (last_bottom - geometry.viewport_height + gap).clamp(0.0, max_scroll);

    let visible_bottom =
        LayoutState::sanitize_fraction(geometry.scroll_y) * max_scroll + geometry.viewport_height;
    if last_bottom <= visible_bottom && (visible_bottom - last_bottom) >= gap {
        return Some(ScrollPlan::AlreadyInPlace);
    }

    let target = RelativeOffset {
        x: 0.0,
        y: LayoutState::sanitize_fraction(desired / max_scroll),
    };
    Some(if smooth {
        ScrollPlan::Animate(target)
    } else {
        ScrollPlan::Snap(target)
    })
}

/// Estimate a message's rendered height from its body. Text heights come
/// from a wrap estimate; media bodies use the fixed card dimensions.
pub(crate) fn estimated_message_height(message: &ChatMessage, font_size: f32) -> f32 {
    match &message.body {
        MessageBody::Text(body) => estimated_text_height(body, font_size).max(AVATAR_SIZE),
        MessageBody::Photo { caption, .. } => {
            let caption_height = if caption.is_some() {
                font_size * LINE_HEIGHT_FACTOR
            } else {
                0.0
            };
            PHOTO_PREVIEW_HEIGHT + caption_height
        }
        MessageBody::Audio(attachment) => match attachment.layout {
            CardLayout::Compact => CARD_COMPACT_HEIGHT,
            CardLayout::Legacy => CARD_LEGACY_HEIGHT,
        },
    }
}

fn estimated_text_height(body: &str, font_size: f32) -> f32 {
    let glyph_width = (font_size * GLYPH_WIDTH_FACTOR).max(1.0);
    let max_units_per_line = (BUBBLE_MAX_TEXT_WIDTH / glyph_width).max(8.0);

    let mut lines = 1.0f32;
    let mut line_units = 0.0f32;
    for ch in body.chars() {
        if ch == '\n' {
            lines += 1.0;
            line_units = 0.0;
            continue;
        }

        let units = if ch.is_whitespace() {
            0.45
        } else if ch.is_ascii_punctuation() {
            0.55
        } else if ch.is_ascii() {
            1.0
        } else {
            1.8
        };

        if line_units + units > max_units_per_line {
            lines += 1.0;
            line_units = units;
        } else {
            line_units += units;
        }
    }

    lines * font_size * LINE_HEIGHT_FACTOR + BUBBLE_VERTICAL_PADDING * 2.0
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

impl App {
    /// Recompute and apply the message-list frame from the current viewport.
    pub(in crate::app) fn reconcile_layout(&mut self) {
        let inputs = self.frame_inputs();
        let frame = reconcile_frame(&inputs);
        if frame != self.layout.frame {
            debug!(
                list_height = frame.list_height,
                focused = self.layout.input_focused,
                "Applied viewport frame"
            );
        }
        self.layout.frame = frame;
    }

    fn frame_inputs(&self) -> FrameInputs {
        let keyboard_inset = if self.layout.input_focused {
            self.config.keyboard_height
        } else {
            0.0
        };
        let reported_height = self.layout.window_height - keyboard_inset;
        let probe = if self.config.assume_visual_viewport {
            ViewportProbe::Visual {
                height: reported_height,
                offset_top: 0.0,
            }
        } else {
            ViewportProbe::Window {
                inner_height: reported_height,
            }
        };

        FrameInputs {
            probe,
            header_height: HEADER_HEIGHT,
            input_height: INPUT_BAR_HEIGHT,
            gap: self.config.gap_px,
            min_list_height: self.config.min_list_height,
            initial_inner_height: self.layout.initial_inner_height,
            keyboard_threshold: self.config.keyboard_threshold,
        }
    }

    /// Recompute the frame and queue a scroll for after geometry settles.
    pub(super) fn request_layout(&mut self, smooth: bool) {
        self.reconcile_layout();
        self.request_scroll(smooth);
    }

    pub(in crate::app) fn request_scroll(&mut self, smooth: bool) {
        self.layout.pending_scroll = Some(PendingScroll {
            smooth,
            due_at: Instant::now() + Duration::from_millis(self.config.settle_delay_ms),
        });
    }

    pub(super) fn handle_window_resized(&mut self, width: f32, height: f32) {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return;
        }
        self.layout.window_width = width;
        self.layout.window_height = height;
        self.request_layout(true);
    }

    pub(super) fn handle_scrolled(
        &mut self,
        offset: RelativeOffset,
        viewport_height: f32,
        content_height: f32,
    ) {
        self.layout.scroll_y = LayoutState::sanitize_fraction(offset.y);
        if viewport_height.is_finite() && viewport_height > 0.0 {
            self.layout.viewport_height = viewport_height;
        }
        if content_height.is_finite() && content_height > 0.0 {
            self.layout.content_height = content_height;
        }
    }

    pub(super) fn handle_input_focused(&mut self, effects: &mut Vec<Effect>) {
        if self.layout.input_focused {
            return;
        }
        self.layout.input_focused = true;
        debug!("Keyboard opened");
        self.request_layout(true);
        effects.push(Effect::FocusDraft);
    }

    pub(super) fn handle_input_blurred(&mut self) {
        if !self.layout.input_focused {
            return;
        }
        self.layout.input_focused = false;
        debug!("Keyboard closed");
        self.request_layout(true);
    }

    /// Fire a pending scroll whose settle deadline has passed.
    pub(super) fn run_due_scroll(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        let Some(pending) = self.layout.pending_scroll else {
            return;
        };
        if now < pending.due_at {
            return;
        }
        self.layout.pending_scroll = None;

        let geometry = self.list_geometry();
        let plan = plan_scroll(
            geometry.as_ref(),
            self.config.gap_px,
            pending.smooth,
            !self.conversation.messages.is_empty(),
        );

        match plan {
            ScrollPlan::AlreadyInPlace => {}
            ScrollPlan::Snap(offset) => {
                self.layout.animation = None;
                self.layout.scroll_y = offset.y;
                effects.push(Effect::SnapScroll(offset));
            }
            ScrollPlan::Animate(offset) => {
                self.layout.animation = Some(ScrollAnimation {
                    from: self.layout.scroll_y,
                    to: offset.y,
                    started_at: now,
                    duration: Duration::from_millis(self.config.scroll_animation_ms.max(1)),
                });
            }
        }
    }

    /// Advance an in-flight animated scroll by one frame.
    pub(super) fn run_scroll_animation(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        let Some(animation) = self.layout.animation else {
            return;
        };

        let elapsed = now.saturating_duration_since(animation.started_at);
        let t = (elapsed.as_secs_f32() / animation.duration.as_secs_f32()).min(1.0);
        let y = animation.from + (animation.to - animation.from) * ease_out_cubic(t);
        self.layout.scroll_y = LayoutState::sanitize_fraction(y);
        effects.push(Effect::SnapScroll(RelativeOffset {
            x: 0.0,
            y: self.layout.scroll_y,
        }));

        if t >= 1.0 {
            self.layout.animation = None;
        }
    }

    fn list_geometry(&self) -> Option<ListGeometry> {
        if !self.layout.has_metrics() {
            return None;
        }
        let last = self.conversation.messages.last()?;
        Some(ListGeometry {
            viewport_height: self.layout.viewport_height,
            content_height: self.layout.content_height,
            scroll_y: self.layout.scroll_y,
            bottom_padding: self.layout.frame.bottom_padding,
            last_message_height: estimated_message_height(last, self.config.font_size),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{AudioAttachment, Sender};
    use chrono::Local;
    use std::path::PathBuf;

    fn inputs(probe: ViewportProbe) -> FrameInputs {
        FrameInputs {
            probe,
            header_height: 64.0,
            input_height: 72.0,
            gap: 12.0,
            min_list_height: 120.0,
            initial_inner_height: 800.0,
            keyboard_threshold: 100.0,
        }
    }

    fn geometry() -> ListGeometry {
        ListGeometry {
            viewport_height: 600.0,
            content_height: 1000.0,
            scroll_y: 0.0,
            bottom_padding: 40.0,
            last_message_height: 80.0,
        }
    }

    #[test]
    fn visual_viewport_matches_initial_load_scenario() {
        let frame = reconcile_frame(&inputs(ViewportProbe::Visual {
            height: 800.0,
            offset_top: 0.0,
        }));
        assert_eq!(frame.list_height, 652.0);
        assert_eq!(frame.bottom_padding, 12.0);
    }

    #[test]
    fn open_keyboard_shrinks_the_visual_viewport() {
        let frame = reconcile_frame(&inputs(ViewportProbe::Visual {
            height: 500.0,
            offset_top: 0.0,
        }));
        assert_eq!(frame.list_height, 352.0);
    }

    #[test]
    fn nonzero_top_offset_reduces_available_height() {
        let frame = reconcile_frame(&inputs(ViewportProbe::Visual {
            height: 800.0,
            offset_top: 40.0,
        }));
        assert_eq!(frame.list_height, 612.0);
    }

    #[test]
    fn fallback_uses_live_height_past_the_threshold() {
        // 800 -> 640 is a 160px drop, beyond the 100px threshold.
        let frame = reconcile_frame(&inputs(ViewportProbe::Window {
            inner_height: 640.0,
        }));
        assert_eq!(frame.list_height, 640.0 - 64.0 - 72.0 - 12.0);
    }

    #[test]
    fn fallback_restores_initial_height_below_the_threshold() {
        let frame = reconcile_frame(&inputs(ViewportProbe::Window {
            inner_height: 760.0,
        }));
        assert_eq!(frame.list_height, 652.0);
    }

    #[test]
    fn floor_holds_for_every_probe_height() {
        for height in (-200..300).step_by(7) {
            let visual = reconcile_frame(&inputs(ViewportProbe::Visual {
                height: height as f32,
                offset_top: 0.0,
            }));
            let window = reconcile_frame(&inputs(ViewportProbe::Window {
                inner_height: height as f32,
            }));
            assert!(visual.list_height >= 120.0);
            assert!(window.list_height >= 120.0);
        }
    }

    #[test]
    fn reconciliation_is_idempotent() {
        let probe = ViewportProbe::Visual {
            height: 540.0,
            offset_top: 16.0,
        };
        let first = reconcile_frame(&inputs(probe));
        let second = reconcile_frame(&inputs(probe));
        assert_eq!(first, second);
    }

    #[test]
    fn precise_plan_targets_gap_above_the_fold() {
        let plan = plan_scroll(Some(&geometry()), 12.0, false, true);
        // last bottom = 960, desired = 960 - 600 + 12 = 372 over a 400px
        // scrollable range.
        match plan {
            ScrollPlan::Snap(offset) => assert!((offset.y - 0.93).abs() < 1e-4),
            other => panic!("expected a snap plan, got {other:?}"),
        }
    }

    #[test]
    fn skips_when_last_message_is_already_clear_of_the_gap() {
        let mut at_bottom = geometry();
        at_bottom.scroll_y = 1.0;
        // visible bottom = 400 + 600 = 1000; last bottom = 960; clearance 40.
        let plan = plan_scroll(Some(&at_bottom), 12.0, true, true);
        assert_eq!(plan, ScrollPlan::AlreadyInPlace);
    }

    #[test]
    fn short_content_needs_no_scrolling() {
        let mut short = geometry();
        short.content_height = 300.0;
        let plan = plan_scroll(Some(&short), 12.0, true, true);
        assert_eq!(plan, ScrollPlan::AlreadyInPlace);
    }

    #[test]
    fn missing_geometry_falls_back_to_the_end_offset() {
        let plan = plan_scroll(None, 12.0, false, true);
        assert_eq!(plan, ScrollPlan::Snap(RelativeOffset::END));

        let animated = plan_scroll(None, 12.0, true, true);
        assert_eq!(animated, ScrollPlan::Animate(RelativeOffset::END));
    }

    #[test]
    fn empty_list_takes_the_coarsest_fallback() {
        let plan = plan_scroll(None, 12.0, true, false);
        assert_eq!(plan, ScrollPlan::Snap(RelativeOffset::END));
    }

    #[test]
    fn target_fraction_stays_in_unit_range() {
        let mut tiny_gap = geometry();
        tiny_gap.bottom_padding = 0.0;
        let plan = plan_scroll(Some(&tiny_gap), 500.0, false, true);
        match plan {
            ScrollPlan::Snap(offset) => {
                assert!(offset.y >= 0.0);
                assert!(offset.y <= 1.0);
            }
            other => panic!("expected a snap plan, got {other:?}"),
        }
    }

    #[test]
    fn longer_text_estimates_taller_bubbles() {
        let now = Local::now();
        let short = ChatMessage::text(Sender::Peer, "ok", now);
        let long = ChatMessage::text(
            Sender::Peer,
            "a considerably longer message that will certainly wrap across \
             several bubble lines once rendered",
            now,
        );
        assert!(
            estimated_message_height(&long, 16.0) > estimated_message_height(&short, 16.0)
        );
    }

    #[test]
    fn card_heights_follow_their_layout_variant() {
        let now = Local::now();
        let card = |layout| ChatMessage {
            sender: Sender::Peer,
            body: crate::transcript::MessageBody::Audio(AudioAttachment {
                source: PathBuf::from("assets/audio/x.ogg"),
                title: "T".to_string(),
                artist: "A".to_string(),
                layout,
            }),
            sent_at: now,
        };
        assert_eq!(
            estimated_message_height(&card(CardLayout::Compact), 16.0),
            CARD_COMPACT_HEIGHT
        );
        assert_eq!(
            estimated_message_height(&card(CardLayout::Legacy), 16.0),
            CARD_LEGACY_HEIGHT
        );
    }
}
