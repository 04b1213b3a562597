//! Swipe stack tuning knobs.

use crate::model::geometry::{Axis, Point};
use std::time::Duration;

/// Configuration of a swipe stack.
///
/// Immutable once handed to [`crate::state::SwipeEngine::setup`]. Values are
/// not validated; out-of-range thresholds simply produce odd behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeOptions {
    /// Release speed (points/second) above which a card is thrown off.
    pub throwing_threshold: f64,
    /// Duration of the snap-back animation.
    pub snap_duration: Duration,
    /// Duration of the dismissal animation.
    pub dismiss_animation_duration: Duration,
    /// Whether left/right swipes are recognized.
    pub allow_horizontal_swipes: bool,
    /// Whether up/down swipes are recognized.
    pub allow_vertical_swipes: bool,
    /// Fraction of the viewport width a horizontal pan must exceed to dismiss.
    pub horizontal_pan_threshold: f64,
    /// Fraction of the viewport height a vertical pan must exceed to dismiss.
    pub vertical_pan_threshold: f64,
    /// Maximum number of materialized cards.
    pub max_rendered_cards: usize,
    /// Combined rendered + queued count at or below which a refill is requested.
    pub refill_threshold: usize,
    /// Ignore gestures while a dismissal animation is in flight.
    pub freeze_interaction_while_dismissing: bool,
    /// Retain the last dismissed undoable card.
    pub allow_undo: bool,
    /// Origin of a resting card.
    pub visible_origin: Point,
}

impl SwipeOptions {
    /// Pan threshold fraction for `axis`.
    pub fn pan_threshold(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal_pan_threshold,
            Axis::Vertical => self.vertical_pan_threshold,
        }
    }

    /// Axes that gestures may lock to, horizontal first.
    pub fn allowed_axes(&self) -> Vec<Axis> {
        let mut axes = Vec::with_capacity(2);
        if self.allow_horizontal_swipes {
            axes.push(Axis::Horizontal);
        }
        if self.allow_vertical_swipes {
            axes.push(Axis::Vertical);
        }
        axes
    }
}

impl Default for SwipeOptions {
    fn default() -> Self {
        Self {
            throwing_threshold: 800.0,
            snap_duration: Duration::from_millis(100),
            dismiss_animation_duration: Duration::from_millis(250),
            allow_horizontal_swipes: true,
            allow_vertical_swipes: false,
            horizontal_pan_threshold: 0.5,
            vertical_pan_threshold: 0.5,
            max_rendered_cards: 5,
            refill_threshold: 10,
            freeze_interaction_while_dismissing: false,
            allow_undo: true,
            visible_origin: Point::ZERO,
        }
    }
}
