//! Mouse drags to gesture samples.
//!
//! A left-button press arms a drag; the first movement emits `Began`, later
//! movements `Changed`, the release `Ended`. Translation is measured from the
//! press position. Velocity comes from the last two positions and their
//! timestamps.

use super::constants::{CELL_HEIGHT_POINTS, CELL_WIDTH_POINTS, STALE_VELOCITY_AFTER};
use crate::gesture::GestureSample;
use crate::model::{Point, Vector};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::Instant;

/// Point at the top-left corner of cell (`column`, `row`) of `area`.
pub fn cell_to_point(area: Rect, column: u16, row: u16) -> Point {
    Point::new(
        (f64::from(column) - f64::from(area.x)) * CELL_WIDTH_POINTS,
        (f64::from(row) - f64::from(area.y)) * CELL_HEIGHT_POINTS,
    )
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start: Point,
    last: Point,
    last_at: Instant,
    velocity: Vector,
    moved: bool,
}

/// Turns crossterm mouse events into [`GestureSample`]s.
#[derive(Debug, Default)]
pub struct MouseGestureTracker {
    drag: Option<Drag>,
}

impl MouseGestureTracker {
    /// A tracker with no button held.
    pub fn new() -> Self {
        Self::default()
    }

    /// True between press and release.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Feed one mouse event received at `at`, positions relative to `area`.
    ///
    /// Presses outside `area` are ignored; a drag that started inside keeps
    /// tracking outside it.
    pub fn handle(&mut self, mouse: MouseEvent, area: Rect, at: Instant) -> Vec<GestureSample> {
        let position = cell_to_point(area, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let inside = mouse.column >= area.x
                    && mouse.column < area.right()
                    && mouse.row >= area.y
                    && mouse.row < area.bottom();
                if inside {
                    self.press(position, at);
                }
                Vec::new()
            }
            MouseEventKind::Drag(MouseButton::Left) => self.drag_to(position, at).into_iter().collect(),
            MouseEventKind::Up(MouseButton::Left) => self.release(position, at),
            _ => Vec::new(),
        }
    }

    /// Arm a drag at `position`.
    pub fn press(&mut self, position: Point, at: Instant) {
        self.drag = Some(Drag {
            start: position,
            last: position,
            last_at: at,
            velocity: Vector::ZERO,
            moved: false,
        });
    }

    /// Pointer moved while pressed.
    pub fn drag_to(&mut self, position: Point, at: Instant) -> Option<GestureSample> {
        let drag = self.drag.as_mut()?;
        if position == drag.last {
            return None;
        }

        let seconds = at.saturating_duration_since(drag.last_at).as_secs_f64();
        if seconds > 0.0 {
            let step = position.offset_from(drag.last);
            drag.velocity = Vector::new(step.dx / seconds, step.dy / seconds);
        }
        drag.last = position;
        drag.last_at = at;

        let translation = position.offset_from(drag.start);
        let sample = if drag.moved {
            GestureSample::changed(translation, drag.velocity)
        } else {
            drag.moved = true;
            GestureSample::began(translation, drag.velocity)
        };
        Some(sample)
    }

    /// Pointer released.
    ///
    /// A press that never moved produces a `Began`/`Ended` pair at rest.
    pub fn release(&mut self, position: Point, at: Instant) -> Vec<GestureSample> {
        let Some(drag) = self.drag.take() else {
            return Vec::new();
        };
        if !drag.moved {
            return vec![
                GestureSample::began(Vector::ZERO, Vector::ZERO),
                GestureSample::ended(Vector::ZERO, Vector::ZERO),
            ];
        }

        let velocity = if at.saturating_duration_since(drag.last_at) > STALE_VELOCITY_AFTER {
            Vector::ZERO
        } else {
            drag.velocity
        };
        vec![GestureSample::ended(position.offset_from(drag.start), velocity)]
    }
}
