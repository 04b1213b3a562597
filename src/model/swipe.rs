//! Swipe outcomes.

use crate::model::geometry::{Axis, Point, Viewport};
use std::fmt;

/// Direction a card left the stack in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Thrown or dragged off the left edge.
    Left,
    /// Thrown or dragged off the right edge.
    Right,
    /// Thrown or dragged off the top edge.
    Up,
    /// Thrown or dragged off the bottom edge.
    Down,
}

impl SwipeDirection {
    /// Axis the direction lies on.
    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }

    /// Off-screen card origin used when no better destination is known.
    ///
    /// Two viewport widths away from the visible origin along the direction.
    pub fn stack_origin(self, viewport: &Viewport) -> Point {
        let far = viewport.width() * 2.0;
        match self {
            Self::Left => Point::new(-far, 0.0),
            Self::Right => Point::new(far, 0.0),
            Self::Up => Point::new(0.0, -far),
            Self::Down => Point::new(0.0, far),
        }
    }

    /// Lowercase name, used in logs and the status bar.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed dismissal: which way the card went and the item it showed.
#[derive(Debug, Clone, PartialEq)]
pub struct Swipe<I> {
    /// Direction of the dismissal.
    pub direction: SwipeDirection,
    /// The item backing the dismissed card.
    pub item: I,
}

impl<I> Swipe<I> {
    /// Create a new swipe record.
    pub fn new(direction: SwipeDirection, item: I) -> Self {
        Self { direction, item }
    }
}
