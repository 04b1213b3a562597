//! Plane geometry value types shared by the engine and its hosts.
//!
//! All coordinates are in abstract points. The terminal host maps cells to
//! points (see `view::constants`), the engine never sees cells.

use serde::Deserialize;
use std::ops::{Add, Sub};

/// A position in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Point {
    /// Horizontal coordinate, growing to the right.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl Point {
    /// The origin `(0, 0)`.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `other` to `self`.
    pub fn offset_from(self, other: Point) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }

    /// True when both coordinates are finite numbers.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

/// A displacement or a velocity.
///
/// Gesture translations are in points, gesture velocities in points per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    /// Horizontal component.
    pub dx: f64,
    /// Vertical component.
    pub dy: f64,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    /// Create a new vector.
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// True when both components are exactly zero.
    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Component along `axis`.
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.dx,
            Axis::Vertical => self.dy,
        }
    }

    /// Component across `axis`.
    pub fn across(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.dy,
            Axis::Vertical => self.dx,
        }
    }
}

/// Width and height of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`.
    pub fn extent(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Half the size, i.e. the offset from a rectangle's origin to its center.
    pub fn half(self) -> Vector {
        Vector::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The surface the stack is laid out on.
///
/// Cards are as large as the viewport and rest with their origin on the
/// viewport origin, so a resting card's center is the viewport center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Top-left corner of the surface.
    pub origin: Point,
    /// Extent of the surface.
    pub size: Size,
}

impl Viewport {
    /// A viewport of `size` anchored at the origin.
    pub const fn new(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }

    /// Center of the surface in surface-local coordinates.
    pub fn center(&self) -> Point {
        Point::ZERO + self.size.half()
    }

    /// Width of the surface.
    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Height of the surface.
    pub fn height(&self) -> f64 {
        self.size.height
    }
}

/// Axis a pan gesture is locked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right drags.
    Horizontal,
    /// Up/down drags.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Rotation (about the card center) and uniform scale applied to a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    /// Rotation in radians, clockwise positive.
    pub rotation: f64,
    /// Uniform scale factor. Not clamped; may be negative or above one.
    pub scale: f64,
}

impl CardTransform {
    /// No rotation, unit scale.
    pub const IDENTITY: Self = Self {
        rotation: 0.0,
        scale: 1.0,
    };
}

impl Default for CardTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Border and corner decoration shown while a card is being moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    /// Border width in points.
    pub border_width: f64,
    /// Corner radius in points.
    pub corner_radius: f64,
}

impl Decoration {
    /// Plain card, no border and square corners.
    pub const NONE: Self = Self {
        border_width: 0.0,
        corner_radius: 0.0,
    };

    /// Decoration applied while a card is dragged or thrown.
    pub const SWIPING: Self = Self {
        border_width: 10.0,
        corner_radius: 10.0,
    };

    /// True when neither a border nor rounded corners are drawn.
    pub fn is_plain(&self) -> bool {
        self.border_width == 0.0 && self.corner_radius == 0.0
    }
}

impl Default for Decoration {
    fn default() -> Self {
        Self::NONE
    }
}

/// Engine-owned placement of one card.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CardLayout {
    /// Card center in viewport coordinates.
    pub center: Point,
    /// Rotation and scale about the center.
    pub transform: CardTransform,
    /// Border decoration.
    pub decoration: Decoration,
}

impl CardLayout {
    /// Layout of an untouched card resting centered in `viewport`.
    pub fn resting(viewport: &Viewport) -> Self {
        Self {
            center: viewport.center(),
            transform: CardTransform::IDENTITY,
            decoration: Decoration::NONE,
        }
    }

    /// Linear interpolation between two layouts, `t` in `[0, 1]`.
    pub fn lerp(&self, to: &CardLayout, t: f64) -> CardLayout {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| a + (b - a) * t;
        CardLayout {
            center: Point::new(mix(self.center.x, to.center.x), mix(self.center.y, to.center.y)),
            transform: CardTransform {
                rotation: mix(self.transform.rotation, to.transform.rotation),
                scale: mix(self.transform.scale, to.transform.scale),
            },
            decoration: Decoration {
                border_width: mix(self.decoration.border_width, to.decoration.border_width),
                corner_radius: mix(self.decoration.corner_radius, to.decoration.corner_radius),
            },
        }
    }
}
