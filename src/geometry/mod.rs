//! Card geometry (pure).
//!
//! Stateless functions turning card positions and gesture velocities into
//! rotations, scales, and off-screen destinations. Every function takes the
//! viewport it works against; nothing is cached.
//!
//! Conventions: "center" is a card center in viewport coordinates, "origin"
//! is the top-left corner of a viewport-sized card.

use crate::model::{Axis, CardTransform, Point, Size, Vector};

/// Points of horizontal offset per degree of rotation.
pub const POINTS_PER_DEGREE: f64 = 10.0;

/// Rotation magnitude (radians) beyond which the sign of the rotation flips.
pub const ROTATION_FLIP_LIMIT: f64 = 1.4;

/// Horizontal offset at which the scale reaches zero.
pub const HORIZONTAL_SCALE_FALLOFF: f64 = 800.0;

/// Vertical offset at which the scale reaches zero.
pub const VERTICAL_SCALE_FALLOFF: f64 = 1600.0;

/// Rotation for a card whose center sits at `card_center`.
///
/// One degree per [`POINTS_PER_DEGREE`] points of horizontal offset from the
/// viewport center. Past [`ROTATION_FLIP_LIMIT`] radians the sign flips,
/// which existing hosts rely on for far-off cards.
pub fn rotation_for(card_center: Point, viewport_width: f64) -> f64 {
    let x_from_center = card_center.x - viewport_width / 2.0;
    let radians = (x_from_center / POINTS_PER_DEGREE).to_radians();
    if radians.abs() > ROTATION_FLIP_LIMIT {
        -radians
    } else {
        radians
    }
}

/// Scale for a card whose center sits at `card_center`.
///
/// The dominant offset axis decides the falloff; ties count as horizontal.
/// The result is not clamped.
pub fn scale_for(card_center: Point, viewport: Size) -> f64 {
    let offset = card_center.offset_from(viewport_center(viewport));
    if offset.dy.abs() > offset.dx.abs() {
        1.0 - offset.dy.abs() / VERTICAL_SCALE_FALLOFF
    } else {
        1.0 - offset.dx.abs() / HORIZONTAL_SCALE_FALLOFF
    }
}

/// Rotation and scale for a card centered at `card_center`.
pub fn transform_for(card_center: Point, viewport: Size) -> CardTransform {
    CardTransform {
        rotation: rotation_for(card_center, viewport.width),
        scale: scale_for(card_center, viewport),
    }
}

/// Speed of a release, the Euclidean norm of its velocity.
pub fn throw_magnitude(velocity: Vector) -> f64 {
    velocity.dx.hypot(velocity.dy)
}

/// Drag feedback strength for a card centered at `card_center`.
///
/// Offset from the viewport center along `axis`, in quarters of the viewport
/// extent on that axis. Unclamped; zero for a degenerate viewport.
pub fn drag_opacity(card_center: Point, viewport: Size, axis: Axis) -> f64 {
    let quarter = viewport.extent(axis) / 4.0;
    if quarter <= 0.0 {
        return 0.0;
    }
    card_center
        .offset_from(viewport_center(viewport))
        .along(axis)
        .abs()
        / quarter
}

/// Off-screen destination continuing the line from the viewport center
/// through the card center.
///
/// The far side (left or right) follows the sign of the horizontal offset.
/// A card exactly on the vertical center line is sent straight up or down
/// instead of dividing by zero; a card exactly at the center goes right.
pub fn dismiss_endpoint(card_center: Point, viewport: Size) -> Point {
    let delta = card_center.offset_from(viewport_center(viewport));
    extrapolate(card_center, delta, viewport, Axis::Horizontal)
}

/// Off-screen destination continuing the card's motion along `velocity`.
///
/// Slope and side come from the velocity. Same degenerate handling as
/// [`dismiss_endpoint`].
pub fn dismiss_endpoint_with_velocity(card_center: Point, viewport: Size, velocity: Vector) -> Point {
    extrapolate(card_center, velocity, viewport, Axis::Horizontal)
}

/// Vertical counterpart of [`dismiss_endpoint`]: the far side is the top or
/// bottom, chosen by the sign of the vertical offset.
pub fn vertical_dismiss_endpoint(card_center: Point, viewport: Size) -> Point {
    let delta = card_center.offset_from(viewport_center(viewport));
    extrapolate(card_center, delta, viewport, Axis::Vertical)
}

/// Vertical counterpart of [`dismiss_endpoint_with_velocity`].
pub fn vertical_dismiss_endpoint_with_velocity(
    card_center: Point,
    viewport: Size,
    velocity: Vector,
) -> Point {
    extrapolate(card_center, velocity, viewport, Axis::Vertical)
}

/// Center of a viewport-sized card whose origin is `origin`.
pub fn center_from_origin(origin: Point, viewport: Size) -> Point {
    origin + viewport.half()
}

/// Origin of a viewport-sized card whose center is `center`.
pub fn origin_from_center(center: Point, viewport: Size) -> Point {
    center - viewport.half()
}

fn viewport_center(viewport: Size) -> Point {
    Point::ZERO + viewport.half()
}

/// Coordinate on `axis` far enough out that a card centered there has left
/// the viewport, on the positive or negative side.
fn far_side(axis: Axis, positive: bool, viewport: Size) -> f64 {
    let half_across = viewport.extent(axis.other()) / 2.0;
    if positive {
        viewport.extent(axis) + half_across
    } else {
        -half_across
    }
}

fn extrapolate(from: Point, direction: Vector, viewport: Size, axis: Axis) -> Point {
    let along = direction.along(axis);
    let across = direction.across(axis);

    if along.abs() < f64::EPSILON {
        if across.abs() < f64::EPSILON {
            let target = far_side(axis, true, viewport);
            return match axis {
                Axis::Horizontal => Point::new(target, from.y),
                Axis::Vertical => Point::new(from.x, target),
            };
        }
        return extrapolate(from, direction, viewport, axis.other());
    }

    let target = far_side(axis, along > 0.0, viewport);
    let slope = across / along;
    match axis {
        Axis::Horizontal => Point::new(target, from.y + (target - from.x) * slope),
        Axis::Vertical => Point::new(from.x + (target - from.y) * slope, target),
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
