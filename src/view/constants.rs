//! Terminal host constants.
//!
//! The engine works in points; one terminal cell covers
//! [`CELL_WIDTH_POINTS`] x [`CELL_HEIGHT_POINTS`] of them, so an 80x24
//! terminal behaves like a 640x384 point surface.

use std::time::Duration;

/// Points per terminal column.
pub const CELL_WIDTH_POINTS: f64 = 8.0;

/// Points per terminal row.
pub const CELL_HEIGHT_POINTS: f64 = 16.0;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Redraw interval while animations are in flight (~60 fps).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Event poll timeout while nothing moves.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// A release this long after the last drag sample counts as a standstill.
pub const STALE_VELOCITY_AFTER: Duration = Duration::from_millis(100);

/// Stamp strength above which the stamp is drawn bold.
pub const STRONG_STAMP: f64 = 0.5;

/// Border width from which a card gets a thick border.
pub const THICK_BORDER_POINTS: f64 = 5.0;

/// Corner radius from which a card gets rounded corners.
pub const ROUNDED_CORNER_POINTS: f64 = 1.0;

/// Columns left free on each side of a resting card.
pub const CARD_MARGIN_COLUMNS: u16 = 4;

/// Rows left free above and below a resting card.
pub const CARD_MARGIN_ROWS: u16 = 1;
