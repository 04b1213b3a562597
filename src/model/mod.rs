//! Domain model types (pure).
//!
//! Plain data and capability traits shared by the engine and its hosts.

pub mod card;
pub mod error;
pub mod geometry;
pub mod key_action;
pub mod options;
pub mod swipe;

// Re-export for convenience
pub use card::{CardView, SwipableItem};
pub use error::{AppError, DeckError};
pub use geometry::{Axis, CardLayout, CardTransform, Decoration, Point, Size, Vector, Viewport};
pub use key_action::DeckAction;
pub use options::SwipeOptions;
pub use swipe::{Swipe, SwipeDirection};
