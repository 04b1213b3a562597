//! Swipe-stack state machine (pure).
//!
//! Everything here is driven by plain method calls: gesture samples in,
//! animation requests and swipe events out. No terminal, no clock.

pub mod animation;
pub mod deck;
pub mod engine;
pub mod events;

#[cfg(test)]
pub(crate) mod test_support;

pub use animation::{AnimationKind, AnimationRequest, AnimationTicket, Animator, RecordingAnimator};
pub use deck::{CardDeck, CardId, CardMotion, RenderedCard};
pub use engine::{EnginePhase, SwipeEngine};
pub use events::{EventBus, EventStream, SwipeDelegate};
