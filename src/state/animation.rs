//! Animation intents handed to the host's animation executor.
//!
//! The engine never runs animations itself. It updates a card's model layout
//! to the end state, describes the transition as an [`AnimationRequest`], and
//! waits for the host to report the request's ticket back through
//! [`crate::state::SwipeEngine::complete_animation`].

use crate::model::{CardLayout, CardTransform, Decoration, Point};
use crate::state::deck::CardId;
use std::time::Duration;

/// Identifier of one in-flight animation, echoed back on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationTicket(u64);

impl AnimationTicket {
    /// Create a ticket from a raw value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw ticket value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// What the animation is for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationKind {
    /// Fly the card to `destination`, transforming along the way.
    Move {
        /// Card center at the end of the animation.
        destination: Point,
    },
    /// Bring transform and decoration back to the given values.
    Transform {
        /// Transform at the end of the animation.
        transform: CardTransform,
        /// Decoration at the end of the animation.
        decoration: Decoration,
    },
}

/// A declarative animation: move `card` from `from` to `to` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    /// Ticket to report on completion.
    pub ticket: AnimationTicket,
    /// The animated card.
    pub card: CardId,
    /// Layout when the animation starts.
    pub from: CardLayout,
    /// Layout when the animation ends; already the card's model layout.
    pub to: CardLayout,
    /// How long the transition takes.
    pub duration: Duration,
    /// Intent of the transition.
    pub kind: AnimationKind,
}

/// Executes animation requests.
///
/// Implementations must report every ticket exactly once, after the visual
/// change is applied, on the thread that drives the engine.
pub trait Animator {
    /// Start an animation.
    fn animate(&mut self, request: AnimationRequest);
}

/// Animator that only records requests.
///
/// For headless hosts and tests that decide themselves when an animation has
/// finished.
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    requests: Vec<AnimationRequest>,
}

impl RecordingAnimator {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> &[AnimationRequest] {
        &self.requests
    }

    /// The most recent request.
    pub fn last(&self) -> Option<&AnimationRequest> {
        self.requests.last()
    }

    /// Drain recorded requests.
    pub fn take_requests(&mut self) -> Vec<AnimationRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl Animator for RecordingAnimator {
    fn animate(&mut self, request: AnimationRequest) {
        self.requests.push(request);
    }
}
