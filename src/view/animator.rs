//! Tick-driven executor for the engine's animation requests.
//!
//! Each request is interpolated linearly from its start to its end layout as
//! wall-clock time is fed in through [`TickAnimator::advance`]. Finished
//! tickets are handed back so the event loop can report them to the engine.

use crate::model::CardLayout;
use crate::state::{AnimationRequest, AnimationTicket, Animator};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Running {
    request: AnimationRequest,
    elapsed: Duration,
}

impl Running {
    fn is_finished(&self) -> bool {
        self.elapsed >= self.request.duration
    }

    fn progress(&self) -> f64 {
        if self.is_finished() {
            1.0
        } else {
            self.elapsed.as_secs_f64() / self.request.duration.as_secs_f64()
        }
    }

    fn layout(&self) -> CardLayout {
        self.request.from.lerp(&self.request.to, self.progress())
    }
}

/// Animator advanced by the host's frame clock.
#[derive(Debug, Default)]
pub struct TickAnimator {
    running: BTreeMap<AnimationTicket, Running>,
}

impl TickAnimator {
    /// An animator with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing is in flight.
    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    /// Number of animations in flight.
    pub fn in_flight(&self) -> usize {
        self.running.len()
    }

    /// Interpolated layout of the animation with `ticket`.
    pub fn presentation(&self, ticket: AnimationTicket) -> Option<CardLayout> {
        self.running.get(&ticket).map(Running::layout)
    }

    /// Progress of the animation with `ticket`, in `[0, 1]`.
    pub fn progress(&self, ticket: AnimationTicket) -> Option<f64> {
        self.running.get(&ticket).map(Running::progress)
    }

    /// Move every animation `elapsed` forward.
    ///
    /// Returns the tickets that reached their end, oldest first. They are no
    /// longer tracked.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<AnimationTicket> {
        let mut finished = Vec::new();
        for (ticket, running) in &mut self.running {
            running.elapsed = running.elapsed.saturating_add(elapsed);
            if running.is_finished() {
                finished.push(*ticket);
            }
        }
        for ticket in &finished {
            self.running.remove(ticket);
        }
        finished
    }
}

impl Animator for TickAnimator {
    fn animate(&mut self, request: AnimationRequest) {
        self.running.insert(
            request.ticket,
            Running {
                request,
                elapsed: Duration::ZERO,
            },
        );
    }
}
