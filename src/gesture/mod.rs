//! Pan gesture interpretation (pure).
//!
//! A gesture source delivers [`GestureSample`]s for one continuous drag. A
//! [`PanInterpreter`] locks a drag to one [`Axis`]: if the first sample's
//! velocity is dominated by the other axis, the drag is cancelled on the spot
//! and the rest of it is swallowed. A [`GestureRouter`] runs one interpreter
//! per enabled axis and lets exactly one of them own each drag.

use crate::model::{Axis, Vector};

/// Lifecycle phase of a gesture sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// First sample of a drag.
    Began,
    /// The drag moved.
    Changed,
    /// The finger lifted.
    Ended,
    /// The drag was aborted (by the platform or by an axis lock).
    Cancelled,
}

impl GesturePhase {
    /// True for `Ended` and `Cancelled`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

/// One sample of a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Phase of the drag at this sample.
    pub phase: GesturePhase,
    /// Displacement since the drag began, in points.
    pub translation: Vector,
    /// Current velocity in points per second.
    pub velocity: Vector,
}

impl GestureSample {
    /// Create a sample.
    pub fn new(phase: GesturePhase, translation: Vector, velocity: Vector) -> Self {
        Self {
            phase,
            translation,
            velocity,
        }
    }

    /// A `Began` sample.
    pub fn began(translation: Vector, velocity: Vector) -> Self {
        Self::new(GesturePhase::Began, translation, velocity)
    }

    /// A `Changed` sample.
    pub fn changed(translation: Vector, velocity: Vector) -> Self {
        Self::new(GesturePhase::Changed, translation, velocity)
    }

    /// An `Ended` sample.
    pub fn ended(translation: Vector, velocity: Vector) -> Self {
        Self::new(GesturePhase::Ended, translation, velocity)
    }

    /// A `Cancelled` sample.
    pub fn cancelled(translation: Vector, velocity: Vector) -> Self {
        Self::new(GesturePhase::Cancelled, translation, velocity)
    }

    /// The same sample in the `Cancelled` phase.
    pub fn into_cancelled(self) -> Self {
        Self {
            phase: GesturePhase::Cancelled,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tracking {
    Idle,
    Tracking,
    Rejected,
}

/// Axis-locked pan recognizer.
///
/// The lock is decided once, on the `Began` sample, and never re-evaluated
/// mid-drag. A tie between the two velocity components does not cancel.
#[derive(Debug, Clone)]
pub struct PanInterpreter {
    axis: Axis,
    tracking: Tracking,
}

impl PanInterpreter {
    /// Create an interpreter locked to `axis`.
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            tracking: Tracking::Idle,
        }
    }

    /// The axis this interpreter accepts.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// True while a drag accepted by this interpreter is in progress.
    pub fn is_tracking(&self) -> bool {
        self.tracking == Tracking::Tracking
    }

    /// Whether a drag starting with `velocity` belongs to the other axis.
    pub fn rejects(&self, velocity: Vector) -> bool {
        velocity.across(self.axis).abs() > velocity.along(self.axis).abs()
    }

    /// Feed one raw sample.
    ///
    /// Returns the sample to deliver downstream, a `Cancelled` replacement
    /// when the drag was just rejected, or `None` when the sample is
    /// swallowed (rest of a rejected drag, or no drag in progress).
    pub fn interpret(&mut self, sample: GestureSample) -> Option<GestureSample> {
        match sample.phase {
            GesturePhase::Began => {
                if self.rejects(sample.velocity) {
                    self.tracking = Tracking::Rejected;
                    Some(sample.into_cancelled())
                } else {
                    self.tracking = Tracking::Tracking;
                    Some(sample)
                }
            }
            GesturePhase::Changed => match self.tracking {
                Tracking::Tracking => Some(sample),
                Tracking::Idle | Tracking::Rejected => None,
            },
            GesturePhase::Ended | GesturePhase::Cancelled => {
                let delivered = self.tracking == Tracking::Tracking;
                self.tracking = Tracking::Idle;
                delivered.then_some(sample)
            }
        }
    }

    /// Forget any drag in progress.
    pub fn reset(&mut self) {
        self.tracking = Tracking::Idle;
    }
}

/// A sample accepted by one of the router's interpreters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutedSample {
    /// Axis of the interpreter that owns the drag.
    pub axis: Axis,
    /// The delivered sample.
    pub sample: GestureSample,
}

/// Runs one interpreter per enabled axis; the first to accept a drag owns it.
#[derive(Debug, Clone)]
pub struct GestureRouter {
    interpreters: Vec<PanInterpreter>,
    owner: Option<usize>,
}

impl GestureRouter {
    /// Create a router with interpreters for `axes`, in priority order.
    pub fn new(axes: &[Axis]) -> Self {
        Self {
            interpreters: axes.iter().copied().map(PanInterpreter::new).collect(),
            owner: None,
        }
    }

    /// Axes this router listens on.
    pub fn axes(&self) -> Vec<Axis> {
        self.interpreters.iter().map(PanInterpreter::axis).collect()
    }

    /// Axis of the interpreter owning the current drag.
    pub fn active_axis(&self) -> Option<Axis> {
        self.owner.map(|index| self.interpreters[index].axis())
    }

    /// Feed one raw sample.
    ///
    /// On `Began`, interpreters are tried in order and the first that does
    /// not reject the drag owns it. If all reject, a single `Cancelled`
    /// sample is delivered on the first axis and the drag is swallowed.
    pub fn route(&mut self, sample: GestureSample) -> Option<RoutedSample> {
        if sample.phase == GesturePhase::Began {
            return self.begin(sample);
        }

        let index = self.owner?;
        let interpreter = &mut self.interpreters[index];
        let axis = interpreter.axis();
        let delivered = interpreter.interpret(sample);
        if sample.phase.is_terminal() {
            self.owner = None;
        }
        delivered.map(|sample| RoutedSample { axis, sample })
    }

    fn begin(&mut self, sample: GestureSample) -> Option<RoutedSample> {
        for interpreter in &mut self.interpreters {
            interpreter.reset();
        }
        self.owner = None;

        let mut rejection = None;
        for (index, interpreter) in self.interpreters.iter_mut().enumerate() {
            let Some(delivered) = interpreter.interpret(sample) else {
                continue;
            };
            if delivered.phase == GesturePhase::Began {
                self.owner = Some(index);
                return Some(RoutedSample {
                    axis: interpreter.axis(),
                    sample: delivered,
                });
            }
            if rejection.is_none() {
                rejection = Some(RoutedSample {
                    axis: interpreter.axis(),
                    sample: delivered,
                });
            }
        }
        rejection
    }
}

#[cfg(test)]
#[path = "gesture_tests.rs"]
mod tests;
