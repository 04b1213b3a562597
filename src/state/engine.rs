//! The swipe-stack interaction state machine.
//!
//! [`SwipeEngine`] owns the data queue, the rendered stack, and the undo
//! slot. Gesture samples drive it, animation completions re-enter it later.
//! It never blocks and never runs an animation itself.

use crate::geometry::{
    center_from_origin, dismiss_endpoint, dismiss_endpoint_with_velocity, drag_opacity,
    origin_from_center, throw_magnitude, transform_for, vertical_dismiss_endpoint,
    vertical_dismiss_endpoint_with_velocity,
};
use crate::gesture::{GesturePhase, GestureRouter, GestureSample, RoutedSample};
use crate::model::{
    Axis, CardLayout, CardTransform, CardView, Decoration, Point, Size, SwipableItem, Swipe,
    SwipeDirection, SwipeOptions, Vector, Viewport,
};
use crate::state::animation::{AnimationKind, AnimationRequest, AnimationTicket, Animator};
use crate::state::deck::{CardDeck, CardId, CardMotion, RenderedCard};
use crate::state::events::{EventBus, EventStream, SwipeDelegate};
use std::collections::HashMap;
use tracing::{debug, info};

/// Coarse state of the engine, as seen by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    /// Nothing moving.
    Idle,
    /// A drag is in progress.
    Dragging,
    /// A released card is returning to rest.
    SnappingBack,
    /// A card is flying off screen.
    Dismissing,
    /// Cards are being materialized from the queue.
    Refilling,
}

#[derive(Debug, Clone, Copy)]
enum PendingAnimation {
    SnapBack { card: CardId },
    Dismiss { card: CardId, direction: SwipeDirection },
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    card: CardId,
    axis: Axis,
}

/// Swipe-stack engine over items `I`, animated by `A`.
pub struct SwipeEngine<I: SwipableItem, A: Animator> {
    options: SwipeOptions,
    viewport: Viewport,
    deck: CardDeck<I>,
    router: GestureRouter,
    animator: A,
    events: EventBus<I>,
    undo_slot: Option<I::View>,
    pending: HashMap<AnimationTicket, PendingAnimation>,
    next_ticket: u64,
    drag: Option<DragSession>,
    interaction_enabled: bool,
    refilling: bool,
}

impl<I: SwipableItem, A: Animator> SwipeEngine<I, A> {
    /// Create an engine with default options for a viewport of `size`.
    pub fn new(size: Size, animator: A) -> Self {
        let options = SwipeOptions::default();
        let router = GestureRouter::new(&options.allowed_axes());
        Self {
            options,
            viewport: Viewport::new(size),
            deck: CardDeck::new(),
            router,
            animator,
            events: EventBus::new(),
            undo_slot: None,
            pending: HashMap::new(),
            next_ticket: 0,
            drag: None,
            interaction_enabled: true,
            refilling: false,
        }
    }

    /// Apply options and register the swipe delegate, then refill.
    ///
    /// `None` options fall back to the defaults. A `None` delegate keeps the
    /// one already registered.
    pub fn setup(
        &mut self,
        options: Option<SwipeOptions>,
        delegate: Option<Box<dyn SwipeDelegate<I>>>,
    ) {
        self.options = options.unwrap_or_default();
        self.router = GestureRouter::new(&self.options.allowed_axes());
        if let Some(session) = self.drag.take() {
            debug!(card = %session.card, "Setup interrupted a drag");
            self.snap_back(session.card);
        }
        if let Some(delegate) = delegate {
            self.events.set_delegate(delegate);
        }
        debug!(axes = ?self.router.axes(), "Engine set up");
        self.relayout_resting();
        self.refill();
    }

    /// Append an item to the queue and refill.
    pub fn add_card(&mut self, item: I) {
        self.deck.enqueue(item);
        self.refill();
    }

    /// Materialize `item` immediately as the new top card.
    ///
    /// A card being dragged is sent back to rest; the rest of that drag is
    /// ignored.
    pub fn add_card_to_top(&mut self, item: I) -> CardId {
        if let Some(session) = self.drag.take() {
            debug!(card = %session.card, "Surfaced card interrupted a drag");
            self.snap_back(session.card);
        }
        let resting = self.resting_layout();
        let id = self.deck.push_top(item, resting);
        debug!(card = %id, rendered = self.deck.rendered_len(), "Card surfaced on top");
        id
    }

    /// Run the refill check on demand.
    pub fn notify_dataset_updated(&mut self) {
        self.refill();
    }

    /// Feed one raw gesture sample.
    pub fn handle_gesture(&mut self, sample: GestureSample) {
        if !self.interaction_enabled {
            debug!(phase = ?sample.phase, "Interaction frozen, gesture ignored");
            return;
        }
        let Some(RoutedSample { axis, sample }) = self.router.route(sample) else {
            return;
        };

        match sample.phase {
            GesturePhase::Began => self.begin_drag(axis, sample),
            GesturePhase::Changed => {
                if let Some(session) = self.drag {
                    self.apply_drag(session, sample.translation);
                }
            }
            GesturePhase::Ended => self.release(sample),
            GesturePhase::Cancelled => {
                let card = match self.drag.take() {
                    Some(session) => Some(session.card),
                    None => self.deck.top_interactive().map(RenderedCard::id),
                };
                debug!(?card, "Gesture cancelled");
                if let Some(card) = card {
                    self.snap_back(card);
                }
            }
        }
    }

    /// Report that the animation issued with `ticket` has finished.
    ///
    /// Unknown, repeated, and superseded tickets are ignored.
    pub fn complete_animation(&mut self, ticket: AnimationTicket) {
        let Some(pending) = self.pending.remove(&ticket) else {
            debug!(ticket = ticket.get(), "Ignoring unknown animation ticket");
            return;
        };

        match pending {
            PendingAnimation::SnapBack { card } => {
                let Some(rendered) = self.deck.get_mut(card) else {
                    return;
                };
                if rendered.motion == (CardMotion::SnappingBack { ticket }) {
                    rendered.motion = CardMotion::Resting;
                    debug!(card = %card, "Snap-back finished");
                } else {
                    debug!(card = %card, "Stale snap-back completion ignored");
                }
            }
            PendingAnimation::Dismiss { card, direction } => self.finish_dismiss(card, direction),
        }
    }

    /// Handle to the swipe stream, created on first call.
    pub fn swipe_stream(&mut self) -> EventStream<Swipe<I>> {
        self.events.swipe_stream()
    }

    /// Handle to the refill-needed stream, created on first call.
    pub fn refill_stream(&mut self) -> EventStream<Swipe<I>> {
        self.events.refill_stream()
    }

    /// True when rendered plus queued is at or below the refill threshold.
    pub fn needs_refill(&self) -> bool {
        self.deck.needs_refill(self.options.refill_threshold)
    }

    /// Rendered plus queued.
    pub fn data_count(&self) -> usize {
        self.deck.total_len()
    }

    /// Items waiting in the queue.
    pub fn queued_len(&self) -> usize {
        self.deck.queued_len()
    }

    /// Materialized cards, including ones still animating away.
    pub fn rendered_len(&self) -> usize {
        self.deck.rendered_len()
    }

    /// Rendered cards, top first.
    pub fn cards(&self) -> &[RenderedCard<I>] {
        self.deck.cards()
    }

    /// Current coarse state.
    ///
    /// An active drag wins over animations of other cards.
    pub fn phase(&self) -> EnginePhase {
        if self.refilling {
            return EnginePhase::Refilling;
        }
        if self.drag.is_some() {
            return EnginePhase::Dragging;
        }
        let motions = || self.deck.cards().iter().map(RenderedCard::motion);
        if motions().any(|motion| motion.is_dismissing()) {
            EnginePhase::Dismissing
        } else if motions().any(|motion| matches!(motion, CardMotion::SnappingBack { .. })) {
            EnginePhase::SnappingBack
        } else {
            EnginePhase::Idle
        }
    }

    /// False while a frozen dismissal is in flight.
    pub fn is_interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    /// Motion of a rendered card.
    pub fn motion_of(&self, card: CardId) -> Option<CardMotion> {
        self.deck.get(card).map(RenderedCard::motion)
    }

    /// The retained undo card, if any.
    pub fn undo_card(&self) -> Option<&I::View> {
        self.undo_slot.as_ref()
    }

    /// Consume the retained undo card.
    pub fn take_undo_card(&mut self) -> Option<I::View> {
        self.undo_slot.take()
    }

    /// Resize the surface; resting cards move to the new resting layout.
    pub fn set_viewport(&mut self, size: Size) {
        if self.viewport.size == size {
            return;
        }
        debug!(width = size.width, height = size.height, "Viewport resized");
        self.viewport = Viewport::new(size);
        self.relayout_resting();
    }

    /// Options applied by the last [`setup`](Self::setup).
    pub fn options(&self) -> &SwipeOptions {
        &self.options
    }

    /// Current surface.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The animation executor.
    pub fn animator(&self) -> &A {
        &self.animator
    }

    /// Mutable access for hosts that drive the executor themselves.
    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    fn resting_layout(&self) -> CardLayout {
        CardLayout {
            center: center_from_origin(self.options.visible_origin, self.viewport.size),
            transform: CardTransform::IDENTITY,
            decoration: Decoration::NONE,
        }
    }

    fn relayout_resting(&mut self) {
        let resting = self.resting_layout();
        for card in self.deck.cards_mut() {
            if card.motion == CardMotion::Resting {
                card.layout = resting;
            }
        }
    }

    fn refill(&mut self) {
        self.refilling = true;
        let resting = self.resting_layout();
        let materialized = self.deck.refill(self.options.max_rendered_cards, resting);
        self.refilling = false;
        if materialized > 0 {
            debug!(
                materialized,
                rendered = self.deck.rendered_len(),
                queued = self.deck.queued_len(),
                "Refilled stack"
            );
        }
    }

    fn issue_ticket(&mut self) -> AnimationTicket {
        let ticket = AnimationTicket::new(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }

    fn begin_drag(&mut self, axis: Axis, sample: GestureSample) {
        if let Some(previous) = self.drag.take() {
            self.snap_back(previous.card);
        }
        let Some(card) = self.deck.top_interactive().map(RenderedCard::id) else {
            debug!("Drag began on an empty stack");
            return;
        };
        if let Some(rendered) = self.deck.get_mut(card) {
            rendered.motion = CardMotion::Dragging;
        }
        let session = DragSession { card, axis };
        self.drag = Some(session);
        debug!(card = %card, ?axis, "Drag began");
        self.apply_drag(session, sample.translation);
    }

    /// Move the dragged card to follow `translation` and update its feedback.
    fn apply_drag(&mut self, session: DragSession, translation: Vector) {
        let size = self.viewport.size;
        let center = center_from_origin(self.options.visible_origin + translation, size);
        let Some(card) = self.deck.get_mut(session.card) else {
            return;
        };
        card.layout = CardLayout {
            center,
            transform: transform_for(center, size),
            decoration: Decoration::SWIPING,
        };
        let liked = match session.axis {
            Axis::Horizontal => translation.dx > 0.0,
            Axis::Vertical => translation.dy < 0.0,
        };
        let opacity = drag_opacity(center, size, session.axis);
        card.view.respond_to_swipe(liked, opacity);
    }

    fn release(&mut self, sample: GestureSample) {
        let Some(session) = self.drag.take() else {
            return;
        };
        let Some(previous_center) = self.deck.get(session.card).map(|card| card.layout.center)
        else {
            return;
        };
        let previous_origin = origin_from_center(previous_center, self.viewport.size);
        self.apply_drag(session, sample.translation);

        let axis = session.axis;
        let thrown = throw_magnitude(sample.velocity) > self.options.throwing_threshold;
        let panned = sample.translation.along(axis).abs()
            > self.viewport.size.extent(axis) * self.options.pan_threshold(axis);

        let direction = if thrown {
            Some(direction_of(axis, sample.velocity.along(axis) > 0.0))
        } else if panned {
            let visible = self.options.visible_origin;
            let before = match axis {
                Axis::Horizontal => previous_origin.x < visible.x,
                Axis::Vertical => previous_origin.y < visible.y,
            };
            Some(direction_of(axis, !before))
        } else {
            None
        };

        match direction {
            Some(direction) => {
                debug!(card = %session.card, %direction, thrown, "Release dismisses card");
                self.dismiss(session.card, direction, sample.velocity);
            }
            None => {
                debug!(card = %session.card, "Release below thresholds");
                self.snap_back(session.card);
            }
        }
    }

    fn snap_back(&mut self, card: CardId) {
        let to = self.resting_layout();
        let ticket = self.issue_ticket();
        let duration = self.options.snap_duration;
        let Some(rendered) = self.deck.get_mut(card) else {
            return;
        };
        rendered.view.reset_visual_state();
        let from = rendered.layout;
        rendered.layout = to;
        rendered.motion = CardMotion::SnappingBack { ticket };

        self.pending.insert(ticket, PendingAnimation::SnapBack { card });
        debug!(card = %card, ticket = ticket.get(), "Snapping back");
        self.animator.animate(AnimationRequest {
            ticket,
            card,
            from,
            to,
            duration,
            kind: AnimationKind::Transform {
                transform: to.transform,
                decoration: to.decoration,
            },
        });
    }

    fn dismiss(&mut self, card: CardId, direction: SwipeDirection, velocity: Vector) {
        let Some(center) = self.deck.get(card).map(|rendered| rendered.layout.center) else {
            return;
        };
        let destination = self.dismiss_destination(center, direction, velocity);
        let size = self.viewport.size;
        let to = CardLayout {
            center: destination,
            transform: transform_for(destination, size),
            decoration: Decoration::SWIPING,
        };
        let liked = match direction.axis() {
            Axis::Horizontal => destination.x > 0.0,
            Axis::Vertical => destination.y < 0.0,
        };
        let opacity = if destination == self.viewport.center() {
            0.0
        } else {
            1.0
        };
        let ticket = self.issue_ticket();
        let duration = self.options.dismiss_animation_duration;

        let Some(rendered) = self.deck.get_mut(card) else {
            return;
        };
        rendered.view.respond_to_swipe(liked, opacity);
        let from = rendered.layout;
        rendered.layout = to;
        rendered.motion = CardMotion::Dismissing { ticket, direction };

        self.pending
            .insert(ticket, PendingAnimation::Dismiss { card, direction });
        if self.options.freeze_interaction_while_dismissing {
            self.interaction_enabled = false;
        }
        debug!(
            card = %card,
            ticket = ticket.get(),
            x = destination.x,
            y = destination.y,
            "Dismissing"
        );
        self.animator.animate(AnimationRequest {
            ticket,
            card,
            from,
            to,
            duration,
            kind: AnimationKind::Move { destination },
        });
    }

    /// Where a card centered at `center` flies to when dismissed.
    ///
    /// Position-based once the card has crossed the viewport center on the
    /// side it is leaving by, velocity-based for a moving release, otherwise
    /// the off-screen stack origin of `direction`.
    fn dismiss_destination(&self, center: Point, direction: SwipeDirection, velocity: Vector) -> Point {
        let size = self.viewport.size;
        let offset = center.offset_from(self.viewport.center());
        let crossed = match direction {
            SwipeDirection::Left => offset.dx < 0.0,
            SwipeDirection::Right => offset.dx > 0.0,
            SwipeDirection::Up => offset.dy < 0.0,
            SwipeDirection::Down => offset.dy > 0.0,
        };

        match (direction.axis(), crossed, velocity.is_zero()) {
            (Axis::Horizontal, true, _) => dismiss_endpoint(center, size),
            (Axis::Vertical, true, _) => vertical_dismiss_endpoint(center, size),
            (Axis::Horizontal, false, false) => dismiss_endpoint_with_velocity(center, size, velocity),
            (Axis::Vertical, false, false) => {
                vertical_dismiss_endpoint_with_velocity(center, size, velocity)
            }
            (_, false, true) => center_from_origin(direction.stack_origin(&self.viewport), size),
        }
    }

    fn finish_dismiss(&mut self, card: CardId, direction: SwipeDirection) {
        let Some(removed) = self.deck.remove(card) else {
            return;
        };
        let still_dismissing = self
            .pending
            .values()
            .any(|pending| matches!(pending, PendingAnimation::Dismiss { .. }));
        if !still_dismissing {
            self.interaction_enabled = true;
        }

        let RenderedCard { item, mut view, .. } = removed;
        view.respond_to_dismissed();
        self.undo_slot = (self.options.allow_undo && view.is_undoable()).then_some(view);

        self.refill();

        let swipe = Swipe::new(direction, item);
        info!(
            card = %card,
            %direction,
            remaining = self.deck.total_len(),
            "Card swiped"
        );
        self.events.emit_swipe(&swipe);

        if self.needs_refill() {
            info!(remaining = self.deck.total_len(), "Refill needed");
            self.events.emit_refill(&swipe);
        }
    }
}

fn direction_of(axis: Axis, positive: bool) -> SwipeDirection {
    match (axis, positive) {
        (Axis::Horizontal, true) => SwipeDirection::Right,
        (Axis::Horizontal, false) => SwipeDirection::Left,
        (Axis::Vertical, true) => SwipeDirection::Down,
        (Axis::Vertical, false) => SwipeDirection::Up,
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
