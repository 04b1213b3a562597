//! Data queue and rendered stack bookkeeping.
//!
//! The queue holds items that have not been materialized yet (FIFO). The
//! stack holds materialized cards, index 0 being the topmost card.

use crate::model::{CardLayout, CardView, SwipableItem, SwipeDirection};
use crate::state::animation::AnimationTicket;
use std::collections::VecDeque;
use std::fmt;

/// Stable identity of a materialized card.
///
/// Indices shift when cards are surfaced on top or removed; ids never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(u64);

impl CardId {
    /// Get the raw id value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// What a rendered card is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardMotion {
    /// At rest on the visible origin.
    Resting,
    /// Following a drag.
    Dragging,
    /// Returning to rest.
    SnappingBack {
        /// Ticket of the snap-back animation.
        ticket: AnimationTicket,
    },
    /// Leaving the stack; no longer interactive.
    Dismissing {
        /// Ticket of the dismissal animation.
        ticket: AnimationTicket,
        /// Direction it was swiped in.
        direction: SwipeDirection,
    },
}

impl CardMotion {
    /// True once a dismissal has started.
    pub fn is_dismissing(&self) -> bool {
        matches!(self, Self::Dismissing { .. })
    }
}

/// A materialized card in the stack.
pub struct RenderedCard<I: SwipableItem> {
    pub(crate) id: CardId,
    pub(crate) item: I,
    pub(crate) view: I::View,
    pub(crate) layout: CardLayout,
    pub(crate) motion: CardMotion,
}

impl<I: SwipableItem> RenderedCard<I> {
    /// Stable id of the card.
    pub fn id(&self) -> CardId {
        self.id
    }

    /// The item this card was materialized from.
    pub fn item(&self) -> &I {
        &self.item
    }

    /// The card's view.
    pub fn view(&self) -> &I::View {
        &self.view
    }

    /// Model layout: where the card is, or where its animation will leave it.
    pub fn layout(&self) -> &CardLayout {
        &self.layout
    }

    /// Current motion.
    pub fn motion(&self) -> CardMotion {
        self.motion
    }
}

/// Queue of pending items plus the stack of materialized cards.
pub struct CardDeck<I: SwipableItem> {
    queue: VecDeque<I>,
    stack: Vec<RenderedCard<I>>,
    next_id: u64,
}

impl<I: SwipableItem> CardDeck<I> {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            stack: Vec::new(),
            next_id: 0,
        }
    }

    /// Append an item to the back of the queue.
    pub fn enqueue(&mut self, item: I) {
        self.queue.push_back(item);
    }

    /// Number of items waiting to be materialized.
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of materialized cards, including ones being dismissed.
    pub fn rendered_len(&self) -> usize {
        self.stack.len()
    }

    /// Rendered plus queued.
    pub fn total_len(&self) -> usize {
        self.stack.len() + self.queue.len()
    }

    /// True when rendered plus queued is at or below `threshold`.
    pub fn needs_refill(&self, threshold: usize) -> bool {
        self.total_len() <= threshold
    }

    /// Materialize queued items at the bottom of the stack until it holds
    /// `max_rendered` cards or the queue runs dry.
    ///
    /// Returns how many cards were materialized.
    pub fn refill(&mut self, max_rendered: usize, resting: CardLayout) -> usize {
        let mut materialized = 0;
        while self.stack.len() < max_rendered {
            let Some(item) = self.queue.pop_front() else {
                break;
            };
            let card = self.materialize(item, resting);
            self.stack.push(card);
            materialized += 1;
        }
        materialized
    }

    /// Materialize `item` straight onto the top of the stack.
    pub fn push_top(&mut self, item: I, resting: CardLayout) -> CardId {
        let card = self.materialize(item, resting);
        let id = card.id;
        self.stack.insert(0, card);
        id
    }

    /// Remove a card from the stack.
    pub fn remove(&mut self, id: CardId) -> Option<RenderedCard<I>> {
        let index = self.stack.iter().position(|card| card.id == id)?;
        Some(self.stack.remove(index))
    }

    /// The topmost card that is not being dismissed.
    pub fn top_interactive(&self) -> Option<&RenderedCard<I>> {
        self.stack.iter().find(|card| !card.motion.is_dismissing())
    }

    /// Look up a card.
    pub fn get(&self, id: CardId) -> Option<&RenderedCard<I>> {
        self.stack.iter().find(|card| card.id == id)
    }

    /// Look up a card mutably.
    pub fn get_mut(&mut self, id: CardId) -> Option<&mut RenderedCard<I>> {
        self.stack.iter_mut().find(|card| card.id == id)
    }

    /// Cards top first.
    pub fn cards(&self) -> &[RenderedCard<I>] {
        &self.stack
    }

    /// Cards top first, mutably.
    pub fn cards_mut(&mut self) -> impl Iterator<Item = &mut RenderedCard<I>> {
        self.stack.iter_mut()
    }

    /// Queued items, front first.
    pub fn queued(&self) -> impl Iterator<Item = &I> {
        self.queue.iter()
    }

    fn materialize(&mut self, item: I, layout: CardLayout) -> RenderedCard<I> {
        let mut view = item.create_view();
        view.set_item(item.clone());
        let id = CardId(self.next_id);
        self.next_id += 1;
        RenderedCard {
            id,
            item,
            view,
            layout,
            motion: CardMotion::Resting,
        }
    }
}

impl<I: SwipableItem> Default for CardDeck<I> {
    fn default() -> Self {
        Self::new()
    }
}
