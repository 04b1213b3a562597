//! Swipe and refill notifications.
//!
//! Two independent sinks receive each event: an optional delegate called
//! in-line, and lazily created broadcast streams any number of subscribers
//! can listen on. Streams publish only; late subscribers see nothing that
//! fired before they subscribed.

use crate::model::Swipe;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::trace;

/// Observer notified synchronously of every completed swipe.
pub trait SwipeDelegate<I> {
    /// A card was dismissed.
    fn on_swipe(&mut self, swipe: &Swipe<I>);
}

impl<I, F> SwipeDelegate<I> for F
where
    F: FnMut(&Swipe<I>),
{
    fn on_swipe(&mut self, swipe: &Swipe<I>) {
        self(swipe)
    }
}

/// Handle to a broadcast channel.
///
/// Clones share the channel. Engine-thread only.
pub struct EventStream<T> {
    subscribers: Rc<RefCell<Vec<Sender<T>>>>,
}

impl<T: Clone> EventStream<T> {
    /// Create a channel with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Start receiving events published from now on.
    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.borrow_mut().push(tx);
        rx
    }

    /// Send `event` to every live subscriber.
    ///
    /// Subscribers whose receiver was dropped are forgotten. Returns how many
    /// subscribers received the event.
    pub fn publish(&self, event: &T) -> usize {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        subscribers.len()
    }

    /// Number of subscribers still registered.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Whether two handles refer to the same channel.
    pub fn same_channel(&self, other: &EventStream<T>) -> bool {
        Rc::ptr_eq(&self.subscribers, &other.subscribers)
    }
}

impl<T: Clone> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EventStream<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

/// Fan-out of swipe and refill-needed events to the registered sinks.
pub struct EventBus<I> {
    delegate: Option<Box<dyn SwipeDelegate<I>>>,
    swipes: Option<EventStream<Swipe<I>>>,
    refills: Option<EventStream<Swipe<I>>>,
}

impl<I: Clone> EventBus<I> {
    /// A bus with no sinks.
    pub fn new() -> Self {
        Self {
            delegate: None,
            swipes: None,
            refills: None,
        }
    }

    /// Register the in-line observer, replacing any previous one.
    pub fn set_delegate(&mut self, delegate: Box<dyn SwipeDelegate<I>>) {
        self.delegate = Some(delegate);
    }

    /// Whether a delegate is registered.
    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// The swipe stream, created on first request.
    pub fn swipe_stream(&mut self) -> EventStream<Swipe<I>> {
        self.swipes.get_or_insert_with(EventStream::new).clone()
    }

    /// The refill-needed stream, created on first request.
    pub fn refill_stream(&mut self) -> EventStream<Swipe<I>> {
        self.refills.get_or_insert_with(EventStream::new).clone()
    }

    /// Deliver a completed swipe to the delegate and the swipe stream.
    pub fn emit_swipe(&mut self, swipe: &Swipe<I>) {
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.on_swipe(swipe);
        }
        if let Some(stream) = &self.swipes {
            let delivered = stream.publish(swipe);
            trace!(delivered, "Published swipe");
        }
    }

    /// Deliver a refill-needed signal to the refill stream.
    pub fn emit_refill(&self, swipe: &Swipe<I>) {
        if let Some(stream) = &self.refills {
            let delivered = stream.publish(swipe);
            trace!(delivered, "Published refill request");
        }
    }
}

impl<I: Clone> Default for EventBus<I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SwipeDirection;
    use std::cell::Cell;

    fn swipe(direction: SwipeDirection, item: u32) -> Swipe<u32> {
        Swipe::new(direction, item)
    }

    #[test]
    fn stream_delivers_to_every_subscriber() {
        let stream = EventStream::new();
        let a = stream.subscribe();
        let b = stream.subscribe();

        assert_eq!(stream.publish(&7), 2);
        assert_eq!(a.try_recv(), Ok(7));
        assert_eq!(b.try_recv(), Ok(7));
    }

    #[test]
    fn late_subscriber_sees_no_replay() {
        let stream = EventStream::new();
        stream.publish(&1);
        let late = stream.subscribe();
        assert!(late.try_recv().is_err());

        stream.publish(&2);
        assert_eq!(late.try_recv(), Ok(2));
    }

    #[test]
    fn dropped_subscribers_are_forgotten() {
        let stream = EventStream::new();
        let kept = stream.subscribe();
        drop(stream.subscribe());

        assert_eq!(stream.publish(&3), 1);
        assert_eq!(stream.subscriber_count(), 1);
        assert_eq!(kept.try_recv(), Ok(3));
    }

    #[test]
    fn clones_share_the_channel() {
        let stream: EventStream<u32> = EventStream::new();
        let clone = stream.clone();
        let rx = clone.subscribe();
        stream.publish(&5);
        assert_eq!(rx.try_recv(), Ok(5));
        assert!(stream.same_channel(&clone));
        assert!(!stream.same_channel(&EventStream::new()));
    }

    #[test]
    fn bus_streams_are_created_once() {
        let mut bus: EventBus<u32> = EventBus::new();
        let first = bus.swipe_stream();
        let second = bus.swipe_stream();
        assert!(first.same_channel(&second));

        let refill = bus.refill_stream();
        assert!(refill.same_channel(&bus.refill_stream()));
        assert!(!refill.same_channel(&first));
    }

    #[test]
    fn emit_swipe_reaches_delegate_and_stream() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);

        let mut bus: EventBus<u32> = EventBus::new();
        bus.set_delegate(Box::new(move |_: &Swipe<u32>| seen.set(seen.get() + 1)));
        let rx = bus.swipe_stream().subscribe();

        bus.emit_swipe(&swipe(SwipeDirection::Right, 4));

        assert_eq!(calls.get(), 1);
        assert_eq!(rx.try_recv(), Ok(swipe(SwipeDirection::Right, 4)));
    }

    #[test]
    fn emit_without_sinks_is_a_no_op() {
        let mut bus: EventBus<u32> = EventBus::new();
        bus.emit_swipe(&swipe(SwipeDirection::Left, 1));
        bus.emit_refill(&swipe(SwipeDirection::Left, 1));
        assert!(!bus.has_delegate());
    }

    #[test]
    fn refill_signal_does_not_reach_swipe_stream() {
        let mut bus: EventBus<u32> = EventBus::new();
        let swipes = bus.swipe_stream().subscribe();
        let refills = bus.refill_stream().subscribe();

        bus.emit_refill(&swipe(SwipeDirection::Left, 2));

        assert!(swipes.try_recv().is_err());
        assert_eq!(refills.try_recv(), Ok(swipe(SwipeDirection::Left, 2)));
    }
}
