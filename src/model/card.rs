//! Capabilities the engine consumes from the host's data and views.

/// A piece of data that can be swiped in the stack.
///
/// Items are cloned when a swipe is reported, so cheap handles (`Rc`, ids,
/// small structs) work best.
pub trait SwipableItem: Clone {
    /// The card view type materialized for this item.
    type View: CardView<Item = Self>;

    /// Build the view representing this item.
    ///
    /// Called exactly once per item, when it moves from the queue into the
    /// rendered stack. The engine binds the item to the returned view.
    fn create_view(&self) -> Self::View;
}

/// The visual representation of one item.
///
/// Views never lay themselves out; the engine owns position and transform.
/// Every hook has a no-op default.
pub trait CardView {
    /// The item type backing this view.
    type Item;

    /// The card is being dragged or thrown.
    ///
    /// `liked` tells which way it leans, `opacity` how far (unclamped; 1.0 is
    /// a quarter of the viewport away from the center).
    fn respond_to_swipe(&mut self, liked: bool, opacity: f64) {
        let _ = (liked, opacity);
    }

    /// The card is snapping back to rest; drop any swipe feedback.
    fn reset_visual_state(&mut self) {}

    /// The card has left the stack for good.
    fn respond_to_dismissed(&mut self) {}

    /// Whether the card may be kept around for an undo after dismissal.
    fn is_undoable(&self) -> bool {
        false
    }

    /// The backing item, if one has been bound.
    fn item(&self) -> Option<&Self::Item>;

    /// Bind the backing item.
    fn set_item(&mut self, item: Self::Item);
}
