//! The demo card item and its terminal view.

use crate::model::{CardView, SwipableItem};

/// One card of demo data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoCard {
    /// Unique within one run.
    pub id: u64,
    /// Headline, drawn in bold.
    pub title: String,
    /// Body text, may be empty.
    pub body: String,
    /// Whether the card may be restored with undo.
    pub undoable: bool,
}

impl DemoCard {
    /// An undoable card.
    pub fn new(id: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            undoable: true,
        }
    }
}

impl SwipableItem for DemoCard {
    type View = TextCardView;

    fn create_view(&self) -> TextCardView {
        TextCardView::new(self.undoable)
    }
}

/// Swipe feedback stamped onto a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stamp {
    /// Leaning toward a like.
    Like,
    /// Leaning toward a pass.
    Nope,
}

impl Stamp {
    /// Text drawn inside the stamp brackets.
    pub fn label(self) -> &'static str {
        match self {
            Stamp::Like => "LIKE",
            Stamp::Nope => "NOPE",
        }
    }
}

/// Text view of a [`DemoCard`].
///
/// Holds only presentation state; the engine owns placement.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCardView {
    item: Option<DemoCard>,
    undoable: bool,
    stamp: Option<Stamp>,
    stamp_strength: f64,
    dismissed: bool,
}

impl TextCardView {
    /// A blank view; the item arrives through [`CardView::set_item`].
    pub fn new(undoable: bool) -> Self {
        Self {
            item: None,
            undoable,
            stamp: None,
            stamp_strength: 0.0,
            dismissed: false,
        }
    }

    /// Current stamp, if the card leans far enough to show one.
    pub fn stamp(&self) -> Option<Stamp> {
        self.stamp
    }

    /// Stamp strength in `[0, 1]`.
    pub fn stamp_strength(&self) -> f64 {
        self.stamp_strength
    }

    /// Set once the card has left the stack.
    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Title of the bound card, empty before binding.
    pub fn title(&self) -> &str {
        self.item.as_ref().map_or("", |card| card.title.as_str())
    }

    /// Body of the bound card.
    pub fn body(&self) -> &str {
        self.item.as_ref().map_or("", |card| card.body.as_str())
    }
}

impl CardView for TextCardView {
    type Item = DemoCard;

    fn respond_to_swipe(&mut self, liked: bool, opacity: f64) {
        self.stamp_strength = opacity.clamp(0.0, 1.0);
        self.stamp = (self.stamp_strength > 0.0).then_some(if liked {
            Stamp::Like
        } else {
            Stamp::Nope
        });
    }

    fn reset_visual_state(&mut self) {
        self.stamp = None;
        self.stamp_strength = 0.0;
    }

    fn respond_to_dismissed(&mut self) {
        self.dismissed = true;
    }

    fn is_undoable(&self) -> bool {
        self.undoable
    }

    fn item(&self) -> Option<&DemoCard> {
        self.item.as_ref()
    }

    fn set_item(&mut self, item: DemoCard) {
        self.item = Some(item);
    }
}
