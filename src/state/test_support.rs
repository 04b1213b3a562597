//! Item and view doubles shared by the state unit tests.
//!
//! Views record every hook call in a per-thread journal so tests can observe
//! cards after the engine has dropped them.

use crate::model::{CardView, SwipableItem};
use std::cell::RefCell;

/// A hook call observed on a [`TestView`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Created(u32),
    Swiped { id: u32, liked: bool, opacity: f64 },
    Reset(u32),
    Dismissed(u32),
}

thread_local! {
    static JOURNAL: RefCell<Vec<ViewEvent>> = const { RefCell::new(Vec::new()) };
}

fn record(event: ViewEvent) {
    JOURNAL.with(|journal| journal.borrow_mut().push(event));
}

/// Drain this thread's journal.
pub fn take_journal() -> Vec<ViewEvent> {
    JOURNAL.with(|journal| std::mem::take(&mut *journal.borrow_mut()))
}

/// Number of views created on this thread so far (journal left untouched).
pub fn created_views() -> usize {
    JOURNAL.with(|journal| {
        journal
            .borrow()
            .iter()
            .filter(|event| matches!(event, ViewEvent::Created(_)))
            .count()
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestItem {
    pub id: u32,
    pub undoable: bool,
}

impl TestItem {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            undoable: false,
        }
    }

    pub fn undoable(id: u32) -> Self {
        Self { id, undoable: true }
    }
}

impl SwipableItem for TestItem {
    type View = TestView;

    fn create_view(&self) -> TestView {
        record(ViewEvent::Created(self.id));
        TestView {
            id: self.id,
            undoable: self.undoable,
            item: None,
        }
    }
}

#[derive(Debug)]
pub struct TestView {
    pub id: u32,
    undoable: bool,
    item: Option<TestItem>,
}

impl CardView for TestView {
    type Item = TestItem;

    fn respond_to_swipe(&mut self, liked: bool, opacity: f64) {
        record(ViewEvent::Swiped {
            id: self.id,
            liked,
            opacity,
        });
    }

    fn reset_visual_state(&mut self) {
        record(ViewEvent::Reset(self.id));
    }

    fn respond_to_dismissed(&mut self) {
        record(ViewEvent::Dismissed(self.id));
    }

    fn is_undoable(&self) -> bool {
        self.undoable
    }

    fn item(&self) -> Option<&TestItem> {
        self.item.as_ref()
    }

    fn set_item(&mut self, item: TestItem) {
        self.item = Some(item);
    }
}
