//! A host driving the engine through its public API only.
//!
//! The host owns its own item type, reports animations itself, and listens
//! through both a delegate and the broadcast streams.

use std::cell::RefCell;
use std::rc::Rc;
use swipedeck::gesture::GestureSample;
use swipedeck::model::{
    CardView, Size, Swipe, SwipableItem, SwipeDirection, SwipeOptions, Vector,
};
use swipedeck::state::{AnimationKind, EnginePhase, RecordingAnimator, SwipeEngine};

#[derive(Debug, Clone, PartialEq)]
struct Photo {
    name: &'static str,
}

#[derive(Debug, Default)]
struct PhotoView {
    item: Option<Photo>,
    leaning: Option<bool>,
    dismissed: bool,
}

impl SwipableItem for Photo {
    type View = PhotoView;

    fn create_view(&self) -> PhotoView {
        PhotoView::default()
    }
}

impl CardView for PhotoView {
    type Item = Photo;

    fn respond_to_swipe(&mut self, liked: bool, _opacity: f64) {
        self.leaning = Some(liked);
    }

    fn reset_visual_state(&mut self) {
        self.leaning = None;
    }

    fn respond_to_dismissed(&mut self) {
        self.dismissed = true;
    }

    fn is_undoable(&self) -> bool {
        true
    }

    fn item(&self) -> Option<&Photo> {
        self.item.as_ref()
    }

    fn set_item(&mut self, item: Photo) {
        self.item = Some(item);
    }
}

const NAMES: [&str; 4] = ["dunes", "harbor", "glacier", "canyon"];

fn engine_with_photos(
    delegate_log: Rc<RefCell<Vec<Swipe<Photo>>>>,
) -> SwipeEngine<Photo, RecordingAnimator> {
    let mut engine = SwipeEngine::new(Size::new(400.0, 800.0), RecordingAnimator::new());
    engine.setup(
        Some(SwipeOptions {
            max_rendered_cards: 2,
            refill_threshold: 2,
            ..SwipeOptions::default()
        }),
        Some(Box::new(move |swipe: &Swipe<Photo>| {
            delegate_log.borrow_mut().push(swipe.clone())
        })),
    );
    for name in NAMES {
        engine.add_card(Photo { name });
    }
    engine
}

fn flick_left(engine: &mut SwipeEngine<Photo, RecordingAnimator>) {
    let velocity = Vector::new(-1500.0, 0.0);
    engine.handle_gesture(GestureSample::began(Vector::new(-8.0, 0.0), velocity));
    engine.handle_gesture(GestureSample::ended(Vector::new(-30.0, 0.0), velocity));
}

#[test]
fn flick_is_reported_to_delegate_and_streams_after_completion() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut engine = engine_with_photos(Rc::clone(&log));
    let swipes = engine.swipe_stream().subscribe();
    let refills = engine.refill_stream().subscribe();

    assert_eq!(engine.rendered_len(), 2);
    assert_eq!(engine.queued_len(), 2);

    flick_left(&mut engine);
    let request = *engine.animator().last().expect("dismiss requested");
    assert!(matches!(request.kind, AnimationKind::Move { destination } if destination.x < 0.0));
    assert_eq!(engine.cards()[0].view().leaning, Some(false));
    assert_eq!(engine.phase(), EnginePhase::Dismissing);
    assert!(log.borrow().is_empty());

    engine.complete_animation(request.ticket);

    let expected = Swipe::new(SwipeDirection::Left, Photo { name: "dunes" });
    assert_eq!(log.borrow().as_slice(), &[expected.clone()]);
    assert_eq!(swipes.try_recv().ok(), Some(expected.clone()));
    assert!(refills.try_recv().is_err(), "3 left is above the threshold of 2");

    let undo = engine.undo_card().expect("undo slot filled");
    assert!(undo.dismissed);
    assert_eq!(engine.rendered_len(), 2);
    assert_eq!(engine.queued_len(), 1);
    assert_eq!(engine.cards()[0].item(), &Photo { name: "harbor" });
}

#[test]
fn running_low_emits_refill_with_the_swipe() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut engine = engine_with_photos(Rc::clone(&log));
    let refills = engine.refill_stream().subscribe();

    for _ in 0..2 {
        flick_left(&mut engine);
        let ticket = engine.animator().last().expect("requested").ticket;
        engine.complete_animation(ticket);
    }

    let refill = refills.try_recv().expect("refill requested");
    assert_eq!(refill.item, Photo { name: "harbor" });
    assert!(engine.needs_refill());

    engine.add_card(Photo { name: "meadow" });
    assert_eq!(engine.data_count(), 3);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn surfaced_card_goes_on_top_and_is_dragged_next() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut engine = engine_with_photos(Rc::clone(&log));
    engine.add_card_to_top(Photo { name: "aurora" });

    assert_eq!(engine.rendered_len(), 3);
    flick_left(&mut engine);
    let ticket = engine.animator().last().expect("requested").ticket;
    engine.complete_animation(ticket);

    assert_eq!(log.borrow()[0].item, Photo { name: "aurora" });
}
