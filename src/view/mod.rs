//! TUI rendering and terminal management (impure shell)

pub mod animator;
pub mod constants;
pub mod gesture_tracker;
pub mod render;

pub use animator::TickAnimator;
pub use gesture_tracker::{MouseGestureTracker, cell_to_point};
pub use render::{CardFrame, StatusLine, border_type, card_rect, render_cards, render_status};

use crate::config::keybindings::KeyBindings;
use crate::model::{CardLayout, CardView, DeckAction, Size, Swipe, SwipeOptions};
use crate::source::{CardSource, DemoCard};
use crate::state::{CardMotion, RenderedCard, SwipeEngine};
use constants::{
    CELL_HEIGHT_POINTS, CELL_WIDTH_POINTS, FRAME_INTERVAL, IDLE_POLL_INTERVAL, STATUS_BAR_HEIGHT,
};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEvent, KeyEventKind, MouseEvent},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{self, Stdout};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    engine: SwipeEngine<DemoCard, TickAnimator>,
    source: CardSource,
    key_bindings: KeyBindings,
    tracker: MouseGestureTracker,
    swipes: Receiver<Swipe<DemoCard>>,
    refills: Receiver<Swipe<DemoCard>>,
    last_swipe: Option<Swipe<DemoCard>>,
    /// Area the stack is drawn into; mouse positions are relative to it.
    card_area: Rect,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(source: CardSource, options: SwipeOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Self::with_terminal(terminal, source, options, KeyBindings::default())
    }

    /// Main event loop
    ///
    /// Returns when the user quits (q or Ctrl+C). Polls at frame rate while
    /// cards are moving and slows down when everything rests.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;
        let mut last_tick = Instant::now();

        loop {
            let timeout = if self.is_animating() {
                FRAME_INTERVAL
            } else {
                IDLE_POLL_INTERVAL
            };

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse, Instant::now()),
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => {}
                }
            }

            let now = Instant::now();
            self.tick(now.saturating_duration_since(last_tick));
            last_tick = now;
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Wire an engine to `terminal` and load the source's initial cards.
    fn with_terminal(
        terminal: Terminal<B>,
        mut source: CardSource,
        options: SwipeOptions,
        key_bindings: KeyBindings,
    ) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let card_area = card_area_for(Rect::new(0, 0, size.width, size.height));

        let mut engine = SwipeEngine::new(points_of(card_area), TickAnimator::new());
        let swipes = engine.swipe_stream().subscribe();
        let refills = engine.refill_stream().subscribe();
        engine.setup(Some(options), None);

        let initial = source.initial_cards();
        info!(cards = initial.len(), "Loading initial cards");
        for card in initial {
            engine.add_card(card);
        }

        Ok(Self {
            terminal,
            engine,
            source,
            key_bindings,
            tracker: MouseGestureTracker::new(),
            swipes,
            refills,
            last_swipe: None,
            card_area,
        })
    }

    fn is_animating(&self) -> bool {
        !self.engine.animator().is_idle() || self.tracker.is_dragging()
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.key_bindings.get(key) {
            Some(DeckAction::Quit) => return true,
            Some(DeckAction::SurfaceCard) => {
                let card = self.source.next_card();
                let title = card.title.clone();
                let id = self.engine.add_card_to_top(card);
                debug!(card = %id, %title, "Surfaced card");
            }
            Some(DeckAction::Undo) => self.undo(),
            None => {}
        }
        false
    }

    fn undo(&mut self) {
        let Some(view) = self.engine.take_undo_card() else {
            debug!("Nothing to undo");
            return;
        };
        if let Some(card) = view.item().cloned() {
            info!(card = card.id, title = %card.title, "Undoing swipe");
            self.engine.add_card_to_top(card);
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, at: Instant) {
        for sample in self.tracker.handle(mouse, self.card_area, at) {
            self.engine.handle_gesture(sample);
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        self.card_area = card_area_for(Rect::new(0, 0, width, height));
        self.engine.set_viewport(points_of(self.card_area));
    }

    /// Advance animations by `elapsed`, report finished ones, and react to
    /// the events they produced.
    fn tick(&mut self, elapsed: Duration) {
        let finished = self.engine.animator_mut().advance(elapsed);
        for ticket in finished {
            self.engine.complete_animation(ticket);
        }
        self.drain_events();
    }

    fn drain_events(&mut self) {
        for swipe in self.swipes.try_iter() {
            info!(
                direction = %swipe.direction,
                card = swipe.item.id,
                title = %swipe.item.title,
                "Swiped"
            );
            self.last_swipe = Some(swipe);
        }

        let requested = self.refills.try_iter().count();
        for _ in 0..requested {
            let batch = self.source.refill_batch();
            debug!(cards = batch.len(), "Refilling from source");
            for card in batch {
                self.engine.add_card(card);
            }
        }
    }

    fn status_line(&self) -> StatusLine {
        StatusLine {
            rendered: self.engine.rendered_len(),
            queued: self.engine.queued_len(),
            phase: self.engine.phase(),
            frozen: !self.engine.is_interaction_enabled(),
            last_swipe: self
                .last_swipe
                .as_ref()
                .map(|swipe| (swipe.direction, swipe.item.title.clone())),
        }
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let status = self.status_line();
        let card_area = self.card_area;
        let animator = self.engine.animator();
        let cards: Vec<CardFrame<'_>> = self
            .engine
            .cards()
            .iter()
            .map(|card| CardFrame {
                layout: presentation_layout(animator, card),
                view: card.view(),
            })
            .collect();

        self.terminal.draw(|frame| {
            render_cards(frame, card_area, &cards);
            render_status(frame, status_area(frame.area()), &status);
        })?;

        Ok(())
    }
}

/// Where `card` appears this frame: mid-animation if one is running for it,
/// otherwise its model layout.
fn presentation_layout(animator: &TickAnimator, card: &RenderedCard<DemoCard>) -> CardLayout {
    let ticket = match card.motion() {
        CardMotion::SnappingBack { ticket } | CardMotion::Dismissing { ticket, .. } => Some(ticket),
        CardMotion::Resting | CardMotion::Dragging => None,
    };
    ticket
        .and_then(|ticket| animator.presentation(ticket))
        .unwrap_or(*card.layout())
}

/// The frame minus the status bar.
fn card_area_for(frame: Rect) -> Rect {
    Rect {
        height: frame.height.saturating_sub(STATUS_BAR_HEIGHT),
        ..frame
    }
}

fn status_area(frame: Rect) -> Rect {
    let height = STATUS_BAR_HEIGHT.min(frame.height);
    Rect {
        y: frame.bottom().saturating_sub(height),
        height,
        ..frame
    }
}

/// Point size of a cell area.
fn points_of(area: Rect) -> Size {
    Size::new(
        f64::from(area.width) * CELL_WIDTH_POINTS,
        f64::from(area.height) * CELL_HEIGHT_POINTS,
    )
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used in every test module
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        source: CardSource,
        options: SwipeOptions,
    ) -> Self {
        match Self::with_terminal(terminal, source, options, KeyBindings::default()) {
            Ok(app) => app,
            Err(err) => panic!("test terminal failed: {err}"),
        }
    }

    pub(crate) fn engine(&self) -> &SwipeEngine<DemoCard, TickAnimator> {
        &self.engine
    }

    pub(crate) fn last_swipe(&self) -> Option<&Swipe<DemoCard>> {
        self.last_swipe.as_ref()
    }

    pub(crate) fn card_area(&self) -> Rect {
        self.card_area
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent, at: Instant) {
        self.handle_mouse(mouse, at)
    }

    pub(crate) fn handle_resize_test(&mut self, width: u16, height: u16) {
        self.handle_resize(width, height)
    }

    pub(crate) fn tick_test(&mut self, elapsed: Duration) {
        self.tick(elapsed)
    }

    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub(crate) fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

/// Initialize and run the TUI with a card source and engine options
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(source: CardSource, options: SwipeOptions) -> Result<(), TuiError> {
    let mut app = match TuiApp::new(source, options) {
        Ok(app) => app,
        Err(err) => {
            let _ = restore_terminal();
            return Err(err);
        }
    };

    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
