//! Acceptance test harness.
//!
//! Drives a [`TuiApp`] on a `TestBackend` with synthetic keys, mouse drags,
//! and clock ticks, and reads back what was drawn.

use crate::model::{AppError, Swipe, SwipeOptions};
use crate::source::{CardSource, DemoCard, detect_card_source};
use crate::state::SwipeEngine;
use crate::view::{TickAnimator, TuiApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{Terminal, backend::TestBackend};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Cards per generated batch in harness runs.
pub const HARNESS_BATCH: usize = 20;

/// Convert a TestBackend buffer to a string, one line per non-empty row.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Wraps `TuiApp<TestBackend>` behind a user-level API.
pub struct DeckHarness {
    app: TuiApp<TestBackend>,
    clock: Instant,
    pointer: (u16, u16),
    running: bool,
}

impl DeckHarness {
    /// Generated cards, default options, 80x24 terminal.
    pub fn new() -> Self {
        Self::with_options(SwipeOptions::default(), 80, 24)
    }

    /// Generated cards with custom options and size.
    pub fn with_options(options: SwipeOptions, width: u16, height: u16) -> Self {
        Self::build(CardSource::generated(HARNESS_BATCH), options, width, height)
            .expect("TestBackend terminal should build")
    }

    /// Cards from a deck fixture.
    pub fn from_deck_fixture(
        path: &str,
        options: SwipeOptions,
        width: u16,
        height: u16,
    ) -> Result<Self, AppError> {
        let source = detect_card_source(Some(PathBuf::from(path)), HARNESS_BATCH)?;
        Ok(Self::build(source, options, width, height)?)
    }

    fn build(
        source: CardSource,
        options: SwipeOptions,
        width: u16,
        height: u16,
    ) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        Ok(Self {
            app: TuiApp::new_for_test(terminal, source, options),
            clock: Instant::now(),
            pointer: (0, 0),
            running: true,
        })
    }

    /// Send a key; returns true once the app has quit.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }
        if self.app.handle_key_test(KeyEvent::new(key, mods)) {
            self.running = false;
        }
        !self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16, after: Duration) {
        self.clock += after;
        let event = MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        self.app.handle_mouse_test(event, self.clock);
    }

    /// Press at `from` and move through `path`, one step per `step`,
    /// without releasing.
    pub fn hold(&mut self, from: (u16, u16), path: &[(u16, u16)], step: Duration) {
        let left = MouseButton::Left;
        self.mouse(MouseEventKind::Down(left), from.0, from.1, Duration::ZERO);
        self.pointer = from;
        for &(column, row) in path {
            self.mouse(MouseEventKind::Drag(left), column, row, step);
            self.pointer = (column, row);
        }
    }

    /// Release where the pointer last was, `after` the last move.
    pub fn release(&mut self, after: Duration) {
        let (column, row) = self.pointer;
        self.mouse(MouseEventKind::Up(MouseButton::Left), column, row, after);
    }

    /// [`hold`](Self::hold), then [`release`](Self::release).
    pub fn drag(
        &mut self,
        from: (u16, u16),
        path: &[(u16, u16)],
        step: Duration,
        release_after: Duration,
    ) {
        self.hold(from, path, step);
        self.release(release_after);
    }

    /// Quick flick from the card center to `column` on the same row.
    pub fn flick_to_column(&mut self, column: u16) {
        let area = self.app.card_area();
        let center = (area.x + area.width / 2, area.y + area.height / 2);
        self.drag(
            center,
            &[(column, center.1)],
            Duration::from_millis(10),
            Duration::from_millis(10),
        );
    }

    /// Quick flick from the card center to `row` in the same column.
    pub fn flick_to_row(&mut self, row: u16) {
        let area = self.app.card_area();
        let center = (area.x + area.width / 2, area.y + area.height / 2);
        self.drag(
            center,
            &[(center.0, row)],
            Duration::from_millis(10),
            Duration::from_millis(10),
        );
    }

    /// Let `elapsed` pass on the animation clock.
    pub fn advance(&mut self, elapsed: Duration) {
        self.clock += elapsed;
        self.app.tick_test(elapsed);
    }

    /// Advance in frame-sized steps until nothing animates.
    pub fn settle(&mut self) {
        for _ in 0..1000 {
            if self.app.engine().animator().is_idle() {
                return;
            }
            self.advance(crate::view::constants::FRAME_INTERVAL);
        }
        panic!("animations never settled");
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.app.handle_resize_test(width, height);
        self.app
            .terminal_mut()
            .backend_mut()
            .resize(width, height);
    }

    pub fn engine(&self) -> &SwipeEngine<DemoCard, TickAnimator> {
        self.app.engine()
    }

    pub fn last_swipe(&self) -> Option<&Swipe<DemoCard>> {
        self.app.last_swipe()
    }

    /// Titles of the rendered stack, topmost first.
    pub fn titles(&self) -> Vec<String> {
        self.engine()
            .cards()
            .iter()
            .map(|card| card.item().title.clone())
            .collect()
    }

    /// Draw a frame and return the buffer as text.
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
