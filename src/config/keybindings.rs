//! Keyboard bindings configuration.

use crate::model::DeckAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to deck actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, DeckAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers take part in the lookup, so press and repeat
    /// events resolve alike.
    pub fn get(&self, key: KeyEvent) -> Option<DeckAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            (
                KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
                DeckAction::Quit,
            ),
            (
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                DeckAction::Quit,
            ),
            (
                KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE),
                DeckAction::SurfaceCard,
            ),
            (
                KeyEvent::new(KeyCode::Char('u'), KeyModifiers::NONE),
                DeckAction::Undo,
            ),
        ]);
        Self { bindings }
    }
}
