//! Domain-level keyboard actions independent of key bindings.

/// Actions the terminal host can perform in response to a key press.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to DeckAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckAction {
    /// Surface a freshly generated card on top of the stack. Default: t
    SurfaceCard,
    /// Put the retained undo card back on top. Default: u
    Undo,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}
