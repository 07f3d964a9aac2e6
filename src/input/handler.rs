use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::game::{Direction, GameState};

pub const ARROW_UP: &str = "ArrowUp";
pub const ARROW_DOWN: &str = "ArrowDown";
pub const ARROW_LEFT: &str = "ArrowLeft";
pub const ARROW_RIGHT: &str = "ArrowRight";

/// Turns key names into direction changes on a [`GameState`]
#[derive(Debug, Clone, Copy, Default)]
pub struct InputMapper;

impl InputMapper {
    pub fn new() -> Self {
        Self
    }

    /// The direction a key name asks for. Only the four arrow keys map.
    pub fn map_key(&self, key: &str) -> Option<Direction> {
        match key {
            ARROW_UP => Some(Direction::Up),
            ARROW_DOWN => Some(Direction::Down),
            ARROW_LEFT => Some(Direction::Left),
            ARROW_RIGHT => Some(Direction::Right),
            _ => None,
        }
    }

    /// Apply a key press to `state.direction`.
    ///
    /// A turn straight back into the neck is dropped. The check is against
    /// the direction held right now, so two quick turns between ticks can
    /// still reverse the snake. Returns true if the direction was written.
    pub fn on_key(&self, state: &mut GameState, key: &str) -> bool {
        let Some(candidate) = self.map_key(key) else {
            return false;
        };

        if state.direction.is_opposite(candidate) {
            debug!(?candidate, current = ?state.direction, "reversal ignored");
            return false;
        }

        state.direction = candidate;
        true
    }
}

/// What a terminal key press means to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// A key name for the game's input mapper
    Steer(&'static str),
    Restart,
    Quit,
    None,
}

/// Translates crossterm key events for the terminal frontend
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Steer(ARROW_UP),
            KeyCode::Down => KeyAction::Steer(ARROW_DOWN),
            KeyCode::Left => KeyAction::Steer(ARROW_LEFT),
            KeyCode::Right => KeyAction::Steer(ARROW_RIGHT),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
