//! Keyboard input: key names to snake directions, and crossterm events to key names

pub mod handler;

pub use handler::{InputHandler, InputMapper, KeyAction};
