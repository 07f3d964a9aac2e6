//! Grid Snake - a snake game with a fixed-tick engine
//!
//! This library provides:
//! - Core game logic (game module): state, tick engine, food placement, sessions
//! - Keyboard input mapping (input module)
//! - Change-set driven scene and TUI rendering (render module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod render;
