//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A [`TickEngine`] turns each tick into a [`ChangeSet`] that view layers consume.

pub mod action;
pub mod config;
pub mod engine;
pub mod events;
pub mod food;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, FoodPlacement, GameConfig, MAX_GRID_SIZE};
pub use engine::TickEngine;
pub use events::{ChangeSet, GameEvent};
pub use food::place_food;
pub use session::GameSession;
pub use state::{CollisionType, GameState, Position};
