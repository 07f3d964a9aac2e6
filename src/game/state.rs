use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A cell position. The playing field is the z = 0 plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy, dz) = direction.delta();
        self.moved_by(dx, dy, dz)
    }

    /// True when both positions share a grid cell, ignoring height
    pub fn same_cell(&self, other: Position) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Body segments, with head at index 0
    pub segments: Vec<Position>,
    /// Direction the next tick moves in
    pub direction: Direction,
    pub food: Position,
    pub score: u32,
    /// Set once, never cleared
    pub game_over: bool,
    /// What ended the game, once it has ended
    pub collision: Option<CollisionType>,
    pub grid_size: i32,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        segments: Vec<Position>,
        direction: Direction,
        food: Position,
        grid_size: i32,
    ) -> Self {
        debug_assert!(!segments.is_empty(), "a snake has at least one segment");
        Self {
            segments,
            direction,
            food,
            score: 0,
            game_over: false,
            collision: None,
            grid_size,
        }
    }

    /// The cell a new session starts the snake on
    pub fn start_position(grid_size: i32) -> Position {
        Position::new(grid_size / 2, grid_size / 2)
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.grid_size && pos.y >= 0 && pos.y < self.grid_size
    }

    /// Check if any segment, tail included, sits on the cell of `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.iter().any(|segment| segment.same_cell(pos))
    }
}
