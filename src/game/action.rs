use serde::{Deserialize, Serialize};

/// Direction the snake can move on the grid plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four cardinal directions
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// The direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the unit vector (dx, dy, dz) for moving in this direction.
    ///
    /// The y axis grows downwards, so `Up` decrements y.
    pub fn delta(&self) -> (i32, i32, i32) {
        match self {
            Direction::Up => (0, -1, 0),
            Direction::Down => (0, 1, 0),
            Direction::Left => (-1, 0, 0),
            Direction::Right => (1, 0, 0),
        }
    }
}
