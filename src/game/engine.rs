use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info};

use super::{
    action::Direction,
    config::GameConfig,
    events::{ChangeSet, GameEvent},
    food::place_food,
    state::{CollisionType, GameState, Position},
};

/// The game engine that advances a [`GameState`] one tick at a time
pub struct TickEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl TickEngine<ThreadRng> {
    /// Create a new tick engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> TickEngine<R> {
    /// Create an engine drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh game: one segment in the middle, heading right, random food
    pub fn reset(&mut self) -> GameState {
        let grid_size = self.config.grid_size;
        let segments = vec![GameState::start_position(grid_size)];
        let food = self.spawn_food(grid_size, &segments);

        info!(grid_size, ?food, "new game");
        GameState::new(segments, Direction::Right, food, grid_size)
    }

    /// Execute one tick of the game.
    ///
    /// A finished game is left untouched and yields an empty change-set.
    pub fn step(&mut self, state: &mut GameState) -> ChangeSet {
        let mut changes = ChangeSet::new();
        if state.game_over {
            return changes;
        }

        let new_head = state.head().moved_in_direction(state.direction);

        if let Some(cause) = check_collision(state, new_head) {
            state.game_over = true;
            state.collision = Some(cause);
            info!(?cause, score = state.score, length = state.len(), "game over");
            changes.push(GameEvent::GameOver { cause });
            return changes;
        }

        state.segments.insert(0, new_head);

        if new_head.same_cell(state.food) {
            state.score += self.config.food_reward;
            changes.push(GameEvent::ScoreChanged(state.score));

            state.food = self.spawn_food(state.grid_size, &state.segments);
            changes.push(GameEvent::FoodPlaced(state.food));
            debug!(score = state.score, food = ?state.food, "food eaten");
        } else {
            state.segments.pop();
        }

        changes.push(GameEvent::SegmentsUpdated(state.segments.clone()));
        debug!(head = ?new_head, length = state.len(), "tick");
        changes
    }

    fn spawn_food(&mut self, grid_size: i32, segments: &[Position]) -> Position {
        place_food(&mut self.rng, grid_size, segments, self.config.food_placement)
    }
}

/// Wall hits win over self hits. Every current segment counts, including a
/// tail that this tick would have moved off.
fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
    if !state.is_in_bounds(pos) {
        return Some(CollisionType::Wall);
    }

    if state.occupies(pos) {
        return Some(CollisionType::SelfCollision);
    }

    None
}
