//! View-side state built purely from [`ChangeSet`]s.
//!
//! The game core never touches anything in here. A [`SceneView`] receives
//! each tick's change-set and keeps its own picture of the board: a pool of
//! cube positions centered on the origin, the food cube, the scoreboard text
//! and the game-over banner.

use std::time::{Duration, Instant};

use crate::game::{ChangeSet, CollisionType, GameEvent, Position};

/// Anything that can show the game by consuming change-sets
pub trait SceneView {
    fn apply(&mut self, changes: &ChangeSet);
}

/// A point in view space, with the grid centered on the origin
pub type WorldPoint = [f32; 3];

/// Grid coordinates shifted by `-grid_size / 2` on x and y
pub fn to_world(pos: Position, grid_size: i32) -> WorldPoint {
    let half = grid_size as f32 / 2.0;
    [pos.x as f32 - half, pos.y as f32 - half, pos.z as f32]
}

/// The grid cell a view-space point came from
pub fn to_cell(point: WorldPoint, grid_size: i32) -> Position {
    let half = grid_size as f32 / 2.0;
    Position {
        x: (point[0] + half).round() as i32,
        y: (point[1] + half).round() as i32,
        z: point[2].round() as i32,
    }
}

/// How a sync changed the cube pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolDelta {
    pub moved: usize,
    pub added: usize,
    pub removed: usize,
}

/// One cube per snake segment, reused from tick to tick
#[derive(Debug, Clone)]
pub struct CubePool {
    grid_size: i32,
    cubes: Vec<WorldPoint>,
}

impl CubePool {
    pub fn new(grid_size: i32) -> Self {
        Self {
            grid_size,
            cubes: Vec::new(),
        }
    }

    /// Reposition existing cubes, drop surplus ones and create missing ones
    pub fn sync(&mut self, segments: &[Position]) -> PoolDelta {
        let mut delta = PoolDelta::default();

        for (cube, segment) in self.cubes.iter_mut().zip(segments) {
            let target = to_world(*segment, self.grid_size);
            if *cube != target {
                *cube = target;
                delta.moved += 1;
            }
        }

        if self.cubes.len() > segments.len() {
            delta.removed = self.cubes.len() - segments.len();
            self.cubes.truncate(segments.len());
        }

        for segment in &segments[self.cubes.len()..] {
            self.cubes.push(to_world(*segment, self.grid_size));
            delta.added += 1;
        }

        delta
    }

    pub fn cubes(&self) -> &[WorldPoint] {
        &self.cubes
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }
}

/// Score display plus a few stats across games
pub struct Scoreboard {
    pub score: u32,
    pub high_score: u32,
    pub games_played: u32,
    pub start_time: Instant,
    pub elapsed_time: Duration,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            score: 0,
            high_score: 0,
            games_played: 0,
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
        }
    }

    /// The text shown for the current score
    pub fn text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
        self.high_score = self.high_score.max(score);
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.score = 0;
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self) {
        self.games_played += 1;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Scene state for the terminal frontend
pub struct TerminalScene {
    grid_size: i32,
    pub snake: CubePool,
    pub food: Option<WorldPoint>,
    pub scoreboard: Scoreboard,
    /// Shown once the game ends
    pub banner: Option<CollisionType>,
}

impl TerminalScene {
    pub fn new(grid_size: i32) -> Self {
        Self {
            grid_size,
            snake: CubePool::new(grid_size),
            food: None,
            scoreboard: Scoreboard::new(),
            banner: None,
        }
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// Clear the board for a new session, keeping scoreboard stats
    pub fn restart(&mut self, grid_size: i32) {
        self.grid_size = grid_size;
        self.snake = CubePool::new(grid_size);
        self.food = None;
        self.banner = None;
        self.scoreboard.on_game_start();
    }

    pub fn is_game_over(&self) -> bool {
        self.banner.is_some()
    }

    /// Grid cells of the snake, head first
    pub fn snake_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.snake
            .cubes()
            .iter()
            .map(|cube| to_cell(*cube, self.grid_size))
    }

    pub fn food_cell(&self) -> Option<Position> {
        self.food.map(|point| to_cell(point, self.grid_size))
    }
}

impl SceneView for TerminalScene {
    fn apply(&mut self, changes: &ChangeSet) {
        for event in changes {
            match event {
                GameEvent::ScoreChanged(score) => self.scoreboard.set_score(*score),
                GameEvent::FoodPlaced(food) => {
                    self.food = Some(to_world(*food, self.grid_size));
                }
                GameEvent::SegmentsUpdated(segments) => {
                    self.snake.sync(segments);
                }
                GameEvent::GameOver { cause } => {
                    if self.banner.is_none() {
                        self.scoreboard.on_game_over();
                    }
                    self.banner = Some(*cause);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, GameSession, GameState, TickEngine};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_world_offset_centers_grid() {
        assert_eq!(to_world(Position::new(10, 10), 20), [0.0, 0.0, 0.0]);
        assert_eq!(to_world(Position::new(0, 19), 20), [-10.0, 9.0, 0.0]);
        assert_eq!(to_world(Position::new(0, 0), 5), [-2.5, -2.5, 0.0]);
        assert_eq!(to_cell([-2.5, -2.5, 0.0], 5), Position::new(0, 0));
    }

    #[test]
    fn test_pool_grows_and_moves() {
        let mut pool = CubePool::new(20);

        let delta = pool.sync(&[Position::new(10, 10)]);
        assert_eq!(delta, PoolDelta { moved: 0, added: 1, removed: 0 });

        let delta = pool.sync(&[Position::new(11, 10), Position::new(10, 10)]);
        assert_eq!(delta, PoolDelta { moved: 1, added: 1, removed: 0 });
        assert_eq!(pool.cubes(), &[[1.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_pool_drops_surplus_cubes() {
        let mut pool = CubePool::new(20);
        pool.sync(&[Position::new(3, 3), Position::new(2, 3), Position::new(1, 3)]);

        let delta = pool.sync(&[Position::new(3, 3)]);

        assert_eq!(delta, PoolDelta { moved: 0, added: 0, removed: 2 });
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_scoreboard_text() {
        let mut scoreboard = Scoreboard::new();
        assert_eq!(scoreboard.text(), "Score: 0");

        scoreboard.set_score(30);
        assert_eq!(scoreboard.text(), "Score: 30");
        assert_eq!(scoreboard.high_score, 30);

        scoreboard.on_game_start();
        scoreboard.set_score(10);
        assert_eq!(scoreboard.high_score, 30);
    }

    #[test]
    fn test_time_formatting() {
        let mut scoreboard = Scoreboard::new();
        scoreboard.elapsed_time = Duration::from_secs(125);
        assert_eq!(scoreboard.format_time(), "02:05");

        scoreboard.elapsed_time = Duration::from_secs(3661);
        assert_eq!(scoreboard.format_time(), "61:01");
    }

    #[test]
    fn test_scene_follows_session() {
        let engine = TickEngine::with_rng(GameConfig::default(), StdRng::seed_from_u64(1));
        let mut session = GameSession::from_engine(engine);
        let mut scene = TerminalScene::new(20);

        scene.apply(&session.snapshot());
        for _ in 0..3 {
            let changes = session.tick();
            scene.apply(&changes);
        }

        let cells: Vec<Position> = scene.snake_cells().collect();
        assert_eq!(cells, session.state().segments);
        assert_eq!(scene.food_cell(), Some(session.state().food));
        assert_eq!(scene.scoreboard.score, session.state().score);
        assert!(!scene.is_game_over());
    }

    #[test]
    fn test_scene_shows_banner_once() {
        let mut engine = TickEngine::with_rng(GameConfig::default(), StdRng::seed_from_u64(1));
        let mut scene = TerminalScene::new(20);
        let mut state = GameState::new(
            vec![Position::new(0, 4)],
            Direction::Left,
            Position::new(9, 9),
            20,
        );

        scene.apply(&ChangeSet::snapshot(&state));
        scene.apply(&engine.step(&mut state));
        scene.apply(&engine.step(&mut state));

        assert_eq!(scene.banner, Some(CollisionType::Wall));
        assert_eq!(scene.scoreboard.games_played, 1);
        assert_eq!(
            scene.snake_cells().collect::<Vec<_>>(),
            vec![Position::new(0, 4)]
        );
    }
}
