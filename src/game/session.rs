use rand::rngs::ThreadRng;
use rand::Rng;

use super::{
    config::GameConfig,
    engine::TickEngine,
    events::ChangeSet,
    state::GameState,
};
use crate::input::InputMapper;

/// One game from start to game over, as driven by a host loop
pub struct GameSession<R: Rng = ThreadRng> {
    engine: TickEngine<R>,
    state: GameState,
    input: InputMapper,
    ticks: u64,
}

impl GameSession<ThreadRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::from_engine(TickEngine::new(config))
    }
}

impl<R: Rng> GameSession<R> {
    /// Start a session on a freshly reset state
    pub fn from_engine(mut engine: TickEngine<R>) -> Self {
        let state = engine.reset();
        Self {
            engine,
            state,
            input: InputMapper::new(),
            ticks: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    /// Ticks that actually advanced the game
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The change-set a view needs to draw the session from scratch
    pub fn snapshot(&self) -> ChangeSet {
        ChangeSet::snapshot(&self.state)
    }

    /// Advance the game by one tick
    pub fn tick(&mut self) -> ChangeSet {
        let changes = self.engine.step(&mut self.state);
        if !changes.is_empty() {
            self.ticks += 1;
        }
        changes
    }

    /// Feed a key name to the input mapper. Returns true if the direction changed.
    pub fn on_key(&mut self, key: &str) -> bool {
        self.input.on_key(&mut self.state, key)
    }

    /// True once the game has ended; the host stops ticking from then on
    pub fn is_over(&self) -> bool {
        self.state.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, Direction};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_session(config: GameConfig) -> GameSession<StdRng> {
        GameSession::from_engine(TickEngine::with_rng(config, StdRng::seed_from_u64(9)))
    }

    #[test]
    fn test_session_starts_centered() {
        let session = seeded_session(GameConfig::default());
        assert_eq!(session.state().head(), GameState::start_position(20));
        assert!(!session.is_over());
        assert_eq!(session.ticks(), 0);
        assert_eq!(
            session.snapshot().segments(),
            Some(session.state().segments.as_slice())
        );
    }

    #[test]
    fn test_key_applies_before_next_tick() {
        let mut session = seeded_session(GameConfig::default());
        let start = session.state().head();

        assert!(session.on_key("ArrowDown"));
        session.tick();

        assert_eq!(session.state().direction, Direction::Down);
        assert_eq!(
            session.state().head(),
            start.moved_in_direction(Direction::Down)
        );
    }

    #[test]
    fn test_session_runs_into_wall_and_stops() {
        let mut session = seeded_session(GameConfig::small());

        // Heading right from (5, 5) on a 10-wide grid hits the wall on the
        // fifth tick.
        let mut cause = None;
        for _ in 0..20 {
            let changes = session.tick();
            if let Some(hit) = changes.game_over() {
                cause = Some(hit);
            }
        }

        assert!(session.is_over());
        assert_eq!(cause, Some(CollisionType::Wall));
        assert_eq!(session.ticks(), 5);
    }
}
