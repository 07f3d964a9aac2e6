use super::state::{CollisionType, GameState, Position};

/// Something a tick changed that a view layer may want to show
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The score after food was eaten
    ScoreChanged(u32),
    /// Food moved to a new cell
    FoodPlaced(Position),
    /// Body positions after the tick, head first
    SegmentsUpdated(Vec<Position>),
    /// The snake crashed; no further events follow
    GameOver { cause: CollisionType },
}

/// Everything one tick changed, in the order it happened
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    events: Vec<GameEvent>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe a whole state, for views that start from nothing
    pub fn snapshot(state: &GameState) -> Self {
        let mut changes = Self::new();
        changes.push(GameEvent::ScoreChanged(state.score));
        changes.push(GameEvent::FoodPlaced(state.food));
        changes.push(GameEvent::SegmentsUpdated(state.segments.clone()));
        if let Some(cause) = state.collision {
            changes.push(GameEvent::GameOver { cause });
        }
        changes
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// The collision cause, if this tick ended the game
    pub fn game_over(&self) -> Option<CollisionType> {
        self.events.iter().find_map(|event| match event {
            GameEvent::GameOver { cause } => Some(*cause),
            _ => None,
        })
    }

    /// True when the snake ate food this tick
    pub fn ate_food(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, GameEvent::ScoreChanged(_)))
    }

    /// The body snapshot emitted this tick, if any
    pub fn segments(&self) -> Option<&[Position]> {
        self.events.iter().find_map(|event| match event {
            GameEvent::SegmentsUpdated(segments) => Some(segments.as_slice()),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a GameEvent;
    type IntoIter = std::slice::Iter<'a, GameEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
