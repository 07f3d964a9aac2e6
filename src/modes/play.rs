use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::info;

use crate::game::{GameConfig, GameSession, TickEngine};
use crate::input::{InputHandler, KeyAction};
use crate::render::{Renderer, SceneView, TerminalScene};

/// A recurring timer that the host stops once its session is over
pub struct Ticker {
    timer: Interval,
    stopped: bool,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        let mut timer = interval(period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            timer,
            stopped: false,
        }
    }

    pub async fn tick(&mut self) {
        self.timer.tick().await;
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_running(&self) -> bool {
        !self.stopped
    }

    /// Start counting again from now
    pub fn restart(&mut self) {
        self.timer.reset();
        self.stopped = false;
    }
}

/// Interactive play in the terminal
pub struct PlayMode<R: Rng + 'static> {
    config: GameConfig,
    make_rng: Box<dyn FnMut() -> R>,
    session: GameSession<R>,
    scene: TerminalScene,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<R: Rng + 'static> PlayMode<R> {
    /// `make_rng` supplies the food RNG for each new session
    pub fn new(config: GameConfig, mut make_rng: impl FnMut() -> R + 'static) -> Self {
        let session = GameSession::from_engine(TickEngine::with_rng(config.clone(), make_rng()));
        let mut scene = TerminalScene::new(config.grid_size);
        scene.apply(&session.snapshot());

        Self {
            config,
            make_rng: Box::new(make_rng),
            session,
            scene,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut ticker = Ticker::new(self.config.tick_interval());

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut ticker);
                    }
                }

                // The tick branch is not polled once the session has ended
                _ = ticker.tick(), if ticker.is_running() => {
                    self.update_game();
                    if self.session.is_over() {
                        ticker.stop();
                    }
                }

                _ = render_timer.tick() => {
                    self.scene.scoreboard.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.scene);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, ticker: &mut Ticker) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(key_name) => {
                    self.session.on_key(key_name);
                }
                KeyAction::Restart => {
                    self.new_session();
                    ticker.restart();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        let changes = self.session.tick();
        self.scene.apply(&changes);

        if self.session.is_over() {
            info!(
                score = self.session.state().score,
                ticks = self.session.ticks(),
                "session finished"
            );
        }
    }

    /// Game over is final for a session, so restarting means a new one
    fn new_session(&mut self) {
        let engine = TickEngine::with_rng(self.config.clone(), (self.make_rng)());
        self.session = GameSession::from_engine(engine);
        self.scene.restart(self.config.grid_size);
        self.scene.apply(&self.session.snapshot());
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded_mode() -> PlayMode<StdRng> {
        let mut seed = 0;
        PlayMode::new(GameConfig::default(), move || {
            seed += 1;
            StdRng::seed_from_u64(seed)
        })
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn test_game_initialization() {
        let mode = seeded_mode();
        assert!(!mode.session.is_over());
        assert_eq!(mode.scene.scoreboard.score, 0);
        assert_eq!(
            mode.scene.snake_cells().collect::<Vec<_>>(),
            vec![Position::new(10, 10)]
        );
    }

    #[tokio::test]
    async fn test_arrow_key_steers_session() {
        let mut mode = seeded_mode();
        let mut ticker = Ticker::new(Duration::from_millis(100));

        mode.handle_event(press(KeyCode::Up), &mut ticker);
        assert_eq!(mode.session.state().direction, Direction::Up);

        mode.handle_event(press(KeyCode::Down), &mut ticker);
        assert_eq!(mode.session.state().direction, Direction::Up);
    }

    #[tokio::test]
    async fn test_restart_after_game_over() {
        let mut mode = seeded_mode();
        let mut ticker = Ticker::new(Duration::from_millis(100));

        while !mode.session.is_over() {
            mode.update_game();
        }
        ticker.stop();
        assert!(mode.scene.is_game_over());

        mode.handle_event(press(KeyCode::Char('r')), &mut ticker);

        assert!(!mode.session.is_over());
        assert!(!mode.scene.is_game_over());
        assert!(ticker.is_running());
        assert_eq!(mode.scene.scoreboard.games_played, 1);
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut mode = seeded_mode();
        let mut ticker = Ticker::new(Duration::from_millis(100));

        mode.handle_event(press(KeyCode::Esc), &mut ticker);
        assert!(mode.should_quit);
    }
}
