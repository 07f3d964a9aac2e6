use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{FoodPlacement, GameConfig};
use grid_snake::modes::PlayMode;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a grid, steered with the arrow keys")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square grid
    #[arg(long)]
    grid_size: Option<i32>,

    /// Milliseconds between ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Never drop food onto the snake
    #[arg(long)]
    avoid_snake_food: bool,

    /// Seed for food placement, for repeatable games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if self.avoid_snake_food {
            config.food_placement = FoodPlacement::AvoidSnake;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;
    tracing::info!(?config, seed = ?cli.seed, "grid_snake starting");

    // Each new session gets its own RNG; with a seed, the sequence of games repeats.
    let mut next_seed = cli.seed;
    let make_rng = move || match next_seed.as_mut() {
        Some(seed) => {
            let rng = StdRng::seed_from_u64(*seed);
            *seed = seed.wrapping_add(1);
            rng
        }
        None => StdRng::from_entropy(),
    };

    let mut play_mode = PlayMode::new(config, make_rng);
    play_mode.run().await?;

    Ok(())
}
