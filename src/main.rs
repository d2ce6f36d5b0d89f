//! Main entry point for the terminal game.
//!
//! Loads the configuration, then either exports one generated board for map
//! authoring or runs the interactive game loop.

use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use robot_racing::GameConfig;
use robot_racing::GameResult;
use robot_racing::demo::run_game_loop;
use robot_racing::game::grid::random_board;

#[derive(Debug, Parser)]
#[command(name = "robot-racing", about = "Race a robot across hostile terrain to the flag")]
struct Cli {
    /// JSON file overriding the default settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible boards and dice.
    #[arg(long)]
    seed: Option<u64>,

    /// Write one random board as a terrain-name grid to this path and exit.
    #[arg(long)]
    export_board: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> GameResult<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();
    let cli = Cli::parse();

    // Loaded files are validated by the loader.
    let config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => {
            let config = GameConfig::default();
            config.validate()?;
            config
        }
    };

    if let Some(path) = &cli.export_board {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let board = random_board(&config, &mut rng)?;
        std::fs::write(path, board.export_json()?)?;
        info!("Exported a {}x{} board to {}", board.rows(), board.columns(), path.display());
        return Ok(());
    }

    run_game_loop(config, cli.seed).await
}
