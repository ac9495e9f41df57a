mod cli;

use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use hilo::core::engine::Engine;
use hilo::games::higher_lower::{GameModel, HigherLowerGame, RandomDice};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_max_level(cli.log_level)
            .with_ansi(false)
            .with_writer(Arc::new(file))
            .init();
    }

    let config = cli.game_config();
    config.validate()?;

    let model = match cli.seed {
        Some(seed) => GameModel::with_dice(config, RandomDice::seeded(seed)),
        None => GameModel::new(config),
    };
    let game = HigherLowerGame::with_model(model);
    info!(?config, seed = ?cli.seed, "starting game");

    let mut terminal = ratatui::init();
    let result = Engine::new(game).run(&mut terminal);
    ratatui::restore();

    let game = result?;
    let model = game.model();
    info!(rounds = model.round_number(), balance = model.balance(), "game ended");
    Ok(())
}
