use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use hilo::config::{GameConfig, DEFAULT_BALANCE, DEFAULT_BET, DEFAULT_HISTORY_LEN};

#[derive(Parser, Debug)]
#[command(name = "hilo")]
#[command(about = "🎲 Higher / Lower - a dice game for the terminal")]
#[command(version)]
pub struct Cli {
    /// Credits at the start of every game
    #[arg(long, default_value_t = DEFAULT_BALANCE)]
    pub balance: u32,

    /// Bet filled in at the start of every game
    #[arg(long, default_value_t = DEFAULT_BET)]
    pub bet: u32,

    /// Number of past rounds kept in the history table
    #[arg(long, default_value_t = DEFAULT_HISTORY_LEN)]
    pub history: usize,

    /// Seed the dice for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (the screen is taken by the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            starting_balance: self.balance,
            default_bet: self.bet,
            history_len: self.history,
        }
    }
}
