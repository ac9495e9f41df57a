pub mod config;

pub mod core {
	pub mod engine;
	pub mod game;
	pub mod renderer;
}

pub mod games;

// Re-export for convenience
pub use crate::config::GameConfig;
pub use crate::core::game::{Flow, Game};
pub use crate::games::higher_lower::{GameModel, HigherLowerGame};
