/// Higher/lower dice game: the model keeps score, the controller takes keys, the renderer draws.
pub mod controller;
pub mod dice;
pub mod model;
pub mod renderer;

pub use controller::{HigherLowerGame, HigherLowerView};
pub use dice::{DiceSource, RandomDice, Roll, ScriptedDice};
pub use model::{BetError, GameModel, GameSnapshot, Prediction, RoundError, RoundRecord, RoundResult};
pub use renderer::HigherLowerRenderer;
