use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::dice::{DiceSource, RandomDice, Roll};
use super::model::{GameModel, Prediction, RoundRecord, RoundResult};
use super::renderer::HigherLowerRenderer;
use crate::core::game::{Flow, Game};
use crate::core::renderer::GameRenderer;

const MAX_BET_DIGITS: usize = 9;

pub const MSG_DEALER_FIRST: &str = "The dealer must roll first!";
pub const MSG_EMPTY_BET: &str = "Enter a bet.";
pub const MSG_INVALID_NUMBER: &str = "Enter a valid number.";
pub const MSG_GAME_OVER: &str = "Game over - you are out of credits!";

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HigherLowerView {
    pub balance: u32,
    pub round_number: u32,
    pub dealer: Option<Roll>,
    pub player: Option<Roll>,
    pub dealer_total: u8,
    pub player_total: u8,
    pub prediction: Prediction,
    pub bet_input: String,
    pub can_roll_dealer: bool,
    pub can_roll_player: bool,
    pub game_over: bool,
    pub outcome: Option<OutcomeLine>,
    pub error: Option<String>,
    pub history: Vec<RoundRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeLine {
    pub text: String,
    pub won: bool,
}

impl OutcomeLine {
    fn from_record(record: &RoundRecord) -> Self {
        let (head, sign) = match record.result {
            RoundResult::Win => ("You won!", '+'),
            RoundResult::Lose => ("You lost...", '-'),
        };
        Self {
            text: format!(
                "{} You rolled {}, the dealer {}. (Pick: {}, {}{} credits)",
                head, record.player_total, record.dealer_total, record.prediction, sign, record.bet
            ),
            won: record.result.is_win(),
        }
    }
}

/// Keyboard front end for a [`GameModel`].
///
/// Holds only what the player is typing plus the last messages; all game state
/// lives in the model. This layer is what keeps the model's call order intact:
/// no player roll before a dealer roll, and nothing but a new game once the
/// balance is gone.
pub struct HigherLowerGame<D: DiceSource = RandomDice> {
    model: GameModel<D>,
    bet_input: String,
    prediction: Prediction,
    outcome: Option<OutcomeLine>,
    error: Option<String>,
}

impl<D: DiceSource> HigherLowerGame<D> {
    pub fn with_model(model: GameModel<D>) -> Self {
        Self {
            bet_input: model.last_bet().to_string(),
            prediction: model.last_prediction(),
            model,
            outcome: None,
            error: None,
        }
    }

    pub fn model(&self) -> &GameModel<D> {
        &self.model
    }

    pub fn roll_dealer(&mut self) {
        if self.model.is_game_over() {
            return;
        }
        self.outcome = None;
        self.error = None;
        self.model.roll_dealer();
    }

    /// Validates the typed bet, then throws the player's dice and settles the round.
    pub fn roll_player(&mut self) {
        if self.model.is_game_over() {
            return;
        }
        if !self.model.has_dealer_rolled() {
            self.error = Some(MSG_DEALER_FIRST.to_string());
            return;
        }

        let text = self.bet_input.trim();
        if text.is_empty() {
            self.error = Some(MSG_EMPTY_BET.to_string());
            return;
        }
        let Ok(amount) = text.parse::<i64>() else {
            self.error = Some(MSG_INVALID_NUMBER.to_string());
            return;
        };
        if let Err(e) = self.model.place_bet(amount, self.prediction) {
            self.error = Some(e.to_string());
            return;
        }
        self.error = None;

        match self.model.resolve_round() {
            Ok(record) => self.outcome = Some(OutcomeLine::from_record(&record)),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn new_game(&mut self) {
        self.model.reset();
        self.bet_input = self.model.last_bet().to_string();
        self.prediction = self.model.last_prediction();
        self.outcome = None;
        self.error = None;
    }

    pub fn set_prediction(&mut self, prediction: Prediction) {
        if !self.model.is_game_over() {
            self.prediction = prediction;
        }
    }

    fn push_digit(&mut self, c: char) {
        if !self.model.is_game_over() && self.bet_input.len() < MAX_BET_DIGITS {
            self.bet_input.push(c);
        }
    }

    fn pop_digit(&mut self) {
        if !self.model.is_game_over() {
            self.bet_input.pop();
        }
    }

    pub fn view(&self) -> HigherLowerView {
        let game_over = self.model.is_game_over();
        HigherLowerView {
            balance: self.model.balance(),
            round_number: self.model.round_number(),
            dealer: self.model.dealer_roll(),
            player: self.model.player_roll(),
            dealer_total: self.model.dealer_total(),
            player_total: self.model.player_total(),
            prediction: self.prediction,
            bet_input: self.bet_input.clone(),
            can_roll_dealer: !game_over,
            can_roll_player: !game_over && self.model.has_dealer_rolled(),
            game_over,
            outcome: self.outcome.clone(),
            error: self.error.clone(),
            history: self.model.history().cloned().collect(),
        }
    }
}

impl<D: DiceSource> Game for HigherLowerGame<D> {
    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Char('d') => self.roll_dealer(),
            KeyCode::Enter | KeyCode::Char('p') => self.roll_player(),
            KeyCode::Char('n') if self.model.is_game_over() => self.new_game(),
            KeyCode::Char('h') | KeyCode::Left => self.set_prediction(Prediction::Higher),
            KeyCode::Char('l') | KeyCode::Right => self.set_prediction(Prediction::Lower),
            KeyCode::Tab => self.set_prediction(self.prediction.toggled()),
            KeyCode::Char(c) if c.is_ascii_digit() => self.push_digit(c),
            KeyCode::Backspace => self.pop_digit(),
            other => debug!(key = ?other, "unbound key"),
        }
        Flow::Continue
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        HigherLowerRenderer::render(frame, &self.view());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::games::higher_lower::dice::ScriptedDice;

    fn game(faces: &[u8], balance: u32) -> HigherLowerGame<ScriptedDice> {
        let config = GameConfig { starting_balance: balance, default_bet: 1, ..GameConfig::default() };
        HigherLowerGame::with_model(GameModel::with_dice(config, ScriptedDice::new(faces.iter().copied())))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_bet(game: &mut HigherLowerGame<ScriptedDice>, bet: &str) {
        while !game.view().bet_input.is_empty() {
            game.handle_key(key(KeyCode::Backspace));
        }
        for c in bet.chars() {
            game.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_player_roll_needs_dealer() {
        let mut game = game(&[3, 4, 1, 1], 100);
        game.roll_player();
        assert_eq!(game.view().error.as_deref(), Some(MSG_DEALER_FIRST));
        assert_eq!(game.model().round_number(), 0);
        assert!(!game.view().can_roll_player);
    }

    #[test]
    fn test_bad_input_messages() {
        let mut game = game(&[3, 4, 1, 1], 100);
        game.roll_dealer();

        type_bet(&mut game, "");
        game.roll_player();
        assert_eq!(game.view().error.as_deref(), Some(MSG_EMPTY_BET));

        type_bet(&mut game, "0");
        game.roll_player();
        assert_eq!(game.view().error.as_deref(), Some("bet must be at least 1"));

        type_bet(&mut game, "101");
        game.roll_player();
        assert_eq!(game.view().error.as_deref(), Some("bet must be between 1 and 100"));

        assert_eq!(game.model().round_number(), 0);
        assert!(game.model().has_dealer_rolled());
    }

    #[test]
    fn test_oversized_input_is_capped() {
        let mut game = game(&[1], 100);
        type_bet(&mut game, "12345678901234");
        assert_eq!(game.view().bet_input, "123456789");
    }

    #[test]
    fn test_winning_round_message() {
        let mut game = game(&[3, 4, 1, 1], 100);
        game.handle_key(key(KeyCode::Char('d')));
        game.handle_key(key(KeyCode::Char('l')));
        type_bet(&mut game, "10");
        game.handle_key(key(KeyCode::Enter));

        let view = game.view();
        assert_eq!(view.balance, 110);
        assert_eq!(view.error, None);
        let outcome = view.outcome.unwrap();
        assert!(outcome.won);
        assert_eq!(
            outcome.text,
            "You won! You rolled 2, the dealer 7. (Pick: Lower, +10 credits)"
        );
        assert!(!view.can_roll_player);
    }

    #[test]
    fn test_dealer_roll_clears_messages() {
        let mut game = game(&[3, 4, 1, 1], 100);
        game.roll_player();
        assert!(game.view().error.is_some());
        game.roll_dealer();
        game.roll_player();
        assert!(game.view().outcome.is_some());

        game.roll_dealer();
        let view = game.view();
        assert_eq!(view.outcome, None);
        assert_eq!(view.error, None);
        assert_eq!(view.player, None);
        assert_eq!(view.player_total, 0);
    }

    #[test]
    fn test_game_over_only_allows_new_game() {
        let mut game = game(&[4, 5, 1, 2], 5);
        game.roll_dealer();
        type_bet(&mut game, "5");
        game.roll_player();
        assert!(game.view().game_over);
        assert_eq!(game.view().outcome.map(|o| o.won), Some(false));

        game.handle_key(key(KeyCode::Char('d')));
        game.handle_key(key(KeyCode::Char('l')));
        game.handle_key(key(KeyCode::Char('7')));
        let view = game.view();
        assert!(!view.can_roll_dealer);
        assert!(!view.can_roll_player);
        assert_eq!(view.dealer_total, 9);
        assert_eq!(view.prediction, Prediction::Higher);
        assert_eq!(view.bet_input, "5");

        game.handle_key(key(KeyCode::Char('n')));
        let view = game.view();
        assert!(!view.game_over);
        assert_eq!(view.balance, 5);
        assert_eq!(view.bet_input, "1");
        assert!(view.history.is_empty());
        assert_eq!(view.outcome, None);
    }

    #[test]
    fn test_quit_keys() {
        let mut game = game(&[1], 100);
        assert_eq!(game.handle_key(key(KeyCode::Char('x'))), Flow::Continue);
        assert_eq!(game.handle_key(key(KeyCode::Esc)), Flow::Quit);
        assert_eq!(game.handle_key(key(KeyCode::Char('q'))), Flow::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(game.handle_key(ctrl_c), Flow::Quit);
    }

    #[test]
    fn test_new_game_key_waits_for_game_over() {
        let mut game = game(&[3, 4, 1, 1], 100);
        game.roll_dealer();
        type_bet(&mut game, "10");
        game.handle_key(key(KeyCode::Char('l')));
        game.roll_player();
        assert_eq!(game.view().balance, 110);

        game.handle_key(key(KeyCode::Char('n')));
        let view = game.view();
        assert_eq!(view.balance, 110);
        assert_eq!(view.round_number, 1);
        assert_eq!(view.history.len(), 1);
    }

    #[test]
    fn test_tab_toggles_prediction() {
        let mut game = game(&[1], 100);
        game.handle_key(key(KeyCode::Tab));
        assert_eq!(game.view().prediction, Prediction::Lower);
        game.handle_key(key(KeyCode::Tab));
        assert_eq!(game.view().prediction, Prediction::Higher);
    }
}
