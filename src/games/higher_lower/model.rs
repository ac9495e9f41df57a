use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::dice::{DiceSource, RandomDice, Roll};
use crate::config::{GameConfig, DEFAULT_HISTORY_LEN};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prediction {
    #[default]
    Higher,
    Lower,
}

impl Prediction {
    pub fn toggled(self) -> Self {
        match self {
            Prediction::Higher => Prediction::Lower,
            Prediction::Lower => Prediction::Higher,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Higher => f.write_str("Higher"),
            Prediction::Lower => f.write_str("Lower"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Win,
    Lose,
}

impl RoundResult {
    /// Strict comparison: a tie is always a loss, whatever was predicted.
    pub fn from_totals(prediction: Prediction, dealer_total: u8, player_total: u8) -> Self {
        let won = match prediction {
            Prediction::Higher => player_total > dealer_total,
            Prediction::Lower => player_total < dealer_total,
        };
        if won { RoundResult::Win } else { RoundResult::Lose }
    }

    pub fn is_win(self) -> bool {
        self == RoundResult::Win
    }
}

/// Outcome of one resolved round. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_number: u32,
    pub dealer_dice: [u8; 2],
    pub dealer_total: u8,
    pub player_dice: [u8; 2],
    pub player_total: u8,
    pub prediction: Prediction,
    pub bet: u32,
    pub result: RoundResult,
    pub balance_after: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    #[error("bet must be at least 1")]
    InvalidAmount,
    #[error("bet must be between 1 and {balance}")]
    InsufficientBalance { amount: u32, balance: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("the dealer must roll first")]
    NotReady,
}

/// Serializable copy of everything a front end may want to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub balance: u32,
    pub last_bet: u32,
    pub last_prediction: Prediction,
    pub round_number: u32,
    pub dealer_roll: Option<Roll>,
    pub player_roll: Option<Roll>,
    pub dealer_total: u8,
    pub player_total: u8,
    pub dealer_has_rolled: bool,
    pub game_over: bool,
    pub history: Vec<RoundRecord>,
}

/// State of a single higher/lower game.
///
/// Rounds alternate between two states: waiting for the dealer to roll, and waiting
/// for the player to roll. `roll_dealer` moves into the second (and may be repeated
/// there, overwriting the dealer's dice); `resolve_round` moves back to the first.
///
/// The model does not stop play once the balance hits zero. Callers check
/// [`GameModel::is_game_over`] and offer only [`GameModel::reset`] from then on.
#[derive(Debug, Clone)]
pub struct GameModel<D: DiceSource = RandomDice> {
    config: GameConfig,
    dice: D,
    balance: u32,
    last_bet: u32,
    last_prediction: Prediction,
    round_number: u32,
    dealer_roll: Option<Roll>,
    player_roll: Option<Roll>,
    dealer_has_rolled: bool,
    history: VecDeque<RoundRecord>,
}

impl GameModel<RandomDice> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_dice(config, RandomDice::from_os())
    }
}

impl<D: DiceSource> GameModel<D> {
    pub fn with_dice(config: GameConfig, dice: D) -> Self {
        Self {
            config,
            dice,
            balance: config.starting_balance,
            last_bet: config.default_bet,
            last_prediction: Prediction::default(),
            round_number: 0,
            dealer_roll: None,
            player_roll: None,
            dealer_has_rolled: false,
            history: VecDeque::with_capacity(config.history_len.min(DEFAULT_HISTORY_LEN) + 1),
        }
    }

    /// Starts (or restarts) a round by throwing the dealer's dice.
    ///
    /// Clears the player's dice. Balance, bet and round number are left alone.
    pub fn roll_dealer(&mut self) -> Roll {
        let roll = self.dice.roll_pair();
        self.dealer_roll = Some(roll);
        self.player_roll = None;
        self.dealer_has_rolled = true;
        debug!(dice = ?roll.dice, total = roll.total(), "dealer rolled");
        roll
    }

    /// Validates and stores the stake and prediction for the coming player roll.
    ///
    /// Nothing changes when an error is returned.
    pub fn place_bet(&mut self, amount: i64, prediction: Prediction) -> Result<(), BetError> {
        if amount < 1 {
            warn!(amount, "rejected bet: not a positive amount");
            return Err(BetError::InvalidAmount);
        }
        if amount > i64::from(self.balance) {
            warn!(amount, balance = self.balance, "rejected bet: exceeds balance");
            return Err(BetError::InsufficientBalance {
                amount: u32::try_from(amount).unwrap_or(u32::MAX),
                balance: self.balance,
            });
        }

        // amount is within 1..=balance, so it fits in u32
        self.last_bet = amount as u32;
        self.last_prediction = prediction;
        debug!(bet = self.last_bet, %prediction, "bet placed");
        Ok(())
    }

    /// Throws the player's dice and settles the round against the stored bet.
    pub fn resolve_round(&mut self) -> Result<RoundRecord, RoundError> {
        let dealer = match self.dealer_roll {
            Some(roll) if self.dealer_has_rolled => roll,
            _ => {
                warn!(round = self.round_number, "resolve requested before dealer roll");
                return Err(RoundError::NotReady);
            }
        };

        self.round_number += 1;

        let player = self.dice.roll_pair();
        self.player_roll = Some(player);

        let result = RoundResult::from_totals(self.last_prediction, dealer.total(), player.total());
        self.balance = match result {
            RoundResult::Win => self.balance.saturating_add(self.last_bet),
            RoundResult::Lose => self.balance.saturating_sub(self.last_bet),
        };
        self.dealer_has_rolled = false;

        let record = RoundRecord {
            round_number: self.round_number,
            dealer_dice: dealer.dice,
            dealer_total: dealer.total(),
            player_dice: player.dice,
            player_total: player.total(),
            prediction: self.last_prediction,
            bet: self.last_bet,
            result,
            balance_after: self.balance,
        };

        self.history.push_front(record.clone());
        self.history.truncate(self.config.history_len);

        info!(
            round = record.round_number,
            dealer = record.dealer_total,
            player = record.player_total,
            prediction = %record.prediction,
            result = ?record.result,
            balance = record.balance_after,
            "round resolved"
        );
        Ok(record)
    }

    pub fn is_game_over(&self) -> bool {
        self.balance == 0
    }

    pub fn has_dealer_rolled(&self) -> bool {
        self.dealer_has_rolled
    }

    /// Puts the game back to its configured starting values.
    pub fn reset(&mut self) {
        self.balance = self.config.starting_balance;
        self.last_bet = self.config.default_bet;
        self.last_prediction = Prediction::default();
        self.round_number = 0;
        self.dealer_roll = None;
        self.player_roll = None;
        self.dealer_has_rolled = false;
        self.history.clear();
        info!(balance = self.balance, "game reset");
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn last_bet(&self) -> u32 {
        self.last_bet
    }

    pub fn last_prediction(&self) -> Prediction {
        self.last_prediction
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn dealer_roll(&self) -> Option<Roll> {
        self.dealer_roll
    }

    pub fn player_roll(&self) -> Option<Roll> {
        self.player_roll
    }

    /// 0 until the dealer has rolled.
    pub fn dealer_total(&self) -> u8 {
        self.dealer_roll.map_or(0, |r| r.total())
    }

    /// 0 until the player has rolled this round.
    pub fn player_total(&self) -> u8 {
        self.player_roll.map_or(0, |r| r.total())
    }

    /// Most recent round first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &RoundRecord> {
        self.history.iter()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            balance: self.balance,
            last_bet: self.last_bet,
            last_prediction: self.last_prediction,
            round_number: self.round_number,
            dealer_roll: self.dealer_roll,
            player_roll: self.player_roll,
            dealer_total: self.dealer_total(),
            player_total: self.player_total(),
            dealer_has_rolled: self.dealer_has_rolled,
            game_over: self.is_game_over(),
            history: self.history.iter().cloned().collect(),
        }
    }
}
