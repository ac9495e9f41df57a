use anyhow::{bail, Result};

pub const DEFAULT_BALANCE: u32 = 100;
pub const DEFAULT_BET: u32 = 10;
pub const DEFAULT_HISTORY_LEN: usize = 5;
pub const MAX_HISTORY_LEN: usize = 1000;

/// Starting values a game is created with and returns to on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub starting_balance: u32,
    pub default_bet: u32,
    pub history_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_BALANCE,
            default_bet: DEFAULT_BET,
            history_len: DEFAULT_HISTORY_LEN,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.starting_balance == 0 {
            bail!("starting balance must be at least 1");
        }
        if self.history_len == 0 || self.history_len > MAX_HISTORY_LEN {
            bail!("history length must be between 1 and {} (got {})", MAX_HISTORY_LEN, self.history_len);
        }
        if self.default_bet == 0 || self.default_bet > self.starting_balance {
            bail!(
                "default bet must be between 1 and {} (got {})",
                self.starting_balance,
                self.default_bet
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.starting_balance, 100);
        assert_eq!(config.default_bet, 10);
        assert_eq!(config.history_len, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let zero_balance = GameConfig { starting_balance: 0, ..GameConfig::default() };
        assert!(zero_balance.validate().is_err());

        let no_history = GameConfig { history_len: 0, ..GameConfig::default() };
        assert!(no_history.validate().is_err());

        let big_bet = GameConfig { default_bet: 101, ..GameConfig::default() };
        let err = big_bet.validate().unwrap_err();
        assert!(err.to_string().contains("between 1 and 100"));

        let huge_history = GameConfig { history_len: usize::MAX, ..GameConfig::default() };
        assert!(huge_history.validate().is_err());

        let max_history = GameConfig { history_len: MAX_HISTORY_LEN, ..GameConfig::default() };
        assert!(max_history.validate().is_ok());

        let zero_bet = GameConfig { default_bet: 0, ..GameConfig::default() };
        assert!(zero_bet.validate().is_err());
    }
}
