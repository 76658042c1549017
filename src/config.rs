use crate::agents::BotProfile;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("blinds must satisfy 0 < small ({small}) <= big ({big})")]
    InvalidBlinds { small: u64, big: u64 },
    #[error("minimum raise must be positive")]
    ZeroMinRaise,
}

/// Table settings. Defaults are the 10/20 heads-up game with 1000-chip stacks.
///
/// ```
/// use holdem_duel::config::TableConfig;
///
/// let config = TableConfig::default().with_seed(42).with_stacks(500, 500);
/// assert_eq!(config.big_blind, 20);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
pub struct TableConfig {
    pub small_blind: u64,
    pub big_blind: u64,
    /// Fixed increment every raise must add over the current bet.
    pub min_raise: u64,
    pub starting_stack: u64,
    pub opponent_stack: u64,
    /// Seeds the deck shuffler. `None` draws a seed from the OS.
    pub seed: Option<u64>,
    /// Run the opponent inside `submit_human_action` instead of waiting for the host.
    pub auto_opponent: bool,
    pub opponent: BotProfile,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: 10,
            big_blind: 20,
            min_raise: 20,
            starting_stack: 1000,
            opponent_stack: 1000,
            seed: None,
            auto_opponent: true,
            opponent: BotProfile::default(),
        }
    }
}

impl TableConfig {
    pub fn with_blinds(mut self, small: u64, big: u64) -> Self {
        self.small_blind = small;
        self.big_blind = big;
        self
    }

    pub fn with_min_raise(mut self, min_raise: u64) -> Self {
        self.min_raise = min_raise;
        self
    }

    pub fn with_stacks(mut self, human: u64, opponent: u64) -> Self {
        self.starting_stack = human;
        self.opponent_stack = opponent;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_auto_opponent(mut self, auto: bool) -> Self {
        self.auto_opponent = auto;
        self
    }

    pub fn with_opponent(mut self, profile: BotProfile) -> Self {
        self.opponent = profile;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind == 0 || self.small_blind > self.big_blind {
            return Err(ConfigError::InvalidBlinds { small: self.small_blind, big: self.big_blind });
        }
        if self.min_raise == 0 {
            return Err(ConfigError::ZeroMinRaise);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let c = TableConfig::default();
        assert_eq!((c.small_blind, c.big_blind, c.min_raise), (10, 20, 20));
        assert!(c.auto_opponent);
        c.validate().unwrap();
    }

    #[test]
    fn inverted_blinds_fail() {
        let c = TableConfig::default().with_blinds(30, 20);
        assert_eq!(c.validate(), Err(ConfigError::InvalidBlinds { small: 30, big: 20 }));
        assert!(TableConfig::default().with_blinds(0, 20).validate().is_err());
    }

    #[test]
    fn zero_min_raise_fails() {
        assert_eq!(TableConfig::default().with_min_raise(0).validate(), Err(ConfigError::ZeroMinRaise));
    }
}
