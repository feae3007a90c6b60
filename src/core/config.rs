//! Environment configuration.
//!
//! `EnvConfig` is the single recognized configuration surface. It can be
//! built with `with_*` methods or deserialized from JSON; missing fields
//! take their defaults.
//!
//! ```
//! use rust_dominion::core::{EnvConfig, OpponentKind};
//!
//! let config = EnvConfig::default()
//!     .with_player_count(3)
//!     .with_opponent(OpponentKind::Human)
//!     .validated()
//!     .unwrap();
//! assert_eq!(config.player_count, 3);
//! ```

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use super::player::PlayerId;
use crate::encoding::RewardWeights;

/// Default kingdom: base-set action cards whose effects need no sub-choices.
pub const DEFAULT_KINGDOM: [&str; 10] = [
    "Council Room",
    "Festival",
    "Laboratory",
    "Market",
    "Moat",
    "Moneylender",
    "Smithy",
    "Village",
    "Witch",
    "Woodcutter",
];

/// Who sits in the non-learning seats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    /// Scripted big-money bot, run internally for whole turns.
    #[default]
    Bot,
    /// Hot-seat: driven through the same `step` calls as the learner.
    Human,
}

impl std::str::FromStr for OpponentKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bot" => Ok(OpponentKind::Bot),
            "human" => Ok(OpponentKind::Human),
            other => Err(EngineError::InvalidConfig(format!(
                "unknown opponent selector `{other}` (expected \"bot\" or \"human\")"
            ))),
        }
    }
}

/// Environment configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Number of seats (2-6).
    pub player_count: usize,

    /// Kingdom action cards. Sorted and de-duplicated by `validated`.
    pub kingdom: Vec<String>,

    /// Demote turn narration from `info` to `trace`.
    pub quiet: bool,

    /// Seat controlled by the external caller.
    pub learning_player: u8,

    /// Policy for every other seat.
    pub opponent: OpponentKind,

    /// Any player reaching this turn number ends the episode.
    pub turn_ceiling: u32,

    /// Stall detection: past this turn with the Province pile untouched the
    /// episode ends. `None` disables it.
    pub stall_turn: Option<u32>,

    /// Fixed width of the action mask.
    pub action_space: usize,

    /// Number of simultaneously empty supply piles that ends the game.
    pub empty_piles_to_end: usize,

    /// Reward shaping magnitudes.
    pub reward: RewardWeights,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            kingdom: DEFAULT_KINGDOM.iter().map(|s| s.to_string()).collect(),
            quiet: true,
            learning_player: 0,
            opponent: OpponentKind::Bot,
            turn_ceiling: 75,
            stall_turn: Some(30),
            action_space: 28,
            empty_piles_to_end: 3,
            reward: RewardWeights::default(),
        }
    }
}

impl EnvConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EnvConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validated()
    }

    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    #[must_use]
    pub fn with_kingdom<S: Into<String>>(mut self, cards: impl IntoIterator<Item = S>) -> Self {
        self.kingdom = cards.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub fn with_learning_player(mut self, seat: u8) -> Self {
        self.learning_player = seat;
        self
    }

    #[must_use]
    pub fn with_opponent(mut self, opponent: OpponentKind) -> Self {
        self.opponent = opponent;
        self
    }

    #[must_use]
    pub fn with_turn_ceiling(mut self, turns: u32) -> Self {
        self.turn_ceiling = turns;
        self
    }

    #[must_use]
    pub fn with_stall_turn(mut self, turn: Option<u32>) -> Self {
        self.stall_turn = turn;
        self
    }

    #[must_use]
    pub fn with_action_space(mut self, width: usize) -> Self {
        self.action_space = width;
        self
    }

    #[must_use]
    pub fn with_reward(mut self, reward: RewardWeights) -> Self {
        self.reward = reward;
        self
    }

    /// The learning seat as a `PlayerId`.
    #[must_use]
    pub fn learner(&self) -> PlayerId {
        PlayerId::new(self.learning_player)
    }

    /// Check ranges and normalize the kingdom order.
    ///
    /// The kingdom is sorted so that two configs naming the same cards in a
    /// different order produce identical observations.
    pub fn validated(mut self) -> Result<Self> {
        if !(2..=6).contains(&self.player_count) {
            return Err(EngineError::InvalidConfig(format!(
                "player_count must be 2-6, got {}",
                self.player_count
            )));
        }
        if usize::from(self.learning_player) >= self.player_count {
            return Err(EngineError::InvalidConfig(format!(
                "learning_player {} is not a seat at a {}-player table",
                self.learning_player, self.player_count
            )));
        }
        if self.action_space == 0 {
            return Err(EngineError::InvalidConfig("action_space must be positive".into()));
        }
        if self.turn_ceiling == 0 {
            return Err(EngineError::InvalidConfig("turn_ceiling must be positive".into()));
        }
        if self.empty_piles_to_end == 0 {
            return Err(EngineError::InvalidConfig(
                "empty_piles_to_end must be positive".into(),
            ));
        }

        self.kingdom.sort();
        self.kingdom.dedup();
        Ok(self)
    }
}
