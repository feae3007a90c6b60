//! Reward shaping for the learning seat.
//!
//! One scalar per externally visible decision:
//!
//! - terminal: win/loss bonus plus score difference against the mean
//!   opponent score
//! - per decision: victory points and treasure value gained, minus a clog
//!   penalty for low-value treasure past a threshold, minus a step penalty
//! - end of turn: a bonus per action and buy actually consumed
//! - forced endings: invalid index, turn ceiling, stall

use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::engine::ResourceDelta;

/// Reward magnitudes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardWeights {
    pub win_bonus: f32,
    pub score_diff: f32,
    /// Per victory point gained by a decision.
    pub victory_gain: f32,
    /// Per coin of treasure gained by a decision.
    pub treasure_gain: f32,
    /// Low-value treasures owned before the clog penalty applies.
    pub clog_threshold: u32,
    pub clog_penalty: f32,
    /// Per action or buy consumed, paid at the end of the turn.
    pub resource_use: f32,
    pub step_penalty: f32,
    pub invalid_penalty: f32,
    pub ceiling_penalty: f32,
    pub stall_base: f32,
    pub stall_score: f32,
    pub stall_lead_bonus: f32,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self {
            win_bonus: 50.0,
            score_diff: 2.0,
            victory_gain: 0.5,
            treasure_gain: 0.25,
            clog_threshold: 10,
            clog_penalty: 0.5,
            resource_use: 0.1,
            step_penalty: 0.01,
            invalid_penalty: 50.0,
            ceiling_penalty: 100.0,
            stall_base: -50.0,
            stall_score: 0.5,
            stall_lead_bonus: 25.0,
        }
    }
}

/// Computes rewards from `RewardWeights`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RewardShaper {
    weights: RewardWeights,
}

impl RewardShaper {
    #[must_use]
    pub fn new(weights: RewardWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &RewardWeights {
        &self.weights
    }

    /// Reward for one committed, non-terminal decision by `player`.
    ///
    /// Call after the decision is applied. `turn_ended` adds the
    /// resource-use bonus for the turn just cleaned up.
    #[must_use]
    pub fn decision(
        &self,
        state: &GameState,
        player: PlayerId,
        delta: &ResourceDelta,
        turn_ended: bool,
    ) -> f32 {
        let w = &self.weights;
        let registry = state.registry();
        let mut reward = -w.step_penalty;

        let low_value_owned: u32 = registry
            .of_kind(CardKind::Treasure)
            .filter(|&id| registry[id].coins <= 1)
            .map(|id| state.owned(player, id))
            .sum();

        for def in delta.gained.iter().filter_map(|&card| registry.get(card)) {
            reward += w.victory_gain * def.victory_points as f32;
            if def.is_treasure() {
                reward += w.treasure_gain * def.coins as f32;
                if def.coins <= 1 && low_value_owned > w.clog_threshold {
                    reward -= w.clog_penalty;
                }
            }
        }

        if turn_ended {
            let ps = state.player(player);
            reward += w.resource_use * (ps.used_actions + ps.used_buys) as f32;
        }
        reward
    }

    /// Terminal reward once the game has ended.
    ///
    /// A tie for the top score counts as a win.
    #[must_use]
    pub fn terminal(&self, scores: &[i32], learner: PlayerId) -> f32 {
        let w = &self.weights;
        let own = scores.get(learner.index()).copied().unwrap_or(0);
        let others: Vec<i32> = scores
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != learner.index())
            .map(|(_, &s)| s)
            .collect();

        let won = others.iter().all(|&s| own >= s);
        let mean = if others.is_empty() {
            0.0
        } else {
            others.iter().sum::<i32>() as f32 / others.len() as f32
        };

        let bonus = if won { w.win_bonus } else { -w.win_bonus };
        bonus + w.score_diff * (own as f32 - mean)
    }

    /// Reward when the game is cut off for stalling.
    #[must_use]
    pub fn stalled(&self, scores: &[i32], learner: PlayerId) -> f32 {
        let w = &self.weights;
        let own = scores.get(learner.index()).copied().unwrap_or(0);
        let leading = scores.iter().all(|&s| own >= s);
        let mut reward = w.stall_base + w.stall_score * own as f32;
        if leading {
            reward += w.stall_lead_bonus;
        }
        reward
    }

    /// Reward when the turn ceiling is hit.
    #[must_use]
    pub fn ceiling(&self) -> f32 {
        -self.weights.ceiling_penalty
    }

    /// Reward for an out-of-range or masked index.
    #[must_use]
    pub fn invalid(&self) -> f32 {
        -self.weights.invalid_penalty
    }
}
