//! Step and reset return types.

use serde::{Deserialize, Serialize};

use crate::core::phase::Phase;
use crate::core::player::PlayerId;
use crate::encoding::Observation;
use crate::engine::ResourceDelta;

/// Why an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Province pile or enough supply piles emptied. Natural termination.
    EndCondition,
    /// A seat reached the turn ceiling.
    TurnCeiling,
    /// The Province pile was untouched past the stall turn.
    Stalled,
}

impl EndReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EndReason::EndCondition => "end_condition",
            EndReason::TurnCeiling => "turn_ceiling",
            EndReason::Stalled => "stalled",
        }
    }

    /// Forced endings are reported as truncation, not termination.
    #[must_use]
    pub fn is_forced(self) -> bool {
        !matches!(self, EndReason::EndCondition)
    }
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostics returned with every observation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    pub phase: Phase,
    pub current_player: PlayerId,
    /// Turn number of the current player.
    pub turn: u32,
    /// Number of enumerated options for the current player.
    pub legal_actions: usize,
    /// The index was out of range or masked; nothing changed.
    pub invalid_action: bool,
    pub end_reason: Option<EndReason>,
    pub scores: Vec<i32>,
    pub winner: Option<PlayerId>,
    /// What the committed decision consumed, if one was committed.
    pub delta: Option<ResourceDelta>,
}

/// Result of `step`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f32,
    /// The game reached its natural end.
    pub terminated: bool,
    /// The episode was cut off (turn ceiling or stall).
    pub truncated: bool,
    pub info: StepInfo,
}

impl StepResult {
    #[must_use]
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}
