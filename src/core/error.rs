//! Engine error taxonomy.

use thiserror::Error;

use super::phase::{Phase, PhaseEvent};
use crate::cards::CardId;
use crate::zones::ZoneKind;

/// Errors raised by the zone model, the rules collaborator and the turn
/// state machine.
///
/// Only [`EngineError::ZoneInvariantViolation`] is fatal to an episode; the
/// environment absorbs the rest into its step contract.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{card} not found in {zone}")]
    NotFound { card: CardId, zone: ZoneKind },

    #[error("supply pile for {0} is empty")]
    EmptySupply(CardId),

    #[error("unknown card: {0}")]
    UnknownCard(String),

    #[error("decision index {index} out of range ({available} options)")]
    InvalidDecision { index: usize, available: usize },

    #[error("chosen slot is marked unavailable")]
    UnavailableChoice,

    #[error("choice `{0}` is not legal in the current state")]
    IllegalChoice(String),

    #[error("illegal phase transition from {from} on {event:?}")]
    IllegalTransition { from: Phase, event: PhaseEvent },

    #[error("the game is over")]
    GameOver,

    #[error("no player is mid-turn (phase {0})")]
    NotMidTurn(Phase),

    #[error("card conservation violated for {card}: expected {expected}, found {found}")]
    ZoneInvariantViolation {
        card: String,
        expected: u32,
        found: u32,
    },

    #[error("not enough {0}")]
    InsufficientResources(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("episode aborted after a fatal engine error")]
    EpisodeAborted,
}

impl EngineError {
    /// Fatal errors abort the episode; everything else is recoverable.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::ZoneInvariantViolation { .. })
    }

    /// Errors caused by a bad decision from the caller.
    #[must_use]
    pub fn is_invalid_decision(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidDecision { .. }
                | EngineError::UnavailableChoice
                | EngineError::IllegalChoice(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
