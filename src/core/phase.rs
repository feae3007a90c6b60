//! Turn phases and the exhaustive transition function.
//!
//! A turn walks `None -> Action -> Buy -> Cleanup -> None`. `Cleanup` is
//! never visible to a decision maker: the engine enters and leaves it in the
//! same call.

use serde::{Deserialize, Serialize};

/// Phase of the player whose turn it is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Turn boundary: nobody is mid-turn.
    #[default]
    None,
    Action,
    Buy,
    Cleanup,
}

/// What drives a phase change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseEvent {
    /// The engine handed the turn to a player.
    StartTurn,
    /// The player chose the end-phase option.
    EndPhase,
    /// Cleanup finished (hand discarded, new hand drawn).
    CleanupDone,
}

impl Phase {
    /// Numeric id used in observations.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Phase::None => 0,
            Phase::Action => 1,
            Phase::Buy => 2,
            Phase::Cleanup => 3,
        }
    }

    /// Phases in which a player makes decisions.
    #[must_use]
    pub const fn is_decision_phase(self) -> bool {
        matches!(self, Phase::Action | Phase::Buy)
    }

    /// Apply `event`, returning the next phase, or `None` if the
    /// transition does not exist.
    ///
    /// ```
    /// use rust_dominion::core::{Phase, PhaseEvent};
    ///
    /// assert_eq!(Phase::Action.transition(PhaseEvent::EndPhase), Some(Phase::Buy));
    /// assert_eq!(Phase::Buy.transition(PhaseEvent::StartTurn), None);
    /// ```
    #[must_use]
    pub const fn transition(self, event: PhaseEvent) -> Option<Phase> {
        match (self, event) {
            (Phase::None, PhaseEvent::StartTurn) => Some(Phase::Action),
            (Phase::Action, PhaseEvent::EndPhase) => Some(Phase::Buy),
            (Phase::Buy, PhaseEvent::EndPhase) => Some(Phase::Cleanup),
            (Phase::Cleanup, PhaseEvent::CleanupDone) => Some(Phase::None),
            (Phase::None, _)
            | (Phase::Action, _)
            | (Phase::Buy, _)
            | (Phase::Cleanup, _) => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::None => "NONE",
            Phase::Action => "ACTION",
            Phase::Buy => "BUY",
            Phase::Cleanup => "CLEANUP",
        };
        f.write_str(name)
    }
}
