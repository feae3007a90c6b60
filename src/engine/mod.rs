//! Turn/phase state machine and decision applier.
//!
//! ## Key Types
//!
//! - `Game`: Owns the game state and drives one decision per call
//! - `TurnStart`: Whether a turn began or was skipped
//! - `DecisionOutcome`: Resource delta and phases entered by a decision
//! - `ResourceDelta`: Actions, buys and coins a decision consumed

pub mod applier;
pub mod game;

pub use applier::{apply, ResourceDelta};
pub use game::{DecisionOutcome, Game, TurnMarker, TurnStart};
