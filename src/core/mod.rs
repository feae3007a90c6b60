//! Core types: players, RNG, phases, configuration, errors and table state.
//!
//! Everything here is independent of how decisions are made; the turn
//! state machine lives in `engine` and the reset/step surface in `env`.

pub mod action;
pub mod config;
pub mod error;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Choice, ChoiceRecord};
pub use config::{EnvConfig, OpponentKind, DEFAULT_KINGDOM};
pub use error::{EngineError, Result};
pub use phase::{Phase, PhaseEvent};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{GameState, PlayerState};
