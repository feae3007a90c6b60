//! # rust-dominion
//!
//! A deck-building card game environment with a reset/step interface for
//! reinforcement-learning training.
//!
//! ## Design Principles
//!
//! 1. **Owned Instances**: Each `DominionEnv` owns its whole table. Parallel
//!    training uses one environment per worker.
//!
//! 2. **N-Player First**: Every API takes `player_count` as context.
//!    Per-seat data lives in `PlayerMap`.
//!
//! 3. **Closed Types**: Options are a tagged `Choice` enum, phases an
//!    explicit state machine. Nothing is compared by name at runtime.
//!
//! ## Architecture
//!
//! - **Fixed Action Space**: Options are enumerated fresh for every
//!   decision and padded to a fixed width; slot 0 always ends the phase.
//!
//! - **Persistent Data Structures**: Zones use `im-rs` vectors, so cloning
//!   an environment is cheap.
//!
//! - **Deterministic**: All shuffles go through a seeded ChaCha8 RNG.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, phases, configuration, errors, table state
//! - `cards`: Card definitions, catalog, vocabulary registry
//! - `zones`: Card zones and the supply
//! - `rules`: RulesEngine trait and the base-set rules
//! - `options`: Option enumeration and masking
//! - `engine`: Turn/phase state machine and decision applier
//! - `policy`: Policy trait, big-money bot, random policy
//! - `encoding`: Observation encoder and reward shaper
//! - `env`: Reset/step environment
//! - `eval`: Episode runner

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod options;
pub mod engine;
pub mod policy;
pub mod encoding;
pub mod env;
pub mod eval;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Choice, ChoiceRecord, EngineError, EnvConfig, GameRng, GameState,
    OpponentKind, Phase, PhaseEvent, PlayerId, PlayerMap, PlayerState, Result,
};

pub use crate::cards::{CardDef, CardId, CardKind, CardRegistry, Catalog, Effect};

pub use crate::zones::{PlayerZones, Supply, Zone, ZoneKind};

pub use crate::rules::{BaseRules, RulesEngine};

pub use crate::engine::{DecisionOutcome, Game, ResourceDelta, TurnStart};

pub use crate::policy::{BigMoney, PlayerView, Policy, RandomPolicy};

pub use crate::encoding::{Observation, ObservationEncoder, RewardShaper, RewardWeights, ZoneCountEncoder};

pub use crate::env::{DominionEnv, EndReason, StepInfo, StepResult};

pub use crate::eval::{run_episode, EpisodeSummary};
