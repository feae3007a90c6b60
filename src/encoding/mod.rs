//! Observation and reward encoding.
//!
//! These define the numeric interface between the engine and a learning
//! agent (typically in Python via PyO3).

pub mod observation;
pub mod reward;

pub use observation::{
    CardBlock, Observation, ObservationContext, ObservationEncoder, ZoneCountEncoder, SCALAR_FIELDS,
};
pub use reward::{RewardShaper, RewardWeights};
