//! Observation encoding.
//!
//! Projects the game into a flat, fixed-length `f32` vector:
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0..9 | actions, buys, coins, phase id, deck size, score, turn, current seat, learning seat |
//! | 9.. | one block of `vocab` counts each for hand, played, discard, duration, supply, trash |
//!
//! Own zones are read from the perspective seat. Card blocks follow
//! vocabulary order, so the layout is fixed once the kingdom is chosen.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::zones::ZoneKind;

/// Number of scalar fields before the card blocks.
pub const SCALAR_FIELDS: usize = 9;

/// Per-card count blocks, in layout order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardBlock {
    Hand,
    Played,
    Discard,
    Duration,
    Supply,
    Trash,
}

impl CardBlock {
    pub const ALL: [CardBlock; 6] = [
        CardBlock::Hand,
        CardBlock::Played,
        CardBlock::Discard,
        CardBlock::Duration,
        CardBlock::Supply,
        CardBlock::Trash,
    ];

    const fn position(self) -> usize {
        match self {
            CardBlock::Hand => 0,
            CardBlock::Played => 1,
            CardBlock::Discard => 2,
            CardBlock::Duration => 3,
            CardBlock::Supply => 4,
            CardBlock::Trash => 5,
        }
    }
}

/// Encoded observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub values: Vec<f32>,
}

impl Observation {
    /// Zero-filled observation of the given length.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            values: vec![0.0; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.values.get(index).copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// Who the observation is for, plus values only the rules collaborator
/// can compute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObservationContext {
    pub perspective: PlayerId,
    pub current: PlayerId,
    pub learner: PlayerId,
    pub score: i32,
}

/// Encodes game state into observations.
///
/// The output length depends only on the encoder, never on the state.
pub trait ObservationEncoder: Send + Sync {
    fn encode(&self, state: &GameState, ctx: &ObservationContext) -> Observation;

    /// Length of every encoded observation.
    fn size(&self) -> usize;
}

/// Scalar resources plus per-card zone counts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCountEncoder {
    vocab: usize,
}

impl ZoneCountEncoder {
    /// Encoder for a vocabulary of `vocab` cards.
    #[must_use]
    pub fn new(vocab: usize) -> Self {
        Self { vocab }
    }

    #[must_use]
    pub fn vocab(&self) -> usize {
        self.vocab
    }

    /// Flat offset of a card block.
    #[must_use]
    pub fn block_offset(&self, block: CardBlock) -> usize {
        SCALAR_FIELDS + block.position() * self.vocab
    }

    fn write_block(&self, out: &mut [f32], block: CardBlock, counts: &[u32]) {
        let start = self.block_offset(block);
        for (slot, &n) in out[start..start + self.vocab].iter_mut().zip(counts) {
            *slot = n as f32;
        }
    }

    fn zone_counts(&self, state: &GameState, player: PlayerId, kind: ZoneKind) -> Vec<u32> {
        let mut counts = vec![0; self.vocab];
        state.player(player).zones.zone(kind).tally_into(&mut counts);
        counts
    }
}

impl ObservationEncoder for ZoneCountEncoder {
    fn encode(&self, state: &GameState, ctx: &ObservationContext) -> Observation {
        let mut obs = Observation::zeros(self.size());
        let ps = state.player(ctx.perspective);

        let scalars = [
            ps.actions as f32,
            ps.buys as f32,
            ps.coins as f32,
            f32::from(ps.phase.id()),
            ps.zones.deck.len() as f32,
            ctx.score as f32,
            ps.turn_number as f32,
            f32::from(ctx.current.0),
            f32::from(ctx.learner.0),
        ];
        obs.values[..SCALAR_FIELDS].copy_from_slice(&scalars);

        let zones = [
            (CardBlock::Hand, ZoneKind::Hand),
            (CardBlock::Played, ZoneKind::Played),
            (CardBlock::Discard, ZoneKind::Discard),
            (CardBlock::Duration, ZoneKind::Duration),
        ];
        for (block, kind) in zones {
            let counts = self.zone_counts(state, ctx.perspective, kind);
            self.write_block(&mut obs.values, block, &counts);
        }

        self.write_block(&mut obs.values, CardBlock::Supply, state.supply.counts());

        let mut trash = vec![0; self.vocab];
        state.trash.tally_into(&mut trash);
        self.write_block(&mut obs.values, CardBlock::Trash, &trash);

        obs
    }

    fn size(&self) -> usize {
        SCALAR_FIELDS + CardBlock::ALL.len() * self.vocab
    }
}
