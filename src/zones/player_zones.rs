//! The zones one player owns, and card movement between them.
//!
//! ## Drawing
//!
//! `draw` reshuffles the discard pile into the deck whenever the deck runs
//! out mid-draw. With both empty it stops early; a short hand is normal.

use serde::{Deserialize, Serialize};

use super::zone::{Zone, ZoneKind};
use crate::cards::CardId;
use crate::core::error::Result;
use crate::core::rng::GameRng;

/// Outcome of a draw request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Drawn {
    /// Cards actually moved to hand.
    pub count: usize,
    /// How many times discard was shuffled into the deck.
    pub reshuffles: u32,
}

/// Hand, deck, discard, played, duration and defer zones of one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerZones {
    pub hand: Zone,
    pub deck: Zone,
    pub discard: Zone,
    pub played: Zone,
    pub duration: Zone,
    pub defer: Zone,
}

impl PlayerZones {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn zone(&self, kind: ZoneKind) -> &Zone {
        match kind {
            ZoneKind::Hand => &self.hand,
            ZoneKind::Deck => &self.deck,
            ZoneKind::Discard => &self.discard,
            ZoneKind::Played => &self.played,
            ZoneKind::Duration => &self.duration,
            ZoneKind::Defer => &self.defer,
        }
    }

    pub fn zone_mut(&mut self, kind: ZoneKind) -> &mut Zone {
        match kind {
            ZoneKind::Hand => &mut self.hand,
            ZoneKind::Deck => &mut self.deck,
            ZoneKind::Discard => &mut self.discard,
            ZoneKind::Played => &mut self.played,
            ZoneKind::Duration => &mut self.duration,
            ZoneKind::Defer => &mut self.defer,
        }
    }

    /// Occurrences of `card` in one zone.
    #[must_use]
    pub fn count(&self, kind: ZoneKind, card: CardId) -> u32 {
        self.zone(kind).count(card)
    }

    /// Move one copy of `card`. Fails with `NotFound` and changes nothing
    /// if `from` holds no copy.
    pub fn move_card(&mut self, card: CardId, from: ZoneKind, to: ZoneKind) -> Result<()> {
        self.zone_mut(from).remove_one(card, from)?;
        self.zone_mut(to).push(card);
        Ok(())
    }

    /// Move every card in `from` onto `to`.
    pub fn move_all(&mut self, from: ZoneKind, to: ZoneKind) {
        if from == to {
            return;
        }
        let cards = self.zone_mut(from).take_all();
        self.zone_mut(to).extend(cards);
    }

    /// Shuffle the whole discard pile and place it under the deck.
    pub fn shuffle_into_deck(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<CardId> = self.discard.take_all().into_iter().collect();
        rng.shuffle(&mut cards);
        self.deck.put_under(cards.into_iter().collect());
    }

    /// Draw up to `n` cards into hand.
    pub fn draw(&mut self, n: usize, rng: &mut GameRng) -> Drawn {
        let mut drawn = Drawn::default();
        while drawn.count < n {
            if self.deck.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                self.shuffle_into_deck(rng);
                drawn.reshuffles += 1;
            }
            match self.deck.pop_top() {
                Some(card) => {
                    self.hand.push(card);
                    drawn.count += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Cards the player owns, across every zone.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        ZoneKind::ALL.iter().map(|&k| self.zone(k).len()).sum()
    }

    /// Add per-card counts of every zone into `counts`.
    pub fn tally_into(&self, counts: &mut [u32]) {
        for kind in ZoneKind::ALL {
            self.zone(kind).tally_into(counts);
        }
    }

    /// Iterate over every owned card regardless of zone.
    pub fn all_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        ZoneKind::ALL.into_iter().flat_map(move |k| self.zone(k).iter())
    }
}
