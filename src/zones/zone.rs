//! A single pile of cards.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::error::{EngineError, Result};

/// Named per-player zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Hand,
    Deck,
    Discard,
    /// Cards played this turn.
    Played,
    /// Duration cards waiting for their owner's next turn.
    Duration,
    /// Set aside by effects; returned to discard at cleanup.
    Defer,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 6] = [
        ZoneKind::Hand,
        ZoneKind::Deck,
        ZoneKind::Discard,
        ZoneKind::Played,
        ZoneKind::Duration,
        ZoneKind::Defer,
    ];
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ZoneKind::Hand => "hand",
            ZoneKind::Deck => "deck",
            ZoneKind::Discard => "discard",
            ZoneKind::Played => "played",
            ZoneKind::Duration => "duration",
            ZoneKind::Defer => "defer",
        };
        f.write_str(name)
    }
}

/// An ordered multiset of card ids.
///
/// For a deck the back of the vector is the top. Backed by `im::Vector`
/// so cloning a whole game is cheap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    cards: Vector<CardId>,
}

impl Zone {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Literal occurrence count of `card`.
    #[must_use]
    pub fn count(&self, card: CardId) -> u32 {
        self.cards.iter().filter(|&&c| c == card).count() as u32
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    /// Put a card on top.
    pub fn push(&mut self, card: CardId) {
        self.cards.push_back(card);
    }

    /// Take the top card.
    pub fn pop_top(&mut self) -> Option<CardId> {
        self.cards.pop_back()
    }

    /// Remove one copy of `card`, searching from the top.
    ///
    /// `zone` only labels the error.
    pub fn remove_one(&mut self, card: CardId, zone: ZoneKind) -> Result<()> {
        let pos = self
            .cards
            .iter()
            .rposition(|&c| c == card)
            .ok_or(EngineError::NotFound { card, zone })?;
        self.cards.remove(pos);
        Ok(())
    }

    /// Empty the zone, returning its cards bottom to top.
    pub fn take_all(&mut self) -> Vector<CardId> {
        std::mem::take(&mut self.cards)
    }

    /// Append cards on top, preserving their order.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = CardId>) {
        self.cards.extend(cards);
    }

    /// Place `cards` beneath the current contents.
    pub fn put_under(&mut self, mut cards: Vector<CardId>) {
        cards.append(std::mem::take(&mut self.cards));
        self.cards = cards;
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }

    /// Add this zone's per-card counts into `counts` (indexed by `CardId`).
    pub fn tally_into(&self, counts: &mut [u32]) {
        for card in self.iter() {
            if let Some(slot) = counts.get_mut(card.index()) {
                *slot += 1;
            }
        }
    }
}

impl FromIterator<CardId> for Zone {
    fn from_iter<I: IntoIterator<Item = CardId>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: CardId = CardId::COPPER;
    const B: CardId = CardId::ESTATE;

    #[test]
    fn test_push_pop_top() {
        let mut zone = Zone::new();
        zone.push(A);
        zone.push(B);
        assert_eq!(zone.pop_top(), Some(B));
        assert_eq!(zone.pop_top(), Some(A));
        assert_eq!(zone.pop_top(), None);
    }

    #[test]
    fn test_count_matches_occurrences() {
        let zone: Zone = [A, B, A, A].into_iter().collect();
        assert_eq!(zone.count(A), 3);
        assert_eq!(zone.count(B), 1);
        assert_eq!(zone.count(CardId::GOLD), 0);
    }

    #[test]
    fn test_remove_one_missing_leaves_zone_untouched() {
        let mut zone: Zone = [A, A].into_iter().collect();
        let err = zone.remove_one(B, ZoneKind::Hand).unwrap_err();
        assert_eq!(err, EngineError::NotFound { card: B, zone: ZoneKind::Hand });
        assert_eq!(zone.len(), 2);

        zone.remove_one(A, ZoneKind::Hand).unwrap();
        assert_eq!(zone.count(A), 1);
    }

    #[test]
    fn test_put_under() {
        let mut zone: Zone = [A].into_iter().collect();
        zone.put_under([B, B].into_iter().collect());
        assert_eq!(zone.iter().collect::<Vec<_>>(), vec![B, B, A]);
        assert_eq!(zone.pop_top(), Some(A));
    }

    #[test]
    fn test_tally_into() {
        let zone: Zone = [A, B, A].into_iter().collect();
        let mut counts = vec![0; 7];
        zone.tally_into(&mut counts);
        assert_eq!(counts[A.index()], 2);
        assert_eq!(counts[B.index()], 1);
    }
}
