//! Game state: supply, trash, and every player's zones and resources.
//!
//! ## PlayerState
//!
//! One seat's zones plus the per-turn resources (`actions`, `buys`,
//! `coins`), the turn counter, the seat's phase and the `skip_turn` flag.
//!
//! ## GameState
//!
//! Everything the rules collaborator may touch: the card vocabulary, the
//! supply, the trash, all players and the RNG. It also remembers the total
//! copies of each card at deal time so card conservation can be checked at
//! any point.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{EngineError, Result};
use super::phase::Phase;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{CardId, CardKind, CardRegistry};
use crate::zones::{Drawn, PlayerZones, Supply, Zone, ZoneKind};

/// Cards in a fresh hand.
pub const HAND_SIZE: usize = 5;

/// Starting deck composition.
pub const STARTING_COPPERS: usize = 7;
pub const STARTING_ESTATES: usize = 3;

/// Per-seat state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub zones: PlayerZones,
    pub actions: u32,
    pub buys: u32,
    pub coins: u32,

    /// Turns this seat has started (including skipped ones).
    pub turn_number: u32,
    pub phase: Phase,

    /// Set by effects; consumed at the next turn start.
    pub skip_turn: bool,

    /// Actions and buys actually consumed this turn.
    pub used_actions: u32,
    pub used_buys: u32,

    /// Cards gained this turn, in order.
    pub gained_this_turn: SmallVec<[CardId; 8]>,
}

impl PlayerState {
    /// Reset resources at the start of a turn.
    pub fn reset_resources(&mut self) {
        self.actions = 1;
        self.buys = 1;
        self.coins = 0;
        self.used_actions = 0;
        self.used_buys = 0;
        self.gained_this_turn.clear();
    }
}

/// Complete game state.
///
/// Cloning is cheap: zones are `im` vectors and the registry is shared.
#[derive(Clone, Debug)]
pub struct GameState {
    registry: Arc<CardRegistry>,
    pub supply: Supply,
    pub trash: Zone,
    pub players: PlayerMap<PlayerState>,
    pub rng: GameRng,
    initial_totals: Vec<u32>,
}

impl GameState {
    /// Empty table with full supply piles. No cards are dealt.
    #[must_use]
    pub fn new(registry: Arc<CardRegistry>, player_count: usize, seed: u64) -> Self {
        let supply = Supply::standard(&registry, player_count);
        let mut state = Self {
            registry,
            supply,
            trash: Zone::new(),
            players: PlayerMap::with_default(player_count),
            rng: GameRng::new(seed),
            initial_totals: Vec::new(),
        };
        state.initial_totals = state.card_totals();
        state
    }

    /// Give every player 7 Copper and 3 Estate, shuffle, and draw a hand.
    ///
    /// Conservation totals are taken after the deal.
    pub fn deal_starting_decks(&mut self) {
        for player in PlayerId::all(self.player_count()) {
            let mut deck: Vec<CardId> = std::iter::repeat(CardId::COPPER)
                .take(STARTING_COPPERS)
                .chain(std::iter::repeat(CardId::ESTATE).take(STARTING_ESTATES))
                .collect();
            self.rng.shuffle(&mut deck);

            let ps = &mut self.players[player];
            *ps = PlayerState::default();
            ps.zones.deck = deck.into_iter().collect();
            ps.zones.draw(HAND_SIZE, &mut self.rng);
        }
        self.initial_totals = self.card_totals();
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    /// Draw for one player, reshuffling as needed.
    pub fn draw(&mut self, player: PlayerId, n: usize) -> Drawn {
        let Self { players, rng, .. } = self;
        players[player].zones.draw(n, rng)
    }

    /// Move a card from the supply into one of the player's zones.
    pub fn gain(&mut self, player: PlayerId, card: CardId, to: ZoneKind) -> Result<()> {
        self.supply.take(card)?;
        let state = &mut self.players[player];
        state.zones.zone_mut(to).push(card);
        state.gained_this_turn.push(card);
        Ok(())
    }

    /// Move one copy of a card from a player's zone to the trash.
    pub fn trash_from(&mut self, player: PlayerId, card: CardId, from: ZoneKind) -> Result<()> {
        self.players[player].zones.zone_mut(from).remove_one(card, from)?;
        self.trash.push(card);
        Ok(())
    }

    /// Copies of each card across supply, trash and every player zone.
    #[must_use]
    pub fn card_totals(&self) -> Vec<u32> {
        let mut totals = self.supply.counts().to_vec();
        totals.resize(self.registry.len(), 0);
        self.trash.tally_into(&mut totals);
        for state in self.players.values() {
            state.zones.tally_into(&mut totals);
        }
        totals
    }

    /// Totals recorded at deal time.
    #[must_use]
    pub fn initial_totals(&self) -> &[u32] {
        &self.initial_totals
    }

    /// Check that no card was created or destroyed since the deal.
    pub fn validate_conservation(&self) -> Result<()> {
        let totals = self.card_totals();
        for (id, (&expected, &found)) in self.registry.ids().zip(self.initial_totals.iter().zip(&totals)) {
            if expected != found {
                return Err(EngineError::ZoneInvariantViolation {
                    card: self.registry.name(id).to_string(),
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }

    /// Victory points across every card the player owns.
    #[must_use]
    pub fn victory_points(&self, player: PlayerId) -> i32 {
        self.players[player]
            .zones
            .all_cards()
            .filter_map(|card| self.registry.get(card))
            .map(|def| def.victory_points)
            .sum()
    }

    /// Coin value of the treasures in a player's hand.
    #[must_use]
    pub fn hand_treasure_value(&self, player: PlayerId) -> u32 {
        self.players[player]
            .zones
            .hand
            .iter()
            .filter_map(|card| self.registry.get(card))
            .filter(|def| def.kind == CardKind::Treasure)
            .map(|def| def.coins)
            .sum()
    }

    /// Owned copies of a card across all of a player's zones.
    #[must_use]
    pub fn owned(&self, player: PlayerId, card: CardId) -> u32 {
        ZoneKind::ALL
            .iter()
            .map(|&kind| self.players[player].zones.count(kind, card))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Catalog;
    use crate::core::config::DEFAULT_KINGDOM;

    fn dealt(player_count: usize, seed: u64) -> GameState {
        let registry = Arc::new(CardRegistry::build(&Catalog::standard(), &DEFAULT_KINGDOM).unwrap());
        let mut state = GameState::new(registry, player_count, seed);
        state.deal_starting_decks();
        state
    }

    #[test]
    fn test_deal() {
        let state = dealt(2, 42);
        for player in PlayerId::all(2) {
            let zones = &state.player(player).zones;
            assert_eq!(zones.hand.len(), HAND_SIZE);
            assert_eq!(zones.deck.len(), 5);
            assert_eq!(state.owned(player, CardId::COPPER), 7);
            assert_eq!(state.owned(player, CardId::ESTATE), 3);
            assert_eq!(state.victory_points(player), 3);
        }
        assert!(state.validate_conservation().is_ok());
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = dealt(3, 9);
        let b = dealt(3, 9);
        for player in PlayerId::all(3) {
            assert_eq!(a.player(player).zones, b.player(player).zones);
        }
    }

    #[test]
    fn test_gain_and_trash_conserve() {
        let mut state = dealt(2, 1);
        let p0 = PlayerId::new(0);
        state.gain(p0, CardId::GOLD, ZoneKind::Discard).unwrap();
        assert_eq!(state.supply.count(CardId::GOLD), 29);

        let card = state.player(p0).zones.hand.iter().next().unwrap();
        state.trash_from(p0, card, ZoneKind::Hand).unwrap();
        assert_eq!(state.trash.len(), 1);
        assert!(state.validate_conservation().is_ok());
    }

    #[test]
    fn test_conservation_violation_detected() {
        let mut state = dealt(2, 1);
        state.player_mut(PlayerId::new(1)).zones.discard.push(CardId::PROVINCE);

        let err = state.validate_conservation().unwrap_err();
        assert_eq!(
            err,
            EngineError::ZoneInvariantViolation {
                card: "Province".into(),
                expected: 8,
                found: 9,
            }
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn test_hand_treasure_value() {
        let mut state = dealt(2, 5);
        let p0 = PlayerId::new(0);
        let zones = &mut state.player_mut(p0).zones;
        zones.hand = [CardId::COPPER, CardId::SILVER, CardId::ESTATE, CardId::GOLD]
            .into_iter()
            .collect();
        assert_eq!(state.hand_treasure_value(p0), 6);
    }

    #[test]
    fn test_reset_resources() {
        let mut player = PlayerState {
            actions: 0,
            buys: 3,
            coins: 7,
            used_actions: 2,
            ..PlayerState::default()
        };
        player.reset_resources();
        assert_eq!((player.actions, player.buys, player.coins), (1, 1, 0));
        assert_eq!(player.used_actions, 0);
    }
}
