//! Base-set rules over the closed `Effect` list.

use tracing::trace;

use super::engine::RulesEngine;
use crate::cards::{CardDef, CardId, Effect};
use crate::core::error::{EngineError, Result};
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::zones::ZoneKind;

/// Resolves each card's `on_play` and `next_turn` effects in order.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseRules;

impl BaseRules {
    fn def(state: &GameState, card: CardId) -> Result<CardDef> {
        state
            .registry()
            .get(card)
            .cloned()
            .ok_or_else(|| EngineError::UnknownCard(card.to_string()))
    }

    fn resolve(&self, state: &mut GameState, player: PlayerId, effect: &Effect) -> Result<()> {
        trace!(%player, ?effect, "resolve effect");
        match effect {
            Effect::DrawCards(n) => {
                state.draw(player, *n as usize);
            }
            Effect::AddActions(n) => state.player_mut(player).actions += n,
            Effect::AddBuys(n) => state.player_mut(player).buys += n,
            Effect::AddCoins(n) => state.player_mut(player).coins += n,
            Effect::OthersDraw(n) => {
                for other in player.others(state.player_count()) {
                    state.draw(other, *n as usize);
                }
            }
            Effect::OthersGain(name) => {
                let card = state.registry().require(name)?;
                for other in player.others(state.player_count()) {
                    if state.supply.count(card) == 0 {
                        break;
                    }
                    state.gain(other, card, ZoneKind::Discard)?;
                }
            }
            Effect::TrashFromHand { card, coins } => {
                let card = state.registry().require(card)?;
                if state.player(player).zones.hand.contains(card) {
                    state.trash_from(player, card, ZoneKind::Hand)?;
                    state.player_mut(player).coins += coins;
                }
            }
        }
        Ok(())
    }
}

impl RulesEngine for BaseRules {
    fn play_action(&self, state: &mut GameState, player: PlayerId, card: CardId) -> Result<()> {
        let def = Self::def(state, card)?;
        if !def.is_action() {
            return Err(EngineError::IllegalChoice(format!("{} is not an action", def.name)));
        }
        if state.player(player).actions == 0 {
            return Err(EngineError::InsufficientResources("actions"));
        }

        let to = if def.is_duration() { ZoneKind::Duration } else { ZoneKind::Played };
        state.player_mut(player).zones.move_card(card, ZoneKind::Hand, to)?;
        state.player_mut(player).actions -= 1;

        for effect in &def.on_play {
            self.resolve(state, player, effect)?;
        }
        Ok(())
    }

    fn play_treasure(&self, state: &mut GameState, player: PlayerId, card: CardId) -> Result<()> {
        let def = Self::def(state, card)?;
        if !def.is_treasure() {
            return Err(EngineError::IllegalChoice(format!("{} is not a treasure", def.name)));
        }

        let ps = state.player_mut(player);
        ps.zones.move_card(card, ZoneKind::Hand, ZoneKind::Played)?;
        ps.coins += def.coins;
        Ok(())
    }

    fn buy(&self, state: &mut GameState, player: PlayerId, card: CardId) -> Result<()> {
        let def = Self::def(state, card)?;
        let ps = state.player(player);
        if ps.buys == 0 {
            return Err(EngineError::InsufficientResources("buys"));
        }
        if ps.coins < def.cost {
            return Err(EngineError::InsufficientResources("coins"));
        }

        state.gain(player, card, ZoneKind::Discard)?;
        let ps = state.player_mut(player);
        ps.coins -= def.cost;
        ps.buys -= 1;
        Ok(())
    }

    /// Duration cards come back into play and fire their next-turn effects.
    fn start_of_turn(&self, state: &mut GameState, player: PlayerId) -> Result<()> {
        let waiting: Vec<CardId> = state.player(player).zones.duration.iter().collect();
        for card in waiting {
            state
                .player_mut(player)
                .zones
                .move_card(card, ZoneKind::Duration, ZoneKind::Played)?;
            let def = Self::def(state, card)?;
            for effect in &def.next_turn {
                self.resolve(state, player, effect)?;
            }
        }
        Ok(())
    }
}
