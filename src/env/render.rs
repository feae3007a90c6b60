//! Plain-text snapshot of an environment.

use std::fmt::Write;

use super::DominionEnv;
use crate::cards::CardId;
use crate::core::player::PlayerId;
use crate::rules::RulesEngine;
use crate::zones::Zone;

fn card_list(zone: &Zone, name: impl Fn(CardId) -> String) -> String {
    if zone.is_empty() {
        return "-".to_string();
    }
    zone.iter().map(name).collect::<Vec<_>>().join(", ")
}

pub(super) fn render<R: RulesEngine + Clone>(env: &DominionEnv<R>) -> String {
    let game = env.game();
    let state = game.state();
    let registry = state.registry();
    let name = |card: CardId| registry.name(card).to_string();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "=== seed {} | {} to act | phase {} ===",
        env.seed(),
        game.current_player(),
        game.phase()
    );
    if let Some(reason) = env.end_reason() {
        let _ = writeln!(out, "episode over: {reason}");
    }

    for player in PlayerId::all(state.player_count()) {
        let ps = state.player(player);
        let marker = if player == env.learner() { " (learner)" } else { "" };
        let _ = writeln!(
            out,
            "{player}{marker}: turn {} | {} VP | actions {} buys {} coins {} | deck {} discard {}",
            ps.turn_number,
            game.score(player),
            ps.actions,
            ps.buys,
            ps.coins,
            ps.zones.deck.len(),
            ps.zones.discard.len(),
        );
        let _ = writeln!(out, "  hand: {}", card_list(&ps.zones.hand, name));
        let _ = writeln!(out, "  played: {}", card_list(&ps.zones.played, name));
        if !ps.zones.duration.is_empty() {
            let _ = writeln!(out, "  duration: {}", card_list(&ps.zones.duration, name));
        }
    }

    let _ = write!(out, "supply:");
    for (id, def) in registry.iter() {
        let _ = write!(out, " {}={}", def.name, state.supply.count(id));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "trash: {}", card_list(&state.trash, name));

    let options = env.choices();
    let _ = write!(out, "options:");
    for (i, choice) in options.iter().enumerate().filter(|(_, c)| c.is_available()) {
        let _ = write!(out, " [{i}] {}", choice.label(registry));
    }
    let _ = writeln!(out);
    out
}
