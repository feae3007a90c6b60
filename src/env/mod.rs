//! Reset/step environment around one game.
//!
//! ## Control flow
//!
//! `step` commits exactly one decision for the seat whose turn it is. When
//! that ends a turn, the environment keeps going inside the same call:
//! scripted bot seats play whole turns until an externally driven seat is
//! in a decision phase, or the episode ends.
//!
//! Externally driven seats are the learning seat and, with
//! `OpponentKind::Human`, every other seat (hot-seat). Rewards are always
//! from the learning seat's point of view; decisions by other seats earn
//! nothing until the game ends.
//!
//! ## Failure handling
//!
//! An out-of-range or masked index costs the invalid-action penalty and
//! changes nothing. Turn ceiling and stall end the episode as truncated.
//! Only a broken invariant escapes as `Err`, and it aborts the episode.

mod render;
mod step;

pub use step::{EndReason, StepInfo, StepResult};

use std::sync::Arc;

use tracing::{debug, error, info, trace, warn};

use crate::cards::{CardId, CardRegistry, Catalog};
use crate::core::action::Choice;
use crate::core::config::{EnvConfig, OpponentKind};
use crate::core::error::{EngineError, Result};
use crate::core::phase::Phase;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::state::GameState;
use crate::encoding::{
    Observation, ObservationContext, ObservationEncoder, RewardShaper, ZoneCountEncoder,
};
use crate::engine::{Game, ResourceDelta, TurnStart};
use crate::options::{self, ChoiceList};
use crate::policy::{BigMoney, Policy, PlayerView};
use crate::rules::{BaseRules, RulesEngine};

/// Upper bound on bot decisions within one turn.
const MAX_BOT_DECISIONS_PER_TURN: usize = 256;

/// Dominion environment.
///
/// ## Example
///
/// ```
/// use rust_dominion::core::EnvConfig;
/// use rust_dominion::env::DominionEnv;
///
/// let mut env = DominionEnv::new(EnvConfig::default()).unwrap();
/// let (obs, _info) = env.reset(Some(7)).unwrap();
/// assert_eq!(obs.len(), env.observation_size());
///
/// // slot 0 always ends the current phase
/// let result = env.step(0).unwrap();
/// assert!(!result.info.invalid_action);
/// ```
#[derive(Clone, Debug)]
pub struct DominionEnv<R = BaseRules> {
    config: EnvConfig,
    registry: Arc<CardRegistry>,
    rules: R,
    encoder: ZoneCountEncoder,
    shaper: RewardShaper,
    game: Game<R>,
    bots: PlayerMap<BigMoney>,
    seed: u64,
    episodes: u64,
    end_reason: Option<EndReason>,
    aborted: bool,
}

impl DominionEnv<BaseRules> {
    /// Environment over the standard catalog and base rules.
    pub fn new(config: EnvConfig) -> Result<Self> {
        Self::with_rules(config, &Catalog::standard(), BaseRules)
    }
}

impl<R: RulesEngine + Clone> DominionEnv<R> {
    /// Environment with a custom catalog and rules collaborator.
    ///
    /// The returned environment already holds a dealt game (seed 0), but
    /// callers should still `reset` before stepping.
    pub fn with_rules(config: EnvConfig, catalog: &Catalog, rules: R) -> Result<Self> {
        let config = config.validated()?;
        let registry = Arc::new(CardRegistry::build(catalog, &config.kingdom)?);
        let required = options::max_options(&registry);
        if config.action_space < required {
            return Err(EngineError::InvalidConfig(format!(
                "action_space {} is below the {required} options this kingdom can offer",
                config.action_space
            )));
        }
        let encoder = ZoneCountEncoder::new(registry.len());
        let shaper = RewardShaper::new(config.reward.clone());
        let game = Self::new_game(&config, &registry, rules.clone(), 0);
        let bots = PlayerMap::with_default(config.player_count);

        Ok(Self {
            config,
            registry,
            rules,
            encoder,
            shaper,
            game,
            bots,
            seed: 0,
            episodes: 0,
            end_reason: None,
            aborted: false,
        })
    }

    fn new_game(config: &EnvConfig, registry: &Arc<CardRegistry>, rules: R, seed: u64) -> Game<R> {
        let state = GameState::new(Arc::clone(registry), config.player_count, seed);
        let mut game = Game::new(rules, state).with_empty_piles_to_end(config.empty_piles_to_end);
        game.start();
        game
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    /// Mutable game access for scenario setup.
    pub fn game_mut(&mut self) -> &mut Game<R> {
        &mut self.game
    }

    #[must_use]
    pub fn observation_size(&self) -> usize {
        self.encoder.size()
    }

    #[must_use]
    pub fn action_space_size(&self) -> usize {
        self.config.action_space
    }

    /// Seed of the current episode.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn learner(&self) -> PlayerId {
        self.config.learner()
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.end_reason.is_some()
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Whether `seat` is driven through `step`.
    #[must_use]
    pub fn is_external(&self, seat: PlayerId) -> bool {
        seat == self.learner() || self.config.opponent == OpponentKind::Human
    }

    /// Enumerated options for the seat to act, padded with `Unavailable`
    /// to the action-space width.
    #[must_use]
    pub fn choices(&self) -> Vec<Choice> {
        options::padded(&self.game.options(), self.config.action_space)
    }

    /// Validity mask over the action space, recomputed on every call.
    #[must_use]
    pub fn action_mask(&self) -> Vec<u8> {
        options::mask(&self.game.options(), self.config.action_space)
    }

    // === Episode ===

    /// Start a new episode.
    ///
    /// `Some(seed)` fixes the shuffle order; `None` advances the previous
    /// seed by one (or uses seed 0 for the first episode).
    pub fn reset(&mut self, seed: Option<u64>) -> Result<(Observation, StepInfo)> {
        self.seed = match seed {
            Some(seed) => seed,
            None if self.episodes == 0 => self.seed,
            None => self.seed.wrapping_add(1),
        };
        self.episodes += 1;
        self.game = Self::new_game(&self.config, &self.registry, self.rules.clone(), self.seed);
        for (_, bot) in self.bots.iter_mut() {
            bot.reset();
        }
        self.end_reason = None;
        self.aborted = false;
        debug!(seed = self.seed, episode = self.episodes, "reset");

        let result = self.advance();
        let ended = self.guard(result)?;
        if let Some(reason) = ended {
            self.finish(reason);
        }
        Ok((self.observe(), self.info(false, None)))
    }

    /// Commit the decision at `index` for the seat to act.
    pub fn step(&mut self, index: usize) -> Result<StepResult> {
        if self.aborted {
            return Err(EngineError::EpisodeAborted);
        }
        if let Some(reason) = self.end_reason {
            return Ok(self.result(0.0, Some(reason), false, None));
        }

        let actor = self.game.current_player();
        let options = self.game.options();
        let choice = match options.get(index) {
            Some(&choice) if index < self.config.action_space => choice,
            _ => return Ok(self.invalid(actor, index, &options)),
        };

        let outcome = match self.game.decide(choice) {
            Ok(outcome) => outcome,
            Err(err) if err.is_fatal() => return Err(self.abort(err)),
            Err(err) => {
                debug!(%actor, %err, "decision rejected");
                return Ok(self.invalid(actor, index, &options));
            }
        };

        let mut reward = if actor == self.learner() {
            self.shaper
                .decision(self.game.state(), actor, &outcome.delta, outcome.turn_ended)
        } else {
            0.0
        };

        let mut ended = outcome.game_over.then_some(EndReason::EndCondition);
        if ended.is_none() && !self.is_external_decision_pending() {
            let result = self.advance();
            ended = self.guard(result)?;
        }

        if let Some(reason) = ended {
            reward = self.finish(reason);
        }
        Ok(self.result(reward, ended, false, Some(outcome.delta)))
    }

    /// Text snapshot of the game.
    #[must_use]
    pub fn render(&self) -> String {
        render::render(self)
    }

    // === Internals ===

    fn is_external_decision_pending(&self) -> bool {
        self.game.phase().is_decision_phase() && self.is_external(self.game.current_player())
    }

    /// Run turn starts and bot decisions until an external seat must
    /// decide or the episode ends.
    fn advance(&mut self) -> Result<Option<EndReason>> {
        let mut bot_decisions = 0;
        loop {
            if self.game.is_game_over() {
                return Ok(Some(EndReason::EndCondition));
            }

            if self.game.phase() == Phase::None {
                bot_decisions = 0;
                let start = self.game.begin_turn()?;
                let (player, skipped) = match start {
                    TurnStart::Started(player) => (player, false),
                    TurnStart::Skipped(player) => (player, true),
                };
                let turn = self.game.state().player(player).turn_number;
                if self.config.quiet {
                    trace!(%player, turn, skipped, "turn");
                } else {
                    info!(%player, turn, skipped, "turn");
                }
                if let Some(reason) = self.forced_end(turn) {
                    return Ok(Some(reason));
                }
                if skipped {
                    continue;
                }
            }

            let player = self.game.current_player();
            if self.is_external(player) {
                return Ok(None);
            }

            let options = self.game.options();
            let choice = if bot_decisions >= MAX_BOT_DECISIONS_PER_TURN {
                warn!(%player, "bot decision limit reached; ending phase");
                Choice::EndPhase
            } else {
                let view = PlayerView::new(self.game.state(), player);
                let index = self.bots[player].choose(&view, &options);
                options.get(index).copied().unwrap_or(Choice::EndPhase)
            };
            bot_decisions += 1;

            match self.game.decide(choice) {
                Ok(_) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    warn!(%player, %err, "bot choice rejected; ending phase");
                    self.game.decide(Choice::EndPhase)?;
                }
            }
        }
    }

    /// Turn ceiling and stall checks, run as each turn starts or is skipped.
    fn forced_end(&self, turn: u32) -> Option<EndReason> {
        if turn >= self.config.turn_ceiling {
            return Some(EndReason::TurnCeiling);
        }
        let stall_turn = self.config.stall_turn?;
        let provinces = self.game.state().supply.count(CardId::PROVINCE);
        let initial = self.game.state().initial_totals().get(CardId::PROVINCE.index()).copied();
        (turn > stall_turn && Some(provinces) == initial).then_some(EndReason::Stalled)
    }

    /// Record the end of the episode and return the learner's final reward.
    fn finish(&mut self, reason: EndReason) -> f32 {
        self.end_reason = Some(reason);
        let scores: Vec<i32> = self.game.scores().values().copied().collect();
        let learner = self.learner();
        let reward = match reason {
            EndReason::EndCondition => self.shaper.terminal(&scores, learner),
            EndReason::TurnCeiling => self.shaper.ceiling(),
            EndReason::Stalled => self.shaper.stalled(&scores, learner),
        };
        info!(%reason, ?scores, reward, seed = self.seed, "episode over");
        reward
    }

    fn invalid(&self, actor: PlayerId, index: usize, options: &ChoiceList) -> StepResult {
        let err = EngineError::InvalidDecision {
            index,
            available: options.len(),
        };
        warn!(%actor, %err, "invalid action");
        let reward = if actor == self.learner() { self.shaper.invalid() } else { 0.0 };
        self.result(reward, None, true, None)
    }

    fn abort(&mut self, err: EngineError) -> EngineError {
        self.aborted = true;
        error!(%err, seed = self.seed, "episode aborted");
        err
    }

    fn guard<T>(&mut self, result: Result<T>) -> Result<T> {
        result.map_err(|err| self.abort(err))
    }

    fn perspective(&self) -> PlayerId {
        let current = self.game.current_player();
        if self.end_reason.is_none() && self.is_external(current) {
            current
        } else {
            self.learner()
        }
    }

    fn observe(&self) -> Observation {
        let perspective = self.perspective();
        let ctx = ObservationContext {
            perspective,
            current: self.game.current_player(),
            learner: self.learner(),
            score: self.game.score(perspective),
        };
        self.encoder.encode(self.game.state(), &ctx)
    }

    fn info(&self, invalid_action: bool, delta: Option<ResourceDelta>) -> StepInfo {
        let current = self.game.current_player();
        StepInfo {
            phase: self.game.phase(),
            current_player: current,
            turn: self.game.state().player(current).turn_number,
            legal_actions: self.game.options().len(),
            invalid_action,
            end_reason: self.end_reason,
            scores: self.game.scores().values().copied().collect(),
            winner: self.end_reason.and_then(|_| self.game.winner()),
            delta,
        }
    }

    fn result(
        &self,
        reward: f32,
        ended: Option<EndReason>,
        invalid_action: bool,
        delta: Option<ResourceDelta>,
    ) -> StepResult {
        StepResult {
            observation: self.observe(),
            reward,
            terminated: ended == Some(EndReason::EndCondition),
            truncated: ended.is_some_and(EndReason::is_forced),
            info: self.info(invalid_action, delta),
        }
    }
}
