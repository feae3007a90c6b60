//! Episode runner.
//!
//! Drives every externally controlled seat of a [`DominionEnv`] with one
//! [`Policy`] until the episode ends. Useful for baselines, smoke tests and
//! throughput measurement.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::Result;
use crate::core::player::PlayerId;
use crate::env::{DominionEnv, EndReason};
use crate::policy::{PlayerView, Policy};
use crate::rules::RulesEngine;

/// Upper bound on `step` calls in one episode.
pub const MAX_EPISODE_STEPS: usize = 100_000;

/// Outcome of one episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub seed: u64,
    pub steps: usize,
    /// Sum of the learning seat's rewards.
    pub total_reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub end_reason: Option<EndReason>,
    pub scores: Vec<i32>,
    pub winner: Option<PlayerId>,
    /// Steps rejected as invalid.
    pub invalid_steps: usize,
}

/// Play one episode from `reset(Some(seed))` to its end.
///
/// The policy only ever sees enumerated options, so a well-behaved policy
/// never triggers the invalid-action penalty. Episodes that have not ended
/// after [`MAX_EPISODE_STEPS`] steps are returned with neither flag set.
pub fn run_episode<R, P>(env: &mut DominionEnv<R>, policy: &mut P, seed: u64) -> Result<EpisodeSummary>
where
    R: RulesEngine + Clone,
    P: Policy + ?Sized,
{
    policy.reset();
    env.reset(Some(seed))?;

    let mut summary = EpisodeSummary {
        seed,
        steps: 0,
        total_reward: 0.0,
        terminated: false,
        truncated: false,
        end_reason: env.end_reason(),
        scores: env.game().scores().values().copied().collect(),
        winner: None,
        invalid_steps: 0,
    };
    if env.is_done() {
        summary.truncated = env.end_reason().is_some_and(EndReason::is_forced);
        summary.terminated = !summary.truncated;
        summary.winner = env.game().winner();
        return Ok(summary);
    }

    while summary.steps < MAX_EPISODE_STEPS {
        let game = env.game();
        let options = game.options();
        let view = PlayerView::new(game.state(), game.current_player());
        let index = policy.choose(&view, &options);

        let result = env.step(index)?;
        summary.steps += 1;
        summary.total_reward += result.reward;
        if result.info.invalid_action {
            summary.invalid_steps += 1;
        }

        if result.done() {
            summary.terminated = result.terminated;
            summary.truncated = result.truncated;
            summary.end_reason = result.info.end_reason;
            summary.scores = result.info.scores;
            summary.winner = result.info.winner;
            break;
        }
    }

    debug!(
        seed,
        steps = summary.steps,
        reward = summary.total_reward,
        policy = policy.name(),
        "episode finished"
    );
    Ok(summary)
}
