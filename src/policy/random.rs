//! Uniform random policy over available options.

use super::{Policy, PlayerView};
use crate::core::action::Choice;
use crate::core::rng::GameRng;

#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose(&mut self, _view: &PlayerView<'_>, choices: &[Choice]) -> usize {
        let available: Vec<usize> = choices
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_available())
            .map(|(i, _)| i)
            .collect();
        self.rng.choose(&available).copied().unwrap_or(0)
    }

    fn name(&self) -> &str {
        "random"
    }
}
