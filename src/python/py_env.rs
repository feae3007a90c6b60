//! Environment bindings for Python.

use std::sync::Once;

use numpy::PyArray1;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::core::config::{EnvConfig, OpponentKind, DEFAULT_KINGDOM};
use crate::env::{DominionEnv, StepInfo};
use crate::eval::{run_episode, EpisodeSummary};
use crate::policy::BigMoney;

use super::to_py_err;

static SUBSCRIBER: Once = Once::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
fn init_logging() {
    SUBSCRIBER.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}

fn info_dict<'py>(py: Python<'py>, info: &StepInfo) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("phase", info.phase.to_string())?;
    dict.set_item("phase_id", info.phase.id())?;
    dict.set_item("current_player", info.current_player.0)?;
    dict.set_item("turn", info.turn)?;
    dict.set_item("legal_actions", info.legal_actions)?;
    dict.set_item("invalid_action", info.invalid_action)?;
    dict.set_item("end_reason", info.end_reason.map(|r| r.as_str()))?;
    dict.set_item("scores", info.scores.clone())?;
    dict.set_item("winner", info.winner.map(|p| p.0))?;
    Ok(dict)
}

/// Python wrapper for DominionEnv.
#[pyclass(name = "DominionEnv")]
pub struct PyDominionEnv {
    env: DominionEnv,
}

#[pymethods]
impl PyDominionEnv {
    /// Create a new environment.
    ///
    /// # Arguments
    /// - player_count: Number of seats (2-6)
    /// - kingdom: Action card names (default: the standard ten)
    /// - quiet: Suppress turn narration; `False` also installs a log subscriber
    /// - learning_player: Seat index driven by `step`
    /// - opponent: "bot" or "human"
    /// - turn_ceiling: Turn at which the episode is cut off
    /// - stall_turn: Turn after which an untouched Province pile ends the episode
    /// - action_space: Width of the action mask
    #[new]
    #[pyo3(signature = (
        player_count = 2,
        kingdom = None,
        quiet = true,
        learning_player = 0,
        opponent = "bot",
        turn_ceiling = 75,
        stall_turn = Some(30),
        action_space = 28
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        player_count: usize,
        kingdom: Option<Vec<String>>,
        quiet: bool,
        learning_player: u8,
        opponent: &str,
        turn_ceiling: u32,
        stall_turn: Option<u32>,
        action_space: usize,
    ) -> PyResult<Self> {
        if !quiet {
            init_logging();
        }
        let opponent: OpponentKind = opponent.parse().map_err(to_py_err)?;
        let config = EnvConfig::default()
            .with_player_count(player_count)
            .with_kingdom(kingdom.unwrap_or_else(|| DEFAULT_KINGDOM.iter().map(|s| s.to_string()).collect()))
            .with_quiet(quiet)
            .with_learning_player(learning_player)
            .with_opponent(opponent)
            .with_turn_ceiling(turn_ceiling)
            .with_stall_turn(stall_turn)
            .with_action_space(action_space);
        Self::from_config(config)
    }

    /// Create an environment from a JSON config string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = EnvConfig::from_json(json).map_err(to_py_err)?;
        if !config.quiet {
            init_logging();
        }
        Self::from_config(config)
    }

    /// Start a new episode. Returns `(observation, info)`.
    #[pyo3(signature = (seed = None))]
    fn reset<'py>(
        &mut self,
        py: Python<'py>,
        seed: Option<u64>,
    ) -> PyResult<(Bound<'py, PyArray1<f32>>, Bound<'py, PyDict>)> {
        let (obs, info) = self.env.reset(seed).map_err(to_py_err)?;
        Ok((PyArray1::from_slice_bound(py, obs.as_slice()), info_dict(py, &info)?))
    }

    /// Commit one decision. Returns `(observation, reward, terminated, truncated, info)`.
    #[allow(clippy::type_complexity)]
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: usize,
    ) -> PyResult<(Bound<'py, PyArray1<f32>>, f32, bool, bool, Bound<'py, PyDict>)> {
        let result = self.env.step(action).map_err(to_py_err)?;
        Ok((
            PyArray1::from_slice_bound(py, result.observation.as_slice()),
            result.reward,
            result.terminated,
            result.truncated,
            info_dict(py, &result.info)?,
        ))
    }

    /// Validity mask over the action space (1 = legal).
    fn action_mask<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<u8>> {
        PyArray1::from_vec_bound(py, self.env.action_mask())
    }

    /// Labels of the enumerated options, `-` for padding.
    fn action_labels(&self) -> Vec<String> {
        let registry = self.env.registry();
        self.env.choices().iter().map(|c| c.label(registry)).collect()
    }

    /// Text snapshot of the game.
    fn render(&self) -> String {
        self.env.render()
    }

    /// Play a full episode with the big-money policy in every external seat.
    fn play_big_money(&mut self, seed: u64) -> PyResult<PyEpisodeSummary> {
        run_episode(&mut self.env, &mut BigMoney::new(), seed)
            .map(PyEpisodeSummary)
            .map_err(to_py_err)
    }

    /// Independent copy of the environment, episode state included.
    fn copy(&self) -> Self {
        Self {
            env: self.env.clone(),
        }
    }

    #[getter]
    fn observation_size(&self) -> usize {
        self.env.observation_size()
    }

    #[getter]
    fn action_space_size(&self) -> usize {
        self.env.action_space_size()
    }

    #[getter]
    fn player_count(&self) -> usize {
        self.env.config().player_count
    }

    #[getter]
    fn learning_player(&self) -> u8 {
        self.env.learner().0
    }

    /// Vocabulary in observation order.
    #[getter]
    fn card_names(&self) -> Vec<String> {
        self.env.registry().iter().map(|(_, def)| def.name.clone()).collect()
    }

    fn __repr__(&self) -> String {
        let game = self.env.game();
        format!(
            "DominionEnv(players={}, current=P{}, phase={}, done={})",
            self.env.config().player_count,
            game.current_player().0,
            game.phase(),
            self.env.is_done()
        )
    }
}

impl PyDominionEnv {
    fn from_config(config: EnvConfig) -> PyResult<Self> {
        let env = DominionEnv::new(config).map_err(to_py_err)?;
        Ok(Self { env })
    }
}

/// Python wrapper for EpisodeSummary.
#[pyclass(name = "EpisodeSummary")]
#[derive(Clone, Debug)]
pub struct PyEpisodeSummary(pub EpisodeSummary);

#[pymethods]
impl PyEpisodeSummary {
    #[getter]
    fn seed(&self) -> u64 {
        self.0.seed
    }

    #[getter]
    fn steps(&self) -> usize {
        self.0.steps
    }

    #[getter]
    fn total_reward(&self) -> f32 {
        self.0.total_reward
    }

    #[getter]
    fn terminated(&self) -> bool {
        self.0.terminated
    }

    #[getter]
    fn truncated(&self) -> bool {
        self.0.truncated
    }

    #[getter]
    fn end_reason(&self) -> Option<&'static str> {
        self.0.end_reason.map(|r| r.as_str())
    }

    #[getter]
    fn scores(&self) -> Vec<i32> {
        self.0.scores.clone()
    }

    #[getter]
    fn winner(&self) -> Option<u8> {
        self.0.winner.map(|p| p.0)
    }

    /// Summary as a JSON string.
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.0)
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "EpisodeSummary(steps={}, reward={:.2}, end={:?}, scores={:?})",
            self.0.steps,
            self.0.total_reward,
            self.end_reason(),
            self.0.scores
        )
    }
}
