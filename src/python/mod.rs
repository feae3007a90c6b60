//! Python bindings for the rust-dominion environment.
//!
//! # Quick Start
//!
//! ```python
//! import rust_dominion as dom
//!
//! env = dom.DominionEnv(player_count=2, opponent="bot")
//! obs, info = env.reset(seed=42)
//!
//! done = False
//! while not done:
//!     mask = env.action_mask()
//!     action = int(mask.nonzero()[0][-1])
//!     obs, reward, terminated, truncated, info = env.step(action)
//!     done = terminated or truncated
//! ```

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;

use crate::core::error::EngineError;

mod py_env;

pub use py_env::*;

/// Engine errors surface in Python as `RuntimeError`.
pub(crate) fn to_py_err(err: EngineError) -> PyErr {
    PyRuntimeError::new_err(err.to_string())
}

/// rust-dominion: a deck-building card game environment for RL training.
#[pymodule]
fn rust_dominion(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDominionEnv>()?;
    m.add_class::<PyEpisodeSummary>()?;
    Ok(())
}
