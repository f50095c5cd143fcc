//! Python bindings for the whack-a-mole engine.
//!
//! Lets a Python host (a notebook, a bot, a pygame front end) run rounds
//! on a virtual clock.
//!
//! # Quick Start
//!
//! ```python
//! import whack_a_mole as wam
//!
//! game = wam.GameEngine(seed=7)
//! game.start()
//! game.advance(1000)          # one second: countdown + spawn
//! hit = [i for i, c in enumerate(game.cells) if c != "empty"]
//! if hit:
//!     game.whack(hit[0])
//! print(game.score, game.time_left)
//! ```

use pyo3::prelude::*;

mod py_engine;

pub use py_engine::*;

/// whack_a_mole: a deterministic whack-a-mole engine.
#[pymodule]
fn whack_a_mole(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGameEngine>()?;
    Ok(())
}
