//! Grid cells and their occupants.
//!
//! The playfield is a fixed 3×3 grid. Each hole holds at most one
//! occupant at a time, described by `CellContent`.

use serde::{Deserialize, Serialize};

/// Number of holes in the grid (3×3).
pub const GRID_SIZE: usize = 9;

/// Width of the grid, for renderers laying cells out in rows.
pub const GRID_COLUMNS: usize = 3;

/// Convert a host-supplied index (possibly negative) to a grid index.
///
/// `None` for anything off the grid.
#[must_use]
pub fn grid_index(raw: i64) -> Option<usize> {
    usize::try_from(raw).ok().filter(|&index| index < GRID_SIZE)
}

/// What currently occupies a hole.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellContent {
    /// Nothing to hit.
    #[default]
    Empty,
    /// Ordinary mole, worth +1.
    Plain,
    /// Decoy, costs 1 point when hit.
    Penalty,
    /// Rare mole worth +3. Never outlives a despawn tick.
    Golden,
}

impl CellContent {
    /// All occupant kinds, excluding `Empty`.
    pub const OCCUPANTS: [CellContent; 3] = [
        CellContent::Plain,
        CellContent::Penalty,
        CellContent::Golden,
    ];

    /// Score delta for hitting this cell.
    ///
    /// `None` for `Empty`, since there is nothing to hit.
    #[must_use]
    pub const fn score_value(self) -> Option<i32> {
        match self {
            CellContent::Empty => None,
            CellContent::Plain => Some(1),
            CellContent::Penalty => Some(-1),
            CellContent::Golden => Some(3),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, CellContent::Empty)
    }

    #[must_use]
    pub const fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    /// Stable lowercase name, used by logs and the Python bindings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CellContent::Empty => "empty",
            CellContent::Plain => "plain",
            CellContent::Penalty => "penalty",
            CellContent::Golden => "golden",
        }
    }
}

impl std::fmt::Display for CellContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
