use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate on a grid. Rows grow downwards, columns to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// The two stacked grids of the habitat.
///
/// Animals live on `Fauna`; plants grow unseen on `Flora` underneath them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    #[default]
    Fauna,
    Flora,
}

impl Layer {
    pub const ALL: [Layer; 2] = [Layer::Fauna, Layer::Flora];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Layer::Fauna => "fauna",
            Layer::Flora => "flora",
        }
    }
}
