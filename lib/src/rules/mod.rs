//! Cellular automaton rules.
//!
//! For the notations of rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

mod life;

use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rule deciding the state of a cell in the next generation.
///
/// Only the standard rule of Conway's Game of Life is provided for now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rule {
    /// `B3/S23`.
    ///
    /// * A living cell with 2 or 3 living neighbors stays alive;
    /// * A dead cell with exactly 3 living neighbors becomes alive;
    /// * Every other cell dies or stays dead.
    #[default]
    Standard,
}

impl Rule {
    /// Whether a cell is alive in the next generation, given whether it is
    /// alive now and the number of its living neighbors.
    ///
    /// Counts out of `0..=8` are accepted and fall into the dead branch.
    #[inline]
    pub fn apply(self, alive: bool, live_neighbors: usize) -> bool {
        match self {
            Rule::Standard => matches!((alive, live_neighbors), (true, 2) | (_, 3)),
        }
    }

    /// The birth conditions.
    pub fn birth(self) -> &'static [u8] {
        match self {
            Rule::Standard => &[3],
        }
    }

    /// The survival conditions.
    pub fn survival(self) -> &'static [u8] {
        match self {
            Rule::Standard => &[2, 3],
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for b in self.birth() {
            write!(f, "{}", b)?;
        }
        f.write_str("/S")?;
        for s in self.survival() {
            write!(f, "{}", s)?;
        }
        Ok(())
    }
}
