//! Positions of cells on the grid.

use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The position of a cell.
///
/// `(row, column)`, both 0-indexed.
///
/// Positions are ordered row-major: lower row first, then lower column.
/// The derived ordering relies on the field order below.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// The row.
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// The column.
    #[inline]
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Sets the row.
    #[inline]
    pub fn set_row(&mut self, row: usize) {
        self.row = row;
    }

    /// Sets the column.
    #[inline]
    pub fn set_col(&mut self, col: usize) {
        self.col = col;
    }

    /// The eight neighbors of the position on a `rows × cols` torus.
    ///
    /// The position must lie inside the torus.
    pub(crate) fn toroidal_neighbors(
        self,
        rows: usize,
        cols: usize,
    ) -> impl Iterator<Item = Position> {
        const NBHD: [(isize, isize); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];

        NBHD.into_iter().map(move |(dr, dc)| {
            Position::new(wrap(self.row, dr, rows), wrap(self.col, dc, cols))
        })
    }
}

/// `(x + d) mod n`, for `x < n` and `|d| <= 1`.
#[inline]
fn wrap(x: usize, d: isize, n: usize) -> usize {
    match d {
        -1 => (x + n - 1) % n,
        0 => x,
        _ => (x + 1) % n,
    }
}

impl From<(usize, usize)> for Position {
    #[inline]
    fn from((row, col): (usize, usize)) -> Self {
        Position::new(row, col)
    }
}

impl From<Position> for (usize, usize) {
    #[inline]
    fn from(pos: Position) -> Self {
        (pos.row, pos.col)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_edges() {
        assert_eq!(wrap(0, -1, 5), 4);
        assert_eq!(wrap(4, 1, 5), 0);
        assert_eq!(wrap(2, 0, 5), 2);
        assert_eq!(wrap(0, -1, 1), 0);
        assert_eq!(wrap(0, 1, 1), 0);
    }

    #[test]
    fn row_major_order() {
        let mut positions = vec![
            Position::new(1, 0),
            Position::new(0, 3),
            Position::new(1, 2),
            Position::new(0, 0),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 0),
                Position::new(0, 3),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
        );
    }

    #[test]
    fn setters() {
        let mut pos = Position::default();
        assert_eq!(pos, Position::new(0, 0));
        pos.set_row(3);
        pos.set_col(7);
        assert_eq!((pos.row(), pos.col()), (3, 7));
        assert_eq!(pos.to_string(), "(3, 7)");
    }
}
