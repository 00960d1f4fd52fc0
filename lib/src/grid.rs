//! The grid.

use crate::{
    error::{Error, FormatError},
    position::Position,
    rules::Rule,
};
use log::{debug, info, trace};
use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    fmt::{self, Display, Formatter},
    fs,
    io::Read,
    path::Path,
    str::FromStr,
};

/// A finite grid whose edges wrap around.
///
/// The dense matrix `cells` and the sparse set `live` always describe the
/// same configuration; every public method keeps them in sync.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,

    /// States of all cells, in row-major order.
    cells: Vec<bool>,

    /// Positions of all living cells.
    live: BTreeSet<Position>,

    /// Configuration strings of all generations seen so far,
    /// including the current one.
    seen: HashSet<String>,

    rule: Rule,

    /// Number of steps since the grid was loaded or last edited.
    generation: u64,
}

impl Grid {
    /// Creates a grid with all cells dead.
    pub fn new(rows: usize, cols: usize) -> Result<Self, Error> {
        if rows == 0 || cols == 0 {
            return Err(FormatError::NonPositive {
                rows: rows as i64,
                cols: cols as i64,
            }
            .into());
        }
        let len = rows
            .checked_mul(cols)
            .ok_or(FormatError::TooLarge { rows, cols })?;
        Ok(Grid::from_cells(rows, cols, vec![false; len]))
    }

    /// Builds the grid from a row-major vector of states,
    /// and seeds the history with its configuration.
    fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        let live = cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| Position::new(i / cols, i % cols))
            .collect();
        let mut grid = Grid {
            rows,
            cols,
            cells,
            live,
            seen: HashSet::new(),
            rule: Rule::default(),
            generation: 0,
        };
        grid.reset_history();
        grid
    }

    /// Loads the initial configuration from a file.
    ///
    /// The file holds the number of rows and columns, followed by
    /// `rows * cols` integers in row-major order, all separated by
    /// whitespace. `1` means alive. Any other integer means dead.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| FormatError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let grid: Grid = input.parse()?;
        debug!(
            "Loaded {}x{} grid with {} living cells from {:?}",
            grid.rows,
            grid.cols,
            grid.live_count(),
            path
        );
        Ok(grid)
    }

    /// Reads the initial configuration from a reader.
    ///
    /// See [`load`](Self::load) for the format.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut input = String::new();
        reader
            .read_to_string(&mut input)
            .map_err(FormatError::Read)?;
        input.parse()
    }

    /// Sets the rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    /// The rule.
    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// `(rows, columns)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        pos.row() * self.cols + pos.col()
    }

    /// Whether the cell is alive.
    ///
    /// Cells outside the grid are dead.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[self.index(Position::new(row, col))]
    }

    /// Number of living cells.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Positions of living cells, in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.live.iter().copied()
    }

    /// Number of steps since the grid was loaded or last edited.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of distinct configurations seen so far.
    pub fn history_len(&self) -> usize {
        self.seen.len()
    }

    /// Sets the state of a cell. Coordinates wrap around the edges.
    ///
    /// Editing the grid starts a new run: the history only remembers
    /// the edited configuration, and the generation goes back to 0.
    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) {
        let pos = Position::new(row % self.rows, col % self.cols);
        let index = self.index(pos);
        self.cells[index] = alive;
        if alive {
            self.live.insert(pos);
        } else {
            self.live.remove(&pos);
        }
        self.generation = 0;
        self.reset_history();
    }

    fn reset_history(&mut self) {
        self.seen.clear();
        let config = self.configuration_string();
        self.seen.insert(config);
    }

    /// Counts living neighbors, visiting only the neighborhoods of
    /// living cells.
    ///
    /// Cells without any living neighbor are absent from the map.
    pub fn neighbor_counts(&self) -> BTreeMap<Position, usize> {
        let mut counts = BTreeMap::new();
        for &pos in &self.live {
            for neigh in pos.toroidal_neighbors(self.rows, self.cols) {
                *counts.entry(neigh).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Advances the grid by one generation.
    ///
    /// Returns `false` if the new configuration has been seen before,
    /// i.e. the grid is stable or periodic. The new configuration is
    /// kept either way, but a repeated one is not recorded twice.
    pub fn step(&mut self) -> bool {
        let live: BTreeSet<Position> = self
            .neighbor_counts()
            .into_iter()
            .filter(|&(pos, count)| self.rule.apply(self.cells[self.index(pos)], count))
            .map(|(pos, _)| pos)
            .collect();

        self.cells.iter_mut().for_each(|cell| *cell = false);
        for &pos in &live {
            let index = self.index(pos);
            self.cells[index] = true;
        }
        self.live = live;
        self.generation += 1;

        let config = self.configuration_string();
        let changed = self.seen.insert(config);
        trace!(
            "Generation {}: {} living cells",
            self.generation,
            self.live_count()
        );
        if !changed {
            info!(
                "Configuration of generation {} has been seen before",
                self.generation
            );
        }
        changed
    }

    /// The configuration as a row-major string of `1` (alive) and `0` (dead).
    pub fn configuration_string(&self) -> String {
        self.cells
            .iter()
            .map(|&alive| if alive { '1' } else { '0' })
            .collect()
    }
}

/// Parses an integer token.
fn parse_int(token: &str) -> Result<i64, FormatError> {
    token
        .parse()
        .map_err(|_| FormatError::InvalidToken(token.to_string()))
}

/// Parses the cells of a `rows × cols` grid from whitespace separated tokens.
///
/// Tokens after the last cell are ignored.
pub(crate) fn parse_cells<'a, I>(rows: i64, cols: i64, tokens: I) -> Result<Grid, FormatError>
where
    I: IntoIterator<Item = &'a str>,
{
    if rows <= 0 || cols <= 0 {
        return Err(FormatError::NonPositive { rows, cols });
    }
    let (rows, cols) = (rows as usize, cols as usize);
    let expected = rows
        .checked_mul(cols)
        .ok_or(FormatError::TooLarge { rows, cols })?;

    let mut cells = Vec::with_capacity(expected.min(1 << 20));
    let mut tokens = tokens.into_iter();
    while cells.len() < expected {
        let token = tokens.next().ok_or(FormatError::MissingCells {
            expected,
            found: cells.len(),
        })?;
        cells.push(parse_int(token)? == 1);
    }
    Ok(Grid::from_cells(rows, cols, cells))
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut tokens = input.split_whitespace();
        let rows = parse_int(tokens.next().ok_or(FormatError::MissingDimensions)?)?;
        let cols = parse_int(tokens.next().ok_or(FormatError::MissingDimensions)?)?;
        Ok(parse_cells(rows, cols, tokens)?)
    }
}

/// Displays the grid in [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
///
/// * **Dead** cells are represented by `.`;
/// * **Living** cells are represented by `o`.
impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for &alive in row {
                f.write_str(if alive { "o" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
