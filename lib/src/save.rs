//! Saves the grid as per-generation snapshots.

use crate::{
    error::{Error, FormatError},
    grid::{parse_cells, Grid},
};
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const ITERATION_HEADER: &str = "Iteration: ";
const STABILIZED_HEADER: &str = "Stabilisation à l'iteration: ";
const LIVE_COUNT_HEADER: &str = "Cellules vivantes: ";
const DIMENSIONS_HEADER: &str = "Dimensions: ";

/// Which kind of generation a snapshot records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SnapshotKind {
    /// An ordinary generation.
    Iteration,

    /// The generation whose configuration had been seen before,
    /// which ends the run.
    Stabilized,
}

impl SnapshotKind {
    fn header(self) -> &'static str {
        match self {
            SnapshotKind::Iteration => ITERATION_HEADER,
            SnapshotKind::Stabilized => STABILIZED_HEADER,
        }
    }

    /// Name of the snapshot file of some generation.
    pub fn file_name(self, generation: u64) -> String {
        match self {
            SnapshotKind::Iteration => format!("iteration_{}.txt", generation),
            SnapshotKind::Stabilized => format!("stabilisation_iteration_{}.txt", generation),
        }
    }
}

impl Grid {
    /// Writes a snapshot of the current generation.
    ///
    /// ```plaintext
    /// Iteration: 3
    /// Cellules vivantes: 3
    /// Dimensions: 3x3
    /// 0 0 0
    /// 1 1 1
    /// 0 0 0
    /// ```
    pub fn write_snapshot<W: Write>(
        &self,
        writer: &mut W,
        generation: u64,
        kind: SnapshotKind,
    ) -> io::Result<()> {
        let (rows, cols) = self.dimensions();
        writeln!(writer, "{}{}", kind.header(), generation)?;
        writeln!(writer, "{}{}", LIVE_COUNT_HEADER, self.live_count())?;
        writeln!(writer, "{}{}x{}", DIMENSIONS_HEADER, rows, cols)?;
        for row in 0..rows {
            for col in 0..cols {
                if col > 0 {
                    writer.write_all(b" ")?;
                }
                writer.write_all(if self.is_alive(row, col) { b"1" } else { b"0" })?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Saves a snapshot of an ordinary generation in the directory.
    ///
    /// Returns the path of the written file.
    pub fn save_snapshot<P: AsRef<Path>>(&self, generation: u64, dir: P) -> Result<PathBuf, Error> {
        self.save(generation, SnapshotKind::Iteration, dir.as_ref())
    }

    /// Saves a snapshot of the stabilized generation in the directory.
    ///
    /// Returns the path of the written file.
    pub fn save_stabilization<P: AsRef<Path>>(
        &self,
        generation: u64,
        dir: P,
    ) -> Result<PathBuf, Error> {
        self.save(generation, SnapshotKind::Stabilized, dir.as_ref())
    }

    fn save(&self, generation: u64, kind: SnapshotKind, dir: &Path) -> Result<PathBuf, Error> {
        let path = dir.join(kind.file_name(generation));
        let write = || -> io::Result<()> {
            let mut writer = BufWriter::new(File::create(&path)?);
            self.write_snapshot(&mut writer, generation, kind)?;
            writer.flush()
        };
        let result = write();
        match result {
            Ok(()) => Ok(path),
            Err(source) => Err(Error::IoFailure { path, source }),
        }
    }
}

/// A snapshot read back from its text form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub kind: SnapshotKind,
    pub generation: u64,
    pub live_count: usize,

    /// The recorded generation, as a freshly loaded grid.
    pub grid: Grid,
}

impl Snapshot {
    /// Parses a snapshot written by [`Grid::write_snapshot`].
    ///
    /// The declared dimensions and number of living cells must agree
    /// with the body.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let mut lines = input.lines();
        let mut header = || lines.next().ok_or(FormatError::MissingDimensions);

        let line = header()?;
        let (kind, generation) = if let Some(rest) = line.strip_prefix(ITERATION_HEADER) {
            (SnapshotKind::Iteration, rest)
        } else if let Some(rest) = line.strip_prefix(STABILIZED_HEADER) {
            (SnapshotKind::Stabilized, rest)
        } else {
            return Err(FormatError::InvalidHeader(line.to_string()).into());
        };
        let generation = parse_field(line, generation)?;

        let line = header()?;
        let live_count = line
            .strip_prefix(LIVE_COUNT_HEADER)
            .ok_or_else(|| FormatError::InvalidHeader(line.to_string()))?;
        let live_count = parse_field(line, live_count)?;

        let dims_line = header()?;
        let (rows, cols) = dims_line
            .strip_prefix(DIMENSIONS_HEADER)
            .and_then(|dims| dims.split_once('x'))
            .ok_or_else(|| FormatError::InvalidHeader(dims_line.to_string()))?;
        let rows = parse_field(dims_line, rows)?;
        let cols = parse_field(dims_line, cols)?;

        let grid = parse_body(dims_line, rows, cols, lines)?;
        if grid.live_count() != live_count {
            return Err(FormatError::InvalidHeader(format!(
                "{}{}",
                LIVE_COUNT_HEADER, live_count
            ))
            .into());
        }

        Ok(Snapshot {
            kind,
            generation,
            live_count,
            grid,
        })
    }

    /// Reads a snapshot file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| FormatError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Snapshot::parse(&input)
    }
}

/// Parses the body of a snapshot: exactly `rows` non-empty lines
/// of exactly `cols` cells each.
fn parse_body<'a, I>(dims_line: &str, rows: i64, cols: i64, lines: I) -> Result<Grid, FormatError>
where
    I: Iterator<Item = &'a str>,
{
    if rows <= 0 || cols <= 0 {
        return Err(FormatError::NonPositive { rows, cols });
    }
    let body: Vec<Vec<&str>> = lines
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .filter(|tokens| !tokens.is_empty())
        .collect();

    let expected = (rows as usize).checked_mul(cols as usize).ok_or(FormatError::TooLarge {
        rows: rows as usize,
        cols: cols as usize,
    })?;
    let found = body.iter().map(Vec::len).sum();
    if found != expected {
        return Err(FormatError::MissingCells { expected, found });
    }
    if body.len() != rows as usize || body.iter().any(|row| row.len() != cols as usize) {
        return Err(FormatError::InvalidHeader(dims_line.to_string()));
    }
    parse_cells(rows, cols, body.into_iter().flatten())
}

/// Parses the numeric part of a header line.
fn parse_field<T: std::str::FromStr>(line: &str, field: &str) -> Result<T, FormatError> {
    field
        .trim()
        .parse()
        .map_err(|_| FormatError::InvalidHeader(line.to_string()))
}
