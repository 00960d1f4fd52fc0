//! Driving a grid through its generations.

use crate::output::output_dir;
use std::{
    error::Error as StdError,
    io::{self, Write},
    path::PathBuf,
    thread,
    time::Duration,
};
use toruslife_lib::{Config, Error, Grid};
use tracing::{debug, info, warn};

/// Status of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    /// More generations can be computed.
    Running,
    /// The last configuration had been seen before.
    Stabilized,
    /// The maximal number of generations is reached.
    Exhausted,
}

/// A run of the simulation, from the initial configuration to the end.
pub(crate) struct Run {
    grid: Grid,
    max_generations: u64,
    output_dir: Option<PathBuf>,
    status: Status,
}

impl Run {
    /// Loads the grid and prepares the output directory.
    pub(crate) fn new(config: &Config) -> Result<Self, Error> {
        let grid = config.grid()?;
        let output_dir = output_dir(config)?;
        if let Some(dir) = &output_dir {
            info!(dir = %dir.display(), "Saving snapshots");
        }
        Ok(Self::with_grid(grid, config.max_generations, output_dir))
    }

    pub(crate) fn with_grid(grid: Grid, max_generations: u64, output_dir: Option<PathBuf>) -> Self {
        let status = if max_generations == 0 {
            Status::Exhausted
        } else {
            Status::Running
        };
        Run {
            grid,
            max_generations,
            output_dir,
            status,
        }
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn max_generations(&self) -> u64 {
        self.max_generations
    }

    /// Computes the next generation and saves its snapshot.
    ///
    /// Does nothing once the run has ended.
    pub(crate) fn advance(&mut self) -> Result<Status, Error> {
        if self.status != Status::Running {
            return Ok(self.status);
        }

        let changed = self.grid.step();
        let generation = self.grid.generation();
        if changed {
            if let Some(dir) = &self.output_dir {
                let path = self.grid.save_snapshot(generation, dir)?;
                debug!(generation, path = %path.display(), "Saved snapshot");
            }
            if generation >= self.max_generations {
                self.status = Status::Exhausted;
            }
        } else {
            if let Some(dir) = &self.output_dir {
                let path = self.grid.save_stabilization(generation, dir)?;
                debug!(generation, path = %path.display(), "Saved stabilized snapshot");
            }
            info!(
                generation,
                cells = self.grid.live_count(),
                "Simulation stabilized"
            );
            self.status = Status::Stabilized;
        }
        Ok(self.status)
    }
}

/// Prints one generation with a header line, followed by a blank line.
fn print_generation<W: Write>(out: &mut W, grid: &Grid) -> io::Result<()> {
    writeln!(
        out,
        "Generation: {}  Cells: {}",
        grid.generation(),
        grid.live_count()
    )?;
    writeln!(out, "{}", grid)
}

/// Runs until the end without user interaction.
///
/// With an `interval`, every generation is printed, waiting `interval`
/// between two of them. Otherwise only the last generation is printed.
pub(crate) fn run_headless<W: Write>(
    mut run: Run,
    interval: Option<Duration>,
    out: &mut W,
) -> Result<(), Box<dyn StdError>> {
    match interval {
        Some(interval) => {
            print_generation(out, run.grid())?;
            while run.status() == Status::Running {
                thread::sleep(interval);
                run.advance()?;
                print_generation(out, run.grid())?;
            }
        }
        None => {
            while run.advance()? == Status::Running {}
            write!(out, "{}", run.grid())?;
        }
    }
    out.flush()?;
    if run.status() == Status::Exhausted {
        warn!(
            generations = run.max_generations(),
            "No repeated configuration within the generation budget"
        );
    }
    info!(
        generation = run.grid().generation(),
        cells = run.grid().live_count(),
        "Simulation finished"
    );
    Ok(())
}
