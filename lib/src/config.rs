//! Run configuration.

use crate::{error::Error, grid::Grid, rules::Rule};
use educe::Educe;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Run configuration.
///
/// The grid will be loaded from this configuration.
#[derive(Clone, Debug, Educe, PartialEq, Eq)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// The file holding the initial configuration.
    pub input: PathBuf,

    /// The maximal number of generations to compute.
    #[educe(Default = 100)]
    pub max_generations: u64,

    /// The rule string of the cellular automaton.
    #[educe(Default = "B3/S23")]
    pub rule_string: String,

    /// The directory to save snapshots in.
    ///
    /// `None` means that a new directory will be named after the input file.
    pub output_dir: Option<PathBuf>,

    /// Whether to save a snapshot of every generation.
    #[educe(Default = true)]
    pub save_snapshots: bool,
}

impl Config {
    /// Sets up a new configuration with the given input file.
    pub fn new<P: Into<PathBuf>>(input: P) -> Self {
        Config {
            input: input.into(),
            ..Config::default()
        }
    }

    /// Sets the maximal number of generations.
    pub fn set_max_generations(mut self, max_generations: u64) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// Sets the rule string.
    pub fn set_rule_string<S: ToString>(mut self, rule_string: S) -> Self {
        self.rule_string = rule_string.to_string();
        self
    }

    /// Sets the output directory.
    pub fn set_output_dir<T: Into<Option<PathBuf>>>(mut self, output_dir: T) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Sets whether to save snapshots.
    pub fn set_save_snapshots(mut self, save_snapshots: bool) -> Self {
        self.save_snapshots = save_snapshots;
        self
    }

    /// Parses the rule string.
    pub fn rule(&self) -> Result<Rule, Error> {
        self.rule_string.parse()
    }

    /// Loads the grid from the configuration.
    /// Returns an error if the rule string or the input file is invalid.
    pub fn grid(&self) -> Result<Grid, Error> {
        let rule = self.rule()?;
        Ok(Grid::load(&self.input)?.with_rule(rule))
    }
}
