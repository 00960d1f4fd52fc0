mod config;
mod error;
mod grid;
mod position;
pub mod rules;
mod save;

pub use config::Config;
pub use error::{Error, FormatError};
pub use grid::Grid;
pub use position::Position;
pub use rules::Rule;
pub use save::{Snapshot, SnapshotKind};
