//! Naming and creating the directory for snapshots.

use std::{
    fs, io,
    path::{Path, PathBuf},
};
use toruslife_lib::{Config, Error};

/// The directory to save snapshots in, created if it does not exist.
///
/// Returns `None` if snapshots are not saved.
pub(crate) fn output_dir(config: &Config) -> Result<Option<PathBuf>, Error> {
    if !config.save_snapshots {
        return Ok(None);
    }
    match &config.output_dir {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|source| Error::IoFailure {
                path: dir.clone(),
                source,
            })?;
            Ok(Some(dir.clone()))
        }
        None => fresh_dir(Path::new(""), &config.input).map(Some),
    }
}

/// Creates `<parent>/<stem>_<n>_out` with the smallest `n` not taken yet,
/// where `stem` is the input file name without extension.
pub(crate) fn fresh_dir(parent: &Path, input: &Path) -> Result<PathBuf, Error> {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_else(|| "simulation".into());
    let mut n: u32 = 1;
    loop {
        let dir = parent.join(format!("{}_{}_out", stem, n));
        match fs::create_dir(&dir) {
            Ok(()) => return Ok(dir),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
            Err(source) => return Err(Error::IoFailure { path: dir, source }),
        }
    }
}
