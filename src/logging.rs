use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};

/// Sends `log` output to `path`, appending. The terminal belongs to the UI,
/// so nothing is ever written to stderr.
pub fn init_file_logger(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(io::Error::other)
}
