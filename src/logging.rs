use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::QuizError;

const DEFAULT_FILTER: &str = "quiz_runner=info";

/// Send `tracing` output to `path`. The terminal belongs to the UI, so
/// nothing is logged to stdout or stderr.
pub fn init(path: &Path) -> Result<(), QuizError> {
    let file = File::create(path).map_err(|source| QuizError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| QuizError::Logging(err.to_string()))
}
