use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can fail inside the engine. Collaborator I/O failures
/// (CSV readers, KML writers) are not represented here; they propagate
/// untranslated as `anyhow::Error`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),
    #[error("longitude must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),
    #[error("trajectory has no points")]
    EmptyTrajectory,
    #[error("index {index} out of bounds for trajectory with {len} points")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("{0}")]
    InvalidArgument(String),
    /// Annotates a failure with the offending row index when building from a
    /// tabular source.
    #[error("row {row}: {source}")]
    InvalidRow { row: usize, source: Box<Error> },
}
