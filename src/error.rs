use thiserror::Error;

/// Failures at the edges of the game: configuration and the terminal.
///
/// The simulation itself has no error path; everything in here comes from
/// the environment the game is launched into.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to install logger: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
