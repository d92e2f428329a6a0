/// Failures surfaced by the data-access layer.
///
/// Store errors are passed through untouched so callers can inspect the
/// underlying SQLite error code themselves.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] rusqlite::Error),

    #[error("database lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("blocking database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("invalid store configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
