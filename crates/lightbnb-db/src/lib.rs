pub mod config;
pub mod error;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod search;
pub mod service;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use search::SearchQuery;
pub use service::QueryService;

use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Row count returned by list queries when the caller does not ask for one.
pub const DEFAULT_LIMIT: u32 = 10;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let db = Self::init(conn)?;
        info!("Database opened at {}", path.display());
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let db = Self::init(Connection::open_in_memory()?)?;
        info!("In-memory database opened");
        Ok(db)
    }

    /// Open the store described by `config`. `:memory:` selects a private
    /// in-memory database.
    pub fn connect(config: &StoreConfig) -> Result<Self> {
        config.warn_unsupported();
        if config.database == StoreConfig::IN_MEMORY {
            Self::open_in_memory()
        } else {
            Self::open(Path::new(&config.database))
        }
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        // City search is a case-sensitive substring match.
        conn.pragma_update(None, "case_sensitive_like", "ON")?;

        migrations::run(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| Error::LockPoisoned(e.to_string()))?;
        f(&conn)
    }
}
