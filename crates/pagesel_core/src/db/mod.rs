//! Local artwork store used by the offline page source.
//!
//! # Responsibility
//! - Open SQLite connections holding the `artworks` table.
//! - Bring the schema up to date before any listing query runs.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A store written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or migrating the artwork store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// A schema step failed; the store stays at its previous version.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The store was created by a build with a newer artwork schema.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "artwork store error: {err}"),
            Self::Migration { version, source } => {
                write!(f, "artwork schema step {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "artwork store schema {found} is newer than this build supports ({supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Migration { source, .. } => Some(source),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
