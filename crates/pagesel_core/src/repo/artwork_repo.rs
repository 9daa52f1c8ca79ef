//! Artwork repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Store artwork rows for offline browsing.
//! - Serve `LIMIT/OFFSET` windows and the total row count.
//!
//! # Invariants
//! - `list_artworks` orders by `id ASC`.
//! - `insert_artworks` is all-or-nothing.

use crate::db::DbError;
use crate::model::record::{Artwork, ArtworkId};
use log::info;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ARTWORK_SELECT_SQL: &str = "SELECT
    id,
    title,
    place_of_origin,
    artist_display,
    inscriptions,
    date_start,
    date_end
FROM artworks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for artwork storage and queries.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored artwork data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data access contract for artwork listings.
pub trait ArtworkRepository {
    /// Inserts or replaces rows by id; returns the number written.
    fn insert_artworks(&self, artworks: &[Artwork]) -> RepoResult<usize>;
    fn count_artworks(&self) -> RepoResult<u64>;
    fn get_artwork(&self, id: ArtworkId) -> RepoResult<Option<Artwork>>;
    fn list_artworks(&self, limit: u32, offset: u64) -> RepoResult<Vec<Artwork>>;
}

/// SQLite-backed artwork repository.
pub struct SqliteArtworkRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArtworkRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ArtworkRepository for SqliteArtworkRepository<'_> {
    fn insert_artworks(&self, artworks: &[Artwork]) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO artworks (
                    id,
                    title,
                    place_of_origin,
                    artist_display,
                    inscriptions,
                    date_start,
                    date_end
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            )?;
            for artwork in artworks {
                stmt.execute(params![
                    artwork.id,
                    artwork.title.as_deref(),
                    artwork.place_of_origin.as_deref(),
                    artwork.artist_display.as_deref(),
                    artwork.inscriptions.as_deref(),
                    artwork.date_start,
                    artwork.date_end,
                ])?;
            }
        }
        tx.commit()?;

        info!(
            "event=artworks_insert module=repo status=ok rows={}",
            artworks.len()
        );
        Ok(artworks.len())
    }

    fn count_artworks(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM artworks;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative artwork count `{count}`")))
    }

    fn get_artwork(&self, id: ArtworkId) -> RepoResult<Option<Artwork>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ARTWORK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_artwork_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_artworks(&self, limit: u32, offset: u64) -> RepoResult<Vec<Artwork>> {
        let offset = i64::try_from(offset)
            .map_err(|_| RepoError::InvalidData(format!("offset `{offset}` out of range")))?;
        let mut stmt = self.conn.prepare(&format!(
            "{ARTWORK_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2;"
        ))?;
        let mut rows = stmt.query(params![i64::from(limit), offset])?;
        let mut artworks = Vec::new();
        while let Some(row) = rows.next()? {
            artworks.push(parse_artwork_row(row)?);
        }
        Ok(artworks)
    }
}

fn parse_artwork_row(row: &Row<'_>) -> RepoResult<Artwork> {
    Ok(Artwork {
        id: row.get("id")?,
        title: row.get("title")?,
        place_of_origin: row.get("place_of_origin")?,
        artist_display: row.get("artist_display")?,
        inscriptions: row.get("inscriptions")?,
        date_start: row.get("date_start")?,
        date_end: row.get("date_end")?,
    })
}

const SEED_ORIGINS: &[&str] = &["France", "Japan", "Italy", "Mexico"];

/// Writes `count` synthetic artworks with ids `1..=count`.
///
/// Used for demos and offline browsing when the remote listing is not
/// reachable.
pub fn seed_synthetic_artworks<R: ArtworkRepository>(repo: &R, count: u32) -> RepoResult<usize> {
    let artworks: Vec<Artwork> = (1..=count)
        .map(|n| {
            let year = 1500 + i64::from(n % 500);
            Artwork {
                id: i64::from(n),
                title: Some(format!("Untitled No. {n}")),
                place_of_origin: Some(SEED_ORIGINS[n as usize % SEED_ORIGINS.len()].to_string()),
                artist_display: Some(format!("Workshop {}", n % 37)),
                inscriptions: None,
                date_start: Some(year),
                date_end: Some(year + i64::from(n % 7)),
            }
        })
        .collect();
    repo.insert_artworks(&artworks)
}
