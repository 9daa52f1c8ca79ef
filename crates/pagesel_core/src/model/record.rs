//! Record identity contract and the reference artwork record.
//!
//! # Responsibility
//! - Describe what the selection model needs from a record: a stable id.
//! - Define the artwork record served by the remote listing and local store.
//!
//! # Invariants
//! - `record_id()` is stable for the lifetime of a session.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use uuid::Uuid;

/// Bounds every record identifier must satisfy.
pub trait RecordKey: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> RecordKey for T {}

/// A record that can report its stable identifier.
pub trait Identified {
    type Id: RecordKey;

    fn record_id(&self) -> Self::Id;
}

impl Identified for i64 {
    type Id = i64;

    fn record_id(&self) -> i64 {
        *self
    }
}

impl Identified for Uuid {
    type Id = Uuid;

    fn record_id(&self) -> Uuid {
        *self
    }
}

/// Stable identifier of an artwork in the remote collection.
pub type ArtworkId = i64;

/// One row of the artworks listing.
///
/// Only the columns shown by the table are modelled; the remote API returns
/// many more fields and they are ignored on decode. Text and date columns are
/// optional because the API reports them as `null` for sparse records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub place_of_origin: Option<String>,
    #[serde(default)]
    pub artist_display: Option<String>,
    #[serde(default)]
    pub inscriptions: Option<String>,
    #[serde(default)]
    pub date_start: Option<i64>,
    #[serde(default)]
    pub date_end: Option<i64>,
}

impl Artwork {
    /// Creates an artwork with only id and title populated.
    pub fn new(id: ArtworkId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            place_of_origin: None,
            artist_display: None,
            inscriptions: None,
            date_start: None,
            date_end: None,
        }
    }
}

impl Identified for Artwork {
    type Id = ArtworkId;

    fn record_id(&self) -> ArtworkId {
        self.id
    }
}

/// Remote field list requested by providers; mirrors `Artwork`'s columns.
pub const ARTWORK_FIELDS: &[&str] = &[
    "id",
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];
