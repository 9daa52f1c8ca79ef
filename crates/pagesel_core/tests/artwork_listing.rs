use pagesel_core::db::migrations::latest_version;
use pagesel_core::db::{open_db, open_db_in_memory, DbError};
use pagesel_core::{
    seed_synthetic_artworks, Artwork, ArtworkRepository, PageNumber, PageProvider, PageRequest,
    PageSize, RepositoryPageProvider, SqliteArtworkRepository, TableSession,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'artworks');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn opening_same_database_twice_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pagesel.db");

    let conn = open_db(&path).unwrap();
    seed_synthetic_artworks(&SqliteArtworkRepository::new(&conn), 5).unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(SqliteArtworkRepository::new(&conn).count_artworks().unwrap(), 5);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn insert_replaces_rows_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArtworkRepository::new(&conn);

    repo.insert_artworks(&[Artwork::new(1, "Draft"), Artwork::new(2, "Other")])
        .unwrap();
    let mut revised = Artwork::new(1, "Final");
    revised.date_start = Some(1890);
    repo.insert_artworks(&[revised.clone()]).unwrap();

    assert_eq!(repo.count_artworks().unwrap(), 2);
    assert_eq!(repo.get_artwork(1).unwrap(), Some(revised));
    assert_eq!(repo.get_artwork(99).unwrap(), None);
}

#[test]
fn repository_provider_serves_ordered_windows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArtworkRepository::new(&conn);
    seed_synthetic_artworks(&repo, 30).unwrap();
    let provider = RepositoryPageProvider::new(repo);

    let fetched = provider
        .fetch_page(PageRequest::new(
            PageNumber::new(3).unwrap(),
            PageSize::new(12).unwrap(),
        ))
        .unwrap();
    let ids: Vec<i64> = fetched.records.iter().map(|artwork| artwork.id).collect();
    assert_eq!(ids, (25..=30).collect::<Vec<i64>>());
    assert_eq!(fetched.total_count, 30);
}

#[test]
fn session_over_sqlite_keeps_bulk_selection_across_pages() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArtworkRepository::new(&conn);
    seed_synthetic_artworks(&repo, 60).unwrap();
    let mut session =
        TableSession::open(RepositoryPageProvider::new(repo), PageSize::new(12).unwrap()).unwrap();

    session.submit_bulk_input(Some("18")).unwrap();
    session.toggle_row(3, false);
    session.next_page().unwrap();

    let ids: Vec<i64> = session
        .selected_on_page()
        .iter()
        .map(|artwork| artwork.id)
        .collect();
    assert_eq!(ids, (13..=18).collect::<Vec<i64>>());
    assert_eq!(session.selection_summary(), "Selected: 17 rows");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
