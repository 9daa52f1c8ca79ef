//! Repository layer for locally stored listing records.
//!
//! # Responsibility
//! - Define the data access contract the local page provider pages over.
//! - Isolate SQLite query details from provider/session orchestration.
//!
//! # Invariants
//! - Listing order is stable (`id ASC`) so page windows never overlap.

pub mod artwork_repo;
