//! Domain primitives for paginated record selection.
//!
//! # Responsibility
//! - Define typed page/bulk counters so invalid values cannot reach core logic.
//! - Define the record identity contract shared by providers and selection.
//!
//! # Invariants
//! - Page numbers are 1-based and never zero.
//! - Page size is a positive constant for the lifetime of a session.
//! - Records are identified by a stable `RecordKey`; payloads are never
//!   retained by the selection model.

pub mod page;
pub mod record;
