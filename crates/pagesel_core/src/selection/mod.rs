//! Persistent cross-page selection model.
//!
//! # Responsibility
//! - Hold the minimal state needed to answer "is this record selected" for
//!   any record of an unmaterialized, server-paginated dataset.
//! - Reconcile that state against one page window at a time.
//! - Translate render-boundary checkbox changes and bulk input into mutations.
//!
//! # Invariants
//! - A record id is never in both `selected_ids` and `deselected_ids`.
//! - Individual overrides always win over the bulk rule, in both directions.
//! - Declaring a bulk rule clears every individual override.
//! - Page navigation never mutates selection state.

pub mod diff;
pub mod input;
pub mod reconcile;
pub mod store;
