//! Use-case orchestration over providers and the selection model.
//!
//! # Responsibility
//! - Sequence page loads, reconciliation and selection mutations for one
//!   table so renders always see current selection state.
//! - Keep render layers decoupled from provider and store details.

pub mod table_session;
