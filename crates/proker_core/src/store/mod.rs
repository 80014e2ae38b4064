//! In-memory program collection.
//!
//! # Responsibility
//! - Own the authoritative ordered collection for one session.
//! - Issue unique, monotonic identifiers for new records.
//!
//! # Invariants
//! - Insertion order is display order.
//! - Identifiers are unique within the store.

pub mod id_gen;
pub mod program_store;
