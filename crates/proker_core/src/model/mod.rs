//! Work program domain model.
//!
//! # Responsibility
//! - Define the canonical record used by store, filters and persistence.
//! - Own boundary conversion from raw form input to typed fields.
//!
//! # Invariants
//! - Every record is identified by a stable `ProgramId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod money;
pub mod program;
