//! Persistence adapters for the program collection.
//!
//! # Responsibility
//! - Load and save the full collection as one serialized blob.
//! - Translate storage and parse failures into semantic errors.
//!
//! # Invariants
//! - Loading never fails; unreadable data degrades to an empty collection
//!   plus a reported `LoadIssue`.
//! - Saving never mutates the caller's in-memory collection.

pub mod program_repo;
