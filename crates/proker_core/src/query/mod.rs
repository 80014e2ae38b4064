//! Filtered views and summary statistics.
//!
//! # Responsibility
//! - Derive filtered views from a collection without side effects.
//! - Compute summary statistics for a whole collection or a subset.
//!
//! # Invariants
//! - Filtering preserves input order.
//! - Dashboard statistics are computed over the whole collection even when
//!   the rendered table is filtered.

pub mod filter;
pub mod stats;
