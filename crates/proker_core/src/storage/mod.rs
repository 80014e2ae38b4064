//! Durable key/value slots.
//!
//! # Responsibility
//! - Provide named slots holding one text value each.
//! - Enforce an optional byte quota over all slots of a backend.
//!
//! # Invariants
//! - A failed write leaves the previous slot value untouched.
//! - Quota accounting counts UTF-8 bytes of keys and values.

pub mod slot;

pub use slot::{MemorySlot, SlotError, SlotResult, SqliteSlot, StorageSlot, DEFAULT_QUOTA_BYTES};
