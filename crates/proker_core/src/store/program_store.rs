//! Program store operations.
//!
//! # Responsibility
//! - Provide create/update/delete/find over the owned collection.
//! - Stay storage-agnostic; persistence is orchestrated by the service.
//!
//! # Invariants
//! - `update` keeps the record's id and position.
//! - `delete` of a missing id is a no-op, not an error.

use super::id_gen::ProgramIdGenerator;
use crate::model::program::{ProgramFields, ProgramId, ProgramRecord};
use chrono::Utc;
use log::warn;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(ProgramId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "program not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Owned, ordered program collection.
#[derive(Debug, Clone, Default)]
pub struct ProgramStore {
    programs: Vec<ProgramRecord>,
    ids: ProgramIdGenerator,
}

impl ProgramStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store from previously persisted records.
    ///
    /// Callers are expected to pass records with unique ids; the repository
    /// load path guarantees that.
    pub fn from_records(programs: Vec<ProgramRecord>) -> Self {
        let mut ids = ProgramIdGenerator::new();
        for program in &programs {
            ids.observe(program.id);
        }
        Self { programs, ids }
    }

    /// Appends a new record with a freshly issued id.
    pub fn create(&mut self, fields: ProgramFields) -> ProgramRecord {
        self.create_at(fields, Utc::now().timestamp_millis())
    }

    /// Same as `create`, with the id clock pinned to `now_ms`.
    pub fn create_at(&mut self, fields: ProgramFields, now_ms: i64) -> ProgramRecord {
        let id = match self.ids.next_at(now_ms) {
            Some(id) => id,
            None => self.unused_id(now_ms),
        };
        let record = ProgramRecord::from_fields(id, fields);
        self.programs.push(record.clone());
        record
    }

    /// First id at or after `start` (wrapping) not held by any record.
    ///
    /// Used once the monotonic range is exhausted by a loaded `i64::MAX` id.
    fn unused_id(&self, start: ProgramId) -> ProgramId {
        let taken: HashSet<ProgramId> = self.programs.iter().map(|program| program.id).collect();
        let mut candidate = start;
        while taken.contains(&candidate) {
            candidate = candidate.wrapping_add(1);
        }
        warn!("event=program_id module=store status=fallback reason=id_range_exhausted id={candidate}");
        candidate
    }

    /// Replaces every field of the record `id`.
    ///
    /// # Errors
    /// - `NotFound` when no record has this id.
    pub fn update(&mut self, id: ProgramId, fields: ProgramFields) -> StoreResult<()> {
        let program = self
            .programs
            .iter_mut()
            .find(|program| program.id == id)
            .ok_or(StoreError::NotFound(id))?;
        program.replace_fields(fields);
        Ok(())
    }

    /// Removes the record `id`; returns whether one was removed.
    pub fn delete(&mut self, id: ProgramId) -> bool {
        let before = self.programs.len();
        self.programs.retain(|program| program.id != id);
        self.programs.len() != before
    }

    /// Removes every record matching `predicate`; returns the removed count.
    pub fn delete_matching(&mut self, mut predicate: impl FnMut(&ProgramRecord) -> bool) -> usize {
        let before = self.programs.len();
        self.programs.retain(|program| !predicate(program));
        before - self.programs.len()
    }

    /// Empties the collection; returns how many records were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.programs.len();
        self.programs.clear();
        removed
    }

    /// Read-only view in insertion order.
    pub fn all(&self) -> &[ProgramRecord] {
        &self.programs
    }

    pub fn find(&self, id: ProgramId) -> Option<&ProgramRecord> {
        self.programs.iter().find(|program| program.id == id)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}
