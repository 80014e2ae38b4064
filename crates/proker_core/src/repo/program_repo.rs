//! Program collection repository over a storage slot.
//!
//! # Responsibility
//! - Serialize the ordered collection to JSON under `programKerjaData`.
//! - Recover from absent, corrupt or duplicated persisted data.
//!
//! # Invariants
//! - `load(save(c)) == c` for well-formed records (order and fields).
//! - Duplicate identifiers in persisted data keep their first occurrence.

use crate::model::program::{ProgramId, ProgramRecord};
use crate::storage::{SlotError, StorageSlot};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Fixed slot key holding the serialized program array.
pub const PROGRAMS_SLOT_KEY: &str = "programKerjaData";

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Write-side failure; the caller must present it to the user.
#[derive(Debug)]
pub enum PersistenceError {
    Serialize(serde_json::Error),
    Slot(SlotError),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize programs: {err}"),
            Self::Slot(err) => write!(f, "failed to save programs: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Slot(err) => Some(err),
        }
    }
}

impl From<SlotError> for PersistenceError {
    fn from(value: SlotError) -> Self {
        Self::Slot(value)
    }
}

/// Non-fatal problem found while loading; the load still yields a collection.
#[derive(Debug)]
pub enum LoadIssue {
    /// The slot could not be read.
    Slot(SlotError),
    /// The stored blob is not a valid program array.
    Corrupt(serde_json::Error),
    /// Records sharing an identifier were dropped.
    DuplicateIds { dropped: usize, first: ProgramId },
}

impl Display for LoadIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slot(err) => write!(f, "stored programs unreadable: {err}"),
            Self::Corrupt(err) => write!(f, "stored programs are corrupt: {err}"),
            Self::DuplicateIds { dropped, first } => write!(
                f,
                "dropped {dropped} stored program(s) with duplicate ids (first duplicate: {first})"
            ),
        }
    }
}

impl Error for LoadIssue {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Slot(err) => Some(err),
            Self::Corrupt(err) => Some(err),
            Self::DuplicateIds { .. } => None,
        }
    }
}

/// Result of a load: always a usable collection, plus an optional issue.
#[derive(Debug)]
pub struct LoadReport {
    pub programs: Vec<ProgramRecord>,
    pub issue: Option<LoadIssue>,
}

impl LoadReport {
    fn clean(programs: Vec<ProgramRecord>) -> Self {
        Self {
            programs,
            issue: None,
        }
    }

    fn degraded(issue: LoadIssue) -> Self {
        Self {
            programs: Vec::new(),
            issue: Some(issue),
        }
    }
}

/// Repository interface for whole-collection persistence.
pub trait ProgramRepository {
    fn load(&self) -> LoadReport;
    fn save(&self, programs: &[ProgramRecord]) -> PersistenceResult<()>;
}

/// Repository storing the collection as a JSON array in one slot.
pub struct SlotProgramRepository<S: StorageSlot> {
    slot: S,
}

impl<S: StorageSlot> SlotProgramRepository<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    /// Returns the underlying slot.
    pub fn slot(&self) -> &S {
        &self.slot
    }
}

impl<S: StorageSlot> ProgramRepository for SlotProgramRepository<S> {
    fn load(&self) -> LoadReport {
        let started_at = Instant::now();
        let raw = match self.slot.read(PROGRAMS_SLOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("event=programs_load module=repo status=ok source=absent count=0");
                return LoadReport::clean(Vec::new());
            }
            Err(err) => {
                warn!(
                    "event=programs_load module=repo status=degraded error_code=slot_read_failed error={err}"
                );
                return LoadReport::degraded(LoadIssue::Slot(err));
            }
        };

        let parsed = match serde_json::from_str::<Vec<ProgramRecord>>(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(
                    "event=programs_load module=repo status=degraded error_code=corrupt_blob bytes={} error={err}",
                    raw.len()
                );
                return LoadReport::degraded(LoadIssue::Corrupt(err));
            }
        };

        let (programs, issue) = dedupe_ids(parsed);
        if let Some(issue) = &issue {
            warn!("event=programs_load module=repo status=degraded error_code=duplicate_ids error={issue}");
        }
        info!(
            "event=programs_load module=repo status=ok count={} duration_ms={}",
            programs.len(),
            started_at.elapsed().as_millis()
        );

        LoadReport { programs, issue }
    }

    fn save(&self, programs: &[ProgramRecord]) -> PersistenceResult<()> {
        let started_at = Instant::now();
        let blob = serde_json::to_string(programs).map_err(PersistenceError::Serialize)?;

        match self.slot.write(PROGRAMS_SLOT_KEY, &blob) {
            Ok(()) => {
                info!(
                    "event=programs_save module=repo status=ok count={} bytes={} duration_ms={}",
                    programs.len(),
                    blob.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=programs_save module=repo status=error count={} bytes={} error={err}",
                    programs.len(),
                    blob.len()
                );
                Err(err.into())
            }
        }
    }
}

fn dedupe_ids(programs: Vec<ProgramRecord>) -> (Vec<ProgramRecord>, Option<LoadIssue>) {
    let mut seen = HashSet::with_capacity(programs.len());
    let mut first_duplicate = None;
    let mut dropped = 0;

    let kept = programs
        .into_iter()
        .filter(|program| {
            if seen.insert(program.id) {
                return true;
            }
            if first_duplicate.is_none() {
                first_duplicate = Some(program.id);
            }
            dropped += 1;
            false
        })
        .collect();

    let issue = first_duplicate.map(|first| LoadIssue::DuplicateIds { dropped, first });
    (kept, issue)
}
