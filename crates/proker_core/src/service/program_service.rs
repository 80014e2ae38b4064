//! Program use-case service.
//!
//! # Responsibility
//! - Own the session's `ProgramStore` and its persistence adapter.
//! - Follow every mutation with a save and report failed saves to callers.
//! - Derive filtered views, statistics and export snapshots.
//!
//! # Invariants
//! - A failed save never rolls back the in-memory mutation.
//! - Dashboard `stats` always cover the whole collection.
//! - Bulk clear through criteria requires at least one constraint.

use crate::export::{ExportError, ExportSnapshot};
use crate::model::program::{ProgramFields, ProgramId, ProgramRecord};
use crate::query::filter::{filter, FilterCriteria};
use crate::query::stats::{aggregate, aggregate_filtered, ProgramStats};
use crate::repo::program_repo::{LoadIssue, PersistenceError, ProgramRepository};
use crate::store::program_store::{ProgramStore, StoreError};
use chrono::NaiveDate;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Explicit marker for the record currently being edited.
///
/// Obtained from `ProgramService::begin_edit` and handed back to `submit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditSession {
    id: ProgramId,
}

impl EditSession {
    pub fn id(&self) -> ProgramId {
        self.id
    }
}

/// What a form submit did to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(ProgramRecord),
    Updated(ProgramId),
    /// The edited record disappeared meanwhile; nothing changed.
    Missing(ProgramId),
}

/// Mutation result plus the outcome of the follow-up save.
#[derive(Debug)]
pub struct MutationReport<T> {
    pub outcome: T,
    /// Present when the save failed; memory still holds the mutation.
    pub save_error: Option<PersistenceError>,
}

impl<T> MutationReport<T> {
    pub fn is_saved(&self) -> bool {
        self.save_error.is_none()
    }

    /// Converts into a `Result`, dropping the outcome when the save failed.
    pub fn into_result(self) -> Result<T, PersistenceError> {
        match self.save_error {
            Some(err) => Err(err),
            None => Ok(self.outcome),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Bulk clear was requested without division or status selected.
    NoActiveFilter,
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveFilter => write!(
                f,
                "select a division or status before clearing filtered programs; use clear-all to remove everything"
            ),
        }
    }
}

impl Error for ServiceError {}

/// Everything a presentation layer needs to render one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramView {
    pub rows: Vec<ProgramRecord>,
    pub criteria: FilterCriteria,
    /// Whole-collection numbers shown on the dashboard.
    pub stats: ProgramStats,
    /// Numbers for `rows` only.
    pub filtered_stats: ProgramStats,
}

/// Session-scoped service over one repository.
pub struct ProgramService<R: ProgramRepository> {
    repo: R,
    store: ProgramStore,
}

impl<R: ProgramRepository> ProgramService<R> {
    /// Loads the persisted collection and starts a session.
    ///
    /// A load issue is returned alongside the (possibly empty) session and
    /// is never fatal.
    pub fn open(repo: R) -> (Self, Option<LoadIssue>) {
        let report = repo.load();
        let store = ProgramStore::from_records(report.programs);
        info!(
            "event=service_open module=service status={} count={}",
            if report.issue.is_some() { "degraded" } else { "ok" },
            store.len()
        );
        (Self { repo, store }, report.issue)
    }

    pub fn store(&self) -> &ProgramStore {
        &self.store
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Creates a program, or updates the one named by `session`.
    pub fn submit(
        &mut self,
        session: Option<EditSession>,
        fields: ProgramFields,
    ) -> MutationReport<SubmitOutcome> {
        let outcome = match session {
            None => {
                let created = self.store.create(fields);
                info!("event=program_create module=service status=ok id={}", created.id);
                SubmitOutcome::Created(created)
            }
            Some(session) => match self.store.update(session.id, fields) {
                Ok(()) => {
                    info!("event=program_update module=service status=ok id={}", session.id);
                    SubmitOutcome::Updated(session.id)
                }
                Err(StoreError::NotFound(id)) => {
                    warn!("event=program_update module=service status=skipped reason=not_found id={id}");
                    SubmitOutcome::Missing(id)
                }
            },
        };
        self.persist(outcome)
    }

    /// Starts editing `id`, returning the session and current fields.
    pub fn begin_edit(&self, id: ProgramId) -> Option<(EditSession, ProgramFields)> {
        self.store
            .find(id)
            .map(|program| (EditSession { id }, program.fields()))
    }

    /// Deletes one program; missing ids are a silent no-op.
    pub fn delete(&mut self, id: ProgramId) -> MutationReport<bool> {
        let removed = self.store.delete(id);
        info!(
            "event=program_delete module=service status={} id={id}",
            if removed { "ok" } else { "skipped" }
        );
        self.persist(removed)
    }

    /// Deletes every program matching `criteria`.
    ///
    /// # Errors
    /// - `NoActiveFilter` when `criteria` has no constraint.
    pub fn clear_filtered(
        &mut self,
        criteria: &FilterCriteria,
    ) -> Result<MutationReport<usize>, ServiceError> {
        if criteria.is_unconstrained() {
            return Err(ServiceError::NoActiveFilter);
        }
        let removed = self.store.delete_matching(|program| criteria.matches(program));
        info!("event=program_clear module=service status=ok scope=filtered removed={removed}");
        Ok(self.persist(removed))
    }

    /// Deletes every program.
    pub fn clear_all(&mut self) -> MutationReport<usize> {
        let removed = self.store.clear();
        info!("event=program_clear module=service status=ok scope=all removed={removed}");
        self.persist(removed)
    }

    /// Builds the filtered table and statistics for `criteria`.
    pub fn view(&self, criteria: &FilterCriteria) -> ProgramView {
        let rows = filter(self.store.all(), criteria);
        let filtered_stats = aggregate_filtered(&rows);
        ProgramView {
            stats: aggregate(self.store.all()),
            filtered_stats,
            rows,
            criteria: criteria.clone(),
        }
    }

    /// Snapshots the filtered view for an export adapter.
    ///
    /// # Errors
    /// - `EmptyView` when nothing matches `criteria`.
    pub fn export_snapshot(
        &self,
        criteria: &FilterCriteria,
        generated_on: NaiveDate,
    ) -> Result<ExportSnapshot, ExportError> {
        ExportSnapshot::new(
            filter(self.store.all(), criteria),
            criteria.clone(),
            generated_on,
        )
    }

    fn persist<T>(&self, outcome: T) -> MutationReport<T> {
        MutationReport {
            outcome,
            save_error: self.repo.save(self.store.all()).err(),
        }
    }
}
