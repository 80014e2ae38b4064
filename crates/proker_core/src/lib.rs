//! Core domain logic for the work program register.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod storage;
pub mod store;

pub use export::{
    document_title, export_file_name, ExportError, ExportFormat, ExportRow, ExportSnapshot,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::money::{format_budget_input, format_currency, parse_budget};
pub use model::program::{
    ProgramFieldError, ProgramFields, ProgramId, ProgramInput, ProgramRecord, ProgramStatus,
};
pub use query::filter::{filter, FilterCriteria};
pub use query::stats::{aggregate, aggregate_filtered, ProgramStats, StatusCounts};
pub use repo::program_repo::{
    LoadIssue, LoadReport, PersistenceError, PersistenceResult, ProgramRepository,
    SlotProgramRepository, PROGRAMS_SLOT_KEY,
};
pub use service::program_service::{
    EditSession, MutationReport, ProgramService, ProgramView, ServiceError, SubmitOutcome,
};
pub use storage::{MemorySlot, SlotError, SqliteSlot, StorageSlot};
pub use store::program_store::{ProgramStore, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
