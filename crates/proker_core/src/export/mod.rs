//! Export preparation for spreadsheet and document adapters.
//!
//! # Responsibility
//! - Hand adapters a stable, already-filtered, read-only program snapshot.
//! - Own artifact naming, titling and localized column projection.
//!
//! # Invariants
//! - Rendering of `.xlsx`/`.pdf` bytes is outside core.
//! - Snapshots are never empty.

pub mod naming;
pub mod snapshot;

pub use naming::{document_title, export_file_name, ExportFormat};
pub use snapshot::{ExportError, ExportRow, ExportSnapshot, EXPORT_HEADERS, EXPORT_SHEET_NAME};
