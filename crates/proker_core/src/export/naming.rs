//! Artifact file names and titles derived from active criteria.

use crate::query::filter::FilterCriteria;
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

const FILE_STEM: &str = "program_kerja";
const TITLE_BASE: &str = "Program Kerja";

/// Artifact format produced by an export adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "xlsx" | "excel" => Some(Self::Xlsx),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Builds `program_kerja[_<division>][_<status>]_<YYYY-MM-DD>.<ext>`.
///
/// The status segment uses the label with whitespace removed.
pub fn export_file_name(criteria: &FilterCriteria, date: NaiveDate, format: ExportFormat) -> String {
    let mut name = String::from(FILE_STEM);
    if let Some(division) = criteria.division.as_deref() {
        name.push('_');
        name.push_str(division);
    }
    if let Some(status) = criteria.status {
        name.push('_');
        name.push_str(status.compact_label());
    }
    format!("{name}_{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Builds the document heading, e.g. `Program Kerja (Divisi: HR) (Status: Selesai)`.
pub fn document_title(criteria: &FilterCriteria) -> String {
    let mut title = String::from(TITLE_BASE);
    if let Some(division) = criteria.division.as_deref() {
        title.push_str(&format!(" (Divisi: {division})"));
    }
    if let Some(status) = criteria.status {
        title.push_str(&format!(" (Status: {status})"));
    }
    title
}
