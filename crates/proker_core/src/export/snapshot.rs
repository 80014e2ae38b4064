//! Read-only export snapshot and row projection.

use super::naming::{document_title, export_file_name, ExportFormat};
use crate::model::money::format_currency;
use crate::model::program::ProgramRecord;
use crate::query::filter::FilterCriteria;
use chrono::{Datelike, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Worksheet name used by spreadsheet exports.
pub const EXPORT_SHEET_NAME: &str = "Program Kerja Filtered";

/// Column headers in export order.
pub const EXPORT_HEADERS: [&str; 6] = [
    "Divisi",
    "Nama Program",
    "Anggaran",
    "Penanggung Jawab",
    "Status",
    "Deskripsi",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// The filtered view has no records to export.
    EmptyView,
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyView => write!(f, "no filtered programs to export"),
        }
    }
}

impl Error for ExportError {}

/// One exported line, already localized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub division: String,
    pub program_name: String,
    /// Raw amount for numeric spreadsheet cells.
    pub budget: u64,
    /// Currency text for document exports.
    pub budget_display: String,
    pub assignee: String,
    pub status: &'static str,
    /// Empty when the program has no description.
    pub description: String,
}

impl ExportRow {
    fn from_record(program: &ProgramRecord) -> Self {
        Self {
            division: program.division.clone(),
            program_name: program.program_name.clone(),
            budget: program.budget,
            budget_display: format_currency(program.budget),
            assignee: program.assignee.clone(),
            status: program.status.as_label(),
            description: program.description.clone().unwrap_or_default(),
        }
    }

    /// Description as printed in documents, `-` when missing.
    pub fn description_or_dash(&self) -> &str {
        if self.description.is_empty() {
            "-"
        } else {
            &self.description
        }
    }
}

/// Stable filtered records plus the criteria that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSnapshot {
    records: Vec<ProgramRecord>,
    criteria: FilterCriteria,
    generated_on: NaiveDate,
}

impl ExportSnapshot {
    /// # Errors
    /// - `EmptyView` when `records` is empty.
    pub fn new(
        records: Vec<ProgramRecord>,
        criteria: FilterCriteria,
        generated_on: NaiveDate,
    ) -> Result<Self, ExportError> {
        if records.is_empty() {
            return Err(ExportError::EmptyView);
        }
        Ok(Self {
            records,
            criteria,
            generated_on,
        })
    }

    pub fn records(&self) -> &[ProgramRecord] {
        &self.records
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn generated_on(&self) -> NaiveDate {
        self.generated_on
    }

    pub fn file_name(&self, format: ExportFormat) -> String {
        export_file_name(&self.criteria, self.generated_on, format)
    }

    pub fn title(&self) -> String {
        document_title(&self.criteria)
    }

    /// Date line as printed in documents (`d/m/yyyy`).
    pub fn date_label(&self) -> String {
        format!(
            "Tanggal: {}/{}/{}",
            self.generated_on.day(),
            self.generated_on.month(),
            self.generated_on.year()
        )
    }

    pub fn rows(&self) -> Vec<ExportRow> {
        self.records.iter().map(ExportRow::from_record).collect()
    }
}
