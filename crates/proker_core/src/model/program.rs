//! Work program domain model.
//!
//! # Responsibility
//! - Define the canonical work program record and its persisted wire shape.
//! - Convert loosely-typed form input into typed fields exactly once.
//!
//! # Invariants
//! - `id` is unique across a collection and never rewritten by edits.
//! - `budget` is a non-negative integer in the smallest currency unit.
//! - An empty description is represented as `None`, never `Some("")`.

use super::money::{parse_budget, BudgetParseError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of a work program: creation time in epoch milliseconds.
pub type ProgramId = i64;

/// Progress state of a work program.
///
/// Serialized with the literal labels shown to users, which is also the
/// persisted representation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ProgramStatus {
    /// Planned but not started. Default for new form entries.
    #[default]
    #[serde(rename = "Belum Dimulai")]
    NotStarted,
    /// Work is ongoing.
    #[serde(rename = "Sedang Berjalan")]
    InProgress,
    /// Completed.
    #[serde(rename = "Selesai")]
    Done,
}

impl ProgramStatus {
    /// All statuses in display order.
    pub const ALL: [ProgramStatus; 3] = [Self::NotStarted, Self::InProgress, Self::Done];

    /// Returns the persisted/display literal.
    pub fn as_label(self) -> &'static str {
        match self {
            Self::NotStarted => "Belum Dimulai",
            Self::InProgress => "Sedang Berjalan",
            Self::Done => "Selesai",
        }
    }

    /// Returns the label with whitespace removed, as used in export file names.
    pub fn compact_label(self) -> &'static str {
        match self {
            Self::NotStarted => "BelumDimulai",
            Self::InProgress => "SedangBerjalan",
            Self::Done => "Selesai",
        }
    }

    /// Parses a user-supplied status.
    ///
    /// Accepts the display literals and `not_started|in_progress|done`
    /// aliases, case-insensitive, with `-`/space/`_` treated alike.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value
            .trim()
            .to_ascii_lowercase()
            .replace(['-', ' '], "_");
        match normalized.as_str() {
            "belum_dimulai" | "not_started" | "notstarted" => Some(Self::NotStarted),
            "sedang_berjalan" | "in_progress" | "inprogress" => Some(Self::InProgress),
            "selesai" | "done" => Some(Self::Done),
            _ => None,
        }
    }
}

impl Display for ProgramStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_label())
    }
}

/// Every user-editable field of a work program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramFields {
    pub division: String,
    pub program_name: String,
    pub budget: u64,
    pub assignee: String,
    pub status: ProgramStatus,
    pub description: Option<String>,
}

/// Persisted work program record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramRecord {
    pub id: ProgramId,
    pub division: String,
    pub program_name: String,
    pub budget: u64,
    pub assignee: String,
    pub status: ProgramStatus,
    /// Stored as a plain string; empty string maps to `None`.
    #[serde(default, with = "description_wire")]
    pub description: Option<String>,
}

impl ProgramRecord {
    /// Builds a record from typed fields and an already-issued identifier.
    pub fn from_fields(id: ProgramId, fields: ProgramFields) -> Self {
        Self {
            id,
            division: fields.division,
            program_name: fields.program_name,
            budget: fields.budget,
            assignee: fields.assignee,
            status: fields.status,
            description: fields.description.filter(|value| !value.is_empty()),
        }
    }

    /// Returns a copy of the editable fields.
    pub fn fields(&self) -> ProgramFields {
        ProgramFields {
            division: self.division.clone(),
            program_name: self.program_name.clone(),
            budget: self.budget,
            assignee: self.assignee.clone(),
            status: self.status,
            description: self.description.clone(),
        }
    }

    /// Replaces every editable field; `id` is left untouched.
    pub fn replace_fields(&mut self, fields: ProgramFields) {
        let id = self.id;
        *self = Self::from_fields(id, fields);
    }
}

/// Field-level rejection raised while converting raw form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramFieldError {
    /// A required text field is blank after trimming.
    EmptyField(&'static str),
    /// Budget digits do not fit the integer range.
    BudgetOverflow(String),
    /// Status text is not one of the known states.
    UnknownStatus(String),
}

impl Display for ProgramFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "field `{field}` must not be empty"),
            Self::BudgetOverflow(digits) => write!(f, "budget `{digits}` is too large"),
            Self::UnknownStatus(value) => write!(
                f,
                "unknown status `{value}`; expected Belum Dimulai|Sedang Berjalan|Selesai"
            ),
        }
    }
}

impl Error for ProgramFieldError {}

impl From<BudgetParseError> for ProgramFieldError {
    fn from(value: BudgetParseError) -> Self {
        match value {
            BudgetParseError::Overflow(digits) => Self::BudgetOverflow(digits),
        }
    }
}

/// Raw form input as typed by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramInput {
    pub division: String,
    pub program_name: String,
    /// Free text such as `Rp 1.500.000`; only digits are significant.
    pub budget: String,
    pub assignee: String,
    /// Blank selects the form default (`Belum Dimulai`).
    pub status: String,
    pub description: String,
}

impl ProgramInput {
    /// Validates and coerces every field once.
    ///
    /// # Errors
    /// - `EmptyField` when division, program name or assignee is blank.
    /// - `BudgetOverflow` when budget digits exceed `u64`.
    /// - `UnknownStatus` when status text is not recognized.
    ///
    /// A budget with no digits at all becomes `0` rather than an error.
    pub fn into_fields(self) -> Result<ProgramFields, ProgramFieldError> {
        let division = required("division", self.division)?;
        let program_name = required("program_name", self.program_name)?;
        let assignee = required("assignee", self.assignee)?;
        let budget = parse_budget(&self.budget)?;

        let status = if self.status.trim().is_empty() {
            ProgramStatus::default()
        } else {
            ProgramStatus::parse(&self.status)
                .ok_or_else(|| ProgramFieldError::UnknownStatus(self.status.trim().to_string()))?
        };

        let description = self.description.trim();
        let description = (!description.is_empty()).then(|| description.to_string());

        Ok(ProgramFields {
            division,
            program_name,
            budget,
            assignee,
            status,
            description,
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String, ProgramFieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProgramFieldError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

mod description_wire {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|value| !value.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::{ProgramFieldError, ProgramInput, ProgramStatus};

    fn input() -> ProgramInput {
        ProgramInput {
            division: " Finance ".to_string(),
            program_name: "Audit".to_string(),
            budget: "Rp 1.500.000".to_string(),
            assignee: "Sari".to_string(),
            status: String::new(),
            description: "   ".to_string(),
        }
    }

    #[test]
    fn into_fields_trims_and_defaults() {
        let fields = input().into_fields().unwrap();
        assert_eq!(fields.division, "Finance");
        assert_eq!(fields.budget, 1_500_000);
        assert_eq!(fields.status, ProgramStatus::NotStarted);
        assert_eq!(fields.description, None);
    }

    #[test]
    fn into_fields_rejects_blank_required_field() {
        let mut raw = input();
        raw.assignee = "  ".to_string();
        assert_eq!(
            raw.into_fields().unwrap_err(),
            ProgramFieldError::EmptyField("assignee")
        );
    }

    #[test]
    fn into_fields_rejects_unknown_status() {
        let mut raw = input();
        raw.status = "paused".to_string();
        assert!(matches!(
            raw.into_fields().unwrap_err(),
            ProgramFieldError::UnknownStatus(value) if value == "paused"
        ));
    }

    #[test]
    fn status_parse_accepts_labels_and_aliases() {
        assert_eq!(ProgramStatus::parse("Sedang Berjalan"), Some(ProgramStatus::InProgress));
        assert_eq!(ProgramStatus::parse("in-progress"), Some(ProgramStatus::InProgress));
        assert_eq!(ProgramStatus::parse("SELESAI"), Some(ProgramStatus::Done));
        assert_eq!(ProgramStatus::parse("not_started"), Some(ProgramStatus::NotStarted));
        assert_eq!(ProgramStatus::parse("later"), None);
    }
}
