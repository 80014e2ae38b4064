//! Division/status filter criteria.

use crate::model::program::{ProgramRecord, ProgramStatus};

/// Optional division and status constraints; unset means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub division: Option<String>,
    pub status: Option<ProgramStatus>,
}

impl FilterCriteria {
    /// Builds criteria from UI selections; a blank division means "any".
    pub fn new(division: Option<&str>, status: Option<ProgramStatus>) -> Self {
        let division = division
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        Self { division, status }
    }

    pub fn with_division(mut self, division: impl Into<String>) -> Self {
        self.division = Some(division.into());
        self
    }

    pub fn with_status(mut self, status: ProgramStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true when neither constraint is set.
    pub fn is_unconstrained(&self) -> bool {
        self.division.is_none() && self.status.is_none()
    }

    /// Exact-match test against both constraints.
    pub fn matches(&self, program: &ProgramRecord) -> bool {
        let division_ok = self
            .division
            .as_deref()
            .map_or(true, |division| program.division == division);
        let status_ok = self.status.map_or(true, |status| program.status == status);
        division_ok && status_ok
    }
}

/// Returns the records matching `criteria`, in input order.
pub fn filter(programs: &[ProgramRecord], criteria: &FilterCriteria) -> Vec<ProgramRecord> {
    programs
        .iter()
        .filter(|program| criteria.matches(program))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::FilterCriteria;
    use crate::model::program::ProgramStatus;

    #[test]
    fn blank_division_selection_is_unconstrained() {
        let criteria = FilterCriteria::new(Some("  "), None);
        assert!(criteria.is_unconstrained());

        let criteria = FilterCriteria::new(Some(" HR "), Some(ProgramStatus::Done));
        assert_eq!(criteria.division.as_deref(), Some("HR"));
        assert!(!criteria.is_unconstrained());
    }
}
