//! Summary statistics over program collections.

use crate::model::program::{ProgramRecord, ProgramStatus};
use std::collections::HashSet;

/// Per-status record counts; statuses without records report zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub not_started: usize,
    pub in_progress: usize,
    pub done: usize,
}

impl StatusCounts {
    pub fn get(&self, status: ProgramStatus) -> usize {
        match status {
            ProgramStatus::NotStarted => self.not_started,
            ProgramStatus::InProgress => self.in_progress,
            ProgramStatus::Done => self.done,
        }
    }

    fn increment(&mut self, status: ProgramStatus) {
        let slot = match status {
            ProgramStatus::NotStarted => &mut self.not_started,
            ProgramStatus::InProgress => &mut self.in_progress,
            ProgramStatus::Done => &mut self.done,
        };
        *slot += 1;
    }
}

/// Dashboard numbers for a set of programs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramStats {
    pub total_programs: usize,
    /// Saturates at `u64::MAX` instead of wrapping.
    pub total_budget: u64,
    pub total_divisions: usize,
    pub status_counts: StatusCounts,
}

/// Statistics over the entire collection.
///
/// Use this for the dashboard even when the table shows a filtered view.
pub fn aggregate(programs: &[ProgramRecord]) -> ProgramStats {
    summarize(programs)
}

/// Statistics over an already-filtered subset.
pub fn aggregate_filtered(view: &[ProgramRecord]) -> ProgramStats {
    summarize(view)
}

fn summarize(programs: &[ProgramRecord]) -> ProgramStats {
    let mut divisions = HashSet::new();
    let mut stats = ProgramStats {
        total_programs: programs.len(),
        ..ProgramStats::default()
    };

    for program in programs {
        stats.total_budget = stats.total_budget.saturating_add(program.budget);
        stats.status_counts.increment(program.status);
        divisions.insert(program.division.as_str());
    }
    stats.total_divisions = divisions.len();

    stats
}
