//! Terminal output formatting.

use proker_core::export::EXPORT_HEADERS;
use proker_core::{
    format_currency, ExportFormat, ExportSnapshot, ProgramRecord, ProgramStats, ProgramStatus,
};

pub fn print_warning(message: &str) {
    eprintln!("warning: {message}");
}

/// Print programs as a table.
pub fn print_table(programs: &[ProgramRecord]) {
    if programs.is_empty() {
        println!("No programs found.");
        return;
    }

    println!(
        "{:<14} {:<12} {:<28} {:>18} {:<16} {:<16} {}",
        "ID", "Division", "Program", "Budget", "Assignee", "Status", "Description"
    );
    println!("{}", "-".repeat(120));

    for program in programs {
        println!(
            "{:<14} {:<12} {:<28} {:>18} {:<16} {:<16} {}",
            program.id,
            truncate(&program.division, 12),
            truncate(&program.program_name, 28),
            format_currency(program.budget),
            truncate(&program.assignee, 16),
            program.status,
            program.description.as_deref().unwrap_or("-")
        );
    }
}

/// Print dashboard statistics.
pub fn print_stats(stats: &ProgramStats) {
    println!("Total programs:  {}", stats.total_programs);
    println!("Total budget:    {}", format_currency(stats.total_budget));
    println!("Divisions:       {}", stats.total_divisions);
    for status in ProgramStatus::ALL {
        println!(
            "{:<16} {}",
            format!("{status}:"),
            stats.status_counts.get(status)
        );
    }
}

/// Print what an export adapter receives.
pub fn print_export(snapshot: &ExportSnapshot, format: ExportFormat) {
    println!("File:  {}", snapshot.file_name(format));
    println!("Title: {}", snapshot.title());
    println!("{}", snapshot.date_label());
    println!();
    println!("{}", EXPORT_HEADERS.join(" | "));
    for row in snapshot.rows() {
        let budget = match format {
            ExportFormat::Xlsx => row.budget.to_string(),
            ExportFormat::Pdf => row.budget_display.clone(),
        };
        let description = match format {
            ExportFormat::Xlsx => row.description.as_str(),
            ExportFormat::Pdf => row.description_or_dash(),
        };
        println!(
            "{} | {} | {} | {} | {} | {}",
            row.division, row.program_name, budget, row.assignee, row.status, description
        );
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut truncated: String = value.chars().take(max_chars.saturating_sub(3)).collect();
    truncated.push_str("...");
    truncated
}
