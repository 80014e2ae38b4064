//! CLI command definitions and handlers.

use crate::config::{CliConfig, GlobalArgs};
use crate::output;
use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use proker_core::db::open_db;
use proker_core::{
    format_budget_input, ExportFormat, FilterCriteria, MutationReport, ProgramId, ProgramInput,
    ProgramService, ProgramStatus, SlotProgramRepository, SqliteSlot, SubmitOutcome,
};

/// Work program register
#[derive(Parser)]
#[command(name = "proker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new program
    Add(AddArgs),

    /// Edit an existing program; omitted fields keep their value
    Edit(EditArgs),

    /// Delete one program
    Delete {
        /// Program ID
        id: ProgramId,
    },

    /// List programs with optional filters
    List(FilterArgs),

    /// Show dashboard statistics
    Stats(FilterArgs),

    /// Prepare an export of the filtered programs
    Export(ExportArgs),

    /// Delete every program matching the filters
    ClearFiltered(ClearFilteredArgs),

    /// Delete every program
    ClearAll(ConfirmArgs),
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    pub division: String,

    /// Program name
    #[arg(long)]
    pub name: String,

    /// Budget, e.g. `Rp 1.500.000`; non-digits are ignored
    #[arg(long, default_value = "")]
    pub budget: String,

    #[arg(long)]
    pub assignee: String,

    /// Status (Belum Dimulai, Sedang Berjalan, Selesai)
    #[arg(long, default_value = "")]
    pub status: String,

    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Program ID
    pub id: ProgramId,

    #[arg(long)]
    pub division: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub budget: Option<String>,

    #[arg(long)]
    pub assignee: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Only programs of this division
    #[arg(long)]
    pub division: Option<String>,

    /// Only programs with this status
    #[arg(long, value_parser = parse_status)]
    pub status: Option<ProgramStatus>,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.division.as_deref(), self.status)
    }
}

#[derive(Args)]
pub struct ExportArgs {
    /// Artifact format (xlsx, pdf)
    #[arg(value_parser = parse_format)]
    pub format: ExportFormat,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Date used in the file name (YYYY-MM-DD); defaults to today (UTC)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct ConfirmArgs {
    /// Confirm the deletion; it cannot be undone
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ClearFilteredArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

fn parse_status(value: &str) -> Result<ProgramStatus, String> {
    ProgramStatus::parse(value).ok_or_else(|| format!("unknown status `{value}`"))
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    ExportFormat::parse(value).ok_or_else(|| format!("unknown export format `{value}`"))
}

impl Cli {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let conn = open_db(&config.data_path)
            .with_context(|| format!("cannot open `{}`", config.data_path.display()))?;
        let slot = SqliteSlot::try_new(&conn)?.with_quota(config.quota_bytes);
        let (mut service, issue) = ProgramService::open(SlotProgramRepository::new(slot));
        if let Some(issue) = issue {
            output::print_warning(&format!("{issue}; starting with the recovered data"));
        }

        match self.command {
            Commands::Add(args) => {
                let fields = ProgramInput {
                    division: args.division,
                    program_name: args.name,
                    budget: args.budget,
                    assignee: args.assignee,
                    status: args.status,
                    description: args.description,
                }
                .into_fields()?;
                report_submit(service.submit(None, fields));
            }

            Commands::Edit(args) => {
                let Some((session, current)) = service.begin_edit(args.id) else {
                    output::print_warning(&format!(
                        "program {} not found; nothing to edit",
                        args.id
                    ));
                    return Ok(());
                };
                let fields = ProgramInput {
                    division: args.division.unwrap_or(current.division),
                    program_name: args.name.unwrap_or(current.program_name),
                    budget: args
                        .budget
                        .unwrap_or_else(|| format_budget_input(current.budget)),
                    assignee: args.assignee.unwrap_or(current.assignee),
                    status: args
                        .status
                        .unwrap_or_else(|| current.status.as_label().to_string()),
                    description: args
                        .description
                        .unwrap_or_else(|| current.description.unwrap_or_default()),
                }
                .into_fields()?;
                report_submit(service.submit(Some(session), fields));
            }

            Commands::Delete { id } => {
                let report = service.delete(id);
                if report.outcome {
                    println!("Deleted program {id}");
                }
                report_save(&report);
            }

            Commands::List(args) => {
                let view = service.view(&args.criteria());
                output::print_table(&view.rows);
                println!();
                output::print_stats(&view.stats);
            }

            Commands::Stats(args) => {
                let view = service.view(&args.criteria());
                output::print_stats(&view.stats);
                if !view.criteria.is_unconstrained() {
                    println!();
                    println!("Filtered view:");
                    output::print_stats(&view.filtered_stats);
                }
            }

            Commands::Export(args) => {
                let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
                let snapshot = service.export_snapshot(&args.filter.criteria(), date)?;
                output::print_export(&snapshot, args.format);
            }

            Commands::ClearFiltered(args) => {
                require_confirmation(&args.confirm)?;
                let report = service.clear_filtered(&args.filter.criteria())?;
                println!("Deleted {} filtered program(s)", report.outcome);
                report_save(&report);
            }

            Commands::ClearAll(confirm) => {
                require_confirmation(&confirm)?;
                let report = service.clear_all();
                println!("Deleted {} program(s)", report.outcome);
                report_save(&report);
            }
        }

        Ok(())
    }
}

fn require_confirmation(confirm: &ConfirmArgs) -> Result<()> {
    if !confirm.yes {
        bail!("this deletion cannot be undone; re-run with --yes to confirm");
    }
    Ok(())
}

fn report_submit(report: MutationReport<SubmitOutcome>) {
    match &report.outcome {
        SubmitOutcome::Created(program) => println!("Added program {}", program.id),
        SubmitOutcome::Updated(id) => println!("Updated program {id}"),
        SubmitOutcome::Missing(id) => {
            output::print_warning(&format!("program {id} no longer exists; nothing updated"))
        }
    }
    report_save(&report);
}

fn report_save<T>(report: &MutationReport<T>) {
    if let Some(err) = &report.save_error {
        output::print_warning(&format!("{err}; changes are kept for this run only"));
    }
}
