use chrono::NaiveDate;
use proker_core::{
    ExportError, ExportFormat, FilterCriteria, LoadIssue, MemorySlot, ProgramFields,
    ProgramInput, ProgramRepository, ProgramService, ProgramStatus, ServiceError,
    SlotProgramRepository, StorageSlot, SubmitOutcome, PROGRAMS_SLOT_KEY,
};

fn fields(division: &str, name: &str, budget: u64, status: ProgramStatus) -> ProgramFields {
    ProgramFields {
        division: division.to_string(),
        program_name: name.to_string(),
        budget,
        assignee: "Tono".to_string(),
        status,
        description: None,
    }
}

fn created_id(outcome: &SubmitOutcome) -> i64 {
    match outcome {
        SubmitOutcome::Created(program) => program.id,
        other => panic!("expected create, got {other:?}"),
    }
}

#[test]
fn submit_without_session_creates_and_saves() {
    let slot = MemorySlot::new();
    let (mut service, issue) = ProgramService::open(SlotProgramRepository::new(&slot));
    assert!(issue.is_none());

    let report = service.submit(None, fields("HR", "Hiring", 100, ProgramStatus::NotStarted));
    assert!(report.is_saved());
    let id = created_id(&report.outcome);

    let persisted = SlotProgramRepository::new(&slot).load().programs;
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id, id);
}

#[test]
fn edit_session_updates_in_place() {
    let (mut service, _) = ProgramService::open(SlotProgramRepository::new(MemorySlot::new()));
    let first = created_id(&service.submit(None, fields("HR", "a", 1, ProgramStatus::NotStarted)).outcome);
    service.submit(None, fields("HR", "b", 2, ProgramStatus::NotStarted));

    let (session, mut current) = service.begin_edit(first).unwrap();
    assert_eq!(session.id(), first);
    current.status = ProgramStatus::Done;
    current.budget = 50;

    let report = service.submit(Some(session), current);
    assert_eq!(report.outcome, SubmitOutcome::Updated(first));

    let all = service.store().all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, first);
    assert_eq!(all[0].status, ProgramStatus::Done);
    assert_eq!(all[0].budget, 50);
}

#[test]
fn edit_of_vanished_record_is_a_benign_no_op() {
    let (mut service, _) = ProgramService::open(SlotProgramRepository::new(MemorySlot::new()));
    let id = created_id(&service.submit(None, fields("HR", "a", 1, ProgramStatus::Done)).outcome);
    let (session, current) = service.begin_edit(id).unwrap();
    service.delete(id);

    let report = service.submit(Some(session), current);
    assert_eq!(report.outcome, SubmitOutcome::Missing(id));
    assert!(service.store().is_empty());
}

#[test]
fn begin_edit_of_unknown_id_returns_none() {
    let (service, _) = ProgramService::open(SlotProgramRepository::new(MemorySlot::new()));
    assert!(service.begin_edit(123).is_none());
}

#[test]
fn failed_save_keeps_in_memory_mutation() {
    let slot = MemorySlot::with_quota(PROGRAMS_SLOT_KEY.len() + 2);
    let (mut service, _) = ProgramService::open(SlotProgramRepository::new(&slot));

    let report = service.submit(None, fields("Finance", "Audit", 9, ProgramStatus::Done));
    assert!(!report.is_saved());
    assert!(report.into_result().is_err());

    assert_eq!(service.store().len(), 1);
    assert_eq!(slot.read(PROGRAMS_SLOT_KEY).unwrap(), None);
}

#[test]
fn corrupt_storage_opens_empty_session() {
    let slot = MemorySlot::new();
    slot.write(PROGRAMS_SLOT_KEY, "[{]").unwrap();

    let (service, issue) = ProgramService::open(SlotProgramRepository::new(&slot));
    assert!(matches!(issue, Some(LoadIssue::Corrupt(_))));
    assert!(service.store().is_empty());
}

#[test]
fn clear_filtered_requires_a_constraint() {
    let (mut service, _) = ProgramService::open(SlotProgramRepository::new(MemorySlot::new()));
    service.submit(None, fields("HR", "a", 1, ProgramStatus::Done));

    let err = service.clear_filtered(&FilterCriteria::default()).unwrap_err();
    assert_eq!(err, ServiceError::NoActiveFilter);
    assert_eq!(service.store().len(), 1);
}

#[test]
fn clear_filtered_removes_only_matches() {
    let (mut service, _) = ProgramService::open(SlotProgramRepository::new(MemorySlot::new()));
    service.submit(None, fields("HR", "a", 1, ProgramStatus::Done));
    service.submit(None, fields("HR", "b", 1, ProgramStatus::InProgress));
    service.submit(None, fields("Finance", "c", 1, ProgramStatus::Done));

    let criteria = FilterCriteria::default().with_status(ProgramStatus::Done);
    let report = service.clear_filtered(&criteria).unwrap();
    assert_eq!(report.outcome, 2);

    let names: Vec<_> = service
        .store()
        .all()
        .iter()
        .map(|program| program.program_name.clone())
        .collect();
    assert_eq!(names, ["b"]);
}

#[test]
fn clear_all_persists_empty_collection() {
    let slot = MemorySlot::new();
    let (mut service, _) = ProgramService::open(SlotProgramRepository::new(&slot));
    service.submit(None, fields("HR", "a", 1, ProgramStatus::Done));

    assert_eq!(service.clear_all().outcome, 1);
    assert_eq!(slot.read(PROGRAMS_SLOT_KEY).unwrap().as_deref(), Some("[]"));
    assert!(service.repository().load().programs.is_empty());
}

#[test]
fn view_keeps_whole_collection_stats_while_rows_are_filtered() {
    let (mut service, _) = ProgramService::open(SlotProgramRepository::new(MemorySlot::new()));
    service.submit(None, fields("Finance", "a", 100, ProgramStatus::Done));
    service.submit(None, fields("HR", "b", 200, ProgramStatus::InProgress));

    let criteria = FilterCriteria::default().with_division("Finance");
    let view = service.view(&criteria);

    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].program_name, "a");
    assert_eq!(view.stats.total_programs, 2);
    assert_eq!(view.stats.total_budget, 300);
    assert_eq!(view.filtered_stats.total_programs, 1);
    assert_eq!(view.filtered_stats.total_budget, 100);
    assert_eq!(view.criteria, criteria);
}

#[test]
fn reopening_restores_saved_session() {
    let slot = MemorySlot::new();
    let id = {
        let (mut service, _) = ProgramService::open(SlotProgramRepository::new(&slot));
        let input = ProgramInput {
            division: "IT".to_string(),
            program_name: "Network upgrade".to_string(),
            budget: "Rp 12.000.000".to_string(),
            assignee: "Fajar".to_string(),
            status: "Sedang Berjalan".to_string(),
            description: "Core switches".to_string(),
        };
        created_id(&service.submit(None, input.into_fields().unwrap()).outcome)
    };

    let (service, issue) = ProgramService::open(SlotProgramRepository::new(&slot));
    assert!(issue.is_none());
    let program = service.store().find(id).unwrap();
    assert_eq!(program.budget, 12_000_000);
    assert_eq!(program.status, ProgramStatus::InProgress);
    assert_eq!(program.description.as_deref(), Some("Core switches"));
}

#[test]
fn export_snapshot_uses_filtered_rows_and_criteria() {
    let (mut service, _) = ProgramService::open(SlotProgramRepository::new(MemorySlot::new()));
    service.submit(None, fields("Finance", "a", 100, ProgramStatus::Done));
    service.submit(None, fields("HR", "b", 200, ProgramStatus::Done));
    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

    let criteria = FilterCriteria::default().with_division("HR");
    let snapshot = service.export_snapshot(&criteria, date).unwrap();
    assert_eq!(snapshot.records().len(), 1);
    assert_eq!(
        snapshot.file_name(ExportFormat::Xlsx),
        "program_kerja_HR_2026-10-19.xlsx"
    );

    let empty = FilterCriteria::default().with_division("Legal");
    assert_eq!(
        service.export_snapshot(&empty, date).unwrap_err(),
        ExportError::EmptyView
    );
}

#[test]
fn repository_trait_is_usable_directly() {
    let repo = SlotProgramRepository::new(MemorySlot::new());
    repo.save(&[]).unwrap();
    assert!(repo.load().programs.is_empty());
}
