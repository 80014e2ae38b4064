use proker_core::{
    aggregate, aggregate_filtered, filter, FilterCriteria, ProgramFields, ProgramRecord,
    ProgramStatus, ProgramStore,
};

fn collection(rows: &[(&str, u64, ProgramStatus)]) -> Vec<ProgramRecord> {
    let mut store = ProgramStore::new();
    for (index, (division, budget, status)) in rows.iter().enumerate() {
        store.create(ProgramFields {
            division: division.to_string(),
            program_name: format!("program-{index}"),
            budget: *budget,
            assignee: "Budi".to_string(),
            status: *status,
            description: None,
        });
    }
    store.all().to_vec()
}

#[test]
fn unconstrained_filter_is_identity() {
    let programs = collection(&[
        ("HR", 1, ProgramStatus::Done),
        ("Finance", 2, ProgramStatus::NotStarted),
        ("HR", 3, ProgramStatus::InProgress),
    ]);

    assert_eq!(filter(&programs, &FilterCriteria::default()), programs);
}

#[test]
fn filter_by_division_returns_matching_record_only() {
    let programs = collection(&[
        ("Finance", 10, ProgramStatus::Done),
        ("HR", 20, ProgramStatus::InProgress),
    ]);

    let criteria = FilterCriteria::default().with_division("Finance");
    assert_eq!(filter(&programs, &criteria), vec![programs[0].clone()]);
}

#[test]
fn filter_combines_constraints_and_keeps_order() {
    let programs = collection(&[
        ("HR", 1, ProgramStatus::Done),
        ("Finance", 2, ProgramStatus::Done),
        ("HR", 3, ProgramStatus::InProgress),
        ("HR", 4, ProgramStatus::Done),
    ]);

    let criteria = FilterCriteria::default()
        .with_division("HR")
        .with_status(ProgramStatus::Done);
    let budgets: Vec<_> = filter(&programs, &criteria)
        .iter()
        .map(|program| program.budget)
        .collect();
    assert_eq!(budgets, [1, 4]);
}

#[test]
fn filter_is_idempotent() {
    let programs = collection(&[
        ("HR", 1, ProgramStatus::Done),
        ("Finance", 2, ProgramStatus::Done),
        ("HR", 3, ProgramStatus::InProgress),
    ]);

    for criteria in [
        FilterCriteria::default(),
        FilterCriteria::default().with_division("HR"),
        FilterCriteria::default().with_status(ProgramStatus::Done),
        FilterCriteria::default()
            .with_division("Finance")
            .with_status(ProgramStatus::InProgress),
    ] {
        let once = filter(&programs, &criteria);
        assert_eq!(filter(&once, &criteria), once);
    }
}

#[test]
fn division_match_is_exact() {
    let programs = collection(&[("hr", 1, ProgramStatus::Done)]);
    assert!(filter(&programs, &FilterCriteria::default().with_division("HR")).is_empty());
}

#[test]
fn aggregate_sums_budgets_and_counts() {
    let programs = collection(&[
        ("HR", 100, ProgramStatus::Done),
        ("Finance", 200, ProgramStatus::Done),
        ("HR", 300, ProgramStatus::InProgress),
    ]);

    let stats = aggregate(&programs);
    assert_eq!(stats.total_programs, 3);
    assert_eq!(stats.total_budget, 600);
    assert_eq!(stats.total_divisions, 2);
    assert_eq!(stats.status_counts.get(ProgramStatus::Done), 2);
    assert_eq!(stats.status_counts.get(ProgramStatus::InProgress), 1);
    assert_eq!(stats.status_counts.get(ProgramStatus::NotStarted), 0);
}

#[test]
fn aggregate_of_empty_collection_is_zero() {
    let stats = aggregate(&[]);
    assert_eq!(stats.total_programs, 0);
    assert_eq!(stats.total_budget, 0);
    assert_eq!(stats.total_divisions, 0);
    assert_eq!(stats.status_counts.done, 0);
}

#[test]
fn aggregate_budget_saturates() {
    let programs = collection(&[
        ("HR", u64::MAX, ProgramStatus::Done),
        ("HR", 10, ProgramStatus::Done),
    ]);
    assert_eq!(aggregate(&programs).total_budget, u64::MAX);
}

#[test]
fn filtered_aggregate_covers_only_the_subset() {
    let programs = collection(&[
        ("HR", 100, ProgramStatus::Done),
        ("Finance", 200, ProgramStatus::NotStarted),
    ]);
    let view = filter(&programs, &FilterCriteria::default().with_division("HR"));

    let stats = aggregate_filtered(&view);
    assert_eq!(stats.total_programs, 1);
    assert_eq!(stats.total_budget, 100);
    assert_eq!(stats.total_divisions, 1);
    assert_eq!(aggregate(&programs).total_budget, 300);
}
