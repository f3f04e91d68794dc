//! Integration tests for the consumption ledger over an in-memory store

use chrono::{NaiveDate, TimeZone, Utc};
use hourboard_core::models::{
    CarryModel, CompanyId, CompanyQuota, MonthYear, PackageType, Project, ProjectId, ProjectStatus,
};
use hourboard_core::{DatasetLoader, InMemoryStore, Ledger, LedgerError, SourceError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::PathBuf;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn ym(year: i32, month: u32) -> MonthYear {
    MonthYear::new(year, month).unwrap()
}

fn quota(
    company: &str,
    hours: Decimal,
    package_type: PackageType,
    carry_model: CarryModel,
) -> CompanyQuota {
    CompanyQuota {
        company_id: CompanyId::from(company),
        has_quota: true,
        contracted_hours: hours,
        package_type,
        start_date: Some(date(2025, 1, 1)),
        end_date: None,
        carry_model,
    }
}

fn project(
    id: &str,
    company: &str,
    status: ProjectStatus,
    hours: Decimal,
    started: Option<NaiveDate>,
) -> Project {
    Project {
        project_id: ProjectId::from(id),
        company_id: CompanyId::from(company),
        name: format!("Project {id}"),
        status,
        estimated_hours: Some(hours),
        actual_start_date: started,
        created_at: Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap(),
    }
}

fn acme() -> CompanyId {
    CompanyId::from("acme")
}

#[test]
fn test_scenario_a_no_quota_uses_project_estimates() {
    let store = InMemoryStore::new();
    store.upsert_company(acme(), "Acme", None);
    store.insert_project(project("p1", "acme", ProjectStatus::Planning, dec!(20), None));
    store.insert_project(project("p2", "acme", ProjectStatus::InProgress, dec!(30), None));

    let ledger = Ledger::new(&store);
    let figure = ledger.compute_figure(&acme(), None, None).unwrap();

    assert!(!figure.has_quota);
    assert_eq!(figure.contracted_hours, dec!(50));
    assert_eq!(figure.consumed_hours, dec!(30));
    assert_eq!(figure.remaining_hours, dec!(20));
    assert!(figure.excess_details.is_none());

    // No carry logic and no period gating for any selector
    let monthly = ledger.compute_figure(&acme(), Some(7), Some(2031)).unwrap();
    assert_eq!(monthly, figure);
}

#[test]
fn test_scenario_b_overage_is_attributed() {
    let store = InMemoryStore::new();
    store.upsert_company(
        acme(),
        "Acme",
        Some(quota("acme", dec!(40), PackageType::Monthly, CarryModel::Standard)),
    );
    store.insert_project(project("p1", "acme", ProjectStatus::InProgress, dec!(55), None));

    let ledger = Ledger::new(&store);
    let figure = ledger.compute_figure(&acme(), None, None).unwrap();

    assert_eq!(figure.consumed_hours, dec!(55));
    assert_eq!(figure.remaining_hours, dec!(-15));

    let details = figure.excess_details.expect("negative balance carries excess details");
    assert_eq!(details.project_count, 1);
    assert_eq!(details.exceeded_by, dec!(15));
    assert!(details.traces[0].is_exceeding_project);
    assert_eq!(details.traces[0].cumulative_hours, dec!(55));

    let attributed = ledger.attribute(&acme(), None, None).unwrap();
    assert_eq!(attributed, details);
}

#[test]
fn test_scenario_c_outside_period_is_all_zero() {
    let store = InMemoryStore::new();
    let mut q = quota("acme", dec!(100), PackageType::Period, CarryModel::Standard);
    q.end_date = Some(date(2025, 3, 31));
    store.upsert_company(acme(), "Acme", Some(q.clone()));
    store.insert_project(project(
        "p1",
        "acme",
        ProjectStatus::Completed,
        dec!(30),
        Some(date(2025, 2, 1)),
    ));

    assert!(!Ledger::<&InMemoryStore>::is_valid(&q, ym(2025, 4)));

    let ledger = Ledger::new(&store);
    let april = ledger.compute_figure(&acme(), Some(4), Some(2025)).unwrap();
    assert_eq!(april.contracted_hours, Decimal::ZERO);
    assert_eq!(april.consumed_hours, Decimal::ZERO);
    assert_eq!(april.remaining_hours, Decimal::ZERO);
    assert!(april.has_quota);

    let attributed = ledger.attribute(&acme(), Some(4), Some(2025)).unwrap();
    assert!(attributed.traces.is_empty());

    // Inside the window the package balance is reported as of that month
    let march = ledger.compute_figure(&acme(), Some(3), Some(2025)).unwrap();
    assert_eq!(march.contracted_hours, dec!(100));
    assert_eq!(march.consumed_hours, dec!(30));
    assert_eq!(march.remaining_hours, dec!(70));
}

#[test]
fn test_scenario_d_current_account_carries_balance() {
    let store = InMemoryStore::new();
    store.upsert_company(
        acme(),
        "Acme",
        Some(quota("acme", dec!(40), PackageType::Monthly, CarryModel::CurrentAccount)),
    );
    store.insert_project(project(
        "jan",
        "acme",
        ProjectStatus::Completed,
        dec!(30),
        Some(date(2025, 1, 6)),
    ));
    store.insert_project(project(
        "feb",
        "acme",
        ProjectStatus::InProgress,
        dec!(45),
        Some(date(2025, 2, 3)),
    ));

    let ledger = Ledger::new(&store);

    let january = ledger.compute_figure(&acme(), Some(1), Some(2025)).unwrap();
    assert_eq!(january.remaining_hours, dec!(10));
    assert_eq!(january.carried_hours, Decimal::ZERO);

    let february = ledger.compute_figure(&acme(), Some(2), Some(2025)).unwrap();
    assert_eq!(february.contracted_hours, dec!(40));
    assert_eq!(february.carried_hours, dec!(10));
    assert_eq!(february.consumed_hours, dec!(45));
    assert_eq!(february.remaining_hours, dec!(5));
    assert!(february.excess_details.is_none());
}

#[test]
fn test_current_account_overage_threshold_includes_carry() {
    let store = InMemoryStore::new();
    store.upsert_company(
        acme(),
        "Acme",
        Some(quota("acme", dec!(40), PackageType::Monthly, CarryModel::CurrentAccount)),
    );
    store.insert_project(project(
        "jan",
        "acme",
        ProjectStatus::Completed,
        dec!(30),
        Some(date(2025, 1, 6)),
    ));
    store.insert_project(project(
        "feb-a",
        "acme",
        ProjectStatus::Completed,
        dec!(35),
        Some(date(2025, 2, 3)),
    ));
    store.insert_project(project(
        "feb-b",
        "acme",
        ProjectStatus::Review,
        dec!(20),
        Some(date(2025, 2, 9)),
    ));

    let figure = Ledger::new(&store).compute_figure(&acme(), Some(2), Some(2025)).unwrap();
    // 40 + 10 - 55
    assert_eq!(figure.remaining_hours, dec!(-5));

    let details = figure.excess_details.unwrap();
    assert_eq!(details.contracted_hours, dec!(50));
    assert_eq!(details.exceeded_by, dec!(5));
    assert_eq!(details.exceeding_project().unwrap().project_id, "feb-b");
}

#[test]
fn test_monthly_attribution_uses_carried_threshold() {
    let store = InMemoryStore::new();
    store.upsert_company(
        acme(),
        "Acme",
        Some(quota("acme", dec!(40), PackageType::Monthly, CarryModel::CurrentAccount)),
    );
    store.insert_project(project(
        "jan",
        "acme",
        ProjectStatus::Completed,
        dec!(30),
        Some(date(2025, 1, 6)),
    ));
    store.insert_project(project(
        "feb-a",
        "acme",
        ProjectStatus::Completed,
        dec!(35),
        Some(date(2025, 2, 3)),
    ));
    store.insert_project(project(
        "feb-b",
        "acme",
        ProjectStatus::Review,
        dec!(20),
        Some(date(2025, 2, 9)),
    ));

    let ledger = Ledger::new(&store);
    let attributed = ledger.attribute(&acme(), Some(2), Some(2025)).unwrap();

    // 40 contracted + 10 carried from January
    assert_eq!(attributed.contracted_hours, dec!(50));
    assert_eq!(attributed.project_count, 2);
    assert!(attributed.traces.iter().all(|t| t.project_id != "jan"));
    assert_eq!(attributed.exceeding_project().unwrap().project_id, "feb-b");

    let figure = ledger.compute_figure(&acme(), Some(2), Some(2025)).unwrap();
    assert_eq!(figure.excess_details, Some(attributed));
}

#[test]
fn test_standard_model_reports_negative_but_does_not_carry() {
    let store = InMemoryStore::new();
    store.upsert_company(
        acme(),
        "Acme",
        Some(quota("acme", dec!(40), PackageType::Monthly, CarryModel::Standard)),
    );
    store.insert_project(project(
        "jan",
        "acme",
        ProjectStatus::Completed,
        dec!(50),
        Some(date(2025, 1, 6)),
    ));
    store.insert_project(project(
        "feb",
        "acme",
        ProjectStatus::Completed,
        dec!(10),
        Some(date(2025, 2, 6)),
    ));

    let ledger = Ledger::new(&store);
    let january = ledger.compute_figure(&acme(), Some(1), Some(2025)).unwrap();
    assert_eq!(january.remaining_hours, dec!(-10));
    assert!(january.excess_details.is_some());

    let february = ledger.compute_figure(&acme(), Some(2), Some(2025)).unwrap();
    assert_eq!(february.carried_hours, Decimal::ZERO);
    assert_eq!(february.remaining_hours, dec!(30));
}

#[test]
fn test_all_time_query_ignores_carry_and_counts_everything() {
    let store = InMemoryStore::new();
    store.upsert_company(
        acme(),
        "Acme",
        Some(quota("acme", dec!(40), PackageType::Monthly, CarryModel::CurrentAccount)),
    );
    store.insert_project(project(
        "jan",
        "acme",
        ProjectStatus::Completed,
        dec!(30),
        Some(date(2025, 1, 6)),
    ));
    store.insert_project(project(
        "feb",
        "acme",
        ProjectStatus::InProgress,
        dec!(45),
        Some(date(2025, 2, 3)),
    ));

    let figure = Ledger::new(&store).compute_figure(&acme(), None, None).unwrap();
    assert_eq!(figure.contracted_hours, dec!(40));
    assert_eq!(figure.consumed_hours, dec!(75));
    assert_eq!(figure.carried_hours, Decimal::ZERO);
    assert_eq!(figure.remaining_hours, dec!(-35));
}

#[test]
fn test_excluded_projects_never_contribute() {
    let store = InMemoryStore::new();
    store.upsert_company(
        acme(),
        "Acme",
        Some(quota("acme", dec!(10), PackageType::Monthly, CarryModel::Standard)),
    );
    store.insert_project(project("x", "acme", ProjectStatus::Cancelled, dec!(500), None));
    store.insert_project(project("y", "acme", ProjectStatus::CommercialProposal, dec!(500), None));
    store.insert_project(project("z", "acme", ProjectStatus::Delivered, dec!(12), None));

    let ledger = Ledger::new(&store);
    let figure = ledger.compute_figure(&acme(), None, None).unwrap();
    assert_eq!(figure.consumed_hours, dec!(12));

    let details = figure.excess_details.unwrap();
    assert!(details.traces.iter().all(|t| t.project_id == "z"));
}

#[test]
fn test_zero_hour_quota_is_not_no_quota() {
    let store = InMemoryStore::new();
    store.upsert_company(
        acme(),
        "Acme",
        Some(quota("acme", Decimal::ZERO, PackageType::Monthly, CarryModel::Standard)),
    );
    store.insert_project(project("p1", "acme", ProjectStatus::InProgress, dec!(8), None));

    let figure = Ledger::new(&store).compute_figure(&acme(), None, None).unwrap();
    assert!(figure.has_quota);
    assert_eq!(figure.contracted_hours, Decimal::ZERO);
    assert_eq!(figure.remaining_hours, dec!(-8));

    // Threshold already at zero: nothing crosses it
    let details = figure.excess_details.unwrap();
    assert!(details.exceeding_project().is_none());
    assert_eq!(details.exceeded_by, dec!(8));
}

#[test]
fn test_compute_figure_is_idempotent() {
    let store = InMemoryStore::new();
    store.upsert_company(
        acme(),
        "Acme",
        Some(quota("acme", dec!(40), PackageType::Monthly, CarryModel::CurrentAccount)),
    );
    store.insert_project(project(
        "p1",
        "acme",
        ProjectStatus::Completed,
        dec!(52.5),
        Some(date(2025, 3, 1)),
    ));

    let ledger = Ledger::new(&store);
    let first = ledger.compute_figure(&acme(), Some(3), Some(2025)).unwrap();
    let second = ledger.compute_figure(&acme(), Some(3), Some(2025)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.remaining_hours, dec!(67.5));
}

#[test]
fn test_attribute_cumulative_is_monotonic() {
    let store = InMemoryStore::new();
    store.upsert_company(
        acme(),
        "Acme",
        Some(quota("acme", dec!(25), PackageType::Monthly, CarryModel::Standard)),
    );
    for (i, hours) in [dec!(5), dec!(12.5), dec!(0), dec!(9), dec!(4)].into_iter().enumerate() {
        store.insert_project(project(
            &format!("p{i}"),
            "acme",
            ProjectStatus::Completed,
            hours,
            Some(date(2025, 1, 1 + i as u32)),
        ));
    }

    let details = Ledger::new(&store).attribute(&acme(), None, None).unwrap();
    assert_eq!(details.project_count, 4);
    assert!(details
        .traces
        .windows(2)
        .all(|pair| pair[0].cumulative_hours <= pair[1].cumulative_hours));
    assert_eq!(details.traces.iter().filter(|t| t.is_exceeding_project).count(), 1);
    assert_eq!(details.exceeding_project().unwrap().project_id, "p3");
}

#[test]
fn test_statement_matches_monthly_figures() {
    let store = InMemoryStore::new();
    store.upsert_company(
        acme(),
        "Acme",
        Some(quota("acme", dec!(40), PackageType::Monthly, CarryModel::CurrentAccount)),
    );
    store.insert_project(project(
        "jan",
        "acme",
        ProjectStatus::Completed,
        dec!(30),
        Some(date(2025, 1, 6)),
    ));
    store.insert_project(project(
        "feb",
        "acme",
        ProjectStatus::Completed,
        dec!(55),
        Some(date(2025, 2, 3)),
    ));
    store.insert_project(project(
        "apr",
        "acme",
        ProjectStatus::Review,
        dec!(12),
        Some(date(2025, 4, 20)),
    ));

    let ledger = Ledger::new(&store);
    let rows = ledger.statement(&acme(), ym(2025, 4)).unwrap();
    assert_eq!(rows.len(), 4);

    for row in &rows {
        let figure = ledger
            .compute_figure(&acme(), Some(row.month.month()), Some(row.month.year() as u32))
            .unwrap();
        assert_eq!(figure.remaining_hours, row.remaining_hours, "{}", row.month);
        assert_eq!(figure.carried_hours, row.carry_in, "{}", row.month);
    }
    // 10, -5, 35, 63
    assert_eq!(rows[3].remaining_hours, dec!(63));
}

#[test]
fn test_statement_for_company_without_quota_is_empty() {
    let store = InMemoryStore::new();
    store.upsert_company(acme(), "Acme", None);
    assert!(Ledger::new(&store).statement(&acme(), ym(2025, 6)).unwrap().is_empty());
}

#[test]
fn test_unknown_company_is_an_error() {
    let store = InMemoryStore::new();
    let ledger = Ledger::new(&store);

    let err = ledger.compute_figure(&CompanyId::from("ghost"), None, None).unwrap_err();
    assert!(matches!(err, LedgerError::CompanyNotFound { .. }));

    let err = ledger.attribute(&CompanyId::from("ghost"), None, None).unwrap_err();
    assert!(matches!(err, LedgerError::CompanyNotFound { .. }));
}

#[test]
fn test_invalid_selector_rejected_before_data_access() {
    let store = InMemoryStore::new();
    store.mark_unavailable("offline");
    let ledger = Ledger::new(&store);

    let err = ledger.compute_figure(&acme(), Some(13), Some(2025)).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidPeriodSelector { .. }));

    let err = ledger.rollup(&[acme()], Some(3), None).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidPeriodSelector { .. }));
}

#[test]
fn test_data_access_failure_propagates() {
    let store = InMemoryStore::new();
    store.upsert_company(acme(), "Acme", None);
    store.mark_unavailable("database unreachable");

    let err = Ledger::new(&store).compute_figure(&acme(), None, None).unwrap_err();
    match err {
        LedgerError::DataAccess { operation, source } => {
            assert_eq!(operation, "fetch_company_quota");
            assert_eq!(
                source,
                SourceError::Unavailable {
                    message: "database unreachable".to_string()
                }
            );
        }
        other => panic!("expected data access failure, got {other:?}"),
    }
}

#[test]
fn test_malformed_quota_is_data_access_failure() {
    let store = InMemoryStore::new();
    let mut q = quota("acme", dec!(40), PackageType::Period, CarryModel::Standard);
    q.end_date = Some(date(2024, 6, 1));
    store.upsert_company(acme(), "Acme", Some(q));

    let err = Ledger::new(&store).compute_figure(&acme(), None, None).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::DataAccess {
            source: SourceError::Malformed { .. },
            ..
        }
    ));
}

#[test]
fn test_demo_portfolio() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/portfolio.json");
    let store = DatasetLoader::load_file(&path).unwrap();
    let ledger = Ledger::new(&store);

    let february = ledger.compute_figure(&acme(), Some(2), Some(2025)).unwrap();
    assert_eq!(february.carried_hours, dec!(10));
    assert_eq!(february.consumed_hours, dec!(55));
    assert_eq!(february.remaining_hours, dec!(-5));
    let details = february.excess_details.unwrap();
    assert_eq!(details.exceeding_project().unwrap().project_id, "acme-audit");

    let globex = ledger.compute_figure(&CompanyId::from("globex"), None, None).unwrap();
    assert!(!globex.has_quota);
    assert_eq!(globex.contracted_hours, dec!(16));
    assert_eq!(globex.remaining_hours, dec!(10));
}
