use chrono::{Duration, NaiveDate, TimeZone, Utc};
use interest_tracker_rs::{
    compute_interest, month_span, resolve_period, FileStore, InvestmentStatus, InvestmentStore, InvestmentTracker,
    MemoryStore, Money, MonthlyRate, NewInvestment, SafeTimeProvider, TimeSource, TrackerError, ValidationError,
    ValidationLimits,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn money(s: &str) -> Money {
    Money::from_str_exact(s).unwrap()
}

fn test_time() -> SafeTimeProvider {
    SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()))
}

/// 10,000 at 5% per month over exactly three months.
#[test]
fn quarter_at_five_percent() {
    let months = month_span(date(2024, 1, 1), date(2024, 4, 1));
    assert_eq!(months, dec!(3));

    let result = compute_interest(Money::from_major(10_000), MonthlyRate::from_percentage(5), months).unwrap();
    assert_eq!(result.simple_interest, money("1500.00"));
    assert_eq!(result.total_simple, money("11500.00"));
    assert_eq!(result.compound_interest, money("1576.25"));
    assert_eq!(result.total_compound, money("11576.25"));
}

#[test]
fn end_before_start_goes_through_inverted_guard() {
    assert_eq!(month_span(date(2024, 1, 15), date(2024, 1, 10)), Decimal::ZERO);
    assert_eq!(month_span(date(2024, 1, 1), date(2023, 12, 1)), Decimal::ZERO);

    let err = resolve_period(date(2024, 1, 15), date(2024, 1, 10)).unwrap_err();
    assert!(matches!(err, TrackerError::InvertedRange { .. }));
}

#[test]
fn non_positive_forward_span_is_too_short() {
    let err = resolve_period(date(2024, 3, 5), date(2024, 3, 5)).unwrap_err();
    assert!(matches!(err, TrackerError::PeriodTooShort { .. }));

    // the -30 day offset cancels the whole month
    let err = resolve_period(date(2024, 1, 31), date(2024, 2, 1)).unwrap_err();
    assert!(matches!(err, TrackerError::PeriodTooShort { .. }));
}

#[test]
fn zero_principal_is_rejected() {
    let limits = ValidationLimits::default();
    let err = NewInvestment::parse("Nothing", "0", "5", "2024-01-01", &limits).unwrap_err();
    assert!(matches!(err, ValidationError::NonPositivePrincipal { .. }));

    let err = NewInvestment::parse("Debt", "-10", "5", "2024-01-01", &limits).unwrap_err();
    assert!(matches!(err, ValidationError::NonPositivePrincipal { .. }));
}

#[test]
fn partial_months_count_thirty_day_fractions() {
    let months = month_span(date(2024, 1, 1), date(2024, 1, 16));
    assert_eq!(months, dec!(0.5));

    let result = compute_interest(Money::from_major(10_000), MonthlyRate::from_percentage(5), months).unwrap();
    assert_eq!(result.simple_interest, money("250.00"));
    assert!(result.compound_interest < result.simple_interest);
}

#[test]
fn tracker_lifecycle_in_memory() {
    let time = test_time();
    let controller = time.test_control().unwrap();
    let limits = ValidationLimits::default();
    let mut tracker = InvestmentTracker::new(Box::new(MemoryStore::new(50)), limits);

    let created = tracker
        .add_investment(NewInvestment::parse("Savings", "10000", "5", "2024-01-01", &limits).unwrap(), &time)
        .unwrap();
    assert_eq!(created.status(), InvestmentStatus::Created);
    assert!(created.interest().is_none());

    // rejected requests leave the record as created
    assert!(tracker.calculate(created.id, date(2023, 12, 1), &time).is_err());
    assert_eq!(tracker.get(created.id).unwrap(), created);

    controller.advance(Duration::days(91));
    let calculated = tracker.calculate(created.id, date(2024, 4, 1), &time).unwrap();
    assert_eq!(calculated.status(), InvestmentStatus::Calculated);
    assert_eq!(calculated.calculated_at, time.now());
    assert_eq!(calculated.interest().unwrap().total_compound, money("11576.25"));

    // recalculation overwrites every derived field
    let recalculated = tracker.calculate(created.id, date(2024, 7, 1), &time).unwrap();
    let calc = recalculated.calculation.unwrap();
    assert_eq!(calc.end_date, date(2024, 7, 1));
    assert_eq!(calc.month_count, dec!(6));
    assert_eq!(calc.interest.simple_interest, money("3000.00"));

    let csv = tracker.export_csv().unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("Name,Principal,Rate (% per month)"));
    assert!(lines.next().unwrap().starts_with("Savings,10000.00,5%/month,2024-01-01,2024-07-01,6.00,3000.00,"));

    tracker.delete(created.id).unwrap();
    assert!(matches!(
        tracker.get(created.id).unwrap_err(),
        TrackerError::InvestmentNotFound { .. }
    ));
}

#[test]
fn history_keeps_newest_fifty() {
    let time = test_time();
    let controller = time.test_control().unwrap();
    let limits = ValidationLimits::default();
    let mut tracker = InvestmentTracker::new(Box::new(MemoryStore::new(50)), limits);

    for i in 0..55 {
        let new = NewInvestment::parse(&format!("entry {}", i), "100", "1", "2024-01-01", &limits).unwrap();
        tracker.add_investment(new, &time).unwrap();
        controller.advance(Duration::seconds(1));
    }

    let records = tracker.list().unwrap();
    assert_eq!(records.len(), 50);
    assert_eq!(records.first().unwrap().name, "entry 54");
    assert_eq!(records.last().unwrap().name, "entry 5");
}

#[test]
fn file_backed_tracker_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let time = test_time();
    let limits = ValidationLimits::default();

    let id = {
        let store = FileStore::open(&path, 50).unwrap();
        let mut tracker = InvestmentTracker::new(Box::new(store), limits);
        let record = tracker
            .add_investment(NewInvestment::parse("Pension", "2500.50", "1.5", "2024-02-01", &limits).unwrap(), &time)
            .unwrap();
        tracker.calculate(record.id, date(2025, 2, 1), &time).unwrap();
        record.id
    };

    let store = FileStore::open(&path, 50).unwrap();
    let reloaded = store.get(id).unwrap().unwrap();
    assert_eq!(reloaded.name, "Pension");
    assert_eq!(reloaded.principal, money("2500.50"));
    let calc = reloaded.calculation.unwrap();
    assert_eq!(calc.month_count, dec!(12));
    assert_eq!(calc.interest.simple_interest, money("450.09"));
}
