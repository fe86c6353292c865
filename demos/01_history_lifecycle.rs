/// history lifecycle - create, calculate, recalculate, export
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use interest_tracker_rs::{
    InvestmentTracker, MemoryStore, NewInvestment, SafeTimeProvider, TimeSource, TrackerError, ValidationLimits,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== history lifecycle example ===\n");

    // controlled time keeps ids and timestamps reproducible
    let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()));
    let controller = time.test_control().unwrap();

    let limits = ValidationLimits::default();
    let mut tracker = InvestmentTracker::new(Box::new(MemoryStore::new(50)), limits);

    let savings = tracker.add_investment(
        NewInvestment::parse("Savings", "10000", "5", "2024-01-01", &limits)?,
        &time,
    )?;
    println!("created {} ({:?})", savings.name, savings.status());

    // a too-short period is rejected and the record stays as it was
    match tracker.calculate(savings.id, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), &time) {
        Err(TrackerError::PeriodTooShort { months, .. }) => println!("rejected: {} months", months),
        other => println!("unexpected: {:?}", other),
    }

    controller.advance(Duration::days(90));
    let quarter = tracker.calculate(savings.id, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), &time)?;
    if let Some(interest) = quarter.interest() {
        println!("after 3 months: simple {} / compound {}", interest.total_simple, interest.total_compound);
    }

    // supplying a new end date replaces the derived fields
    controller.advance(Duration::days(90));
    let half = tracker.calculate(savings.id, NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(), &time)?;
    if let Some(interest) = half.interest() {
        println!("after 6 months: simple {} / compound {}", interest.total_simple, interest.total_compound);
    }

    tracker.add_investment(
        NewInvestment::parse("Bond", "2500", "0.75", "2024-02-15", &limits)?,
        &time,
    )?;

    println!("\n{}", tracker.export_csv()?);
    println!("cleared {} records", tracker.clear()?);

    Ok(())
}
