/// file store - history persisted as json and reloaded
use chrono::NaiveDate;
use interest_tracker_rs::{
    FileStore, InvestmentStore, InvestmentTracker, NewInvestment, SafeTimeProvider, TimeSource, ValidationLimits,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join("interest-tracker-demo.json");
    let limits = ValidationLimits::default();
    let time = SafeTimeProvider::new(TimeSource::System);

    {
        // keep only the three newest entries
        let store = FileStore::open(&path, 3)?;
        let mut tracker = InvestmentTracker::new(Box::new(store), limits);
        tracker.clear()?;

        for (i, principal) in ["1000", "2000", "3000", "4000", "5000"].iter().enumerate() {
            let name = format!("deposit {}", i + 1);
            let record = tracker.add_investment(NewInvestment::parse(&name, principal, "2", "2024-01-01", &limits)?, &time)?;
            tracker.calculate(record.id, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), &time)?;
        }
    }

    let reopened = FileStore::open(&path, 3)?;
    println!("reloaded from {}", reopened.path().display());
    for record in reopened.list()? {
        let total = record.interest().map(|i| i.total_compound.to_string()).unwrap_or_default();
        println!("  {:<10} {:>10} -> {}", record.name, record.principal.to_string(), total);
    }

    std::fs::remove_file(&path)?;
    Ok(())
}
