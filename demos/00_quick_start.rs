/// quick start - one interest calculation, nothing stored
use interest_tracker_rs::chrono::NaiveDate;
use interest_tracker_rs::{Calculation, Money, MonthlyRate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $10,000 at 5% per month over a quarter
    let calc = Calculation::compute(
        Money::from_major(10_000),
        MonthlyRate::from_percentage(5),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
    )?;

    println!("months:            {}", calc.month_count);
    println!("simple interest:   {}", calc.interest.simple_interest);
    println!("compound interest: {}", calc.interest.compound_interest);
    println!("{}", serde_json::to_string_pretty(&calc)?);

    Ok(())
}
