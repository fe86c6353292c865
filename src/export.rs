use chrono::SecondsFormat;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::{Result, TrackerError};
use crate::record::InvestmentRecord;

/// column order of the history export
pub const CSV_HEADERS: [&str; 11] = [
    "Name",
    "Principal",
    "Rate (% per month)",
    "Start Date",
    "End Date",
    "Months",
    "Simple Interest",
    "Compound Interest",
    "Total (Simple)",
    "Total (Compound)",
    "Calculation Date",
];

/// month count at two decimals, rounded half away from zero
pub fn format_months(months: Decimal) -> String {
    format!("{:.2}", months.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

fn csv_row(record: &InvestmentRecord) -> [String; 11] {
    let (end_date, months, simple, compound, total_simple, total_compound) = match &record.calculation {
        Some(calc) => (
            calc.end_date.to_string(),
            format_months(calc.month_count),
            calc.interest.simple_interest.to_string(),
            calc.interest.compound_interest.to_string(),
            calc.interest.total_simple.to_string(),
            calc.interest.total_compound.to_string(),
        ),
        None => Default::default(),
    };

    [
        record.name.clone(),
        record.principal.to_string(),
        record.monthly_rate.to_string(),
        record.start_date.to_string(),
        end_date,
        months,
        simple,
        compound,
        total_simple,
        total_compound,
        record.calculated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    ]
}

/// write the history as csv, header first, rows in the given order
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<()>
where
    W: std::io::Write,
    I: IntoIterator<Item = &'a InvestmentRecord>,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADERS)?;
    for record in records {
        csv.write_record(csv_row(record))?;
    }
    csv.flush()?;
    Ok(())
}

/// render the history as a csv string
pub fn to_csv_string<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a InvestmentRecord>,
{
    let mut buf = Vec::new();
    write_csv(&mut buf, records)?;
    String::from_utf8(buf).map_err(|e| TrackerError::Export {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{NewInvestment, ValidationLimits};
    use chrono::{NaiveDate, TimeZone, Utc};
    use hourglass_rs::{SafeTimeProvider, TimeSource};
    use rust_decimal_macros::dec;

    fn time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 4, 1, 10, 30, 0).unwrap()))
    }

    fn record(name: &str, time: &SafeTimeProvider) -> InvestmentRecord {
        let new = NewInvestment::new(
            name,
            dec!(10000),
            dec!(5),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            &ValidationLimits::default(),
        )
        .unwrap();
        InvestmentRecord::create(new, time)
    }

    #[test]
    fn test_header_order() {
        let csv = to_csv_string(std::iter::empty()).unwrap();
        assert_eq!(
            csv.trim_end(),
            "Name,Principal,Rate (% per month),Start Date,End Date,Months,Simple Interest,\
             Compound Interest,Total (Simple),Total (Compound),Calculation Date"
        );
    }

    #[test]
    fn test_calculated_row() {
        let time = time();
        let mut rec = record("Savings", &time);
        rec.calculate(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), &time).unwrap();

        let csv = to_csv_string([&rec]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "Savings,10000.00,5%/month,2024-01-01,2024-04-01,3.00,1500.00,1576.25,11500.00,11576.25,2024-04-01T10:30:00Z"
        );
    }

    #[test]
    fn test_months_column_rounds() {
        let time = time();
        let new = NewInvestment::new(
            "x",
            dec!(1000),
            dec!(1),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            &ValidationLimits::default(),
        )
        .unwrap();
        let mut rec = InvestmentRecord::create(new, &time);
        rec.calculate(NaiveDate::from_ymd_opt(2024, 3, 30).unwrap(), &time).unwrap();

        let csv = to_csv_string([&rec]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("x,1000.00,1%/month,2024-01-01,2024-03-30,2.97,29.67,"), "{}", row);
        assert_eq!(format_months(dec!(1.5366666)), "1.54");
        assert_eq!(format_months(dec!(3)), "3.00");
    }

    #[test]
    fn test_uncalculated_row_leaves_derived_columns_empty() {
        let time = time();
        let rec = record("Pending", &time);

        let csv = to_csv_string([&rec]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "Pending,10000.00,5%/month,2024-01-01,,,,,,,2024-04-01T10:30:00Z");
    }

    #[test]
    fn test_names_with_commas_are_quoted() {
        let time = time();
        let rec = record("Smith, J.", &time);

        let csv = to_csv_string([&rec]).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("\"Smith, J.\","));
    }
}
