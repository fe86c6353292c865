pub mod compound;
pub mod period;
pub mod simple;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, MonthlyRate};
use crate::errors::{Result, TrackerError};

pub use compound::{compound_interest, growth_factor};
pub use period::{month_span, raw_month_span, resolve_period, DAYS_PER_MONTH};
pub use simple::simple_interest;

/// simple and compound interest over a month span, each rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestResult {
    pub simple_interest: Money,
    pub compound_interest: Money,
    pub total_simple: Money,
    pub total_compound: Money,
}

/// compute both interest kinds for a validated principal, rate and positive month span.
///
/// All four outputs are computed at full precision and rounded to cents
/// independently; the rounded values are what get persisted and displayed.
/// Callers must reject `months <= 0` beforehand (see [`resolve_period`]).
pub fn compute_interest(principal: Money, rate: MonthlyRate, months: Decimal) -> Result<InterestResult> {
    let simple = simple_interest(principal, rate, months)?;
    let compound = compound_interest(principal, rate, months)?;

    let total = |interest: Decimal| {
        principal
            .as_decimal()
            .checked_add(interest)
            .map(Money::from_decimal)
            .ok_or_else(|| TrackerError::CalculationError {
                message: format!("total overflow: principal {}, interest {}", principal, interest),
            })
    };

    Ok(InterestResult {
        simple_interest: Money::from_decimal(simple),
        compound_interest: Money::from_decimal(compound),
        total_simple: total(simple)?,
        total_compound: total(compound)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_three_months_at_five_percent() {
        let result = compute_interest(
            Money::from_major(10_000),
            MonthlyRate::from_percentage(5),
            dec!(3),
        )
        .unwrap();

        assert_eq!(result.simple_interest, Money::from_str_exact("1500.00").unwrap());
        assert_eq!(result.total_simple, Money::from_str_exact("11500.00").unwrap());
        assert_eq!(result.compound_interest, Money::from_str_exact("1576.25").unwrap());
        assert_eq!(result.total_compound, Money::from_str_exact("11576.25").unwrap());
    }

    #[test]
    fn test_outputs_rounded_to_cents() {
        // 1234.56 * 0.0175 * 1.5 = 32.40720
        let result = compute_interest(
            Money::from_str_exact("1234.56").unwrap(),
            MonthlyRate::from_percent(dec!(1.75)),
            dec!(1.5),
        )
        .unwrap();

        assert_eq!(result.simple_interest.to_string(), "32.41");
        assert_eq!(result.total_simple.to_string(), "1266.97");
        assert_eq!(result.compound_interest.as_decimal().scale(), 2);
        assert_eq!(result.total_compound.as_decimal().scale(), 2);
    }

    #[test]
    fn test_totals_agree_with_rounded_interest() {
        let principal = Money::from_str_exact("2500.10").unwrap();
        let result = compute_interest(principal, MonthlyRate::from_percent(dec!(3.3)), dec!(7.4)).unwrap();

        assert_eq!(result.total_simple, Money::from_decimal(principal.as_decimal() + result.simple_interest.as_decimal()));
        assert_eq!(result.total_compound, Money::from_decimal(principal.as_decimal() + result.compound_interest.as_decimal()));
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let principal = Money::from_major(8_000);
        let rate = MonthlyRate::from_percent(dec!(2.25));

        let first = compute_interest(principal, rate, dec!(4.2)).unwrap();
        let second = compute_interest(principal, rate, dec!(4.2)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_rate_totals_equal_principal() {
        let principal = Money::from_major(1_000);
        let result = compute_interest(principal, MonthlyRate::ZERO, dec!(6)).unwrap();

        assert!(result.simple_interest.is_zero());
        assert!(result.compound_interest.is_zero());
        assert_eq!(result.total_simple, principal);
        assert_eq!(result.total_compound, principal);
    }

    #[test]
    fn test_serializes_camel_case() {
        let result = compute_interest(
            Money::from_major(10_000),
            MonthlyRate::from_percentage(5),
            dec!(3),
        )
        .unwrap();

        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["simpleInterest"], "1500.00");
        assert_eq!(json["totalCompound"], "11576.25");
    }
}
