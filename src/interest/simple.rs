use rust_decimal::Decimal;

use crate::decimal::{Money, MonthlyRate};
use crate::errors::{Result, TrackerError};

/// principal × rate × months, unrounded
pub fn simple_interest(principal: Money, rate: MonthlyRate, months: Decimal) -> Result<Decimal> {
    principal
        .as_decimal()
        .checked_mul(rate.as_fraction())
        .and_then(|per_month| per_month.checked_mul(months))
        .ok_or_else(|| TrackerError::CalculationError {
            message: format!(
                "simple interest overflow: principal {}, rate {}, months {}",
                principal, rate, months
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_linear_in_time() {
        let principal = Money::from_major(10_000);
        let rate = MonthlyRate::from_percentage(5);

        assert_eq!(simple_interest(principal, rate, dec!(1)).unwrap(), dec!(500));
        assert_eq!(simple_interest(principal, rate, dec!(3)).unwrap(), dec!(1500));
        assert_eq!(simple_interest(principal, rate, dec!(0.5)).unwrap(), dec!(250));
    }

    #[test]
    fn test_zero_rate() {
        let interest = simple_interest(Money::from_major(500), MonthlyRate::ZERO, dec!(12)).unwrap();
        assert!(interest.is_zero());
    }

    #[test]
    fn test_overflow_is_an_error() {
        let principal = Money::from_decimal(Decimal::MAX / dec!(1000));
        let rate = MonthlyRate::from_percentage(1000);

        let err = simple_interest(principal, rate, dec!(1000)).unwrap_err();
        assert!(matches!(err, TrackerError::CalculationError { .. }));
    }
}
