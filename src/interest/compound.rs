use rust_decimal::{Decimal, MathematicalOps};

use crate::decimal::{Money, MonthlyRate};
use crate::errors::{Result, TrackerError};

/// (1 + rate)^months, compounding once per unit of month span.
///
/// Fractional month counts use real exponentiation. Integer counts are exact.
pub fn growth_factor(rate: MonthlyRate, months: Decimal) -> Result<Decimal> {
    let base = Decimal::ONE + rate.as_fraction();
    base.checked_powd(months)
        .ok_or_else(|| TrackerError::CalculationError {
            message: format!("compound growth overflow: rate {}, months {}", rate, months),
        })
}

/// principal × ((1 + rate)^months − 1), unrounded
pub fn compound_interest(principal: Money, rate: MonthlyRate, months: Decimal) -> Result<Decimal> {
    let factor = growth_factor(rate, months)?;
    principal
        .as_decimal()
        .checked_mul(factor - Decimal::ONE)
        .ok_or_else(|| TrackerError::CalculationError {
            message: format!(
                "compound interest overflow: principal {}, rate {}, months {}",
                principal, rate, months
            ),
        })
}
