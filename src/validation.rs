use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, MonthlyRate};
use crate::errors::ValidationError;
use crate::types::ValidationField;

pub const MAX_NAME_LEN: usize = 255;

/// bounds applied to creation input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationLimits {
    pub min_principal: Decimal,
    pub max_monthly_rate: Decimal,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_principal: dec!(0.01),
            max_monthly_rate: dec!(1000),
        }
    }
}

/// creation input for an investment record, validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub name: String,
    pub principal: Money,
    pub monthly_rate: MonthlyRate,
    pub start_date: NaiveDate,
}

impl NewInvestment {
    /// validate typed values
    pub fn new(
        name: &str,
        principal: Decimal,
        monthly_rate: Decimal,
        start_date: NaiveDate,
        limits: &ValidationLimits,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name(name)?,
            principal: validate_principal(principal, limits)?,
            monthly_rate: validate_rate(monthly_rate, limits)?,
            start_date,
        })
    }

    /// validate raw text input, e.g. form fields or cli arguments
    pub fn parse(
        name: &str,
        principal: &str,
        monthly_rate: &str,
        start_date: &str,
        limits: &ValidationLimits,
    ) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        let principal = parse_principal(principal)?;
        let monthly_rate = parse_rate(monthly_rate)?;
        let start_date = parse_calendar_date(start_date, ValidationField::StartDate)?;

        Ok(Self {
            name,
            principal: validate_principal(principal, limits)?,
            monthly_rate: validate_rate(monthly_rate, limits)?,
            start_date,
        })
    }
}

/// parse principal text; bounds are checked by [`validate_principal`]
pub fn parse_principal(input: &str) -> Result<Decimal, ValidationError> {
    parse_decimal(input).ok_or_else(|| match input.trim() {
        "" => ValidationError::MissingPrincipal,
        other => ValidationError::InvalidPrincipal {
            input: other.to_string(),
        },
    })
}

/// parse monthly rate text; bounds are checked by [`validate_rate`]
pub fn parse_rate(input: &str) -> Result<Decimal, ValidationError> {
    parse_decimal(input).ok_or_else(|| match input.trim() {
        "" => ValidationError::MissingRate,
        other => ValidationError::InvalidRate {
            input: other.to_string(),
        },
    })
}

fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str_exact(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong { max: MAX_NAME_LEN });
    }
    Ok(trimmed.to_string())
}

pub fn validate_principal(principal: Decimal, limits: &ValidationLimits) -> Result<Money, ValidationError> {
    if principal <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrincipal { principal });
    }
    if principal < limits.min_principal {
        return Err(ValidationError::PrincipalBelowMinimum {
            minimum: limits.min_principal,
            principal,
        });
    }
    Ok(Money::from_decimal(principal))
}

pub fn validate_rate(rate: Decimal, limits: &ValidationLimits) -> Result<MonthlyRate, ValidationError> {
    if rate < Decimal::ZERO {
        return Err(ValidationError::NegativeRate { rate });
    }
    if rate > limits.max_monthly_rate {
        return Err(ValidationError::RateAboveMaximum {
            maximum: limits.max_monthly_rate,
            rate,
        });
    }
    Ok(MonthlyRate::from_percent(rate))
}

/// parse a calendar date, discarding any time-of-day component.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_calendar_date(input: &str, field: ValidationField) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingDate { field });
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt.date());
        }
    }

    Err(ValidationError::InvalidDate {
        field,
        input: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ValidationLimits {
        ValidationLimits::default()
    }

    #[test]
    fn test_parse_valid_input() {
        let new = NewInvestment::parse(" Savings ", "10000", "5", "2024-01-01", &limits()).unwrap();

        assert_eq!(new.name, "Savings");
        assert_eq!(new.principal, Money::from_major(10_000));
        assert_eq!(new.monthly_rate, MonthlyRate::from_percentage(5));
        assert_eq!(new.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_zero_principal_rejected() {
        let err = NewInvestment::parse("Savings", "0", "5", "2024-01-01", &limits()).unwrap_err();
        assert_eq!(err, ValidationError::NonPositivePrincipal { principal: Decimal::ZERO });
        assert_eq!(err.field(), ValidationField::Principal);
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        let l = limits();

        assert_eq!(
            NewInvestment::parse("  ", "100", "5", "2024-01-01", &l).unwrap_err(),
            ValidationError::MissingName
        );
        assert_eq!(
            NewInvestment::parse("a", "", "5", "2024-01-01", &l).unwrap_err(),
            ValidationError::MissingPrincipal
        );
        assert_eq!(
            NewInvestment::parse("a", "ten", "5", "2024-01-01", &l).unwrap_err(),
            ValidationError::InvalidPrincipal { input: "ten".to_string() }
        );
        assert_eq!(
            NewInvestment::parse("a", "100", "NaN", "2024-01-01", &l).unwrap_err(),
            ValidationError::InvalidRate { input: "NaN".to_string() }
        );
        assert_eq!(
            NewInvestment::parse("a", "100", "5", "", &l).unwrap_err(),
            ValidationError::MissingDate { field: ValidationField::StartDate }
        );
        assert_eq!(
            NewInvestment::parse("a", "100", "5", "2024-02-30", &l).unwrap_err(),
            ValidationError::InvalidDate {
                field: ValidationField::StartDate,
                input: "2024-02-30".to_string(),
            }
        );
    }

    #[test]
    fn test_rate_bounds() {
        let l = limits();

        let err = NewInvestment::new("a", dec!(100), dec!(-0.5), NaiveDate::MIN, &l).unwrap_err();
        assert_eq!(err, ValidationError::NegativeRate { rate: dec!(-0.5) });

        let err = NewInvestment::new("a", dec!(100), dec!(1000.01), NaiveDate::MIN, &l).unwrap_err();
        assert_eq!(err.field(), ValidationField::MonthlyRate);

        // zero rate is allowed
        assert!(NewInvestment::new("a", dec!(100), Decimal::ZERO, NaiveDate::MIN, &l).is_ok());
    }

    #[test]
    fn test_principal_minimum() {
        let err = NewInvestment::new("a", dec!(0.001), dec!(1), NaiveDate::MIN, &limits()).unwrap_err();
        assert!(matches!(err, ValidationError::PrincipalBelowMinimum { .. }));
    }

    #[test]
    fn test_name_length() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        let err = NewInvestment::new(&long, dec!(100), dec!(1), NaiveDate::MIN, &limits()).unwrap_err();
        assert_eq!(err, ValidationError::NameTooLong { max: MAX_NAME_LEN });
    }

    #[test]
    fn test_dates_ignore_time_of_day() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let field = ValidationField::EndDate;

        assert_eq!(parse_calendar_date("2024-03-15", field).unwrap(), expected);
        assert_eq!(parse_calendar_date("2024-03-15T23:59:59Z", field).unwrap(), expected);
        assert_eq!(parse_calendar_date("2024-03-15T08:30:00+05:30", field).unwrap(), expected);
        assert_eq!(parse_calendar_date("2024-03-15T08:30:00.250", field).unwrap(), expected);
        assert_eq!(parse_calendar_date("2024-03-15 08:30:00", field).unwrap(), expected);
    }
}
