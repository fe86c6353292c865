use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{InvestmentId, ValidationField};

/// rejected user input, raised before any calculation is attempted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,

    #[error("name exceeds {max} characters")]
    NameTooLong {
        max: usize,
    },

    #[error("principal is required")]
    MissingPrincipal,

    #[error("invalid principal: {input}")]
    InvalidPrincipal {
        input: String,
    },

    #[error("principal must be positive: {principal}")]
    NonPositivePrincipal {
        principal: Decimal,
    },

    #[error("principal below minimum: minimum {minimum}, provided {principal}")]
    PrincipalBelowMinimum {
        minimum: Decimal,
        principal: Decimal,
    },

    #[error("monthly rate is required")]
    MissingRate,

    #[error("invalid monthly rate: {input}")]
    InvalidRate {
        input: String,
    },

    #[error("monthly rate cannot be negative: {rate}")]
    NegativeRate {
        rate: Decimal,
    },

    #[error("monthly rate above maximum: maximum {maximum}, provided {rate}")]
    RateAboveMaximum {
        maximum: Decimal,
        rate: Decimal,
    },

    #[error("{field} is required")]
    MissingDate {
        field: ValidationField,
    },

    #[error("invalid {field}: {input}")]
    InvalidDate {
        field: ValidationField,
        input: String,
    },
}

impl ValidationError {
    /// the input field that failed
    pub fn field(&self) -> ValidationField {
        match self {
            ValidationError::MissingName | ValidationError::NameTooLong { .. } => {
                ValidationField::Name
            }
            ValidationError::MissingPrincipal
            | ValidationError::InvalidPrincipal { .. }
            | ValidationError::NonPositivePrincipal { .. }
            | ValidationError::PrincipalBelowMinimum { .. } => ValidationField::Principal,
            ValidationError::MissingRate
            | ValidationError::InvalidRate { .. }
            | ValidationError::NegativeRate { .. }
            | ValidationError::RateAboveMaximum { .. } => ValidationField::MonthlyRate,
            ValidationError::MissingDate { field } | ValidationError::InvalidDate { field, .. } => {
                *field
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("period too short: {months} months between {start} and {end}")]
    PeriodTooShort {
        start: NaiveDate,
        end: NaiveDate,
        months: Decimal,
    },

    #[error("end date {end} is before start date {start}")]
    InvertedRange {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("investment not found: {id}")]
    InvestmentNotFound {
        id: InvestmentId,
    },

    #[error("investment already exists: {id}")]
    DuplicateInvestment {
        id: InvestmentId,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("persistence error: {message}")]
    Persistence {
        message: String,
    },

    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("export error: {message}")]
    Export {
        message: String,
    },
}

impl TrackerError {
    /// storage or network failure from the persistence collaborator
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            TrackerError::Persistence { .. } | TrackerError::Io(_) | TrackerError::Serialization(_)
        )
    }
}

impl From<csv::Error> for TrackerError {
    fn from(err: csv::Error) -> Self {
        TrackerError::Export {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validation_error_names_field() {
        let err = ValidationError::NonPositivePrincipal { principal: dec!(0) };
        assert_eq!(err.field(), ValidationField::Principal);

        let err = ValidationError::InvalidDate {
            field: ValidationField::EndDate,
            input: "tomorrow".to_string(),
        };
        assert_eq!(err.field(), ValidationField::EndDate);
        assert_eq!(err.to_string(), "invalid end date: tomorrow");
    }

    #[test]
    fn test_persistence_classification() {
        let io = TrackerError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(io.is_persistence());
        assert!(!TrackerError::from(ValidationError::MissingName).is_persistence());
    }
}
