use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::{NoContext, Timestamp, Uuid};

/// unique identifier for an investment record
pub type InvestmentId = Uuid;

/// build a time-ordered identifier from the record's creation instant
pub fn investment_id_at(created_at: DateTime<Utc>) -> InvestmentId {
    let seconds = u64::try_from(created_at.timestamp()).unwrap_or(0);
    let ts = Timestamp::from_unix(NoContext, seconds, created_at.timestamp_subsec_nanos());
    Uuid::new_v7(ts)
}

/// lifecycle status of an investment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentStatus {
    /// principal, rate and start date recorded, no end date yet
    Created,
    /// end date supplied and all derived fields computed
    Calculated,
}

/// input field a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationField {
    Name,
    Principal,
    MonthlyRate,
    StartDate,
    EndDate,
}

impl fmt::Display for ValidationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationField::Name => "name",
            ValidationField::Principal => "principal",
            ValidationField::MonthlyRate => "monthly rate",
            ValidationField::StartDate => "start date",
            ValidationField::EndDate => "end date",
        };
        f.write_str(name)
    }
}
