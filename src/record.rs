use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, MonthlyRate};
use crate::errors::Result;
use crate::interest::{compute_interest, resolve_period, InterestResult};
use crate::types::{investment_id_at, InvestmentId, InvestmentStatus};
use crate::validation::NewInvestment;

/// end date plus every field derived from it; present or absent as one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub end_date: NaiveDate,
    pub month_count: Decimal,
    #[serde(flatten)]
    pub interest: InterestResult,
}

impl Calculation {
    /// resolve the period and run the interest engine, without touching any record
    pub fn compute(
        principal: Money,
        monthly_rate: MonthlyRate,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self> {
        let month_count = resolve_period(start_date, end_date)?;
        let interest = compute_interest(principal, monthly_rate, month_count)?;

        Ok(Self {
            end_date,
            month_count,
            interest,
        })
    }
}

/// one investment entry in the history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecord {
    pub id: InvestmentId,
    pub name: String,
    pub principal: Money,
    pub monthly_rate: MonthlyRate,
    pub start_date: NaiveDate,
    pub calculation: Option<Calculation>,
    pub created_at: DateTime<Utc>,
    /// creation time until the first calculation, then the latest calculation time
    pub calculated_at: DateTime<Utc>,
}

impl InvestmentRecord {
    /// create a record in the `Created` state
    pub fn create(new: NewInvestment, time_provider: &SafeTimeProvider) -> Self {
        let now = time_provider.now();
        Self {
            id: investment_id_at(now),
            name: new.name,
            principal: new.principal,
            monthly_rate: new.monthly_rate,
            start_date: new.start_date,
            calculation: None,
            created_at: now,
            calculated_at: now,
        }
    }

    pub fn status(&self) -> InvestmentStatus {
        match self.calculation {
            Some(_) => InvestmentStatus::Calculated,
            None => InvestmentStatus::Created,
        }
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.calculation.map(|c| c.end_date)
    }

    pub fn interest(&self) -> Option<InterestResult> {
        self.calculation.map(|c| c.interest)
    }

    /// supply an end date and (re)compute every derived field.
    ///
    /// On any error the record is left exactly as it was.
    pub fn calculate(
        &mut self,
        end_date: NaiveDate,
        time_provider: &SafeTimeProvider,
    ) -> Result<&Calculation> {
        let calculation = Calculation::compute(
            self.principal,
            self.monthly_rate,
            self.start_date,
            end_date,
        )?;

        self.calculated_at = time_provider.now();
        Ok(&*self.calculation.insert(calculation))
    }
}
