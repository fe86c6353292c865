use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::errors::{Result, TrackerError};
use crate::export::to_csv_string;
use crate::record::{Calculation, InvestmentRecord};
use crate::store::InvestmentStore;
use crate::types::InvestmentId;
use crate::validation::{validate_principal, validate_rate, NewInvestment, ValidationLimits};

/// application service: validation, record lifecycle and persistence around the engine
pub struct InvestmentTracker {
    store: Box<dyn InvestmentStore>,
    limits: ValidationLimits,
}

impl InvestmentTracker {
    pub fn new(store: Box<dyn InvestmentStore>, limits: ValidationLimits) -> Self {
        Self { store, limits }
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// record a new investment in the `Created` state
    pub fn add_investment(
        &mut self,
        new: NewInvestment,
        time_provider: &SafeTimeProvider,
    ) -> Result<InvestmentRecord> {
        // typed callers may bypass the parse path, so re-check against our limits
        let new = NewInvestment::new(
            &new.name,
            new.principal.as_decimal(),
            new.monthly_rate.as_percent(),
            new.start_date,
            &self.limits,
        )?;

        let record = InvestmentRecord::create(new, time_provider);
        self.store.create(record.clone())?;

        info!(
            id = %record.id,
            name = %record.name,
            principal = %record.principal,
            rate = %record.monthly_rate,
            "investment created"
        );
        Ok(record)
    }

    /// supply an end date for a stored record and persist the derived fields.
    ///
    /// Rejected requests and storage failures leave the stored record unchanged.
    pub fn calculate(
        &mut self,
        id: InvestmentId,
        end_date: NaiveDate,
        time_provider: &SafeTimeProvider,
    ) -> Result<InvestmentRecord> {
        let mut record = self
            .store
            .get(id)?
            .ok_or(TrackerError::InvestmentNotFound { id })?;

        if let Err(err) = record.calculate(end_date, time_provider) {
            warn!(id = %id, end_date = %end_date, error = %err, "calculation rejected");
            return Err(err);
        }
        self.store.update(record.clone())?;

        if let Some(calc) = &record.calculation {
            info!(
                id = %id,
                months = %calc.month_count,
                simple = %calc.interest.simple_interest,
                compound = %calc.interest.compound_interest,
                "interest calculated"
            );
        }
        Ok(record)
    }

    /// compute interest for an unsaved principal and rate, storing nothing
    pub fn quote(
        &self,
        principal: Decimal,
        monthly_rate: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Calculation> {
        let principal = validate_principal(principal, &self.limits)?;
        let monthly_rate = validate_rate(monthly_rate, &self.limits)?;
        Calculation::compute(principal, monthly_rate, start_date, end_date)
    }

    pub fn get(&self, id: InvestmentId) -> Result<InvestmentRecord> {
        self.store
            .get(id)?
            .ok_or(TrackerError::InvestmentNotFound { id })
    }

    pub fn list(&self) -> Result<Vec<InvestmentRecord>> {
        self.store.list()
    }

    pub fn delete(&mut self, id: InvestmentId) -> Result<()> {
        self.store.delete(id)?;
        info!(id = %id, "investment deleted");
        Ok(())
    }

    pub fn clear(&mut self) -> Result<usize> {
        let count = self.store.clear()?;
        info!(count, "investment history cleared");
        Ok(count)
    }

    pub fn export_csv(&self) -> Result<String> {
        let records = self.store.list()?;
        to_csv_string(&records)
    }
}
