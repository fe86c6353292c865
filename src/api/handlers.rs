use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiResult;
use super::{with_tracker, AppState};
use crate::errors::ValidationError;
use crate::interest::InterestResult;
use crate::record::InvestmentRecord;
use crate::types::{InvestmentId, ValidationField};
use crate::validation::{parse_calendar_date, parse_principal, parse_rate, NewInvestment, ValidationLimits};

/// numeric fields are taken as raw json so that strings like "ten" surface
/// as field validation errors
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvestmentRequest {
    pub name: Option<String>,
    pub principal: Option<Value>,
    #[serde(alias = "monthlyRate")]
    pub rate: Option<Value>,
    pub start_date: Option<String>,
}

impl CreateInvestmentRequest {
    fn validate(self, limits: &ValidationLimits) -> Result<NewInvestment, ValidationError> {
        let name = self.name.ok_or(ValidationError::MissingName)?;
        let principal = decimal_field(self.principal, parse_principal)?;
        let rate = decimal_field(self.rate, parse_rate)?;
        let start_date = required_date(self.start_date, ValidationField::StartDate)?;
        NewInvestment::new(&name, principal, rate, start_date, limits)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub principal: Option<Value>,
    #[serde(alias = "monthlyRate")]
    pub rate: Option<Value>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub months: Decimal,
    #[serde(flatten)]
    pub interest: InterestResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub cleared: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub csv_data: String,
}

/// json numbers and numeric strings both parse; anything else is invalid
fn decimal_field(
    value: Option<Value>,
    parse: fn(&str) -> Result<Decimal, ValidationError>,
) -> Result<Decimal, ValidationError> {
    match value {
        None | Some(Value::Null) => parse(""),
        Some(Value::String(s)) => parse(&s),
        Some(other) => parse(&other.to_string()),
    }
}

fn required_date(input: Option<String>, field: ValidationField) -> Result<NaiveDate, ValidationError> {
    match input {
        Some(raw) => parse_calendar_date(&raw, field),
        None => Err(ValidationError::MissingDate { field }),
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn list_investments(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<InvestmentRecord>>> {
    let records = with_tracker(state, |tracker| Ok(tracker.list()?)).await?;
    Ok(Json(records))
}

pub async fn create_investment(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateInvestmentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<InvestmentRecord>)> {
    let Json(body) = body?;
    let record = with_tracker(state, move |tracker| {
        let new = body.validate(tracker.limits())?;
        let time = SafeTimeProvider::new(TimeSource::System);
        Ok(tracker.add_investment(new, &time)?)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_investment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<InvestmentId>,
) -> ApiResult<Json<InvestmentRecord>> {
    let record = with_tracker(state, move |tracker| Ok(tracker.get(id)?)).await?;
    Ok(Json(record))
}

pub async fn calculate_investment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<InvestmentId>,
    body: Result<Json<CalculateRequest>, JsonRejection>,
) -> ApiResult<Json<InvestmentRecord>> {
    let Json(body) = body?;
    let end_date = required_date(body.end_date, ValidationField::EndDate)?;
    let record = with_tracker(state, move |tracker| {
        let time = SafeTimeProvider::new(TimeSource::System);
        Ok(tracker.calculate(id, end_date, &time)?)
    })
    .await?;
    Ok(Json(record))
}

pub async fn delete_investment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<InvestmentId>,
) -> ApiResult<StatusCode> {
    with_tracker(state, move |tracker| Ok(tracker.delete(id)?)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn clear_investments(State(state): State<Arc<AppState>>) -> ApiResult<Json<ClearResponse>> {
    let cleared = with_tracker(state, |tracker| Ok(tracker.clear()?)).await?;
    Ok(Json(ClearResponse { cleared }))
}

pub async fn quote(
    State(state): State<Arc<AppState>>,
    body: Result<Json<QuoteRequest>, JsonRejection>,
) -> ApiResult<Json<QuoteResponse>> {
    let Json(body) = body?;
    let principal = decimal_field(body.principal, parse_principal)?;
    let rate = decimal_field(body.rate, parse_rate)?;
    let start_date = required_date(body.start_date, ValidationField::StartDate)?;
    let end_date = required_date(body.end_date, ValidationField::EndDate)?;

    let calc = with_tracker(state, move |tracker| {
        Ok(tracker.quote(principal, rate, start_date, end_date)?)
    })
    .await?;
    Ok(Json(QuoteResponse {
        start_date,
        end_date: calc.end_date,
        months: calc.month_count,
        interest: calc.interest,
    }))
}

pub async fn export(State(state): State<Arc<AppState>>) -> ApiResult<Json<ExportResponse>> {
    let csv_data = with_tracker(state, |tracker| Ok(tracker.export_csv()?)).await?;
    Ok(Json(ExportResponse { csv_data }))
}
