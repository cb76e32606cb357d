//! Route handlers.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use slotwatch_domain::{AnalysisReport, Result, StatsSnapshot};

use super::error::ApiResult;
use crate::utils::logging::log_request_outcome;
use crate::AppContext;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct PersonQuery {
    pub person: Option<String>,
}

/// Window bounds are `YYYY-MM-DD` dates in the reporting timezone.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub person: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Public view of a team member. Credentials never leave the process.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamEntry {
    pub key: String,
    pub name: String,
    pub has_calendly: bool,
    pub has_zoom: bool,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "slotwatch",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/stats
pub async fn stats(State(ctx): State<AppContext>) -> ApiResult<Json<Option<StatsSnapshot>>> {
    let started = Instant::now();
    let result = ctx.service.get_snapshot().await;
    finish("/api/stats", started, result)
}

/// GET /api/report
pub async fn report(
    State(ctx): State<AppContext>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<AnalysisReport>> {
    let started = Instant::now();
    let result = ctx
        .service
        .run_windowed_analysis(query.person.as_deref(), query.start, query.end)
        .await;
    finish("/api/report", started, result)
}

/// POST /api/analysis
pub async fn run_analysis(
    State(ctx): State<AppContext>,
    Query(query): Query<PersonQuery>,
) -> ApiResult<Json<AnalysisReport>> {
    let started = Instant::now();
    let result = ctx.service.run_full_analysis(query.person.as_deref()).await;
    finish("/api/analysis", started, result)
}

/// POST /api/summary
pub async fn send_summary(
    State(ctx): State<AppContext>,
    Query(query): Query<PersonQuery>,
) -> ApiResult<Json<AnalysisReport>> {
    let started = Instant::now();
    let result = ctx.service.send_daily_summary(query.person.as_deref()).await;
    finish("/api/summary", started, result)
}

/// GET /api/team
pub async fn team(State(ctx): State<AppContext>) -> Json<Vec<TeamEntry>> {
    let entries = ctx
        .service
        .team()
        .members()
        .iter()
        .map(|m| TeamEntry {
            key: m.key.clone(),
            name: m.name.clone(),
            has_calendly: m.calendly.is_some(),
            has_zoom: m.zoom.is_some(),
        })
        .collect();
    Json(entries)
}

fn finish<T>(route: &str, started: Instant, result: Result<T>) -> ApiResult<Json<T>> {
    log_request_outcome(route, started.elapsed(), result.as_ref().err());
    Ok(Json(result?))
}
