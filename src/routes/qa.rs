//! Dashboard data routes: tests, reports, stats, simulated runs.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::qa::{Labeled, QaTest, Report, TestStatus, fixtures, format_duration};
use crate::services::dashboard::{self, DashboardStats};
use crate::services::test_runs::{RunError, RunStart};
use crate::state::AppState;

/// A test as the dashboard renders it: the record plus display labels and
/// the live running overlay.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestView {
    #[serde(flatten)]
    pub test: QaTest,
    pub type_label: &'static str,
    pub status_label: &'static str,
    pub priority_label: &'static str,
    pub environment_label: &'static str,
    pub duration_label: String,
    pub running: bool,
}

fn to_view(test: &QaTest, running: bool) -> TestView {
    TestView {
        test: test.clone(),
        type_label: test.kind.label(),
        status_label: test.status.label(),
        priority_label: test.priority.label(),
        environment_label: test.environment.label(),
        duration_label: format_duration(test.duration_secs),
        running,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    #[serde(flatten)]
    pub report: Report,
    pub kind_label: &'static str,
    pub status_label: &'static str,
    /// Passed over executed (passed + failed), 0 when nothing ran.
    pub pass_rate: u32,
}

fn to_report_view(report: &Report) -> ReportView {
    let executed = report.passed + report.failed;
    let pass_rate = if executed == 0 { 0 } else { report.passed * 100 / executed };
    ReportView {
        report: report.clone(),
        kind_label: report.kind.label(),
        status_label: report.status.label(),
        pass_rate,
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TestFilter {
    /// Status code (`failed`) or Arabic label (`فشل`).
    pub status: Option<String>,
}

/// `GET /api/tests`: list tests, optionally filtered by status.
pub async fn list_tests(
    State(state): State<AppState>,
    Query(filter): Query<TestFilter>,
) -> Result<Json<Vec<TestView>>, StatusCode> {
    let status = match filter.status.as_deref() {
        Some(raw) => Some(TestStatus::parse(raw).map_err(|_| StatusCode::BAD_REQUEST)?),
        None => None,
    };

    let views = fixtures::tests()
        .iter()
        .filter(|t| status.is_none_or(|s| t.status == s))
        .map(|t| to_view(t, state.runs.is_running(t.id)))
        .collect();
    Ok(Json(views))
}

/// `GET /api/tests/:id`: one test.
pub async fn get_test(State(state): State<AppState>, Path(id): Path<u32>) -> Result<Json<TestView>, StatusCode> {
    let test = fixtures::find_test(id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(to_view(test, state.runs.is_running(id))))
}

/// `POST /api/tests/:id/run`: start a simulated run.
pub async fn run_test(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<(StatusCode, Json<RunStart>), StatusCode> {
    let started = state.runs.start(id).map_err(run_error_to_status)?;
    Ok((StatusCode::ACCEPTED, Json(started)))
}

/// `GET /api/reports`: list reports.
pub async fn list_reports() -> Json<Vec<ReportView>> {
    Json(fixtures::reports().iter().map(to_report_view).collect())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: DashboardStats,
    pub generated_at: DateTime<Utc>,
}

/// `GET /api/dashboard/stats`: summary counters.
pub async fn dashboard_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = dashboard::compute(fixtures::tests(), fixtures::reports(), state.runs.running_count());
    Json(StatsResponse { stats, generated_at: Utc::now() })
}

pub(crate) fn run_error_to_status(err: RunError) -> StatusCode {
    match err {
        RunError::UnknownTest(_) => StatusCode::NOT_FOUND,
    }
}

#[cfg(test)]
#[path = "qa_test.rs"]
mod tests;
