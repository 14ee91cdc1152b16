//! Dashboard summary computed from the fixture datasets.

use serde::Serialize;

use crate::qa::{QaTest, Report, ReportStatus, TestStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_tests: usize,
    pub completed: usize,
    pub running: usize,
    pub failed: usize,
    pub pending: usize,
    /// Mean of per-test success rates, rounded to one decimal.
    pub average_success: f64,
    pub total_reports: usize,
    pub ready_reports: usize,
    /// Tests with a simulated run in progress right now.
    pub active_runs: usize,
}

#[must_use]
pub fn compute(tests: &[QaTest], reports: &[Report], active_runs: usize) -> DashboardStats {
    let count = |status: TestStatus| tests.iter().filter(|t| t.status == status).count();

    let average_success = if tests.is_empty() {
        0.0
    } else {
        let sum: u32 = tests.iter().map(|t| u32::from(t.success)).sum();
        let mean = f64::from(sum) / f64::from(u32::try_from(tests.len()).unwrap_or(u32::MAX));
        (mean * 10.0).round() / 10.0
    };

    DashboardStats {
        total_tests: tests.len(),
        completed: count(TestStatus::Completed),
        running: count(TestStatus::Running),
        failed: count(TestStatus::Failed),
        pending: count(TestStatus::Pending),
        average_success,
        total_reports: reports.len(),
        ready_reports: reports
            .iter()
            .filter(|r| r.status == ReportStatus::Ready)
            .count(),
        active_runs,
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
