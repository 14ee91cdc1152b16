//! QA dashboard data model.
//!
//! DESIGN
//! ======
//! Enumerated fields are real enums at this boundary. Each variant has a
//! stable ASCII code (what goes over the wire) and an Arabic label (what the
//! dashboard shows). Parsing accepts either, so payloads that still carry the
//! Arabic text as the discriminant load cleanly.

pub mod fixtures;

use chrono::{DateTime, Utc};
use serde::Serialize;

// =============================================================================
// LABELED ENUMS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownValue(pub String);

/// An enum with a wire code and a display label per variant.
pub trait Labeled: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn code(self) -> &'static str;

    fn label(self) -> &'static str;

    /// Parse a code or an Arabic label.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownValue`] if `raw` matches no variant.
    fn parse(raw: &str) -> Result<Self, UnknownValue> {
        let raw = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.code() == raw || v.label() == raw)
            .ok_or_else(|| UnknownValue(raw.to_string()))
    }
}

/// Execution state of a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Completed,
    Running,
    Failed,
    Pending,
}

impl Labeled for TestStatus {
    const ALL: &'static [Self] = &[Self::Completed, Self::Running, Self::Failed, Self::Pending];

    fn code(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Running => "running",
            Self::Failed => "failed",
            Self::Pending => "pending",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Completed => "مكتمل",
            Self::Running => "قيد التنفيذ",
            Self::Failed => "فشل",
            Self::Pending => "معلق",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Labeled for Priority {
    const ALL: &'static [Self] = &[Self::High, Self::Medium, Self::Low];

    fn code(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::High => "عالية",
            Self::Medium => "متوسطة",
            Self::Low => "منخفضة",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    Unit,
    Integration,
    Ui,
    Performance,
    Security,
}

impl Labeled for TestKind {
    const ALL: &'static [Self] = &[Self::Unit, Self::Integration, Self::Ui, Self::Performance, Self::Security];

    fn code(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Integration => "integration",
            Self::Ui => "ui",
            Self::Performance => "performance",
            Self::Security => "security",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Unit => "اختبار وحدة",
            Self::Integration => "اختبار تكامل",
            Self::Ui => "اختبار واجهة",
            Self::Performance => "اختبار أداء",
            Self::Security => "اختبار أمان",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Labeled for Environment {
    const ALL: &'static [Self] = &[Self::Development, Self::Staging, Self::Production];

    fn code(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Development => "التطوير",
            Self::Staging => "ما قبل الإنتاج",
            Self::Production => "الإنتاج",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Ready,
    Generating,
    Failed,
}

impl Labeled for ReportStatus {
    const ALL: &'static [Self] = &[Self::Ready, Self::Generating, Self::Failed];

    fn code(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Generating => "generating",
            Self::Failed => "failed",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Ready => "جاهز",
            Self::Generating => "قيد الإنشاء",
            Self::Failed => "فشل",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Summary,
    Performance,
    Security,
    Coverage,
}

impl Labeled for ReportKind {
    const ALL: &'static [Self] = &[Self::Summary, Self::Performance, Self::Security, Self::Coverage];

    fn code(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Performance => "performance",
            Self::Security => "security",
            Self::Coverage => "coverage",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Summary => "تقرير شامل",
            Self::Performance => "تقرير أداء",
            Self::Security => "تقرير أمان",
            Self::Coverage => "تقرير تغطية",
        }
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// A test definition with its most recent result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QaTest {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TestKind,
    pub status: TestStatus,
    pub priority: Priority,
    /// Seconds; the display form is rendered by [`format_duration`].
    #[serde(rename = "duration")]
    pub duration_secs: u32,
    pub last_run: DateTime<Utc>,
    /// Pass rate of the last run, 0..=100.
    pub success: u8,
    pub assignee: String,
    pub environment: Environment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A generated test report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: u32,
    pub title: String,
    pub kind: ReportKind,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub total_tests: u32,
    pub passed: u32,
    pub failed: u32,
    /// Code coverage percentage, 0..=100.
    pub coverage: u8,
}

/// Format a duration the way the dashboard shows it, e.g. `2د 30ث`.
#[must_use]
pub fn format_duration(secs: u32) -> String {
    match (secs / 60, secs % 60) {
        (0, s) => format!("{s}ث"),
        (m, 0) => format!("{m}د"),
        (m, s) => format!("{m}د {s}ث"),
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
