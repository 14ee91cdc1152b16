//! Static dashboard datasets.
//!
//! Stand-ins for a backend: built once, never written. Dates are fixed so
//! every render and every test sees the same values.

use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};

use super::{Environment, Priority, QaTest, Report, ReportKind, ReportStatus, TestKind, TestStatus};

static TESTS: LazyLock<Vec<QaTest>> = LazyLock::new(build_tests);
static REPORTS: LazyLock<Vec<Report>> = LazyLock::new(build_reports);

#[must_use]
pub fn tests() -> &'static [QaTest] {
    &TESTS
}

#[must_use]
pub fn find_test(id: u32) -> Option<&'static QaTest> {
    TESTS.iter().find(|t| t.id == id)
}

#[must_use]
pub fn reports() -> &'static [Report] {
    &REPORTS
}

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn test(
    id: u32,
    name: &str,
    kind: TestKind,
    status: TestStatus,
    priority: Priority,
    duration_secs: u32,
    last_run: DateTime<Utc>,
    success: u8,
    assignee: &str,
    environment: Environment,
    description: Option<&str>,
) -> QaTest {
    QaTest {
        id,
        name: name.into(),
        kind,
        status,
        priority,
        duration_secs,
        last_run,
        success,
        assignee: assignee.into(),
        environment,
        description: description.map(Into::into),
    }
}

fn build_tests() -> Vec<QaTest> {
    vec![
        test(
            1,
            "اختبار تسجيل الدخول",
            TestKind::Ui,
            TestStatus::Completed,
            Priority::High,
            150,
            at(15, 10, 30),
            98,
            "أحمد محمد",
            Environment::Staging,
            Some("التحقق من تسجيل الدخول بالبريد الإلكتروني وكلمة المرور والمصادقة الثنائية"),
        ),
        test(
            2,
            "اختبار الدفع الإلكتروني",
            TestKind::Integration,
            TestStatus::Failed,
            Priority::High,
            312,
            at(15, 9, 45),
            64,
            "سارة علي",
            Environment::Staging,
            Some("التكامل مع بوابة الدفع واسترجاع المبالغ"),
        ),
        test(
            3,
            "اختبار أداء واجهة البحث",
            TestKind::Performance,
            TestStatus::Running,
            Priority::Medium,
            540,
            at(15, 11, 0),
            81,
            "خالد يوسف",
            Environment::Production,
            None,
        ),
        test(
            4,
            "اختبار حساب الضرائب",
            TestKind::Unit,
            TestStatus::Completed,
            Priority::Medium,
            12,
            at(14, 16, 20),
            100,
            "فاطمة حسن",
            Environment::Development,
            Some("حالات حدية لنسب الضريبة والتقريب"),
        ),
        test(
            5,
            "اختبار اختراق واجهة البرمجة",
            TestKind::Security,
            TestStatus::Pending,
            Priority::High,
            0,
            at(13, 8, 0),
            0,
            "عمر إبراهيم",
            Environment::Staging,
            Some("فحص حقن SQL وتجاوز الصلاحيات"),
        ),
        test(
            6,
            "اختبار تصدير التقارير",
            TestKind::Integration,
            TestStatus::Failed,
            Priority::Low,
            95,
            at(14, 13, 10),
            72,
            "سارة علي",
            Environment::Development,
            None,
        ),
        test(
            7,
            "اختبار الإشعارات الفورية",
            TestKind::Ui,
            TestStatus::Completed,
            Priority::Low,
            48,
            at(15, 7, 55),
            93,
            "ليلى عبدالله",
            Environment::Production,
            Some("وصول الإشعارات خلال ثانيتين على الويب والجوال"),
        ),
        test(
            8,
            "اختبار تحميل الصفحة الرئيسية",
            TestKind::Performance,
            TestStatus::Completed,
            Priority::Medium,
            180,
            at(15, 6, 30),
            88,
            "خالد يوسف",
            Environment::Production,
            None,
        ),
    ]
}

fn build_reports() -> Vec<Report> {
    vec![
        Report {
            id: 1,
            title: "التقرير الأسبوعي لضمان الجودة".into(),
            kind: ReportKind::Summary,
            status: ReportStatus::Ready,
            created_at: at(15, 8, 0),
            total_tests: 180,
            passed: 156,
            failed: 12,
            coverage: 78,
        },
        Report {
            id: 2,
            title: "تحليل أداء الخوادم".into(),
            kind: ReportKind::Performance,
            status: ReportStatus::Ready,
            created_at: at(14, 18, 30),
            total_tests: 24,
            passed: 20,
            failed: 4,
            coverage: 65,
        },
        Report {
            id: 3,
            title: "مراجعة الثغرات الأمنية".into(),
            kind: ReportKind::Security,
            status: ReportStatus::Generating,
            created_at: at(15, 11, 15),
            total_tests: 40,
            passed: 31,
            failed: 2,
            coverage: 54,
        },
        Report {
            id: 4,
            title: "تغطية اختبارات الوحدة".into(),
            kind: ReportKind::Coverage,
            status: ReportStatus::Ready,
            created_at: at(13, 12, 0),
            total_tests: 620,
            passed: 611,
            failed: 9,
            coverage: 72,
        },
        Report {
            id: 5,
            title: "تقرير اختبارات التكامل الشهري".into(),
            kind: ReportKind::Summary,
            status: ReportStatus::Failed,
            created_at: at(12, 9, 40),
            total_tests: 0,
            passed: 0,
            failed: 0,
            coverage: 0,
        },
    ]
}
