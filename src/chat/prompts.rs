//! Quick replies and canned fallback reports.
//!
//! A quick reply is a short Arabic phrase the dashboard offers as a button.
//! The server swaps it for a longer prompt before calling the model. Each
//! one also has an opaque intent code so clients can select it without
//! depending on display text; exact phrase matching remains for clients
//! that only send text.

/// Predefined dashboard questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickReply {
    DetailedReport,
    PerformanceAnalysis,
    FailedTests,
    ImprovementSuggestions,
    DailySummary,
}

impl QuickReply {
    pub const ALL: [Self; 5] = [
        Self::DetailedReport,
        Self::PerformanceAnalysis,
        Self::FailedTests,
        Self::ImprovementSuggestions,
        Self::DailySummary,
    ];

    /// Opaque intent code sent on the wire.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::DetailedReport => "detailed_report",
            Self::PerformanceAnalysis => "performance_analysis",
            Self::FailedTests => "failed_tests",
            Self::ImprovementSuggestions => "improvement_suggestions",
            Self::DailySummary => "daily_summary",
        }
    }

    /// The short phrase shown on the button.
    #[must_use]
    pub fn phrase(self) -> &'static str {
        match self {
            Self::DetailedReport => "تقرير مفصل",
            Self::PerformanceAnalysis => "تحليل الأداء",
            Self::FailedTests => "الاختبارات الفاشلة",
            Self::ImprovementSuggestions => "اقتراحات التحسين",
            Self::DailySummary => "ملخص اليوم",
        }
    }

    /// The prompt actually forwarded to the model.
    #[must_use]
    pub fn prompt(self) -> &'static str {
        match self {
            Self::DetailedReport => {
                "أنت مساعد ذكي لإدارة ضمان الجودة. قدم تقريراً مفصلاً عن حالة الاختبارات الحالية يشمل: \
                 نسبة النجاح الإجمالية، عدد الاختبارات المكتملة والفاشلة والمعلقة، أبرز المشكلات المكتشفة، \
                 وتوصيات عملية للفريق. استخدم عناوين وقوائم بتنسيق Markdown."
            }
            Self::PerformanceAnalysis => {
                "أنت خبير في اختبارات الأداء. حلل أداء النظام بناءً على نتائج الاختبارات الأخيرة: \
                 أزمنة الاستجابة، استهلاك الموارد، نقاط الاختناق المحتملة، ومقارنة بالفترة السابقة. \
                 اختم بخطوات محددة لتحسين الأداء."
            }
            Self::FailedTests => {
                "أنت مهندس ضمان جودة. اعرض قائمة بالاختبارات الفاشلة مع سبب الفشل المرجح لكل اختبار، \
                 ودرجة خطورته، والفريق المسؤول عنه، والخطوات المقترحة لإصلاحه مرتبة حسب الأولوية."
            }
            Self::ImprovementSuggestions => {
                "أنت مستشار في تحسين عمليات ضمان الجودة. قدم اقتراحات عملية لرفع جودة الاختبارات تشمل: \
                 زيادة التغطية، أتمتة الاختبارات اليدوية، تقليل الاختبارات المتذبذبة، وتحسين سير العمل بين الفرق."
            }
            Self::DailySummary => {
                "أنت مساعد ذكي لإدارة ضمان الجودة. لخص أنشطة الاختبار لهذا اليوم في فقرات قصيرة: \
                 الاختبارات التي نُفذت، النتائج الرئيسية، المشكلات العاجلة، والمهام المخطط لها غداً."
            }
        }
    }

    /// Canned markdown report used when the model returns no text.
    #[must_use]
    pub fn fallback_report(self) -> Option<&'static str> {
        match self {
            Self::DetailedReport => Some(DETAILED_REPORT_FALLBACK),
            Self::PerformanceAnalysis => Some(PERFORMANCE_ANALYSIS_FALLBACK),
            Self::FailedTests => Some(FAILED_TESTS_FALLBACK),
            Self::ImprovementSuggestions => Some(IMPROVEMENT_SUGGESTIONS_FALLBACK),
            Self::DailySummary => None,
        }
    }

    /// Exact match on the short phrase. No trimming or normalisation.
    #[must_use]
    pub fn from_phrase(phrase: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.phrase() == phrase)
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.code() == code)
    }
}

/// Resolve the quick reply for a request: a recognised intent code first,
/// then an exact phrase match on the trimmed text.
#[must_use]
pub fn resolve(trimmed: &str, intent: Option<&str>) -> Option<QuickReply> {
    intent
        .and_then(QuickReply::from_code)
        .or_else(|| QuickReply::from_phrase(trimmed))
}

/// The text to forward upstream: the expanded prompt for a quick reply,
/// otherwise the input unchanged.
#[must_use]
pub fn expand(trimmed: &str) -> &str {
    QuickReply::from_phrase(trimmed).map_or(trimmed, |q| q.prompt())
}

const DETAILED_REPORT_FALLBACK: &str = "## 📊 تقرير مفصل عن حالة الاختبارات

**نسبة النجاح الإجمالية:** 87%

### ملخص النتائج
- ✅ اختبارات مكتملة: 156
- ❌ اختبارات فاشلة: 12
- ⏳ اختبارات قيد التنفيذ: 8
- ⏸️ اختبارات معلقة: 4

### أبرز المشكلات
1. فشل متكرر في اختبارات تكامل بوابة الدفع
2. بطء في استجابة واجهة البحث تحت الضغط
3. اختبارات واجهة متذبذبة على متصفح Safari

### التوصيات
- إعطاء الأولوية لإصلاح اختبارات بوابة الدفع
- إضافة مراقبة أداء لواجهة البحث
- مراجعة محددات العناصر في اختبارات الواجهة";

const PERFORMANCE_ANALYSIS_FALLBACK: &str = "## ⚡ تحليل الأداء

### أزمنة الاستجابة
- متوسط زمن الاستجابة: 245 مللي ثانية
- الشريحة المئوية 95: 780 مللي ثانية
- أبطأ نقطة نهاية: `/api/search` (1.2 ثانية)

### استهلاك الموارد
- المعالج: 62% في وقت الذروة
- الذاكرة: 3.1 جيجابايت من أصل 4 جيجابايت

### نقاط الاختناق
1. استعلامات قاعدة البيانات غير المفهرسة في البحث
2. غياب التخزين المؤقت لنتائج التقارير

### الخطوات المقترحة
- إضافة فهارس لحقول البحث الأكثر استخداماً
- تفعيل التخزين المؤقت لمدة 5 دقائق للتقارير";

const FAILED_TESTS_FALLBACK: &str = "## ❌ الاختبارات الفاشلة

| الاختبار | السبب المرجح | الخطورة |
|---|---|---|
| اختبار الدفع الإلكتروني | انتهاء مهلة الاتصال بالبوابة | عالية |
| اختبار تسجيل الدخول الثنائي | رمز التحقق منتهي الصلاحية | متوسطة |
| اختبار تصدير التقارير | خطأ في ترميز الملفات العربية | متوسطة |
| اختبار الإشعارات | تأخر في قائمة الرسائل | منخفضة |

### الخطوات التالية
1. زيادة مهلة الاتصال وإضافة محاكاة للبوابة في بيئة الاختبار
2. ضبط ساعة الخادم في بيئة الاختبار
3. توحيد الترميز إلى UTF-8 في وحدة التصدير";

const IMPROVEMENT_SUGGESTIONS_FALLBACK: &str = "## 💡 اقتراحات التحسين

### زيادة التغطية
- رفع تغطية اختبارات الوحدة من 72% إلى 85%
- إضافة اختبارات للحالات الحدية في وحدة الفوترة

### الأتمتة
- أتمتة 40 حالة اختبار يدوية متكررة في الانحدار
- تشغيل الاختبارات تلقائياً مع كل طلب دمج

### الاستقرار
- عزل الاختبارات المتذبذبة ومتابعتها أسبوعياً
- استخدام بيانات اختبار مستقلة لكل تشغيل

### سير العمل
- اجتماع فرز يومي قصير للعيوب الجديدة
- لوحة مشتركة لحالة الاختبارات بين الفرق";

#[cfg(test)]
#[path = "prompts_test.rs"]
mod tests;
