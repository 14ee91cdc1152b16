use super::*;
use crate::llm::types::Generation;
use std::sync::Mutex;

// =========================================================================
// MockLlm
// =========================================================================

enum Script {
    Text(&'static str),
    Empty,
    Fail(fn() -> LlmError),
}

struct MockLlm {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    fn new(script: Script) -> Self {
        Self { script, prompts: Mutex::new(Vec::new()) }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TextGeneration for MockLlm {
    async fn generate(&self, prompt: &str) -> Result<Generation, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.script {
            Script::Text(t) => Ok(Generation::text(*t)),
            Script::Empty => Ok(Generation::empty()),
            Script::Fail(make) => Err(make()),
        }
    }
}

// =========================================================================
// quick-reply expansion
// =========================================================================

#[tokio::test]
async fn quick_reply_phrase_forwards_expanded_prompt() {
    for quick in QuickReply::ALL {
        let llm = MockLlm::new(Script::Text("ok"));
        let outcome = handle_message(Some(&llm), quick.phrase(), None)
            .await
            .unwrap();
        assert_eq!(outcome, ChatOutcome::Reply("ok".into()));
        assert_eq!(llm.prompts(), vec![quick.prompt().to_string()]);
    }
}

#[tokio::test]
async fn quick_reply_phrase_is_matched_after_trim() {
    let llm = MockLlm::new(Script::Text("ok"));
    handle_message(Some(&llm), "  تحليل الأداء \n", None)
        .await
        .unwrap();
    assert_eq!(llm.prompts(), vec![QuickReply::PerformanceAnalysis.prompt().to_string()]);
}

#[tokio::test]
async fn intent_code_selects_quick_reply() {
    let llm = MockLlm::new(Script::Text("ok"));
    handle_message(Some(&llm), "اعرض لي الفشل", Some("failed_tests"))
        .await
        .unwrap();
    assert_eq!(llm.prompts(), vec![QuickReply::FailedTests.prompt().to_string()]);
}

#[tokio::test]
async fn free_text_is_forwarded_trimmed() {
    let llm = MockLlm::new(Script::Text("  الإجابة  "));
    let outcome = handle_message(Some(&llm), "  كم اختباراً فشل؟ ", None)
        .await
        .unwrap();
    assert_eq!(llm.prompts(), vec!["كم اختباراً فشل؟".to_string()]);
    assert_eq!(outcome, ChatOutcome::Reply("الإجابة".into()));
}

// =========================================================================
// validation
// =========================================================================

#[tokio::test]
async fn empty_message_never_calls_upstream() {
    for input in ["", "   ", "\n\t "] {
        let llm = MockLlm::new(Script::Text("unused"));
        let err = handle_message(Some(&llm), input, None).await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyMessage));
        assert!(llm.prompts().is_empty());
    }
}

#[tokio::test]
async fn empty_message_checked_before_configuration() {
    let err = handle_message(None, " ", None).await.unwrap_err();
    assert!(matches!(err, ChatError::EmptyMessage));
}

#[tokio::test]
async fn missing_llm_is_an_error() {
    let err = handle_message(None, "مرحبا", None).await.unwrap_err();
    assert!(matches!(err, ChatError::LlmNotConfigured));
    assert_eq!(classify_failure(&err.to_string()), FailureKind::Other);
}

// =========================================================================
// empty completion fallback
// =========================================================================

#[tokio::test]
async fn empty_completion_uses_canned_report_for_original_input() {
    for quick in QuickReply::ALL {
        let Some(report) = quick.fallback_report() else { continue };
        let llm = MockLlm::new(Script::Empty);
        let outcome = handle_message(Some(&llm), quick.phrase(), None)
            .await
            .unwrap();
        assert_eq!(outcome, ChatOutcome::Fallback(report.to_string()));
        assert!(outcome.into_reply().is_fallback());
    }
}

#[tokio::test]
async fn empty_completion_without_canned_report_apologizes() {
    let llm = MockLlm::new(Script::Empty);
    let outcome = handle_message(Some(&llm), "سؤال عام", None)
        .await
        .unwrap();
    assert_eq!(outcome, ChatOutcome::Fallback(text::EMPTY_REPLY_APOLOGY.into()));

    let llm = MockLlm::new(Script::Empty);
    let outcome = handle_message(Some(&llm), QuickReply::DailySummary.phrase(), None)
        .await
        .unwrap();
    assert_eq!(outcome, ChatOutcome::Fallback(text::EMPTY_REPLY_APOLOGY.into()));
}

#[tokio::test]
async fn whitespace_completion_counts_as_empty() {
    let llm = MockLlm::new(Script::Text("   "));
    let outcome = handle_message(Some(&llm), "تقرير مفصل", None)
        .await
        .unwrap();
    assert!(matches!(outcome, ChatOutcome::Fallback(_)));
}

// =========================================================================
// failure classification
// =========================================================================

#[tokio::test]
async fn safety_error_maps_to_moderation_notice() {
    let llm = MockLlm::new(Script::Fail(|| LlmError::Blocked { reason: "SAFETY".into() }));
    let err = handle_message(Some(&llm), "نص", None).await.unwrap_err();
    assert_eq!(classify_failure(&err.to_string()), FailureKind::Safety);
    assert_eq!(FailureKind::Safety.message(), text::SAFETY_BLOCKED);
}

#[tokio::test]
async fn quota_error_maps_to_rate_limit_notice() {
    let llm = MockLlm::new(Script::Fail(|| LlmError::QuotaExceeded("status 429".into())));
    let err = handle_message(Some(&llm), "نص", None).await.unwrap_err();
    assert_eq!(classify_failure(&err.to_string()), FailureKind::Quota);
    assert!(err.retryable());
}

#[tokio::test]
async fn other_error_maps_to_generic_notice() {
    let llm = MockLlm::new(Script::Fail(|| LlmError::ApiRequest("connection reset".into())));
    let err = handle_message(Some(&llm), "نص", None).await.unwrap_err();
    assert_eq!(classify_failure(&err.to_string()), FailureKind::Other);
    assert_eq!(err.error_code(), "E_LLM_ERROR");
}

#[test]
fn classify_matches_substrings() {
    assert_eq!(classify_failure("[400] candidate blocked: SAFETY"), FailureKind::Safety);
    assert_eq!(classify_failure("QUOTA_EXCEEDED for project"), FailureKind::Quota);
    assert_eq!(classify_failure("SAFETY and QUOTA_EXCEEDED"), FailureKind::Safety);
    assert_eq!(classify_failure("safety"), FailureKind::Other);
}
