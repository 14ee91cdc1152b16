use super::*;
use crate::llm::TextGeneration;
use crate::llm::types::{Generation, LlmError};
use crate::state::test_helpers;
use async_trait::async_trait;
use std::pin::pin;

// =========================================================================
// StubTransport
// =========================================================================

/// Messages starting with `slow` never settle on their own.
struct StubTransport {
    reply: fn(&str) -> Result<String, TransportError>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl StubTransport {
    fn arc(reply: fn(&str) -> Result<String, TransportError>) -> Arc<Self> {
        Arc::new(Self { reply, calls: Mutex::new(Vec::new()) })
    }

    fn echo() -> Arc<Self> {
        Self::arc(|message| Ok(format!("رد: {message}")))
    }

    fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for StubTransport {
    async fn send(&self, message: &str, intent: Option<&str>) -> Result<String, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((message.to_string(), intent.map(str::to_string)));
        if message.starts_with("slow") {
            std::future::pending::<()>().await;
        }
        (self.reply)(message)
    }
}

fn conversation(transport: &Arc<StubTransport>) -> Conversation {
    Conversation::new(Arc::clone(transport) as Arc<dyn ChatTransport>)
}

// =========================================================================
// hydrate
// =========================================================================

#[test]
fn hydrate_seeds_three_messages_once() {
    let transport = StubTransport::echo();
    let conv = conversation(&transport);
    assert!(conv.messages().is_empty());

    assert!(conv.hydrate());
    assert!(!conv.hydrate());

    let messages = conv.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].kind, MessageKind::Ai);
    assert_eq!(messages[1].kind, MessageKind::User);
    assert!(transport.calls().is_empty());
    assert!(!conv.is_typing());
}

// =========================================================================
// send
// =========================================================================

#[tokio::test]
async fn blank_send_is_ignored() {
    let transport = StubTransport::echo();
    let conv = conversation(&transport);

    assert_eq!(conv.send("   ").await, SendOutcome::Ignored);
    assert!(conv.messages().is_empty());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn reply_appends_ai_and_marks_user_delivered() {
    let transport = StubTransport::echo();
    let conv = conversation(&transport);

    assert_eq!(conv.send("  كيف الأداء؟ ").await, SendOutcome::Replied);

    let messages = conv.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].kind, MessageKind::User);
    assert_eq!(messages[0].content, "كيف الأداء؟");
    assert_eq!(messages[0].status, Some(MessageStatus::Delivered));
    assert_eq!(messages[1].kind, MessageKind::Ai);
    assert_eq!(messages[1].content, "رد: كيف الأداء؟");
    assert_eq!(messages[1].status, Some(MessageStatus::Delivered));
    assert!(!conv.is_typing());
    assert!(!conv.in_flight());
}

#[tokio::test]
async fn server_error_text_becomes_failed_ai_message() {
    let transport =
        StubTransport::arc(|_| Err(TransportError::Server { status: 500, error: text::QUOTA_EXCEEDED.into() }));
    let conv = conversation(&transport);

    assert_eq!(conv.send("سؤال").await, SendOutcome::Failed);

    let messages = conv.messages();
    assert_eq!(messages[0].status, Some(MessageStatus::Failed));
    assert_eq!(messages[1].content, text::QUOTA_EXCEEDED);
    assert_eq!(messages[1].status, Some(MessageStatus::Failed));
    assert!(!conv.is_typing());
}

#[tokio::test]
async fn undecodable_error_falls_back_to_generic_text() {
    let transport = StubTransport::arc(|_| Err(TransportError::Decode("garbage".into())));
    let conv = conversation(&transport);

    assert_eq!(conv.send("سؤال").await, SendOutcome::Failed);
    let last = conv.messages().pop().unwrap();
    assert_eq!(last.content, text::GENERIC_FAILURE);
}

#[tokio::test]
async fn quick_reply_sends_phrase_with_intent() {
    let transport = StubTransport::echo();
    let conv = conversation(&transport);

    conv.send_quick_reply(QuickReply::PerformanceAnalysis).await;

    let calls = transport.calls();
    assert_eq!(
        calls,
        vec![(
            QuickReply::PerformanceAnalysis.phrase().to_string(),
            Some("performance_analysis".to_string())
        )]
    );
    assert_eq!(conv.messages()[0].content, QuickReply::PerformanceAnalysis.phrase());
}

#[tokio::test]
async fn message_ids_strictly_increase() {
    let transport = StubTransport::echo();
    let conv = conversation(&transport);
    conv.hydrate();
    conv.send("أ").await;
    conv.send("ب").await;

    let ids: Vec<u64> = conv.messages().iter().map(|m| m.id).collect();
    assert_eq!(ids.len(), 7);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

// =========================================================================
// cancellation
// =========================================================================

#[tokio::test]
async fn second_send_aborts_first() {
    let transport = StubTransport::echo();
    let conv = conversation(&transport);

    let mut first = pin!(conv.send("slow"));
    assert!(futures::poll!(first.as_mut()).is_pending());
    assert!(conv.is_typing());
    assert!(conv.in_flight());

    assert_eq!(conv.send("fast").await, SendOutcome::Replied);
    assert_eq!(first.await, SendOutcome::Aborted);

    let messages = conv.messages();
    assert_eq!(messages.len(), 3);
    // The superseded message never settles.
    assert_eq!(messages[0].content, "slow");
    assert_eq!(messages[0].status, None);
    assert_eq!(messages[1].status, Some(MessageStatus::Delivered));
    assert_eq!(messages[2].content, "رد: fast");
    assert!(messages.iter().all(|m| m.status != Some(MessageStatus::Failed)));
    assert!(!conv.is_typing());
}

#[tokio::test]
async fn aborted_send_leaves_typing_to_its_successor() {
    let transport = StubTransport::echo();
    let conv = conversation(&transport);

    let mut first = pin!(conv.send("slow 1"));
    assert!(futures::poll!(first.as_mut()).is_pending());
    let mut second = pin!(conv.send("slow 2"));
    assert!(futures::poll!(second.as_mut()).is_pending());

    assert_eq!(first.await, SendOutcome::Aborted);
    assert!(conv.is_typing());
    assert!(conv.in_flight());
    assert_eq!(conv.messages().len(), 2);
}

// =========================================================================
// against the real service
// =========================================================================

struct FailingLlm;

#[async_trait]
impl TextGeneration for FailingLlm {
    async fn generate(&self, _prompt: &str) -> Result<Generation, LlmError> {
        Err(LlmError::ApiResponse { status: 500, body: "internal".into() })
    }
}

#[tokio::test]
async fn detailed_report_against_failing_upstream_ends_failed() {
    let state = test_helpers::test_app_state_with_llm(Arc::new(FailingLlm));
    let base = test_helpers::spawn_app(state).await;
    let conv = Conversation::new(Arc::new(HttpChatTransport::new(base).unwrap()));

    assert!(conv.hydrate());
    assert_eq!(conv.messages().len(), 3);

    assert_eq!(conv.send("تقرير مفصل").await, SendOutcome::Failed);

    let messages = conv.messages();
    assert_eq!(messages.len(), 5);
    let user = &messages[3];
    assert_eq!(user.kind, MessageKind::User);
    assert_eq!(user.status, Some(MessageStatus::Failed));
    let last = &messages[4];
    assert_eq!(last.kind, MessageKind::Ai);
    assert_eq!(last.status, Some(MessageStatus::Failed));
    assert_eq!(last.content, text::GENERIC_FAILURE);
    assert!(!conv.is_typing());
}

// =========================================================================
// dropped sends
// =========================================================================

#[tokio::test]
async fn dropped_send_releases_typing_and_request() {
    let transport = StubTransport::echo();
    let conv = conversation(&transport);

    {
        let mut pending = Box::pin(conv.send("slow"));
        assert!(futures::poll!(pending.as_mut()).is_pending());
        assert!(conv.is_typing());
    }

    assert!(!conv.is_typing());
    assert!(!conv.in_flight());
    let messages = conv.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].status, None);

    assert_eq!(conv.send("fast").await, SendOutcome::Replied);
    assert_eq!(conv.messages().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn timed_out_send_does_not_leave_typing() {
    let transport = StubTransport::echo();
    let conv = conversation(&transport);

    let timed_out = tokio::time::timeout(std::time::Duration::from_millis(50), conv.send("slow")).await;
    assert!(timed_out.is_err());
    assert!(!conv.is_typing());
    assert!(!conv.in_flight());
}

#[tokio::test]
async fn dropping_superseded_send_keeps_successor_state() {
    let transport = StubTransport::echo();
    let conv = conversation(&transport);

    let mut second = Box::pin(conv.send("slow 2"));
    {
        let mut first = Box::pin(conv.send("slow 1"));
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(futures::poll!(second.as_mut()).is_pending());
    }

    assert!(conv.is_typing());
    assert!(conv.in_flight());

    drop(second);
    assert!(!conv.is_typing());
    assert!(!conv.in_flight());
}

#[tokio::test]
async fn dropping_conversation_after_dropped_send_releases_transport() {
    let transport = StubTransport::echo();
    let conv = conversation(&transport);

    {
        let mut pending = Box::pin(conv.send("slow"));
        assert!(futures::poll!(pending.as_mut()).is_pending());
        assert_eq!(Arc::strong_count(&transport), 2);
    }
    drop(conv);

    assert_eq!(Arc::strong_count(&transport), 1);
    assert_eq!(transport.calls().len(), 1);
}
