//! Client-side conversation state.
//!
//! DESIGN
//! ======
//! A `Conversation` owns the message list, the typing flag and at most one
//! outstanding request. The list only grows; the only mutation after
//! creation is a user message's status moving from absent to a terminal
//! value once its exchange settles.
//!
//! Cancellation is last-writer-wins: a new send aborts whatever is in
//! flight. An aborted send appends nothing and leaves `typing` to the send
//! that replaced it. A send future dropped before it settles releases its
//! request and clears `typing`, unless a newer send already owns them.
//! Dropping the conversation aborts anything still registered.
//!
//! The state lock is never held across the transport await.

pub mod transport;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use futures::future::{AbortHandle, Abortable};
use tracing::{debug, warn};

use crate::chat::prompts::QuickReply;
use crate::chat::{Message, MessageKind, MessageStatus, text};
use crate::error::ErrorCode;

pub use transport::{ChatTransport, HttpChatTransport, TransportError};

/// Seed messages shown before the first exchange.
const SEED_MESSAGES: [(MessageKind, &str); 3] = [
    (
        MessageKind::Ai,
        "مرحباً! أنا مساعد ضمان الجودة. يمكنني تحليل نتائج الاختبارات وإعداد التقارير واقتراح التحسينات.",
    ),
    (MessageKind::User, "ما هي حالة الاختبارات اليوم؟"),
    (
        MessageKind::Ai,
        "اكتمل معظم اختبارات اليوم بنجاح، مع وجود اختبارين فاشلين في بيئة ما قبل الإنتاج. اختر أحد الردود السريعة للحصول على التفاصيل.",
    ),
];

/// How a send ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing appended, nothing sent.
    Ignored,
    /// Superseded by a later send.
    Aborted,
    Replied,
    Failed,
}

#[derive(Default)]
struct Inner {
    messages: Vec<Message>,
    typing: bool,
    hydrated: bool,
    inflight: Option<(u64, AbortHandle)>,
    requests: u64,
    last_id: u64,
}

impl Inner {
    /// Creation time in ms, bumped past the previous id on collision.
    fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last_id = now.max(self.last_id + 1);
        self.last_id
    }

    fn push(&mut self, kind: MessageKind, content: String, status: Option<MessageStatus>) -> u64 {
        let id = self.next_id();
        self.messages.push(Message { id, kind, content, timestamp: Utc::now(), status });
        id
    }

    fn settle(&mut self, id: u64, status: MessageStatus) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == id && m.status.is_none()) {
            message.status = Some(status);
        }
    }

    fn is_current(&self, request: u64) -> bool {
        self.inflight.as_ref().is_some_and(|(current, _)| *current == request)
    }
}

pub struct Conversation {
    transport: Arc<dyn ChatTransport>,
    inner: Mutex<Inner>,
}

impl Conversation {
    #[must_use]
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport, inner: Mutex::new(Inner::default()) }
    }

    /// Append the seed messages. Only the first call does anything.
    pub fn hydrate(&self) -> bool {
        let mut inner = self.lock();
        if inner.hydrated {
            return false;
        }
        inner.hydrated = true;
        for (kind, content) in SEED_MESSAGES {
            let status = (kind == MessageKind::User).then_some(MessageStatus::Delivered);
            inner.push(kind, content.to_string(), status);
        }
        true
    }

    /// Send free text.
    pub async fn send(&self, input: &str) -> SendOutcome {
        self.dispatch(input, None).await
    }

    /// Send a quick reply: its phrase is displayed, its intent code routes it.
    pub async fn send_quick_reply(&self, quick: QuickReply) -> SendOutcome {
        self.dispatch(quick.phrase(), Some(quick.code())).await
    }

    async fn dispatch(&self, input: &str, intent: Option<&str>) -> SendOutcome {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return SendOutcome::Ignored;
        }

        let (request, user_id, registration) = {
            let mut inner = self.lock();
            let user_id = inner.push(MessageKind::User, trimmed.to_string(), None);
            inner.typing = true;
            inner.requests += 1;
            let request = inner.requests;

            let (handle, registration) = AbortHandle::new_pair();
            if let Some((previous, stale)) = inner.inflight.replace((request, handle)) {
                debug!(previous, request, "conversation: superseding in-flight request");
                stale.abort();
            }
            (request, user_id, registration)
        };

        let guard = InflightGuard { conversation: self, request, armed: true };
        let result = Abortable::new(self.transport.send(trimmed, intent), registration).await;
        guard.disarm();

        let mut inner = self.lock();
        let Ok(result) = result else {
            debug!(request, "conversation: request aborted");
            return SendOutcome::Aborted;
        };

        if inner.is_current(request) {
            inner.inflight = None;
            inner.typing = false;
        }

        match result {
            Ok(reply) => {
                inner.push(MessageKind::Ai, reply, Some(MessageStatus::Delivered));
                inner.settle(user_id, MessageStatus::Delivered);
                SendOutcome::Replied
            }
            Err(err) => {
                warn!(error = %err, code = err.error_code(), request, "conversation: send failed");
                let content = err.server_message().unwrap_or(text::GENERIC_FAILURE).to_string();
                inner.push(MessageKind::Ai, content, Some(MessageStatus::Failed));
                inner.settle(user_id, MessageStatus::Failed);
                SendOutcome::Failed
            }
        }
    }

    /// Snapshot of the message list.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.lock().messages.clone()
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.lock().typing
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.lock().inflight.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases a request whose send future is dropped before it settles.
struct InflightGuard<'a> {
    conversation: &'a Conversation,
    request: u64,
    armed: bool,
}

impl InflightGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.conversation.lock();
        if !inner.is_current(self.request) {
            return;
        }
        if let Some((_, handle)) = inner.inflight.take() {
            handle.abort();
        }
        inner.typing = false;
        debug!(request = self.request, "conversation: send dropped before settling");
    }
}

impl Drop for Conversation {
    fn drop(&mut self) {
        if let Some((request, handle)) = self.lock().inflight.take() {
            debug!(request, "conversation: dropped with request in flight");
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;
