//! Localized (Arabic) strings returned by the chat path.

/// 400 body when the message is empty after trimming.
pub const EMPTY_MESSAGE: &str = "الرسالة مطلوبة ولا يمكن أن تكون فارغة";

/// Upstream refused on content-policy grounds.
pub const SAFETY_BLOCKED: &str =
    "عذراً، لا يمكنني الرد على هذا الطلب لأنه يخالف سياسات المحتوى. يرجى إعادة صياغة سؤالك.";

/// Upstream quota or rate limit exhausted.
pub const QUOTA_EXCEEDED: &str = "تم تجاوز الحد المسموح من الطلبات حالياً. يرجى المحاولة مرة أخرى بعد قليل.";

/// Any other failure, on the server and in the client.
pub const GENERIC_FAILURE: &str = "عذراً، حدث خطأ أثناء معالجة طلبك. يرجى المحاولة مرة أخرى.";

/// Upstream answered with no text and no canned report matches.
pub const EMPTY_REPLY_APOLOGY: &str = "عذراً، لم أتمكن من إنشاء رد مناسب. هل يمكنك إعادة صياغة سؤالك؟";

/// `GET /api/chat` liveness status.
pub const CHAT_API_RUNNING: &str = "Chat API is running";
