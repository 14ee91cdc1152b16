//! Shared error classification.
//!
//! Module errors stay as their own `thiserror` enums. This trait gives
//! them a stable machine code and a retry hint so logs and JSON bodies can
//! carry both without matching on every variant at the call site.

pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}
