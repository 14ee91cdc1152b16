//! Domain services used by HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the chat exchange and dashboard logic so route
//! handlers can stay focused on protocol translation.

pub mod chat;
pub mod dashboard;
pub mod test_runs;
