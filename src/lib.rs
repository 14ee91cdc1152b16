//! QA dashboard backend: chat exchange with an upstream LLM, read-only
//! fixture endpoints, and a client-side conversation state machine.

pub mod chat;
pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
pub mod qa;
pub mod routes;
pub mod scope;
pub mod services;
pub mod state;
