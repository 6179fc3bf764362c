//! Client library for a hosted, OpenAI-compatible chat completion
//! service. Accumulates per-user conversation history in memory, sends
//! the full history as context on every dispatch, and notifies
//! registered listeners when a request completes or fails.

pub mod api;
pub mod chat;
pub mod core;
pub mod error;

pub use api::{Completion, Message, Model, Role, UsageStats};
pub use chat::{
    Chat, ChatBuilder, ChatEvents, History, HistoryStore, ListenerId, Listeners, RequestCompleted,
};
pub use crate::core::config::ClientConfig;
pub use error::ChatError;
