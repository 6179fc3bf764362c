//! Per-user conversation history.
use std::collections::HashMap;

use crate::api::Message;

/// Ordered message history for a single user.
///
/// Grows monotonically as dispatches append input and reply messages;
/// the library never prunes it. Callers that need to bound memory or
/// token usage trim it directly with `truncate` or `clear`, or start
/// over with a fresh user id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History(Vec<Message>);

impl History {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn new_with_messages(messages: Vec<Message>) -> Self {
        Self(messages)
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn push(&mut self, msg: Message) {
        self.0.push(msg)
    }

    pub fn extend(&mut self, msgs: impl IntoIterator<Item = Message>) {
        self.0.extend(msgs)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }
}

/// In-memory mapping from user identifier to conversation history.
///
/// Entries are created lazily the first time an identifier is seen and
/// live for the lifetime of the owning client. No eviction, no size
/// cap, no internal synchronization.
#[derive(Debug, Default)]
pub struct HistoryStore(HashMap<String, History>);

impl HistoryStore {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Mutable history for `user_id`, inserting an empty one on first
    /// reference. Later calls with the same id return the same growing
    /// sequence.
    pub fn get_or_create(&mut self, user_id: &str) -> &mut History {
        self.0.entry(user_id.to_string()).or_default()
    }

    pub fn get(&self, user_id: &str) -> Option<&History> {
        self.0.get(user_id)
    }

    pub fn user_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
