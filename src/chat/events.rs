//! Notification channel for request outcomes.
//!
//! A fixed pair of signals: "request completed" and "error". Listeners
//! are plain callbacks invoked synchronously in registration order;
//! they return nothing, so the dispatcher's control flow never depends
//! on them.
use crate::api::Message;
use crate::error::ChatError;

/// Handle returned at registration, used to remove a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Payload of the "request completed" signal.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestCompleted {
    /// The user identifier the dispatch ran under, whether supplied by
    /// the caller or generated.
    pub user_id: String,
    /// The full history after the assistant reply was appended.
    pub history: Vec<Message>,
}

struct Entry<T> {
    id: ListenerId,
    once: bool,
    callback: Box<dyn Fn(&T) + Send>,
}

/// Ordered listener registry for a single signal.
pub struct Listeners<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Listeners<T> {
    pub fn add(&mut self, callback: impl Fn(&T) + Send + 'static) -> ListenerId {
        self.register(false, callback)
    }

    /// Register a listener that is removed after its first invocation.
    pub fn add_once(&mut self, callback: impl Fn(&T) + Send + 'static) -> ListenerId {
        self.register(true, callback)
    }

    fn register(&mut self, once: bool, callback: impl Fn(&T) + Send + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            once,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a listener. Returns false when the id is not registered,
    /// either because it was already removed or because a once-listener
    /// has fired.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Ids of the registered listeners in registration order.
    pub fn ids(&self) -> Vec<ListenerId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    /// Invoke every listener with `payload` in registration order, then
    /// drop any once-listeners. A no-op when nothing is registered.
    pub fn emit(&mut self, payload: &T) {
        for entry in &self.entries {
            (entry.callback)(payload);
        }
        self.entries.retain(|entry| !entry.once);
    }
}

/// The two signals raised by the dispatcher.
#[derive(Default)]
pub struct ChatEvents {
    /// Fired exactly once per successful dispatch.
    pub request_completed: Listeners<RequestCompleted>,
    /// Fired exactly once per failed dispatch or stats query.
    pub error: Listeners<ChatError>,
}
