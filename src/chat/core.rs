use uuid::Uuid;

use crate::api::{Completion, Message, Model, UsageStats, completion, my_stats};
use crate::core::config::ClientConfig;
use crate::error::ChatError;
use super::events::{ChatEvents, RequestCompleted};
use super::history::{History, HistoryStore};

/// The core abstraction around interacting with the chat completion
/// service, one conversation history per user.
///
/// Each dispatch appends the caller's messages to that user's history,
/// sends the entire accumulated history as context, appends the
/// assistant's reply, and raises a "request completed" or "error"
/// notification.
///
/// Use `Chat::builder()` to construct a valid `Chat`.
pub struct Chat {
    api_hostname: String,
    api_key: String,
    model: Model,
    histories: HistoryStore,
    events: ChatEvents,
}

impl Chat {
    pub fn builder(api_hostname: &str) -> ChatBuilder {
        ChatBuilder::new(api_hostname)
    }

    /// Runs one request/response cycle. Appends `messages` to the
    /// history for `user_id` (a fresh id is generated when none is
    /// given, starting a new conversation), sends the full history as
    /// context, and appends the assistant's reply on success.
    ///
    /// Failures are recovered locally: the error is raised on the
    /// notification channel and then returned. The input messages stay
    /// appended either way; no assistant message is appended on
    /// failure. No retries, a single failed attempt is final.
    pub async fn send(
        &mut self,
        messages: Vec<Message>,
        user_id: Option<&str>,
    ) -> Result<Completion, ChatError> {
        let user_id = match user_id {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };

        let history = self.histories.get_or_create(&user_id);
        history.extend(messages);
        // Snapshot the context so the store isn't borrowed across the
        // request
        let context = history.messages().to_owned();

        tracing::debug!(
            "Dispatching {} messages for user {} with model {}",
            context.len(),
            &user_id,
            self.model
        );

        let result = completion(&context, &self.api_hostname, &self.api_key, self.model.as_str())
            .await
            .and_then(|resp| match resp.reply() {
                Some(_) => Ok(resp),
                None => Err(ChatError::EmptyCompletion),
            });

        match result {
            Ok(resp) => {
                // reply() was checked above
                let reply = resp.reply().unwrap_or_default();
                let history = self.histories.get_or_create(&user_id);
                history.push(Message::assistant(reply));
                let payload = RequestCompleted {
                    user_id,
                    history: history.messages().to_owned(),
                };
                self.events.request_completed.emit(&payload);
                Ok(resp)
            }
            Err(err) => {
                tracing::error!("Chat completion failed for user {}: {}", &user_id, err);
                self.events.error.emit(&err);
                Err(err)
            }
        }
    }

    /// Fetch the service's usage statistics for one user. Same policy
    /// as `send`: failures are raised on the error signal and returned.
    pub async fn usage(&mut self, user_id: &str) -> Result<UsageStats, ChatError> {
        match my_stats(user_id, &self.api_hostname, &self.api_key).await {
            Ok(stats) => Ok(stats),
            Err(err) => {
                tracing::error!("Usage stats query failed for user {}: {}", user_id, err);
                self.events.error.emit(&err);
                Err(err)
            }
        }
    }

    /// The per-user history store, exposed for inspection.
    pub fn histories(&self) -> &HistoryStore {
        &self.histories
    }

    /// Mutable access to the store. Callers manage unbounded growth by
    /// trimming histories directly.
    pub fn histories_mut(&mut self) -> &mut HistoryStore {
        &mut self.histories
    }

    pub fn events(&self) -> &ChatEvents {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut ChatEvents {
        &mut self.events
    }

    pub fn model(&self) -> &Model {
        &self.model
    }
}

#[derive(Default)]
pub struct ChatBuilder {
    api_hostname: String,
    api_key: Option<String>,
    model: Option<Model>,
    histories: HistoryStore,
}

impl ChatBuilder {
    pub fn new(api_hostname: &str) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            api_key: None,
            model: None,
            histories: HistoryStore::new(),
        }
    }

    /// Builder preloaded from environment configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.api_hostname)
            .api_key(&config.api_key)
            .model(Model::from(config.model.as_str()))
    }

    pub fn api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn model(mut self, model: impl Into<Model>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Seed the history for `user_id`, e.g. to resume a conversation
    /// the caller captured elsewhere.
    pub fn history(mut self, user_id: &str, messages: Vec<Message>) -> Self {
        *self.histories.get_or_create(user_id) = History::new_with_messages(messages);
        self
    }

    /// Missing or empty API key or model is fatal here; nothing is
    /// constructed.
    pub fn build(self) -> Result<Chat, ChatError> {
        let api_key = match self.api_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(ChatError::Config("api_key")),
        };
        let model = match self.model {
            Some(model) if !model.as_str().is_empty() => model,
            _ => return Err(ChatError::Config("model")),
        };

        Ok(Chat {
            api_hostname: self.api_hostname,
            api_key,
            model,
            histories: self.histories,
            events: ChatEvents::default(),
        })
    }
}
