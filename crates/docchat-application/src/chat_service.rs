//! Chat flow with request-to-conversation binding.
//!
//! Every question registers a [`PendingRequest`] for the conversation it was
//! asked in. A response is appended only while that registration is still
//! alive, so answers that arrive after the conversation was cleared, closed or
//! switched never land in the wrong transcript.

use docchat_core::api::ApiClient;
use docchat_core::notebook::Message;
use docchat_core::session::SessionStore;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The conversation a message list belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChatTarget {
    /// A client-side notebook, by id.
    Notebook(String),
    /// A bare backend session with no notebook open.
    Session(String),
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatTarget::Notebook(id) => write!(f, "notebook {}", id),
            ChatTarget::Session(id) => write!(f, "session {}", id),
        }
    }
}

/// An in-flight question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub token: u64,
    pub target: ChatTarget,
}

/// What `send_message` did.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Empty text or no active session; nothing was appended.
    Ignored,
    /// The reply (answer or error) was appended to the transcript.
    Answered(Message),
    /// The reply arrived after its conversation went away and was dropped.
    Discarded,
}

#[derive(Default)]
struct ChatState {
    target: Option<ChatTarget>,
    messages: Vec<Message>,
    pending: HashMap<u64, ChatTarget>,
    next_token: u64,
}

impl ChatState {
    fn register(&mut self, target: ChatTarget) -> PendingRequest {
        self.next_token += 1;
        let token = self.next_token;
        self.pending.insert(token, target.clone());
        PendingRequest { token, target }
    }

    /// Removes the registration; true if it was still valid for the open target.
    fn resolve(&mut self, request: &PendingRequest) -> bool {
        let registered = self.pending.remove(&request.token);
        registered.as_ref() == Some(&request.target)
            && self.target.as_ref() == Some(&request.target)
    }

    fn reset(&mut self, target: Option<ChatTarget>, messages: Vec<Message>) {
        if !self.pending.is_empty() {
            tracing::debug!(
                "[ChatService] Dropping {} pending request(s)",
                self.pending.len()
            );
        }
        self.pending.clear();
        self.target = target;
        self.messages = messages;
    }
}

/// Ordered message list plus the round trip to the query endpoint.
pub struct ChatService {
    api: Arc<dyn ApiClient>,
    session_store: Arc<dyn SessionStore>,
    state: Mutex<ChatState>,
}

impl ChatService {
    pub fn new(api: Arc<dyn ApiClient>, session_store: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            session_store,
            state: Mutex::new(ChatState::default()),
        }
    }

    /// Asks a question in the open conversation.
    ///
    /// The user message is appended before the request is issued. A failed
    /// query becomes an `Error: ...` assistant message rather than an error.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        let question = text.trim();
        if question.is_empty() {
            return SendOutcome::Ignored;
        }
        let session = self.session_store.get().await;
        let Some(session_id) = session.active_session_id().map(str::to_string) else {
            tracing::debug!("[ChatService] No active session; ignoring message");
            return SendOutcome::Ignored;
        };

        let request = {
            let mut state = self.state.lock().await;
            // Without a notebook the transcript follows the active session.
            let bound = match &state.target {
                Some(ChatTarget::Notebook(_)) => true,
                Some(ChatTarget::Session(id)) => *id == session_id,
                None => false,
            };
            if !bound {
                let messages = std::mem::take(&mut state.messages);
                state.reset(Some(ChatTarget::Session(session_id.clone())), messages);
            }
            let target = state
                .target
                .clone()
                .unwrap_or_else(|| ChatTarget::Session(session_id.clone()));
            state.messages.push(Message::user(question));
            state.register(target)
        };

        tracing::debug!(
            "[ChatService] Query #{} for {} (session={})",
            request.token,
            request.target,
            session_id
        );
        let reply = match self.api.query(&session_id, question).await {
            Ok(response) => Message::assistant(
                response.answer,
                response.source,
                response.web_sources.unwrap_or_default(),
            ),
            Err(e) => {
                tracing::warn!("[ChatService] Query #{} failed: {}", request.token, e);
                Message::error(&e.error)
            }
        };

        let mut state = self.state.lock().await;
        if state.resolve(&request) {
            state.messages.push(reply.clone());
            SendOutcome::Answered(reply)
        } else {
            tracing::warn!(
                "[ChatService] Discarding late reply #{} for {}",
                request.token,
                request.target
            );
            SendOutcome::Discarded
        }
    }

    /// Empties the transcript; the session is untouched.
    pub async fn clear_messages(&self) {
        let mut state = self.state.lock().await;
        let target = state.target.clone();
        state.reset(target, Vec::new());
    }

    /// Switches to `target` with its stored transcript.
    pub async fn open(&self, target: ChatTarget, messages: Vec<Message>) {
        tracing::debug!("[ChatService] Opening {}", target);
        self.state.lock().await.reset(Some(target), messages);
    }

    /// Leaves the current conversation.
    pub async fn close(&self) {
        self.state.lock().await.reset(None, Vec::new());
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.state.lock().await.messages.clone()
    }

    pub async fn current_target(&self) -> Option<ChatTarget> {
        self.state.lock().await.target.clone()
    }

    /// Target and transcript read under one lock.
    pub async fn snapshot(&self) -> (Option<ChatTarget>, Vec<Message>) {
        let state = self.state.lock().await;
        (state.target.clone(), state.messages.clone())
    }

    pub async fn pending_requests(&self) -> Vec<PendingRequest> {
        let state = self.state.lock().await;
        let mut pending: Vec<_> = state
            .pending
            .iter()
            .map(|(token, target)| PendingRequest {
                token: *token,
                target: target.clone(),
            })
            .collect();
        pending.sort_by_key(|request| request.token);
        pending
    }

    /// True while any question is awaiting its reply.
    pub async fn is_loading(&self) -> bool {
        !self.state.lock().await.pending.is_empty()
    }
}
