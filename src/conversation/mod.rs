//! Conversation controller.
//!
//! Owns the message transcript, the server-assigned thread identity, and the
//! loading/cancellation state for the single in-flight request. The request
//! lifecycle is `idle -> sending -> {done, failed, cancelled} -> idle`; the
//! `loading` flag gates new sends so at most one request is ever in flight.

mod message;

pub use message::{ChatMessage, ChatRole, ASSISTANT_NAME, WELCOME_MESSAGE};

use crate::api::{AgentApi, ApiError, QueryRequest};
use crate::telemetry::{SharedTracker, EVENT_MESSAGE_SENT};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Reply appended when a request fails for any reason other than
/// explicit cancellation.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Sorry, I encountered an error. Please try again later.";

/// Notice appended when the user cancels an in-flight request.
pub const CANCELLED_MESSAGE: &str = "Request cancelled.";

/// Result of a [`Conversation::send_message`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// A request was already in flight; nothing was sent or changed.
    Rejected,
    /// The assistant replied.
    Completed { reply: String },
    /// The request failed; a generic error message was appended.
    Failed { message: String },
    /// The request was cancelled; a cancelled notice was appended.
    Cancelled { notice: String },
}

struct ConversationState {
    messages: Vec<ChatMessage>,
    thread_id: Option<String>,
    loading: bool,
    cancel: Option<CancellationToken>,
}

impl ConversationState {
    fn fresh() -> Self {
        Self {
            messages: vec![ChatMessage::welcome()],
            thread_id: None,
            loading: false,
            cancel: None,
        }
    }
}

/// Conversation controller. Methods take `&self`; share via [`Arc`] so a
/// cancel can be issued while a send is awaited.
pub struct Conversation {
    api: Arc<dyn AgentApi>,
    tracker: SharedTracker,
    state: Mutex<ConversationState>,
}

impl Conversation {
    /// Create a conversation starting with the welcome message.
    pub fn new(api: Arc<dyn AgentApi>, tracker: SharedTracker) -> Self {
        Self {
            api,
            tracker,
            state: Mutex::new(ConversationState::fresh()),
        }
    }

    /// Whether a request is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    /// Current server-assigned thread identifier.
    pub fn thread_id(&self) -> Option<String> {
        self.state.lock().unwrap().thread_id.clone()
    }

    /// Snapshot of the transcript.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state.lock().unwrap().messages.clone()
    }

    /// Send a user message and wait for the assistant's reply.
    ///
    /// Rejected without side effects while another request is in flight.
    /// On success the server's `thread_id` is adopted and echoed on
    /// subsequent requests. Exactly one message is appended for the outcome:
    /// the reply, a generic error, or a cancelled notice, never more.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        let (request, cancel) = {
            let mut state = self.state.lock().unwrap();
            if state.loading {
                debug!("send rejected: request already in flight");
                return SendOutcome::Rejected;
            }
            state.messages.push(ChatMessage::user(text));
            state.loading = true;
            let cancel = CancellationToken::new();
            state.cancel = Some(cancel.clone());
            (QueryRequest::new(text, state.thread_id.clone()), cancel)
        };

        self.tracker.track(EVENT_MESSAGE_SENT, &[]);
        let result = self.api.query(&request, &cancel).await;

        let mut state = self.state.lock().unwrap();
        state.loading = false;
        state.cancel = None;

        match result {
            Ok(response) => {
                if let Some(thoughts) = &response.full_thought_process {
                    debug!(thoughts = %thoughts, "agent thought process");
                }
                state.thread_id = Some(response.thread_id.clone());
                state.messages.push(ChatMessage::assistant_in_thread(
                    &response.response,
                    &response.thread_id,
                ));
                SendOutcome::Completed {
                    reply: response.response,
                }
            }
            Err(ApiError::Cancelled) => {
                state.messages.push(ChatMessage::assistant(CANCELLED_MESSAGE));
                SendOutcome::Cancelled {
                    notice: CANCELLED_MESSAGE.to_string(),
                }
            }
            Err(err) => {
                error!(error = %err, "query failed");
                state
                    .messages
                    .push(ChatMessage::assistant(GENERIC_ERROR_MESSAGE));
                SendOutcome::Failed {
                    message: GENERIC_ERROR_MESSAGE.to_string(),
                }
            }
        }
    }

    /// Cancel the in-flight request, if any.
    ///
    /// Cancels the local token, then best-effort notifies the backend keyed
    /// by the current thread. A failed notification is logged and swallowed;
    /// the local abort already satisfies the user-visible contract. Returns
    /// whether there was a request to cancel.
    pub async fn cancel_request(&self) -> bool {
        let (cancel, thread_id) = {
            let state = self.state.lock().unwrap();
            (state.cancel.clone(), state.thread_id.clone())
        };

        let Some(cancel) = cancel else {
            return false;
        };
        cancel.cancel();

        if let Some(thread_id) = thread_id {
            if let Err(err) = self.api.cancel(&thread_id).await {
                warn!(error = %err, thread_id = %thread_id, "cancel notification failed");
            }
        }
        true
    }

    /// Reset to a fresh conversation: one welcome message, no thread.
    pub fn clear_chat(&self) {
        let mut state = self.state.lock().unwrap();
        state.messages = vec![ChatMessage::welcome()];
        state.thread_id = None;
    }

    /// Append an assistant notice (used for PDP progress messages).
    /// Returns the message index for later replacement.
    pub fn append_notice(&self, text: impl Into<String>) -> usize {
        let mut state = self.state.lock().unwrap();
        state.messages.push(ChatMessage::assistant(text));
        state.messages.len() - 1
    }

    /// Replace a previously appended message in place.
    pub fn replace_message(&self, index: usize, text: impl Into<String>) {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.messages.get_mut(index) {
            message.content = text.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FeedbackAck, PdpDocument, PdpUpload, QueryResponse};
    use crate::telemetry::noop_tracker;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    // =========================================================================
    // Test Doubles
    // =========================================================================

    /// How the mock backend answers queries.
    enum QueryBehavior {
        /// Reply immediately with the given thread id.
        Reply { thread_id: &'static str },
        /// Fail with a transport-style error.
        Fail,
        /// Block until the request's cancellation token fires.
        WaitForCancel,
        /// Signal `started`, then block until `release` is notified.
        Gated,
    }

    struct MockApi {
        behavior: QueryBehavior,
        requests: Mutex<Vec<QueryRequest>>,
        cancels: Mutex<Vec<String>>,
        cancel_fails: bool,
        started: Notify,
        release: Notify,
    }

    impl MockApi {
        fn new(behavior: QueryBehavior) -> Self {
            Self {
                behavior,
                requests: Mutex::new(Vec::new()),
                cancels: Mutex::new(Vec::new()),
                cancel_fails: false,
                started: Notify::new(),
                release: Notify::new(),
            }
        }
    }

    #[async_trait]
    impl AgentApi for MockApi {
        async fn query(
            &self,
            request: &QueryRequest,
            cancel: &CancellationToken,
        ) -> Result<QueryResponse, ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            match self.behavior {
                QueryBehavior::Reply { thread_id } => Ok(QueryResponse {
                    status: "success".to_string(),
                    thread_id: thread_id.to_string(),
                    response: format!("echo: {}", request.query),
                    full_thought_process: None,
                }),
                QueryBehavior::Fail => Err(ApiError::Invalid("boom".to_string())),
                QueryBehavior::WaitForCancel => {
                    self.started.notify_one();
                    cancel.cancelled().await;
                    Err(ApiError::Cancelled)
                }
                QueryBehavior::Gated => {
                    self.started.notify_one();
                    self.release.notified().await;
                    Ok(QueryResponse {
                        status: "success".to_string(),
                        thread_id: "t-gated".to_string(),
                        response: "done".to_string(),
                        full_thought_process: None,
                    })
                }
            }
        }

        async fn cancel(&self, thread_id: &str) -> Result<(), ApiError> {
            self.cancels.lock().unwrap().push(thread_id.to_string());
            if self.cancel_fails {
                return Err(ApiError::Invalid("cancel rejected".to_string()));
            }
            Ok(())
        }

        async fn send_feedback(
            &self,
            _contact: &str,
            _feedback: &str,
        ) -> Result<FeedbackAck, ApiError> {
            unimplemented!("not used by conversation tests")
        }

        async fn generate_pdp(&self, _upload: PdpUpload) -> Result<PdpDocument, ApiError> {
            unimplemented!("not used by conversation tests")
        }
    }

    fn conversation(api: MockApi) -> (Arc<Conversation>, Arc<MockApi>) {
        let api = Arc::new(api);
        let conv = Arc::new(Conversation::new(api.clone(), noop_tracker()));
        (conv, api)
    }

    // =========================================================================
    // Transcript Tests
    // =========================================================================

    #[test]
    fn test_starts_with_welcome_message() {
        let (conv, _) = conversation(MockApi::new(QueryBehavior::Reply { thread_id: "t" }));
        let messages = conv.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, WELCOME_MESSAGE);
        assert!(conv.thread_id().is_none());
        assert!(!conv.is_loading());
    }

    #[tokio::test]
    async fn test_successful_send_appends_user_and_assistant() {
        let (conv, _) = conversation(MockApi::new(QueryBehavior::Reply { thread_id: "t-1" }));

        let outcome = conv.send_message("hello").await;
        assert_eq!(
            outcome,
            SendOutcome::Completed {
                reply: "echo: hello".to_string()
            }
        );

        let messages = conv.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[2].role, ChatRole::Assistant);
        assert_eq!(messages[2].thread_id.as_deref(), Some("t-1"));
        assert!(!conv.is_loading());
    }

    // =========================================================================
    // Thread Identity Tests
    // =========================================================================

    #[tokio::test]
    async fn test_thread_id_adopted_and_echoed_on_next_request() {
        let (conv, api) = conversation(MockApi::new(QueryBehavior::Reply { thread_id: "t-9" }));

        conv.send_message("first").await;
        assert_eq!(conv.thread_id().as_deref(), Some("t-9"));

        conv.send_message("second").await;
        let requests = api.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].thread_id.is_none());
        assert_eq!(requests[1].thread_id.as_deref(), Some("t-9"));
    }

    // =========================================================================
    // Loading Gate Tests
    // =========================================================================

    #[tokio::test]
    async fn test_send_while_loading_is_rejected() {
        let (conv, api) = conversation(MockApi::new(QueryBehavior::Gated));

        let background = {
            let conv = conv.clone();
            tokio::spawn(async move { conv.send_message("slow one").await })
        };
        api.started.notified().await;
        assert!(conv.is_loading());

        // Second send must be refused with no state change and no API call.
        let before = conv.messages().len();
        let outcome = conv.send_message("impatient").await;
        assert_eq!(outcome, SendOutcome::Rejected);
        assert_eq!(conv.messages().len(), before);
        assert_eq!(api.requests.lock().unwrap().len(), 1);

        api.release.notify_one();
        let first = background.await.unwrap();
        assert!(matches!(first, SendOutcome::Completed { .. }));
        assert!(!conv.is_loading());
    }

    // =========================================================================
    // Cancellation Tests
    // =========================================================================

    #[tokio::test]
    async fn test_cancel_appends_exactly_one_cancelled_notice() {
        let (conv, api) = conversation(MockApi::new(QueryBehavior::WaitForCancel));

        let background = {
            let conv = conv.clone();
            tokio::spawn(async move { conv.send_message("long question").await })
        };
        api.started.notified().await;

        assert!(conv.cancel_request().await);
        let outcome = background.await.unwrap();
        assert_eq!(
            outcome,
            SendOutcome::Cancelled {
                notice: CANCELLED_MESSAGE.to_string()
            }
        );

        // Welcome + user + cancelled notice, and no error message.
        let messages = conv.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].content, CANCELLED_MESSAGE);
        assert!(!messages.iter().any(|m| m.content == GENERIC_ERROR_MESSAGE));
        assert!(!conv.is_loading());
    }

    #[tokio::test]
    async fn test_cancel_without_thread_skips_backend_notification() {
        let (conv, api) = conversation(MockApi::new(QueryBehavior::WaitForCancel));

        let background = {
            let conv = conv.clone();
            tokio::spawn(async move { conv.send_message("q").await })
        };
        api.started.notified().await;
        conv.cancel_request().await;
        background.await.unwrap();

        // No thread assigned yet, so nothing to key the cancel call on.
        assert!(api.cancels.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_notifies_backend_with_thread_id() {
        let api = Arc::new(MockApi::new(QueryBehavior::Reply { thread_id: "t-5" }));
        let conv = Arc::new(Conversation::new(api.clone(), noop_tracker()));
        conv.send_message("establish thread").await;

        // Fake an in-flight request so cancel_request has something to abort.
        let token = CancellationToken::new();
        conv.state.lock().unwrap().cancel = Some(token.clone());

        assert!(conv.cancel_request().await);
        assert!(token.is_cancelled());
        assert_eq!(api.cancels.lock().unwrap().as_slice(), ["t-5"]);
    }

    #[tokio::test]
    async fn test_cancel_notification_failure_is_swallowed() {
        let mut mock = MockApi::new(QueryBehavior::Reply { thread_id: "t-2" });
        mock.cancel_fails = true;
        let api = Arc::new(mock);
        let conv = Arc::new(Conversation::new(api.clone(), noop_tracker()));
        conv.send_message("hi").await;

        let token = CancellationToken::new();
        conv.state.lock().unwrap().cancel = Some(token);

        // Still reports success: the local abort is what the user sees.
        assert!(conv.cancel_request().await);
    }

    #[tokio::test]
    async fn test_cancel_with_nothing_in_flight_is_noop() {
        let (conv, api) = conversation(MockApi::new(QueryBehavior::Reply { thread_id: "t" }));
        assert!(!conv.cancel_request().await);
        assert!(api.cancels.lock().unwrap().is_empty());
    }

    // =========================================================================
    // Failure Tests
    // =========================================================================

    #[tokio::test]
    async fn test_failed_send_appends_one_generic_error() {
        let (conv, _) = conversation(MockApi::new(QueryBehavior::Fail));

        let outcome = conv.send_message("hello").await;
        assert_eq!(
            outcome,
            SendOutcome::Failed {
                message: GENERIC_ERROR_MESSAGE.to_string()
            }
        );

        let messages = conv.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].content, GENERIC_ERROR_MESSAGE);
        assert!(!conv.is_loading());
        // A failed first exchange leaves the thread unassigned.
        assert!(conv.thread_id().is_none());
    }

    // =========================================================================
    // Clear Chat Tests
    // =========================================================================

    #[tokio::test]
    async fn test_clear_chat_resets_to_single_welcome() {
        let (conv, _) = conversation(MockApi::new(QueryBehavior::Reply { thread_id: "t-3" }));
        conv.send_message("one").await;
        conv.send_message("two").await;
        assert!(conv.messages().len() > 1);
        assert!(conv.thread_id().is_some());

        conv.clear_chat();
        let messages = conv.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, WELCOME_MESSAGE);
        assert!(conv.thread_id().is_none());
    }

    // =========================================================================
    // Notice Replacement Tests
    // =========================================================================

    #[test]
    fn test_append_and_replace_notice() {
        let (conv, _) = conversation(MockApi::new(QueryBehavior::Reply { thread_id: "t" }));
        let index = conv.append_notice("Generating...");
        assert_eq!(conv.messages()[index].content, "Generating...");

        conv.replace_message(index, "Done!");
        let messages = conv.messages();
        assert_eq!(messages[index].content, "Done!");
        // Replacement edits in place rather than appending.
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn test_replace_out_of_range_is_ignored() {
        let (conv, _) = conversation(MockApi::new(QueryBehavior::Reply { thread_id: "t" }));
        conv.replace_message(99, "ghost");
        assert_eq!(conv.messages().len(), 1);
    }
}
