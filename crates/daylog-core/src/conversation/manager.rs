//! Conversation lifecycle management.

use super::message::{ConversationMessage, MessageRole};
use crate::error::{DaylogError, Result};
use crate::provider::{ChatProvider, GenerationConfig};

/// The fixed system instruction that opens every conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that can answer any question.";

/// Apology returned when the provider fails for transport/auth/rate-limit reasons.
pub const APOLOGY_TECHNICAL: &str = "Sorry, I'm experiencing technical difficulties.";

/// Apology returned for any other provider-side failure.
pub const APOLOGY_UNDERSTANDING: &str =
    "Sorry, I'm having trouble understanding. Please try again later.";

/// Number of trailing messages (beyond the system prompt) sent as provider
/// context. The full history is retained in memory; only the request context
/// is bounded, so long sessions cannot outgrow provider limits.
pub const DEFAULT_CONTEXT_WINDOW: usize = 64;

/// Turn state: the manager is single-threaded, so at most one chat turn is
/// ever in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnState {
    /// No turn in flight.
    Idle,
    /// A request has been sent and not yet resolved.
    AwaitingReply,
}

/// Maintains an append-only, role-tagged conversation transcript and
/// mediates turns with a chat provider.
///
/// The history begins with exactly one system message that never changes.
/// User entries are retained even when the provider call for their turn
/// fails, so the transcript records every attempt. The history is in-memory
/// only and is not persisted across restarts.
pub struct ConversationManager {
    history: Vec<ConversationMessage>,
    state: TurnState,
    context_window: usize,
}

impl ConversationManager {
    /// Creates a conversation containing only the fixed system message.
    pub fn new() -> Self {
        Self {
            history: vec![ConversationMessage::system(DEFAULT_SYSTEM_PROMPT)],
            state: TurnState::Idle,
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }

    /// Overrides the trailing context window size.
    pub fn with_context_window(mut self, window: usize) -> Self {
        self.context_window = window;
        self
    }

    /// The full transcript, system message first.
    pub fn history(&self) -> &[ConversationMessage] {
        &self.history
    }

    /// Number of messages in the transcript, including the system message.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether the transcript holds only the system message.
    pub fn is_empty(&self) -> bool {
        self.history.len() <= 1
    }

    /// Whether a turn is currently awaiting a provider reply.
    pub fn in_flight(&self) -> bool {
        self.state == TurnState::AwaitingReply
    }

    /// Sends one user turn through the chat provider.
    ///
    /// An empty or whitespace-only message is rejected with a validation
    /// error and no state change. Otherwise the user entry is appended, the
    /// provider is called with the bounded conversation context, and on
    /// success the assistant reply is appended and returned.
    ///
    /// Provider failures are absorbed: no assistant entry is appended, the
    /// manager returns to idle, and a fixed apology string is returned. One
    /// wording covers transport/auth failures, another anything else.
    pub async fn send_turn(
        &mut self,
        user_message: &str,
        provider: &dyn ChatProvider,
    ) -> Result<String> {
        let message = user_message.trim();
        if message.is_empty() {
            return Err(DaylogError::validation("message", "must not be empty"));
        }

        self.history.push(ConversationMessage::user(message));
        self.state = TurnState::AwaitingReply;

        let config = GenerationConfig::chat();
        let context = self.context();
        let result = provider
            .chat(&context, config.max_tokens, config.temperature)
            .await;
        self.state = TurnState::Idle;

        match result {
            Ok(reply) => {
                self.history.push(ConversationMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(DaylogError::Provider(message)) => {
                tracing::warn!(error = %message, "chat provider call failed");
                Ok(APOLOGY_TECHNICAL.to_string())
            }
            Err(err) => {
                tracing::warn!(error = %err, "unexpected chat failure");
                Ok(APOLOGY_UNDERSTANDING.to_string())
            }
        }
    }

    /// Builds the provider context: the system message plus the trailing
    /// `context_window` messages of the rest of the transcript.
    fn context(&self) -> Vec<ConversationMessage> {
        let rest = &self.history[1..];
        let tail_start = rest.len().saturating_sub(self.context_window);
        let mut context = Vec::with_capacity(1 + rest.len() - tail_start);
        context.push(self.history[0].clone());
        context.extend_from_slice(&rest[tail_start..]);
        context
    }
}

impl Default for ConversationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock provider that records the context it was called with.
    struct MockChatProvider {
        reply: std::result::Result<String, DaylogError>,
        seen_context: Mutex<Vec<ConversationMessage>>,
    }

    impl MockChatProvider {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                seen_context: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: DaylogError) -> Self {
            Self {
                reply: Err(err),
                seen_context: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatProvider for MockChatProvider {
        async fn chat(
            &self,
            messages: &[ConversationMessage],
            _max_tokens: u32,
            _temperature: f32,
        ) -> Result<String> {
            *self.seen_context.lock().unwrap() = messages.to_vec();
            self.reply.clone()
        }
    }

    #[test]
    fn test_new_conversation_has_only_system_message() {
        let manager = ConversationManager::new();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.history()[0].role, MessageRole::System);
        assert_eq!(manager.history()[0].content, DEFAULT_SYSTEM_PROMPT);
        assert!(!manager.in_flight());
    }

    #[tokio::test]
    async fn test_send_turn_appends_user_and_assistant() {
        let mut manager = ConversationManager::new();
        let provider = MockChatProvider::replying("Hello there");

        let reply = manager.send_turn("Hi", &provider).await.unwrap();

        assert_eq!(reply, "Hello there");
        assert_eq!(manager.len(), 3);
        assert_eq!(manager.history()[1].role, MessageRole::User);
        assert_eq!(manager.history()[1].content, "Hi");
        assert_eq!(manager.history()[2].role, MessageRole::Assistant);
        assert!(!manager.in_flight());
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected_without_state_change() {
        let mut manager = ConversationManager::new();
        let provider = MockChatProvider::replying("unused");

        let err = manager.send_turn("   ", &provider).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(manager.len(), 1);
        assert!(provider.seen_context.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_user_entry_only() {
        let mut manager = ConversationManager::new();
        let provider = MockChatProvider::failing(DaylogError::provider("503"));

        let reply = manager.send_turn("Hi", &provider).await.unwrap();

        assert_eq!(reply, APOLOGY_TECHNICAL);
        // History grew by exactly one: the user entry records the attempt.
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.history()[1].role, MessageRole::User);
        assert!(!manager.in_flight());
    }

    #[tokio::test]
    async fn test_unknown_failure_uses_other_apology() {
        let mut manager = ConversationManager::new();
        let provider = MockChatProvider::failing(DaylogError::unknown("bad json"));

        let reply = manager.send_turn("Hi", &provider).await.unwrap();

        assert_eq!(reply, APOLOGY_UNDERSTANDING);
        assert_eq!(manager.len(), 2);
    }

    #[tokio::test]
    async fn test_context_includes_full_history_when_short() {
        let mut manager = ConversationManager::new();
        let provider = MockChatProvider::replying("ok");

        manager.send_turn("first", &provider).await.unwrap();
        manager.send_turn("second", &provider).await.unwrap();

        let context = provider.seen_context.lock().unwrap();
        // system + first exchange + second user message
        assert_eq!(context.len(), 4);
        assert_eq!(context[0].role, MessageRole::System);
        assert_eq!(context.last().unwrap().content, "second");
    }

    #[tokio::test]
    async fn test_context_window_bounds_request_but_not_history() {
        let mut manager = ConversationManager::new().with_context_window(2);
        let provider = MockChatProvider::replying("ok");

        for i in 0..5 {
            manager.send_turn(&format!("msg {i}"), &provider).await.unwrap();
        }

        // Full history retained: system + 5 * (user, assistant)
        assert_eq!(manager.len(), 11);

        let context = provider.seen_context.lock().unwrap();
        // Last request context: system message + trailing 2
        assert_eq!(context.len(), 3);
        assert_eq!(context[0].role, MessageRole::System);
        assert_eq!(context[2].content, "msg 4");
    }
}
