//! Test-only mock LLM provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::provider::{ChatOptions, LlmProvider, Message};

#[derive(Debug, Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<String>>>,
    calls: Arc<AtomicUsize>,
    last_prompt: Arc<Mutex<Option<String>>>,
    pub default_response: String,
    pub fail_chat: bool,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
            default_response: "mock response".into(),
            fail_chat: false,
        }
    }
}

impl MockProvider {
    #[must_use]
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_chat: true,
            ..Self::default()
        }
    }

    /// Number of `chat` calls made so far, including failed ones.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Content of the most recent user message, if any call was made.
    #[must_use]
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl LlmProvider for MockProvider {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "mock"
    }

    async fn chat(&self, messages: &[Message], _opts: ChatOptions) -> Result<String, crate::LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(last) = messages.last() {
            *self.last_prompt.lock().unwrap() = Some(last.content.clone());
        }
        if self.fail_chat {
            return Err(crate::LlmError::Other("mock LLM error".into()));
        }
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(self.default_response.clone())
        } else {
            Ok(responses.remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_responses_in_order() {
        let p = MockProvider::with_responses(vec!["first".into(), "second".into()]);
        let msgs = vec![Message::user("hi")];
        assert_eq!(p.chat(&msgs, ChatOptions::default()).await.unwrap(), "first");
        assert_eq!(p.chat(&msgs, ChatOptions::default()).await.unwrap(), "second");
        assert_eq!(
            p.chat(&msgs, ChatOptions::default()).await.unwrap(),
            "mock response"
        );
        assert_eq!(p.call_count(), 3);
    }

    #[tokio::test]
    async fn failing_provider_errors_and_counts() {
        let p = MockProvider::failing();
        let msgs = vec![Message::user("hi")];
        assert!(p.chat(&msgs, ChatOptions::default()).await.is_err());
        assert_eq!(p.call_count(), 1);
    }

    #[tokio::test]
    async fn records_last_prompt() {
        let p = MockProvider::default();
        let msgs = vec![Message::user("what is rust?")];
        p.chat(&msgs, ChatOptions::default()).await.unwrap();
        assert_eq!(p.last_prompt().as_deref(), Some("what is rust?"));
    }

    #[test]
    fn clone_shares_call_counter() {
        let p = MockProvider::default();
        let c = p.clone();
        p.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(c.call_count(), 1);
    }
}
