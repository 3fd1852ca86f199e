//! Scripted mock collaborators for exercising the pipeline without network
//! access.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use llm_gateway::{ChatMessage, CompletionOptions, LlmError};

use crate::traits::{Completion, ContextSource};

/// Completion backend that replays a fixed script of responses.
///
/// Once the script is exhausted it returns empty strings, which downstream
/// parsing rejects. Records every user prompt and the last grounding context
/// for assertions.
pub struct MockCompletion {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    last_context: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl MockCompletion {
    pub fn scripted(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(str::to_string).collect()),
            prompts: Mutex::new(Vec::new()),
            last_context: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// User-message contents in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Context attached to the most recent call, if any.
    pub fn last_context(&self) -> Option<String> {
        self.last_context.lock().unwrap().clone()
    }
}

impl Completion for MockCompletion {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        context: Option<&str>,
        _opts: CompletionOptions,
    ) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = messages.last() {
            self.prompts.lock().unwrap().push(msg.content.clone());
        }
        *self.last_context.lock().unwrap() = context.map(str::to_string);

        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.unwrap_or_default())
    }
}

/// Context source backed by an in-memory chunk list.
pub struct MockSource {
    chunks: Vec<String>,
}

impl MockSource {
    pub fn with_chunks(chunks: Vec<String>) -> Self {
        Self { chunks }
    }
}

impl ContextSource for MockSource {
    async fn retrieve(&self, _query: &str, k: usize) -> Vec<String> {
        self.chunks.iter().take(k).cloned().collect()
    }

    async fn retrieve_all(&self) -> Vec<String> {
        self.chunks.clone()
    }
}
