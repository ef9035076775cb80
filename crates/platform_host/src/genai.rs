//! Text-generation host-service contracts.
//!
//! Scenario, feedback, and guardian-chat content is produced by an external language model. The
//! runtime only sees this trait; concrete transports live in `platform_host_web`.

use std::{cell::RefCell, collections::VecDeque, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`TextGenerationService`].
pub type TextGenerationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Default chat model requested from the generation endpoint.
pub const DEFAULT_GENAI_MODEL: &str = "llama-3.3-70b-versatile";

/// Speaker role for one chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions that frame the conversation.
    System,
    /// Player-authored text or a single-shot prompt.
    User,
    /// Model-authored text.
    Assistant,
}

/// One message in a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message author role.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Builds a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Builds a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Builds an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Sampling parameters and messages for one completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Ordered conversation sent to the model.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl GenerationRequest {
    /// Builds a single-prompt request.
    pub fn prompt(prompt: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            temperature,
            max_tokens,
        }
    }
}

/// Host service that turns a [`GenerationRequest`] into raw model text.
///
/// Implementations perform no retries. Callers decide what to substitute on failure.
pub trait TextGenerationService {
    /// Requests one completion and returns the raw text of the first choice.
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> TextGenerationFuture<'a, Result<String, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Text-generation service for hosts without a model endpoint. Every request fails, which routes
/// callers onto their literal fallbacks.
pub struct NoopTextGenerationService;

impl TextGenerationService for NoopTextGenerationService {
    fn generate<'a>(
        &'a self,
        _request: &'a GenerationRequest,
    ) -> TextGenerationFuture<'a, Result<String, String>> {
        Box::pin(async { Err("text generation unavailable".to_string()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory service replaying queued responses in order, recording every request it sees.
///
/// Once the queue is drained, requests fail.
pub struct ScriptedTextGenerationService {
    responses: Rc<RefCell<VecDeque<Result<String, String>>>>,
    requests: Rc<RefCell<Vec<GenerationRequest>>>,
}

impl ScriptedTextGenerationService {
    /// Creates a service that replays `responses`.
    pub fn new(responses: impl IntoIterator<Item = Result<String, String>>) -> Self {
        Self {
            responses: Rc::new(RefCell::new(responses.into_iter().collect())),
            requests: Rc::default(),
        }
    }

    /// Returns the requests received so far.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.borrow().clone()
    }
}

impl TextGenerationService for ScriptedTextGenerationService {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> TextGenerationFuture<'a, Result<String, String>> {
        Box::pin(async move {
            self.requests.borrow_mut().push(request.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err("scripted responses exhausted".to_string()))
        })
    }
}
