//! Browser text-generation adapter posting OpenAI-compatible chat-completion requests.

use platform_host::{ChatMessage, GenerationRequest, TextGenerationFuture, TextGenerationService};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Deserialize)]
struct ChatCompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Serializes `request` into the chat-completion body sent to `model`'s endpoint.
///
/// # Errors
///
/// Returns an error string if serialization fails.
pub fn build_chat_body(model: &str, request: &GenerationRequest) -> Result<String, String> {
    serde_json::to_string(&ChatCompletionBody {
        model,
        messages: &request.messages,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    })
    .map_err(|err| format!("encode chat request failed: {err}"))
}

/// Reads `choices[0].message.content` from a chat-completion response.
///
/// A well-formed response without choices or content yields an empty string; callers treat
/// that the same as any other unusable output.
///
/// # Errors
///
/// Returns an error string when `raw` is not a chat-completion JSON document.
pub fn extract_completion_text(raw: &str) -> Result<String, String> {
    let response: ChatCompletionResponse =
        serde_json::from_str(raw).map_err(|err| format!("decode chat response failed: {err}"))?;
    Ok(response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Text-generation adapter backed by the browser `fetch` API.
pub struct WebTextGenerationService {
    endpoint: String,
    model: String,
}

impl WebTextGenerationService {
    /// Creates an adapter posting to `endpoint` (absolute or page-relative) for `model`.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Configured model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }
}

impl TextGenerationService for WebTextGenerationService {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> TextGenerationFuture<'a, Result<String, String>> {
        Box::pin(async move {
            let body = build_chat_body(&self.model, request)?;
            let raw = post_json(&self.endpoint, body).await?;
            extract_completion_text(&raw)
        })
    }
}

#[cfg(target_arch = "wasm32")]
async fn post_json(endpoint: &str, body: String) -> Result<String, String> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    fn js_err(err: JsValue) -> String {
        format!("{err:?}")
    }

    let window = web_sys::window().ok_or_else(|| "no browser window".to_string())?;
    let headers = web_sys::Headers::new().map_err(js_err)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(js_err)?;

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&body));
    let request = web_sys::Request::new_with_str_and_init(endpoint, &init).map_err(js_err)?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|err| format!("generation request failed: {}", js_err(err)))?;
    let response: web_sys::Response = response.dyn_into().map_err(js_err)?;
    if !response.ok() {
        return Err(format!(
            "generation endpoint returned HTTP {}",
            response.status()
        ));
    }

    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    text.as_string()
        .ok_or_else(|| "generation response body was not text".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
async fn post_json(endpoint: &str, body: String) -> Result<String, String> {
    let _ = body;
    Err(format!("fetch is unavailable outside the browser (endpoint {endpoint})"))
}
