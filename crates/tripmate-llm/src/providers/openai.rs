use crate::error::{LlmError, Result};
use crate::traits::LlmProvider;
use crate::types::{CompletionRequest, CompletionResponse, FinishReason, TokenUsage};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use tripmate_core::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use tripmate_core::{Message, ModelConfig, Role};

const PROVIDER: &str = "openai";

/// Client for any endpoint speaking the OpenAI chat-completions protocol.
///
/// Pointed at Gemini's compatibility layer by default configuration, but
/// nothing here is Gemini specific.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl OpenAiProvider {
    /// Gemini's OpenAI-compatible endpoint with the default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Self::build(api_key.into(), base_url.into(), None)
    }

    pub fn from_model_config(config: &ModelConfig) -> Result<Self> {
        Ok(Self::build(
            config.api_key.clone(),
            config.base_url.clone(),
            config.request_timeout,
        )?
        .with_model(&config.model))
    }

    fn build(api_key: String, base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url,
            default_model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn convert_messages(&self, messages: &[Message], system: Option<&str>) -> Vec<OpenAiMessage> {
        let mut result = Vec::with_capacity(messages.len() + 1);

        if let Some(sys) = system {
            result.push(OpenAiMessage {
                role: Role::System.as_str().to_string(),
                content: sys.to_string(),
            });
        }

        for msg in messages {
            // The explicit system field wins over stray system turns.
            if msg.role == Role::System && system.is_some() {
                continue;
            }
            result.push(OpenAiMessage {
                role: msg.role.as_str().to_string(),
                content: msg.content.clone(),
            });
        }

        result
    }

    fn parse_response(&self, response: OpenAiResponse) -> Result<CompletionResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::invalid_response("No choices in response"))?;

        let text = choice
            .message
            .content
            .ok_or_else(|| LlmError::invalid_response("Response message has no text content"))?;

        let usage = response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        let mut completion = CompletionResponse::new(
            response.id.unwrap_or_default(),
            response.model.unwrap_or_default(),
            Message::assistant(text),
        )
        .with_usage(usage);

        if let Some(reason) = choice.finish_reason.as_deref() {
            completion = completion.with_finish_reason(FinishReason::from_openai(reason));
        }

        Ok(completion)
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = OpenAiRequest {
            model: &request.model,
            messages: self.convert_messages(&request.messages, request.system.as_deref()),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(model = %request.model, endpoint = %self.endpoint(), "Sending chat completion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    LlmError::AuthenticationFailed(format!("{}: {}", status, text))
                }
                StatusCode::TOO_MANY_REQUESTS => LlmError::rate_limited(PROVIDER, None),
                _ => LlmError::api(PROVIDER, format!("{}: {}", status, text)),
            });
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::invalid_response(format!("Malformed response body: {}", e)))?;
        self.parse_response(openai_response)
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    id: Option<String>,
    model: Option<String>,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

/// Some compatible backends omit either count.
#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn ask(provider: &OpenAiProvider, system: &str, prompt: &str) -> Result<String> {
        let request = CompletionRequest::single_turn(provider.default_model(), system, prompt);
        Ok(provider.complete(request).await?.text_content().to_string())
    }

    fn completion_body(text: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "model": "gemini-2.5-flash",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": text },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 34, "total_tokens": 46 }
        })
    }

    #[test]
    fn test_provider_creation() {
        let provider = OpenAiProvider::new("test-key").unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.default_model(), "gemini-2.5-flash");

        let provider = provider.with_model("gemini-2.0-flash");
        assert_eq!(provider.default_model(), "gemini-2.0-flash");
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let provider = OpenAiProvider::with_base_url(
            "k",
            "https://generativelanguage.googleapis.com/v1beta/openai/",
        )
        .unwrap();

        assert_eq!(
            provider.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
        );
    }

    #[test]
    fn test_message_conversion() {
        let provider = OpenAiProvider::new("test-key").unwrap();

        let converted = provider.convert_messages(&[Message::user("Hello")], Some("You are helpful"));

        assert_eq!(converted.len(), 2);
        assert_eq!(converted[0].role, "system");
        assert_eq!(converted[0].content, "You are helpful");
        assert_eq!(converted[1].role, "user");
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/openai/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gemini-2.5-flash",
                "messages": [
                    { "role": "system", "content": "Be practical." },
                    { "role": "user", "content": "Plan a trip" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Day 1: Lahore")))
            .expect(1)
            .mount(&server)
            .await;

        let config = ModelConfig::new(
            "gemini-2.5-flash",
            format!("{}/v1beta/openai/", server.uri()),
            "test-key",
        )
        .unwrap();
        let provider = OpenAiProvider::from_model_config(&config).unwrap();

        let request = CompletionRequest::new("gemini-2.5-flash", vec![Message::user("Plan a trip")])
            .with_system("Be practical.");
        let response = provider.complete(request).await.unwrap();

        assert_eq!(response.text_content(), "Day 1: Lahore");
        assert_eq!(response.usage.total(), 46);
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
    }

    #[tokio::test]
    async fn test_single_turn_uses_default_model() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({ "model": "gemini-2.5-flash" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Itinerary")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_base_url("k", server.uri())
            .unwrap()
            .with_model("gemini-2.5-flash");

        assert_eq!(ask(&provider, "sys", "prompt").await.unwrap(), "Itinerary");
    }

    #[tokio::test]
    async fn test_partial_usage_still_returns_plan() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-2",
                "model": "gemini-2.5-flash",
                "choices": [{
                    "message": { "role": "assistant", "content": "Day 1: Swat" },
                    "finish_reason": "stop"
                }],
                "usage": { "prompt_tokens": 12 }
            })))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_base_url("k", server.uri()).unwrap();
        let request = CompletionRequest::single_turn(provider.default_model(), "sys", "prompt");
        let response = provider.complete(request).await.unwrap();

        assert_eq!(response.text_content(), "Day 1: Swat");
        assert_eq!(response.usage.input_tokens, 12);
        assert_eq!(response.usage.output_tokens, 0);
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_base_url("k", server.uri()).unwrap();
        let err = ask(&provider, "sys", "prompt").await.unwrap_err();

        assert!(matches!(err, LlmError::Api { .. }));
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_unauthorized_and_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer bad-key"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer busy-key"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let bad = OpenAiProvider::with_base_url("bad-key", server.uri()).unwrap();
        assert!(matches!(
            ask(&bad, "s", "p").await.unwrap_err(),
            LlmError::AuthenticationFailed(_)
        ));

        let busy = OpenAiProvider::with_base_url("busy-key", server.uri()).unwrap();
        assert!(matches!(
            ask(&busy, "s", "p").await.unwrap_err(),
            LlmError::RateLimited { .. }
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::with_base_url("k", server.uri()).unwrap();
        let err = ask(&provider, "s", "p").await.unwrap_err();

        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_and_null_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer empty"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer null"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": null } }]
            })))
            .mount(&server)
            .await;

        let empty = OpenAiProvider::with_base_url("empty", server.uri()).unwrap();
        assert!(matches!(
            ask(&empty, "s", "p").await.unwrap_err(),
            LlmError::InvalidResponse(_)
        ));

        let null = OpenAiProvider::with_base_url("null", server.uri()).unwrap();
        assert!(matches!(
            ask(&null, "s", "p").await.unwrap_err(),
            LlmError::InvalidResponse(_)
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = OpenAiProvider::with_base_url("k", format!("http://{}", addr)).unwrap();
        let err = ask(&provider, "s", "p").await.unwrap_err();

        assert!(matches!(err, LlmError::Network(_)));
    }
}
