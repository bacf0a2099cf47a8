//! Generative text clients.

use crate::config::AssistantConfig;
use crate::error::{AssistantError, AssistantResult};
use crate::gemini::{GenerateContentRequest, GenerateContentResponse, LatLng};
use crate::http::HttpClient;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use std::future::Future;
use tracing::{debug, warn};

/// Longest error body kept in [`AssistantError::Http`].
const MAX_ERROR_BODY: usize = 512;

/// Where a cited source comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A map place.
    Maps,
    /// A web page.
    Web,
}

/// A source cited by a grounded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    /// Origin of the source.
    pub kind: SourceKind,
    /// Display title.
    pub title: String,
    /// Link target.
    pub uri: String,
}

/// A grounded answer and its sources.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GroundedText {
    /// Generated text.
    pub text: String,
    /// Cited sources, in citation order.
    pub sources: Vec<Source>,
}

impl GroundedText {
    /// Map sources only, as shown for navigation.
    pub fn navigation_links(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter().filter(|s| s.kind == SourceKind::Maps)
    }
}

/// Generates text from prompts.
pub trait TextGenerator: Send + Sync {
    /// Answers a prompt.
    fn generate_text(&self, prompt: &str) -> impl Future<Output = AssistantResult<String>> + Send;

    /// Answers a prompt grounded on map data around `location`.
    fn generate_grounded_text(
        &self,
        prompt: &str,
        location: LatLng,
    ) -> impl Future<Output = AssistantResult<GroundedText>> + Send;
}

/// Client of the Gemini content generation API.
pub struct GeminiClient<C: HttpClient> {
    config: AssistantConfig,
    http: C,
}

impl<C: HttpClient> GeminiClient<C> {
    /// Creates a client.
    pub fn new(config: AssistantConfig, http: C) -> Self {
        Self { config, http }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Gets the HTTP client.
    pub fn http(&self) -> &C {
        &self.http
    }

    async fn generate(
        &self,
        request: GenerateContentRequest,
    ) -> AssistantResult<GenerateContentResponse> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(AssistantError::MissingApiKey)?;
        let body = serde_json::to_vec(&request)?;
        let url = self.config.generate_url();
        debug!(model = %self.config.model, bytes = body.len(), "Generating content");

        let headers = [("x-goog-api-key", api_key)];
        let sent = self.http.post_json(&url, &headers, body);
        let response = match tokio::time::timeout(self.config.request_timeout, sent).await {
            Ok(Ok(response)) => response,
            Ok(Err(message)) => return Err(AssistantError::transport(message)),
            Err(_) => return Err(AssistantError::Timeout),
        };

        if !response.is_success() {
            let mut body = String::from_utf8_lossy(&response.body).into_owned();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(AssistantError::Http {
                status: response.status,
                body,
            });
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    fn logged<T>(what: &str, result: AssistantResult<T>) -> AssistantResult<T> {
        if let Err(e) = &result {
            warn!(call = what, error = %e, "Error interacting with Gemini");
        }
        result
    }
}

impl<C: HttpClient> TextGenerator for GeminiClient<C> {
    fn generate_text(&self, prompt: &str) -> impl Future<Output = AssistantResult<String>> + Send {
        let request = GenerateContentRequest::text(prompt, &self.config.system_instruction);
        async move {
            let result = async {
                let text = self.generate(request).await?.text();
                if text.is_empty() {
                    return Err(AssistantError::EmptyResponse);
                }
                Ok(text)
            }
            .await;
            Self::logged("generate_text", result)
        }
    }

    fn generate_grounded_text(
        &self,
        prompt: &str,
        location: LatLng,
    ) -> impl Future<Output = AssistantResult<GroundedText>> + Send {
        let request = GenerateContentRequest::text(prompt, &self.config.system_instruction)
            .with_map_grounding(location);
        async move {
            let result = async {
                let response = self.generate(request).await?;
                let text = response.text();
                if text.is_empty() {
                    return Err(AssistantError::EmptyResponse);
                }
                let sources = response
                    .grounding_chunks()
                    .iter()
                    .filter_map(|chunk| {
                        let (kind, source) = match (&chunk.maps, &chunk.web) {
                            (Some(maps), _) => (SourceKind::Maps, maps),
                            (None, Some(web)) => (SourceKind::Web, web),
                            (None, None) => return None,
                        };
                        Some(Source {
                            kind,
                            title: source.title.clone(),
                            uri: source.uri.clone(),
                        })
                    })
                    .collect();
                Ok(GroundedText { text, sources })
            }
            .await;
            Self::logged("generate_grounded_text", result)
        }
    }
}

/// A scripted generator for testing.
///
/// Answers are consumed in order; once the script runs out every call
/// fails. Prompts are recorded.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    answers: Mutex<VecDeque<AssistantResult<GroundedText>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Creates a generator with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text answer.
    pub fn push_text(&self, text: impl Into<String>) {
        self.push_grounded(GroundedText {
            text: text.into(),
            sources: Vec::new(),
        });
    }

    /// Appends a grounded answer.
    pub fn push_grounded(&self, answer: GroundedText) {
        self.answers.lock().push_back(Ok(answer));
    }

    /// Appends a failure.
    pub fn push_error(&self, error: AssistantError) {
        self.answers.lock().push_back(Err(error));
    }

    /// Returns the prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    fn next(&self, prompt: &str) -> AssistantResult<GroundedText> {
        self.prompts.lock().push(prompt.to_string());
        self.answers
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(AssistantError::transport("no scripted answer")))
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate_text(&self, prompt: &str) -> impl Future<Output = AssistantResult<String>> + Send {
        std::future::ready(self.next(prompt).map(|answer| answer.text))
    }

    fn generate_grounded_text(
        &self,
        prompt: &str,
        _location: LatLng,
    ) -> impl Future<Output = AssistantResult<GroundedText>> + Send {
        std::future::ready(self.next(prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ScriptedHttpClient;
    use serde_json::json;
    use std::time::Duration;

    fn client(http: ScriptedHttpClient) -> GeminiClient<ScriptedHttpClient> {
        let config = AssistantConfig::new()
            .with_api_key("test-key")
            .with_endpoint("http://gemini.test/v1beta")
            .with_system_instruction("És o GSN.");
        GeminiClient::new(config, http)
    }

    fn answer(text: &str) -> serde_json::Value {
        json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }] })
    }

    #[tokio::test]
    async fn missing_key_fails_without_a_request() {
        let client = GeminiClient::new(AssistantConfig::new(), ScriptedHttpClient::new());
        let err = client.generate_text("olá").await.unwrap_err();
        assert!(matches!(err, AssistantError::MissingApiKey));
        assert!(client.http().requests().is_empty());
    }

    #[tokio::test]
    async fn text_request_round_trip() {
        let http = ScriptedHttpClient::new();
        http.push_json(200, &answer("Bom dia!"));
        let client = client(http);

        assert_eq!(client.generate_text("Olá").await.unwrap(), "Bom dia!");
        let requests = client.http().requests();
        let request = &requests[0];
        assert_eq!(
            request.url,
            "http://gemini.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            request.headers,
            [("x-goog-api-key".to_string(), "test-key".to_string())]
        );
        assert_eq!(request.body["contents"][0]["parts"][0]["text"], "Olá");
        assert_eq!(request.body["systemInstruction"]["parts"][0]["text"], "És o GSN.");
        assert!(request.body.get("tools").is_none());
    }

    #[tokio::test]
    async fn grounded_request_extracts_sources() {
        let http = ScriptedHttpClient::new();
        http.push_json(
            200,
            &json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "## Rota" }] },
                    "groundingMetadata": { "groundingChunks": [
                        { "maps": { "uri": "https://maps.example/1", "title": "Moldes RP" } },
                        { "web": { "uri": "https://www.gotec.pt", "title": "GOTEC" } },
                        {}
                    ]}
                }]
            }),
        );
        let client = client(http);

        let grounded = client
            .generate_grounded_text("rota", LatLng::new(39.74, -8.81))
            .await
            .unwrap();
        assert_eq!(grounded.text, "## Rota");
        assert_eq!(grounded.sources.len(), 2);
        let links: Vec<_> = grounded.navigation_links().map(|s| s.title.as_str()).collect();
        assert_eq!(links, ["Moldes RP"]);

        let requests = client.http().requests();
        let body = &requests[0].body;
        assert_eq!(body["tools"][0], json!({ "googleMaps": {} }));
        assert_eq!(body["toolConfig"]["retrievalConfig"]["latLng"]["latitude"], 39.74);
    }

    #[tokio::test]
    async fn http_errors_are_reported() {
        let http = ScriptedHttpClient::new();
        http.push_json(403, &json!({ "error": { "message": "API key not valid" } }));
        http.push_failure("connection refused");
        http.push_json(200, &json!({ "candidates": [] }));
        let client = client(http);

        let err = client.generate_text("a").await.unwrap_err();
        assert!(matches!(err, AssistantError::Http { status: 403, .. }));
        assert!(err.user_message().contains("API key not valid"));
        assert!(matches!(
            client.generate_text("b").await.unwrap_err(),
            AssistantError::Transport { .. }
        ));
        assert!(matches!(
            client.generate_text("c").await.unwrap_err(),
            AssistantError::EmptyResponse
        ));
    }

    struct SlowHttp;

    impl HttpClient for SlowHttp {
        fn post_json(
            &self,
            _url: &str,
            _headers: &[(&str, &str)],
            _body: Vec<u8>,
        ) -> impl Future<Output = Result<crate::http::HttpResponse, String>> + Send {
            std::future::pending()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_service_times_out() {
        let config = AssistantConfig::new()
            .with_api_key("k")
            .with_request_timeout(Duration::from_secs(60));
        let client = GeminiClient::new(config, SlowHttp);
        assert!(matches!(
            client.generate_text("olá").await.unwrap_err(),
            AssistantError::Timeout
        ));
    }

    #[tokio::test]
    async fn scripted_generator_records_prompts() {
        let generator = ScriptedGenerator::new();
        generator.push_text("resposta");
        assert_eq!(generator.generate_text("pergunta").await.unwrap(), "resposta");
        assert!(generator.generate_text("outra").await.is_err());
        assert_eq!(generator.prompts(), ["pergunta", "outra"]);
    }
}
