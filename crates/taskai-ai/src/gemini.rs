use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GatewayError;
use crate::model::{Content, ContentRole, GenerateRequest, GenerativeModel};

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// A missing key is only reported when a request is made.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model.trim()
        )
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingApiKey)?;

        let payload = GeminiRequest {
            system_instruction: request
                .system_instruction
                .as_deref()
                .filter(|text| !text.trim().is_empty())
                .map(|text| GeminiContent {
                    role: None,
                    parts: vec![GeminiPart { text }],
                }),
            contents: request.contents.iter().map(to_gemini_content).collect(),
        };

        debug!(
            model = %request.model,
            turns = payload.contents.len(),
            "sending generateContent request"
        );

        let response = self
            .http
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", api_key.trim())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let (code, message) = serde_json::from_str::<GeminiErrorResponse>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .map(|detail| (detail.code, detail.message))
                .unwrap_or((status.as_u16(), body));
            return Err(GatewayError::Api { code, message });
        }

        let output: GeminiResponse = serde_json::from_str(&body)
            .map_err(|err| GatewayError::InvalidResponse(err.to_string()))?;

        let text = output
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty());

        if text.is_none() {
            warn!(model = %request.model, "empty completion content");
        }

        Ok(text)
    }
}

fn to_gemini_content(content: &Content) -> GeminiContent<'_> {
    GeminiContent {
        role: Some(match content.role {
            ContentRole::User => "user",
            ContentRole::Model => "model",
        }),
        parts: vec![GeminiPart {
            text: &content.text,
        }],
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent<'a>>,
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    code: u16,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn request() -> GenerateRequest {
        GenerateRequest {
            model: "gemini-2.5-flash".to_owned(),
            system_instruction: Some("Be brief.".to_owned()),
            contents: vec![
                Content::user("hi"),
                Content {
                    role: ContentRole::Model,
                    text: "hello".to_owned(),
                },
                Content::user("plan my day"),
            ],
        }
    }

    fn client(server: &MockServer, key: Option<&str>) -> GeminiClient {
        GeminiClient::new(server.uri(), key.map(ToOwned::to_owned), None).expect("client")
    }

    #[tokio::test]
    async fn sends_contents_and_joins_parts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_json(json!({
                "systemInstruction": { "parts": [{ "text": "Be brief." }] },
                "contents": [
                    { "role": "user", "parts": [{ "text": "hi" }] },
                    { "role": "model", "parts": [{ "text": "hello" }] },
                    { "role": "user", "parts": [{ "text": "plan my day" }] }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "- Wake " }, { "text": "up" }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server, Some("test-key"))
            .generate(&request())
            .await
            .expect("generate");

        assert_eq!(text.as_deref(), Some("- Wake up"));
    }

    #[tokio::test]
    async fn maps_error_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "API key not valid" }
            })))
            .mount(&server)
            .await;

        let err = client(&server, Some("bad-key"))
            .generate(&request())
            .await
            .expect_err("should fail");

        match err {
            GatewayError::Api { code, message } => {
                assert_eq!(code, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn falls_back_to_status_and_body_without_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client(&server, Some("key"))
            .generate(&request())
            .await
            .expect_err("should fail");

        assert!(matches!(err, GatewayError::Api { code: 502, ref message } if message == "bad gateway"));
    }

    #[tokio::test]
    async fn empty_candidates_yield_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let text = client(&server, Some("key"))
            .generate(&request())
            .await
            .expect("generate");

        assert!(text.is_none());
    }

    #[tokio::test]
    async fn whitespace_reply_is_still_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "role": "model", "parts": [{ "text": "  \n" }] } }]
            })))
            .mount(&server)
            .await;

        let text = client(&server, Some("key"))
            .generate(&request())
            .await
            .expect("generate");

        assert_eq!(text.as_deref(), Some("  \n"));
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server, Some("key"))
            .generate(&request())
            .await
            .expect_err("should fail");

        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn missing_key_fails_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server, Some("   "))
            .generate(&request())
            .await
            .expect_err("should fail");

        assert!(matches!(err, GatewayError::MissingApiKey));
    }
}
