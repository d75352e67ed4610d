//! Gemini gateway implementation.
//!
//! Sends the document inline with the instruction prompt to Google's
//! `generateContent` endpoint and extracts the first candidate's text.

use super::{GatewayError, ModelGateway};
use crate::services::metrics;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Gemini API base URL.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini gateway configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

pub struct GeminiGateway {
    config: GeminiConfig,
    client: Client,
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig) -> Self {
        // No request timeout: a hung upstream call hangs the request.
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Build the API URL for the given model and method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            GEMINI_API_BASE, self.config.model, method, self.config.api_key
        )
    }
}

#[async_trait]
impl ModelGateway for GeminiGateway {
    async fn generate(
        &self,
        data: &[u8],
        mime_type: &str,
        instruction: &str,
    ) -> Result<String, GatewayError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    ContentPart::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: BASE64.encode(data),
                        },
                    },
                    ContentPart::Text {
                        text: instruction.to_string(),
                    },
                ],
            }],
        };

        let url = self.api_url("generateContent");

        tracing::debug!(
            model = %self.config.model,
            payload_bytes = data.len(),
            "Sending request to Gemini API"
        );

        let started = Instant::now();

        let response = self.client.post(&url).json(&request).send().await.map_err(|e| {
            metrics::record_gateway_error("network");
            GatewayError::Network(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            metrics::record_gateway_error("api");
            return Err(GatewayError::Api(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response.json().await.map_err(|e| {
            metrics::record_gateway_error("malformed");
            GatewayError::Malformed(format!("failed to parse response: {}", e))
        })?;

        metrics::record_model_call(&self.config.model, started.elapsed().as_secs_f64());

        extract_text(&api_response).ok_or_else(|| {
            metrics::record_gateway_error("malformed");
            GatewayError::Malformed("no text in response candidates".to_string())
        })
    }
}

fn extract_text(response: &GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .and_then(|p| match p {
            ContentPart::Text { text } => Some(text.clone()),
            _ => None,
        })
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_inline_data_then_instruction() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    ContentPart::InlineData {
                        inline_data: InlineData {
                            mime_type: "application/pdf".to_string(),
                            data: BASE64.encode(b"%PDF-1.7"),
                        },
                    },
                    ContentPart::Text {
                        text: "classify this".to_string(),
                    },
                ],
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        let parts = &value["contents"][0]["parts"];

        assert_eq!(parts[0]["inline_data"]["mimeType"], "application/pdf");
        assert_eq!(parts[0]["inline_data"]["data"], BASE64.encode(b"%PDF-1.7"));
        assert_eq!(parts[1]["text"], "classify this");
    }

    #[test]
    fn first_candidate_text_is_extracted() {
        let body = r####"{
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{"text": "### Sensitivity Level\n**Internal**"}]
                    }
                }
            ]
        }"####;

        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            Some("### Sensitivity Level\n**Internal**".to_string()),
            extract_text(&response)
        );
    }

    #[test]
    fn empty_candidates_yield_no_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(None, extract_text(&response));
    }
}
