//! services/api/src/adapters/gemini.rs
//!
//! This module contains the Gemini adapter, which is the concrete implementation
//! of the `ImageGenerationService` port. It talks to the Generative Language
//! REST API with `reqwest`, carrying inline images as base64 payloads in both
//! directions.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use archstudio_core::domain::ImageData;
use archstudio_core::ports::{ImageGenerationService, OutputOptions, PortError, PortResult};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A provider adapter that implements the `ImageGenerationService` port
/// against the Gemini REST API.
#[derive(Clone)]
pub struct GeminiAdapter {
    http: reqwest::Client,
    base_url: String,
}

impl GeminiAdapter {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Overridable base URL so tests can point the adapter at a local server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        body: &GenerateContentRequest,
    ) -> PortResult<GenerateContentResponse> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(format!("Provider request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized,
                StatusCode::NOT_FOUND => {
                    PortError::NotFound(format!("Model {} not found", model))
                }
                StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited(detail),
                _ => PortError::Unexpected(format!("Provider returned {}: {}", status, detail)),
            });
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| PortError::Unexpected(format!("Malformed provider response: {}", e)))
    }
}

impl Default for GeminiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================================
// Wire Format Structs
//=========================================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "inlineData")]
    InlineData(InlineData),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    image_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

fn image_parts(response: GenerateContentResponse) -> impl Iterator<Item = InlineData> {
    response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.inline_data)
}

fn text_parts(response: GenerateContentResponse) -> impl Iterator<Item = String> {
    response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
}

//=========================================================================================
// `ImageGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ImageGenerationService for GeminiAdapter {
    async fn generate_image(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
        images: &[ImageData],
        options: OutputOptions,
    ) -> PortResult<ImageData> {
        let mut parts = vec![Part::Text(prompt.to_string())];
        for image in images {
            parts.push(Part::InlineData(InlineData {
                mime_type: image.mime_type.clone(),
                data: BASE64.encode(&image.data),
            }));
        }

        let image_config = if options.high_resolution || options.widescreen {
            Some(ImageConfig {
                image_size: options.high_resolution.then(|| "2K".to_string()),
                aspect_ratio: options.widescreen.then(|| "16:9".to_string()),
            })
        } else {
            None
        };

        let body = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: image_config.map(|ic| GenerationConfig {
                image_config: Some(ic),
            }),
        };

        let response = self.generate_content(api_key, model, &body).await?;

        let inline = image_parts(response)
            .next()
            .ok_or(PortError::EmptyResponse)?;
        let bytes = BASE64
            .decode(inline.data.as_bytes())
            .map_err(|e| PortError::Unexpected(format!("Invalid image payload: {}", e)))?;
        Ok(ImageData::new(inline.mime_type, bytes))
    }

    async fn describe_plan(
        &self,
        api_key: &str,
        model: &str,
        instruction: &str,
        plan: &ImageData,
    ) -> PortResult<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text(instruction.to_string()),
                    Part::InlineData(InlineData {
                        mime_type: plan.mime_type.clone(),
                        data: BASE64.encode(&plan.data),
                    }),
                ],
            }],
            generation_config: None,
        };

        let response = self.generate_content(api_key, model, &body).await?;

        text_parts(response).next().ok_or(PortError::EmptyResponse)
    }
}
