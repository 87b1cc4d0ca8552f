use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::wire::GenerateRequest;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider. Sends one `generateContent` call per request; no retries,
/// no streaming.
pub struct GeminiProvider {
    model: String,
    client: Client,
    timeout_secs: u64,
}

impl GeminiProvider {
    pub fn new(model: String, timeout_secs: u64) -> Self {
        Self {
            model,
            client: Client::new(),
            timeout_secs,
        }
    }

    fn request_body(req: &GenerateRequest) -> Value {
        // The image part, when present, precedes the instruction text.
        let mut parts: Vec<Value> = Vec::new();
        if let Some(image) = &req.image {
            parts.push(json!({
                "inline_data": {
                    "mime_type": image.mime_type,
                    "data": image.data_base64
                }
            }));
        }
        parts.push(json!({ "text": req.prompt }));

        let mut body = json!({
            "contents": [ { "parts": parts } ]
        });
        if let Some(schema) = &req.response_schema {
            body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": schema
            });
        }
        body
    }
}

#[async_trait]
impl super::Provider for GeminiProvider {
    async fn generate(&self, req: &GenerateRequest, debug: bool) -> Result<String> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow!("GEMINI_API_KEY env var is not set"))?;

        let url = format!("{}/models/{}:generateContent", API_BASE, self.model);
        let body = Self::request_body(req);

        if debug {
            eprintln!(
                "debug[gemini]: HTTP POST {} body:\n{}",
                url,
                serde_json::to_string_pretty(&body)?
            );
        }

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if debug {
            eprintln!("debug[gemini]: raw status: {}", status);
            eprintln!("debug[gemini]: raw response:\n{}", &text);
        }

        if !status.is_success() {
            return Err(anyhow!("Gemini API error ({}): {}", status, text));
        }

        // Minimal structs to parse the generateContent response
        #[derive(Deserialize)]
        struct Part {
            #[serde(default)]
            text: String,
        }
        #[derive(Deserialize)]
        struct Content {
            #[serde(default)]
            parts: Vec<Part>,
        }
        #[derive(Deserialize)]
        struct Candidate {
            content: Content,
        }
        #[derive(Deserialize)]
        struct GenerateResponse {
            #[serde(default)]
            candidates: Vec<Candidate>,
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse Gemini response: {e}\nRaw: {text}"))?;

        let content = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if content.is_empty() {
            return Err(anyhow!(
                "Gemini returned no text candidates.\nRaw: {}",
                text
            ));
        }

        Ok(content)
    }
}
