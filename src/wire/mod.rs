use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::framework::Framework;

/// ========================================
/// Shared request/response types
/// ========================================

/// One run of the tool. Stamped into the artifact directory name so
/// request/response dumps from different runs never collide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tx {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl Tx {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4(), timestamp: Utc::now() }
    }
}

/// The three free-text fields plus the optional framework and the language
/// the strategy table must be written in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignInput {
    pub product_desc: String,
    pub target_audience: String,
    pub main_message: String,
    pub framework: Option<Framework>,
    pub output_language: String,
}

/// Structured summary of a scraped product page. Field names match the JSON
/// schema sent to the model, so this deserializes straight off the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSummary {
    #[serde(rename = "productDesc")]
    pub product_desc: String,
    #[serde(rename = "targetAudience")]
    pub target_audience: String,
    #[serde(rename = "mainMessage")]
    pub main_message: String,
}

/// The three details parsed out of an ad-image analysis response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDetails {
    pub product_desc: String,
    pub target_audience: String,
    pub main_message: String,
}

/// Inline image payload for a multimodal call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagePart {
    pub mime_type: String,
    pub data_base64: String,
}

/// A single model call as the provider sees it: the prompt text, an optional
/// JSON schema constraining the response, and an optional image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImagePart>,
}

impl GenerateRequest {
    pub fn text(prompt: String) -> Self {
        Self { prompt, response_schema: None, image: None }
    }

    pub fn structured(prompt: String, schema: Value) -> Self {
        Self { prompt, response_schema: Some(schema), image: None }
    }

    pub fn with_image(prompt: String, image: ImagePart) -> Self {
        Self { prompt, response_schema: None, image: Some(image) }
    }
}
