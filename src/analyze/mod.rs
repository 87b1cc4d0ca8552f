use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use regex::Regex;
use reqwest::Client;

use crate::errors::StratError;
use crate::fetch;
use crate::framework::Framework;
use crate::log::StageLog;
use crate::prompt;
use crate::provider::Provider;
use crate::strategy;
use crate::wire::{CampaignInput, ExtractedDetails, GenerateRequest, ImagePart, PageSummary};

/// What the URL pipeline hands back: the derived ad description (shown to the
/// user so they can see what the strategy was built from) and the strategy
/// Markdown itself.
#[derive(Debug)]
pub struct UrlAnalysis {
    pub input: CampaignInput,
    pub strategy: String,
}

/// The three-step URL pipeline: extract page text, summarize it into the
/// three ad-description fields, pick a framework, then generate the strategy.
/// Each model step is a single call; failures propagate with their kind.
pub async fn analyze_url(
    provider: &dyn Provider,
    client: &Client,
    url: &str,
    output_language: &str,
    stage_log: &StageLog,
    debug: bool,
) -> Result<UrlAnalysis, StratError> {
    let page_text = fetch::extract_page_text(client, url).await?;
    if page_text.trim().is_empty() {
        return Err(StratError::EmptyContent(url.to_string()));
    }
    run_pipeline(provider, &page_text, output_language, stage_log, debug).await
}

/// Steps 2-4, split from the fetch so they can run against any page text.
async fn run_pipeline(
    provider: &dyn Provider,
    page_text: &str,
    output_language: &str,
    stage_log: &StageLog,
    debug: bool,
) -> Result<UrlAnalysis, StratError> {
    // Step 2: schema-constrained summary of the page.
    let summarize_req =
        GenerateRequest::structured(prompt::summarize_prompt(page_text), prompt::summary_schema());
    let raw_summary = provider
        .generate(&summarize_req, debug)
        .await
        .map_err(|e| StratError::Generation(e.to_string()))?;
    stage_log.record("summarize", &summarize_req, &raw_summary);
    let summary = parse_summary(&raw_summary)?;

    // Step 3: framework selection. A reply matching none of the six names is
    // a warning, not a failure; generation proceeds without guidance.
    let select_req = GenerateRequest::text(prompt::framework_selection_prompt(&summary));
    let raw_selection = provider
        .generate(&select_req, debug)
        .await
        .map_err(|e| StratError::Generation(e.to_string()))?;
    stage_log.record("select", &select_req, &raw_selection);
    let framework = Framework::match_in_text(&raw_selection);
    if framework.is_none() {
        eprintln!(
            "warning: model suggested no known framework ({:?}); proceeding without one",
            raw_selection.trim()
        );
    }

    // Step 4: the regular generator with the derived inputs.
    let input = CampaignInput {
        product_desc: summary.product_desc,
        target_audience: summary.target_audience,
        main_message: summary.main_message,
        framework,
        output_language: output_language.to_string(),
    };
    let strategy = strategy::generate_strategy(provider, &input, stage_log, debug).await?;

    Ok(UrlAnalysis { input, strategy })
}

/// Parse the summary JSON. The schema constraint usually yields clean JSON,
/// but a fenced or chatty reply still gets a second chance via the first
/// embedded object.
fn parse_summary(raw: &str) -> Result<PageSummary, StratError> {
    let summary: PageSummary = match serde_json::from_str(raw) {
        Ok(s) => s,
        Err(e) => {
            let obj = extract_first_json_object(raw)
                .ok_or_else(|| StratError::MalformedSummary(e.to_string()))?;
            serde_json::from_str(&obj).map_err(|e| StratError::MalformedSummary(e.to_string()))?
        }
    };

    for (field, value) in [
        ("productDesc", &summary.product_desc),
        ("targetAudience", &summary.target_audience),
        ("mainMessage", &summary.main_message),
    ] {
        if value.trim().is_empty() {
            return Err(StratError::MalformedSummary(format!("field {field} is empty")));
        }
    }
    Ok(summary)
}

/// Extracts the first top-level JSON object substring from a string.
/// Handles nested braces; returns None if not found.
fn extract_first_json_object(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut start = None;
    let mut depth = 0usize;

    for (i, &b) in bytes.iter().enumerate() {
        if b == b'{' {
            if start.is_none() {
                start = Some(i);
            }
            depth += 1;
        } else if b == b'}' {
            if depth > 0 {
                depth -= 1;
                if depth == 0 {
                    if let Some(st) = start {
                        return Some(s[st..=i].to_string());
                    }
                }
            }
        }
    }
    None
}

/// One multimodal call: the ad image plus the fixed `|||` instruction, parsed
/// into the three detail fields.
pub async fn extract_from_image(
    provider: &dyn Provider,
    image_bytes: &[u8],
    mime_type: &str,
    stage_log: &StageLog,
    debug: bool,
) -> Result<ExtractedDetails, StratError> {
    let req = GenerateRequest::with_image(
        prompt::image_extraction_instruction().to_string(),
        ImagePart {
            mime_type: mime_type.to_string(),
            data_base64: BASE64.encode(image_bytes),
        },
    );
    let raw = provider
        .generate(&req, debug)
        .await
        .map_err(|e| StratError::Generation(e.to_string()))?;
    stage_log.record("image", &req, &raw);
    parse_image_details(&raw)
}

/// Split the model reply on the literal `|||` delimiter. Fewer than three
/// segments is a hard failure; segments beyond the third are ignored.
fn parse_image_details(raw: &str) -> Result<ExtractedDetails, StratError> {
    let parts: Vec<String> = raw.split("|||").map(strip_enumeration).collect();
    if parts.len() < 3 {
        return Err(StratError::IncompleteExtraction(format!(
            "expected 3 segments, got {}",
            parts.len()
        )));
    }
    Ok(ExtractedDetails {
        product_desc: parts[0].clone(),
        target_audience: parts[1].clone(),
        main_message: parts[2].clone(),
    })
}

/// Drop a leading enumeration marker like "1." or "2)" plus whitespace.
fn strip_enumeration(segment: &str) -> String {
    let marker = Regex::new(r"^\s*\d+\s*[.)]\s*").unwrap();
    marker.replace(segment.trim(), "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed sequence of replies, one per call.
    struct ScriptedProvider {
        replies: Mutex<VecDeque<String>>,
    }

    impl ScriptedProvider {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|s| s.to_string()).collect()),
            }
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        async fn generate(&self, _req: &GenerateRequest, _debug: bool) -> Result<String> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no scripted reply left"))
        }
    }

    const SUMMARY_JSON: &str = r#"{"productDesc":"bike trade-in service","targetAudience":"owners of old bikes","mainMessage":"trade old bike for discount"}"#;

    #[tokio::test]
    async fn pipeline_selects_framework_from_verbose_reply() {
        let provider =
            ScriptedProvider::new(&[SUMMARY_JSON, "I'd recommend PAS.", "| strategy table |"]);
        let analysis = run_pipeline(&provider, "some page text", "English", &StageLog::disabled(), false)
            .await
            .unwrap();
        assert_eq!(analysis.input.framework, Some(Framework::Pas));
        assert_eq!(analysis.input.product_desc, "bike trade-in service");
        assert_eq!(analysis.strategy, "| strategy table |");
    }

    #[tokio::test]
    async fn pipeline_proceeds_without_framework_on_no_match() {
        let provider =
            ScriptedProvider::new(&[SUMMARY_JSON, "none of these fit", "| strategy table |"]);
        let analysis = run_pipeline(&provider, "some page text", "English", &StageLog::disabled(), false)
            .await
            .unwrap();
        assert_eq!(analysis.input.framework, None);
        assert_eq!(analysis.strategy, "| strategy table |");
    }

    #[tokio::test]
    async fn malformed_summary_fails_the_pipeline() {
        let provider = ScriptedProvider::new(&["not json at all"]);
        let err = run_pipeline(&provider, "text", "English", &StageLog::disabled(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, StratError::MalformedSummary(_)));
    }

    #[test]
    fn parse_summary_accepts_fenced_json() {
        let raw = format!("```json\n{}\n```", SUMMARY_JSON);
        let summary = parse_summary(&raw).unwrap();
        assert_eq!(summary.product_desc, "bike trade-in service");
    }

    #[test]
    fn parse_summary_rejects_empty_fields() {
        let raw = r#"{"productDesc":"","targetAudience":"a","mainMessage":"b"}"#;
        assert!(matches!(parse_summary(raw), Err(StratError::MalformedSummary(_))));
    }

    #[test]
    fn parse_summary_rejects_missing_fields() {
        let raw = r#"{"productDesc":"a","targetAudience":"b"}"#;
        assert!(matches!(parse_summary(raw), Err(StratError::MalformedSummary(_))));
    }

    #[test]
    fn image_details_parse_with_enumeration_markers_stripped() {
        let details =
            parse_image_details("1. Widget ||| 2. Busy professionals ||| 3. Save time").unwrap();
        assert_eq!(
            details,
            ExtractedDetails {
                product_desc: "Widget".into(),
                target_audience: "Busy professionals".into(),
                main_message: "Save time".into(),
            }
        );
    }

    #[test]
    fn image_details_with_two_segments_fail() {
        let err = parse_image_details("Widget ||| Busy professionals").unwrap_err();
        assert!(matches!(err, StratError::IncompleteExtraction(_)));
    }

    #[test]
    fn image_details_ignore_extra_segments() {
        let details =
            parse_image_details("Widget ||| Professionals ||| Save time ||| bonus").unwrap();
        assert_eq!(details.main_message, "Save time");
    }

    #[test]
    fn enumeration_variants_are_stripped() {
        assert_eq!(strip_enumeration("  2) Busy people "), "Busy people");
        assert_eq!(strip_enumeration("3. Save time"), "Save time");
        assert_eq!(strip_enumeration("no marker"), "no marker");
    }
}
