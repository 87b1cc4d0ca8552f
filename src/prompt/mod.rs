use serde_json::{json, Value};

use crate::framework::Framework;
use crate::wire::{CampaignInput, PageSummary};

pub const FUNNEL_STAGES: [&str; 5] =
    ["Awareness", "Engagement", "Consideration", "Conversion", "Retention"];

/// The 8 table columns, in order. Ordering and labeling are a compatibility
/// contract with downstream rendering; never reorder silently.
pub const TABLE_COLUMNS: [&str; 8] = [
    "المرحلة",
    "Cible (الجمهور المستهدف)",
    "Objectif (الهدف)",
    "Stratégie (الاستراتيجية)",
    "Format choisi (الشكل المختار)",
    "Texte dans la photo (النص في الصورة)",
    "Message CTA (رسالة الحث)",
    "Canal (القناة)",
];

/// CTA tone per funnel stage: (stage, directive, example phrasings).
/// Every example must stay under 3 words; the CTA column itself is held to
/// that limit and the examples set the bar.
pub const CTA_TONE_BY_STAGE: [(&str, &str, [&str; 3]); 5] = [
    (
        "Awareness",
        "Create curiosity and urgency to consume the content.",
        ["Discover now", "See why", "Watch this"],
    ),
    (
        "Engagement",
        "Ask a direct question to encourage participation.",
        ["Your thoughts?", "Agree?", "Tried it?"],
    ),
    (
        "Consideration",
        "Build trust and provide proof.",
        ["See reviews", "Read proof", "Compare us"],
    ),
    (
        "Conversion",
        "A strong, direct command to purchase.",
        ["Order now", "Get yours", "Start today"],
    ),
    (
        "Retention",
        "Focus on loyalty and community.",
        ["Join us", "Claim rewards", "Stay close"],
    ),
];

fn column_list() -> String {
    TABLE_COLUMNS
        .iter()
        .map(|c| format!("\"{}\"", c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn cta_stage_rules() -> String {
    let mut out = String::new();
    for (stage, directive, examples) in CTA_TONE_BY_STAGE {
        let quoted = examples
            .iter()
            .map(|e| format!("\"{}\"", e))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "            - **{stage} Stage CTA:** {directive} Examples: {quoted}.\n"
        ));
    }
    out
}

fn creative_rules() -> String {
    format!(
        r#"**CRITICAL MANDATORY RULES (APPLY TO EVERY ROW):**

**1. Column-Specific Creative Directives:**

- **For "Texte dans la photo" (Image Text):**
    - **Rule 1:** Must be emotionally impactful and motivational.
    - **Rule 2:** Must be clear, direct, and follow the KISS principle (Keep It Short and Simple), but with enough depth to fully convey the idea. Avoid texts that are too short or vague.
    - **Rule 3:** Must be perfectly aligned with the chosen framework and the current funnel stage.

- **For "Message CTA" (Call to Action):**
    - **Rule 1:** MUST be less than 3 words.
    - **Rule 2:** Must be direct and clear.
    - **Rule 3 (CRUCIAL):** The style MUST adapt to the funnel stage as follows:
{cta_rules}
- **For "Stratégie", "Objectif", "Format choisi":**
    - **Rule:** The content MUST be Creative & Remarkable. Do not provide generic definitions. Provide a clear, innovative strategic intent.

**2. Overall Cohesion Rule:**
- All 8 columns within a single row must work together as one cohesive, integrated unit.
- The "Message CTA" must be the logical conclusion of the "Texte dans la photo".
- The "Texte dans la photo" must be the creative translation of the "Stratégie" and "Objectif".
- The "Cible" must be specifically described for that stage, not a restatement of the global audience."#,
        cta_rules = cta_stage_rules()
    )
}

fn framework_block(framework: Option<Framework>) -> String {
    match framework {
        Some(f) => format!(
            r#"**STRATEGY MATRIX: FRAMEWORK + FUNNEL STAGE**
You MUST intelligently combine the selected framework with the specific marketing funnel stage you are generating for. This must deeply influence the content of the "Objectif", "Stratégie", and "Texte dans la photo" columns, following the specific instructions below, in addition to all the creative rules above.
{instructions}"#,
            instructions = f.instructions()
        ),
        None => r#"**STRATEGY GUIDANCE:**
Even without a specific framework, generate a creative and coherent strategy across the funnel stages. Ensure the messaging evolves logically from introducing the product to encouraging purchase and loyalty, while adhering to all creative rules."#
            .to_string(),
    }
}

/// Assemble the master prompt. Pure string assembly: identical input always
/// yields byte-identical output.
pub fn master_prompt(input: &CampaignInput) -> String {
    format!(
        r#"As an expert media buying strategist from the "Media Buying Academy," your mission is to create a powerful, highly effective 5-stage marketing funnel strategy (Awareness, Engagement, Consideration, Conversion, Retention).

The final output MUST be a single, clean Markdown table, and nothing else.
The table columns, in this exact order, are: {columns}.

---
{rules}

---
{framework}
---

**AD DESCRIPTION:**
- Product/Service: {product}
- Target Audience: {audience}
- Main Message: {message}

**OUTPUT LANGUAGE (OVERRIDES EVERYTHING ABOVE):**
Write the entire table, every cell AND the column headers themselves (translated), in {language}. This directive takes precedence over any other language appearing in this prompt.
"#,
        columns = column_list(),
        rules = creative_rules(),
        framework = framework_block(input.framework),
        product = input.product_desc,
        audience = input.target_audience,
        message = input.main_message,
        language = input.output_language,
    )
}

/// Prompt for step 2 of the URL pipeline: reduce scraped page text to the
/// three ad-description fields. Paired with [`summary_schema`] so the model
/// is forced into JSON.
pub fn summarize_prompt(page_text: &str) -> String {
    format!(
        r#"You are analyzing the text content of a product web page. Identify the SINGLE main product or service being sold on the page and ignore navigation menus, related-product listings, reviews of other items, and any other boilerplate.

Summarize it as JSON with exactly these fields:
- "productDesc": a short, concrete description of the product or service.
- "targetAudience": the main audience this product is for.
- "mainMessage": the core selling message a campaign should convey.

PAGE TEXT:
{page_text}"#
    )
}

/// Response schema for the page summary (Gemini REST schema subset).
pub fn summary_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "productDesc": { "type": "STRING" },
            "targetAudience": { "type": "STRING" },
            "mainMessage": { "type": "STRING" }
        },
        "required": ["productDesc", "targetAudience", "mainMessage"]
    })
}

/// Prompt for step 3 of the URL pipeline: pick the best-fit framework.
/// The reply is validated by containment against the six canonical names,
/// so extra wording around the name is tolerated.
pub fn framework_selection_prompt(summary: &PageSummary) -> String {
    let names = crate::framework::ALL
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"You are a senior copywriting consultant. Based on the product below, choose the single copywriting framework best suited to its ad campaign.

- Product/Service: {product}
- Target Audience: {audience}
- Main Message: {message}

Answer with exactly one name from this list, and nothing else: {names}"#,
        product = summary.product_desc,
        audience = summary.target_audience,
        message = summary.main_message,
        names = names,
    )
}

/// Fixed instruction for the ad-image analysis call. The reply is parsed on
/// the literal `|||` delimiter, so the instruction spells it out twice.
pub fn image_extraction_instruction() -> &'static str {
    r#"Analyze this advertisement image. Extract exactly three pieces of information, separated by the literal delimiter |||:
1. A short description of the product or service being advertised.
2. The main target audience the ad speaks to.
3. The core message the ad wants to convey.

Respond with only the three parts in that order, separated by |||."#
}
