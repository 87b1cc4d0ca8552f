use anyhow::Result;
use async_trait::async_trait;

use crate::wire::GenerateRequest;

pub mod gemini;

/// The model is a black box: prompt (plus optional schema or image part) in,
/// raw text out. Transport and auth failures come back as plain errors; the
/// call sites decide which typed error kind wraps them.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, req: &GenerateRequest, debug: bool) -> Result<String>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

pub fn make_provider(model: String, timeout_secs: u64) -> Result<DynProvider> {
    Ok(Box::new(gemini::GeminiProvider::new(model, timeout_secs)))
}
