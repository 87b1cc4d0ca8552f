use crate::errors::StratError;
use crate::log::StageLog;
use crate::prompt;
use crate::provider::Provider;
use crate::wire::{CampaignInput, GenerateRequest};

/// All three free-text fields must be present before any model call is made.
pub fn validate(input: &CampaignInput) -> Result<(), StratError> {
    for (field, value) in [
        ("product description", &input.product_desc),
        ("target audience", &input.target_audience),
        ("main message", &input.main_message),
    ] {
        if value.trim().is_empty() {
            return Err(StratError::Validation(field.to_string()));
        }
    }
    Ok(())
}

/// Build the master prompt, issue exactly one model call, return the raw
/// response unmodified. The response is trusted Markdown; whether it really
/// is a single table is the renderer's problem, not ours.
pub async fn generate_strategy(
    provider: &dyn Provider,
    input: &CampaignInput,
    stage_log: &StageLog,
    debug: bool,
) -> Result<String, StratError> {
    validate(input)?;

    let req = GenerateRequest::text(prompt::master_prompt(input));
    let response = provider
        .generate(&req, debug)
        .await
        .map_err(|e| StratError::Generation(e.to_string()))?;
    stage_log.record("generate", &req, &response);
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Framework;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
        reply: String,
    }

    impl CountingProvider {
        fn new(reply: &str) -> Self {
            Self { calls: AtomicUsize::new(0), reply: reply.into() }
        }
    }

    #[async_trait]
    impl Provider for CountingProvider {
        async fn generate(&self, _req: &GenerateRequest, _debug: bool) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    fn input(product: &str, audience: &str, message: &str) -> CampaignInput {
        CampaignInput {
            product_desc: product.into(),
            target_audience: audience.into(),
            main_message: message.into(),
            framework: Some(Framework::Pas),
            output_language: "English".into(),
        }
    }

    #[tokio::test]
    async fn missing_fields_fail_before_any_model_call() {
        let provider = CountingProvider::new("| table |");
        for bad in [
            input("", "aud", "msg"),
            input("prod", "", "msg"),
            input("prod", "aud", "  "),
        ] {
            let err = generate_strategy(&provider, &bad, &StageLog::disabled(), false)
                .await
                .unwrap_err();
            assert!(matches!(err, StratError::Validation(_)));
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn happy_path_calls_once_and_returns_raw_text() {
        let provider = CountingProvider::new("| raw | markdown |");
        let result = generate_strategy(
            &provider,
            &input("bike trade-in service", "owners of old bikes", "trade old bike for discount"),
            &StageLog::disabled(),
            false,
        )
        .await
        .unwrap();
        assert_eq!(result, "| raw | markdown |");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transport_failure_maps_to_generation_error() {
        struct FailingProvider;
        #[async_trait]
        impl Provider for FailingProvider {
            async fn generate(&self, _req: &GenerateRequest, _debug: bool) -> Result<String> {
                Err(anyhow::anyhow!("boom"))
            }
        }
        let err = generate_strategy(
            &FailingProvider,
            &input("p", "a", "m"),
            &StageLog::disabled(),
            false,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StratError::Generation(_)));
    }
}
