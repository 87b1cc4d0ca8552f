use clap::Parser;
use std::path::Path;

mod analyze;
mod cli;
mod config;
mod errors;
mod fetch;
mod framework;
mod log;
mod prompt;
mod provider;
mod strategy;
mod ux;
mod wire;

use wire::{CampaignInput, Tx};

fn guess_image_mime(path: &Path) -> anyhow::Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "webp" => Ok("image/webp"),
        "gif" => Ok("image/gif"),
        other => anyhow::bail!("unsupported image extension: {other:?} (png/jpg/webp/gif)"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    if args.list_frameworks {
        ux::show_framework_guide();
        return Ok(());
    }

    let mut cfg = config::load(args.config.as_deref())?;
    if let Some(model) = &args.model {
        cfg.model = model.clone();
    }
    if let Some(timeout) = args.timeout_secs {
        cfg.timeout_secs = timeout;
    }
    if let Some(language) = &args.language {
        cfg.output_language = language.clone();
    }

    let tx = Tx::new();
    let stage_log = log::StageLog::new(
        Path::new(&cfg.artifacts_root),
        &tx,
        args.save_request,
        args.save_response,
    );
    if args.debug {
        stage_log.print_planned_dir();
    }

    let provider = provider::make_provider(cfg.model.clone(), cfg.timeout_secs)?;

    // ===== URL path: fetch -> summarize -> select -> generate =====
    if let Some(url) = &args.url {
        let client = fetch::http_client(cfg.timeout_secs)?;
        let pb = ux::spinner("Analyzing URL, extracting data, and building strategy...");
        let analysis = analyze::analyze_url(
            provider.as_ref(),
            &client,
            url,
            &cfg.output_language,
            &stage_log,
            args.debug,
        )
        .await;
        pb.finish_and_clear();
        let analysis = analysis?;
        ux::show_derived_input(&analysis.input);
        ux::show_strategy(&analysis.strategy);
        return Ok(());
    }

    // ===== Image path: extract details -> generate =====
    if let Some(image_path) = &args.image {
        let path = Path::new(image_path);
        let mime = guess_image_mime(path)?;
        let bytes = fs_err::read(path)?;

        let pb = ux::spinner("Analyzing image and extracting details...");
        let details =
            analyze::extract_from_image(provider.as_ref(), &bytes, mime, &stage_log, args.debug)
                .await;
        pb.finish_and_clear();
        let details = details?;
        ux::show_extracted_details(&details);

        let input = CampaignInput {
            product_desc: details.product_desc,
            target_audience: details.target_audience,
            main_message: details.main_message,
            framework: args.framework,
            output_language: cfg.output_language.clone(),
        };
        let pb = ux::spinner("Generating strategy...");
        let result = strategy::generate_strategy(provider.as_ref(), &input, &stage_log, args.debug).await;
        pb.finish_and_clear();
        ux::show_strategy(&result?);
        return Ok(());
    }

    // ===== Manual path: the three fields are validated before any call =====
    let input = CampaignInput {
        product_desc: args.product.clone().unwrap_or_default(),
        target_audience: args.audience.clone().unwrap_or_default(),
        main_message: args.message.clone().unwrap_or_default(),
        framework: args.framework,
        output_language: cfg.output_language.clone(),
    };
    let pb = ux::spinner("Generating strategy...");
    let result = strategy::generate_strategy(provider.as_ref(), &input, &stage_log, args.debug).await;
    pb.finish_and_clear();
    ux::show_strategy(&result?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_mime_is_guessed_from_extension() {
        assert_eq!(guess_image_mime(Path::new("ad.PNG")).unwrap(), "image/png");
        assert_eq!(guess_image_mime(Path::new("ad.jpeg")).unwrap(), "image/jpeg");
        assert!(guess_image_mime(Path::new("ad.bmp")).is_err());
    }
}
