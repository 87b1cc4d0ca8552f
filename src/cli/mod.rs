use clap::Parser;

use crate::framework::Framework;

#[derive(Parser, Debug)]
#[command(
    name = "stratgen",
    version,
    about = "Generate a 5-stage marketing funnel strategy table with Gemini"
)]
pub struct Args {
    /// What the product or service is.
    #[arg(long)]
    pub product: Option<String>,

    /// Who the main target audience is.
    #[arg(long)]
    pub audience: Option<String>,

    /// The core message the campaign should convey.
    #[arg(long)]
    pub message: Option<String>,

    /// Copywriting framework to build the strategy on.
    #[arg(long, value_enum)]
    pub framework: Option<Framework>,

    /// Language the strategy table is written in.
    #[arg(long)]
    pub language: Option<String>,

    /// Analyze a product page URL instead of entering details manually.
    #[arg(long, conflicts_with_all = ["product", "audience", "message", "image"])]
    pub url: Option<String>,

    /// Analyze an ad image file instead of entering details manually.
    #[arg(long, conflicts_with_all = ["product", "audience", "message"])]
    pub image: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub debug: bool,

    #[arg(long, default_value_t = true)]
    pub save_request: bool,

    #[arg(long, default_value_t = true)]
    pub save_response: bool,

    /// Print the copywriting framework guide and exit.
    #[arg(long, default_value_t = false)]
    pub list_frameworks: bool,

    #[arg(long)]
    pub config: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_flags_parse() {
        let args = Args::parse_from([
            "stratgen",
            "--product", "bike trade-in",
            "--audience", "bike owners",
            "--message", "trade for discount",
            "--framework", "pas",
            "--language", "English",
        ]);
        assert_eq!(args.framework, Some(Framework::Pas));
        assert_eq!(args.language.as_deref(), Some("English"));
    }

    #[test]
    fn url_conflicts_with_manual_fields() {
        let result = Args::try_parse_from([
            "stratgen",
            "--url", "https://example.com",
            "--product", "bike trade-in",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn framework_accepts_every_canonical_value() {
        for value in ["aida", "pas", "before-after-bridge", "fab", "4us", "slap"] {
            let args = Args::parse_from(["stratgen", "--framework", value]);
            assert!(args.framework.is_some(), "failed to parse {value}");
        }
    }
}
