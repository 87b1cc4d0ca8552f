use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::framework;
use crate::wire::{CampaignInput, ExtractedDetails};

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Shown after URL analysis so the user can see what the strategy was
/// actually built from.
pub fn show_derived_input(input: &CampaignInput) {
    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━ Derived Ad Description ━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    println!("  {}: {}", "Product/Service".green().bold(), input.product_desc);
    println!("  {}: {}", "Target Audience".yellow().bold(), input.target_audience);
    println!("  {}: {}", "Main Message".cyan().bold(), input.main_message);
    println!(
        "  {}: {}",
        "Framework".magenta().bold(),
        input.framework.map(|f| f.name()).unwrap_or("(none)")
    );
    println!(
        "{}",
        "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold()
    );
}

pub fn show_extracted_details(details: &ExtractedDetails) {
    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━ Extracted from Image ━━━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    println!("  {}: {}", "Product/Service".green().bold(), details.product_desc);
    println!("  {}: {}", "Target Audience".yellow().bold(), details.target_audience);
    println!("  {}: {}", "Main Message".cyan().bold(), details.main_message);
    println!(
        "{}",
        "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold()
    );
}

/// The strategy is raw Markdown; print it untouched so it can be piped into
/// any renderer.
pub fn show_strategy(markdown: &str) {
    println!("\n{}\n", "=== Suggested Strategy ===".bold());
    println!("{}", markdown.trim());
}

pub fn show_framework_guide() {
    println!("{}\n", "Quick guide to choosing a copywriting framework".bold());
    for f in framework::ALL {
        println!("{}", f.name().green().bold());
        println!("  {}", f.tagline());
        println!("  {} {}", "When to use:".bold(), f.use_case());
        println!("  {} {}", "Example:".bold(), f.example());
        println!();
    }
}
