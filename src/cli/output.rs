//! CLI output formatting utilities.

use crate::rag::MatchSummary;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a retrieved student.
    pub fn student(summary: &MatchSummary) {
        println!(
            "\n{} {} ({}, score: {:.2})",
            style(">>").green(),
            style(summary.name.as_deref().unwrap_or("?")).bold(),
            style(&summary.id).dim(),
            summary.score
        );
        let details = student_details(summary);
        if !details.is_empty() {
            println!("   {}", details);
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// One-line summary of the optional fields that are present.
fn student_details(summary: &MatchSummary) -> String {
    [
        ("DOB", &summary.dob),
        ("Address", &summary.address),
        ("Hobby", &summary.hobby),
        ("Interest", &summary.interest),
        ("Skill", &summary.skill),
    ]
    .iter()
    .filter_map(|(label, value)| value.as_ref().map(|v| format!("{}: {}", label, v)))
    .collect::<Vec<_>>()
    .join(" | ")
}
