//! Display logic for the domain-scout CLI.
//!
//! Progress lines, the run header, the summary bar and the per-extension
//! breakdown. Uses only the `console` crate; colors switch off on their own
//! when stdout is not a terminal.

use console::{pad_str, style, Alignment};
use domain_scout_lib::{
    Availability, BatchProgress, BatchSummary, CheckConfig, CheckResult, ScoutError,
};
use std::path::Path;
use std::time::Duration;

const DOMAIN_WIDTH: usize = 30;

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a run.
pub fn print_header(name_count: usize, config: &CheckConfig) {
    println!(
        "{} {} {}",
        style("domain-scout").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "Checking {} name{} x {} extension{}",
            name_count,
            plural(name_count),
            config.extensions.len(),
            plural(config.extensions.len()),
        ))
        .dim(),
    );

    let meta = [
        format!("Extensions: {}", config.extensions.join(" ")),
        format!("Engine: {}", config.engine),
        format!("Delay: {:.1}s", config.throttle_delay.as_secs_f64()),
    ];
    println!("{}", style(meta.join(" | ")).dim());
    println!();
}

// ── Progress ─────────────────────────────────────────────────────────────────

/// Print one progress line for a finished pair.
pub fn print_progress(progress: &BatchProgress<'_>) {
    println!("  {}", format_progress(progress));
}

/// `[k/N] name.ext  LABEL  status`
pub fn format_progress(progress: &BatchProgress<'_>) -> String {
    let result = progress.result;
    let padded = pad_str(&result.full_domain, DOMAIN_WIDTH, Alignment::Left, Some(".."));

    format!(
        "{} {}  {}  {}",
        style(format!("[{}/{}]", progress.completed, progress.total)).dim(),
        style(padded).white(),
        styled_label(result.available),
        style(&result.status).dim(),
    )
}

fn styled_label(availability: Availability) -> String {
    let label = status_label(availability);
    match availability {
        Availability::Yes => style(label).green().bold().to_string(),
        Availability::No => style(label).red().bold().to_string(),
        Availability::Unknown => style(label).yellow().to_string(),
    }
}

/// Upper-case label used in progress lines.
pub fn status_label(availability: Availability) -> &'static str {
    match availability {
        Availability::Yes => "AVAILABLE",
        Availability::No => "TAKEN",
        Availability::Unknown => "UNKNOWN",
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the final summary bar with colored counts and percentages.
pub fn print_summary(summary: &BatchSummary, duration: Duration) {
    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} check{} in {:.1}s  {}  {}  {}  {}  {}  {}",
        style(summary.total).bold(),
        plural(summary.total),
        duration.as_secs_f64(),
        style("|").dim(),
        style(count_with_share(summary, Availability::Yes, "available")).green(),
        style("|").dim(),
        style(count_with_share(summary, Availability::No, "taken")).red(),
        style("|").dim(),
        style(count_with_share(summary, Availability::Unknown, "unknown")).yellow(),
    );
}

/// `3 available (37.5%)`
pub fn count_with_share(summary: &BatchSummary, availability: Availability, noun: &str) -> String {
    format!(
        "{} {} ({:.1}%)",
        summary.count(availability),
        noun,
        summary.percentage(availability)
    )
}

/// Print per-extension counts.
pub fn print_breakdown(summary: &BatchSummary) {
    if summary.by_extension.len() < 2 {
        return;
    }

    println!();
    println!("  {}", style("By extension:").bold());
    for counts in &summary.by_extension {
        println!(
            "    {:<6} {}  {}  {}",
            counts.extension,
            style(format!("{} available", counts.available)).green(),
            style(format!("{} taken", counts.taken)).red(),
            style(format!("{} unknown", counts.unknown)).yellow(),
        );
    }
}

/// List the domains that passed `--only`, once the run is over.
pub fn print_filtered(shown: &[&CheckResult], total: usize) {
    println!();
    println!("  {}", style(filter_heading(shown.len(), total)).bold());
    for result in shown {
        println!(
            "    {}  {}",
            pad_str(&result.full_domain, DOMAIN_WIDTH, Alignment::Left, None),
            status_label(result.available)
        );
    }
}

/// `Showing 2 of 8 results:`
pub fn filter_heading(shown: usize, total: usize) -> String {
    format!("Showing {} of {} result{}:", shown, total, plural(total))
}

// ── Warnings and notes ───────────────────────────────────────────────────────

/// Warn that the browser session died part way through.
pub fn print_session_warning(message: &str) {
    eprintln!();
    eprintln!(
        "  {} {}",
        style("Browser session lost:").yellow().bold(),
        message
    );
    eprintln!(
        "  {}",
        style("Remaining checks were recorded as Unknown.").dim()
    );
}

/// Report inputs that were dropped during normalization.
pub fn print_rejected(rejected: &[ScoutError]) {
    if rejected.is_empty() {
        return;
    }
    eprintln!(
        "{} Skipping {} invalid input{}:",
        style("Warning:").yellow(),
        rejected.len(),
        plural(rejected.len())
    );
    for err in rejected.iter().take(5) {
        eprintln!("  {}", err);
    }
    if rejected.len() > 5 {
        eprintln!("  ... and {} more", rejected.len() - 5);
    }
}

/// Confirm where results were written.
pub fn print_saved(path: &Path, rows: usize) {
    println!();
    println!(
        "  {} {} result{} to {}",
        style("Saved").green(),
        rows,
        plural(rows),
        path.display()
    );
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
