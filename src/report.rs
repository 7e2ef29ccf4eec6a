//! Console summary and JSON output for a finished report.

use crate::models::ContributionReport;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;

/// Default output path for the JSON artifact.
pub const DEFAULT_OUTPUT: &str = "contributions.json";

fn rule() -> String {
    "═".repeat(50)
}

/// Multi-line summary: totals, credit breakdown, per-format and per-generation counts.
pub fn format_stats_for_console(report: &ContributionReport) -> String {
    let mut lines = vec![
        "\n✨ Success!".to_string(),
        rule(),
        format!("Username: {}", report.username),
        format!("Total Contributions: {}", report.total_count),
        "\nBreakdown:".to_string(),
        format!("   Written: {}", report.stats.written_count),
        format!("   Quality Checked: {}", report.stats.quality_checked_count),
        "\nBy Format:".to_string(),
    ];
    lines.extend(
        sorted_by_count(&report.stats.counts_by_format)
            .into_iter()
            .map(|(format, count)| format!("   {}: {}", format, count)),
    );

    lines.push("\nBy Generation:".to_string());
    lines.extend(
        sorted_by_count(&report.stats.counts_by_generation)
            .into_iter()
            .map(|(generation, count)| format!("   {}: {}", generation, count)),
    );

    lines.join("\n")
}

/// The first `n` contributions as bullet lines.
pub fn format_samples(report: &ContributionReport, n: usize) -> String {
    report
        .contributions
        .iter()
        .take(n)
        .map(|c| format!("   • {} ({}) - {}", c.pokemon_name, c.format, c.credit_type))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Descending by count; ties keep key order.
fn sorted_by_count(counts: &BTreeMap<String, u64>) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
}

/// Writes the report as pretty-printed JSON, creating parent directories.
pub fn write_report(path: &Path, report: &ContributionReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    tracing::debug!("Report written to {}", path.display());
    Ok(())
}
