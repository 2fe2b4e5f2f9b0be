//! Terminal formatting for batch diagnostics.

use colored::Colorize;

use crate::batch::BatchSummary;

/// Format the line announcing a batch activation.
pub fn format_batch_start(source_count: usize) -> String {
    format!(
        "{} loading {} source file(s)...",
        "[phasemix]".dimmed(),
        source_count
    )
}

/// Format a teardown summary for human-readable terminal output.
///
/// One block per batch: the integral estimate with its error proxy, the
/// draw count, and the cumulative sampling time.
pub fn format_batch_summary(summary: &BatchSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {} {}\n",
        "[phasemix]".dimmed(),
        "\u{2713}".green().bold(),
        "batch complete".bold()
    ));
    output.push_str(&format!(
        "  integral: {:.6e} \u{00B1} {:.6e}\n",
        summary.weight_sum, summary.error
    ));
    output.push_str(&format!("  draws:    {}\n", summary.draws));
    output.push_str(&format!(
        "  sampling time: {:.3} s",
        summary.sample_time_secs
    ));

    output
}
