use crate::highlighter::FileReport;
use std::time::Duration;

/// Formats a message with a site-builder-style timestamp and prefix.
fn format_line<'a>(
    timestamp: &chrono::format::DelayedFormat<chrono::format::StrftimeItems<'a>>,
    level: &str,
    message: &str,
) -> String {
    format!("{} [{}] (highlight_types): {}", timestamp, level, message)
}

/// Prints the post-run summary to stderr.
///
/// Shows:
/// - Total spans inserted with code block and file counts
/// - Total time for the run
/// - Per-file breakdown (RUST_LOG=debug)
pub fn print_summary(reports: &[FileReport], duration: Duration) {
    use chrono::Local;

    let now = Local::now();
    let timestamp = now.format("%Y-%m-%d %H:%M:%S");

    let total_spans: usize = reports.iter().map(|r| r.spans_inserted).sum();
    let total_blocks: usize = reports.iter().map(|r| r.blocks_scanned).sum();
    let rewritten_files = reports.iter().filter(|r| r.rewritten).count();

    if total_spans > 0 {
        eprintln!(
            "{}",
            format_line(
                &timestamp,
                "INFO",
                &format!(
                    "Highlighted {} type token(s) across {} code block(s) in {} file(s)",
                    total_spans, total_blocks, rewritten_files
                )
            )
        );
    } else {
        eprintln!(
            "{}",
            format_line(&timestamp, "INFO", "No type tokens found to highlight")
        );
    }

    eprintln!(
        "{}",
        format_line(
            &timestamp,
            "INFO",
            &format!(
                "Processed {} HTML file(s) in {}ms",
                reports.len(),
                duration.as_millis()
            )
        )
    );

    log::debug!("Per-file breakdown:");
    for report in reports {
        log::debug!(
            "  {}: {} block(s), {} span(s){}",
            report.path.display(),
            report.blocks_scanned,
            report.spans_inserted,
            if report.rewritten { "" } else { " (unchanged)" }
        );
    }
}

/// Reports a fatal error to stderr in the same format.
pub fn report_error(message: &str) {
    use chrono::Local;

    let now = Local::now();
    let timestamp = now.format("%Y-%m-%d %H:%M:%S");

    for line in message.lines() {
        eprintln!("{}", format_line(&timestamp, "ERROR", line));
    }
}
