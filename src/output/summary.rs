//! Run summary formatting
//!
//! Condenses a [`DiscoveryReport`] into the few lines shown after the
//! endpoint list.

use crate::crawler::{DiscoveryReport, EndpointSource};

/// Formats the run summary for display
///
/// # Arguments
///
/// * `report` - The finished discovery run
///
/// # Returns
///
/// A multi-line summary ending in a newline
pub fn format_summary(report: &DiscoveryReport) -> String {
    let counters = &report.counters;
    let mut out = String::new();

    out.push_str("=== Discovery Summary ===\n\n");
    out.push_str(&format!("Target: {}\n", report.base_url));
    out.push_str(&format!("Source: {}\n", report.source));
    out.push_str(&format!(
        "Started: {}\n",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("Duration: {}\n\n", format_duration(report.duration())));

    match report.source {
        EndpointSource::Sitemap => {
            out.push_str(&format!("  Sitemap URLs: {}\n", counters.sitemap_urls));
        }
        EndpointSource::Crawl => {
            out.push_str(&format!("  Pages crawled: {}\n", counters.pages_crawled));
            out.push_str(&format!("  Links discovered: {}\n", counters.links_discovered));
            out.push_str(&format!("  Scripts scanned: {}\n", counters.scripts_scanned));
            out.push_str(&format!("  Worklist pages: {}\n", counters.worklist_pages));
            if counters.worklist_truncated {
                out.push_str("  Worklist stopped at its page limit\n");
            }
        }
    }

    out.push_str(&format!("  Candidates: {}\n", counters.candidates));
    out.push_str(&format!("  Endpoints: {}\n", report.endpoints.len()));

    out
}

/// Renders a duration as seconds with millisecond precision, or minutes past one
fn format_duration(duration: chrono::Duration) -> String {
    let millis = duration.num_milliseconds().max(0);
    if millis >= 60_000 {
        format!("{:.2} minutes", millis as f64 / 60_000.0)
    } else {
        format!("{:.3} seconds", millis as f64 / 1000.0)
    }
}
