use crate::pipeline::{PipelineReport, StopReason};
use crate::record::ERROR_STATUS;
use owo_colors::OwoColorize;

/// Render the final summary for stdout.
///
/// The first lines always come in this order: total requests, error count
/// (taken from the filtered branch), average response time, then the busiest
/// `top` client IPs.
pub fn render_report(report: &PipelineReport, top: usize, color: bool) -> String {
    let mut out = String::new();
    let stats = &report.statistics;

    // The error branch counts status >= 400 among records that passed the
    // filter, so the effective floor is whichever is higher.
    let error_floor = report.error_threshold.max(ERROR_STATUS);

    out.push_str(&format!("Total requests: {}\n", stats.total_requests));
    out.push_str(&format!(
        "Total errors (status >= {}): {}\n",
        error_floor, report.errors.error_count
    ));
    out.push_str(&format!(
        "Average response time: {:.2} ms\n",
        stats.average_response_time
    ));

    let top_ips = stats.top_ips(top);
    out.push_str(&heading(
        &format!("Top {} IP addresses:", top_ips.len()),
        color,
    ));
    for (ip, count) in top_ips {
        out.push_str(&format!("{ip}: {count} requests\n"));
    }

    let classes = stats.status_classes;
    out.push_str(&format!(
        "\nStatus: 1xx={} 2xx={} 3xx={} 4xx={} 5xx={} other={}\n",
        classes.informational,
        classes.success,
        classes.redirection,
        classes.client_error,
        classes.server_error,
        classes.other
    ));
    out.push_str(&format!(
        "Response time p95 ≈ {}ms | p99 ≈ {}ms\n",
        stats.latency.p95_ms, stats.latency.p99_ms
    ));

    let malformed = report.source.malformed_count;
    if malformed > 0 {
        out.push_str(&format!("Skipped {malformed} malformed lines\n"));
    }

    if report.source.stop == StopReason::Cancelled {
        out.push_str(&heading(
            "Run was cancelled: figures cover only the lines read before shutdown",
            color,
        ));
    }

    out
}

fn heading(text: &str, color: bool) -> String {
    if color {
        format!("{}\n", text.bold())
    } else {
        format!("{text}\n")
    }
}
