//! Solver statistics reporting.

use std::time::Duration;

use tracing::info;
use ttt_core::SearchStats;

/// Format elapsed time as `[hh:mm:ss]`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "[{:02}:{:02}:{:02}]",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Format a count per second as a human-readable rate.
pub fn format_rate(count: u64, elapsed: Duration) -> String {
    const K: f64 = 1_000.0;
    const M: f64 = K * 1_000.0;

    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return "n/a".to_string();
    }

    let rate = count as f64 / secs;
    if rate >= M {
        format!("{:.2}M/s", rate / M)
    } else if rate >= K {
        format!("{:.1}K/s", rate / K)
    } else {
        format!("{:.0}/s", rate)
    }
}

/// Share of `part` in `whole` as a percentage.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

/// Log a summary of an instrumented search.
pub fn log_search_summary(stats: &SearchStats, elapsed: Duration) {
    let terminals = stats.terminals();
    info!(
        "{} nodes={} rate={} max_depth={} cutoffs={}",
        format_elapsed(elapsed),
        stats.nodes,
        format_rate(stats.nodes, elapsed),
        stats.max_depth,
        stats.cutoffs,
    );
    info!(
        "terminals={} x_wins={} ({:.1}%) o_wins={} ({:.1}%) draws={} ({:.1}%)",
        terminals,
        stats.x_wins,
        percent(stats.x_wins, terminals),
        stats.o_wins,
        percent(stats.o_wins, terminals),
        stats.draws,
        percent(stats.draws, terminals),
    );
}
