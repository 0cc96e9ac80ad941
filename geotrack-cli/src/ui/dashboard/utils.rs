//! Formatting helpers and plain-text output.
//!
//! Used by the headless mode as well as the dashboard footer.

use std::time::Duration;

use geotrack::status::StatusCard;
use geotrack::tracker::TrackerStats;

/// Format duration as HH:MM:SS or MM:SS.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}", mins, secs)
    }
}

/// One-line rendering of the card body for non-interactive output.
pub fn status_line(card: &StatusCard, uptime: Duration) -> String {
    format!("[{}] {}", format_duration(uptime), card.lines.join(" | "))
}

/// Print the card title once at the start of headless output.
pub fn print_card_header(card: &StatusCard) {
    println!("{}", console::style(card.title).cyan().bold());
    println!("Press Ctrl+C to stop.");
    println!();
}

/// Print final session summary.
pub fn print_session_summary(stats: &TrackerStats, uptime: Duration) {
    println!();
    println!("Session Summary");
    println!("───────────────");
    println!("  Locations published: {}", stats.updates_applied);
    println!("  Readings without fix: {}", stats.empty_readings);
    println!("  Uptime: {}", format_duration(uptime));
}
