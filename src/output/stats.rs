//! Statistics reporting.

use console::style;
use indicatif::HumanBytes;

use crate::download::Session;

/// Print the totals of a download run.
pub fn print_run_stats(session: &Session) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Statistics:").bold());
    if let Some(course_id) = session.course_id {
        println!("  Course:     {}", course_id);
    }
    println!("  Downloaded: {}", style(session.downloaded).green());
    println!("  Skipped:    {} (already on disk)", style(session.skipped).yellow());
    if session.failed > 0 {
        println!("  Failed:     {}", style(session.failed).red());
    }
    println!("  Size:       {}", HumanBytes(session.bytes_downloaded));
    println!("{}", style("═".repeat(50)).dim());
}
