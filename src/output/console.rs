//! Plain-text result summary for the terminal

use crate::crawler::ParserResult;

/// Formats a result as the plain-text block the CLI prints
pub fn format_summary(result: &ParserResult) -> String {
    let mut out = String::new();

    out.push_str("=== Contacts ===\n\n");
    out.push_str(&format!("Base URL: {}\n", result.base_url()));
    out.push_str(&format!("Pages parsed: {}\n", result.pages_parsed()));
    if result.pages_skipped() > 0 {
        out.push_str(&format!("Pages skipped: {}\n", result.pages_skipped()));
    }
    out.push_str(&format!("Duration: {:.2}s\n", result.duration_seconds()));

    push_list(&mut out, "Emails", result.emails());
    push_list(&mut out, "Phones", result.phones());

    out
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    out.push_str(&format!("\n{} ({}):\n", heading, items.len()));
    if items.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in items {
        out.push_str(&format!("  {}\n", item));
    }
}

/// Prints a result summary to stdout
pub fn print_result(result: &ParserResult) {
    print!("{}", format_summary(result));
}
