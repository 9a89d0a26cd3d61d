//! Markdown report generation
//!
//! This module generates a human-readable Markdown report of a crawl run:
//! run information, page counts and the collected contacts.

use crate::crawler::ParserResult;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a Markdown report of a run to a file
///
/// # Arguments
///
/// * `result` - The finished run
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn write_markdown_report(result: &ParserResult, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(result);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run as markdown
pub fn format_markdown_report(result: &ParserResult) -> String {
    let mut md = String::new();

    // Title
    md.push_str("# Contacts Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed URL**: {}\n", result.url()));
    md.push_str(&format!("- **Base URL**: {}\n", result.base_url()));
    md.push_str(&format!("- **Started**: {}\n", result.started_at().to_rfc3339()));
    md.push_str(&format!("- **Finished**: {}\n", result.finished_at().to_rfc3339()));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n\n",
        result.duration_seconds()
    ));

    // Page counts
    md.push_str("## Pages\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Parsed | {} |\n", result.pages_parsed()));
    md.push_str(&format!("| Skipped | {} |\n\n", result.pages_skipped()));

    push_section(&mut md, "Emails", result.emails());
    push_section(&mut md, "Phones", result.phones());

    md
}

fn push_section(md: &mut String, title: &str, items: &[String]) {
    md.push_str(&format!("## {} ({})\n\n", title, items.len()));

    if items.is_empty() {
        md.push_str("_None found._\n\n");
        return;
    }

    for item in items {
        md.push_str(&format!("- `{}`\n", item));
    }
    md.push('\n');
}
