//! Progress display module
//!
//! Banner, status lines, spinners and result summaries for the terminal.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use crate::encoding::TextEncoding;
use crate::report::{DedupResult, ExtractResult, MergeResult};

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════╗
║                                       ║
║          COMBO EDITOR v1.0.0          ║
║                                       ║
╚═══════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a styled spinner for indeterminate progress
pub fn create_spinner(msg: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");

    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Format a number with thousand separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.2}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn row(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", format!("{:<14}", label).green(), value);
}

fn rule() {
    println!("{}", "═".repeat(60).green());
}

fn print_title(title: &str) {
    println!();
    rule();
    println!("  {}", title.green().bold());
    rule();
}

fn warn_if_reencoded(encoding: TextEncoding) {
    if encoding == TextEncoding::Latin1 {
        print_warning("Source was not valid UTF-8; output was re-encoded as UTF-8");
    }
}

/// Summary of an extraction
pub fn print_extract_summary(result: &ExtractResult, elapsed: Duration) {
    print_title("EXTRACT COMPLETE");
    row(
        "Extracted:",
        format!(
            "{} lines → {}",
            format_number(result.extracted),
            display_name(&result.output)
        ),
    );
    row("Output size:", ByteSize(result.output_size));
    row("Remaining:", format!("{} lines", format_number(result.remaining)));
    row(
        "Source size:",
        format!("{} ({})", ByteSize(result.source_size), display_name(&result.source)),
    );
    row("Duration:", format_duration(elapsed));
    rule();
    warn_if_reencoded(result.source_encoding);
}

/// Summary of a merge
pub fn print_merge_summary(result: &MergeResult, elapsed: Duration) {
    print_title("MERGE COMPLETE");
    for (i, source) in result.sources.iter().enumerate() {
        print_bullet(&format!(
            "[{}] {} - {} lines",
            i + 1,
            display_name(&source.path),
            format_number(source.lines)
        ));
    }
    println!();
    row("Files merged:", result.files_merged());
    row("Total lines:", format_number(result.total_lines));
    row("Output:", display_name(&result.output));
    row("Size:", ByteSize(result.output_size));
    row("Duration:", format_duration(elapsed));
    rule();

    if result.sources.iter().any(|s| s.encoding == TextEncoding::Latin1) {
        warn_if_reencoded(TextEncoding::Latin1);
    }
}

/// Summary of a deduplication
pub fn print_dedup_summary(result: &DedupResult, elapsed: Duration) {
    if !result.has_duplicates() {
        println!();
        print_success("No duplicate email:password combos found, nothing written");
        print_info(&format!(
            "{} lines checked ({} combos, {} other lines)",
            format_number(result.original_lines),
            format_number(result.combos_total),
            format_number(result.passthrough_lines)
        ));
        return;
    }

    print_title("DEDUPLICATE COMPLETE");
    row("Original:", format!("{} lines", format_number(result.original_lines)));
    row("Combos:", format_number(result.combos_total));
    row("Unique:", format_number(result.unique_combos));
    row("Passthrough:", format_number(result.passthrough_lines));
    println!(
        "  {} {}",
        format!("{:<14}", "Duplicates:").yellow(),
        format_number(result.duplicates_removed).yellow()
    );
    row("Kept:", format!("{} lines", format_number(result.kept_lines())));
    if let Some(ref output) = result.output {
        row("Output:", display_name(output));
    }
    if let Some(size) = result.output_size {
        row("Size:", ByteSize(size));
    }
    row("Duration:", format_duration(elapsed));
    rule();
    warn_if_reencoded(result.source_encoding);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/data/combo.txt")), "combo.txt");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
