//! Formatting for link results.

use std::path::Path;

use jslink_bundler::graph::AnalysisReport;
use jslink_bundler::LinkReport;
use owo_colors::{OwoColorize, Stream};

/// Format file size in human-readable format.
///
/// # Examples
///
/// ```
/// use jslink_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;
    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{bytes} {}", UNITS[0])
    } else {
        format!("{size:.2} {}", UNITS[unit_idx])
    }
}

/// One line per planned bundle on stderr: destination, source count and size.
pub fn print_bundles(report: &LinkReport, root: &Path) {
    for bundle in &report.bundles {
        let bytes: u64 = bundle
            .sources
            .iter()
            .filter_map(|path| report.graph.source_by_path(path))
            .map(|unit| unit.raw().len() as u64)
            .sum();
        let shown = bundle.destination.strip_prefix(root).unwrap_or(&bundle.destination);
        eprintln!(
            "  {} {} {} {}",
            "▸".if_supports_color(Stream::Stderr, |t| t.blue()),
            shown.display().if_supports_color(Stream::Stderr, |t| t.bold()),
            format!("({} from {})", bundle.root, plural(bundle.sources.len(), "file"))
                .if_supports_color(Stream::Stderr, |t| t.dimmed()),
            format_size(bytes).if_supports_color(Stream::Stderr, |t| t.dimmed()),
        );
    }
}

/// Human-readable analysis on stdout.
pub fn print_analysis(analysis: &AnalysisReport) {
    println!("{}", plural(analysis.defined_modules.len(), "defined module"));
    for name in &analysis.defined_modules {
        println!("  {name}");
    }
    if analysis.has_orphans() {
        println!("{}", plural(analysis.orphan_modules.len(), "orphan module"));
        for name in &analysis.orphan_modules {
            println!("  {name}");
        }
    }
    println!("{}", plural(analysis.number_of_exports, "export directive"));
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}
