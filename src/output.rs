//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Process
//!
//! ```text
//! photo.jpg → thumb.jpg (inscribe 15x10)
//!     482113 bytes → 612 bytes
//! ```
//!
//! ## Batch
//!
//! ```text
//! 001 a.jpg → thumbs/a.jpg
//!     482113 bytes → 612 bytes
//! 002 trips/b.png
//!     Error: Unrecognized image format (12 bytes)
//!
//! Processed 1 of 2 images, 1 failed
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::batch::BatchReport;
use std::path::Path;

fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn size_line(input_bytes: usize, output_bytes: usize) -> String {
    format!("{}{} bytes → {} bytes", indent(1), input_bytes, output_bytes)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Lines describing a single-file `process` run.
pub fn format_process_output(
    input: &Path,
    output: &Path,
    strategy: &str,
    width: i32,
    height: i32,
    input_bytes: usize,
    output_bytes: usize,
) -> Vec<String> {
    vec![
        format!(
            "{} → {} ({} {}x{})",
            input.display(),
            output.display(),
            strategy,
            width,
            height
        ),
        size_line(input_bytes, output_bytes),
    ]
}

pub fn print_process_output(
    input: &Path,
    output: &Path,
    strategy: &str,
    width: i32,
    height: i32,
    input_bytes: usize,
    output_bytes: usize,
) {
    for line in format_process_output(
        input,
        output,
        strategy,
        width,
        height,
        input_bytes,
        output_bytes,
    ) {
        println!("{}", line);
    }
}

/// Lines describing a `batch` run, successes and failures interleaved in
/// source-path order.
pub fn format_batch_report(report: &BatchReport) -> Vec<String> {
    enum Entry<'a> {
        Done(&'a crate::batch::ProcessedImage),
        Failed(&'a crate::batch::FailedImage),
    }

    let mut entries: Vec<(&Path, Entry)> = report
        .processed
        .iter()
        .map(|p| (p.source.as_path(), Entry::Done(p)))
        .chain(
            report
                .failed
                .iter()
                .map(|f| (f.source.as_path(), Entry::Failed(f))),
        )
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut lines = Vec::new();
    for (pos, (source, entry)) in entries.iter().enumerate() {
        let index = format_index(pos + 1);
        match entry {
            Entry::Done(p) => {
                lines.push(format!(
                    "{} {} → {}",
                    index,
                    source.display(),
                    p.output.display()
                ));
                lines.push(size_line(p.input_bytes, p.output_bytes));
            }
            Entry::Failed(f) => {
                lines.push(format!("{} {}", index, source.display()));
                lines.push(format!("{}Error: {}", indent(1), f.error));
            }
        }
    }

    if !lines.is_empty() {
        lines.push(String::new());
    }
    let mut summary = format!(
        "Processed {} of {}",
        report.processed.len(),
        plural(report.total(), "image")
    );
    if !report.failed.is_empty() {
        summary.push_str(&format!(", {} failed", report.failed.len()));
    }
    lines.push(summary);
    lines
}

pub fn print_batch_report(report: &BatchReport) {
    for line in format_batch_report(report) {
        println!("{}", line);
    }
}
