//! Progress bars and CLI output utilities

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar style for capture and rename sequences
fn sequence_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("  {spinner:.green} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap()
        .progress_chars("━━╾─")
}

/// Create a progress bar for a fixed-length sequence of operations
pub fn sequence_bar(len: u64, message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(sequence_style());
    bar.set_message(message);
    bar
}

/// Print a section header
pub fn print_header(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(title.chars().count()));
}
