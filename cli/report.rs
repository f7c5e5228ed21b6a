use commenter_core::{CommentRemovalResult, ProcessedFileResult, ProcessingStats};
use console::style;
use std::fmt::Display;
use std::time::Duration;

pub const LARGE_FILE_LINES: usize = 500;

pub fn print_error(msg: impl Display) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

pub fn print_success(msg: impl Display) {
    println!("{} {}", style("✓").green().bold(), msg);
}

fn print_warning(msg: impl Display) {
    println!("{} {}", style("⚠").yellow().bold(), msg);
}

fn print_stat(label: &str, value: usize) {
    println!("{}: {}", style(label).cyan(), style(value).bold());
}

pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{}µs", nanos / 1_000)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}

pub fn print_execution_time(d: Duration) {
    println!(
        "\n{} {}",
        style("Execution time:").dim(),
        style(format_duration(d)).bold()
    );
}

fn print_removed_comments(result: &CommentRemovalResult) {
    if result.removed_comments.is_empty() {
        return;
    }
    println!("\n{}", style("Removed comments:").yellow().bold());
    for comment in &result.removed_comments {
        println!(
            "  {} {}",
            style(format!("Line {}:", comment.line_number)).blue(),
            style(comment.content.trim()).dim()
        );
    }
}

pub fn print_file_result(file: &ProcessedFileResult, warn_large: bool, elapsed: Duration) {
    println!(
        "{} {} ({})",
        style("File:").blue(),
        file.path.display(),
        file.profile.name
    );

    if let Some(result) = &file.result {
        if warn_large && result.original_lines > LARGE_FILE_LINES {
            print_warning(format!(
                "Large file detected: {} lines (>{} LOC)",
                result.original_lines, LARGE_FILE_LINES
            ));
        }
        print_stat("Original lines", result.original_lines);
        print_stat("Comments removed", result.comments_removed);
        print_stat("Remaining lines", result.remaining_lines);
        print_removed_comments(result);
    }

    print_execution_time(elapsed);
}

pub fn print_large_files(files: &[ProcessedFileResult]) {
    for file in files {
        if let Some(result) = &file.result {
            if result.original_lines > LARGE_FILE_LINES {
                print_warning(format!(
                    "Large file: {} ({} lines)",
                    file.path.display(),
                    result.original_lines
                ));
            }
        }
    }
}

pub fn print_batch_summary(stats: &ProcessingStats, write: bool) {
    println!("\n{}", style("Batch Processing Summary:").cyan().bold());
    print_stat("Files processed", stats.files_processed);
    print_stat("Total comments removed", stats.total_comments);
    print_stat("Total lines processed", stats.total_lines);

    if write {
        print_stat("Files written successfully", stats.successful_writes);
        if stats.failed_writes > 0 {
            println!(
                "{}",
                style(format!("Failed writes: {}", stats.failed_writes)).red()
            );
        }
    }
}

pub fn print_errors(stats: &ProcessingStats) {
    if !stats.has_errors() {
        return;
    }
    eprintln!("\n{}", style("Errors:").red().bold());
    for err in &stats.errors {
        eprintln!("  {}", style(err).red());
    }
}

pub fn print_write_hint(file_count: usize) {
    let target = if file_count == 1 {
        "the file"
    } else {
        "all files"
    };
    println!(
        "\n{}",
        style(format!("Run with --write to apply changes to {}.", target)).cyan()
    );
}
