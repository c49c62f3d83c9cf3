use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::gpa::{GpaResult, GradeTable, ValidationError};

/// Round to two decimals for display. Only output code rounds.
pub fn format_gpa(gpa: f64) -> String {
    format!("{:.2}", gpa)
}

/// Format the headline result line, e.g. "Your GPA: 9.00"
pub fn format_result(result: &GpaResult, use_colors: bool) -> String {
    let gpa = format_gpa(result.gpa);
    if use_colors {
        format!("Your GPA: {}", gpa.bold().green())
    } else {
        format!("Your GPA: {}", gpa)
    }
}

/// Format the per-subject breakdown, one line per row
/// Columns: index, subject, marks, letter, point, credit, weighted points
pub fn format_breakdown(result: &GpaResult, use_colors: bool) -> String {
    let mut lines: Vec<String> = result
        .breakdown
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            let index_str = format!("{:>2}.", idx + 1);
            let subject = format!("{:<12}", line.subject.name());
            let marks = format!("{:>3}", line.marks);
            let letter = format!("{:<1}", line.letter);
            let detail = format!(
                "{:>4.1} x {:<3} = {:>5.1}",
                line.point,
                line.credit.to_string(),
                line.weighted
            );

            if use_colors {
                format!(
                    "{} {}  {}  {}  {}",
                    index_str.dimmed(),
                    subject,
                    marks,
                    letter.bold(),
                    detail
                )
            } else {
                format!("{} {}  {}  {}  {}", index_str, subject, marks, letter, detail)
            }
        })
        .collect();

    lines.push(format!(
        "    Total: {:.1} points / {} credits",
        result.total_points, result.total_credits
    ));
    lines.join("\n")
}

/// Format as tab-separated values for scripting
/// One line per subject (subject, marks, credit, letter, point), then "GPA\t<gpa>"
pub fn format_tsv(result: &GpaResult) -> String {
    result
        .breakdown
        .iter()
        .map(|line| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                line.subject, line.marks, line.credit, line.letter, line.point
            )
        })
        .chain(std::iter::once(format!("GPA\t{}", format_gpa(result.gpa))))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_json(result: &GpaResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize GPA result")
}

/// Combine every validation error into one bulleted message
pub fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("• {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the grading scale, highest band first
pub fn format_scale(table: &GradeTable, use_colors: bool) -> String {
    table
        .bands()
        .iter()
        .map(|band| {
            let range = format!(">= {:<3}", band.min_marks);
            let point = format!("{:>4.1}", band.point);
            if use_colors {
                format!("{}  {}  {}", range.dimmed(), band.letter.bold(), point)
            } else {
                format!("{}  {}  {}", range, band.letter, point)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}
