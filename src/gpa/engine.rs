use super::entry::{Credit, Subject, SubjectEntry};
use super::table::GradeTable;
use serde::Serialize;

/// One subject's contribution to the GPA.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedEntry {
    pub subject: Subject,
    pub marks: i64,
    pub credit: Credit,
    pub letter: &'static str,
    pub point: f64,
    pub weighted: f64, // point * credit
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpaResult {
    pub gpa: f64,
    pub total_points: f64,
    pub total_credits: f64,
    pub breakdown: Vec<GradedEntry>,
}

/// Credit-weighted average of grade points using the standard scale.
pub fn compute_gpa(entries: &[SubjectEntry]) -> f64 {
    calculate_gpa(entries).gpa
}

pub fn calculate_gpa(entries: &[SubjectEntry]) -> GpaResult {
    calculate_gpa_with(entries, GradeTable::standard())
}

/// Resolve every entry against `table` and reduce to a weighted average.
///
/// An empty list (or zero total credit) yields a GPA of 0.0. The value is
/// kept at full precision; rounding is left to the formatter.
pub fn calculate_gpa_with(entries: &[SubjectEntry], table: &GradeTable) -> GpaResult {
    let mut total_points = 0.0;
    let mut total_credits = 0.0;
    let mut breakdown = Vec::with_capacity(entries.len());

    for entry in entries {
        let band = table.resolve(entry.marks);
        let credit = entry.credit.value();
        let weighted = band.point * credit;

        total_points += weighted;
        total_credits += credit;

        breakdown.push(GradedEntry {
            subject: entry.subject,
            marks: entry.marks,
            credit: entry.credit,
            letter: band.letter,
            point: band.point,
            weighted,
        });
    }

    let gpa = if total_credits > 0.0 {
        total_points / total_credits
    } else {
        0.0
    };

    GpaResult {
        gpa,
        total_points,
        total_credits,
        breakdown,
    }
}
