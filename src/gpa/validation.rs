use anyhow::{bail, Result};
use thiserror::Error;

use super::entry::{Credit, Subject, SubjectEntry};

pub const MIN_ROWS: usize = 1;
pub const MAX_ROWS: usize = 5;
pub const MIN_MARKS: i64 = 0;
pub const MAX_MARKS: i64 = 100;

/// Broad category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A number is missing or outside its allowed range
    Range,
    /// A choice was left unselected
    SelectionRequired,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please enter a number between 1 and 5")]
    RowCount,

    #[error("Row {0}: Please select a subject")]
    SubjectRequired(usize),

    #[error("Row {0}: Please select credit value")]
    CreditRequired(usize),

    #[error("Row {0}: Marks must be between 0 and 100")]
    Marks(usize),

    #[error("Expected between 1 and 5 rows, found {0}")]
    RowTotal(usize),
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::RowCount
            | ValidationError::RowTotal(_)
            | ValidationError::Marks(_) => ErrorKind::Range,
            ValidationError::SubjectRequired(_) | ValidationError::CreditRequired(_) => {
                ErrorKind::SelectionRequired
            }
        }
    }

    /// 1-based row number, if the error belongs to a row
    pub fn row(&self) -> Option<usize> {
        match self {
            ValidationError::RowCount | ValidationError::RowTotal(_) => None,
            ValidationError::SubjectRequired(row)
            | ValidationError::CreditRequired(row)
            | ValidationError::Marks(row) => Some(*row),
        }
    }
}

/// One row exactly as entered. `None` means nothing was chosen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowInput {
    pub marks: String,
    pub subject: Option<Subject>,
    pub credit: Option<Credit>,
}

impl RowInput {
    pub fn new(marks: impl Into<String>, subject: Option<Subject>, credit: Option<Credit>) -> Self {
        Self {
            marks: marks.into(),
            subject,
            credit,
        }
    }

    /// Parse `MARKS:SUBJECT:CREDIT`, e.g. `90:Java:4`.
    ///
    /// Any part may be empty, which leaves it unentered so validation can
    /// report it. Unknown subject or credit text is an error here.
    pub fn parse_arg(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 3 {
            bail!("Invalid row '{}': expected MARKS:SUBJECT:CREDIT", s);
        }

        let subject = match parts[1].trim() {
            "" => None,
            name => Some(name.parse::<Subject>()?),
        };
        let credit = match parts[2].trim() {
            "" => None,
            value => Some(value.parse::<Credit>()?),
        };

        Ok(Self::new(parts[0].trim(), subject, credit))
    }
}

/// Parse the number of rows to generate.
pub fn validate_row_count(input: &str) -> Result<usize, ValidationError> {
    match input.trim().parse::<i64>() {
        Ok(n) if n >= MIN_ROWS as i64 && n <= MAX_ROWS as i64 => Ok(n as usize),
        _ => Err(ValidationError::RowCount),
    }
}

/// Parse a marks field. Blank, non-integer and out-of-range input all fail.
pub fn parse_marks(input: &str) -> Option<i64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    input
        .parse::<i64>()
        .ok()
        .filter(|m| (MIN_MARKS..=MAX_MARKS).contains(m))
}

/// Validate every row and build the entries for aggregation.
/// Returns all validation errors at once (not just the first).
pub fn validate_rows(rows: &[RowInput]) -> Result<Vec<SubjectEntry>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut entries = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let row_number = i + 1;

        if row.subject.is_none() {
            errors.push(ValidationError::SubjectRequired(row_number));
        }
        if row.credit.is_none() {
            errors.push(ValidationError::CreditRequired(row_number));
        }
        let marks = parse_marks(&row.marks);
        if marks.is_none() {
            errors.push(ValidationError::Marks(row_number));
        }

        if let (Some(subject), Some(credit), Some(marks)) = (row.subject, row.credit, marks) {
            entries.push(SubjectEntry::new(subject, marks, credit));
        }
    }

    if errors.is_empty() {
        Ok(entries)
    } else {
        Err(errors)
    }
}

/// Check the size of a row list gathered outside the form (command line or
/// sheet file), where there is no row count field to validate.
pub fn validate_row_total(total: usize) -> Result<usize, ValidationError> {
    if (MIN_ROWS..=MAX_ROWS).contains(&total) {
        Ok(total)
    } else {
        Err(ValidationError::RowTotal(total))
    }
}
