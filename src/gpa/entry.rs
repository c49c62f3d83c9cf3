use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subjects offered on the form. Display only, never used in GPA math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Subject {
    Differential,
    Python,
    #[serde(rename = "OOPS")]
    Oops,
    Calculus,
    Java,
}

impl Subject {
    pub const ALL: [Subject; 5] = [
        Subject::Differential,
        Subject::Python,
        Subject::Oops,
        Subject::Calculus,
        Subject::Java,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Subject::Differential => "Differential",
            Subject::Python => "Python",
            Subject::Oops => "OOPS",
            Subject::Calculus => "Calculus",
            Subject::Java => "Java",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subject {
    type Err = anyhow::Error;

    /// Case-insensitive match on the subject name
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match Subject::ALL
            .iter()
            .find(|subject| subject.name().eq_ignore_ascii_case(s))
        {
            Some(subject) => Ok(*subject),
            None => bail!(
                "Unknown subject '{}' (expected one of: {})",
                s,
                Subject::ALL.map(|s| s.name()).join(", ")
            ),
        }
    }
}

/// Credit weights offered on the form.
///
/// Only these five values exist, so a non-positive weight cannot reach the
/// aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum Credit {
    One,
    OneAndHalf,
    Two,
    Three,
    Four,
}

impl Credit {
    pub const ALL: [Credit; 5] = [
        Credit::One,
        Credit::OneAndHalf,
        Credit::Two,
        Credit::Three,
        Credit::Four,
    ];

    pub fn value(&self) -> f64 {
        match self {
            Credit::One => 1.0,
            Credit::OneAndHalf => 1.5,
            Credit::Two => 2.0,
            Credit::Three => 3.0,
            Credit::Four => 4.0,
        }
    }

    pub fn from_value(value: f64) -> Option<Credit> {
        Credit::ALL.into_iter().find(|c| c.value() == value)
    }
}

impl fmt::Display for Credit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1 rather than 1.0, 1.5 stays 1.5
        write!(f, "{}", self.value())
    }
}

impl FromStr for Credit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let value: f64 = s
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid credit '{}'", s))?;
        Credit::try_from(value)
    }
}

impl TryFrom<f64> for Credit {
    type Error = anyhow::Error;

    fn try_from(value: f64) -> Result<Self> {
        match Credit::from_value(value) {
            Some(credit) => Ok(credit),
            None => bail!(
                "Invalid credit {} (expected one of: {})",
                value,
                Credit::ALL.map(|c| c.to_string()).join(", ")
            ),
        }
    }
}

impl From<Credit> for f64 {
    fn from(credit: Credit) -> f64 {
        credit.value()
    }
}

/// A validated row, ready for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectEntry {
    pub subject: Subject,
    pub marks: i64,
    pub credit: Credit,
}

impl SubjectEntry {
    pub fn new(subject: Subject, marks: i64, credit: Credit) -> Self {
        Self {
            subject,
            marks,
            credit,
        }
    }
}
