use anyhow::{Context, Result};
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::gpa::{Credit, RowInput, Subject};

/// A file of rows to calculate without prompting.
///
/// Example YAML:
/// ```yaml
/// rows:
///   - { subject: Java, credit: 4, marks: 90 }
///   - { subject: OOPS, credit: 1.5, marks: 72 }
/// ```
///
/// Every field is optional so that missing entries surface as validation
/// errors instead of parse errors.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sheet {
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SheetRow {
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default)]
    pub credit: Option<Credit>,
    /// Kept as raw text so non-integer marks fail validation with the
    /// other rows instead of failing the load
    #[serde(default, deserialize_with = "deserialize_marks")]
    pub marks: Option<String>,
}

impl From<SheetRow> for RowInput {
    fn from(row: SheetRow) -> Self {
        RowInput::new(row.marks.unwrap_or_default(), row.subject, row.credit)
    }
}

fn deserialize_marks<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct MarksVisitor;

    impl<'de> Visitor<'de> for MarksVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("marks as a number or text")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        // Debug keeps the fraction ("90.0"), so a float never passes as an integer
        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(format!("{:?}", v)))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            deserialize_marks(d)
        }
    }

    deserializer.deserialize_any(MarksVisitor)
}

pub fn parse_sheet(content: &str) -> Result<Vec<RowInput>> {
    let sheet: Sheet = serde_saphyr::from_str(content).context("Failed to parse sheet")?;
    Ok(sheet.rows.into_iter().map(RowInput::from).collect())
}

/// Load rows from a YAML sheet file
pub fn load_sheet(path: &Path) -> Result<Vec<RowInput>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sheet at {}", path.display()))?;
    parse_sheet(&content).with_context(|| format!("Invalid sheet {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpa::{validate_rows, ValidationError};
    use std::env;

    #[test]
    fn test_parse_full_sheet() {
        let yaml = r#"
rows:
  - subject: Java
    credit: 4
    marks: 90
  - subject: OOPS
    credit: 1.5
    marks: 72
"#;
        let rows = parse_sheet(yaml).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], RowInput::new("90", Some(Subject::Java), Some(Credit::Four)));
        assert_eq!(rows[1].credit, Some(Credit::OneAndHalf));
        assert_eq!(rows[1].subject, Some(Subject::Oops));
    }

    #[test]
    fn test_missing_fields_become_validation_errors() {
        let yaml = r#"
rows:
  - subject: Python
    marks: 120
  - credit: 2
"#;
        let rows = parse_sheet(yaml).unwrap();
        assert_eq!(rows[1].marks, "");

        let errors = validate_rows(&rows).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::CreditRequired(1),
                ValidationError::Marks(1),
                ValidationError::SubjectRequired(2),
                ValidationError::Marks(2),
            ]
        );
    }

    #[test]
    fn test_non_integer_marks_join_other_row_errors() {
        let yaml = r#"
rows:
  - { subject: Java, credit: 4, marks: abc }
  - { credit: 2, marks: 50 }
"#;
        let rows = parse_sheet(yaml).unwrap();
        assert_eq!(rows[0].marks, "abc");

        let errors = validate_rows(&rows).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::Marks(1), ValidationError::SubjectRequired(2)]
        );
    }

    #[test]
    fn test_fractional_and_empty_marks_fail_validation() {
        let yaml = r#"
rows:
  - { subject: Java, credit: 4, marks: 88.5 }
  - { subject: Python, credit: 3, marks: "" }
  - { subject: OOPS, credit: 1, marks: 90.0 }
  - { subject: Calculus, credit: 2, marks: 70 }
"#;
        let rows = parse_sheet(yaml).unwrap();
        assert_eq!(rows[3].marks, "70");

        let errors = validate_rows(&rows).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::Marks(1),
                ValidationError::Marks(2),
                ValidationError::Marks(3),
            ]
        );
    }

    #[test]
    fn test_unknown_subject_is_parse_error() {
        let yaml = "rows:\n  - { subject: Art, credit: 2, marks: 50 }\n";
        assert!(parse_sheet(yaml).is_err());
    }

    #[test]
    fn test_unknown_credit_is_parse_error() {
        let yaml = "rows:\n  - { subject: Java, credit: 2.5, marks: 50 }\n";
        assert!(parse_sheet(yaml).is_err());
    }

    #[test]
    fn test_load_sheet_file() {
        let path = env::temp_dir().join("gpa_calc_test_sheet.yaml");
        fs::write(&path, "rows:\n  - { subject: Calculus, credit: 3, marks: 65 }\n").unwrap();

        let rows = load_sheet(&path).unwrap();
        assert_eq!(rows, vec![RowInput::new("65", Some(Subject::Calculus), Some(Credit::Three))]);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_sheet() {
        let path = env::temp_dir().join("gpa_calc_test_missing_sheet.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_sheet(&path).is_err());
    }
}
