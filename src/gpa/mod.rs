pub mod engine;
pub mod entry;
pub mod table;
pub mod validation;

pub use engine::{calculate_gpa, calculate_gpa_with, compute_gpa, GpaResult, GradedEntry};
pub use entry::{Credit, Subject, SubjectEntry};
pub use table::{GradeTable, GradeThreshold};
pub use validation::{
    validate_row_count, validate_row_total, validate_rows, ErrorKind, RowInput, ValidationError,
};
