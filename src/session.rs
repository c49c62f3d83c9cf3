use crate::gpa::{
    calculate_gpa, validate_row_count, validate_row_total, validate_rows, Credit, GpaResult,
    RowInput, Subject, ValidationError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState {
    AwaitingRowCount,
    RowsDisplayed,
    ResultDisplayed(GpaResult),
}

/// The calculator screen: a row count prompt, the generated rows and the
/// last result. Every calculation re-reads the rows; nothing is cached.
#[derive(Debug, Clone)]
pub struct Session {
    pub state: ScreenState,
    rows: Vec<RowInput>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: ScreenState::AwaitingRowCount,
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[RowInput] {
        &self.rows
    }

    /// Generate `n` blank rows from the row count field.
    ///
    /// Allowed from any state. On failure rows and state are left untouched.
    pub fn submit_row_count(&mut self, input: &str) -> Result<usize, ValidationError> {
        let count = validate_row_count(input)?;
        self.rows = vec![RowInput::default(); count];
        self.state = ScreenState::RowsDisplayed;
        Ok(count)
    }

    /// Replace all rows at once, e.g. from a sheet file.
    ///
    /// The list must hold 1 to 5 rows; otherwise nothing changes.
    pub fn load_rows(&mut self, rows: Vec<RowInput>) -> Result<usize, ValidationError> {
        let count = validate_row_total(rows.len())?;
        self.rows = rows;
        self.state = ScreenState::RowsDisplayed;
        Ok(count)
    }

    pub fn set_marks(&mut self, index: usize, marks: impl Into<String>) -> bool {
        self.edit(index, |row| row.marks = marks.into())
    }

    pub fn select_subject(&mut self, index: usize, subject: Option<Subject>) -> bool {
        self.edit(index, |row| row.subject = subject)
    }

    pub fn select_credit(&mut self, index: usize, credit: Option<Credit>) -> bool {
        self.edit(index, |row| row.credit = credit)
    }

    /// Validate current rows and, if all pass, compute the GPA.
    ///
    /// Invalid input keeps the rows on screen and returns every error.
    pub fn calculate(&mut self) -> Result<GpaResult, Vec<ValidationError>> {
        if matches!(self.state, ScreenState::AwaitingRowCount) {
            return Err(vec![ValidationError::RowCount]);
        }

        match validate_rows(&self.rows) {
            Ok(entries) => {
                let result = calculate_gpa(&entries);
                self.state = ScreenState::ResultDisplayed(result.clone());
                Ok(result)
            }
            Err(errors) => {
                self.state = ScreenState::RowsDisplayed;
                Err(errors)
            }
        }
    }

    pub fn result(&self) -> Option<&GpaResult> {
        match &self.state {
            ScreenState::ResultDisplayed(result) => Some(result),
            _ => None,
        }
    }

    /// Apply an edit to row `index` (0-based). Editing drops any shown
    /// result. Returns false if there is no such row.
    fn edit(&mut self, index: usize, f: impl FnOnce(&mut RowInput)) -> bool {
        match self.rows.get_mut(index) {
            Some(row) => {
                f(row);
                self.state = ScreenState::RowsDisplayed;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(session: &mut Session, index: usize, marks: &str, credit: Credit) {
        session.set_marks(index, marks);
        session.select_subject(index, Some(Subject::Java));
        session.select_credit(index, Some(credit));
    }

    #[test]
    fn test_starts_awaiting_row_count() {
        let session = Session::new();
        assert_eq!(session.state, ScreenState::AwaitingRowCount);
        assert!(session.rows().is_empty());
    }

    #[test]
    fn test_row_count_generates_blank_rows() {
        let mut session = Session::new();
        assert_eq!(session.submit_row_count("3"), Ok(3));
        assert_eq!(session.state, ScreenState::RowsDisplayed);
        assert_eq!(session.rows().len(), 3);
        assert!(session.rows().iter().all(|r| *r == RowInput::default()));
    }

    #[test]
    fn test_bad_row_count_generates_nothing() {
        for input in ["0", "6", "-1", "five"] {
            let mut session = Session::new();
            assert!(session.submit_row_count(input).is_err());
            assert_eq!(session.state, ScreenState::AwaitingRowCount);
            assert!(session.rows().is_empty());
        }
    }

    #[test]
    fn test_bad_row_count_keeps_existing_rows() {
        let mut session = Session::new();
        session.submit_row_count("2").unwrap();
        session.set_marks(0, "80");
        assert!(session.submit_row_count("9").is_err());
        assert_eq!(session.rows().len(), 2);
        assert_eq!(session.rows()[0].marks, "80");
    }

    #[test]
    fn test_calculate_valid() {
        let mut session = Session::new();
        session.submit_row_count("2").unwrap();
        fill(&mut session, 0, "90", Credit::Four);
        fill(&mut session, 1, "40", Credit::One);

        let gpa = session.calculate().unwrap().gpa;
        assert_eq!(gpa, 9.0);
        assert!(matches!(session.state, ScreenState::ResultDisplayed(_)));
        assert_eq!(session.result().map(|r| r.gpa), Some(9.0));
    }

    #[test]
    fn test_calculate_invalid_stays_on_rows() {
        let mut session = Session::new();
        session.submit_row_count("2").unwrap();
        fill(&mut session, 0, "90", Credit::Four);

        let errors = session.calculate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.row() == Some(2)));
        assert_eq!(session.state, ScreenState::RowsDisplayed);
    }

    #[test]
    fn test_edit_after_result_returns_to_rows() {
        let mut session = Session::new();
        session.submit_row_count("1").unwrap();
        fill(&mut session, 0, "90", Credit::Four);
        session.calculate().unwrap();

        assert!(session.set_marks(0, "101"));
        assert_eq!(session.state, ScreenState::RowsDisplayed);
        assert!(session.result().is_none());
        assert_eq!(
            session.calculate().unwrap_err(),
            vec![ValidationError::Marks(1)]
        );
    }

    #[test]
    fn test_recalculate_reads_current_rows() {
        let mut session = Session::new();
        session.submit_row_count("1").unwrap();
        fill(&mut session, 0, "90", Credit::Four);
        assert_eq!(session.calculate().unwrap().gpa, 10.0);

        session.set_marks(0, "72");
        assert_eq!(session.calculate().unwrap().gpa, 8.0);
    }

    #[test]
    fn test_edit_missing_row() {
        let mut session = Session::new();
        session.submit_row_count("1").unwrap();
        assert!(!session.set_marks(4, "50"));
        assert!(!session.select_subject(1, Some(Subject::Python)));
    }

    #[test]
    fn test_calculate_before_rows() {
        let mut session = Session::new();
        assert_eq!(
            session.calculate().unwrap_err(),
            vec![ValidationError::RowCount]
        );
    }

    #[test]
    fn test_load_rows_then_calculate() {
        let mut session = Session::new();
        let rows = vec![
            RowInput::new("90", Some(Subject::Java), Some(Credit::Four)),
            RowInput::new("40", Some(Subject::Oops), Some(Credit::One)),
        ];
        assert_eq!(session.load_rows(rows), Ok(2));
        assert_eq!(session.state, ScreenState::RowsDisplayed);
        assert_eq!(session.calculate().unwrap().gpa, 9.0);
    }

    #[test]
    fn test_load_rows_rejects_bad_total() {
        let mut session = Session::new();
        assert_eq!(session.load_rows(vec![]), Err(ValidationError::RowTotal(0)));
        assert_eq!(
            session.load_rows(vec![RowInput::default(); 6]),
            Err(ValidationError::RowTotal(6))
        );
        assert_eq!(session.state, ScreenState::AwaitingRowCount);
        assert!(session.rows().is_empty());
    }

    #[test]
    fn test_load_rows_reports_every_row() {
        let mut session = Session::new();
        session
            .load_rows(vec![
                RowInput::new("abc", Some(Subject::Java), Some(Credit::Four)),
                RowInput::new("50", None, Some(Credit::Two)),
            ])
            .unwrap();
        assert_eq!(
            session.calculate().unwrap_err(),
            vec![ValidationError::Marks(1), ValidationError::SubjectRequired(2)]
        );
    }

    #[test]
    fn test_regenerate_rows_clears_inputs() {
        let mut session = Session::new();
        session.submit_row_count("1").unwrap();
        fill(&mut session, 0, "90", Credit::Four);
        session.calculate().unwrap();

        session.submit_row_count("2").unwrap();
        assert_eq!(session.state, ScreenState::RowsDisplayed);
        assert_eq!(session.rows(), &[RowInput::default(), RowInput::default()]);
    }
}
