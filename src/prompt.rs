use anyhow::{bail, Context, Result};
use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use crate::gpa::{Credit, GpaResult, Subject};
use crate::output;
use crate::session::Session;

/// Line-based terminal front end for a [`Session`].
pub struct Prompter<R, W> {
    input: R,
    output: W,
    use_colors: bool,
    show_breakdown: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, use_colors: bool, show_breakdown: bool) -> Self {
        Self {
            input,
            output,
            use_colors,
            show_breakdown,
        }
    }

    /// Run the calculator until the user stops or input ends.
    /// Returns the last GPA computed, if any.
    pub fn run(&mut self) -> Result<Option<GpaResult>> {
        let mut session = Session::new();
        let mut last_result = None;

        loop {
            // Row count, repeated until valid
            loop {
                let Some(line) = self.prompt("Number of subjects (1-5): ")? else {
                    return Ok(last_result);
                };
                match session.submit_row_count(&line) {
                    Ok(_) => break,
                    Err(e) => self.say(&format!("  {}", e))?,
                }
            }

            let mut pending: Vec<usize> = (0..session.rows().len()).collect();
            loop {
                for &index in &pending {
                    self.fill_row(&mut session, index)?;
                }

                match session.calculate() {
                    Ok(result) => {
                        self.say("")?;
                        if self.show_breakdown {
                            self.say(&output::format_breakdown(&result, self.use_colors))?;
                            self.say("")?;
                        }
                        self.say(&output::format_result(&result, self.use_colors))?;
                        last_result = Some(result);
                        break;
                    }
                    Err(errors) => {
                        self.say("")?;
                        self.say("Please fix the following:")?;
                        self.say(&output::format_errors(&errors))?;
                        // Re-prompt only the rows that failed
                        let rows: BTreeSet<usize> =
                            errors.iter().filter_map(|e| e.row()).collect();
                        pending = rows.into_iter().map(|row| row - 1).collect();
                    }
                }
            }

            self.say("")?;
            match self.prompt("Calculate again? [y/N]: ")? {
                Some(answer) if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") => {}
                _ => return Ok(last_result),
            }
        }
    }

    fn fill_row(&mut self, session: &mut Session, index: usize) -> Result<()> {
        self.say(&format!("Row {}:", index + 1))?;

        let marks = self.require("  Marks (0-100): ")?;
        session.set_marks(index, marks);

        let menu = Subject::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}) {}", i + 1, s))
            .collect::<Vec<_>>()
            .join("  ");
        self.say(&format!("  Subjects: {}", menu))?;
        let subject = self.choose("  Subject [number or name, blank to skip]: ", parse_subject_choice)?;
        session.select_subject(index, subject);

        let credits = Credit::ALL
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let credit = self.choose(
            &format!("  Credits [{}, blank to skip]: ", credits),
            |s| s.parse::<Credit>().ok(),
        )?;
        session.select_credit(index, credit);

        Ok(())
    }

    /// Ask until the answer is blank (unselected) or accepted by `parse`.
    fn choose<T>(&mut self, message: &str, parse: impl Fn(&str) -> Option<T>) -> Result<Option<T>> {
        loop {
            let answer = self.require(message)?;
            if answer.is_empty() {
                return Ok(None);
            }
            match parse(&answer) {
                Some(value) => return Ok(Some(value)),
                None => self.say(&format!("  Invalid choice '{}'. Try again.", answer))?,
            }
        }
    }

    /// Prompt user with a message and return their trimmed input, or None at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn require(&mut self, message: &str) -> Result<String> {
        match self.prompt(message)? {
            Some(line) => Ok(line),
            None => bail!("Input ended before the row was complete"),
        }
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write output")
    }
}

/// Accept a 1-based menu number or a subject name
fn parse_subject_choice(s: &str) -> Option<Subject> {
    if let Ok(n) = s.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| Subject::ALL.get(i).copied());
    }
    s.parse::<Subject>().ok()
}
