#[cfg(test)]
mod tests;

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::warn;

use crate::models::Preferences;
use crate::types::Status;

const MAX_ATTEMPTS: usize = 3;

/// Collects the status and preferences from a person at a terminal.
///
/// Each question is asked at most `max_attempts` times. Running out of
/// attempts, or of input, falls back to the answer that disables the stage.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: usize
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            max_attempts: MAX_ATTEMPTS
        }
    }

    /// `None` means no valid status was given within the attempt budget.
    pub fn ask_status(&mut self) -> io::Result<Option<Status>> {
        let question = "Enter the status to filter by.\nAvailable statuses: EXECUTED, CANCELED, PENDING";

        for _ in 0..self.max_attempts {
            let Some(answer) = self.ask(question)? else {
                break;
            };

            match Status::from_str(&answer) {
                Ok(status) => {
                    writeln!(self.output, "Transactions filtered by status '{status}'")?;
                    return Ok(Some(status));
                }
                Err(_) => writeln!(self.output, "Status '{answer}' is not available.")?
            }
        }

        warn!("No valid status entered after {} attempt(s)", self.max_attempts);

        Ok(None)
    }

    pub fn ask_preferences(&mut self) -> io::Result<Preferences> {
        let sort_date = self.ask_yes_no("Sort transactions by date? yes/no")?;
        let sort_ascending = sort_date && self.ask_sort_order()?;
        let rub_only = self.ask_yes_no("Show only ruble transactions? yes/no")?;

        let search_word = if self.ask_yes_no("Filter transactions by a word in the description? yes/no")? {
            self.ask("Enter the word to search for in the description:")?
                .filter(|word| !word.is_empty())
        } else {
            None
        };

        Ok(Preferences {
            sort_date,
            sort_ascending,
            rub_only,
            currency: None,
            search_word
        })
    }

    pub fn ask_yes_no(&mut self, question: &str) -> io::Result<bool> {
        for _ in 0..self.max_attempts {
            let Some(answer) = self.ask(question)? else {
                break;
            };

            match answer.to_lowercase().as_str() {
                "yes" | "y" => return Ok(true),
                "no" | "n" => return Ok(false),
                _ => writeln!(self.output, "Please answer 'yes' or 'no'")?
            }
        }

        Ok(false)
    }

    /// `true` for ascending.
    pub fn ask_sort_order(&mut self) -> io::Result<bool> {
        for _ in 0..self.max_attempts {
            let Some(answer) = self.ask("Sort ascending or descending?")? else {
                break;
            };

            let answer = answer.to_lowercase();

            if answer.contains("desc") {
                return Ok(false);
            }

            if answer.contains("asc") {
                return Ok(true);
            }

            writeln!(self.output, "Please answer 'ascending' or 'descending'")?;
        }

        Ok(false)
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }
}
