use std::fmt;
use std::fmt::{Display, Formatter};
use std::time::Instant;

use tracing::{info, warn};

use crate::models::{Preferences, RecordError, Transaction};
use crate::pipeline::currency::filter_by_currency;
use crate::pipeline::errors::PatternError;
use crate::pipeline::observer::{Stage, StageObserver, StageReport, TracingObserver};
use crate::pipeline::processing::{filter_by_state, sort_by_date};
use crate::pipeline::search::{compile_search_pattern, search_descriptions};
use crate::types::Status;

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// The source produced nothing to work with.
    NoTransactions,
    /// Records were loaded but none carried the requested status.
    NoMatchingStatus,
    Completed(Selection)
}

/// A preference that could not be honored as asked.
#[derive(Debug, Clone, PartialEq)]
pub enum StageNotice {
    /// The stage failed, so the selection is shown as it was before it.
    Skipped {
        stage: Stage,
        error: RecordError
    },
    /// The search term does not compile, so nothing can match it.
    InvalidPattern(PatternError)
}

impl Display for StageNotice {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            StageNotice::Skipped { stage, error } => {
                write!(formatter, "{} could not be applied ({error}), showing the selection without it", stage.label())
            }
            StageNotice::InvalidPattern(error) => write!(formatter, "{error}, so no transactions match it")
        }
    }
}

/// The records left after every stage, with a notice for each preference
/// that was not honored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub records: Vec<Transaction>,
    pub notices: Vec<StageNotice>
}

/// Runs the stages in their fixed order: status, sort, currency, search.
///
/// Optional stages that fail leave the working set as it was before the stage,
/// add a [`StageNotice`] and the pipeline carries on. An empty status filter is a legitimate result,
/// not an error.
pub struct Pipeline<O = TracingObserver> {
    observer: O
}

impl Pipeline<TracingObserver> {
    pub fn new() -> Self {
        Self::with_observer(TracingObserver)
    }
}

impl Default for Pipeline<TracingObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: StageObserver> Pipeline<O> {
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// The mandatory first stage.
    pub fn filter_status(&self, records: &[Transaction], status: Status) -> Vec<Transaction> {
        let filtered = self.observe(Stage::StatusFilter, records, |records| {
            Ok(filter_by_state(records, status.as_str()))
        });

        filtered.unwrap_or_default()
    }

    /// Applies the optional stages selected in `preferences`.
    pub fn apply_preferences(&self, records: Vec<Transaction>, preferences: &Preferences) -> Selection {
        let mut selection = Selection {
            records,
            notices: Vec::new()
        };

        if preferences.sort_date {
            self.attempt(Stage::DateSort, &mut selection, |records| {
                sort_by_date(records, preferences.sort_ascending)
            });
        }

        if let Some(code) = preferences.currency_target() {
            self.attempt(Stage::CurrencyFilter, &mut selection, |records| {
                filter_by_currency(records, code)
                    .map(|record| record.cloned())
                    .collect()
            });
        }

        if let Some(term) = preferences.search_term() {
            if let Err(error) = compile_search_pattern(term) {
                selection.notices.push(StageNotice::InvalidPattern(error));
            }

            self.attempt(Stage::DescriptionSearch, &mut selection, |records| {
                Ok(search_descriptions(records, term))
            });
        }

        selection
    }

    pub fn run(&self, records: &[Transaction], status: Status, preferences: &Preferences) -> PipelineOutcome {
        if records.is_empty() {
            return PipelineOutcome::NoTransactions;
        }

        let filtered = self.filter_status(records, status);

        if filtered.is_empty() {
            info!("No transactions with status [{status}]");
            return PipelineOutcome::NoMatchingStatus;
        }

        PipelineOutcome::Completed(self.apply_preferences(filtered, preferences))
    }

    fn attempt<F>(&self, stage: Stage, selection: &mut Selection, run: F)
    where
        F: FnOnce(&[Transaction]) -> Result<Vec<Transaction>, RecordError>
    {
        match self.observe(stage, &selection.records, run) {
            Ok(output) => selection.records = output,
            Err(error) => {
                warn!("{stage} failed, keeping {} record(s) unchanged: {error}", selection.records.len());
                selection.notices.push(StageNotice::Skipped { stage, error });
            }
        }
    }

    fn observe<F>(&self, stage: Stage, input: &[Transaction], run: F) -> Result<Vec<Transaction>, RecordError>
    where
        F: FnOnce(&[Transaction]) -> Result<Vec<Transaction>, RecordError>
    {
        let timer = Instant::now();

        match run(input) {
            Ok(output) => {
                let report = StageReport {
                    input_len: input.len(),
                    output_len: output.len(),
                    elapsed: timer.elapsed()
                };

                self.observer.stage_succeeded(stage, &report);

                Ok(output)
            }
            Err(error) => {
                self.observer.stage_failed(stage, input.len(), &error);

                Err(error)
            }
        }
    }
}
