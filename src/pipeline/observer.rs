use std::fmt;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use tracing::{debug, warn};

use crate::models::RecordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    StatusFilter,
    DateSort,
    CurrencyFilter,
    DescriptionSearch
}

impl Stage {
    /// How the stage is named to the person reading the results.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::StatusFilter => "Status filter",
            Stage::DateSort => "Sorting by date",
            Stage::CurrencyFilter => "Currency filter",
            Stage::DescriptionSearch => "Description search"
        }
    }
}

impl Display for Stage {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::StatusFilter => "filter_by_state",
            Stage::DateSort => "sort_by_date",
            Stage::CurrencyFilter => "filter_by_currency",
            Stage::DescriptionSearch => "search_descriptions"
        };

        formatter.write_str(name)
    }
}

/// Timing and sizing of a stage call that completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub input_len: usize,
    pub output_len: usize,
    pub elapsed: Duration
}

/// Receives the outcome of every stage call the pipeline makes.
pub trait StageObserver {
    fn stage_succeeded(&self, stage: Stage, report: &StageReport);
    fn stage_failed(&self, stage: Stage, input_len: usize, error: &RecordError);
}

impl<O: StageObserver + ?Sized> StageObserver for &O {
    fn stage_succeeded(&self, stage: Stage, report: &StageReport) {
        (**self).stage_succeeded(stage, report)
    }

    fn stage_failed(&self, stage: Stage, input_len: usize, error: &RecordError) {
        (**self).stage_failed(stage, input_len, error)
    }
}

/// Reports stage calls as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StageObserver for TracingObserver {
    fn stage_succeeded(&self, stage: Stage, report: &StageReport) {
        debug!(
            "{stage} ok. Time: {:.6}s | {} -> {} record(s)",
            report.elapsed.as_secs_f64(),
            report.input_len,
            report.output_len
        );
    }

    fn stage_failed(&self, stage: Stage, input_len: usize, error: &RecordError) {
        warn!("{stage} error: {error}. Inputs: {input_len} record(s)");
    }
}
