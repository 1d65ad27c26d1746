mod currency;
mod errors;
mod observer;
mod orchestrator;
mod processing;
mod search;

pub use currency::DEFAULT_CURRENCY;
pub use orchestrator::{Pipeline, PipelineOutcome, Selection};
pub use search::{count_by_category, CaseSensitivity};
