use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::models::Transaction;
use crate::pipeline::errors::PatternError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseSensitivity {
    #[default]
    Insensitive,
    Sensitive
}

/// Compiles a search term as a case-insensitive pattern.
pub fn compile_search_pattern(term: &str) -> Result<Regex, PatternError> {
    RegexBuilder::new(term)
        .case_insensitive(true)
        .build()
        .map_err(|error| PatternError::Malformed {
            pattern: term.to_string(),
            reason: error.to_string()
        })
}

/// Keeps the records whose non-empty `description` matches `term`.
///
/// The term carries pattern semantics: `(`, `[`, `^` and friends are not
/// literal. An empty term returns the input unchanged. A term that does not
/// compile returns nothing.
pub fn search_descriptions(records: &[Transaction], term: &str) -> Vec<Transaction> {
    if term.is_empty() {
        return records.to_vec();
    }

    let pattern = match compile_search_pattern(term) {
        Ok(pattern) => pattern,
        Err(error) => {
            warn!("{error}");
            return Vec::new();
        }
    };

    records.iter()
        .filter(|record| {
            record.description()
                .is_some_and(|description| !description.is_empty() && pattern.is_match(description))
        })
        .cloned()
        .collect()
}

/// Counts records whose `description` equals one of `categories`.
///
/// Every requested label is present in the result, zero when unmatched. A
/// record is credited to the first label it equals, so the counts never add
/// up to more than the number of records.
pub fn count_by_category<S: AsRef<str>>(records: &[Transaction], categories: &[S], case: CaseSensitivity) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = categories.iter()
        .map(|category| (category.as_ref().to_string(), 0))
        .collect();

    let fold = |text: &str| match case {
        CaseSensitivity::Insensitive => text.to_lowercase(),
        CaseSensitivity::Sensitive => text.to_string()
    };

    let labels: Vec<(&str, String)> = categories.iter()
        .map(|category| (category.as_ref(), fold(category.as_ref())))
        .collect();

    for description in records.iter().filter_map(Transaction::description) {
        if description.is_empty() {
            continue;
        }

        let description = fold(description);

        if let Some((label, _)) = labels.iter().find(|(_, folded)| *folded == description) {
            if let Some(count) = counts.get_mut(*label) {
                *count += 1;
            }
        }
    }

    counts
}
