use crate::models::{RecordError, Transaction};

/// Keeps the records whose `state` equals `state` exactly, in input order.
///
/// Records without a textual `state` never match.
pub fn filter_by_state(records: &[Transaction], state: &str) -> Vec<Transaction> {
    records.iter()
        .filter(|record| record.state() == Some(state))
        .cloned()
        .collect()
}

/// Orders records by their raw `date` text.
///
/// The timestamp format sorts chronologically as plain text, so no parsing
/// happens. The sort is stable in both directions.
///
/// # Errors
/// Returns `RecordError` if any record has no textual `date`. Nothing is
/// reordered in that case.
pub fn sort_by_date(records: &[Transaction], ascending: bool) -> Result<Vec<Transaction>, RecordError> {
    let mut keyed = records.iter()
        .map(|record| record.date().map(|date| (date, record)))
        .collect::<Result<Vec<_>, _>>()?;

    if ascending {
        keyed.sort_by(|left, right| left.0.cmp(right.0));
    } else {
        keyed.sort_by(|left, right| right.0.cmp(left.0));
    }

    Ok(keyed.into_iter().map(|(_, record)| record.clone()).collect())
}
