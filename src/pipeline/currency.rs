use crate::models::{RecordError, Transaction};

/// Target used when a currency filter is asked for without naming a currency.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Lazy, single-pass filter over records whose `operationAmount.currency.code`
/// equals the target.
///
/// A record without the nested currency path yields an `Err` for that element
/// and iteration carries on with the next one. Collect into
/// `Result<Vec<_>, _>` to treat such a record as fatal for the whole pass, or
/// `filter_map(Result::ok)` to skip it.
pub struct CurrencyFilter<'c, I> {
    records: I,
    code: &'c str
}

impl<'r, 'c, I> Iterator for CurrencyFilter<'c, I>
where
    I: Iterator<Item = &'r Transaction>
{
    type Item = Result<&'r Transaction, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        for record in self.records.by_ref() {
            match record.currency_code() {
                Ok(code) if code == self.code => return Some(Ok(record)),
                Ok(_) => continue,
                Err(error) => return Some(Err(error))
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.records.size_hint().1)
    }
}

pub fn filter_by_currency<'r, 'c, I>(records: I, code: &'c str) -> CurrencyFilter<'c, I::IntoIter>
where
    I: IntoIterator<Item = &'r Transaction>
{
    CurrencyFilter {
        records: records.into_iter(),
        code
    }
}
