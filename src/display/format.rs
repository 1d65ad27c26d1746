use tracing::debug;

use crate::display::converter::CurrencyConverter;
use crate::display::dates::format_date;
use crate::display::masks::mask_account_card;
use crate::models::Transaction;
use crate::types::LOCAL_CURRENCY;

/// Renders transactions as the multi-line blocks printed to the user.
pub struct TransactionFormatter<'c, C> {
    converter: &'c C
}

impl<'c, C: CurrencyConverter> TransactionFormatter<'c, C> {
    pub fn new(converter: &'c C) -> Self {
        Self { converter }
    }

    /// Local amounts print as-is. Foreign amounts get an approximate local
    /// value when the converter succeeds and stay unconverted otherwise.
    pub async fn format_amount(&self, transaction: &Transaction) -> String {
        let amount = transaction.amount().unwrap_or_else(|_| "0".to_string());

        let Ok(code) = transaction.currency_code() else {
            return amount;
        };

        if code == LOCAL_CURRENCY {
            return format!("{amount} {code}");
        }

        match self.converter.convert(transaction).await {
            Ok(converted) => format!("{amount} {code} (~{converted:.2} {LOCAL_CURRENCY})"),
            Err(error) => {
                debug!("Showing {code} amount unconverted: {error}");
                format!("{amount} {code}")
            }
        }
    }

    pub async fn format(&self, transaction: &Transaction) -> String {
        let date = transaction.date().ok()
            .and_then(format_date)
            .unwrap_or_else(|| "Date not specified".to_string());

        let description = transaction.description()
            .filter(|description| !description.is_empty())
            .unwrap_or("No description");

        let from = transaction.from_account().map(mask_or_placeholder);
        let to = transaction.to_account().map(mask_or_placeholder);

        let mut block = format!("{date} {description}\n");

        match (from, to) {
            (Some(from), Some(to)) => block.push_str(&format!("{from} -> {to}\n")),
            (Some(single), None) | (None, Some(single)) => block.push_str(&format!("{single}\n")),
            (None, None) => {}
        }

        block.push_str(&format!("Amount: {}\n", self.format_amount(transaction).await));

        block
    }
}

fn mask_or_placeholder(value: &str) -> String {
    mask_account_card(value).unwrap_or_else(|error| {
        debug!("{error}");
        "Invalid account data".to_string()
    })
}
