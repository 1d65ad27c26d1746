mod converter;
mod dates;
mod errors;
mod format;
mod masks;
#[cfg(test)]
mod tests;

pub use converter::{CurrencyConverter, ExchangeRatesClient, NoConversion};
pub use format::TransactionFormatter;
