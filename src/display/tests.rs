use super::converter::{CurrencyConverter, ExchangeRatesClient, NoConversion};
use super::dates::format_date;
use super::errors::{ConversionFailure, MaskError};
use super::format::TransactionFormatter;
use super::masks::{mask_account_card, mask_account_number, mask_card_number};

use std::cell::Cell;
use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;
use serde_json::json;

use crate::models::Transaction;

struct FixedRate {
    result: Decimal,
    calls: Cell<usize>
}

impl CurrencyConverter for FixedRate {
    async fn convert(&self, _transaction: &Transaction) -> Result<Decimal, ConversionFailure> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.result)
    }
}

fn create_transfer(code: &str) -> Result<Transaction> {
    Ok(Transaction::try_from(json!({
        "state": "EXECUTED",
        "date": "2019-08-26T10:50:58.294041",
        "operationAmount": {"amount": "31957.58", "currency": {"code": code}},
        "description": "Перевод организации",
        "from": "Maestro 1596837868705199",
        "to": "Счет 64686473678894779589"
    }))?)
}

#[test]
fn test_card_numbers_are_masked() {
    assert_eq!(mask_card_number("7000792289606361"), Ok("7000 79** **** 6361".to_string()));
    assert_eq!(mask_card_number("700079228960636"), Err(MaskError::InvalidCardNumber));
    assert_eq!(mask_card_number("70007922896063a1"), Err(MaskError::InvalidCardNumber));
}

#[test]
fn test_account_numbers_are_masked() {
    assert_eq!(mask_account_number("73654108430135874305"), Ok("**4305".to_string()));
    assert_eq!(mask_account_number("7365410843013587430"), Err(MaskError::InvalidAccountNumber));
}

#[test]
fn test_labelled_numbers_keep_their_label() {
    assert_eq!(mask_account_card("Visa Platinum 7000792289606361"), Ok("Visa Platinum 7000 79** **** 6361".to_string()));
    assert_eq!(mask_account_card("Счет 73654108430135874305"), Ok("Счет **4305".to_string()));
    assert_eq!(mask_account_card("7000792289606361"), Ok("7000 79** **** 6361".to_string()));
    assert!(matches!(mask_account_card("Maestro 12345"), Err(MaskError::Unrecognized(_))));
    assert!(mask_account_card("").is_err());
}

#[test]
fn test_dates_render_day_first() {
    assert_eq!(format_date("2019-08-26T10:50:58.294041"), Some("26.08.2019".to_string()));
    assert_eq!(format_date("2023-09-05T11:30:32Z"), Some("05.09.2023".to_string()));
    assert_eq!(format_date("2024-01-02"), Some("02.01.2024".to_string()));
    assert_eq!(format_date("yesterday"), None);
    assert_eq!(format_date(""), None);
}

#[tokio::test]
async fn test_local_amounts_are_never_converted() -> Result<()> {
    let converter = FixedRate { result: Decimal::from_str("1.00")?, calls: Cell::new(0) };
    let formatter = TransactionFormatter::new(&converter);

    assert_eq!(formatter.format_amount(&create_transfer("RUB")?).await, "31957.58 RUB");
    assert_eq!(converter.calls.get(), 0);

    Ok(())
}

#[tokio::test]
async fn test_foreign_amounts_show_converted_value() -> Result<()> {
    let converter = FixedRate { result: Decimal::from_str("2918475.5")?, calls: Cell::new(0) };
    let formatter = TransactionFormatter::new(&converter);

    assert_eq!(formatter.format_amount(&create_transfer("USD")?).await, "31957.58 USD (~2918475.50 RUB)");
    assert_eq!(converter.calls.get(), 1);

    Ok(())
}

#[tokio::test]
async fn test_failed_conversion_falls_back_to_original_amount() -> Result<()> {
    let formatter = TransactionFormatter::new(&NoConversion);

    assert_eq!(formatter.format_amount(&create_transfer("EUR")?).await, "31957.58 EUR");

    Ok(())
}

#[tokio::test]
async fn test_full_transaction_block() -> Result<()> {
    let formatter = TransactionFormatter::new(&NoConversion);

    let block = formatter.format(&create_transfer("RUB")?).await;

    assert_eq!(block, "26.08.2019 Перевод организации\nMaestro 1596 83** **** 5199 -> Счет **9589\nAmount: 31957.58 RUB\n");

    Ok(())
}

#[tokio::test]
async fn test_sparse_transaction_block_uses_placeholders() -> Result<()> {
    let formatter = TransactionFormatter::new(&NoConversion);
    let transaction = Transaction::try_from(json!({
        "to": "Счет 64686473678894779589",
        "operationAmount": {"amount": 12, "currency": {"code": "RUB"}}
    }))?;

    let block = formatter.format(&transaction).await;

    assert_eq!(block, "Date not specified No description\nСчет **9589\nAmount: 12 RUB\n");

    Ok(())
}

#[tokio::test]
async fn test_exchange_client_rejects_records_without_currency() -> Result<()> {
    let client = ExchangeRatesClient::new("test-key")?;
    let transaction = Transaction::try_from(json!({"state": "EXECUTED"}))?;

    assert!(matches!(client.convert(&transaction).await, Err(ConversionFailure::Record(_))));

    Ok(())
}

#[tokio::test]
async fn test_exchange_client_reports_unreachable_service() -> Result<()> {
    let client = ExchangeRatesClient::new("test-key")?.with_base_url("http://127.0.0.1:9/convert");

    assert!(matches!(client.convert(&create_transfer("USD")?).await, Err(ConversionFailure::Http(_))));

    Ok(())
}
