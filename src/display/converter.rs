use std::time::Duration;

use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::display::errors::ConversionFailure;
use crate::models::Transaction;
use crate::types::LOCAL_CURRENCY;

const CONVERT_URL: &str = "https://api.apilayer.com/exchangerates_data/convert";
const API_KEY_VARIABLE: &str = "API_KEY";
const API_URL_VARIABLE: &str = "EXCHANGE_RATES_URL";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Converts a transaction's amount into the local currency for display.
pub trait CurrencyConverter {
    async fn convert(&self, transaction: &Transaction) -> Result<Decimal, ConversionFailure>;
}

/// Used when no exchange rate service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConversion;

impl CurrencyConverter for NoConversion {
    async fn convert(&self, _transaction: &Transaction) -> Result<Decimal, ConversionFailure> {
        Err(ConversionFailure::NotConfigured)
    }
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    result: Decimal
}

/// Client for the apilayer `exchangerates_data/convert` endpoint.
pub struct ExchangeRatesClient {
    client: Client,
    api_key: String,
    base_url: String
}

impl ExchangeRatesClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConversionFailure> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: CONVERT_URL.to_string()
        })
    }

    /// Builds a client from `API_KEY`, if it is set. `EXCHANGE_RATES_URL`
    /// replaces the endpoint.
    pub fn from_env() -> Option<Result<Self, ConversionFailure>> {
        let api_key = std::env::var(API_KEY_VARIABLE).ok()
            .filter(|key| !key.trim().is_empty())?;

        let client = match Self::new(api_key) {
            Ok(client) => client,
            Err(error) => return Some(Err(error))
        };

        Some(Ok(match std::env::var(API_URL_VARIABLE) {
            Ok(base_url) if !base_url.trim().is_empty() => client.with_base_url(base_url),
            _ => client
        }))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl CurrencyConverter for ExchangeRatesClient {
    async fn convert(&self, transaction: &Transaction) -> Result<Decimal, ConversionFailure> {
        let code = transaction.currency_code()?;
        let amount = transaction.amount()?;

        debug!("Converting {amount} {code} to {LOCAL_CURRENCY}");

        let response = self.client.get(&self.base_url)
            .query(&[("to", LOCAL_CURRENCY), ("from", code), ("amount", amount.as_str())])
            .header("apikey", &self.api_key)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            return Err(ConversionFailure::Status(status.as_u16()));
        }

        let body: ConvertResponse = response.json().await?;

        Ok(body.result.round_dp(2))
    }
}
