#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Client for the ExchangeRate-API v6 pair endpoint.
//!
//! Every failure is classified into one of three [`ErrorKind`]s: the upstream was
//! unreachable, it answered with a bad status or body, or it reported an API error.
//!
//! # Example
//!
//! ```rust,no_run
//! use exchange_rate_ox::ExchangeRate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ExchangeRate::new("your-api-key");
//!     let response = client.convert("usd", "inr", 100.0).await?;
//!     let conversion = response.conversion_result()?;
//!     println!("{} (rate {})", conversion.converted_amount, conversion.rate);
//!     Ok(())
//! }
//! ```

pub mod error;
mod internal;
pub mod request;
pub mod response;

pub use error::{ErrorKind, ExchangeRateRequestError};
pub use request::{CurrencyCode, PairRequest};
pub use response::{ConversionResult, PairResponse};

use bon::Builder;
use core::fmt;
use std::time::Duration;

use crate::internal::ExchangeRateRequestHelper;

pub const BASE_URL: &str = "https://v6.exchangerate-api.com/v6";

/// Per-request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Builder)]
pub struct ExchangeRate {
    #[builder(into)]
    pub(crate) api_key: String,
    #[builder(default)]
    pub(crate) client: reqwest::Client,
    #[builder(default = BASE_URL.to_string(), into)]
    pub(crate) base_url: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub(crate) timeout: Duration,
}

impl ExchangeRate {
    /// Create a new client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request_helper(&self) -> ExchangeRateRequestHelper<'_> {
        ExchangeRateRequestHelper::new(&self.client, &self.base_url, &self.api_key, self.timeout)
    }
}

impl ExchangeRate {
    /// Single attempt, no retry. A request with an amount only succeeds when the
    /// payload carries `conversion_result`.
    pub async fn send(&self, request: &PairRequest) -> Result<PairResponse, ExchangeRateRequestError> {
        let result = self.request_helper().send_pair_request(request).await;
        if let Err(error) = &result {
            log::warn!(
                "pair {}/{} failed ({}): {error}",
                request.from,
                request.to,
                error.kind()
            );
        }
        result
    }

    /// Convert `amount` of `from` into `to`.
    pub async fn convert(
        &self,
        from: impl Into<CurrencyCode>,
        to: impl Into<CurrencyCode>,
        amount: f64,
    ) -> Result<PairResponse, ExchangeRateRequestError> {
        self.send(&PairRequest::new(from, to, Some(amount))).await
    }

    /// Rate-only query; the response has no `conversion_result`.
    pub async fn pair(
        &self,
        from: impl Into<CurrencyCode>,
        to: impl Into<CurrencyCode>,
    ) -> Result<PairResponse, ExchangeRateRequestError> {
        self.send(&PairRequest::new(from, to, None)).await
    }
}

impl fmt::Debug for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExchangeRate")
            .field("api_key", &"[REDACTED]")
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
