use std::time::Duration;

use reqwest::StatusCode;

use crate::{
    ExchangeRateRequestError, PairRequest, PairResponse,
    response::{failure_code, parse_pair_response},
};

/// Issues pair requests and classifies every outcome into [`ExchangeRateRequestError`].
pub(crate) struct ExchangeRateRequestHelper<'a> {
    client: &'a reqwest::Client,
    base_url: &'a str,
    api_key: &'a str,
    timeout: Duration,
}

impl<'a> ExchangeRateRequestHelper<'a> {
    pub(crate) fn new(
        client: &'a reqwest::Client,
        base_url: &'a str,
        api_key: &'a str,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            timeout,
        }
    }

    pub(crate) async fn send_pair_request(
        &self,
        request: &PairRequest,
    ) -> Result<PairResponse, ExchangeRateRequestError> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            request.path(self.api_key)
        );
        log::debug!(
            "GET pair {}/{} (amount: {:?})",
            request.from,
            request.to,
            request.amount
        );

        // The response owns the connection; it is dropped on every return path below.
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(ExchangeRateRequestError::network)?;

        let status = response.status();
        if status != StatusCode::OK {
            // The body only adds detail; failing to read it does not change the classification.
            let detail = response
                .bytes()
                .await
                .ok()
                .and_then(|bytes| failure_code(&bytes));
            return Err(ExchangeRateRequestError::HttpStatus {
                status: status.as_u16(),
                detail,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(ExchangeRateRequestError::network)?;

        let pair = parse_pair_response(&bytes)?;
        if request.amount.is_some() {
            pair.conversion_result()?;
        }
        Ok(pair)
    }
}
