use std::error::Error as _;

use strum::{AsRefStr, Display};
use thiserror::Error;

/// Broad classification of a failed pair request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The upstream could not be reached, or the call timed out.
    Network,
    /// The upstream answered with a non-200 status or an unreadable body.
    UpstreamHttp,
    /// The upstream answered with a well-formed failure payload.
    UpstreamApi,
}

/// Errors that can occur when making requests to the ExchangeRate API
#[derive(Debug, Error)]
pub enum ExchangeRateRequestError {
    /// Transport failure: DNS, connection refused, TLS or timeout.
    #[error("Network error: {}", describe_chain(.0))]
    Network(#[source] reqwest::Error),

    /// Any status other than 200.
    #[error("ExchangeRate API returned status {status}{}", detail_suffix(.detail))]
    HttpStatus { status: u16, detail: Option<String> },

    /// A 200 response whose body is not a usable payload.
    #[error("ExchangeRate API returned a malformed response: {0}")]
    MalformedResponse(String),

    /// The payload reported `result != "success"`.
    #[error("ExchangeRate API error: {0}")]
    Api(String),
}

impl ExchangeRateRequestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::HttpStatus { .. } | Self::MalformedResponse(_) => ErrorKind::UpstreamHttp,
            Self::Api(_) => ErrorKind::UpstreamApi,
        }
    }

    /// True when the transport error was the request timeout elapsing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network(error) if error.is_timeout())
    }

    /// Wraps a transport error, dropping the request URL since it embeds the credential.
    pub(crate) fn network(error: reqwest::Error) -> Self {
        Self::Network(error.without_url())
    }
}

/// Renders an error together with its sources, e.g. `error sending request: connection refused`.
fn describe_chain(error: &reqwest::Error) -> String {
    let mut description = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(" ({detail})"))
        .unwrap_or_default()
}
