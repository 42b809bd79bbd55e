use bon::Builder;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// ISO 4217 style currency code, uppercased on construction.
///
/// Nothing beyond case is checked; unknown codes are rejected by the upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CurrencyCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for CurrencyCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&String> for CurrencyCode {
    fn from(code: &String) -> Self {
        Self::new(code)
    }
}

/// A pair conversion query.
///
/// Without an amount the upstream answers with the rate only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
pub struct PairRequest {
    #[builder(into)]
    pub from: CurrencyCode,
    #[builder(into)]
    pub to: CurrencyCode,
    pub amount: Option<f64>,
}

impl PairRequest {
    pub fn new(from: impl Into<CurrencyCode>, to: impl Into<CurrencyCode>, amount: Option<f64>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    /// Path below the base URL: `<credential>/pair/<FROM>/<TO>[/<amount>]`.
    pub(crate) fn path(&self, api_key: &str) -> String {
        match self.amount {
            Some(amount) => format!("{api_key}/pair/{}/{}/{amount}", self.from, self.to),
            None => format!("{api_key}/pair/{}/{}", self.from, self.to),
        }
    }
}
