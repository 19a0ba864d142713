//! Chart source contract and request/error types.
//!
//! Every upstream provider implements [`ChartSource`] and returns its own
//! [`RawChartPayload`] variant; [`crate::normalize`] turns any variant into
//! candles or points. Adding a provider means adding an adapter, a
//! [`ProviderId`] and a payload variant, with no shape sniffing at the call site.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::normalize::RawChartPayload;
use crate::{Interval, ProviderId, Range, Symbol, ValidationError};

/// Source-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// A request parameter was missing or invalid; no upstream call was made.
    InvalidRequest,
    /// Transport failure or non-success status from the provider.
    Upstream,
    /// The provider answered, but not in the expected shape.
    MalformedPayload,
}

/// Structured error returned by adapters and normalizers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
}

impl SourceError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Upstream,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::MalformedPayload,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Upstream => "source.upstream",
            SourceErrorKind::MalformedPayload => "source.malformed_payload",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

impl From<ValidationError> for SourceError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

/// Parameters of a price-history request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub symbol: Symbol,
    pub interval: Interval,
    pub range: Range,
}

impl ChartRequest {
    pub fn new(symbol: Symbol, interval: Interval, range: Range) -> Self {
        Self {
            symbol,
            interval,
            range,
        }
    }

    /// Build a request from optional raw query values, applying defaults for
    /// interval and range. The symbol is required.
    pub fn from_params(
        symbol: Option<&str>,
        interval: Option<&str>,
        range: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let symbol = Symbol::parse(symbol.unwrap_or_default())?;
        let interval = match interval.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => value.parse::<Interval>()?,
            None => Interval::default(),
        };
        let range = match range.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => value.parse::<Range>()?,
            None => Range::default(),
        };
        Ok(Self::new(symbol, interval, range))
    }
}

/// Upstream chart provider contract.
pub trait ChartSource: Send + Sync {
    /// Returns the provider identifier, which also names the payload variant.
    fn id(&self) -> ProviderId;

    /// Fetches the raw provider payload for `req`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if:
    /// - The HTTP status is not successful or the transport fails (`Upstream`)
    /// - The body is missing the expected nested structure (`MalformedPayload`)
    fn chart<'a>(
        &'a self,
        req: &'a ChartRequest,
    ) -> Pin<Box<dyn Future<Output = Result<RawChartPayload, SourceError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_params_applies_defaults() {
        let request = ChartRequest::from_params(Some("tsla"), None, Some("")).expect("valid");
        assert_eq!(request.symbol.as_str(), "TSLA");
        assert_eq!(request.interval, Interval::Daily);
        assert_eq!(request.range, Range::OneYear);
    }

    #[test]
    fn from_params_requires_symbol() {
        let err = ChartRequest::from_params(None, Some("1d"), Some("1y")).expect_err("must fail");
        assert_eq!(err, ValidationError::EmptySymbol);
    }

    #[test]
    fn validation_errors_become_invalid_requests() {
        let error = SourceError::from(ValidationError::EmptySymbol);
        assert_eq!(error.kind(), SourceErrorKind::InvalidRequest);
        assert_eq!(error.code(), "source.invalid_request");
        assert_eq!(error.message(), "Stock symbol is required");
    }
}
