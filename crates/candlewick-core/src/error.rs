use thiserror::Error;

/// Validation errors raised before any upstream call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Stock symbol is required")]
    EmptySymbol,

    #[error("invalid interval '{value}', expected one of 1d, 1wk, 1mo")]
    InvalidInterval { value: String },
    #[error("invalid range '{value}', expected one of 1mo, 3mo, 6mo, 1y, 5y")]
    InvalidRange { value: String },
    #[error("invalid provider '{value}', expected one of yahoo, alphavantage")]
    InvalidProvider { value: String },
    #[error("invalid date style '{value}', expected one of iso, calendar")]
    InvalidDateStyle { value: String },
}
