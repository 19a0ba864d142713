use candlewick_core::{FetchError, SourceError, SourceErrorKind};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] candlewick_core::ValidationError),

    #[error("command error: {0}")]
    Command(String),

    /// Provider failure as shown to the user; parser detail stays in the log.
    #[error(transparent)]
    Source(FetchError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<SourceError> for CliError {
    fn from(error: SourceError) -> Self {
        if error.kind() == SourceErrorKind::MalformedPayload {
            tracing::debug!(code = error.code(), "malformed provider payload: {}", error.message());
        }
        Self::Source(FetchError::from(error))
    }
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Command(_) => 2,
            Self::Source(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_payload_prints_generic_message() {
        let error = CliError::from(SourceError::malformed(
            "failed to parse chart body: expected value at line 1 column 7",
        ));

        assert_eq!(error.to_string(), "Invalid data format from provider");
        assert!(!error.to_string().contains("column"));
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn upstream_failure_keeps_its_message() {
        let error = CliError::from(SourceError::upstream("Yahoo Finance API error: Not Found"));

        assert_eq!(error.to_string(), "Yahoo Finance API error: Not Found");
        assert_eq!(error.exit_code(), 3);
    }
}
