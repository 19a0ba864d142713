//! Latest-request-wins bookkeeping for a single dashboard component.
//!
//! Each fetch takes a [`FetchTicket`] from [`FetchSession::begin`]. Completing
//! with a ticket older than the newest one is a no-op, so a slow response for
//! `AAPL` can never overwrite a faster one for `MSFT` issued after it.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::data_source::{SourceError, SourceErrorKind};

/// What a component should show.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> FetchState<T> {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Error rendered to the user. Malformed payload details stay in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: SourceErrorKind,
    message: String,
}

impl FetchError {
    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FetchError {}

impl From<SourceError> for FetchError {
    fn from(error: SourceError) -> Self {
        let message = match error.kind() {
            SourceErrorKind::MalformedPayload => String::from("Invalid data format from provider"),
            SourceErrorKind::InvalidRequest | SourceErrorKind::Upstream => {
                error.message().to_owned()
            }
        };
        Self {
            kind: error.kind(),
            message,
        }
    }
}

/// Proof that a fetch was started; hand it back to [`FetchSession::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub const fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

#[derive(Debug)]
struct Inner<T> {
    generation: u64,
    state: FetchState<T>,
}

#[derive(Debug)]
pub struct FetchSession<T> {
    inner: Mutex<Inner<T>>,
}

impl<T> Default for FetchSession<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchSession<T> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                generation: 0,
                state: FetchState::Idle,
            }),
        }
    }

    /// Start a fetch. Any ticket issued earlier becomes stale.
    pub fn begin(&self) -> FetchTicket {
        let mut inner = self.lock();
        inner.generation += 1;
        inner.state = FetchState::Loading;
        FetchTicket {
            generation: inner.generation,
        }
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.lock().generation == ticket.generation
    }

    pub fn complete(&self, ticket: FetchTicket, result: Result<T, SourceError>) -> Completion {
        let mut inner = self.lock();
        if inner.generation != ticket.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = inner.generation,
                "dropping stale fetch result"
            );
            return Completion::Stale;
        }

        inner.state = match result {
            Ok(value) => FetchState::Ready(value),
            Err(error) => FetchState::Failed(FetchError::from(error)),
        };
        Completion::Applied
    }

    pub fn latest(&self) -> FetchState<T>
    where
        T: Clone,
    {
        self.lock().state.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle_until_begun() {
        let session = FetchSession::<u32>::new();
        assert_eq!(session.latest(), FetchState::Idle);

        let _ticket = session.begin();
        assert!(session.latest().is_loading());
    }

    #[test]
    fn older_ticket_cannot_overwrite_newer_result() {
        let session = FetchSession::new();
        let first = session.begin();
        let second = session.begin();

        assert_eq!(session.complete(second, Ok("MSFT")), Completion::Applied);
        assert_eq!(session.complete(first, Ok("AAPL")), Completion::Stale);
        assert_eq!(session.latest(), FetchState::Ready("MSFT"));
        assert!(!session.is_current(first));
    }

    #[test]
    fn malformed_payload_renders_generic_message() {
        let session = FetchSession::<Vec<u8>>::new();
        let ticket = session.begin();
        session.complete(
            ticket,
            Err(SourceError::malformed("column 'close' has 1 values for 2 timestamps")),
        );

        match session.latest() {
            FetchState::Failed(error) => {
                assert_eq!(error.kind(), SourceErrorKind::MalformedPayload);
                assert_eq!(error.message(), "Invalid data format from provider");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn upstream_failure_keeps_its_message() {
        let error = FetchError::from(SourceError::upstream("Yahoo Finance API error: Not Found"));
        assert_eq!(error.to_string(), "Yahoo Finance API error: Not Found");
    }
}
