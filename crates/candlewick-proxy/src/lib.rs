//! HTTP front ends for the candlewick dashboard.
//!
//! | Router | Default port | Routes |
//! |--------|--------------|--------|
//! | [`chart_router`] | 5000 | `GET /api/yahoo-finance`, `GET /health` |
//! | [`relay_router`] | 3000 | `ANY /proxy/*`, `GET /health` |
//!
//! Both are stateless apart from the shared [`AppState`].

pub mod error;
pub mod routes;
pub mod state;

pub use error::ProxyError;
pub use routes::{chart_router, relay_router};
pub use state::AppState;
