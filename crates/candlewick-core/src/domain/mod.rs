//! # Domain Models
//!
//! Canonical types every upstream payload is normalized into.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Candle`] | OHLCV record for one trading period |
//! | [`Point`] | `(date, value)` pair for line charts |
//! | [`NewsItem`] | Article summary from a news feed |
//! | [`SymbolMatch`] | Symbol search hit |
//! | [`Symbol`] | Upper-cased ticker |
//! | [`Interval`] | Daily, weekly or monthly sampling |
//! | [`Range`] | Requested span (1mo .. 5y) |
//! | [`DateStyle`] | Rendering of period timestamps |
//!
//! All of these are built fresh per request and never persisted.

mod interval;
mod models;
mod range;
mod symbol;
mod timestamp;

pub use interval::Interval;
pub use models::{Candle, NewsItem, Point, SymbolMatch};
pub use range::Range;
pub use symbol::{Symbol, DEFAULT_SYMBOL};
pub use timestamp::{parse_calendar_date, DateStyle};
