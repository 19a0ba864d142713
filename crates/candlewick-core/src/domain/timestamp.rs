use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

const ISO_MILLIS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");
const CALENDAR: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// How a period-start timestamp is rendered into a record's `date` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    /// `2023-11-14T22:13:20.000Z`, as browsers print `Date.toISOString()`.
    #[default]
    Iso,
    /// `2023-11-14`, for axis labels on line charts.
    Calendar,
}

impl DateStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Iso => "iso",
            Self::Calendar => "calendar",
        }
    }

    /// Render seconds since the Unix epoch (UTC).
    pub fn format_unix(self, seconds: i64) -> Result<String, time::error::Error> {
        let value = OffsetDateTime::from_unix_timestamp(seconds)?;
        self.format_datetime(value)
    }

    /// Render a calendar date at UTC midnight.
    pub fn format_date(self, date: Date) -> Result<String, time::error::Error> {
        self.format_datetime(date.midnight().assume_utc())
    }

    fn format_datetime(self, value: OffsetDateTime) -> Result<String, time::error::Error> {
        let rendered = match self {
            Self::Iso => value.format(ISO_MILLIS)?,
            Self::Calendar => value.format(CALENDAR)?,
        };
        Ok(rendered)
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateStyle {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "iso" => Ok(Self::Iso),
            "calendar" | "date" => Ok(Self::Calendar),
            other => Err(ValidationError::InvalidDateStyle {
                value: other.to_owned(),
            }),
        }
    }
}

/// Parse the leading `YYYY-MM-DD` of a provider date key.
///
/// Intraday keys such as `2024-01-05 16:00:00` keep only their calendar day.
pub fn parse_calendar_date(input: &str) -> Result<Date, time::error::Parse> {
    let day = input.trim().get(..10).unwrap_or(input);
    Date::parse(day, CALENDAR)
}
