// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Extraction of booking events from iCalendar feeds.
//!
//! Feeds are run through a chain of parsers. The first one is a forgiving
//! line scanner that copes with most real-world exports; when it finds
//! nothing or fails, the grammar based parser from `hostsync-ical` gets a
//! chance. Only the failure of the last parser is reported.

mod grammar;
mod line;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use jiff::Timestamp;
use jiff::civil::{Date, DateTime};
use jiff::tz::TimeZone;
use serde::Serialize;

/// Guest label used when an event has no usable summary.
pub const PLACEHOLDER_GUEST: &str = "External booking";

/// A booking-like event extracted from a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    /// The event UID, stable across fetches of the same feed.
    pub external_id: String,

    /// The event summary, usually a guest name or "Reserved".
    pub summary: Option<String>,

    /// Start instant, interpreted as UTC.
    pub start: Timestamp,

    /// End instant, interpreted as UTC.
    pub end: Timestamp,
}

impl CalendarEvent {
    /// The summary, or a placeholder when it is missing or blank.
    pub fn guest_label(&self) -> &str {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(PLACEHOLDER_GUEST)
    }

    /// UTC calendar date of the start.
    pub fn start_date(&self) -> Date {
        self.start.to_zoned(TimeZone::UTC).date()
    }

    /// UTC calendar date of the end.
    pub fn end_date(&self) -> Date {
        self.end.to_zoned(TimeZone::UTC).date()
    }
}

/// Errors raised when no parser could read a feed.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The feed does not follow the iCalendar grammar.
    #[error("invalid calendar data: {}", summarize(.0))]
    Grammar(Vec<hostsync_ical::ParseError>),

    /// A parser panicked on the input.
    #[error("{strategy} parser crashed: {message}")]
    Panicked {
        /// Name of the parser.
        strategy: &'static str,
        /// The panic payload, when it is a string.
        message: String,
    },
}

type Strategy = fn(&str) -> Result<Vec<CalendarEvent>, ParseError>;

const STRATEGIES: [(&str, Strategy); 2] = [
    ("line", line::parse_events),
    ("grammar", grammar::parse_events),
];

/// Extracts every complete event from a feed.
///
/// An event is complete when it has a UID and both a start and an end that
/// could be read. Incomplete events are dropped silently.
///
/// # Errors
///
/// Returns the error of the last parser in the chain when every parser came
/// up empty and the last one failed.
pub fn parse_events(text: &str) -> Result<Vec<CalendarEvent>, ParseError> {
    let mut last_err = None;
    for (strategy, parse) in STRATEGIES {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| parse(text))).unwrap_or_else(
            |payload| {
                Err(ParseError::Panicked {
                    strategy,
                    message: panic_message(payload.as_ref()),
                })
            },
        );

        match outcome {
            Ok(events) if !events.is_empty() => {
                tracing::debug!(strategy, count = events.len(), "parsed calendar events");
                return Ok(events);
            }
            Ok(_) => {
                tracing::debug!(strategy, "no events found");
                last_err = None;
            }
            Err(err) => {
                tracing::warn!(strategy, %err, "calendar parser failed");
                last_err = Some(err);
            }
        }
    }

    match last_err {
        Some(err) => Err(err),
        None => Ok(Vec::new()),
    }
}

/// Reads a `DTSTART`/`DTEND` value as a UTC instant.
///
/// Accepts `YYYYMMDD` and `YYYYMMDDTHHMMSS`, with an optional `Z`. Values
/// naming an impossible date or time are rejected.
fn parse_date_value(value: &str) -> Option<Timestamp> {
    let clean = value.trim().replacen('Z', "", 1);

    if clean.len() == 8 {
        let date = parse_date(&clean)?;
        return date.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp());
    }

    let (date_part, time_part) = clean.split_once('T')?;
    if date_part.len() != 8 || time_part.len() < 6 {
        return None;
    }
    let date = parse_date(date_part)?;
    let hour = number(time_part, 0..2)?;
    let minute = number(time_part, 2..4)?;
    let second = number(time_part, 4..6)?;
    let datetime = DateTime::new(
        date.year(),
        date.month(),
        date.day(),
        hour,
        minute,
        second,
        0,
    )
    .ok()?;
    datetime.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp())
}

fn parse_date(s: &str) -> Option<Date> {
    let year = number(s, 0..4)?;
    let month = number(s, 4..6)?;
    let day = number(s, 6..8)?;
    Date::new(year, month, day).ok()
}

fn number<T: std::str::FromStr>(s: &str, range: std::ops::Range<usize>) -> Option<T> {
    let digits = s.get(range)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn summarize(errors: &[hostsync_ical::ParseError]) -> String {
    match errors {
        [] => "unknown error".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}
