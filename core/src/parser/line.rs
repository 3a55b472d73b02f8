// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Forgiving line-by-line event scanner.
//!
//! Only exact upper-case `BEGIN:VEVENT` / `END:VEVENT` markers open and close
//! an event; everything outside an event is ignored.

use hostsync_ical::keyword::{KW_DTEND, KW_DTSTART, KW_SUMMARY, KW_UID};
use jiff::Timestamp;

use crate::parser::{CalendarEvent, ParseError, parse_date_value};

const BEGIN_VEVENT: &str = "BEGIN:VEVENT";
const END_VEVENT: &str = "END:VEVENT";

pub(super) fn parse_events(text: &str) -> Result<Vec<CalendarEvent>, ParseError> {
    let unfolded = unfold(text);
    let mut events = Vec::new();
    let mut current: Option<PartialEvent> = None;

    for line in unfolded.split(['\r', '\n']) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == BEGIN_VEVENT {
            if current.is_some() {
                tracing::debug!("nested event start, discarding the open event");
            }
            current = Some(PartialEvent::default());
        } else if line == END_VEVENT {
            if let Some(partial) = current.take() {
                match partial.finish() {
                    Some(event) => events.push(event),
                    None => tracing::debug!("dropping incomplete event"),
                }
            }
        } else if let Some(partial) = current.as_mut() {
            partial.apply(line);
        }
    }

    Ok(events)
}

#[derive(Debug, Default)]
struct PartialEvent {
    uid: Option<String>,
    summary: Option<String>,
    start: Option<Timestamp>,
    end: Option<Timestamp>,
}

impl PartialEvent {
    fn apply(&mut self, line: &str) {
        if has_name(line, KW_UID) {
            self.uid = Some(value_of(line).to_string());
        } else if has_name(line, KW_SUMMARY) {
            self.summary = Some(value_of(line).to_string());
        } else if line.starts_with(KW_DTSTART) {
            if let Some(ts) = parse_date_value(value_of(line)) {
                self.start = Some(ts);
            }
        } else if line.starts_with(KW_DTEND) {
            if let Some(ts) = parse_date_value(value_of(line)) {
                self.end = Some(ts);
            }
        }
    }

    fn finish(self) -> Option<CalendarEvent> {
        let external_id = self.uid.filter(|uid| !uid.is_empty())?;
        Some(CalendarEvent {
            external_id,
            summary: self.summary,
            start: self.start?,
            end: self.end?,
        })
    }
}

/// Whether the line is the named property, with or without parameters.
fn has_name(line: &str, name: &str) -> bool {
    line.strip_prefix(name)
        .is_some_and(|rest| rest.starts_with([':', ';']))
}

/// Text after the first colon, trimmed.
fn value_of(line: &str) -> &str {
    line.split_once(':').map_or("", |(_, value)| value.trim())
}

/// Joins folded lines: a line break followed by a space or tab continues the
/// previous line.
fn unfold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\r' && c != '\n' {
            out.push(c);
            continue;
        }

        let crlf = c == '\r' && chars.peek() == Some(&'\n');
        if crlf {
            chars.next();
        }
        if matches!(chars.peek(), Some(' ' | '\t')) {
            chars.next();
        } else if crlf {
            out.push_str("\r\n");
        } else {
            out.push(c);
        }
    }
    out
}
