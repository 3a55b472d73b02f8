// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Event extraction on top of the full iCalendar grammar.

use hostsync_ical::keyword::{KW_DTEND, KW_DTSTART, KW_SUMMARY, KW_UID, KW_VEVENT};
use hostsync_ical::{Component, unescape_text};

use crate::parser::{CalendarEvent, ParseError, parse_date_value};

pub(super) fn parse_events(text: &str) -> Result<Vec<CalendarEvent>, ParseError> {
    let roots = hostsync_ical::parse(text).map_err(ParseError::Grammar)?;
    let events = roots
        .iter()
        .flat_map(|root| root.find_all(KW_VEVENT))
        .filter_map(to_event)
        .collect();
    Ok(events)
}

fn to_event(component: &Component<'_>) -> Option<CalendarEvent> {
    let external_id = component
        .property(KW_UID)
        .map(|p| p.value.trim())
        .filter(|uid| !uid.is_empty())?;
    let start = component
        .property(KW_DTSTART)
        .and_then(|p| parse_date_value(&p.value))?;
    let end = component
        .property(KW_DTEND)
        .and_then(|p| parse_date_value(&p.value))?;
    let summary = component
        .property(KW_SUMMARY)
        .map(|p| unescape_text(p.value.trim()).into_owned());

    Some(CalendarEvent {
        external_id: external_id.to_string(),
        summary,
        start,
        end,
    })
}
