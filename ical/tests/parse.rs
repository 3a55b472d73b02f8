// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the iCalendar grammar parser
//!
//! These tests run the full pipeline on feeds shaped like the ones booking
//! platforms publish.

use hostsync_ical::{ParseError, parse, unescape_text};

const AIRBNB_LIKE: &str = "\
BEGIN:VCALENDAR\r
PRODID;X-RICAL-TZSOURCE=TZINFO:-//Airbnb Inc//Hosting Calendar 0.8.8//EN\r
CALSCALE:GREGORIAN\r
VERSION:2.0\r
BEGIN:VEVENT\r
DTEND;VALUE=DATE:20260210\r
DTSTART;VALUE=DATE:20260205\r
UID:1418fb94e984-a1b2c3@airbnb.com\r
DESCRIPTION:Reservation URL: https://www.airbnb.com/hosting/reservations/d\r
 etails/HMABCDEFG\\nPhone Number (Last 4 Digits): 1234\r
SUMMARY:Reserved\r
END:VEVENT\r
BEGIN:VEVENT\r
DTEND;VALUE=DATE:20260301\r
DTSTART;VALUE=DATE:20260226\r
UID:1418fb94e984-d4e5f6@airbnb.com\r
SUMMARY:Airbnb (Not available)\r
END:VEVENT\r
END:VCALENDAR\r
";

#[test]
fn parse_booking_feed() {
    let roots = parse(AIRBNB_LIKE).unwrap();
    assert_eq!(roots.len(), 1);

    let calendar = &roots[0];
    assert!(calendar.is("VCALENDAR"));
    assert_eq!(
        calendar.property("prodid").map(|p| p.value.as_ref()),
        Some("-//Airbnb Inc//Hosting Calendar 0.8.8//EN")
    );

    let events = calendar.find_all("VEVENT");
    assert_eq!(events.len(), 2);

    let first = events.first().unwrap();
    assert_eq!(
        first.property("UID").map(|p| p.value.as_ref()),
        Some("1418fb94e984-a1b2c3@airbnb.com")
    );
    let dtend = first.property("DTEND").unwrap();
    assert_eq!(dtend.value, "20260210");
    let value_param = dtend.parameter("value").unwrap();
    assert_eq!(value_param.values.first().unwrap().value, "DATE");

    let description = first.property("DESCRIPTION").unwrap();
    assert_eq!(
        unescape_text(&description.value),
        "Reservation URL: https://www.airbnb.com/hosting/reservations/details/HMABCDEFG\n\
Phone Number (Last 4 Digits): 1234"
    );
}

#[test]
fn parse_lf_only_and_lowercase_input() {
    let src = "begin:vcalendar\nbegin:vevent\nuid:abc\nsummary:Guest\nend:vevent\nend:vcalendar\n";
    let roots = parse(src).unwrap();

    let events = roots.first().unwrap().find_all("VEVENT");
    assert_eq!(events.len(), 1);
    assert_eq!(
        events.first().unwrap().property("UID").map(|p| p.value.as_ref()),
        Some("abc")
    );
}

#[test]
fn parse_multiple_roots() {
    let src = "BEGIN:VEVENT\nUID:1\nEND:VEVENT\nBEGIN:VEVENT\nUID:2\nEND:VEVENT\n";
    let roots = parse(src).unwrap();
    assert_eq!(roots.len(), 2);
}

#[test]
fn parse_rejects_broken_lines() {
    let src = "BEGIN:VCALENDAR\nthis is not a content line\nEND:VCALENDAR\n";
    let errors = parse(src).unwrap_err();
    assert!(matches!(errors.as_slice(), [ParseError::ContentLine(_)]));
}

#[test]
fn parse_rejects_unclosed_components() {
    let src = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nUID:1\nEND:VCALENDAR\n";
    let errors = parse(src).unwrap_err();
    assert!(
        errors
            .iter()
            .all(|e| matches!(e, ParseError::Tree(_))),
        "{errors:?}"
    );
}

#[test]
fn parse_rejects_empty_and_html_input() {
    assert!(matches!(
        parse("").unwrap_err().as_slice(),
        [ParseError::NoComponents]
    ));
    assert!(parse("<!DOCTYPE html><html><body>Login</body></html>").is_err());
}
