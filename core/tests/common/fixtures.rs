// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.
//!
//! This module provides helper functions to create configurations, seeded
//! stores and iCalendar feed bodies served by a mock HTTP server.

use std::sync::Arc;
use std::time::Duration;

use hostsync_core::{Config, LocalDb, NewProperty, Property, Store, Syncer};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with a fixed time zone and fast retries.
#[must_use]
pub fn test_config() -> Config {
    Config {
        state_dir: None,
        sync_timeout_secs: 5,
        fetch_timeout_secs: 5,
        fetch_retries: 1,
        retry_backoff_ms: 10,
        user_agent: "hostsync-tests".to_string(),
        cleaning_hour: 11,
        timezone: Some("America/Bogota".to_string()),
    }
}

/// Opens an empty in-memory store.
pub async fn memory_store() -> Arc<LocalDb> {
    Arc::new(LocalDb::open(None).await.expect("in-memory database"))
}

/// Builds a syncer over the store with the test configuration.
pub fn test_syncer(store: Arc<dyn Store>) -> Syncer {
    Syncer::new(store, &test_config())
        .expect("syncer")
        .with_retries(1, Duration::from_millis(10))
}

/// Inserts a property and returns it.
pub async fn seed_property(
    store: &dyn Store,
    owner_id: &str,
    title: &str,
    feed_url: Option<&str>,
) -> Property {
    store
        .insert_property(NewProperty {
            owner_id: owner_id.to_string(),
            title: title.to_string(),
            feed_url: feed_url.map(ToString::to_string),
        })
        .await
        .expect("insert property")
}

/// Serves a calendar body at `route` and returns its full URL.
pub async fn mount_feed(server: &MockServer, route: &str, body: &str) -> String {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/calendar; charset=utf-8")
                .set_body_string(body),
        )
        .mount(server)
        .await;
    format!("{}{route}", server.uri())
}

/// A `VEVENT` block with date-only start and end.
#[must_use]
pub fn ics_event(uid: &str, summary: Option<&str>, start: &str, end: &str) -> String {
    let mut block = format!("BEGIN:VEVENT\r\nDTSTAMP:20260101T000000Z\r\nUID:{uid}\r\n");
    if let Some(summary) = summary {
        block += &format!("SUMMARY:{summary}\r\n");
    }
    block += &format!("DTSTART;VALUE=DATE:{start}\r\nDTEND;VALUE=DATE:{end}\r\nEND:VEVENT\r\n");
    block
}

/// Wraps event blocks into a calendar.
#[must_use]
pub fn ics_calendar(events: &[String]) -> String {
    let mut body = String::from(
        "BEGIN:VCALENDAR\r\nPRODID:-//Hostsync//Tests//EN\r\nCALSCALE:GREGORIAN\r\nVERSION:2.0\r\n",
    );
    for event in events {
        body += event;
    }
    body += "END:VCALENDAR\r\n";
    body
}
