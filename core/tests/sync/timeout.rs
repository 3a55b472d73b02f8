// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! The global deadline of a sync run.

use std::time::Duration;

use hostsync_core::{PropertyStatus, SyncScope};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{ics_calendar, ics_event, memory_store, mount_feed, seed_property, test_syncer};

#[tokio::test]
async fn timeout_reports_partial_success() {
    // Arrange
    let server = MockServer::start().await;
    let fast_a = mount_feed(
        &server,
        "/a.ics",
        &ics_calendar(&[ics_event("a1", None, "20260205", "20260210")]),
    )
    .await;
    let fast_b = mount_feed(
        &server,
        "/b.ics",
        &ics_calendar(&[ics_event("b1", None, "20260205", "20260210")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow.ics"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(ics_calendar(&[ics_event("s1", None, "20260205", "20260210")]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let slow = format!("{}/slow.ics", server.uri());

    let store = memory_store().await;
    seed_property(store.as_ref(), "u1", "Alpha", Some(&fast_a)).await;
    seed_property(store.as_ref(), "u1", "Slow", Some(&slow)).await;
    seed_property(store.as_ref(), "u1", "Bravo", Some(&fast_b)).await;

    // Act
    let summary = test_syncer(store.clone())
        .with_timeout(Duration::from_millis(750))
        .sync(&SyncScope::All)
        .await
        .unwrap();

    // Assert
    assert!(summary.success);
    assert!(summary.timed_out);
    assert_eq!(summary.synced(), 2);
    assert_eq!(summary.count(PropertyStatus::TimedOut), 1);
    assert_eq!(summary.results[1].title, "Slow");
    assert_eq!(summary.results[1].status, PropertyStatus::TimedOut);
    assert_eq!(summary.created_bookings, 2);
    assert_eq!(
        summary.message,
        "Synced 2 of 3. (Alpha, Bravo) Timed out: Slow. Partial synchronization. 2 new bookings."
    );
}

#[tokio::test]
async fn timeout_not_reached_when_all_finish() {
    // Arrange
    let server = MockServer::start().await;
    let url = mount_feed(
        &server,
        "/a.ics",
        &ics_calendar(&[ics_event("a1", None, "20260205", "20260210")]),
    )
    .await;
    let store = memory_store().await;
    seed_property(store.as_ref(), "u1", "Alpha", Some(&url)).await;

    // Act
    let summary = test_syncer(store.clone())
        .with_timeout(Duration::from_secs(5))
        .sync(&SyncScope::All)
        .await
        .unwrap();

    // Assert
    assert!(!summary.timed_out);
    assert_eq!(summary.message, "Synced 1 of 1. (Alpha) 1 new bookings.");
}
