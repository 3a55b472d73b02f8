// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Failures that stay contained to one event or one property.

use std::sync::Arc;

use hostsync_core::{PropertyStatus, Store, SyncError, SyncScope};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{
    FaultyStore, ics_calendar, ics_event, memory_store, mount_feed, seed_property, test_syncer,
};

#[tokio::test]
async fn resilience_event_without_end_is_dropped() {
    // Arrange
    let server = MockServer::start().await;
    let broken = "BEGIN:VEVENT\r\nUID:no-end\r\nDTSTART;VALUE=DATE:20260301\r\nEND:VEVENT\r\n";
    let feed = ics_calendar(&[
        ics_event("good", Some("Reserved"), "20260205", "20260210"),
        broken.to_string(),
    ]);
    let url = mount_feed(&server, "/cal.ics", &feed).await;
    let store = memory_store().await;
    let property = seed_property(store.as_ref(), "u1", "Loft", Some(&url)).await;

    // Act
    let summary = test_syncer(store.clone())
        .sync(&SyncScope::All)
        .await
        .unwrap();

    // Assert
    assert_eq!(summary.results[0].status, PropertyStatus::Synced);
    let bookings = store.list_bookings(&property.id).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].external_id, "good");
}

#[tokio::test]
async fn resilience_lowercase_feed_uses_fallback_parser() {
    // Arrange
    let server = MockServer::start().await;
    let feed = "begin:vcalendar\nversion:2.0\nbegin:vevent\nuid:lower-1\nsummary:Guest\ndtstart;value=date:20260601\ndtend;value=date:20260607\nend:vevent\nend:vcalendar\n";
    let url = mount_feed(&server, "/lower.ics", feed).await;
    let store = memory_store().await;
    let property = seed_property(store.as_ref(), "u1", "Lower", Some(&url)).await;

    // Act
    let summary = test_syncer(store.clone())
        .sync(&SyncScope::All)
        .await
        .unwrap();

    // Assert
    assert_eq!(summary.created_bookings, 1);
    let bookings = store.list_bookings(&property.id).await.unwrap();
    assert_eq!(bookings[0].external_id, "lower-1");
    assert_eq!(bookings[0].guest_label, "Guest");
}

#[tokio::test]
async fn resilience_failed_fetch_does_not_stop_other_properties() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.ics"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let missing = format!("{}/missing.ics", server.uri());
    let feed = ics_calendar(&[ics_event("ok-1", None, "20260205", "20260210")]);
    let good = mount_feed(&server, "/good.ics", &feed).await;

    let store = memory_store().await;
    seed_property(store.as_ref(), "u1", "Broken", Some(&missing)).await;
    let healthy = seed_property(store.as_ref(), "u1", "Healthy", Some(&good)).await;

    // Act
    let summary = test_syncer(store.clone())
        .sync(&SyncScope::All)
        .await
        .unwrap();

    // Assert
    assert!(summary.success);
    assert_eq!(summary.results[0].status, PropertyStatus::Failed);
    assert_eq!(
        summary.results[0].error.as_deref(),
        Some("calendar feed not found (404)")
    );
    assert_eq!(summary.results[1].status, PropertyStatus::Synced);
    assert_eq!(store.list_bookings(&healthy.id).await.unwrap().len(), 1);
    assert_eq!(
        summary.message,
        "Synced 1 of 2. (Healthy) Failed: Broken (calendar feed not found (404)). 1 new bookings."
    );
}

#[tokio::test]
async fn resilience_html_page_is_not_a_calendar() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<!DOCTYPE html><html><body>Please sign in</body></html>"),
        )
        .mount(&server)
        .await;
    let store = memory_store().await;
    let url = format!("{}/login", server.uri());
    seed_property(store.as_ref(), "u1", "Login wall", Some(&url)).await;

    // Act
    let summary = test_syncer(store.clone())
        .sync(&SyncScope::All)
        .await
        .unwrap();

    // Assert
    assert_eq!(summary.results[0].status, PropertyStatus::Failed);
    assert_eq!(
        summary.results[0].error.as_deref(),
        Some("the URL returned a web page instead of a calendar")
    );
}

#[tokio::test]
async fn resilience_server_error_is_retried() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky.ics"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    let feed = ics_calendar(&[ics_event("r1", None, "20260205", "20260210")]);
    let url = mount_feed(&server, "/flaky.ics", &feed).await;
    let store = memory_store().await;
    seed_property(store.as_ref(), "u1", "Flaky", Some(&url)).await;

    // Act
    let summary = test_syncer(store.clone())
        .sync(&SyncScope::All)
        .await
        .unwrap();

    // Assert
    assert_eq!(summary.results[0].status, PropertyStatus::Synced);
    assert_eq!(summary.created_bookings, 1);
}

#[tokio::test]
async fn resilience_store_failure_on_one_event() {
    // Arrange
    let server = MockServer::start().await;
    let feed = ics_calendar(&[
        ics_event("bad", None, "20260205", "20260210"),
        ics_event("fine", None, "20260215", "20260220"),
    ]);
    let url = mount_feed(&server, "/cal.ics", &feed).await;
    let mut store = FaultyStore::new().await;
    store.fail_booking_for = Some("bad".to_string());
    let store = Arc::new(store);
    let property = seed_property(store.as_ref(), "u1", "Partial", Some(&url)).await;

    // Act
    let summary = test_syncer(store.clone())
        .sync(&SyncScope::All)
        .await
        .unwrap();

    // Assert
    let result = &summary.results[0];
    assert_eq!(result.status, PropertyStatus::Failed);
    assert_eq!(result.created, 1);
    assert!(result.error.as_deref().unwrap().contains("disk full"));
    let bookings = store.list_bookings(&property.id).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].external_id, "fine");
}

#[tokio::test]
async fn resilience_listing_failure_is_a_hard_error() {
    // Arrange
    let mut store = FaultyStore::new().await;
    store.fail_listing = true;

    // Act
    let err = test_syncer(Arc::new(store))
        .sync(&SyncScope::All)
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(err, SyncError::Store(_)));
}
