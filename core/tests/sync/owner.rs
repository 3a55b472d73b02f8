// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Owner scoped runs and their cleaning requests.

use hostsync_core::{AlertKind, ServiceStatus, ServiceType, Store, SyncScope};
use jiff::civil::date;
use wiremock::MockServer;

use crate::common::{ics_calendar, ics_event, memory_store, mount_feed, seed_property, test_syncer};

#[tokio::test]
async fn owner_sync_schedules_checkout_cleaning() {
    // Arrange
    let server = MockServer::start().await;
    let feed = ics_calendar(&[ics_event("stay-1", Some("Reserved"), "20260205", "20260210")]);
    let url = mount_feed(&server, "/casa.ics", &feed).await;
    let store = memory_store().await;
    let property = seed_property(store.as_ref(), "owner-1", "Casa", Some(&url)).await;

    // Act
    let summary = test_syncer(store.clone())
        .sync(&SyncScope::Owner("owner-1".into()))
        .await
        .unwrap();

    // Assert
    assert_eq!(summary.created_bookings, 1);

    let bookings = store.list_bookings(&property.id).await.unwrap();
    assert_eq!(bookings[0].start_date, date(2026, 2, 5));
    assert_eq!(bookings[0].end_date, date(2026, 2, 10));

    let alerts = store.list_alerts(&property.id).await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::Info);
    assert_eq!(alerts[0].title, "New synced booking");

    let requests = store.list_service_requests(&property.id).await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].service_type, ServiceType::Cleaning);
    assert_eq!(requests[0].status, ServiceStatus::Pending);
    assert_eq!(requests[0].booking_id, bookings[0].id);
    assert_eq!(
        requests[0].requested_date,
        "2026-02-10T11:00:00-05:00[America/Bogota]"
    );
    assert_eq!(
        requests[0].notes,
        "Automatic checkout cleaning (sync) for booking: Reserved"
    );
}

#[tokio::test]
async fn owner_sync_ignores_other_owners() {
    // Arrange
    let server = MockServer::start().await;
    let feed = ics_calendar(&[ics_event("stay-1", None, "20260205", "20260210")]);
    let url = mount_feed(&server, "/shared.ics", &feed).await;
    let store = memory_store().await;
    let mine = seed_property(store.as_ref(), "owner-1", "Mine", Some(&url)).await;
    let theirs = seed_property(store.as_ref(), "owner-2", "Theirs", Some(&url)).await;

    // Act
    let summary = test_syncer(store.clone())
        .sync(&SyncScope::Owner("owner-1".into()))
        .await
        .unwrap();

    // Assert
    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.results[0].property_id, mine.id);
    assert!(store.list_bookings(&theirs.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn admin_sync_creates_no_cleaning() {
    // Arrange
    let server = MockServer::start().await;
    let feed = ics_calendar(&[ics_event("stay-1", Some("Reserved"), "20260205", "20260210")]);
    let url = mount_feed(&server, "/casa.ics", &feed).await;
    let store = memory_store().await;
    let property = seed_property(store.as_ref(), "owner-1", "Casa", Some(&url)).await;

    // Act
    test_syncer(store.clone())
        .sync(&SyncScope::All)
        .await
        .unwrap();

    // Assert
    let alerts = store.list_alerts(&property.id).await.unwrap();
    assert_eq!(alerts[0].kind, AlertKind::PendingService);
    assert_eq!(
        alerts[0].message,
        "New booking (iCal): Reserved (2026-02-05 - 2026-02-10)"
    );
    assert!(store.list_service_requests(&property.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn sync_without_feeds_reports_nothing_to_do() {
    // Arrange
    let store = memory_store().await;
    seed_property(store.as_ref(), "owner-1", "No feed", None).await;
    seed_property(store.as_ref(), "owner-1", "Blank feed", Some("   ")).await;
    seed_property(store.as_ref(), "owner-1", "Tabbed", Some("\t")).await;
    seed_property(store.as_ref(), "owner-1", "Line break", Some("\r\n")).await;

    // Act
    let summary = test_syncer(store.clone())
        .sync(&SyncScope::All)
        .await
        .unwrap();

    // Assert
    assert!(summary.success);
    assert!(summary.results.is_empty());
    assert_eq!(summary.message, "No properties with a calendar feed configured.");
}
