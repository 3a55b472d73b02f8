// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! De-duplication and idempotence of repeated runs.

use std::sync::Arc;

use hostsync_core::{PropertyStatus, Store, SyncScope};
use wiremock::MockServer;

use crate::common::{
    FaultyStore, ics_calendar, ics_event, memory_store, mount_feed, seed_property, test_syncer,
};

#[tokio::test]
async fn dedup_second_run_creates_nothing() {
    // Arrange
    let server = MockServer::start().await;
    let feed = ics_calendar(&[
        ics_event("a@airbnb.com", Some("Reserved"), "20260205", "20260210"),
        ics_event("b@airbnb.com", Some("Reserved"), "20260214", "20260216"),
    ]);
    let url = mount_feed(&server, "/beach.ics", &feed).await;
    let store = memory_store().await;
    let property = seed_property(store.as_ref(), "u1", "Beach house", Some(&url)).await;
    let syncer = test_syncer(store.clone());

    // Act
    let first = syncer.sync(&SyncScope::All).await.unwrap();
    let second = syncer.sync(&SyncScope::All).await.unwrap();

    // Assert
    assert_eq!(first.created_bookings, 2);
    assert_eq!(second.created_bookings, 0);
    assert_eq!(second.results[0].status, PropertyStatus::Synced);
    assert_eq!(second.results[0].existing, 2);
    assert_eq!(store.list_bookings(&property.id).await.unwrap().len(), 2);
    assert_eq!(store.list_alerts(&property.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn dedup_unique_violation_counts_as_existing() {
    // Arrange
    let server = MockServer::start().await;
    let feed = ics_calendar(&[ics_event(
        "race@airbnb.com",
        Some("Reserved"),
        "20260205",
        "20260210",
    )]);
    let url = mount_feed(&server, "/race.ics", &feed).await;
    let mut store = FaultyStore::new().await;
    store.blind_lookup = true;
    let store = Arc::new(store);
    let property = seed_property(store.as_ref(), "u1", "Race", Some(&url)).await;
    let syncer = test_syncer(store.clone());
    let scope = SyncScope::Owner("u1".into());

    // Act
    let first = syncer.sync(&scope).await.unwrap();
    let second = syncer.sync(&scope).await.unwrap();

    // Assert
    assert_eq!(first.created_bookings, 1);
    assert_eq!(second.created_bookings, 0);
    let result = &second.results[0];
    assert_eq!(result.status, PropertyStatus::Synced);
    assert_eq!(result.created, 0);
    assert_eq!(result.existing, 1);
    assert_eq!(result.error, None);
    assert_eq!(store.list_bookings(&property.id).await.unwrap().len(), 1);
    assert_eq!(store.list_alerts(&property.id).await.unwrap().len(), 1);
    assert_eq!(store.list_service_requests(&property.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn dedup_repeated_uid_in_feed_first_wins() {
    for (first, second) in [("Ana", "Bruno"), ("Bruno", "Ana")] {
        // Arrange
        let server = MockServer::start().await;
        let feed = ics_calendar(&[
            ics_event("same@vrbo.com", Some(first), "20260301", "20260305"),
            ics_event("same@vrbo.com", Some(second), "20260301", "20260305"),
        ]);
        let url = mount_feed(&server, "/loft.ics", &feed).await;
        let store = memory_store().await;
        let property = seed_property(store.as_ref(), "u1", "Loft", Some(&url)).await;

        // Act
        let summary = test_syncer(store.clone())
            .sync(&SyncScope::All)
            .await
            .unwrap();

        // Assert
        assert_eq!(summary.created_bookings, 1);
        assert_eq!(summary.results[0].existing, 1);
        let bookings = store.list_bookings(&property.id).await.unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].guest_label, first);
    }
}

#[tokio::test]
async fn dedup_changed_summary_keeps_existing_booking() {
    // Arrange
    let store = memory_store().await;
    let server = MockServer::start().await;
    let url = mount_feed(
        &server,
        "/villa.ics",
        &ics_calendar(&[ics_event("v1", Some("Reserved"), "20260401", "20260403")]),
    )
    .await;
    let property = seed_property(store.as_ref(), "u1", "Villa", Some(&url)).await;
    test_syncer(store.clone())
        .sync(&SyncScope::All)
        .await
        .unwrap();

    server.reset().await;
    mount_feed(
        &server,
        "/villa.ics",
        &ics_calendar(&[ics_event("v1", Some("Maria Lopez"), "20260401", "20260403")]),
    )
    .await;

    // Act
    let summary = test_syncer(store.clone())
        .sync(&SyncScope::All)
        .await
        .unwrap();

    // Assert
    assert_eq!(summary.created_bookings, 0);
    let bookings = store.list_bookings(&property.id).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].guest_label, "Reserved");
}

#[tokio::test]
async fn dedup_same_uid_on_two_properties() {
    // Arrange
    let server = MockServer::start().await;
    let feed = ics_calendar(&[ics_event("shared", None, "20260501", "20260502")]);
    let url_a = mount_feed(&server, "/a.ics", &feed).await;
    let url_b = mount_feed(&server, "/b.ics", &feed).await;
    let store = memory_store().await;
    let a = seed_property(store.as_ref(), "u1", "A", Some(&url_a)).await;
    let b = seed_property(store.as_ref(), "u1", "B", Some(&url_b)).await;

    // Act
    let summary = test_syncer(store.clone())
        .sync(&SyncScope::All)
        .await
        .unwrap();

    // Assert
    assert_eq!(summary.created_bookings, 2);
    assert_eq!(store.list_bookings(&a.id).await.unwrap().len(), 1);
    assert_eq!(store.list_bookings(&b.id).await.unwrap().len(), 1);
}
