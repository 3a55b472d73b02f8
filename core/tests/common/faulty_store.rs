// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! A [`Store`] wrapper that fails on demand.

use async_trait::async_trait;
use hostsync_core::{
    Alert, Booking, InsertOutcome, LocalDb, NewAlert, NewBooking, NewProperty, NewServiceRequest,
    Property, PropertyFilter, ServiceRequest, Store, StoreError,
};

/// Delegates to an in-memory [`LocalDb`], failing selected operations.
#[derive(Debug)]
pub struct FaultyStore {
    inner: LocalDb,
    /// Booking inserts for this external id fail.
    pub fail_booking_for: Option<String>,
    /// Property listing fails.
    pub fail_listing: bool,
    /// Booking lookups never find anything, so only the UNIQUE index catches repeats.
    pub blind_lookup: bool,
}

impl FaultyStore {
    /// Wraps a fresh in-memory database.
    pub async fn new() -> Self {
        Self {
            inner: LocalDb::open(None).await.expect("in-memory database"),
            fail_booking_for: None,
            fail_listing: false,
            blind_lookup: false,
        }
    }
}

#[async_trait]
impl Store for FaultyStore {
    async fn list_properties(&self, filter: &PropertyFilter) -> Result<Vec<Property>, StoreError> {
        if self.fail_listing {
            return Err(StoreError::Backend("listing unavailable".to_string()));
        }
        self.inner.list_properties(filter).await
    }

    async fn insert_property(&self, property: NewProperty) -> Result<Property, StoreError> {
        self.inner.insert_property(property).await
    }

    async fn find_booking(
        &self,
        property_id: &str,
        external_id: &str,
    ) -> Result<Option<Booking>, StoreError> {
        if self.blind_lookup {
            return Ok(None);
        }
        self.inner.find_booking(property_id, external_id).await
    }

    async fn insert_booking(
        &self,
        booking: NewBooking,
    ) -> Result<InsertOutcome<Booking>, StoreError> {
        if self.fail_booking_for.as_deref() == Some(booking.external_id.as_str()) {
            return Err(StoreError::Backend("disk full".to_string()));
        }
        self.inner.insert_booking(booking).await
    }

    async fn list_bookings(&self, property_id: &str) -> Result<Vec<Booking>, StoreError> {
        self.inner.list_bookings(property_id).await
    }

    async fn insert_alert(&self, alert: NewAlert) -> Result<Alert, StoreError> {
        self.inner.insert_alert(alert).await
    }

    async fn list_alerts(&self, property_id: &str) -> Result<Vec<Alert>, StoreError> {
        self.inner.list_alerts(property_id).await
    }

    async fn insert_service_request(
        &self,
        request: NewServiceRequest,
    ) -> Result<ServiceRequest, StoreError> {
        self.inner.insert_service_request(request).await
    }

    async fn list_service_requests(
        &self,
        property_id: &str,
    ) -> Result<Vec<ServiceRequest>, StoreError> {
        self.inner.list_service_requests(property_id).await
    }
}
