// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use async_trait::async_trait;

use crate::model::{
    Alert, Booking, NewAlert, NewBooking, NewProperty, NewServiceRequest, Property,
    ServiceRequest,
};

/// Persistence used by the synchronization engine.
///
/// Implementations must enforce uniqueness of `(property_id, external_id)`
/// for bookings and report a violation as [`InsertOutcome::AlreadyExists`]
/// rather than as an error.
#[async_trait]
pub trait Store: fmt::Debug + Send + Sync {
    /// Lists the properties matching the filter.
    async fn list_properties(&self, filter: &PropertyFilter) -> Result<Vec<Property>, StoreError>;

    /// Stores a new property.
    async fn insert_property(&self, property: NewProperty) -> Result<Property, StoreError>;

    /// Looks up the booking created from an external event.
    async fn find_booking(
        &self,
        property_id: &str,
        external_id: &str,
    ) -> Result<Option<Booking>, StoreError>;

    /// Stores a new booking unless one with the same key already exists.
    async fn insert_booking(
        &self,
        booking: NewBooking,
    ) -> Result<InsertOutcome<Booking>, StoreError>;

    /// Lists the bookings of a property, ordered by start date.
    async fn list_bookings(&self, property_id: &str) -> Result<Vec<Booking>, StoreError>;

    /// Stores a new alert.
    async fn insert_alert(&self, alert: NewAlert) -> Result<Alert, StoreError>;

    /// Lists the alerts of a property in creation order.
    async fn list_alerts(&self, property_id: &str) -> Result<Vec<Alert>, StoreError>;

    /// Stores a new service request.
    async fn insert_service_request(
        &self,
        request: NewServiceRequest,
    ) -> Result<ServiceRequest, StoreError>;

    /// Lists the service requests of a property in creation order.
    async fn list_service_requests(
        &self,
        property_id: &str,
    ) -> Result<Vec<ServiceRequest>, StoreError>;
}

/// Result of an insert guarded by a uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<T> {
    /// The record was created.
    Created(T),
    /// A record with the same key already exists.
    AlreadyExists,
}

/// Conditions for listing properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    /// Only properties owned by this user.
    pub owner_id: Option<String>,

    /// Only properties with a non-blank feed URL.
    pub with_feed: bool,
}

impl PropertyFilter {
    /// Properties that can be synchronized, optionally restricted to one owner.
    pub fn syncable(owner_id: Option<&str>) -> Self {
        Self {
            owner_id: owner_id.map(ToString::to_string),
            with_feed: true,
        }
    }

    /// Whether a property satisfies the filter.
    pub fn matches(&self, property: &Property) -> bool {
        self.owner_id
            .as_deref()
            .is_none_or(|owner| property.owner_id == owner)
            && (!self.with_feed || property.feed_url().is_some())
    }
}

/// Errors raised by a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database reported an error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migrations failed.
    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// The database file could not be prepared.
    #[error("failed to prepare database file: {0}")]
    Io(#[from] std::io::Error),

    /// A stored row could not be decoded.
    #[error("invalid {table} record {id}: {message}")]
    Decode {
        /// The table holding the row.
        table: &'static str,
        /// Identifier of the row.
        id: String,
        /// What was wrong with it.
        message: String,
    },

    /// Any other backend failure.
    #[error("store backend error: {0}")]
    Backend(String),
}
