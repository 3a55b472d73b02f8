// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

mod alerts;
mod bookings;
mod properties;
mod service_requests;

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::localdb::alerts::{AlertRecord, Alerts};
use crate::localdb::bookings::{BookingRecord, Bookings};
use crate::localdb::properties::{Properties, PropertyRecord};
use crate::localdb::service_requests::{ServiceRequestRecord, ServiceRequests};
use crate::model::{
    Alert, Booking, NewAlert, NewBooking, NewProperty, NewServiceRequest, Property,
    ServiceRequest,
};
use crate::store::{InsertOutcome, PropertyFilter, Store, StoreError};

/// SQLite backed [`Store`].
#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,

    properties: Properties,
    bookings: Bookings,
    alerts: Alerts,
    service_requests: ServiceRequests,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self, StoreError> {
        let pool = if let Some(filename) = filename {
            tracing::info!(path = %filename.display(), "connecting to SQLite database");
            if let Some(parent) = filename.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }

            let options = SqliteConnectOptions::new()
                .filename(filename)
                .create_if_missing(true);
            SqlitePoolOptions::new().connect_with(options).await?
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            // every connection to `:memory:` is a separate database, so keep exactly one alive
            let options = SqliteConnectOptions::new().in_memory(true);
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        };

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await?;

        tracing::debug!("ensuring tables in the database");
        Ok(LocalDb {
            properties: Properties::new(pool.clone()),
            bookings: Bookings::new(pool.clone()),
            alerts: Alerts::new(pool.clone()),
            service_requests: ServiceRequests::new(pool.clone()),
            pool,
        })
    }

    /// Closes every connection of the pool.
    pub async fn close(self) {
        tracing::debug!("closing database connection");
        self.pool.close().await;
    }
}

#[async_trait]
impl Store for LocalDb {
    async fn list_properties(&self, filter: &PropertyFilter) -> Result<Vec<Property>, StoreError> {
        // SQL TRIM only knows ASCII blanks, `matches` has the final say
        let records = self.properties.list(filter).await?;
        Ok(records
            .into_iter()
            .map(Property::from)
            .filter(|p| filter.matches(p))
            .collect())
    }

    async fn insert_property(&self, property: NewProperty) -> Result<Property, StoreError> {
        let record = PropertyRecord {
            id: new_id(),
            owner_id: property.owner_id,
            title: property.title,
            feed_url: property.feed_url,
            created_at: Timestamp::now().to_string(),
        };
        self.properties.insert(&record).await?;
        Ok(record.into())
    }

    async fn find_booking(
        &self,
        property_id: &str,
        external_id: &str,
    ) -> Result<Option<Booking>, StoreError> {
        self.bookings
            .find(property_id, external_id)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    async fn insert_booking(
        &self,
        booking: NewBooking,
    ) -> Result<InsertOutcome<Booking>, StoreError> {
        let record = BookingRecord {
            id: new_id(),
            property_id: booking.property_id,
            external_id: booking.external_id,
            start_date: booking.start_date.to_string(),
            end_date: booking.end_date.to_string(),
            guest_label: booking.guest_label,
            source_platform: booking.source_platform,
            status: booking.status.to_string(),
            created_at: Timestamp::now().to_string(),
        };

        match self.bookings.insert(&record).await {
            Ok(()) => Ok(InsertOutcome::Created(record.try_into()?)),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tracing::debug!(
                    property_id = %record.property_id,
                    external_id = %record.external_id,
                    "booking already exists"
                );
                Ok(InsertOutcome::AlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_bookings(&self, property_id: &str) -> Result<Vec<Booking>, StoreError> {
        let records = self.bookings.list(property_id).await?;
        records.into_iter().map(Booking::try_from).collect()
    }

    async fn insert_alert(&self, alert: NewAlert) -> Result<Alert, StoreError> {
        let record = AlertRecord {
            id: new_id(),
            user_id: alert.user_id,
            property_id: alert.property_id,
            booking_id: alert.booking_id,
            title: alert.title,
            message: alert.message,
            kind: alert.kind.to_string(),
            created_at: Timestamp::now().to_string(),
        };
        self.alerts.insert(&record).await?;
        record.try_into()
    }

    async fn list_alerts(&self, property_id: &str) -> Result<Vec<Alert>, StoreError> {
        let records = self.alerts.list(property_id).await?;
        records.into_iter().map(Alert::try_from).collect()
    }

    async fn insert_service_request(
        &self,
        request: NewServiceRequest,
    ) -> Result<ServiceRequest, StoreError> {
        let record = ServiceRequestRecord {
            id: new_id(),
            property_id: request.property_id,
            requester_id: request.requester_id,
            booking_id: request.booking_id,
            service_type: request.service_type.to_string(),
            status: request.status.to_string(),
            requested_date: request.requested_date,
            notes: request.notes,
            created_at: Timestamp::now().to_string(),
        };
        self.service_requests.insert(&record).await?;
        record.try_into()
    }

    async fn list_service_requests(
        &self,
        property_id: &str,
    ) -> Result<Vec<ServiceRequest>, StoreError> {
        let records = self.service_requests.list(property_id).await?;
        records.into_iter().map(ServiceRequest::try_from).collect()
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Parses a stored column, attributing failures to the row.
fn decode<T>(table: &'static str, id: &str, value: &str) -> Result<T, StoreError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|e: T::Err| StoreError::Decode {
        table,
        id: id.to_string(),
        message: format!("{value:?}: {e}"),
    })
}
