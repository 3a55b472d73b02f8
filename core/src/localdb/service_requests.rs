// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;

use crate::localdb::decode;
use crate::model::ServiceRequest;
use crate::store::StoreError;

#[derive(Debug, Clone)]
pub struct ServiceRequests {
    pool: SqlitePool,
}

impl ServiceRequests {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, record: &ServiceRequestRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO service_requests (id, property_id, requester_id, booking_id, service_type, status, requested_date, notes, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?);
";

        sqlx::query(SQL)
            .bind(&record.id)
            .bind(&record.property_id)
            .bind(&record.requester_id)
            .bind(&record.booking_id)
            .bind(&record.service_type)
            .bind(&record.status)
            .bind(&record.requested_date)
            .bind(&record.notes)
            .bind(&record.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn list(&self, property_id: &str) -> Result<Vec<ServiceRequestRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, property_id, requester_id, booking_id, service_type, status, requested_date, notes, created_at
FROM service_requests
WHERE property_id = ?
ORDER BY rowid ASC;
";

        sqlx::query_as(SQL)
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ServiceRequestRecord {
    pub id: String,
    pub property_id: String,
    pub requester_id: String,
    pub booking_id: String,
    pub service_type: String,
    pub status: String,
    pub requested_date: String,
    pub notes: String,
    pub created_at: String,
}

impl TryFrom<ServiceRequestRecord> for ServiceRequest {
    type Error = StoreError;

    fn try_from(record: ServiceRequestRecord) -> Result<Self, Self::Error> {
        const TABLE: &str = "service_requests";
        Ok(Self {
            service_type: decode(TABLE, &record.id, &record.service_type)?,
            status: decode(TABLE, &record.id, &record.status)?,
            created_at: decode(TABLE, &record.id, &record.created_at)?,
            id: record.id,
            property_id: record.property_id,
            requester_id: record.requester_id,
            booking_id: record.booking_id,
            requested_date: record.requested_date,
            notes: record.notes,
        })
    }
}
