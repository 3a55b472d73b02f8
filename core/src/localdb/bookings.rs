// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;

use crate::localdb::decode;
use crate::model::Booking;
use crate::store::StoreError;

#[derive(Debug, Clone)]
pub struct Bookings {
    pool: SqlitePool,
}

impl Bookings {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a booking; a clash on `(property_id, external_id)` surfaces as a
    /// unique violation from the database.
    pub async fn insert(&self, record: &BookingRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO bookings (id, property_id, external_id, start_date, end_date, guest_label, source_platform, status, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?);
";

        sqlx::query(SQL)
            .bind(&record.id)
            .bind(&record.property_id)
            .bind(&record.external_id)
            .bind(&record.start_date)
            .bind(&record.end_date)
            .bind(&record.guest_label)
            .bind(&record.source_platform)
            .bind(&record.status)
            .bind(&record.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn find(
        &self,
        property_id: &str,
        external_id: &str,
    ) -> Result<Option<BookingRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, property_id, external_id, start_date, end_date, guest_label, source_platform, status, created_at
FROM bookings
WHERE property_id = ? AND external_id = ?;
";

        sqlx::query_as(SQL)
            .bind(property_id)
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list(&self, property_id: &str) -> Result<Vec<BookingRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, property_id, external_id, start_date, end_date, guest_label, source_platform, status, created_at
FROM bookings
WHERE property_id = ?
ORDER BY start_date ASC, rowid ASC;
";

        sqlx::query_as(SQL)
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct BookingRecord {
    pub id: String,
    pub property_id: String,
    pub external_id: String,
    pub start_date: String,
    pub end_date: String,
    pub guest_label: String,
    pub source_platform: String,
    pub status: String,
    pub created_at: String,
}

impl TryFrom<BookingRecord> for Booking {
    type Error = StoreError;

    fn try_from(record: BookingRecord) -> Result<Self, Self::Error> {
        const TABLE: &str = "bookings";
        Ok(Self {
            start_date: decode(TABLE, &record.id, &record.start_date)?,
            end_date: decode(TABLE, &record.id, &record.end_date)?,
            status: decode(TABLE, &record.id, &record.status)?,
            created_at: decode(TABLE, &record.id, &record.created_at)?,
            id: record.id,
            property_id: record.property_id,
            external_id: record.external_id,
            guest_label: record.guest_label,
            source_platform: record.source_platform,
        })
    }
}
