// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;

use crate::localdb::decode;
use crate::model::Alert;
use crate::store::StoreError;

#[derive(Debug, Clone)]
pub struct Alerts {
    pool: SqlitePool,
}

impl Alerts {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, record: &AlertRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO alerts (id, user_id, property_id, booking_id, title, message, kind, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?);
";

        sqlx::query(SQL)
            .bind(&record.id)
            .bind(&record.user_id)
            .bind(&record.property_id)
            .bind(&record.booking_id)
            .bind(&record.title)
            .bind(&record.message)
            .bind(&record.kind)
            .bind(&record.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn list(&self, property_id: &str) -> Result<Vec<AlertRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, user_id, property_id, booking_id, title, message, kind, created_at
FROM alerts
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
pub struct AlertRecord {
    pub id: String,
    pub user_id: String,
    pub property_id: String,
    pub booking_id: String,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub created_at: String,
}

impl TryFrom<AlertRecord> for Alert {
    type Error = StoreError;

    fn try_from(record: AlertRecord) -> Result<Self, Self::Error> {
        const TABLE: &str = "alerts";
        Ok(Self {
            kind: decode(TABLE, &record.id, &record.kind)?,
            created_at: decode(TABLE, &record.id, &record.created_at)?,
            id: record.id,
            user_id: record.user_id,
            property_id: record.property_id,
            booking_id: record.booking_id,
            title: record.title,
            message: record.message,
        })
    }
}
