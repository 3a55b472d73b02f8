// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use sqlx::SqlitePool;

use crate::model::Property;
use crate::store::PropertyFilter;

#[derive(Debug, Clone)]
pub struct Properties {
    pool: SqlitePool,
}

impl Properties {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, record: &PropertyRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO properties (id, owner_id, title, feed_url, created_at)
VALUES (?, ?, ?, ?, ?);
";

        sqlx::query(SQL)
            .bind(&record.id)
            .bind(&record.owner_id)
            .bind(&record.title)
            .bind(&record.feed_url)
            .bind(&record.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn list(&self, filter: &PropertyFilter) -> Result<Vec<PropertyRecord>, sqlx::Error> {
        let mut sql = "\
SELECT id, owner_id, title, feed_url, created_at
FROM properties
"
        .to_string();

        let mut where_clauses = Vec::new();
        if filter.owner_id.is_some() {
            where_clauses.push("owner_id = ?");
        }
        if filter.with_feed {
            // space, tab, LF, CR
            where_clauses.push("TRIM(COALESCE(feed_url, ''), ' ' || char(9, 10, 13)) <> ''");
        }
        if !where_clauses.is_empty() {
            sql += &format!("WHERE {} ", where_clauses.join(" AND "));
        }
        sql += "ORDER BY rowid ASC;";

        let mut executable = sqlx::query_as(&sql);
        if let Some(owner_id) = &filter.owner_id {
            executable = executable.bind(owner_id);
        }
        executable.fetch_all(&self.pool).await
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct PropertyRecord {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub feed_url: Option<String>,
    pub created_at: String,
}

impl From<PropertyRecord> for Property {
    fn from(record: PropertyRecord) -> Self {
        Self {
            id: record.id,
            owner_id: record.owner_id,
            title: record.title,
            feed_url: record.feed_url,
        }
    }
}
