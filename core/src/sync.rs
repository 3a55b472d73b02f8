// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Concurrent synchronization of every calendar feed under one deadline.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use tokio::time::{Instant, timeout_at};

use crate::config::Config;
use crate::error::SyncError;
use crate::feed::{FeedFetcher, FetchError};
use crate::model::Property;
use crate::parser::parse_events;
use crate::reconcile::{CleaningSchedule, ReconcileReport, SyncMode, reconcile_property};
use crate::store::{PropertyFilter, Store};

/// Which properties a sync run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncScope {
    /// Every property with a feed; new bookings raise a service alert.
    All,
    /// The properties of one owner; new bookings also get a cleaning request.
    Owner(String),
}

impl SyncScope {
    fn mode(&self) -> SyncMode {
        match self {
            Self::All => SyncMode::Admin,
            Self::Owner(_) => SyncMode::Owner,
        }
    }

    fn filter(&self) -> PropertyFilter {
        match self {
            Self::All => PropertyFilter::syncable(None),
            Self::Owner(owner_id) => PropertyFilter::syncable(Some(owner_id)),
        }
    }
}

/// How a single property fared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PropertyStatus {
    /// Feed fetched, parsed and reconciled without errors.
    Synced,
    /// Something went wrong, see the error.
    Failed,
    /// Still running when the deadline fired.
    TimedOut,
}

/// Result of syncing one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySyncResult {
    /// The property.
    pub property_id: String,
    /// Its title.
    pub title: String,
    /// How it went.
    pub status: PropertyStatus,
    /// Error text for failed properties.
    pub error: Option<String>,
    /// Bookings created.
    pub created: usize,
    /// Events that already had a booking.
    pub existing: usize,
    /// Events skipped for lack of an identifier.
    pub skipped: usize,
}

impl PropertySyncResult {
    fn from_report(property: &Property, report: &ReconcileReport) -> Self {
        let error = report.failure_summary();
        Self {
            property_id: property.id.clone(),
            title: property.title.clone(),
            status: if error.is_some() {
                PropertyStatus::Failed
            } else {
                PropertyStatus::Synced
            },
            error,
            created: report.created,
            existing: report.existing,
            skipped: report.skipped,
        }
    }

    fn failed(property_id: String, title: String, error: &SyncError) -> Self {
        Self {
            property_id,
            title,
            status: PropertyStatus::Failed,
            error: Some(error.to_string()),
            created: 0,
            existing: 0,
            skipped: 0,
        }
    }

    fn timed_out(property_id: String, title: String) -> Self {
        Self {
            property_id,
            title,
            status: PropertyStatus::TimedOut,
            error: None,
            created: 0,
            existing: 0,
            skipped: 0,
        }
    }
}

/// Outcome of a sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// The run completed without a hard error, possibly partially.
    pub success: bool,
    /// The deadline fired before every property finished.
    pub timed_out: bool,
    /// Human readable summary.
    pub message: String,
    /// Bookings created across all properties.
    pub created_bookings: usize,
    /// Per property results, in listing order.
    pub results: Vec<PropertySyncResult>,
}

impl SyncSummary {
    fn new(results: Vec<PropertySyncResult>, timed_out: bool) -> Self {
        let created_bookings = results.iter().map(|r| r.created).sum();
        let message = if results.is_empty() {
            "No properties with a calendar feed configured.".to_string()
        } else {
            summary_message(&results, timed_out, created_bookings)
        };
        Self {
            success: true,
            timed_out,
            message,
            created_bookings,
            results,
        }
    }

    /// Number of properties synced without errors.
    pub fn synced(&self) -> usize {
        self.count(PropertyStatus::Synced)
    }

    /// Number of properties with the given status.
    pub fn count(&self, status: PropertyStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }
}

fn summary_message(results: &[PropertySyncResult], timed_out: bool, created: usize) -> String {
    let titles = |status: PropertyStatus| -> Vec<&str> {
        results
            .iter()
            .filter(|r| r.status == status)
            .map(|r| r.title.as_str())
            .collect()
    };

    let synced = titles(PropertyStatus::Synced);
    let mut message = format!("Synced {} of {}.", synced.len(), results.len());
    if !synced.is_empty() {
        let _ = write!(message, " ({})", synced.join(", "));
    }

    let failed: Vec<String> = results
        .iter()
        .filter(|r| r.status == PropertyStatus::Failed)
        .map(|r| format!("{} ({})", r.title, r.error.as_deref().unwrap_or("unknown error")))
        .collect();
    if !failed.is_empty() {
        let _ = write!(message, " Failed: {}.", failed.join(", "));
    }

    if timed_out {
        let _ = write!(
            message,
            " Timed out: {}. Partial synchronization.",
            titles(PropertyStatus::TimedOut).join(", ")
        );
    }

    let _ = write!(message, " {created} new bookings.");
    message
}

/// Runs sync passes over the properties of a [`Store`].
#[derive(Debug, Clone)]
pub struct Syncer {
    store: Arc<dyn Store>,
    fetcher: FeedFetcher,
    schedule: CleaningSchedule,
    timeout: Duration,
    retries: u32,
    backoff: Duration,
}

impl Syncer {
    /// Creates a syncer from the configuration.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built or the time zone is unknown.
    pub fn new(store: Arc<dyn Store>, config: &Config) -> Result<Self, SyncError> {
        Ok(Self {
            store,
            fetcher: FeedFetcher::new(config)?,
            schedule: CleaningSchedule {
                hour: config.cleaning_hour,
                time_zone: config.time_zone()?,
            },
            timeout: config.sync_timeout(),
            retries: config.fetch_retries,
            backoff: config.retry_backoff(),
        })
    }

    /// Overrides the deadline of a whole run.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the retry policy for transient fetch failures.
    #[must_use]
    pub fn with_retries(mut self, retries: u32, backoff: Duration) -> Self {
        self.retries = retries;
        self.backoff = backoff;
        self
    }

    /// Syncs every property in scope concurrently.
    ///
    /// Properties still running when the deadline fires are reported as timed
    /// out; their tasks are left to finish in the background.
    ///
    /// # Errors
    ///
    /// Only fails when the properties cannot be listed.
    #[tracing::instrument(skip(self))]
    pub async fn sync(&self, scope: &SyncScope) -> Result<SyncSummary, SyncError> {
        let properties = self.store.list_properties(&scope.filter()).await?;
        if properties.is_empty() {
            tracing::info!("no properties with a calendar feed");
            return Ok(SyncSummary::new(Vec::new(), false));
        }

        let deadline = Instant::now() + self.timeout;
        let mode = scope.mode();
        let order: Vec<(String, String)> = properties
            .iter()
            .map(|p| (p.id.clone(), p.title.clone()))
            .collect();

        let mut tasks = FuturesUnordered::new();
        for property in properties {
            let id = property.id.clone();
            let title = property.title.clone();
            let this = self.clone();
            let handle = tokio::spawn(async move { this.sync_property(property, mode).await });
            tasks.push(handle.map(move |joined| (id, title, joined)));
        }

        let mut finished = HashMap::with_capacity(order.len());
        let mut timed_out = false;
        loop {
            match timeout_at(deadline, tasks.next()).await {
                Ok(Some((id, title, joined))) => {
                    let result = joined.unwrap_or_else(|e| {
                        tracing::error!(property_id = %id, err = %e, "sync task crashed");
                        PropertySyncResult::failed(id.clone(), title, &SyncError::Task(e.to_string()))
                    });
                    finished.insert(id, result);
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!(
                        pending = order.len() - finished.len(),
                        "sync deadline reached, reporting partial results"
                    );
                    timed_out = true;
                    break;
                }
            }
        }

        let results = order
            .into_iter()
            .map(|(id, title)| {
                finished
                    .remove(&id)
                    .unwrap_or_else(|| PropertySyncResult::timed_out(id, title))
            })
            .collect();
        let summary = SyncSummary::new(results, timed_out);
        tracing::info!(message = %summary.message, "sync finished");
        Ok(summary)
    }

    #[tracing::instrument(skip_all, fields(property_id = %property.id))]
    async fn sync_property(&self, property: Property, mode: SyncMode) -> PropertySyncResult {
        match self.run(&property, mode).await {
            Ok(report) => PropertySyncResult::from_report(&property, &report),
            Err(err) => {
                tracing::warn!(%err, "property sync failed");
                PropertySyncResult::failed(property.id, property.title, &err)
            }
        }
    }

    async fn run(&self, property: &Property, mode: SyncMode) -> Result<ReconcileReport, SyncError> {
        let url = property.feed_url().ok_or(SyncError::NoFeed)?;
        let text = self.fetch_with_retry(url).await?;
        let events = parse_events(&text)?;
        tracing::debug!(count = events.len(), "events parsed");
        Ok(reconcile_property(self.store.as_ref(), property, &events, mode, &self.schedule).await)
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            match self.fetcher.fetch(url).await {
                Err(err) if err.is_transient() && attempt < self.retries => {
                    attempt += 1;
                    tracing::warn!(attempt, %err, "retrying feed download");
                    tokio::time::sleep(self.backoff * attempt).await;
                }
                outcome => return outcome,
            }
        }
    }
}
