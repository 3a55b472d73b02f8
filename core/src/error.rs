// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use crate::config::ConfigError;
use crate::feed::FetchError;
use crate::parser::ParseError;
use crate::store::StoreError;

/// Errors raised while synchronizing calendars.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The feed could not be downloaded.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The feed could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A cleaning date could not be placed in the configured time zone.
    #[error("failed to schedule cleaning: {0}")]
    Schedule(#[from] jiff::Error),

    /// The property has no calendar feed.
    #[error("no calendar feed configured")]
    NoFeed,

    /// The task syncing a property crashed.
    #[error("sync task failed: {0}")]
    Task(String),
}
