// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Synchronization of external booking calendars into the hostsync store.
//!
//! A sync run lists every property with a calendar feed, fetches each feed
//! concurrently, parses the events out of it and reconciles them against the
//! bookings already stored for that property. The run is bounded by a global
//! deadline; feeds that have not finished by then are reported as timed out
//! while the completed ones are kept.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
#![allow(clippy::missing_errors_doc)]

mod config;
mod error;
mod feed;
mod localdb;
mod model;
mod parser;
mod reconcile;
mod store;
mod sync;

pub use crate::config::{APP_NAME, Config, ConfigError};
pub use crate::error::SyncError;
pub use crate::feed::{FeedFetcher, FetchError};
pub use crate::localdb::LocalDb;
pub use crate::model::{
    Alert, AlertKind, Booking, BookingStatus, NewAlert, NewBooking, NewProperty,
    NewServiceRequest, Property, ServiceRequest, ServiceStatus, ServiceType,
};
pub use crate::parser::{CalendarEvent, ParseError, PLACEHOLDER_GUEST, parse_events};
pub use crate::reconcile::{
    CleaningSchedule, EventFailure, ReconcileReport, SOURCE_PLATFORM, SyncMode,
    reconcile_property,
};
pub use crate::store::{InsertOutcome, PropertyFilter, Store, StoreError};
pub use crate::sync::{PropertyStatus, PropertySyncResult, SyncScope, SyncSummary, Syncer};
