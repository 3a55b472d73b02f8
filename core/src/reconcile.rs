// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! Turning parsed events into bookings, alerts and service requests.

use jiff::Zoned;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::Serialize;

use crate::error::SyncError;
use crate::model::{
    AlertKind, Booking, BookingStatus, NewAlert, NewBooking, NewServiceRequest, Property,
    ServiceStatus, ServiceType,
};
use crate::parser::CalendarEvent;
use crate::store::{InsertOutcome, Store};

/// Source platform recorded on bookings created from feeds.
pub const SOURCE_PLATFORM: &str = "iCal Sync";

/// Which side effects accompany a new booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Administrative sync: an alert asking for a service to be scheduled.
    Admin,
    /// Owner sync: an informational alert plus an automatic checkout cleaning.
    Owner,
}

/// When checkout cleanings are requested.
#[derive(Debug, Clone)]
pub struct CleaningSchedule {
    /// Local hour of the checkout day.
    pub hour: i8,
    /// Zone the hour is expressed in.
    pub time_zone: TimeZone,
}

impl CleaningSchedule {
    /// The cleaning time for a checkout date, taken from the calendar date
    /// as is.
    ///
    /// # Errors
    ///
    /// Fails when the hour is out of range or the local time does not exist
    /// in the zone.
    pub fn requested_date(&self, checkout: Date) -> Result<Zoned, jiff::Error> {
        checkout
            .at(self.hour, 0, 0, 0)
            .to_zoned(self.time_zone.clone())
    }
}

/// Outcome of reconciling the events of one property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Bookings created.
    pub created: usize,
    /// Events that already had a booking.
    pub existing: usize,
    /// Events skipped for lack of an identifier.
    pub skipped: usize,
    /// Events that could not be processed.
    pub failures: Vec<EventFailure>,
}

impl ReconcileReport {
    /// A one-line description of the failures, if any.
    pub fn failure_summary(&self) -> Option<String> {
        let first = self.failures.first()?;
        Some(match self.failures.len() {
            1 => format!("event {}: {}", first.external_id, first.error),
            n => format!(
                "{n} events failed, first {}: {}",
                first.external_id, first.error
            ),
        })
    }
}

/// An event that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventFailure {
    /// The event identifier.
    pub external_id: String,
    /// What went wrong.
    pub error: String,
}

/// Reconciles the events of one feed against the bookings of a property.
///
/// Events are handled in order; a failing event is recorded and the rest
/// still run. Nothing written is rolled back.
#[tracing::instrument(skip_all, fields(property_id = %property.id, events = events.len()))]
pub async fn reconcile_property(
    store: &dyn Store,
    property: &Property,
    events: &[CalendarEvent],
    mode: SyncMode,
    schedule: &CleaningSchedule,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    for event in events {
        if event.external_id.trim().is_empty() {
            tracing::warn!("skipping event without identifier");
            report.skipped += 1;
            continue;
        }

        let booking = match insert_booking(store, property, event).await {
            Ok(Some(booking)) => booking,
            Ok(None) => {
                report.existing += 1;
                continue;
            }
            Err(err) => {
                record_failure(&mut report, event, &err);
                continue;
            }
        };

        report.created += 1;
        tracing::info!(
            external_id = %event.external_id,
            booking_id = %booking.id,
            "booking created"
        );

        if let Err(err) = notify(store, property, &booking, mode, schedule).await {
            record_failure(&mut report, event, &err);
        }
    }
    report
}

/// Creates the booking for an event, or returns `None` when it exists.
async fn insert_booking(
    store: &dyn Store,
    property: &Property,
    event: &CalendarEvent,
) -> Result<Option<Booking>, SyncError> {
    if store
        .find_booking(&property.id, &event.external_id)
        .await?
        .is_some()
    {
        return Ok(None);
    }

    let booking = NewBooking {
        property_id: property.id.clone(),
        external_id: event.external_id.clone(),
        start_date: event.start_date(),
        end_date: event.end_date(),
        guest_label: event.guest_label().to_string(),
        source_platform: SOURCE_PLATFORM.to_string(),
        status: BookingStatus::Confirmed,
    };
    match store.insert_booking(booking).await? {
        InsertOutcome::Created(booking) => Ok(Some(booking)),
        InsertOutcome::AlreadyExists => {
            tracing::debug!(external_id = %event.external_id, "booking created concurrently");
            Ok(None)
        }
    }
}

/// Writes the alert and, for owners, the cleaning request of a new booking.
async fn notify(
    store: &dyn Store,
    property: &Property,
    booking: &Booking,
    mode: SyncMode,
    schedule: &CleaningSchedule,
) -> Result<(), SyncError> {
    let guest = &booking.guest_label;
    let (title, message, kind) = match mode {
        SyncMode::Admin => (
            "Pending service",
            format!(
                "New booking (iCal): {guest} ({} - {})",
                booking.start_date, booking.end_date
            ),
            AlertKind::PendingService,
        ),
        SyncMode::Owner => (
            "New synced booking",
            format!("Booking for {guest} received from the external calendar."),
            AlertKind::Info,
        ),
    };
    store
        .insert_alert(NewAlert {
            user_id: property.owner_id.clone(),
            property_id: property.id.clone(),
            booking_id: booking.id.clone(),
            title: title.to_string(),
            message,
            kind,
        })
        .await?;

    if mode == SyncMode::Owner {
        let requested = schedule.requested_date(booking.end_date)?;
        store
            .insert_service_request(NewServiceRequest {
                property_id: property.id.clone(),
                requester_id: property.owner_id.clone(),
                booking_id: booking.id.clone(),
                service_type: ServiceType::Cleaning,
                status: ServiceStatus::Pending,
                requested_date: requested.to_string(),
                notes: format!("Automatic checkout cleaning (sync) for booking: {guest}"),
            })
            .await?;
    }
    Ok(())
}

fn record_failure(report: &mut ReconcileReport, event: &CalendarEvent, err: &SyncError) {
    tracing::error!(external_id = %event.external_id, %err, "failed to reconcile event");
    report.failures.push(EventFailure {
        external_id: event.external_id.clone(),
        error: err.to_string(),
    });
}
