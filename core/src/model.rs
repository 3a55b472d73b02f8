// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;
use jiff::civil::Date;
use serde::Serialize;

/// A rental property, optionally linked to an external calendar feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    /// Unique identifier of the property.
    pub id: String,

    /// The user that owns the property.
    pub owner_id: String,

    /// Human readable title.
    pub title: String,

    /// URL of the external iCalendar feed, as stored.
    pub feed_url: Option<String>,
}

impl Property {
    /// The feed URL if one is configured, trimmed of surrounding whitespace.
    pub fn feed_url(&self) -> Option<&str> {
        self.feed_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Data for a property to be created.
#[derive(Debug, Clone)]
pub struct NewProperty {
    /// The user that owns the property.
    pub owner_id: String,
    /// Human readable title.
    pub title: String,
    /// URL of the external iCalendar feed.
    pub feed_url: Option<String>,
}

/// The lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BookingStatus {
    /// Awaiting confirmation.
    Pending,
    /// Confirmed stay.
    Confirmed,
    /// Cancelled stay.
    Cancelled,
}

/// A stay at a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    /// Unique identifier of the booking.
    pub id: String,
    /// The booked property.
    pub property_id: String,
    /// Identifier of the event in the external calendar.
    pub external_id: String,
    /// Check-in date.
    pub start_date: Date,
    /// Checkout date.
    pub end_date: Date,
    /// Guest name or placeholder.
    pub guest_label: String,
    /// Where the booking came from.
    pub source_platform: String,
    /// Current status.
    pub status: BookingStatus,
    /// When the booking was stored.
    pub created_at: Timestamp,
}

/// Data for a booking to be created.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// The booked property.
    pub property_id: String,
    /// Identifier of the event in the external calendar.
    pub external_id: String,
    /// Check-in date.
    pub start_date: Date,
    /// Checkout date.
    pub end_date: Date,
    /// Guest name or placeholder.
    pub guest_label: String,
    /// Where the booking came from.
    pub source_platform: String,
    /// Initial status.
    pub status: BookingStatus,
}

/// The kind of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertKind {
    /// A booking needs a service scheduled.
    PendingService,
    /// Informational notice.
    Info,
}

/// A notification attached to a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Unique identifier of the alert.
    pub id: String,
    /// The user to notify, normally the property owner.
    pub user_id: String,
    /// The property the alert concerns.
    pub property_id: String,
    /// The booking that raised the alert.
    pub booking_id: String,
    /// Short title.
    pub title: String,
    /// Full message.
    pub message: String,
    /// Kind of alert.
    pub kind: AlertKind,
    /// When the alert was stored.
    pub created_at: Timestamp,
}

/// Data for an alert to be created.
#[derive(Debug, Clone)]
pub struct NewAlert {
    /// The user to notify, normally the property owner.
    pub user_id: String,
    /// The property the alert concerns.
    pub property_id: String,
    /// The booking that raised the alert.
    pub booking_id: String,
    /// Short title.
    pub title: String,
    /// Full message.
    pub message: String,
    /// Kind of alert.
    pub kind: AlertKind,
}

/// The type of a service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceType {
    /// Cleaning after checkout.
    Cleaning,
}

/// The status of a service request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceStatus {
    /// Not yet taken by a provider.
    Pending,
    /// Carried out.
    Done,
}

/// A service scheduled for a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRequest {
    /// Unique identifier of the request.
    pub id: String,
    /// The property to service.
    pub property_id: String,
    /// The owner requesting the service.
    pub requester_id: String,
    /// The booking that triggered the request.
    pub booking_id: String,
    /// Type of service.
    pub service_type: ServiceType,
    /// Current status.
    pub status: ServiceStatus,
    /// Requested local date and time, in RFC 9557 form.
    pub requested_date: String,
    /// Free form notes.
    pub notes: String,
    /// When the request was stored.
    pub created_at: Timestamp,
}

/// Data for a service request to be created.
#[derive(Debug, Clone)]
pub struct NewServiceRequest {
    /// The property to service.
    pub property_id: String,
    /// The owner requesting the service.
    pub requester_id: String,
    /// The booking that triggered the request.
    pub booking_id: String,
    /// Type of service.
    pub service_type: ServiceType,
    /// Initial status.
    pub status: ServiceStatus,
    /// Requested local date and time, in RFC 9557 form.
    pub requested_date: String,
    /// Free form notes.
    pub notes: String,
}
