// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs for the API boundary.
//!
//! These are distinct from domain types and represent the API contract.
//! Incoming payloads are loosely typed (strings, optionals); the operations
//! validate them into domain types before anything reaches the lifecycle
//! engine. Timestamps in responses are RFC 3339 strings.

use crate::error::ApiError;
use civic_report_audit::StatusLogEntry;
use civic_report_domain::{Comment, Incident, MediaRef, Notification, ReporterId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Formats a timestamp for a response body.
///
/// # Errors
///
/// Returns an internal error if formatting fails.
pub(crate) fn format_timestamp(ts: OffsetDateTime) -> Result<String, ApiError> {
    ts.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

/// API request to create a new incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIncidentRequest {
    /// Category label (closed set, snake_case or display form).
    pub category: String,
    /// Required description text.
    pub description: String,
    /// Longitude of the reported location.
    pub longitude: f64,
    /// Latitude of the reported location.
    pub latitude: f64,
    /// Optional human-readable address.
    pub address: Option<String>,
    /// Ordered media references from the upload store.
    #[serde(default)]
    pub images: Vec<String>,
    /// The reporting identity; absent for anonymous reports.
    pub reporter_id: Option<String>,
    /// When the problem occurred (ISO 8601 date, stored verbatim).
    pub event_date: Option<String>,
    /// Days of the week the problem recurs on (stored verbatim).
    #[serde(default)]
    pub days_of_week: Vec<String>,
    /// Time-of-day bucket (morning/afternoon/evening/night).
    pub time_of_day: Option<String>,
}

/// API request to transition an incident's status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionStatusRequest {
    /// The incident to transition.
    pub incident_id: String,
    /// The target status (one of the nine values).
    pub new_status: String,
    /// The acting identity. Absent fails closed with `MissingActor`.
    pub actor_id: Option<String>,
    /// The acting identity's role ('administrator' or 'citizen').
    pub actor_role: Option<String>,
}

/// API request to edit an incident's descriptive fields.
///
/// Absent fields are left unchanged. `longitude` and `latitude` must be
/// supplied together; a changed location re-runs the geofence check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditIncidentRequest {
    /// The incident to edit.
    pub incident_id: String,
    /// The acting identity. Absent fails closed with `MissingActor`.
    pub actor_id: Option<String>,
    /// The acting identity's role ('administrator' or 'citizen').
    pub actor_role: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement longitude (requires `latitude`).
    pub longitude: Option<f64>,
    /// Replacement latitude (requires `longitude`).
    pub latitude: Option<f64>,
    /// Replacement address.
    pub address: Option<String>,
    /// Replacement media reference list.
    pub images: Option<Vec<String>>,
    /// Replacement event date (stored verbatim).
    pub event_date: Option<String>,
    /// Replacement day-of-week list (stored verbatim).
    pub days_of_week: Option<Vec<String>>,
    /// Replacement time-of-day bucket.
    pub time_of_day: Option<String>,
}

/// API request to add a reporter comment to an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddCommentRequest {
    /// The incident to comment on.
    pub incident_id: String,
    /// The comment author. Absent fails closed with `MissingActor`.
    pub author_id: Option<String>,
    /// The comment text.
    pub body: String,
}

/// An incident as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentResponse {
    /// The incident identifier.
    pub id: String,
    /// The category label (snake_case).
    pub category: String,
    /// The description text.
    pub description: String,
    /// Longitude of the location.
    pub longitude: f64,
    /// Latitude of the location.
    pub latitude: f64,
    /// Optional human-readable address.
    pub address: Option<String>,
    /// Ordered media references.
    pub images: Vec<String>,
    /// The current status (snake_case).
    pub status: String,
    /// The derived review-stage category (initial/active/final).
    pub status_category: String,
    /// When the incident entered the Final group, if it has.
    pub resolved_at: Option<String>,
    /// The reporting identity, absent for anonymous reports.
    pub reporter_id: Option<String>,
    /// Event date metadata, verbatim.
    pub event_date: Option<String>,
    /// Day-of-week metadata, verbatim.
    pub days_of_week: Vec<String>,
    /// Time-of-day metadata.
    pub time_of_day: Option<String>,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last-mutation timestamp (RFC 3339).
    pub updated_at: String,
}

impl IncidentResponse {
    /// Builds the response DTO from the domain aggregate.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a timestamp cannot be formatted.
    pub fn from_incident(incident: &Incident) -> Result<Self, ApiError> {
        Ok(Self {
            id: incident.id.value().to_string(),
            category: incident.category.as_str().to_string(),
            description: incident.description.clone(),
            longitude: incident.location.longitude(),
            latitude: incident.location.latitude(),
            address: incident.address.clone(),
            images: incident
                .images
                .iter()
                .map(|media| media.value().to_string())
                .collect(),
            status: incident.status.as_str().to_string(),
            status_category: incident.status_category().as_str().to_string(),
            resolved_at: incident
                .resolved_at
                .map(format_timestamp)
                .transpose()?,
            reporter_id: incident
                .reporter
                .as_ref()
                .map(|reporter| reporter.value().to_string()),
            event_date: incident.metadata.event_date.clone(),
            days_of_week: incident.metadata.days_of_week.clone(),
            time_of_day: incident
                .metadata
                .time_of_day
                .map(|bucket| bucket.as_str().to_string()),
            created_at: format_timestamp(incident.created_at)?,
            updated_at: format_timestamp(incident.updated_at)?,
        })
    }
}

/// A status log entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLogEntryResponse {
    /// The status before the transition.
    pub previous_status: String,
    /// The status after the transition.
    pub new_status: String,
    /// When the transition was committed (RFC 3339).
    pub changed_at: String,
    /// The acting identity's id.
    pub changed_by_id: String,
    /// The acting identity's type.
    pub changed_by_type: String,
}

impl StatusLogEntryResponse {
    /// Builds the response DTO from an audit entry.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the timestamp cannot be formatted.
    pub fn from_entry(entry: &StatusLogEntry) -> Result<Self, ApiError> {
        Ok(Self {
            previous_status: entry.previous_status.as_str().to_string(),
            new_status: entry.new_status.as_str().to_string(),
            changed_at: format_timestamp(entry.changed_at)?,
            changed_by_id: entry.changed_by.id.clone(),
            changed_by_type: entry.changed_by.actor_type.clone(),
        })
    }
}

/// A notification as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResponse {
    /// The store-assigned identifier.
    pub notification_id: i64,
    /// The recipient identity.
    pub recipient_id: String,
    /// The synthesized message.
    pub message: String,
    /// The incident the message refers to.
    pub incident_id: String,
    /// Whether the recipient has read the notification.
    pub is_read: bool,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl NotificationResponse {
    /// Builds the response DTO from a persisted notification.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the notification has no assigned id or
    /// the timestamp cannot be formatted.
    pub fn from_notification(notification: &Notification) -> Result<Self, ApiError> {
        let notification_id: i64 =
            notification
                .notification_id()
                .ok_or_else(|| ApiError::Internal {
                    message: String::from("Notification response requires a persisted id"),
                })?;
        Ok(Self {
            notification_id,
            recipient_id: notification.recipient.value().to_string(),
            message: notification.message.clone(),
            incident_id: notification.incident_id.value().to_string(),
            is_read: notification.is_read,
            created_at: format_timestamp(notification.created_at)?,
        })
    }
}

/// A comment as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    /// The comment author.
    pub author_id: String,
    /// The comment text.
    pub body: String,
    /// When the comment was posted (RFC 3339).
    pub posted_at: String,
}

impl CommentResponse {
    /// Builds the response DTO from a domain comment.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the timestamp cannot be formatted.
    pub fn from_comment(comment: &Comment) -> Result<Self, ApiError> {
        Ok(Self {
            author_id: comment.author.value().to_string(),
            body: comment.body.clone(),
            posted_at: format_timestamp(comment.posted_at)?,
        })
    }
}

/// The result of an interactive geofence check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckPointResponse {
    /// The checked longitude.
    pub longitude: f64,
    /// The checked latitude.
    pub latitude: f64,
    /// True if the point lies inside the service area.
    pub inside: bool,
    /// Why the point was rejected, when it was.
    pub reason: Option<String>,
}

/// Helper: parses a media reference list from its wire form.
pub(crate) fn parse_images(values: &[String]) -> Result<Vec<MediaRef>, ApiError> {
    values
        .iter()
        .map(|value| MediaRef::new(value).map_err(crate::error::translate_domain_error))
        .collect()
}

/// Helper: wraps an optional reporter id from its wire form.
pub(crate) fn parse_reporter(value: Option<&str>) -> Option<ReporterId> {
    value.map(ReporterId::new)
}
