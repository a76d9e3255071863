// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs bridging the diesel schema and the domain types.
//!
//! Stored strings are trusted to have been written by this crate; a row that
//! fails to parse back into domain types is reported as a serialization
//! error, not a domain violation.

use std::str::FromStr;

use diesel::prelude::*;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::{comments, incidents, notifications, status_logs};
use crate::error::PersistenceError;
use civic_report_audit::{Actor, StatusLogEntry};
use civic_report_domain::{
    Comment, Incident, IncidentCategory, IncidentId, IncidentMetadata, IncidentStatus, MediaRef,
    Notification, Point, ReporterId, TimeOfDay,
};

/// Formats a timestamp for storage (RFC 3339 `TEXT`).
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(ts: OffsetDateTime) -> Result<String, PersistenceError> {
    ts.format(&Rfc3339).map_err(|e| {
        PersistenceError::SerializationError(format!("Failed to format timestamp: {e}"))
    })
}

/// Parses a stored RFC 3339 timestamp.
///
/// # Errors
///
/// Returns an error if the stored value is not valid RFC 3339.
pub fn parse_timestamp(s: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(s, &Rfc3339).map_err(|e| {
        PersistenceError::SerializationError(format!("Failed to parse timestamp '{s}': {e}"))
    })
}

/// A full incident row as stored.
#[derive(Debug, Clone, Queryable)]
pub struct IncidentRow {
    pub id: String,
    pub category: String,
    pub description: String,
    pub longitude: f64,
    pub latitude: f64,
    pub address: Option<String>,
    pub images_json: String,
    pub status: String,
    pub resolved_at: Option<String>,
    pub reporter_id: Option<String>,
    pub event_date: Option<String>,
    pub days_of_week_json: String,
    pub time_of_day: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl IncidentRow {
    /// Converts the row back into the domain aggregate.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if any stored value fails to parse.
    pub fn into_domain(self) -> Result<Incident, PersistenceError> {
        let category: IncidentCategory = IncidentCategory::parse(&self.category)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let status: IncidentStatus = IncidentStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let location: Point = Point::new(self.longitude, self.latitude)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        let image_values: Vec<String> = serde_json::from_str(&self.images_json)?;
        let images: Vec<MediaRef> = image_values
            .iter()
            .map(|value| {
                MediaRef::new(value)
                    .map_err(|e| PersistenceError::SerializationError(e.to_string()))
            })
            .collect::<Result<Vec<MediaRef>, PersistenceError>>()?;

        let days_of_week: Vec<String> = serde_json::from_str(&self.days_of_week_json)?;
        let time_of_day: Option<TimeOfDay> = self
            .time_of_day
            .as_deref()
            .map(|value| {
                TimeOfDay::from_str(value)
                    .map_err(|e| PersistenceError::SerializationError(e.to_string()))
            })
            .transpose()?;

        let resolved_at: Option<OffsetDateTime> = self
            .resolved_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;

        Ok(Incident {
            id: IncidentId::new(&self.id),
            category,
            description: self.description,
            location,
            address: self.address,
            images,
            status,
            resolved_at,
            reporter: self.reporter_id.as_deref().map(ReporterId::new),
            metadata: IncidentMetadata::new(self.event_date, days_of_week, time_of_day),
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Insertable incident row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = incidents)]
pub struct NewIncidentRow {
    pub id: String,
    pub category: String,
    pub description: String,
    pub longitude: f64,
    pub latitude: f64,
    pub address: Option<String>,
    pub images_json: String,
    pub status: String,
    pub resolved_at: Option<String>,
    pub reporter_id: Option<String>,
    pub event_date: Option<String>,
    pub days_of_week_json: String,
    pub time_of_day: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl NewIncidentRow {
    /// Builds an insertable row from the domain aggregate.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp or JSON column cannot be serialized.
    pub fn from_domain(incident: &Incident) -> Result<Self, PersistenceError> {
        Ok(Self {
            id: incident.id.value().to_string(),
            category: incident.category.as_str().to_string(),
            description: incident.description.clone(),
            longitude: incident.location.longitude(),
            latitude: incident.location.latitude(),
            address: incident.address.clone(),
            images_json: serialize_images(&incident.images)?,
            status: incident.status.as_str().to_string(),
            resolved_at: incident
                .resolved_at
                .map(format_timestamp)
                .transpose()?,
            reporter_id: incident
                .reporter
                .as_ref()
                .map(|reporter| reporter.value().to_string()),
            event_date: incident.metadata.event_date.clone(),
            days_of_week_json: serde_json::to_string(&incident.metadata.days_of_week)?,
            time_of_day: incident
                .metadata
                .time_of_day
                .map(|bucket| bucket.as_str().to_string()),
            created_at: format_timestamp(incident.created_at)?,
            updated_at: format_timestamp(incident.updated_at)?,
        })
    }
}

/// Serializes the ordered media reference list into its JSON column form.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn serialize_images(images: &[MediaRef]) -> Result<String, PersistenceError> {
    let values: Vec<&str> = images.iter().map(MediaRef::value).collect();
    Ok(serde_json::to_string(&values)?)
}

/// A status log row as stored.
#[derive(Debug, Clone, Queryable)]
pub struct StatusLogRow {
    pub log_id: i64,
    pub incident_id: String,
    pub previous_status: String,
    pub new_status: String,
    pub changed_at: String,
    pub changed_by_id: String,
    pub changed_by_type: String,
}

impl StatusLogRow {
    /// Converts the row back into an audit entry.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a stored status or timestamp fails
    /// to parse.
    pub fn into_domain(self) -> Result<StatusLogEntry, PersistenceError> {
        let previous_status: IncidentStatus = IncidentStatus::from_str(&self.previous_status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let new_status: IncidentStatus = IncidentStatus::from_str(&self.new_status)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        Ok(StatusLogEntry::new(
            previous_status,
            new_status,
            parse_timestamp(&self.changed_at)?,
            Actor::new(self.changed_by_id, self.changed_by_type),
        ))
    }
}

/// Insertable status log row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = status_logs)]
pub struct NewStatusLogRow {
    pub incident_id: String,
    pub previous_status: String,
    pub new_status: String,
    pub changed_at: String,
    pub changed_by_id: String,
    pub changed_by_type: String,
}

impl NewStatusLogRow {
    /// Builds an insertable row from an audit entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted.
    pub fn from_domain(
        incident_id: &IncidentId,
        entry: &StatusLogEntry,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            incident_id: incident_id.value().to_string(),
            previous_status: entry.previous_status.as_str().to_string(),
            new_status: entry.new_status.as_str().to_string(),
            changed_at: format_timestamp(entry.changed_at)?,
            changed_by_id: entry.changed_by.id.clone(),
            changed_by_type: entry.changed_by.actor_type.clone(),
        })
    }
}

/// A notification row as stored.
#[derive(Debug, Clone, Queryable)]
pub struct NotificationRow {
    pub notification_id: i64,
    pub recipient_id: String,
    pub message: String,
    pub incident_id: String,
    pub is_read: bool,
    pub created_at: String,
}

impl NotificationRow {
    /// Converts the row back into the domain notification.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the stored timestamp fails to parse.
    pub fn into_domain(self) -> Result<Notification, PersistenceError> {
        Ok(Notification::with_id(
            self.notification_id,
            ReporterId::new(&self.recipient_id),
            self.message,
            IncidentId::new(&self.incident_id),
            self.is_read,
            parse_timestamp(&self.created_at)?,
        ))
    }
}

/// Insertable notification row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub struct NewNotificationRow {
    pub recipient_id: String,
    pub message: String,
    pub incident_id: String,
    pub is_read: bool,
    pub created_at: String,
}

impl NewNotificationRow {
    /// Builds an insertable row from the domain notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted.
    pub fn from_domain(notification: &Notification) -> Result<Self, PersistenceError> {
        Ok(Self {
            recipient_id: notification.recipient.value().to_string(),
            message: notification.message.clone(),
            incident_id: notification.incident_id.value().to_string(),
            is_read: notification.is_read,
            created_at: format_timestamp(notification.created_at)?,
        })
    }
}

/// A comment row as stored.
#[derive(Debug, Clone, Queryable)]
pub struct CommentRow {
    pub comment_id: i64,
    pub incident_id: String,
    pub author_id: String,
    pub body: String,
    pub posted_at: String,
}

impl CommentRow {
    /// Converts the row back into a domain comment.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if stored data fails to parse.
    pub fn into_domain(self) -> Result<Comment, PersistenceError> {
        Comment::new(
            ReporterId::new(&self.author_id),
            self.body,
            parse_timestamp(&self.posted_at)?,
        )
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
    }
}

/// Insertable comment row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow {
    pub incident_id: String,
    pub author_id: String,
    pub body: String,
    pub posted_at: String,
}

impl NewCommentRow {
    /// Builds an insertable row from a domain comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted.
    pub fn from_domain(
        incident_id: &IncidentId,
        comment: &Comment,
    ) -> Result<Self, PersistenceError> {
        Ok(Self {
            incident_id: incident_id.value().to_string(),
            author_id: comment.author.value().to_string(),
            body: comment.body.clone(),
            posted_at: format_timestamp(comment.posted_at)?,
        })
    }
}
