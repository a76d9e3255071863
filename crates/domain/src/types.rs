// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::category::IncidentCategory;
use crate::error::DomainError;
use crate::status::{IncidentStatus, StatusCategory};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

/// Opaque incident identifier, assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncidentId {
    /// The identifier value.
    value: String,
}

impl IncidentId {
    /// Generates a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            value: Uuid::new_v4().to_string(),
        }
    }

    /// Wraps an identifier received from storage or a caller.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for IncidentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Reference to the identity that created an incident.
///
/// Incidents may be anonymous, in which case no `ReporterId` exists anywhere
/// on the incident and no notifications are ever produced for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReporterId {
    /// The identity value supplied by the identity layer.
    value: String,
}

impl ReporterId {
    /// Wraps an identity reference.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Returns the identity value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ReporterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A geographic point as (longitude, latitude).
///
/// Coordinates are validated at construction; an out-of-range value can never
/// reach the geofence check or the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    longitude: f64,
    latitude: f64,
}

impl Point {
    /// Creates a new point.
    ///
    /// # Errors
    ///
    /// Returns an error if the longitude is outside [-180, 180] or the
    /// latitude is outside [-90, 90].
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, DomainError> {
        crate::validation::validate_coordinates(longitude, latitude)?;
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Returns the longitude.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns the latitude.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }
}

/// An opaque reference to an uploaded media object.
///
/// The upload store owns the content; the incident only keeps the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    value: String,
}

impl MediaRef {
    /// Wraps a media reference returned by the upload store.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is empty.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptyMediaReference);
        }
        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Returns the reference value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Time-of-day bucket for descriptive metadata.
///
/// Purely descriptive; no lifecycle effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Returns the string representation of the bucket.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            _ => Err(DomainError::InvalidTimeOfDay(s.to_string())),
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Descriptive metadata attached to an incident.
///
/// Stored verbatim; none of it participates in lifecycle decisions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncidentMetadata {
    /// When the reported problem occurred (ISO 8601 date string, as supplied).
    pub event_date: Option<String>,
    /// Days of the week the problem recurs on, as supplied.
    pub days_of_week: Vec<String>,
    /// Time-of-day bucket the problem occurs in.
    pub time_of_day: Option<TimeOfDay>,
}

impl IncidentMetadata {
    /// Creates metadata from its parts.
    #[must_use]
    pub const fn new(
        event_date: Option<String>,
        days_of_week: Vec<String>,
        time_of_day: Option<TimeOfDay>,
    ) -> Self {
        Self {
            event_date,
            days_of_week,
            time_of_day,
        }
    }
}

/// A reporter-authored note on an incident.
///
/// Comments have no lifecycle effect; they are kept for context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// The identity that wrote the comment.
    pub author: ReporterId,
    /// The comment text.
    pub body: String,
    /// Server-assigned timestamp.
    pub posted_at: OffsetDateTime,
}

impl Comment {
    /// Creates a new comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is empty.
    pub fn new(
        author: ReporterId,
        body: String,
        posted_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        if body.trim().is_empty() {
            return Err(DomainError::EmptyCommentBody);
        }
        Ok(Self {
            author,
            body,
            posted_at,
        })
    }
}

/// A reported incident and its lifecycle state.
///
/// The status log and comments are owned by the store and surfaced through
/// their own queries; the aggregate here carries the fields the lifecycle
/// engine reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub struct Incident {
    /// Opaque identifier, immutable after creation.
    pub id: IncidentId,
    /// Category label from the closed set.
    pub category: IncidentCategory,
    /// Required description text.
    pub description: String,
    /// The reported location.
    pub location: Point,
    /// Optional human-readable address, independent of `location`.
    pub address: Option<String>,
    /// Ordered media references (0 or more).
    pub images: Vec<MediaRef>,
    /// Current lifecycle status.
    pub status: IncidentStatus,
    /// Set by the transition engine when the status enters the Final group;
    /// cleared when it leaves. Never client-supplied.
    pub resolved_at: Option<OffsetDateTime>,
    /// The creating identity, if the incident is not anonymous.
    pub reporter: Option<ReporterId>,
    /// Descriptive metadata, stored verbatim.
    pub metadata: IncidentMetadata,
    /// Server-assigned creation timestamp.
    pub created_at: OffsetDateTime,
    /// Server-assigned timestamp of the last mutation.
    pub updated_at: OffsetDateTime,
}

impl Incident {
    /// Returns the review-stage category derived from the current status.
    ///
    /// Always recomputed; there is no stored category to drift out of sync.
    #[must_use]
    pub const fn status_category(&self) -> StatusCategory {
        self.status.category()
    }
}
