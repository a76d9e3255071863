// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{IncidentId, ReporterId};
use time::OffsetDateTime;

/// A message addressed to an incident's reporter about a status change.
///
/// Notifications reference their incident but do not own it. Only the
/// recipient may mark a notification read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The canonical numeric identifier assigned by the store.
    /// `None` indicates the notification has not been persisted yet.
    notification_id: Option<i64>,
    /// The reporter this notification is addressed to.
    pub recipient: ReporterId,
    /// The synthesized message text.
    pub message: String,
    /// Back-reference to the incident the status change happened on.
    pub incident_id: IncidentId,
    /// Whether the recipient has read the notification.
    pub is_read: bool,
    /// Server-assigned creation timestamp.
    pub created_at: OffsetDateTime,
}

impl Notification {
    /// Creates a new, unread, not-yet-persisted notification.
    #[must_use]
    pub const fn new(
        recipient: ReporterId,
        message: String,
        incident_id: IncidentId,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            notification_id: None,
            recipient,
            message,
            incident_id,
            is_read: false,
            created_at,
        }
    }

    /// Reconstructs a notification with its store-assigned identifier.
    #[must_use]
    pub const fn with_id(
        notification_id: i64,
        recipient: ReporterId,
        message: String,
        incident_id: IncidentId,
        is_read: bool,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            notification_id: Some(notification_id),
            recipient,
            message,
            incident_id,
            is_read,
            created_at,
        }
    }

    /// Returns the store-assigned identifier if persisted.
    #[must_use]
    pub const fn notification_id(&self) -> Option<i64> {
        self.notification_id
    }
}
