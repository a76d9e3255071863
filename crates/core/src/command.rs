// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use civic_report_domain::{IncidentMetadata, IncidentStatus, MediaRef, Point};

/// Owner-editable fields of an incident.
///
/// `None` means "leave the field unchanged". Status, `resolved_at`, and the
/// status log are never edit targets; they belong to the transition engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncidentChanges {
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement location. Callers must geofence-validate before applying.
    pub location: Option<Point>,
    /// Replacement human-readable address.
    pub address: Option<String>,
    /// Replacement media reference list.
    pub images: Option<Vec<MediaRef>>,
    /// Replacement descriptive metadata.
    pub metadata: Option<IncidentMetadata>,
}

impl IncidentChanges {
    /// Returns true if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.location.is_none()
            && self.address.is_none()
            && self.images.is_none()
            && self.metadata.is_none()
    }
}

/// A command represents caller intent as data only.
///
/// Commands are the only way to request a mutation of an existing incident.
/// Incident creation has its own entry point (`open_incident`) because no
/// prior state exists to apply a command to.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Move the incident to a new lifecycle status.
    TransitionStatus {
        /// The target status. Any of the nine values is a legal target;
        /// the workflow has no forbidden edges.
        new_status: IncidentStatus,
    },
    /// Apply owner edits to the incident's descriptive fields.
    Edit {
        /// The fields to change.
        changes: IncidentChanges,
    },
}
