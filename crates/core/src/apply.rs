// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, IncidentChanges};
use crate::error::CoreError;
use crate::notify;
use crate::result::{ApplyOutcome, TransitionResult};
use civic_report_audit::{Actor, StatusLogEntry};
use civic_report_domain::{
    Incident, IncidentCategory, IncidentId, IncidentMetadata, IncidentStatus, MediaRef, Point,
    ReporterId, validate_description,
};
use time::OffsetDateTime;

/// Opens a new incident after field validation.
///
/// The incident starts in status `New` with an empty status log and no
/// `resolved_at` timestamp. Geofence validation of `location` is the caller's
/// responsibility and must happen before this point.
///
/// # Arguments
///
/// * `category` - Category from the closed label set
/// * `description` - Required description text
/// * `location` - The already-validated, in-area coordinate
/// * `address` - Optional human-readable address
/// * `images` - Ordered media references
/// * `reporter` - The creating identity, absent for anonymous reports
/// * `metadata` - Descriptive metadata, stored verbatim
/// * `now` - The server clock
///
/// # Errors
///
/// Returns an error if the description is empty or exceeds the length bound.
#[allow(clippy::too_many_arguments)]
pub fn open_incident(
    category: IncidentCategory,
    description: String,
    location: Point,
    address: Option<String>,
    images: Vec<MediaRef>,
    reporter: Option<ReporterId>,
    metadata: IncidentMetadata,
    now: OffsetDateTime,
) -> Result<Incident, CoreError> {
    validate_description(&description)?;

    Ok(Incident {
        id: IncidentId::generate(),
        category,
        description,
        location,
        address,
        images,
        status: IncidentStatus::New,
        resolved_at: None,
        reporter,
        metadata,
        created_at: now,
        updated_at: now,
    })
}

/// Applies a command to an incident, producing the outcome without touching
/// any store.
///
/// This function is pure: the clock is an argument and the incident is taken
/// by reference. Persistence decides how to commit the outcome (the status
/// update and the log entry are one failure unit).
///
/// Transition semantics:
/// - Any status may move to any other status; there are no forbidden edges.
/// - A transition to the current status is an idempotent no-op.
/// - `resolved_at` is stamped with `now` whenever the target status is in the
///   Final group (re-stamped on Final-to-Final moves) and cleared whenever
///   the target is not.
/// - Every status change yields exactly one log entry attributed to `actor`.
/// - A notification is synthesized when the incident has a reporter.
///
/// # Arguments
///
/// * `incident` - The current incident (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `now` - The server clock
///
/// # Errors
///
/// Returns an error if an edit violates field validation rules.
pub fn apply(
    incident: &Incident,
    command: Command,
    actor: Actor,
    now: OffsetDateTime,
) -> Result<ApplyOutcome, CoreError> {
    match command {
        Command::TransitionStatus { new_status } => {
            // Idempotent no-op: no mutation, no audit entry, no notification
            if new_status == incident.status {
                return Ok(ApplyOutcome::NoChange);
            }

            let mut updated: Incident = incident.clone();
            updated.status = new_status;
            updated.resolved_at = if new_status.is_final() {
                Some(now)
            } else {
                None
            };
            updated.updated_at = now;

            let log_entry: StatusLogEntry =
                StatusLogEntry::new(incident.status, new_status, now, actor);

            let notification = notify::dispatch(&updated, new_status, now);

            Ok(ApplyOutcome::Transitioned(TransitionResult {
                incident: updated,
                log_entry,
                notification,
            }))
        }
        Command::Edit { changes } => {
            let updated: Incident = apply_changes(incident, changes, now)?;
            Ok(ApplyOutcome::Edited(updated))
        }
    }
}

/// Applies owner edits to the incident's descriptive fields.
///
/// Status, `resolved_at`, and the status log are never edit targets.
fn apply_changes(
    incident: &Incident,
    changes: IncidentChanges,
    now: OffsetDateTime,
) -> Result<Incident, CoreError> {
    let mut updated: Incident = incident.clone();

    if let Some(description) = changes.description {
        validate_description(&description)?;
        updated.description = description;
    }
    if let Some(location) = changes.location {
        updated.location = location;
    }
    if let Some(address) = changes.address {
        updated.address = Some(address);
    }
    if let Some(images) = changes.images {
        updated.images = images;
    }
    if let Some(metadata) = changes.metadata {
        updated.metadata = metadata;
    }
    updated.updated_at = now;

    Ok(updated)
}
