// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle operations exposed by the core.
//!
//! Each operation validates its loosely typed request into domain types,
//! enforces authorization, runs the lifecycle engine through the store, and
//! translates every lower-layer error into the API contract. The
//! authoritative geofence check lives here: create and edit re-validate
//! coordinates server-side, so a bypassed client check cannot persist an
//! out-of-area incident.

use std::str::FromStr;

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AddCommentRequest, CheckPointResponse, CommentResponse, CreateIncidentRequest,
    EditIncidentRequest, IncidentResponse, NotificationResponse, StatusLogEntryResponse,
    TransitionStatusRequest, parse_images, parse_reporter,
};
use civic_report::{ApplyOutcome, IncidentChanges, open_incident};
use civic_report_domain::{
    Comment, DomainError, Incident, IncidentCategory, IncidentId, IncidentMetadata,
    IncidentStatus, MediaRef, Notification, Point, ReporterId, TimeOfDay,
};
use civic_report_geofence::{Containment, ServiceArea};
use civic_report_persistence::IncidentStore;

/// Resolves the acting identity from request fields, failing closed.
///
/// A transition or edit without a known actor must not proceed: the audit
/// trail would have nothing to attribute the change to.
fn require_actor(
    actor_id: Option<String>,
    actor_role: Option<String>,
    action: &str,
) -> Result<AuthenticatedActor, ApiError> {
    let (Some(actor_id), Some(actor_role)) = (actor_id, actor_role) else {
        return Err(translate_domain_error(DomainError::MissingActor {
            action: action.to_string(),
        }));
    };

    let role: Role = Role::parse(&actor_role)?;
    Ok(authenticate_stub(actor_id, role)?)
}

/// Creates a new incident.
///
/// The submitted point is validated against the service area before any
/// write; an out-of-area point persists nothing.
///
/// # Errors
///
/// Returns `ValidationError` for malformed fields, `GeofenceRejected` for
/// out-of-area points, or an internal error if persistence fails.
pub fn create_incident(
    store: &mut IncidentStore,
    service_area: &ServiceArea,
    request: CreateIncidentRequest,
) -> Result<IncidentResponse, ApiError> {
    let category: IncidentCategory =
        IncidentCategory::parse(&request.category).map_err(translate_domain_error)?;
    let location: Point =
        Point::new(request.longitude, request.latitude).map_err(translate_domain_error)?;

    // Authoritative write-path geofence check
    if let Containment::Outside { reason } = service_area.validate(&location) {
        return Err(ApiError::GeofenceRejected {
            longitude: request.longitude,
            latitude: request.latitude,
            reason,
        });
    }

    let images: Vec<MediaRef> = parse_images(&request.images)?;
    let time_of_day: Option<TimeOfDay> = request
        .time_of_day
        .as_deref()
        .map(TimeOfDay::from_str)
        .transpose()
        .map_err(translate_domain_error)?;
    let metadata: IncidentMetadata =
        IncidentMetadata::new(request.event_date, request.days_of_week, time_of_day);
    let reporter: Option<ReporterId> = parse_reporter(request.reporter_id.as_deref());

    let incident: Incident = open_incident(
        category,
        request.description,
        location,
        request.address,
        images,
        reporter,
        metadata,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_core_error)?;

    store.create_incident(&incident)?;

    info!(
        incident_id = %incident.id,
        category = %incident.category,
        anonymous = incident.reporter.is_none(),
        "Created incident"
    );

    IncidentResponse::from_incident(&incident)
}

/// Transitions an incident's status.
///
/// This function:
/// - Fails closed with `MissingActor` when no acting identity is supplied
/// - Rejects unrecognized status strings with `InvalidStatus` before the
///   state machine runs
/// - Verifies the actor is an administrator or the incident's reporter
/// - Runs the read-modify-write transition atomically through the store
/// - Delivers the reporter notification fire-and-forget
///
/// # Errors
///
/// Returns `MissingActor`, `InvalidStatus`, `NotFound`, or `Unauthorized`
/// per the contract; persistence faults surface as internal errors.
pub fn transition_status(
    store: &mut IncidentStore,
    request: TransitionStatusRequest,
) -> Result<IncidentResponse, ApiError> {
    let actor: AuthenticatedActor =
        require_actor(request.actor_id, request.actor_role, "transition_status")?;

    // Validate the nine-value enum at the boundary
    let new_status: IncidentStatus =
        IncidentStatus::from_str(&request.new_status).map_err(translate_domain_error)?;

    let incident_id: IncidentId = IncidentId::new(&request.incident_id);
    let incident: Incident = store.get_incident(&incident_id)?;
    AuthorizationService::authorize_transition(&actor, &incident)?;

    let outcome: ApplyOutcome =
        store.transition_status(&incident_id, new_status, actor.to_audit_actor())?;

    match outcome {
        ApplyOutcome::NoChange => {
            debug!(
                incident_id = %incident_id,
                status = %new_status,
                "Transition target equals current status; no-op"
            );
            IncidentResponse::from_incident(&incident)
        }
        ApplyOutcome::Transitioned(result) => {
            if let Some(notification) = &result.notification {
                deliver_notification(store, &incident_id, notification);
            }
            info!(
                incident_id = %incident_id,
                previous = %result.log_entry.previous_status,
                new = %result.log_entry.new_status,
                actor_id = %result.log_entry.changed_by.id,
                "Transitioned incident"
            );
            IncidentResponse::from_incident(&result.incident)
        }
        ApplyOutcome::Edited(_) => {
            unreachable!("transition_status cannot produce an edit outcome")
        }
    }
}

/// Persists a notification, logging and swallowing failures.
///
/// Dispatch is fire-and-forget relative to the committed transition: the
/// status change and audit entry stand even when this fails.
fn deliver_notification(
    store: &mut IncidentStore,
    incident_id: &IncidentId,
    notification: &Notification,
) {
    match store.insert_notification(notification) {
        Ok(persisted) => {
            debug!(
                incident_id = %incident_id,
                notification_id = ?persisted.notification_id(),
                recipient = %persisted.recipient,
                "Delivered status notification"
            );
        }
        Err(err) => {
            warn!(
                incident_id = %incident_id,
                recipient = %notification.recipient,
                error = %err,
                "Failed to deliver status notification"
            );
        }
    }
}

/// Edits an incident's descriptive fields.
///
/// A changed location is re-validated against the service area before the
/// write (the same check as creation, same implementation).
///
/// # Errors
///
/// Returns `MissingActor`, `ValidationError`, `GeofenceRejected`,
/// `Unauthorized`, or `NotFound` per the contract.
pub fn edit_incident(
    store: &mut IncidentStore,
    service_area: &ServiceArea,
    request: EditIncidentRequest,
) -> Result<IncidentResponse, ApiError> {
    let actor: AuthenticatedActor =
        require_actor(request.actor_id.clone(), request.actor_role.clone(), "edit_incident")?;

    let incident_id: IncidentId = IncidentId::new(&request.incident_id);
    let incident: Incident = store.get_incident(&incident_id)?;
    AuthorizationService::authorize_edit(&actor, &incident)?;

    let location: Option<Point> = match (request.longitude, request.latitude) {
        (Some(longitude), Some(latitude)) => {
            let point: Point =
                Point::new(longitude, latitude).map_err(translate_domain_error)?;
            // Authoritative write-path geofence check
            if let Containment::Outside { reason } = service_area.validate(&point) {
                return Err(ApiError::GeofenceRejected {
                    longitude,
                    latitude,
                    reason,
                });
            }
            Some(point)
        }
        (None, None) => None,
        _ => {
            return Err(ApiError::ValidationError {
                field: String::from("location"),
                message: String::from("longitude and latitude must be supplied together"),
            });
        }
    };

    let images: Option<Vec<MediaRef>> = match &request.images {
        Some(values) => Some(parse_images(values)?),
        None => None,
    };

    let metadata: Option<IncidentMetadata> = merge_metadata(&incident, &request)?;

    let changes: IncidentChanges = IncidentChanges {
        description: request.description,
        location,
        address: request.address,
        images,
        metadata,
    };

    let edited: Incident = store.edit_incident(&incident_id, changes, actor.to_audit_actor())?;

    info!(incident_id = %incident_id, actor_id = %actor.id, "Edited incident");

    IncidentResponse::from_incident(&edited)
}

/// Merges metadata edits over the incident's current metadata.
///
/// Returns `None` when no metadata field was supplied, so the edit leaves
/// the stored metadata untouched.
fn merge_metadata(
    incident: &Incident,
    request: &EditIncidentRequest,
) -> Result<Option<IncidentMetadata>, ApiError> {
    if request.event_date.is_none()
        && request.days_of_week.is_none()
        && request.time_of_day.is_none()
    {
        return Ok(None);
    }

    let mut metadata: IncidentMetadata = incident.metadata.clone();
    if let Some(event_date) = &request.event_date {
        metadata.event_date = Some(event_date.clone());
    }
    if let Some(days_of_week) = &request.days_of_week {
        metadata.days_of_week = days_of_week.clone();
    }
    if let Some(time_of_day) = &request.time_of_day {
        metadata.time_of_day = Some(
            TimeOfDay::from_str(time_of_day).map_err(translate_domain_error)?,
        );
    }
    Ok(Some(metadata))
}

/// Loads one incident.
///
/// This is a read-only operation that requires no authorization.
///
/// # Errors
///
/// Returns `NotFound` if the incident does not exist.
pub fn get_incident(
    store: &mut IncidentStore,
    incident_id: &str,
) -> Result<IncidentResponse, ApiError> {
    let incident: Incident = store.get_incident(&IncidentId::new(incident_id))?;
    IncidentResponse::from_incident(&incident)
}

/// Lists incidents, optionally filtered by status, newest first.
///
/// This is a read-only operation that requires no authorization.
///
/// # Errors
///
/// Returns `InvalidStatus` for an unrecognized filter value.
pub fn list_incidents(
    store: &mut IncidentStore,
    status: Option<&str>,
) -> Result<Vec<IncidentResponse>, ApiError> {
    let status: Option<IncidentStatus> = status
        .map(IncidentStatus::from_str)
        .transpose()
        .map_err(translate_domain_error)?;

    let incidents: Vec<Incident> = store.list_incidents(status)?;
    incidents
        .iter()
        .map(IncidentResponse::from_incident)
        .collect()
}

/// Loads the status log for an incident, oldest entry first.
///
/// # Errors
///
/// Returns `NotFound` if the incident does not exist.
pub fn list_status_log(
    store: &mut IncidentStore,
    incident_id: &str,
) -> Result<Vec<StatusLogEntryResponse>, ApiError> {
    let incident_id: IncidentId = IncidentId::new(incident_id);
    // Surface unknown incidents as NotFound rather than an empty log
    let _: Incident = store.get_incident(&incident_id)?;

    let log = store.list_status_log(&incident_id)?;
    log.entries()
        .iter()
        .map(StatusLogEntryResponse::from_entry)
        .collect()
}

/// Lists all notifications addressed to a recipient, oldest first.
///
/// # Errors
///
/// Returns an internal error if the query fails.
pub fn list_notifications(
    store: &mut IncidentStore,
    recipient: &str,
) -> Result<Vec<NotificationResponse>, ApiError> {
    let notifications: Vec<Notification> =
        store.list_notifications(&ReporterId::new(recipient))?;
    notifications
        .iter()
        .map(NotificationResponse::from_notification)
        .collect()
}

/// Marks a notification read on behalf of its recipient.
///
/// Only the recipient may flip the flag.
///
/// # Errors
///
/// Returns `NotFound` for an unknown notification and `Unauthorized` when
/// the caller is not the recipient.
pub fn mark_notification_read(
    store: &mut IncidentStore,
    notification_id: i64,
    recipient: &str,
) -> Result<NotificationResponse, ApiError> {
    let notification: Notification = store.get_notification(notification_id)?;

    if notification.recipient.value() != recipient {
        return Err(ApiError::Unauthorized {
            action: String::from("mark_notification_read"),
            required: String::from("being the notification's recipient"),
        });
    }

    let updated: Notification = store.mark_notification_read(notification_id)?;
    NotificationResponse::from_notification(&updated)
}

/// Adds a reporter comment to an incident.
///
/// # Errors
///
/// Returns `MissingActor` without an author, `ValidationError` for an empty
/// body, or `NotFound` for an unknown incident.
pub fn add_comment(
    store: &mut IncidentStore,
    request: AddCommentRequest,
) -> Result<CommentResponse, ApiError> {
    let Some(author_id) = request.author_id else {
        return Err(translate_domain_error(DomainError::MissingActor {
            action: String::from("add_comment"),
        }));
    };

    let comment: Comment = Comment::new(
        ReporterId::new(&author_id),
        request.body,
        OffsetDateTime::now_utc(),
    )
    .map_err(translate_domain_error)?;

    store.add_comment(&IncidentId::new(&request.incident_id), &comment)?;
    CommentResponse::from_comment(&comment)
}

/// Lists all comments on an incident, oldest first.
///
/// # Errors
///
/// Returns `NotFound` if the incident does not exist.
pub fn list_comments(
    store: &mut IncidentStore,
    incident_id: &str,
) -> Result<Vec<CommentResponse>, ApiError> {
    let incident_id: IncidentId = IncidentId::new(incident_id);
    let _: Incident = store.get_incident(&incident_id)?;

    let comments: Vec<Comment> = store.list_comments(&incident_id)?;
    comments.iter().map(CommentResponse::from_comment).collect()
}

/// Interactive geofence check for a candidate coordinate.
///
/// This is the fast-feedback call site; it shares the single containment
/// implementation with the write path, so the two can never disagree.
///
/// # Errors
///
/// Returns `ValidationError` for out-of-range coordinates.
pub fn check_point(
    service_area: &ServiceArea,
    longitude: f64,
    latitude: f64,
) -> Result<CheckPointResponse, ApiError> {
    let point: Point = Point::new(longitude, latitude).map_err(translate_domain_error)?;

    match service_area.validate(&point) {
        Containment::Inside => Ok(CheckPointResponse {
            longitude,
            latitude,
            inside: true,
            reason: None,
        }),
        Containment::Outside { reason } => Ok(CheckPointResponse {
            longitude,
            latitude,
            inside: false,
            reason: Some(reason),
        }),
    }
}
