// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Civic Incident Reporting System.
//!
//! This crate provides `SQLite` persistence for incidents, their status
//! logs, notifications, and comments. It is built on Diesel.
//!
//! ## Atomicity
//!
//! A status transition is a read-modify-write: read the current status (to
//! record `previous_status`), run the lifecycle engine, write the new status,
//! and append the log entry. [`IncidentStore::transition_status`] runs that
//! whole sequence inside a single `immediate_transaction`, so concurrent
//! transitions on the same incident serialize and each one appends its own
//! audit entry. The status change and its log entry commit together or not
//! at all.
//!
//! Notifications deliberately live outside that transaction: delivery is
//! fire-and-forget relative to a committed transition.
//!
//! ## Retries
//!
//! Idempotent reads are retried a bounded number of times on transient lock
//! errors. Writes are never blindly retried; a retried write could append a
//! duplicate audit entry.
//!
//! ## Testing
//!
//! `new_in_memory()` hands out uniquely named shared-cache in-memory
//! databases so tests are isolated and infrastructure-free.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use civic_report::{ApplyOutcome, Command, CoreError, IncidentChanges};
use civic_report_audit::{Actor, StatusLog};
use civic_report_domain::{
    Comment, Incident, IncidentId, IncidentStatus, Notification, ReporterId,
};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, keeping
/// concurrently running tests isolated from each other.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Maximum attempts for an idempotent read hitting transient lock errors.
const READ_RETRY_ATTEMPTS: usize = 3;

/// `SQLite`-backed store for incidents and their lifecycle records.
pub struct IncidentStore {
    conn: SqliteConnection,
}

impl IncidentStore {
    /// Creates a store backed by a unique in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema initialization fails.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let url: String = format!("file:civic_report_mem_{id}?mode=memory&cache=shared");
        let conn: SqliteConnection = SqliteConnection::establish(&url)?;
        Self::initialize(conn)
    }

    /// Creates a store backed by a database file.
    ///
    /// The schema is installed if missing; an existing database is reused.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema initialization fails.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let url: String = path.as_ref().display().to_string();
        let conn: SqliteConnection = SqliteConnection::establish(&url)?;
        Self::initialize(conn)
    }

    fn initialize(mut conn: SqliteConnection) -> Result<Self, PersistenceError> {
        sqlite::initialize_schema(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;
        Ok(Self { conn })
    }

    /// Persists a freshly opened incident.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails.
    pub fn create_incident(&mut self, incident: &Incident) -> Result<(), PersistenceError> {
        mutations::incident::insert(&mut self.conn, incident)?;
        info!(incident_id = %incident.id, status = %incident.status, "Persisted new incident");
        Ok(())
    }

    /// Loads one incident by id.
    ///
    /// # Errors
    ///
    /// Returns `IncidentNotFound` if no such incident exists.
    pub fn get_incident(&mut self, incident_id: &IncidentId) -> Result<Incident, PersistenceError> {
        self.read_with_retry(|conn| queries::incident::find_by_id(conn, incident_id))
    }

    /// Lists incidents, optionally filtered by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_incidents(
        &mut self,
        status: Option<IncidentStatus>,
    ) -> Result<Vec<Incident>, PersistenceError> {
        self.read_with_retry(|conn| queries::incident::list(conn, status))
    }

    /// Applies a status transition atomically.
    ///
    /// The read of the current status, the lifecycle engine, the status
    /// write, and the audit append all run inside one immediate transaction.
    /// The synthesized notification (if any) is returned to the caller
    /// unpersisted; delivering it is a separate, non-fatal step
    /// ([`Self::insert_notification`]).
    ///
    /// # Arguments
    ///
    /// * `incident_id` - The incident to transition
    /// * `new_status` - The target status
    /// * `actor` - The identity performing the change
    ///
    /// # Errors
    ///
    /// Returns `IncidentNotFound` if the incident does not exist, or a
    /// database error if a write fails (in which case nothing is committed).
    pub fn transition_status(
        &mut self,
        incident_id: &IncidentId,
        new_status: IncidentStatus,
        actor: Actor,
    ) -> Result<ApplyOutcome, PersistenceError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();

        let outcome: ApplyOutcome = self.conn.immediate_transaction(|conn| {
            let incident: Incident = queries::incident::find_by_id(conn, incident_id)?;

            let outcome: ApplyOutcome = civic_report::apply(
                &incident,
                Command::TransitionStatus { new_status },
                actor,
                now,
            )
            .map_err(|err| match err {
                CoreError::DomainViolation(domain_err) => {
                    PersistenceError::DomainRejected(domain_err)
                }
            })?;

            match &outcome {
                ApplyOutcome::NoChange => {
                    debug!(incident_id = %incident_id, status = %new_status, "Transition is a no-op");
                }
                ApplyOutcome::Transitioned(result) => {
                    mutations::incident::update_status(conn, &result.incident)?;
                    mutations::status_log::append(conn, incident_id, &result.log_entry)?;
                    debug!(
                        incident_id = %incident_id,
                        previous = %result.log_entry.previous_status,
                        new = %result.log_entry.new_status,
                        "Wrote status and appended log entry"
                    );
                }
                ApplyOutcome::Edited(_) => {
                    unreachable!("TransitionStatus command cannot produce an edit outcome")
                }
            }

            Ok::<_, PersistenceError>(outcome)
        })?;

        if let ApplyOutcome::Transitioned(result) = &outcome {
            info!(
                incident_id = %incident_id,
                new_status = %result.incident.status,
                "Committed status transition"
            );
        }

        Ok(outcome)
    }

    /// Applies owner edits atomically and returns the updated incident.
    ///
    /// Geofence validation of a changed location is the caller's
    /// responsibility and must happen before this point.
    ///
    /// # Errors
    ///
    /// Returns `IncidentNotFound` if the incident does not exist,
    /// `DomainRejected` if a changed field fails validation, or a database
    /// error if the write fails.
    pub fn edit_incident(
        &mut self,
        incident_id: &IncidentId,
        changes: IncidentChanges,
        actor: Actor,
    ) -> Result<Incident, PersistenceError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();

        self.conn.immediate_transaction(|conn| {
            let incident: Incident = queries::incident::find_by_id(conn, incident_id)?;

            let outcome: ApplyOutcome =
                civic_report::apply(&incident, Command::Edit { changes }, actor, now).map_err(
                    |err| match err {
                        CoreError::DomainViolation(domain_err) => {
                            PersistenceError::DomainRejected(domain_err)
                        }
                    },
                )?;

            match outcome {
                ApplyOutcome::Edited(edited) => {
                    mutations::incident::update_content(conn, &edited)?;
                    debug!(incident_id = %incident_id, "Wrote incident edits");
                    Ok(edited)
                }
                ApplyOutcome::NoChange | ApplyOutcome::Transitioned(_) => {
                    unreachable!("Edit command cannot produce a transition outcome")
                }
            }
        })
    }

    /// Loads the status log for an incident in append order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_status_log(
        &mut self,
        incident_id: &IncidentId,
    ) -> Result<StatusLog, PersistenceError> {
        self.read_with_retry(|conn| queries::status_log::for_incident(conn, incident_id))
    }

    /// Persists a notification and returns it with its assigned id.
    ///
    /// Callers treat a failure here as non-fatal for the surrounding
    /// transition (logged and swallowed at the API boundary).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails.
    pub fn insert_notification(
        &mut self,
        notification: &Notification,
    ) -> Result<Notification, PersistenceError> {
        let notification_id: i64 =
            mutations::notification::insert(&mut self.conn, notification)?;
        debug!(notification_id, recipient = %notification.recipient, "Persisted notification");

        Ok(Notification::with_id(
            notification_id,
            notification.recipient.clone(),
            notification.message.clone(),
            notification.incident_id.clone(),
            notification.is_read,
            notification.created_at,
        ))
    }

    /// Loads one notification by id.
    ///
    /// # Errors
    ///
    /// Returns `NotificationNotFound` if no such notification exists.
    pub fn get_notification(
        &mut self,
        notification_id: i64,
    ) -> Result<Notification, PersistenceError> {
        self.read_with_retry(|conn| queries::notification::find_by_id(conn, notification_id))
    }

    /// Lists all notifications addressed to a recipient, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_notifications(
        &mut self,
        recipient: &ReporterId,
    ) -> Result<Vec<Notification>, PersistenceError> {
        self.read_with_retry(|conn| queries::notification::for_recipient(conn, recipient))
    }

    /// Marks a notification read and returns the updated notification.
    ///
    /// Recipient authorization happens at the API boundary.
    ///
    /// # Errors
    ///
    /// Returns `NotificationNotFound` if no such notification exists.
    pub fn mark_notification_read(
        &mut self,
        notification_id: i64,
    ) -> Result<Notification, PersistenceError> {
        mutations::notification::mark_read(&mut self.conn, notification_id)?;
        queries::notification::find_by_id(&mut self.conn, notification_id)
    }

    /// Appends a comment to an incident.
    ///
    /// # Errors
    ///
    /// Returns `IncidentNotFound` if the incident does not exist, or an
    /// error if the insert fails.
    pub fn add_comment(
        &mut self,
        incident_id: &IncidentId,
        comment: &Comment,
    ) -> Result<(), PersistenceError> {
        // Surface a typed not-found instead of a bare FK violation
        let _: Incident = queries::incident::find_by_id(&mut self.conn, incident_id)?;
        mutations::comment::insert(&mut self.conn, incident_id, comment)
    }

    /// Lists all comments on an incident, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_comments(
        &mut self,
        incident_id: &IncidentId,
    ) -> Result<Vec<Comment>, PersistenceError> {
        self.read_with_retry(|conn| queries::comment::for_incident(conn, incident_id))
    }

    /// Runs an idempotent read, retrying on transient lock errors.
    ///
    /// Bounded to [`READ_RETRY_ATTEMPTS`] attempts; only reads go through
    /// this path.
    fn read_with_retry<T>(
        &mut self,
        op: impl Fn(&mut SqliteConnection) -> Result<T, PersistenceError>,
    ) -> Result<T, PersistenceError> {
        let mut attempt: usize = 1;
        loop {
            match op(&mut self.conn) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < READ_RETRY_ATTEMPTS => {
                    warn!(attempt, error = %err, "Transient read failure, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
