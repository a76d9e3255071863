// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use civic_report_domain::IncidentStatus;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Represents the identity performing a status transition.
///
/// An actor is any identifiable entity that initiates a lifecycle change:
/// a staff administrator, the incident's own reporter, or a system process.
/// Every audit entry must carry one; an entry without attribution cannot be
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "administrator", "reporter", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// An immutable audit record of a single status transition.
///
/// Every successful, status-changing transition must produce exactly one
/// entry. Entries capture:
/// - The status before the transition (`previous_status`)
/// - The status after the transition (`new_status`)
/// - When the server committed the change (`changed_at`)
/// - Who performed it (`changed_by`, never absent)
///
/// Entries are never edited or removed once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLogEntry {
    /// The status before the transition.
    pub previous_status: IncidentStatus,
    /// The status after the transition.
    pub new_status: IncidentStatus,
    /// Server-assigned timestamp of the transition.
    pub changed_at: OffsetDateTime,
    /// The actor who performed the transition.
    pub changed_by: Actor,
}

impl StatusLogEntry {
    /// Creates a new `StatusLogEntry`.
    ///
    /// Once created, an entry is immutable. The actor parameter is required
    /// by construction; a transition whose actor is unknown must be rejected
    /// before this point.
    ///
    /// # Arguments
    ///
    /// * `previous_status` - The status before the transition
    /// * `new_status` - The status after the transition
    /// * `changed_at` - The server timestamp of the transition
    /// * `changed_by` - The actor who performed the transition
    #[must_use]
    pub const fn new(
        previous_status: IncidentStatus,
        new_status: IncidentStatus,
        changed_at: OffsetDateTime,
        changed_by: Actor,
    ) -> Self {
        Self {
            previous_status,
            new_status,
            changed_at,
            changed_by,
        }
    }
}

/// An append-only, insertion-ordered sequence of status log entries.
///
/// The log preserves the order entries were appended in; readers always see
/// the oldest entry first. There is no way to remove or reorder entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLog {
    entries: Vec<StatusLogEntry>,
}

impl StatusLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Reconstructs a log from already-ordered stored entries.
    #[must_use]
    pub const fn from_entries(entries: Vec<StatusLogEntry>) -> Self {
        Self { entries }
    }

    /// Appends an entry to the end of the log.
    pub fn append(&mut self, entry: StatusLogEntry) {
        self.entries.push(entry);
    }

    /// Returns the entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[StatusLogEntry] {
        &self.entries
    }

    /// Returns the most recently appended entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<&StatusLogEntry> {
        self.entries.last()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_actor() -> Actor {
        Actor::new(String::from("admin-7"), String::from("administrator"))
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("admin-7"), String::from("administrator"));

        assert_eq!(actor.id, "admin-7");
        assert_eq!(actor.actor_type, "administrator");
    }

    #[test]
    fn test_entry_captures_both_statuses_and_attribution() {
        let entry: StatusLogEntry = StatusLogEntry::new(
            IncidentStatus::New,
            IncidentStatus::UnderReview,
            OffsetDateTime::UNIX_EPOCH,
            test_actor(),
        );

        assert_eq!(entry.previous_status, IncidentStatus::New);
        assert_eq!(entry.new_status, IncidentStatus::UnderReview);
        assert_eq!(entry.changed_by.id, "admin-7");
    }

    #[test]
    fn test_entry_is_immutable_once_created() {
        let entry: StatusLogEntry = StatusLogEntry::new(
            IncidentStatus::Confirmed,
            IncidentStatus::Resolved,
            OffsetDateTime::UNIX_EPOCH,
            test_actor(),
        );

        // Clone to verify value semantics; fields are not mutable through
        // a shared reference.
        let cloned: StatusLogEntry = entry.clone();
        assert_eq!(entry, cloned);
    }

    #[test]
    fn test_log_preserves_append_order() {
        let mut log: StatusLog = StatusLog::new();

        log.append(StatusLogEntry::new(
            IncidentStatus::New,
            IncidentStatus::UnderReview,
            OffsetDateTime::UNIX_EPOCH,
            test_actor(),
        ));
        log.append(StatusLogEntry::new(
            IncidentStatus::UnderReview,
            IncidentStatus::Confirmed,
            OffsetDateTime::UNIX_EPOCH,
            test_actor(),
        ));
        log.append(StatusLogEntry::new(
            IncidentStatus::Confirmed,
            IncidentStatus::Resolved,
            OffsetDateTime::UNIX_EPOCH,
            test_actor(),
        ));

        let entries: &[StatusLogEntry] = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].new_status, IncidentStatus::UnderReview);
        assert_eq!(entries[1].new_status, IncidentStatus::Confirmed);
        assert_eq!(entries[2].new_status, IncidentStatus::Resolved);
    }

    #[test]
    fn test_last_returns_most_recent_entry() {
        let mut log: StatusLog = StatusLog::new();
        assert!(log.last().is_none());

        log.append(StatusLogEntry::new(
            IncidentStatus::New,
            IncidentStatus::Rejected,
            OffsetDateTime::UNIX_EPOCH,
            test_actor(),
        ));

        let last = log.last();
        assert!(last.is_some());
        assert_eq!(
            last.map(|entry| entry.new_status),
            Some(IncidentStatus::Rejected)
        );
    }

    #[test]
    fn test_empty_log_reports_empty() {
        let log: StatusLog = StatusLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn test_from_entries_preserves_stored_order() {
        let entries: Vec<StatusLogEntry> = vec![
            StatusLogEntry::new(
                IncidentStatus::New,
                IncidentStatus::Confirmed,
                OffsetDateTime::UNIX_EPOCH,
                test_actor(),
            ),
            StatusLogEntry::new(
                IncidentStatus::Confirmed,
                IncidentStatus::Closed,
                OffsetDateTime::UNIX_EPOCH,
                test_actor(),
            ),
        ];

        let log: StatusLog = StatusLog::from_entries(entries);
        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].new_status, IncidentStatus::Confirmed);
        assert_eq!(log.entries()[1].new_status, IncidentStatus::Closed);
    }
}
