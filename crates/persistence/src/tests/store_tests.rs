// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store round-trip and transition atomicity tests.

use crate::{IncidentStore, PersistenceError};
use civic_report::{ApplyOutcome, IncidentChanges};
use civic_report_audit::StatusLog;
use civic_report_domain::{Comment, Incident, IncidentId, IncidentStatus, ReporterId};
use time::OffsetDateTime;

use super::helpers::{create_admin_actor, create_test_store, persist_test_incident};

#[test]
fn test_created_incident_round_trips() {
    let mut store: IncidentStore = create_test_store();
    let incident: Incident = persist_test_incident(&mut store, Some("citizen-1"));

    let loaded: Incident = store
        .get_incident(&incident.id)
        .expect("persisted incident must load");

    assert_eq!(loaded.id, incident.id);
    assert_eq!(loaded.category, incident.category);
    assert_eq!(loaded.description, incident.description);
    assert_eq!(loaded.status, IncidentStatus::New);
    assert_eq!(loaded.resolved_at, None);
    assert_eq!(
        loaded.reporter.as_ref().map(ReporterId::value),
        Some("citizen-1")
    );
}

#[test]
fn test_unknown_incident_returns_not_found() {
    let mut store: IncidentStore = create_test_store();
    let missing: IncidentId = IncidentId::new("no-such-incident");

    let result = store.get_incident(&missing);
    assert!(matches!(result, Err(PersistenceError::IncidentNotFound(_))));
}

#[test]
fn test_list_incidents_filters_by_status() {
    let mut store: IncidentStore = create_test_store();
    let first: Incident = persist_test_incident(&mut store, None);
    let _second: Incident = persist_test_incident(&mut store, None);

    let outcome: ApplyOutcome = store
        .transition_status(&first.id, IncidentStatus::Confirmed, create_admin_actor())
        .expect("transition must succeed");
    assert!(matches!(outcome, ApplyOutcome::Transitioned(_)));

    let confirmed: Vec<Incident> = store
        .list_incidents(Some(IncidentStatus::Confirmed))
        .expect("list must succeed");
    let fresh: Vec<Incident> = store
        .list_incidents(Some(IncidentStatus::New))
        .expect("list must succeed");
    let all: Vec<Incident> = store.list_incidents(None).expect("list must succeed");

    assert_eq!(confirmed.len(), 1);
    assert_eq!(fresh.len(), 1);
    assert_eq!(all.len(), 2);
    assert_eq!(confirmed[0].id, first.id);
}

#[test]
fn test_transition_persists_status_and_log_together() {
    let mut store: IncidentStore = create_test_store();
    let incident: Incident = persist_test_incident(&mut store, Some("citizen-2"));

    let outcome: ApplyOutcome = store
        .transition_status(&incident.id, IncidentStatus::Resolved, create_admin_actor())
        .expect("transition must succeed");

    let result = match outcome {
        ApplyOutcome::Transitioned(result) => result,
        other => panic!("Expected Transitioned, got {other:?}"),
    };

    let loaded: Incident = store
        .get_incident(&incident.id)
        .expect("incident must load");
    assert_eq!(loaded.status, IncidentStatus::Resolved);
    assert!(loaded.resolved_at.is_some());

    let log: StatusLog = store
        .list_status_log(&incident.id)
        .expect("log must load");
    assert_eq!(log.len(), 1);
    let entry = log.last().expect("one entry must exist");
    assert_eq!(entry.previous_status, IncidentStatus::New);
    assert_eq!(entry.new_status, IncidentStatus::Resolved);
    assert_eq!(entry.changed_by.id, "admin-123");
    assert_eq!(result.incident.status, IncidentStatus::Resolved);
}

#[test]
fn test_no_op_transition_writes_nothing() {
    let mut store: IncidentStore = create_test_store();
    let incident: Incident = persist_test_incident(&mut store, Some("citizen-3"));

    let outcome: ApplyOutcome = store
        .transition_status(&incident.id, IncidentStatus::New, create_admin_actor())
        .expect("no-op transition must succeed");

    assert_eq!(outcome, ApplyOutcome::NoChange);

    let log: StatusLog = store
        .list_status_log(&incident.id)
        .expect("log must load");
    assert!(log.is_empty());

    let loaded: Incident = store
        .get_incident(&incident.id)
        .expect("incident must load");
    assert_eq!(loaded.updated_at, incident.updated_at);
}

#[test]
fn test_transition_on_unknown_incident_writes_nothing() {
    let mut store: IncidentStore = create_test_store();
    let missing: IncidentId = IncidentId::new("no-such-incident");

    let result = store.transition_status(
        &missing,
        IncidentStatus::Confirmed,
        create_admin_actor(),
    );

    assert!(matches!(result, Err(PersistenceError::IncidentNotFound(_))));
    let log: StatusLog = store.list_status_log(&missing).expect("log query succeeds");
    assert!(log.is_empty());
}

#[test]
fn test_log_entries_are_returned_in_append_order() {
    let mut store: IncidentStore = create_test_store();
    let incident: Incident = persist_test_incident(&mut store, None);

    let path: [IncidentStatus; 4] = [
        IncidentStatus::UnderReview,
        IncidentStatus::Confirmed,
        IncidentStatus::Escalated,
        IncidentStatus::Resolved,
    ];
    for status in path {
        let outcome: ApplyOutcome = store
            .transition_status(&incident.id, status, create_admin_actor())
            .expect("transition must succeed");
        assert!(matches!(outcome, ApplyOutcome::Transitioned(_)));
    }

    let log: StatusLog = store
        .list_status_log(&incident.id)
        .expect("log must load");
    assert_eq!(log.len(), 4);

    let entries = log.entries();
    assert_eq!(entries[0].previous_status, IncidentStatus::New);
    assert_eq!(entries[0].new_status, IncidentStatus::UnderReview);
    assert_eq!(entries[3].previous_status, IncidentStatus::Escalated);
    assert_eq!(entries[3].new_status, IncidentStatus::Resolved);

    // Each entry chains from the previous one
    for pair in entries.windows(2) {
        assert_eq!(pair[0].new_status, pair[1].previous_status);
    }
}

#[test]
fn test_leaving_final_group_clears_resolved_at_in_storage() {
    let mut store: IncidentStore = create_test_store();
    let incident: Incident = persist_test_incident(&mut store, None);

    store
        .transition_status(&incident.id, IncidentStatus::Closed, create_admin_actor())
        .expect("transition must succeed");
    let closed: Incident = store
        .get_incident(&incident.id)
        .expect("incident must load");
    assert!(closed.resolved_at.is_some());

    store
        .transition_status(&incident.id, IncidentStatus::UnderReview, create_admin_actor())
        .expect("transition must succeed");
    let reopened: Incident = store
        .get_incident(&incident.id)
        .expect("incident must load");
    assert_eq!(reopened.resolved_at, None);
}

#[test]
fn test_edit_updates_content_but_not_lifecycle_fields() {
    let mut store: IncidentStore = create_test_store();
    let incident: Incident = persist_test_incident(&mut store, Some("citizen-4"));

    store
        .transition_status(&incident.id, IncidentStatus::Confirmed, create_admin_actor())
        .expect("transition must succeed");

    let edited: Incident = store
        .edit_incident(
            &incident.id,
            IncidentChanges {
                description: Some(String::from("The tag covers the whole wall now")),
                address: Some(String::from("Cechowa 4, Bielsko-Biała")),
                ..IncidentChanges::default()
            },
            create_admin_actor(),
        )
        .expect("edit must succeed");

    assert_eq!(edited.description, "The tag covers the whole wall now");
    assert_eq!(edited.status, IncidentStatus::Confirmed);

    let loaded: Incident = store
        .get_incident(&incident.id)
        .expect("incident must load");
    assert_eq!(loaded.description, "The tag covers the whole wall now");
    assert_eq!(loaded.address.as_deref(), Some("Cechowa 4, Bielsko-Biała"));
    assert_eq!(loaded.status, IncidentStatus::Confirmed);

    // Edits never append audit entries
    let log: StatusLog = store
        .list_status_log(&incident.id)
        .expect("log must load");
    assert_eq!(log.len(), 1);
}

#[test]
fn test_edit_rejecting_validation_leaves_row_unchanged() {
    let mut store: IncidentStore = create_test_store();
    let incident: Incident = persist_test_incident(&mut store, None);

    let result = store.edit_incident(
        &incident.id,
        IncidentChanges {
            description: Some(String::new()),
            ..IncidentChanges::default()
        },
        create_admin_actor(),
    );

    assert!(matches!(result, Err(PersistenceError::DomainRejected(_))));

    let loaded: Incident = store
        .get_incident(&incident.id)
        .expect("incident must load");
    assert_eq!(loaded.description, incident.description);
}

#[test]
fn test_comments_round_trip_in_order() {
    let mut store: IncidentStore = create_test_store();
    let incident: Incident = persist_test_incident(&mut store, Some("citizen-5"));

    for body in ["Still there", "Got worse overnight"] {
        let comment: Comment = Comment::new(
            ReporterId::new("citizen-5"),
            String::from(body),
            OffsetDateTime::now_utc(),
        )
        .expect("fixture comment must be valid");
        store
            .add_comment(&incident.id, &comment)
            .expect("comment must persist");
    }

    let comments: Vec<Comment> = store
        .list_comments(&incident.id)
        .expect("comments must load");
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].body, "Still there");
    assert_eq!(comments[1].body, "Got worse overnight");
}

#[test]
fn test_comment_on_unknown_incident_returns_not_found() {
    let mut store: IncidentStore = create_test_store();
    let comment: Comment = Comment::new(
        ReporterId::new("citizen-5"),
        String::from("Hello?"),
        OffsetDateTime::now_utc(),
    )
    .expect("fixture comment must be valid");

    let result = store.add_comment(&IncidentId::new("no-such-incident"), &comment);
    assert!(matches!(result, Err(PersistenceError::IncidentNotFound(_))));
}
