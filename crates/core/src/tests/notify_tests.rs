// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for notification synthesis: one notification per status-changing
//! transition on reported incidents, none for anonymous incidents.

use crate::result::ApplyOutcome;
use crate::{Command, apply, dispatch};
use civic_report_domain::{Incident, IncidentStatus, Notification};

use super::helpers::{create_test_actor, create_test_incident, test_clock};

#[test]
fn test_reported_incident_produces_one_notification() {
    let incident: Incident = create_test_incident(IncidentStatus::New, Some("citizen-5"));

    let notification: Option<Notification> =
        dispatch(&incident, IncidentStatus::Confirmed, test_clock());

    assert!(notification.is_some());
}

#[test]
fn test_anonymous_incident_produces_no_notification() {
    let incident: Incident = create_test_incident(IncidentStatus::Confirmed, None);

    let notification: Option<Notification> =
        dispatch(&incident, IncidentStatus::Closed, test_clock());

    assert!(notification.is_none());
}

#[test]
fn test_message_references_category_and_new_status() {
    let incident: Incident = create_test_incident(IncidentStatus::New, Some("citizen-5"));

    let notification: Notification = dispatch(&incident, IncidentStatus::Resolved, test_clock())
        .expect("reported incident must produce a notification");

    assert_eq!(
        notification.message,
        "Your incident of category Vandalism was updated to status resolved"
    );
}

#[test]
fn test_notification_is_addressed_to_the_reporter() {
    let incident: Incident = create_test_incident(IncidentStatus::New, Some("citizen-5"));

    let notification: Notification = dispatch(&incident, IncidentStatus::Rejected, test_clock())
        .expect("reported incident must produce a notification");

    assert_eq!(notification.recipient.value(), "citizen-5");
    assert_eq!(notification.incident_id, incident.id);
    assert!(!notification.is_read);
}

#[test]
fn test_transition_outcome_carries_the_notification() {
    let incident: Incident = create_test_incident(IncidentStatus::New, Some("citizen-8"));

    let outcome: ApplyOutcome = apply(
        &incident,
        Command::TransitionStatus {
            new_status: IncidentStatus::UnderReview,
        },
        create_test_actor(),
        test_clock(),
    )
    .expect("transition cannot fail");

    match outcome {
        ApplyOutcome::Transitioned(result) => {
            let notification: Notification = result
                .notification
                .expect("reported incident must produce a notification");
            assert!(notification.message.contains("under_review"));
        }
        other => panic!("Expected Transitioned, got {other:?}"),
    }
}

#[test]
fn test_anonymous_transition_outcome_carries_none() {
    let incident: Incident = create_test_incident(IncidentStatus::Confirmed, None);

    let outcome: ApplyOutcome = apply(
        &incident,
        Command::TransitionStatus {
            new_status: IncidentStatus::Closed,
        },
        create_test_actor(),
        test_clock(),
    )
    .expect("transition cannot fail");

    match outcome {
        ApplyOutcome::Transitioned(result) => assert!(result.notification.is_none()),
        other => panic!("Expected Transitioned, got {other:?}"),
    }
}
