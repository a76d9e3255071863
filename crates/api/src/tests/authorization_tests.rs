// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization scenarios: administrators may mutate any incident;
//! citizens only their own.

use crate::error::ApiError;
use crate::request_response::{
    EditIncidentRequest, IncidentResponse, TransitionStatusRequest,
};
use crate::{Role, authenticate_stub, edit_incident, get_incident, transition_status};
use civic_report_geofence::ServiceArea;
use civic_report_persistence::IncidentStore;

use super::helpers::{create_fixture_incident, create_test_service_area, create_test_store};

fn citizen_transition(incident_id: &str, citizen: &str, new_status: &str) -> TransitionStatusRequest {
    TransitionStatusRequest {
        incident_id: incident_id.to_string(),
        new_status: new_status.to_string(),
        actor_id: Some(citizen.to_string()),
        actor_role: Some(String::from("citizen")),
    }
}

fn citizen_edit(incident_id: &str, citizen: &str) -> EditIncidentRequest {
    EditIncidentRequest {
        incident_id: incident_id.to_string(),
        actor_id: Some(citizen.to_string()),
        actor_role: Some(String::from("citizen")),
        description: Some(String::from("Updated description from the reporter")),
        longitude: None,
        latitude: None,
        address: None,
        images: None,
        event_date: None,
        days_of_week: None,
        time_of_day: None,
    }
}

#[test]
fn test_authenticate_stub_rejects_empty_id() {
    let result = authenticate_stub(String::new(), Role::Administrator);
    assert!(result.is_err());
}

#[test]
fn test_role_parse_accepts_known_roles() {
    assert_eq!(
        Role::parse("administrator").expect("role must parse"),
        Role::Administrator
    );
    assert_eq!(Role::parse("citizen").expect("role must parse"), Role::Citizen);
    assert!(Role::parse("moderator").is_err());
}

#[test]
fn test_reporter_may_transition_their_own_incident() {
    let mut store: IncidentStore = create_test_store();
    let area: ServiceArea = create_test_service_area();
    let created: IncidentResponse = create_fixture_incident(&mut store, &area, Some("citizen-1"));

    let response: IncidentResponse = transition_status(
        &mut store,
        citizen_transition(&created.id, "citizen-1", "closed"),
    )
    .expect("reporter may transition their own incident");

    assert_eq!(response.status, "closed");
}

#[test]
fn test_other_citizen_may_not_transition_a_foreign_incident() {
    let mut store: IncidentStore = create_test_store();
    let area: ServiceArea = create_test_service_area();
    let created: IncidentResponse = create_fixture_incident(&mut store, &area, Some("citizen-1"));

    let result = transition_status(
        &mut store,
        citizen_transition(&created.id, "citizen-2", "closed"),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));

    // And nothing changed
    let loaded: IncidentResponse =
        get_incident(&mut store, &created.id).expect("incident must load");
    assert_eq!(loaded.status, "new");
}

#[test]
fn test_citizen_may_not_mutate_an_anonymous_incident() {
    let mut store: IncidentStore = create_test_store();
    let area: ServiceArea = create_test_service_area();
    let created: IncidentResponse = create_fixture_incident(&mut store, &area, None);

    let result = transition_status(
        &mut store,
        citizen_transition(&created.id, "citizen-1", "confirmed"),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_administrator_may_transition_any_incident() {
    let mut store: IncidentStore = create_test_store();
    let area: ServiceArea = create_test_service_area();
    let created: IncidentResponse = create_fixture_incident(&mut store, &area, Some("citizen-1"));

    let request: TransitionStatusRequest = TransitionStatusRequest {
        incident_id: created.id.clone(),
        new_status: String::from("under_review"),
        actor_id: Some(String::from("admin-9")),
        actor_role: Some(String::from("administrator")),
    };
    let response: IncidentResponse =
        transition_status(&mut store, request).expect("admin transition must succeed");

    assert_eq!(response.status, "under_review");
}

#[test]
fn test_reporter_may_edit_their_own_incident() {
    let mut store: IncidentStore = create_test_store();
    let area: ServiceArea = create_test_service_area();
    let created: IncidentResponse = create_fixture_incident(&mut store, &area, Some("citizen-1"));

    let edited: IncidentResponse =
        edit_incident(&mut store, &area, citizen_edit(&created.id, "citizen-1"))
            .expect("reporter may edit their own incident");

    assert_eq!(edited.description, "Updated description from the reporter");
}

#[test]
fn test_other_citizen_may_not_edit_a_foreign_incident() {
    let mut store: IncidentStore = create_test_store();
    let area: ServiceArea = create_test_service_area();
    let created: IncidentResponse = create_fixture_incident(&mut store, &area, Some("citizen-1"));

    let result = edit_incident(&mut store, &area, citizen_edit(&created.id, "citizen-2"));

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));

    let loaded: IncidentResponse =
        get_incident(&mut store, &created.id).expect("incident must load");
    assert_eq!(loaded.description, "Graffiti on the underpass wall");
}

#[test]
fn test_unauthorized_transition_appends_no_audit_entry() {
    let mut store: IncidentStore = create_test_store();
    let area: ServiceArea = create_test_service_area();
    let created: IncidentResponse = create_fixture_incident(&mut store, &area, Some("citizen-1"));

    let result = transition_status(
        &mut store,
        citizen_transition(&created.id, "citizen-2", "rejected"),
    );
    assert!(result.is_err());

    let log = crate::list_status_log(&mut store, &created.id).expect("log must load");
    assert!(log.is_empty());
}
