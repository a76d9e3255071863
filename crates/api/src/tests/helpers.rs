// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request_response::{CreateIncidentRequest, IncidentResponse, TransitionStatusRequest};
use crate::{create_incident, transition_status};
use civic_report_geofence::ServiceArea;
use civic_report_persistence::IncidentStore;

/// Rough outline of the Bielsko-Biała municipal boundary used across the
/// API scenario tests; the city center at (19.05, 49.82) is inside.
const BIELSKO_BIALA: &str = r#"{
    "type": "Polygon",
    "coordinates": [[
        [18.93, 49.80],
        [18.98, 49.74],
        [19.10, 49.74],
        [19.16, 49.80],
        [19.10, 49.90],
        [18.97, 49.90],
        [18.93, 49.80]
    ]]
}"#;

pub fn create_test_store() -> IncidentStore {
    IncidentStore::new_in_memory().expect("in-memory store must initialize")
}

pub fn create_test_service_area() -> ServiceArea {
    ServiceArea::from_geojson_str("Bielsko-Biała", BIELSKO_BIALA)
        .expect("fixture boundary must parse")
}

pub fn create_valid_request(reporter: Option<&str>) -> CreateIncidentRequest {
    CreateIncidentRequest {
        category: String::from("vandalism"),
        description: String::from("Graffiti on the underpass wall"),
        longitude: 19.05,
        latitude: 49.82,
        address: Some(String::from("3 Maja 12, Bielsko-Biała")),
        images: Vec::new(),
        reporter_id: reporter.map(String::from),
        event_date: None,
        days_of_week: Vec::new(),
        time_of_day: None,
    }
}

/// Creates a fixture incident through the API and returns the response.
pub fn create_fixture_incident(
    store: &mut IncidentStore,
    service_area: &ServiceArea,
    reporter: Option<&str>,
) -> IncidentResponse {
    create_incident(store, service_area, create_valid_request(reporter))
        .expect("fixture incident must be created")
}

/// Builds an admin-attributed transition request.
pub fn admin_transition(incident_id: &str, new_status: &str) -> TransitionStatusRequest {
    TransitionStatusRequest {
        incident_id: incident_id.to_string(),
        new_status: new_status.to_string(),
        actor_id: Some(String::from("admin-123")),
        actor_role: Some(String::from("administrator")),
    }
}

/// Transitions through the API, panicking on failure.
pub fn transition_as_admin(
    store: &mut IncidentStore,
    incident_id: &str,
    new_status: &str,
) -> IncidentResponse {
    transition_status(store, admin_transition(incident_id, new_status))
        .expect("admin transition must succeed")
}
