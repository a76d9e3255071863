// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::IncidentStore;
use civic_report::open_incident;
use civic_report_audit::Actor;
use civic_report_domain::{
    Incident, IncidentCategory, IncidentMetadata, Point, ReporterId,
};
use time::OffsetDateTime;

pub fn create_test_store() -> IncidentStore {
    IncidentStore::new_in_memory().expect("in-memory store must initialize")
}

pub fn create_admin_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("administrator"))
}

pub fn open_test_incident(reporter: Option<&str>) -> Incident {
    open_incident(
        IncidentCategory::Vandalism,
        String::from("Graffiti on the underpass wall"),
        Point::new(19.05, 49.82).expect("fixture point must be valid"),
        Some(String::from("3 Maja 12, Bielsko-Biała")),
        Vec::new(),
        reporter.map(ReporterId::new),
        IncidentMetadata::default(),
        OffsetDateTime::now_utc(),
    )
    .expect("fixture incident must be valid")
}

/// Opens and persists a fixture incident, returning it.
pub fn persist_test_incident(store: &mut IncidentStore, reporter: Option<&str>) -> Incident {
    let incident: Incident = open_test_incident(reporter);
    store
        .create_incident(&incident)
        .expect("fixture incident must persist");
    incident
}
