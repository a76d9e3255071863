// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use civic_report_audit::Actor;
use civic_report_domain::{
    Incident, IncidentCategory, IncidentId, IncidentMetadata, IncidentStatus, Point, ReporterId,
};
use time::OffsetDateTime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("administrator"))
}

pub fn test_clock() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH + time::Duration::days(20_000)
}

pub fn create_test_incident(status: IncidentStatus, reporter: Option<&str>) -> Incident {
    let opened_at: OffsetDateTime = test_clock();
    Incident {
        id: IncidentId::generate(),
        category: IncidentCategory::Vandalism,
        description: String::from("Graffiti on the underpass wall"),
        location: Point::new(19.05, 49.82).expect("fixture point must be valid"),
        address: Some(String::from("3 Maja 12, Bielsko-Biała")),
        images: Vec::new(),
        status,
        resolved_at: if status.is_final() {
            Some(opened_at)
        } else {
            None
        },
        reporter: reporter.map(ReporterId::new),
        metadata: IncidentMetadata::default(),
        created_at: opened_at,
        updated_at: opened_at,
    }
}
