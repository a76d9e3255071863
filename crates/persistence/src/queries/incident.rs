// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident query operations.

use diesel::prelude::*;

use crate::data_models::IncidentRow;
use crate::diesel_schema::incidents;
use crate::error::PersistenceError;
use civic_report_domain::{Incident, IncidentId, IncidentStatus};

/// Loads one incident by its identifier.
///
/// # Errors
///
/// Returns `IncidentNotFound` if no row exists, or a database/serialization
/// error otherwise.
pub fn find_by_id(
    conn: &mut SqliteConnection,
    incident_id: &IncidentId,
) -> Result<Incident, PersistenceError> {
    let row: Option<IncidentRow> = incidents::table
        .filter(incidents::id.eq(incident_id.value()))
        .first::<IncidentRow>(conn)
        .optional()?;

    match row {
        Some(row) => row.into_domain(),
        None => Err(PersistenceError::IncidentNotFound(
            incident_id.value().to_string(),
        )),
    }
}

/// Lists incidents, optionally filtered by status, newest first.
///
/// # Errors
///
/// Returns an error if the query or row conversion fails.
pub fn list(
    conn: &mut SqliteConnection,
    status: Option<IncidentStatus>,
) -> Result<Vec<Incident>, PersistenceError> {
    let rows: Vec<IncidentRow> = match status {
        Some(status) => incidents::table
            .filter(incidents::status.eq(status.as_str()))
            .order(incidents::created_at.desc())
            .load::<IncidentRow>(conn)?,
        None => incidents::table
            .order(incidents::created_at.desc())
            .load::<IncidentRow>(conn)?,
    };

    rows.into_iter().map(IncidentRow::into_domain).collect()
}
