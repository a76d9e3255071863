// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident mutation operations.

use diesel::prelude::*;

use crate::data_models::{NewIncidentRow, format_timestamp, serialize_images};
use crate::diesel_schema::incidents;
use crate::error::PersistenceError;
use civic_report_domain::Incident;

/// Inserts a freshly opened incident.
///
/// # Errors
///
/// Returns an error if serialization or the database insert fails.
pub fn insert(conn: &mut SqliteConnection, incident: &Incident) -> Result<(), PersistenceError> {
    let row: NewIncidentRow = NewIncidentRow::from_domain(incident)?;

    diesel::insert_into(incidents::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}

/// Writes the lifecycle fields after a transition.
///
/// Only `status`, `resolved_at`, and `updated_at` change; callers run this
/// inside the same transaction as the matching status log append.
///
/// # Errors
///
/// Returns an error if the incident row no longer exists or the update fails.
pub fn update_status(
    conn: &mut SqliteConnection,
    incident: &Incident,
) -> Result<(), PersistenceError> {
    let resolved_at: Option<String> = incident.resolved_at.map(format_timestamp).transpose()?;

    let updated: usize =
        diesel::update(incidents::table.filter(incidents::id.eq(incident.id.value())))
            .set((
                incidents::status.eq(incident.status.as_str()),
                incidents::resolved_at.eq(resolved_at),
                incidents::updated_at.eq(format_timestamp(incident.updated_at)?),
            ))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::IncidentNotFound(
            incident.id.value().to_string(),
        ));
    }
    Ok(())
}

/// Writes the owner-editable fields after an edit.
///
/// Lifecycle fields (`status`, `resolved_at`) are deliberately not part of
/// this statement.
///
/// # Errors
///
/// Returns an error if the incident row no longer exists or the update fails.
pub fn update_content(
    conn: &mut SqliteConnection,
    incident: &Incident,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(incidents::table.filter(incidents::id.eq(incident.id.value())))
            .set((
                incidents::description.eq(incident.description.clone()),
                incidents::longitude.eq(incident.location.longitude()),
                incidents::latitude.eq(incident.location.latitude()),
                incidents::address.eq(incident.address.clone()),
                incidents::images_json.eq(serialize_images(&incident.images)?),
                incidents::event_date.eq(incident.metadata.event_date.clone()),
                incidents::days_of_week_json
                    .eq(serde_json::to_string(&incident.metadata.days_of_week)?),
                incidents::time_of_day.eq(incident
                    .metadata
                    .time_of_day
                    .map(|bucket| bucket.as_str().to_string())),
                incidents::updated_at.eq(format_timestamp(incident.updated_at)?),
            ))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::IncidentNotFound(
            incident.id.value().to_string(),
        ));
    }
    Ok(())
}
