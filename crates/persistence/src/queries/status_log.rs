// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status log query operations.

use diesel::prelude::*;

use crate::data_models::StatusLogRow;
use crate::diesel_schema::status_logs;
use crate::error::PersistenceError;
use civic_report_audit::{StatusLog, StatusLogEntry};
use civic_report_domain::IncidentId;

/// Loads the full status log for one incident in append order.
///
/// `log_id` is monotonically assigned at append time, so ordering by it
/// returns entries oldest first.
///
/// # Errors
///
/// Returns an error if the query or row conversion fails.
pub fn for_incident(
    conn: &mut SqliteConnection,
    incident_id: &IncidentId,
) -> Result<StatusLog, PersistenceError> {
    let rows: Vec<StatusLogRow> = status_logs::table
        .filter(status_logs::incident_id.eq(incident_id.value()))
        .order(status_logs::log_id.asc())
        .load::<StatusLogRow>(conn)?;

    let entries: Vec<StatusLogEntry> = rows
        .into_iter()
        .map(StatusLogRow::into_domain)
        .collect::<Result<Vec<StatusLogEntry>, PersistenceError>>()?;

    Ok(StatusLog::from_entries(entries))
}
