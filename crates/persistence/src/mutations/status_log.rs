// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status log mutation operations.
//!
//! The log is append-only; there is no update or delete statement in this
//! module, and none may be added.

use diesel::prelude::*;

use crate::data_models::NewStatusLogRow;
use crate::diesel_schema::status_logs;
use crate::error::PersistenceError;
use civic_report_audit::StatusLogEntry;
use civic_report_domain::IncidentId;

/// Appends exactly one audit entry for a committed transition.
///
/// Runs inside the same transaction as the matching status update; the two
/// writes are one failure unit.
///
/// # Errors
///
/// Returns an error if serialization or the database insert fails.
pub fn append(
    conn: &mut SqliteConnection,
    incident_id: &IncidentId,
    entry: &StatusLogEntry,
) -> Result<(), PersistenceError> {
    let row: NewStatusLogRow = NewStatusLogRow::from_domain(incident_id, entry)?;

    diesel::insert_into(status_logs::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}
