// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Comment mutation operations.

use diesel::prelude::*;

use crate::data_models::NewCommentRow;
use crate::diesel_schema::comments;
use crate::error::PersistenceError;
use civic_report_domain::{Comment, IncidentId};

/// Appends a reporter-authored comment to an incident.
///
/// # Errors
///
/// Returns an error if serialization or the database insert fails.
pub fn insert(
    conn: &mut SqliteConnection,
    incident_id: &IncidentId,
    comment: &Comment,
) -> Result<(), PersistenceError> {
    let row: NewCommentRow = NewCommentRow::from_domain(incident_id, comment)?;

    diesel::insert_into(comments::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}
