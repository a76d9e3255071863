// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Comment query operations.

use diesel::prelude::*;

use crate::data_models::CommentRow;
use crate::diesel_schema::comments;
use crate::error::PersistenceError;
use civic_report_domain::{Comment, IncidentId};

/// Loads all comments on an incident, oldest first.
///
/// # Errors
///
/// Returns an error if the query or row conversion fails.
pub fn for_incident(
    conn: &mut SqliteConnection,
    incident_id: &IncidentId,
) -> Result<Vec<Comment>, PersistenceError> {
    let rows: Vec<CommentRow> = comments::table
        .filter(comments::incident_id.eq(incident_id.value()))
        .order(comments::comment_id.asc())
        .load::<CommentRow>(conn)?;

    rows.into_iter().map(CommentRow::into_domain).collect()
}
