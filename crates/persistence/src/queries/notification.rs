// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification query operations.

use diesel::prelude::*;

use crate::data_models::NotificationRow;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;
use civic_report_domain::{Notification, ReporterId};

/// Loads one notification by its identifier.
///
/// # Errors
///
/// Returns `NotificationNotFound` if no row exists, or a database or
/// serialization error otherwise.
pub fn find_by_id(
    conn: &mut SqliteConnection,
    notification_id: i64,
) -> Result<Notification, PersistenceError> {
    let row: Option<NotificationRow> = notifications::table
        .filter(notifications::notification_id.eq(notification_id))
        .first::<NotificationRow>(conn)
        .optional()?;

    match row {
        Some(row) => row.into_domain(),
        None => Err(PersistenceError::NotificationNotFound(notification_id)),
    }
}

/// Lists all notifications addressed to a recipient, oldest first.
///
/// # Errors
///
/// Returns an error if the query or row conversion fails.
pub fn for_recipient(
    conn: &mut SqliteConnection,
    recipient: &ReporterId,
) -> Result<Vec<Notification>, PersistenceError> {
    let rows: Vec<NotificationRow> = notifications::table
        .filter(notifications::recipient_id.eq(recipient.value()))
        .order(notifications::notification_id.asc())
        .load::<NotificationRow>(conn)?;

    rows.into_iter().map(NotificationRow::into_domain).collect()
}
