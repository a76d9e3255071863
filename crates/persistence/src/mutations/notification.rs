// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification mutation operations.

use diesel::prelude::*;

use crate::data_models::NewNotificationRow;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;
use civic_report_domain::Notification;

/// Inserts a notification and returns its store-assigned identifier.
///
/// This runs outside the transition transaction: notification delivery is
/// fire-and-forget relative to the committed status change.
///
/// # Errors
///
/// Returns an error if serialization or the database insert fails.
pub fn insert(
    conn: &mut SqliteConnection,
    notification: &Notification,
) -> Result<i64, PersistenceError> {
    let row: NewNotificationRow = NewNotificationRow::from_domain(notification)?;

    let notification_id: i64 = diesel::insert_into(notifications::table)
        .values(&row)
        .returning(notifications::notification_id)
        .get_result(conn)?;

    Ok(notification_id)
}

/// Marks a notification as read.
///
/// Recipient authorization happens at the API boundary; this statement only
/// flips the flag.
///
/// # Errors
///
/// Returns an error if the notification does not exist or the update fails.
pub fn mark_read(conn: &mut SqliteConnection, notification_id: i64) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        notifications::table.filter(notifications::notification_id.eq(notification_id)),
    )
    .set(notifications::is_read.eq(true))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotificationNotFound(notification_id));
    }
    Ok(())
}
