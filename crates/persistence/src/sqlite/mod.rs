// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite`-specific initialization.
//!
//! Schema installation is an idempotent SQL batch executed on every
//! connection setup. Foreign key enforcement is verified at startup so the
//! store cannot run with referential integrity silently disabled (status
//! logs, notifications, and comments all reference incidents).

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use tracing::info;

use crate::error::PersistenceError;

/// Installs the schema on a fresh or existing database.
///
/// # Arguments
///
/// * `conn` - The database connection to initialize
///
/// # Errors
///
/// Returns an error if schema creation fails.
pub fn initialize_schema(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    info!("Initializing database schema");

    // Enable foreign key enforcement and bound lock waits
    conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
        .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

    conn.batch_execute(
        "
        CREATE TABLE IF NOT EXISTS incidents (
            id TEXT PRIMARY KEY NOT NULL,
            category TEXT NOT NULL CHECK(category IN (
                'vandalism', 'road_damage', 'street_lighting', 'illegal_dumping',
                'greenery', 'noise', 'water_sewer', 'other'
            )),
            description TEXT NOT NULL,
            longitude REAL NOT NULL,
            latitude REAL NOT NULL,
            address TEXT,
            images_json TEXT NOT NULL DEFAULT '[]',
            status TEXT NOT NULL CHECK(status IN (
                'new', 'under_review', 'confirmed', 'on_hold', 'escalated',
                'resolved', 'unresolved', 'closed', 'rejected'
            )),
            resolved_at TEXT,
            reporter_id TEXT,
            event_date TEXT,
            days_of_week_json TEXT NOT NULL DEFAULT '[]',
            time_of_day TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS status_logs (
            log_id INTEGER PRIMARY KEY AUTOINCREMENT,
            incident_id TEXT NOT NULL,
            previous_status TEXT NOT NULL,
            new_status TEXT NOT NULL,
            changed_at TEXT NOT NULL,
            changed_by_id TEXT NOT NULL,
            changed_by_type TEXT NOT NULL,
            FOREIGN KEY(incident_id) REFERENCES incidents(id)
        );

        CREATE INDEX IF NOT EXISTS idx_status_logs_incident
            ON status_logs(incident_id);

        CREATE TABLE IF NOT EXISTS notifications (
            notification_id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipient_id TEXT NOT NULL,
            message TEXT NOT NULL,
            incident_id TEXT NOT NULL,
            is_read INTEGER NOT NULL DEFAULT 0 CHECK(is_read IN (0, 1)),
            created_at TEXT NOT NULL,
            FOREIGN KEY(incident_id) REFERENCES incidents(id)
        );

        CREATE INDEX IF NOT EXISTS idx_notifications_recipient
            ON notifications(recipient_id);

        CREATE TABLE IF NOT EXISTS comments (
            comment_id INTEGER PRIMARY KEY AUTOINCREMENT,
            incident_id TEXT NOT NULL,
            author_id TEXT NOT NULL,
            body TEXT NOT NULL,
            posted_at TEXT NOT NULL,
            FOREIGN KEY(incident_id) REFERENCES incidents(id)
        );

        CREATE INDEX IF NOT EXISTS idx_comments_incident
            ON comments(incident_id);
        ",
    )
    .map_err(|e| PersistenceError::InitializationError(e.to_string()))?;

    Ok(())
}

#[derive(QueryableByName)]
struct ForeignKeyPragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Verifies that foreign key enforcement is enabled.
///
/// This is a startup-time check; the store refuses to operate without
/// referential integrity.
///
/// # Arguments
///
/// * `conn` - The database connection to check
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let row: ForeignKeyPragmaRow =
        diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;

    if row.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    info!("Foreign key enforcement is enabled");
    Ok(())
}
