// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification synthesis for committed transitions.
//!
//! Dispatch fires once per successful, status-changing transition. An
//! anonymous incident produces nothing; that is a no-op, not an error.

use civic_report_domain::{Incident, IncidentStatus, Notification};
use time::OffsetDateTime;

/// Synthesizes the notification for a committed transition, if the incident
/// has a reporter to address it to.
///
/// The message references the incident's category and the new status:
/// `"Your incident of category {category} was updated to status {new_status}"`.
///
/// # Arguments
///
/// * `incident` - The incident after the transition
/// * `new_status` - The status the incident moved to
/// * `now` - The server timestamp of the transition
#[must_use]
pub fn dispatch(
    incident: &Incident,
    new_status: IncidentStatus,
    now: OffsetDateTime,
) -> Option<Notification> {
    incident.reporter.as_ref().map(|recipient| {
        Notification::new(
            recipient.clone(),
            format!(
                "Your incident of category {} was updated to status {}",
                incident.category.display_name(),
                new_status.as_str()
            ),
            incident.id.clone(),
            now,
        )
    })
}
