// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use civic_report_audit::StatusLogEntry;
use civic_report_domain::{Incident, Notification};

/// The result of a successful, status-changing transition.
///
/// The incident update and the log entry are one failure unit: the store must
/// commit both or neither. The notification is fire-and-forget; a failure to
/// deliver it must not undo the other two.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The incident after the transition.
    pub incident: Incident,
    /// The audit entry recording this transition.
    pub log_entry: StatusLogEntry,
    /// The notification for the incident's reporter, if one exists.
    pub notification: Option<Notification>,
}

/// The outcome of applying a command to an incident.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// The command would not change anything: the target status equals the
    /// current status. No audit entry, no notification, no write.
    NoChange,
    /// The status changed.
    Transitioned(TransitionResult),
    /// Descriptive fields changed; status and log are untouched.
    Edited(Incident),
}
