// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod operations;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthError, AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use operations::{
    add_comment, check_point, create_incident, edit_incident, get_incident, list_comments,
    list_incidents, list_notifications, list_status_log, mark_notification_read,
    transition_status,
};
pub use request_response::{
    AddCommentRequest, CheckPointResponse, CommentResponse, CreateIncidentRequest,
    EditIncidentRequest, IncidentResponse, NotificationResponse, StatusLogEntryResponse,
    TransitionStatusRequest,
};
