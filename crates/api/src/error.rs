// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::auth::AuthError;
use civic_report::CoreError;
use civic_report_domain::DomainError;
use civic_report_persistence::PersistenceError;
use tracing::error;

/// API-level errors.
///
/// These are distinct from domain/core/persistence errors and represent the
/// API contract. All are reported to the caller synchronously; none are
/// retried automatically.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Malformed or missing required fields.
    ValidationError {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The submitted point lies outside the service area.
    GeofenceRejected {
        /// The rejected longitude.
        longitude: f64,
        /// The rejected latitude.
        latitude: f64,
        /// Why the point was rejected.
        reason: String,
    },
    /// Unrecognized status value.
    InvalidStatus {
        /// The unrecognized value.
        status: String,
    },
    /// A mutation was attempted without an acting identity.
    MissingActor {
        /// The action that was attempted.
        action: String,
    },
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// What would be required to perform this action.
        required: String,
    },
    /// A requested resource was not found.
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationError { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::GeofenceRejected {
                longitude,
                latitude,
                reason,
            } => {
                write!(
                    f,
                    "Point ({longitude}, {latitude}) rejected by geofence: {reason}"
                )
            }
            Self::InvalidStatus { status } => {
                write!(f, "Invalid incident status: '{status}'")
            }
            Self::MissingActor { action } => {
                write!(f, "Action '{action}' requires an acting identity")
            }
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, required } => {
                write!(f, "Unauthorized: '{action}' requires {required}")
            }
            Self::NotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized { action, required } => {
                Self::Unauthorized { action, required }
            }
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidStatus(status) => ApiError::InvalidStatus { status },
        DomainError::InvalidCategory(category) => ApiError::ValidationError {
            field: String::from("category"),
            message: format!("Invalid incident category: '{category}'"),
        },
        DomainError::MissingActor { action } => ApiError::MissingActor { action },
        DomainError::EmptyDescription => ApiError::ValidationError {
            field: String::from("description"),
            message: String::from("Description cannot be empty"),
        },
        DomainError::DescriptionTooLong { length, max } => ApiError::ValidationError {
            field: String::from("description"),
            message: format!("Description is {length} characters long. Must be at most {max}"),
        },
        DomainError::InvalidLongitude(value) => ApiError::ValidationError {
            field: String::from("longitude"),
            message: format!("Longitude {value} is outside the range [-180, 180]"),
        },
        DomainError::InvalidLatitude(value) => ApiError::ValidationError {
            field: String::from("latitude"),
            message: format!("Latitude {value} is outside the range [-90, 90]"),
        },
        DomainError::InvalidTimeOfDay(value) => ApiError::ValidationError {
            field: String::from("time_of_day"),
            message: format!("Invalid time-of-day bucket: '{value}'"),
        },
        DomainError::EmptyMediaReference => ApiError::ValidationError {
            field: String::from("images"),
            message: String::from("Media reference cannot be empty"),
        },
        DomainError::EmptyCommentBody => ApiError::ValidationError {
            field: String::from("body"),
            message: String::from("Comment body cannot be empty"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::IncidentNotFound(id) => Self::NotFound {
                resource_type: String::from("Incident"),
                message: format!("Incident '{id}' does not exist"),
            },
            PersistenceError::NotificationNotFound(id) => Self::NotFound {
                resource_type: String::from("Notification"),
                message: format!("Notification {id} does not exist"),
            },
            PersistenceError::DomainRejected(domain_err) => translate_domain_error(domain_err),
            PersistenceError::NotFound(message) => Self::NotFound {
                resource_type: String::from("Resource"),
                message,
            },
            other => {
                error!(error = %other, "Persistence error");
                Self::Internal {
                    message: other.to_string(),
                }
            }
        }
    }
}
