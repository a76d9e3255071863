// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor identity and authorization for lifecycle operations.
//!
//! The core trusts the identity and role supplied by the external auth
//! layer; this module only validates shape and enforces role rules.

use civic_report_audit::Actor;
use civic_report_domain::Incident;

/// Actor roles for authorization.
///
/// Roles determine what lifecycle actions an authenticated actor may
/// perform on a given incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Staff role with triage authority: may transition and edit any
    /// incident.
    Administrator,
    /// A citizen identity: may edit and transition only incidents they
    /// reported themselves.
    Citizen,
}

impl Role {
    /// Parses a role string supplied by the identity layer.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown role strings.
    pub fn parse(s: &str) -> Result<Self, AuthError> {
        match s.to_lowercase().as_str() {
            "administrator" | "admin" => Ok(Self::Administrator),
            "citizen" | "reporter" => Ok(Self::Citizen),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role: '{s}'. Must be 'administrator' or 'citizen'"),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
///
/// This represents an identity the (out of scope) auth layer has already
/// verified; the lifecycle engine trusts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit entries to attribute transitions
    /// to the acting identity.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = match self.role {
            Role::Administrator => String::from("administrator"),
            Role::Citizen => String::from("reporter"),
        };
        Actor::new(self.id.clone(), actor_type)
    }
}

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// What would be required to perform this action.
        required: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, required } => {
                write!(f, "Unauthorized: '{action}' requires {required}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Stub authentication function.
///
/// This does NOT implement real authentication; token issuance and identity
/// verification are explicitly out of scope. In a deployed system this is
/// replaced by the identity provider integration.
///
/// # Arguments
///
/// * `actor_id` - The identifier of the actor to authenticate
/// * `role` - The role to assign to the actor
///
/// # Returns
///
/// An authenticated actor if successful.
///
/// # Errors
///
/// Returns an error if the actor id is empty.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may transition an incident's status.
    ///
    /// Administrators may transition any incident; a citizen may transition
    /// only an incident they reported. Anonymous incidents are staff-only.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither an administrator nor the
    /// incident's reporter.
    pub fn authorize_transition(
        actor: &AuthenticatedActor,
        incident: &Incident,
    ) -> Result<(), AuthError> {
        Self::authorize_mutation(actor, incident, "transition_status")
    }

    /// Checks if an actor may edit an incident.
    ///
    /// The same rule as transitions: administrators always, citizens only
    /// on their own incidents.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither an administrator nor the
    /// incident's reporter.
    pub fn authorize_edit(
        actor: &AuthenticatedActor,
        incident: &Incident,
    ) -> Result<(), AuthError> {
        Self::authorize_mutation(actor, incident, "edit_incident")
    }

    fn authorize_mutation(
        actor: &AuthenticatedActor,
        incident: &Incident,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.role == Role::Administrator {
            return Ok(());
        }
        if incident
            .reporter
            .as_ref()
            .is_some_and(|reporter| reporter.value() == actor.id)
        {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            required: String::from("Administrator role or being the incident's reporter"),
        })
    }
}
