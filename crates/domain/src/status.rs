// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident status tracking and category derivation.
//!
//! This module defines the nine incident statuses and their grouping into
//! review-stage categories. The review workflow is non-linear: any status may
//! move to any other status. What the engine enforces is the derived category,
//! the `resolved_at` side effect, and the audit obligation, not edges.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Incident status states tracking progress through the review workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    /// Freshly submitted, not yet looked at by staff.
    New,
    /// Picked up by staff for initial review.
    UnderReview,
    /// Verified as a real incident.
    Confirmed,
    /// Work paused (awaiting budget, season, third party).
    OnHold,
    /// Raised to a higher authority or external service.
    Escalated,
    /// Fixed and verified fixed.
    Resolved,
    /// Investigated but could not be fixed.
    Unresolved,
    /// Administratively closed without resolution.
    Closed,
    /// Rejected as invalid, duplicate, or out of scope.
    Rejected,
}

/// The review-stage grouping derived from an incident's status.
///
/// The category is a view over the status, never independent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    /// Intake stage: `New`, `UnderReview`.
    Initial,
    /// Being worked: `Confirmed`, `OnHold`, `Escalated`.
    Active,
    /// Review concluded: `Resolved`, `Unresolved`, `Closed`, `Rejected`.
    Final,
}

impl IncidentStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::UnderReview => "under_review",
            Self::Confirmed => "confirmed",
            Self::OnHold => "on_hold",
            Self::Escalated => "escalated",
            Self::Resolved => "resolved",
            Self::Unresolved => "unresolved",
            Self::Closed => "closed",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "new" => Ok(Self::New),
            "under_review" => Ok(Self::UnderReview),
            "confirmed" => Ok(Self::Confirmed),
            "on_hold" => Ok(Self::OnHold),
            "escalated" => Ok(Self::Escalated),
            "resolved" => Ok(Self::Resolved),
            "unresolved" => Ok(Self::Unresolved),
            "closed" => Ok(Self::Closed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }

    /// Returns the review-stage category this status belongs to.
    ///
    /// Every status belongs to exactly one category; the category is never
    /// stored or set independently.
    #[must_use]
    pub const fn category(&self) -> StatusCategory {
        match self {
            Self::New | Self::UnderReview => StatusCategory::Initial,
            Self::Confirmed | Self::OnHold | Self::Escalated => StatusCategory::Active,
            Self::Resolved | Self::Unresolved | Self::Closed | Self::Rejected => {
                StatusCategory::Final
            }
        }
    }

    /// Returns true if this status concludes the review (Final category).
    ///
    /// Final statuses carry a `resolved_at` timestamp. Unlike a terminal
    /// state, a Final status can still transition back to any other status.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(self.category(), StatusCategory::Final)
    }

    /// All nine statuses, in workflow order.
    pub const ALL: [Self; 9] = [
        Self::New,
        Self::UnderReview,
        Self::Confirmed,
        Self::OnHold,
        Self::Escalated,
        Self::Resolved,
        Self::Unresolved,
        Self::Closed,
        Self::Rejected,
    ];
}

impl StatusCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Active => "active",
            Self::Final => "final",
        }
    }
}

impl FromStr for IncidentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
