// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Status string is not one of the nine recognized values.
    InvalidStatus(String),
    /// Category string is not one of the recognized category labels.
    InvalidCategory(String),
    /// A status transition was attempted without an acting identity.
    MissingActor {
        /// The action that was attempted without an actor.
        action: String,
    },
    /// Incident description is empty.
    EmptyDescription,
    /// Incident description exceeds the maximum length.
    DescriptionTooLong {
        /// The actual length of the supplied description.
        length: usize,
        /// The maximum permitted length.
        max: usize,
    },
    /// Longitude is outside the valid range.
    InvalidLongitude(f64),
    /// Latitude is outside the valid range.
    InvalidLatitude(f64),
    /// Time-of-day bucket string is not recognized.
    InvalidTimeOfDay(String),
    /// A media reference is empty.
    EmptyMediaReference,
    /// A comment body is empty.
    EmptyCommentBody,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus(status) => {
                write!(f, "Invalid incident status: '{status}'")
            }
            Self::InvalidCategory(category) => {
                write!(f, "Invalid incident category: '{category}'")
            }
            Self::MissingActor { action } => {
                write!(f, "Action '{action}' requires an acting identity")
            }
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::DescriptionTooLong { length, max } => {
                write!(
                    f,
                    "Description is {length} characters long. Must be at most {max}"
                )
            }
            Self::InvalidLongitude(value) => {
                write!(f, "Longitude {value} is outside the range [-180, 180]")
            }
            Self::InvalidLatitude(value) => {
                write!(f, "Latitude {value} is outside the range [-90, 90]")
            }
            Self::InvalidTimeOfDay(value) => {
                write!(f, "Invalid time-of-day bucket: '{value}'")
            }
            Self::EmptyMediaReference => write!(f, "Media reference cannot be empty"),
            Self::EmptyCommentBody => write!(f, "Comment body cannot be empty"),
        }
    }
}

impl std::error::Error for DomainError {}
