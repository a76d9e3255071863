// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The closed set of incident category labels.
//!
//! Categories are a fixed enumeration, not free text. Unknown labels are
//! rejected at the API boundary before they reach the lifecycle engine.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Incident category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentCategory {
    /// Property damage, graffiti, destroyed street furniture.
    Vandalism,
    /// Potholes, damaged pavement, broken curbs.
    RoadDamage,
    /// Broken or dark street lamps.
    StreetLighting,
    /// Illegally dumped waste.
    IllegalDumping,
    /// Fallen trees, overgrown or damaged greenery.
    Greenery,
    /// Noise disturbances.
    Noise,
    /// Water mains, drains, and sewer problems.
    WaterSewer,
    /// Anything that does not fit the categories above.
    Other,
}

impl IncidentCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vandalism => "vandalism",
            Self::RoadDamage => "road_damage",
            Self::StreetLighting => "street_lighting",
            Self::IllegalDumping => "illegal_dumping",
            Self::Greenery => "greenery",
            Self::Noise => "noise",
            Self::WaterSewer => "water_sewer",
            Self::Other => "other",
        }
    }

    /// Returns the human-readable label used in notification messages.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Vandalism => "Vandalism",
            Self::RoadDamage => "Road damage",
            Self::StreetLighting => "Street lighting",
            Self::IllegalDumping => "Illegal dumping",
            Self::Greenery => "Greenery",
            Self::Noise => "Noise",
            Self::WaterSewer => "Water and sewer",
            Self::Other => "Other",
        }
    }

    /// Parses a category from its string representation.
    ///
    /// Accepts both the snake_case wire form and the display label, so the
    /// submission form can send either.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCategory` if the string is not a valid
    /// category label.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "vandalism" | "Vandalism" => Ok(Self::Vandalism),
            "road_damage" | "Road damage" => Ok(Self::RoadDamage),
            "street_lighting" | "Street lighting" => Ok(Self::StreetLighting),
            "illegal_dumping" | "Illegal dumping" => Ok(Self::IllegalDumping),
            "greenery" | "Greenery" => Ok(Self::Greenery),
            "noise" | "Noise" => Ok(Self::Noise),
            "water_sewer" | "Water and sewer" => Ok(Self::WaterSewer),
            "other" | "Other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidCategory(s.to_string())),
        }
    }
}

impl FromStr for IncidentCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for IncidentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [IncidentCategory; 8] = [
        IncidentCategory::Vandalism,
        IncidentCategory::RoadDamage,
        IncidentCategory::StreetLighting,
        IncidentCategory::IllegalDumping,
        IncidentCategory::Greenery,
        IncidentCategory::Noise,
        IncidentCategory::WaterSewer,
        IncidentCategory::Other,
    ];

    #[test]
    fn test_category_string_round_trip() {
        for category in ALL {
            let s = category.as_str();
            match IncidentCategory::parse(s) {
                Ok(parsed) => assert_eq!(category, parsed),
                Err(e) => panic!("Failed to parse category string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_display_label_round_trip() {
        for category in ALL {
            let label = category.display_name();
            match IncidentCategory::parse(label) {
                Ok(parsed) => assert_eq!(category, parsed),
                Err(e) => panic!("Failed to parse category label: {label}: {e}"),
            }
        }
    }

    #[test]
    fn test_free_text_is_rejected() {
        let result = IncidentCategory::parse("broken swing at the playground");
        assert!(matches!(result, Err(DomainError::InvalidCategory(_))));
    }
}
