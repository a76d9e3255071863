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

//! Service-area boundary validation.
//!
//! Loads the service-area polygon from a `GeoJSON` document once, then
//! answers point-containment queries. Both the interactive pre-submission
//! check and the authoritative write-path check go through the same
//! [`ServiceArea::contains`] implementation, so the two call sites cannot
//! disagree on boundary behavior.

use civic_report_domain::Point;
use geo::{Contains, MultiPolygon};
use geojson::GeoJson;
use std::path::Path;
use tracing::info;

/// Errors that can occur while loading or querying a service area.
#[derive(Debug, thiserror::Error)]
pub enum GeofenceError {
    /// The boundary document could not be read.
    #[error("Failed to read boundary document '{path}': {source}")]
    Io {
        /// The path that failed to load.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The boundary document is not valid `GeoJSON`.
    #[error("Failed to parse boundary document: {0}")]
    InvalidGeoJson(String),
    /// The boundary document parsed but contains no polygon geometry.
    #[error("Boundary document contains no Polygon or MultiPolygon geometry")]
    NoPolygonGeometry,
}

/// The outcome of validating a candidate coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Containment {
    /// The point lies inside the service area.
    Inside,
    /// The point lies outside the service area; submission must be blocked.
    Outside {
        /// Human-readable reason suitable for the caller.
        reason: String,
    },
}

impl Containment {
    /// Returns true if the point was inside the service area.
    #[must_use]
    pub const fn is_inside(&self) -> bool {
        matches!(self, Self::Inside)
    }
}

/// A serviceable-area polygon loaded once per validator instantiation.
///
/// The geometry is externally supplied and read-only; it is not owned by any
/// incident. Multi-ring polygons (holes, disjoint districts) are supported
/// through [`MultiPolygon`].
#[derive(Debug, Clone)]
pub struct ServiceArea {
    /// Display name of the area (e.g., the municipality name).
    name: String,
    polygon: MultiPolygon<f64>,
}

impl ServiceArea {
    /// Builds a service area from an in-memory `GeoJSON` string.
    ///
    /// Accepts a bare geometry, a feature, or a feature collection whose
    /// first polygonal feature is used. Both `Polygon` and `MultiPolygon`
    /// geometries are handled.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid `GeoJSON` or contains
    /// no polygon geometry.
    pub fn from_geojson_str(name: &str, geojson_str: &str) -> Result<Self, GeofenceError> {
        let geojson: GeoJson = geojson_str
            .parse()
            .map_err(|e: geojson::Error| GeofenceError::InvalidGeoJson(e.to_string()))?;

        let polygon: MultiPolygon<f64> =
            extract_multipolygon(geojson).ok_or(GeofenceError::NoPolygonGeometry)?;

        info!(
            area = %name,
            rings = polygon.0.len(),
            "Loaded service-area boundary"
        );

        Ok(Self {
            name: name.to_string(),
            polygon,
        })
    }

    /// Loads a service area from a `GeoJSON` file on disk.
    ///
    /// The document is fetched once and cached here for the lifetime of the
    /// validator; callers share one instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file<P: AsRef<Path>>(name: &str, path: P) -> Result<Self, GeofenceError> {
        let contents: String =
            std::fs::read_to_string(path.as_ref()).map_err(|source| GeofenceError::Io {
                path: path.as_ref().display().to_string(),
                source,
            })?;
        Self::from_geojson_str(name, &contents)
    }

    /// Returns the area's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Standard point-in-polygon containment test.
    ///
    /// Boundary behavior is whatever [`geo::Contains`] implements; every
    /// call site uses this single implementation, so interactive and
    /// submission-time checks are consistent by construction.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        let candidate = geo::Point::new(point.longitude(), point.latitude());
        self.polygon.contains(&candidate)
    }

    /// Validates a candidate coordinate against the service area.
    ///
    /// Callers must block submission when the result is
    /// [`Containment::Outside`].
    #[must_use]
    pub fn validate(&self, point: &Point) -> Containment {
        if self.contains(point) {
            Containment::Inside
        } else {
            Containment::Outside {
                reason: format!(
                    "Point ({}, {}) is outside the {} service area",
                    point.longitude(),
                    point.latitude(),
                    self.name
                ),
            }
        }
    }
}

/// Extracts a [`MultiPolygon`] from any of the `GeoJSON` document shapes.
///
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn extract_multipolygon(geojson: GeoJson) -> Option<MultiPolygon<f64>> {
    match geojson {
        GeoJson::Geometry(geom) => geometry_to_multipolygon(geom),
        GeoJson::Feature(feature) => feature.geometry.and_then(geometry_to_multipolygon),
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(|feature| feature.geometry.and_then(geometry_to_multipolygon))
            .next(),
    }
}

fn geometry_to_multipolygon(geom: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geom.try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rough outline of the Bielsko-Biała municipal boundary, wide enough to
    /// contain the city center at (19.05, 49.82).
    const BIELSKO_BIALA: &str = r#"{
        "type": "Polygon",
        "coordinates": [[
            [18.93, 49.80],
            [18.98, 49.74],
            [19.10, 49.74],
            [19.16, 49.80],
            [19.10, 49.90],
            [18.97, 49.90],
            [18.93, 49.80]
        ]]
    }"#;

    fn bielsko_biala() -> ServiceArea {
        match ServiceArea::from_geojson_str("Bielsko-Biała", BIELSKO_BIALA) {
            Ok(area) => area,
            Err(e) => panic!("Fixture boundary must parse: {e}"),
        }
    }

    fn point(longitude: f64, latitude: f64) -> Point {
        match Point::new(longitude, latitude) {
            Ok(p) => p,
            Err(e) => panic!("Fixture point must be valid: {e}"),
        }
    }

    #[test]
    fn test_city_center_is_inside() {
        let area: ServiceArea = bielsko_biala();
        assert!(area.contains(&point(19.05, 49.82)));
    }

    #[test]
    fn test_null_island_is_outside() {
        let area: ServiceArea = bielsko_biala();
        assert!(!area.contains(&point(0.0, 0.0)));
    }

    #[test]
    fn test_nearby_but_outside_point_is_outside() {
        // Katowice, ~50 km north of the boundary
        let area: ServiceArea = bielsko_biala();
        assert!(!area.contains(&point(19.02, 50.26)));
    }

    #[test]
    fn test_validate_inside_returns_inside() {
        let area: ServiceArea = bielsko_biala();
        assert_eq!(area.validate(&point(19.05, 49.82)), Containment::Inside);
    }

    #[test]
    fn test_validate_outside_returns_reason() {
        let area: ServiceArea = bielsko_biala();
        let result: Containment = area.validate(&point(0.0, 0.0));

        assert!(!result.is_inside());
        if let Containment::Outside { reason } = result {
            assert!(reason.contains("Bielsko-Biała"));
        } else {
            panic!("Expected Outside");
        }
    }

    #[test]
    fn test_contains_and_validate_agree_everywhere() {
        // The two call sites of the geofence must never diverge; validate is
        // defined in terms of contains, and this pins that relationship.
        let area: ServiceArea = bielsko_biala();
        let probes: [(f64, f64); 6] = [
            (19.05, 49.82),
            (19.00, 49.80),
            (0.0, 0.0),
            (19.02, 50.26),
            (18.90, 49.70),
            (19.12, 49.85),
        ];

        for (lon, lat) in probes {
            let p: Point = point(lon, lat);
            assert_eq!(area.contains(&p), area.validate(&p).is_inside());
        }
    }

    #[test]
    fn test_feature_document_is_accepted() {
        let feature: String = format!(
            r#"{{"type": "Feature", "properties": {{"name": "Bielsko-Biała"}}, "geometry": {BIELSKO_BIALA}}}"#
        );
        let area = ServiceArea::from_geojson_str("Bielsko-Biała", &feature);
        assert!(area.is_ok());
    }

    #[test]
    fn test_multipolygon_document_is_accepted() {
        let multi: &str = r#"{
            "type": "MultiPolygon",
            "coordinates": [
                [[[18.93, 49.80], [19.10, 49.74], [19.16, 49.80], [19.10, 49.90], [18.93, 49.80]]],
                [[[19.20, 49.60], [19.30, 49.60], [19.30, 49.70], [19.20, 49.70], [19.20, 49.60]]]
            ]
        }"#;
        let area = match ServiceArea::from_geojson_str("Two districts", multi) {
            Ok(area) => area,
            Err(e) => panic!("MultiPolygon must parse: {e}"),
        };

        // A point in each disjoint district is inside
        assert!(area.contains(&point(19.05, 49.81)));
        assert!(area.contains(&point(19.25, 49.65)));
        // A point between the districts is outside
        assert!(!area.contains(&point(19.18, 49.75)));
    }

    #[test]
    fn test_invalid_document_is_rejected() {
        let result = ServiceArea::from_geojson_str("broken", "{not geojson");
        assert!(matches!(result, Err(GeofenceError::InvalidGeoJson(_))));
    }

    #[test]
    fn test_non_polygon_geometry_is_rejected() {
        let line: &str = r#"{"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}"#;
        let result = ServiceArea::from_geojson_str("line", line);
        assert!(matches!(result, Err(GeofenceError::NoPolygonGeometry)));
    }
}
