// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::{MAX_DESCRIPTION_LENGTH, validate_coordinates, validate_description};

#[test]
fn test_valid_description_passes() {
    let result = validate_description("Broken street lamp on the corner of Cechowa");
    assert!(result.is_ok());
}

#[test]
fn test_empty_description_is_rejected() {
    let result = validate_description("");
    assert!(matches!(result, Err(DomainError::EmptyDescription)));
}

#[test]
fn test_whitespace_only_description_is_rejected() {
    let result = validate_description(" \n\t ");
    assert!(matches!(result, Err(DomainError::EmptyDescription)));
}

#[test]
fn test_description_at_limit_passes() {
    let description: String = "x".repeat(MAX_DESCRIPTION_LENGTH);
    assert!(validate_description(&description).is_ok());
}

#[test]
fn test_description_over_limit_is_rejected() {
    let description: String = "x".repeat(MAX_DESCRIPTION_LENGTH + 1);
    let result = validate_description(&description);

    assert!(result.is_err());
    if let Err(DomainError::DescriptionTooLong { length, max }) = result {
        assert_eq!(length, MAX_DESCRIPTION_LENGTH + 1);
        assert_eq!(max, MAX_DESCRIPTION_LENGTH);
    } else {
        panic!("Expected DescriptionTooLong");
    }
}

#[test]
fn test_description_length_counts_characters_not_bytes() {
    // Multi-byte characters must count once each
    let description: String = "ż".repeat(MAX_DESCRIPTION_LENGTH);
    assert!(validate_description(&description).is_ok());
}

#[test]
fn test_valid_coordinates_pass() {
    assert!(validate_coordinates(19.05, 49.82).is_ok());
    assert!(validate_coordinates(-180.0, -90.0).is_ok());
    assert!(validate_coordinates(180.0, 90.0).is_ok());
}

#[test]
fn test_out_of_range_coordinates_are_rejected() {
    assert!(matches!(
        validate_coordinates(200.0, 10.0),
        Err(DomainError::InvalidLongitude(_))
    ));
    assert!(matches!(
        validate_coordinates(10.0, 95.0),
        Err(DomainError::InvalidLatitude(_))
    ));
}
