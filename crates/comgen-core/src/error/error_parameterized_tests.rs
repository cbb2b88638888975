#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized error code mapping tests
// ============================================================================

#[test_case(GeneratorError::Io(std::io::Error::other("x")), 1, "Io")]
#[test_case(GeneratorError::InvalidVlnv("test".into()), 2, "InvalidVlnv")]
#[test_case(GeneratorError::UnknownComponent("test".into()), 3, "UnknownComponent")]
#[test_case(GeneratorError::UnknownDesign("test".into()), 4, "UnknownDesign")]
#[test_case(GeneratorError::UnknownFamily("test".into()), 5, "UnknownFamily")]
#[test_case(GeneratorError::ConfigError("test".into()), 6, "ConfigError")]
#[test_case(GeneratorError::SerializationError("test".into()), 7, "SerializationError")]
#[test_case(GeneratorError::StoreWrite("test".into()), 8, "StoreWrite")]
fn GeneratorError___variant___maps_to_correct_code(
    error: GeneratorError,
    expected_code: u32,
    _variant_name: &str,
) {
    assert_eq!(
        error.error_code(),
        expected_code,
        "{} should map to code {}",
        _variant_name,
        expected_code
    );
}

// ============================================================================
// Parameterized display tests
// ============================================================================

#[test_case(GeneratorError::InvalidVlnv("a:b".into()), "invalid VLNV: a:b")]
#[test_case(GeneratorError::UnknownComponent("v:l:n:1".into()), "unknown component: v:l:n:1")]
#[test_case(GeneratorError::UnknownDesign("v:l:d:1".into()), "unknown design: v:l:d:1")]
#[test_case(GeneratorError::UnknownFamily("can".into()), "unknown protocol family: can")]
#[test_case(GeneratorError::ConfigError("bad".into()), "configuration error: bad")]
fn GeneratorError___display___formats_message(error: GeneratorError, expected: &str) {
    assert_eq!(error.to_string(), expected);
}
