//! UEN format classification.
//!
//! Classification is pure: the same input always yields the same
//! [`ValidationResult`]. An input that matches no format is a normal outcome
//! reported through the result, never an error.
//!
//! Check letters (the trailing alphabet of formats A, B and C) are not
//! verified. The checksum algorithm is not published, so a syntactically
//! well-formed UEN with a wrong check letter is reported as valid.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::entity_types::{entity_type, is_entity_type_initial};
use crate::format::{format_definitions, FormatDefinition, UenFormat};

pub const ERR_REQUIRED: &str = "UEN is required and must be a string";
pub const ERR_EMPTY: &str = "UEN cannot be empty";
pub const ERR_NO_MATCH: &str = "UEN does not match any valid format (A, B, or C)";

static PATTERNS: LazyLock<Result<Vec<(UenFormat, Regex)>, regex::Error>> =
    LazyLock::new(compile_patterns);

fn compile_patterns() -> Result<Vec<(UenFormat, Regex)>, regex::Error> {
    UenFormat::ALL
        .iter()
        .map(|&format| Regex::new(format.pattern()).map(|regex| (format, regex)))
        .collect()
}

/// Outcome of classifying one candidate UEN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub format: Option<UenFormat>,
    pub format_description: Option<&'static str>,
    pub entity_type: Option<&'static str>,
    pub error: Option<&'static str>,
    pub details: Option<ValidationDetails>,
}

/// Extra context attached to a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidationDetails {
    /// The cleaned UEN matched `pattern`.
    Matched {
        uen: String,
        length: usize,
        pattern: &'static str,
    },
    /// No format matched; `formats` lists what would have been accepted.
    Unmatched {
        uen: String,
        length: usize,
        formats: Vec<FormatDefinition>,
    },
}

impl ValidationResult {
    fn rejected(error: &'static str, details: Option<ValidationDetails>) -> Self {
        Self {
            is_valid: false,
            format: None,
            format_description: None,
            entity_type: None,
            error: Some(error),
            details,
        }
    }

    fn matched(format: UenFormat, cleaned: String, entity_type: Option<&'static str>) -> Self {
        Self {
            is_valid: true,
            format: Some(format),
            format_description: Some(format.description()),
            entity_type,
            error: None,
            details: Some(ValidationDetails::Matched {
                length: cleaned.chars().count(),
                uen: cleaned,
                pattern: format.pattern(),
            }),
        }
    }
}

/// Normalize a candidate UEN: trim surrounding whitespace and upper-case.
pub fn clean(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Classify `input` against formats A, B and C, in that order.
///
/// `None` models a missing value (absent query parameter, JSON null).
pub fn classify(input: Option<&str>) -> ValidationResult {
    let Some(raw) = input else {
        return ValidationResult::rejected(ERR_REQUIRED, None);
    };

    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return ValidationResult::rejected(ERR_EMPTY, None);
    }

    match match_format(&cleaned) {
        Some(UenFormat::C) => {
            let entity = entity_code(&cleaned).and_then(entity_type);
            ValidationResult::matched(UenFormat::C, cleaned, entity)
        }
        Some(format) => ValidationResult::matched(format, cleaned, None),
        None => ValidationResult::rejected(
            ERR_NO_MATCH,
            Some(ValidationDetails::Unmatched {
                length: cleaned.chars().count(),
                uen: cleaned,
                formats: format_definitions(),
            }),
        ),
    }
}

/// First format whose rules accept an already cleaned UEN.
fn match_format(cleaned: &str) -> Option<UenFormat> {
    PATTERNS
        .as_ref()
        .ok()?
        .iter()
        .find(|(format, regex)| {
            regex.is_match(cleaned)
                && match format {
                    UenFormat::C => cleaned.chars().next().is_some_and(is_entity_type_initial),
                    UenFormat::A | UenFormat::B => true,
                }
        })
        .map(|(format, _)| *format)
}

/// The entity type indicator of a format C UEN (`LL` in `T09LL0001B`).
fn entity_code(cleaned: &str) -> Option<&str> {
    cleaned.get(3..5)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic, clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_format_a() {
        let result = classify(Some("12345678A"));
        assert!(result.is_valid);
        assert_eq!(result.format, Some(UenFormat::A));
        assert_eq!(result.entity_type, None);
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_format_a_too_short() {
        let result = classify(Some("1234567A"));
        assert!(!result.is_valid);
        assert_eq!(result.error, Some(ERR_NO_MATCH));
    }

    #[test]
    fn test_format_b_year_bounds() {
        assert_eq!(classify(Some("200912345A")).format, Some(UenFormat::B));
        assert_eq!(classify(Some("190012345A")).format, Some(UenFormat::B));
        assert_eq!(classify(Some("209912345A")).format, Some(UenFormat::B));
        assert!(!classify(Some("189912345A")).is_valid);
        assert!(!classify(Some("210012345A")).is_valid);
    }

    #[test]
    fn test_format_c_with_entity_type() {
        let result = classify(Some("T09LL0001B"));
        assert!(result.is_valid);
        assert_eq!(result.format, Some(UenFormat::C));
        assert_eq!(result.entity_type, Some("Limited Liability Partnership"));
    }

    #[test]
    fn test_format_c_unknown_entity_code_is_still_valid() {
        let result = classify(Some("T09ZZ0001B"));
        assert!(result.is_valid);
        assert_eq!(result.format, Some(UenFormat::C));
        assert_eq!(result.entity_type, None);
    }

    #[test]
    fn test_format_c_digit_in_fifth_position() {
        let result = classify(Some("S99L10001C"));
        assert_eq!(result.format, Some(UenFormat::C));
    }

    #[test]
    fn test_format_c_rejects_unknown_initial() {
        let result = classify(Some("X09LL0001B"));
        assert!(!result.is_valid);
        assert_eq!(result.format, None);
    }

    #[test]
    fn test_input_is_trimmed_and_uppercased() {
        let result = classify(Some("  t09ll0001b \n"));
        assert!(result.is_valid);
        assert_eq!(
            result.details,
            Some(ValidationDetails::Matched {
                uen: "T09LL0001B".to_string(),
                length: 10,
                pattern: UenFormat::C.pattern(),
            })
        );
    }

    #[test]
    fn test_missing_and_empty_have_distinct_errors() {
        let missing = classify(None);
        let empty = classify(Some(""));
        let blank = classify(Some("   "));

        assert!(!missing.is_valid);
        assert!(!empty.is_valid);
        assert_eq!(missing.error, Some(ERR_REQUIRED));
        assert_eq!(empty.error, Some(ERR_EMPTY));
        assert_eq!(blank.error, Some(ERR_EMPTY));
        assert_ne!(missing.error, empty.error);
    }

    #[test]
    fn test_unmatched_lists_formats() {
        let result = classify(Some("hello"));
        match result.details {
            Some(ValidationDetails::Unmatched { uen, length, formats }) => {
                assert_eq!(uen, "HELLO");
                assert_eq!(length, 5);
                assert_eq!(formats.len(), 3);
                assert_eq!(formats[1].example, "200912345A");
            }
            other => panic!("expected unmatched details, got {:?}", other),
        }
    }

    #[test]
    fn test_lengths_other_than_nine_or_ten_are_invalid() {
        for len in (0usize..=20).filter(|l| *l != 9 && *l != 10) {
            let candidate = "1".repeat(len.saturating_sub(1)) + if len > 0 { "A" } else { "" };
            assert!(!classify(Some(&candidate)).is_valid, "length {} accepted", len);
        }
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        assert!(!classify(Some("١٢٣٤٥٦٧٨A")).is_valid);
    }

    #[test]
    fn test_classify_is_idempotent() {
        for input in ["12345678A", "T09LL0001B", "nope", ""] {
            assert_eq!(classify(Some(input)), classify(Some(input)));
        }
    }

    #[test]
    fn test_all_patterns_compile() {
        let patterns = compile_patterns().unwrap();
        assert_eq!(patterns.len(), 3);
        assert!(PATTERNS.is_ok());
        for (format, regex) in &patterns {
            assert!(regex.is_match(format.example()), "{} example rejected", format);
        }
    }
}
