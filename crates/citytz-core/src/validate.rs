// crates/citytz-core/src/validate.rs

//! Input normalization and rejection of obviously hostile queries.
//!
//! The pattern table is a heuristic guard for free-text inputs. It is not a
//! parser and does not attempt to decode or canonicalize what it scans.

use crate::error::{ValidationError, ValidationKind};

/// Default maximum length (in bytes) of a city name query.
pub const DEFAULT_MAX_CITY_LEN: usize = 100;

/// Default maximum length (in bytes) of a free-text search query.
pub const DEFAULT_MAX_SEARCH_LEN: usize = 200;

const INPUT_FIELD: &str = "input";
const ISO_FIELD: &str = "iso_code";

/// `(pattern, category)` pairs, matched against the lowercased input.
pub const SUSPICIOUS_PATTERNS: &[(&str, &str)] = &[
    ("../", "path traversal"),
    ("..\\", "path traversal"),
    ("..%2f", "path traversal"),
    ("..%5c", "path traversal"),
    ("<script", "markup injection"),
    ("</script>", "markup injection"),
    ("javascript:", "protocol injection"),
    ("data:", "protocol injection"),
    ("eval(", "code execution"),
    ("exec(", "code execution"),
    ("system(", "code execution"),
];

/// Category of the first suspicious pattern found in `input`, if any.
pub fn suspicious_category(input: &str) -> Option<&'static str> {
    let lowered = input.to_lowercase();
    SUSPICIOUS_PATTERNS
        .iter()
        .find(|(pattern, _)| lowered.contains(pattern))
        .map(|&(_, category)| category)
}

/// Validates and normalizes a free-text query.
///
/// Returns the trimmed input. An empty string is valid and means "no query".
pub fn validate_query(raw: &str, max_len: usize) -> Result<String, ValidationError> {
    if raw.is_empty() {
        return Ok(String::new());
    }
    if raw.len() > max_len {
        return Err(ValidationError::new(
            INPUT_FIELD,
            ValidationKind::TooLong {
                len: raw.len(),
                max: max_len,
            },
        ));
    }

    let trimmed = raw.trim();
    if let Some(category) = suspicious_category(trimmed) {
        return Err(
            ValidationError::new(INPUT_FIELD, ValidationKind::SuspiciousPattern { category })
                .with_value(trimmed),
        );
    }
    Ok(trimmed.to_string())
}

/// Same as [`validate_query`], for input that has not been decoded yet.
pub fn validate_query_bytes(raw: &[u8], max_len: usize) -> Result<String, ValidationError> {
    if raw.len() > max_len {
        return Err(ValidationError::new(
            INPUT_FIELD,
            ValidationKind::TooLong {
                len: raw.len(),
                max: max_len,
            },
        ));
    }
    let text = std::str::from_utf8(raw)
        .map_err(|_| ValidationError::new(INPUT_FIELD, ValidationKind::InvalidEncoding))?;
    validate_query(text, max_len)
}

/// Validates an ISO 3166 alpha-2 or alpha-3 code and upper-cases it.
///
/// `""` is valid and returned unchanged. Whitespace is trimmed first, so
/// `"  "` ends up as a zero-length code and is rejected.
pub fn validate_country_code(raw: &str) -> Result<String, ValidationError> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    // Checked before upper-casing: Unicode case mapping can grow a string
    // ("ß" -> "SS").
    let trimmed = raw.trim();
    let all_letters = trimmed.chars().all(|c| c.is_ascii_alphabetic());
    let code = trimmed.to_ascii_uppercase();
    let kind = match trimmed.chars().count() {
        2 | 3 if all_letters => return Ok(code),
        2 => ValidationKind::InvalidIso2,
        3 => ValidationKind::InvalidIso3,
        _ => ValidationKind::InvalidCodeLength,
    };
    Err(ValidationError::new(ISO_FIELD, kind).with_value(code))
}
