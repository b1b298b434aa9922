//! Short code generation and custom alias validation.
//!
//! Generated codes and custom aliases share one namespace, so both are checked
//! against the same reserved route words.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Base62 alphabet used for generated codes.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Minimum custom alias length.
pub const ALIAS_MIN_LENGTH: usize = 3;

/// Maximum custom alias length.
pub const ALIAS_MAX_LENGTH: usize = 20;

/// Characters allowed in custom aliases.
static ALIAS_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Words that collide with top-level routes and cannot be used as codes.
const RESERVED_CODES: &[&str] = &[
    "shorten",
    "stats",
    "analytics",
    "qr",
    "urls",
    "url",
    "health",
    "docs",
    "redoc",
    "openapi.json",
];

/// Returns true if `code` collides with a reserved route word
/// (case-insensitive).
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}

/// Generates a random base62 code of `length` characters.
///
/// Uses the thread-local CSPRNG (seeded from the OS), so codes cannot be
/// predicted from previously issued ones.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
/// - Cannot be a reserved route word
///
/// # Errors
///
/// Returns [`AppError::InvalidAlias`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_alias("demo").is_ok());
/// assert!(validate_custom_alias("My_Link-2024").is_ok());
///
/// assert!(validate_custom_alias("ab").is_err());        // Too short
/// assert!(validate_custom_alias("no spaces").is_err()); // Bad character
/// assert!(validate_custom_alias("stats").is_err());     // Reserved
/// ```
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    let length = alias.chars().count();
    if !(ALIAS_MIN_LENGTH..=ALIAS_MAX_LENGTH).contains(&length) {
        return Err(AppError::invalid_alias(
            format!(
                "Custom alias must be {}-{} characters",
                ALIAS_MIN_LENGTH, ALIAS_MAX_LENGTH
            ),
            json!({ "provided_length": length }),
        ));
    }

    if !ALIAS_REGEX.is_match(alias) {
        return Err(AppError::invalid_alias(
            "Custom alias can only contain letters, numbers, hyphens, and underscores",
            json!({ "alias": alias }),
        ));
    }

    if is_reserved(alias) {
        return Err(AppError::invalid_alias(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
