//! Format validation for common string patterns
//!
//! Every primitive is a pure `fn(&str) -> bool`. Malformed input is reported
//! as `false`; none of them panic.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

// ============================================================================
// Pre-compiled Regex Patterns
// ============================================================================

/// Non-whitespace local part and domain, domain must contain a dot
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

/// 3 to 16 characters, letters, digits and underscore
static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,16}$").unwrap());

/// Exactly ten ASCII digits
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Dotted-quad IPv4, each octet 0-255
static IPV4_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .unwrap()
});

/// 3 or 6 hex digits with an optional leading '#'
static COLOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").unwrap());

/// `/segment/segment` with a single level of nesting
static PATH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/[A-Za-z0-9_]+)?/[A-Za-z0-9_]*$").unwrap());

// ============================================================================
// Format Validators
// ============================================================================

/// Validate email format
///
/// # Example
/// ```
/// use restdoc_validation::formats::validate_email;
///
/// assert!(validate_email("a@b.com"));
/// assert!(!validate_email("not-an-email"));
/// ```
pub fn validate_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Validate a username: 3-16 characters of `[A-Za-z0-9_]`
pub fn validate_username(value: &str) -> bool {
    USERNAME_REGEX.is_match(value)
}

/// Validate password strength
///
/// At least 8 characters with one lowercase letter, one uppercase letter and
/// one digit.
pub fn validate_password_strength(value: &str) -> bool {
    value.chars().count() >= 8
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
}

/// Validate a phone number: exactly 10 digits, no separators
pub fn validate_phone_number(value: &str) -> bool {
    PHONE_REGEX.is_match(value)
}

/// Validate an IPv4 address
///
/// # Example
/// ```
/// use restdoc_validation::formats::validate_ip_address;
///
/// assert!(validate_ip_address("192.168.0.1"));
/// assert!(!validate_ip_address("256.1.1.1"));
/// ```
pub fn validate_ip_address(value: &str) -> bool {
    IPV4_REGEX.is_match(value)
}

/// Validate a hex color
///
/// Whitespace is stripped first. The pattern accepts an optional `#`, but the
/// value is only reported valid when the normalized form starts with `#`, so
/// `"fff"` is rejected while `"#fff"` passes.
pub fn validate_color(value: &str) -> bool {
    let normalized: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    COLOR_REGEX.is_match(&normalized) && normalized.starts_with('#')
}

/// Validate an absolute URL
///
/// The value must parse and its serialized form must equal the input
/// exactly, so inputs the parser would normalize are rejected.
///
/// # Example
/// ```
/// use restdoc_validation::formats::validate_url;
///
/// assert!(validate_url("https://example.com/docs"));
/// assert!(!validate_url("https://example.com"));
/// assert!(!validate_url("not a url"));
/// ```
pub fn validate_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(parsed) => parsed.as_str() == value,
        Err(_) => false,
    }
}

/// Validate an image reference (an absolute URL, see [`validate_url`])
pub fn validate_image(value: &str) -> bool {
    validate_url(value)
}

/// Validate a route-like path with one level of nesting (`/users/list`)
pub fn validate_path(value: &str) -> bool {
    PATH_REGEX.is_match(value)
}
