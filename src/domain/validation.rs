//! Field format rules for user data.

use once_cell::sync::Lazy;
use regex::Regex;

/// Latin letters, accented vowels, ñ and spaces.
pub static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÁÉÍÓÚÑáéíóúñ ]+$").expect("valid name regex"));

/// `local@domain.tld` with a top-level domain of at least two letters.
pub static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Stricter shape enforced on request bodies (TLD of 2 to 6 letters).
pub static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,6}$").expect("valid email regex")
});

/// Check a first or last name against [`NAME_PATTERN`].
pub fn is_valid_name(value: &str) -> bool {
    NAME_PATTERN.is_match(value)
}

/// Check an email address against [`EMAIL_PATTERN`].
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}
