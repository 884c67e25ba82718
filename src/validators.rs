//! Per-kind validators as plain `&str -> bool` functions
//!
//! Handy where a single check is needed outside a [`crate::FieldRules`]
//! list, for example to enable a button as soon as a phone number looks
//! complete.

use crate::predicate::{
    char_len_max, char_len_min, email, full_name, http_url, not_blank, phone, phone_digits,
    Predicate,
};

/// `true` for an e-mail address of the shape `local@domain.tld`.
pub fn validate_email(value: &str) -> bool {
    email().check(value)
}

/// `true` for a phone number with 7 to 15 digits.
pub fn validate_phone(value: &str) -> bool {
    phone().check(value)
}

/// `true` for a phone number with `min_digits..=max_digits` digits.
pub fn validate_phone_with(value: &str, min_digits: usize, max_digits: usize) -> bool {
    phone_digits(min_digits, max_digits).check(value)
}

/// `true` for at least two words of letters, three characters or more.
pub fn validate_full_name(value: &str) -> bool {
    full_name().check(value)
}

/// `true` for an absolute `http`/`https` URL.
pub fn validate_url(value: &str) -> bool {
    http_url().check(value)
}

/// `false` for empty or whitespace-only values.
pub fn validate_required(value: &str) -> bool {
    not_blank().check(value)
}

/// `true` when the trimmed value has at least `min` characters.
pub fn validate_min_length(value: &str, min: usize) -> bool {
    char_len_min(min).check(value)
}

/// `true` when the trimmed value has at most `max` characters.
pub fn validate_max_length(value: &str, max: usize) -> bool {
    char_len_max(max).check(value)
}
