//! String predicates for form input
//!
//! Every predicate here implements `Predicate<str>` and `Predicate<String>`
//! and treats its input as an opaque user-typed value: malformed input is a
//! `false`, never a panic.

use regex::Regex;
use url::Url;

use super::combinators::Predicate;

/// Default lower bound on the number of digits in a phone number.
pub const PHONE_MIN_DIGITS: usize = 7;

/// Default upper bound on the number of digits in a phone number (E.164).
pub const PHONE_MAX_DIGITS: usize = 15;

/// Length of a value as a user perceives it: trimmed, control characters
/// excluded, counted in characters rather than bytes.
pub(crate) fn measured_len(value: &str) -> usize {
    value.trim().chars().filter(|c| !c.is_control()).count()
}

macro_rules! impl_for_string {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Predicate<String> for $ty {
                #[inline]
                fn check(&self, value: &String) -> bool {
                    Predicate::<str>::check(self, value.as_str())
                }
            }
        )+
    };
}

/// Predicate that checks a string has visible content.
#[derive(Clone, Copy, Default, Debug)]
pub struct NotBlank;

impl Predicate<str> for NotBlank {
    #[inline]
    fn check(&self, value: &str) -> bool {
        !value.trim().is_empty()
    }
}

/// Create a predicate that fails for empty and whitespace-only strings.
///
/// # Example
///
/// ```rust
/// use formcheck::predicate::*;
///
/// assert!(not_blank().check("a"));
/// assert!(!not_blank().check("   "));
/// ```
pub fn not_blank() -> NotBlank {
    NotBlank
}

/// Predicate that checks the measured length is in range.
#[derive(Clone, Copy, Debug)]
pub struct CharLen {
    min: usize,
    max: usize,
}

impl Predicate<str> for CharLen {
    #[inline]
    fn check(&self, value: &str) -> bool {
        let len = measured_len(value);
        len >= self.min && len <= self.max
    }
}

/// Create a predicate on the trimmed character count, both bounds inclusive.
///
/// Control characters do not count toward the length.
///
/// # Example
///
/// ```rust
/// use formcheck::predicate::*;
///
/// let p = char_len_between(2, 4);
/// assert!(p.check("  ñu  "));
/// assert!(!p.check("a\u{0}"));
/// assert!(!p.check("perro"));
/// ```
pub fn char_len_between(min: usize, max: usize) -> CharLen {
    CharLen { min, max }
}

/// Create a predicate that checks the measured length is at least `min`.
pub fn char_len_min(min: usize) -> CharLen {
    CharLen {
        min,
        max: usize::MAX,
    }
}

/// Create a predicate that checks the measured length is at most `max`.
pub fn char_len_max(max: usize) -> CharLen {
    CharLen { min: 0, max }
}

/// Predicate for e-mail addresses of the shape `local@domain.tld`.
#[derive(Clone, Copy, Default, Debug)]
pub struct Email;

fn is_domain_label(label: &str) -> bool {
    !label.is_empty()
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_alphanumeric() || c == '-')
}

impl Predicate<str> for Email {
    fn check(&self, value: &str) -> bool {
        if value.chars().any(|c| c.is_whitespace() || c.is_control()) || value.contains("..") {
            return false;
        }

        let mut parts = value.split('@');
        let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => (local, domain),
            _ => return false,
        };

        if local.is_empty() || local.starts_with('.') || local.ends_with('.') {
            return false;
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 || !labels.iter().all(|label| is_domain_label(label)) {
            return false;
        }

        labels
            .last()
            .is_some_and(|tld| tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic))
    }
}

/// Create an e-mail predicate.
///
/// # Example
///
/// ```rust
/// use formcheck::predicate::*;
///
/// assert!(email().check("User@Example.com"));
/// assert!(!email().check("user@@example.com"));
/// assert!(!email().check("user@.com"));
/// assert!(!email().check("user example.com"));
/// ```
pub fn email() -> Email {
    Email
}

/// Predicate for phone numbers written with digits, spaces, hyphens and
/// parentheses, optionally prefixed by `+`.
#[derive(Clone, Copy, Debug)]
pub struct Phone {
    min_digits: usize,
    max_digits: usize,
}

impl Predicate<str> for Phone {
    fn check(&self, value: &str) -> bool {
        let body = value.trim();
        let body = body.strip_prefix('+').unwrap_or(body);

        let mut digits = 0usize;
        for c in body.chars() {
            match c {
                '0'..='9' => digits += 1,
                ' ' | '-' | '(' | ')' => {}
                _ => return false,
            }
        }

        digits >= self.min_digits && digits <= self.max_digits
    }
}

/// Create a phone predicate with the default 7–15 digit range.
///
/// # Example
///
/// ```rust
/// use formcheck::predicate::*;
///
/// assert!(phone().check("+1 (555) 123-4567"));
/// assert!(!phone().check("123"));
/// assert!(!phone().check("555-CALL-NOW"));
/// ```
pub fn phone() -> Phone {
    phone_digits(PHONE_MIN_DIGITS, PHONE_MAX_DIGITS)
}

/// Create a phone predicate with an explicit digit-count range.
pub fn phone_digits(min_digits: usize, max_digits: usize) -> Phone {
    Phone {
        min_digits,
        max_digits,
    }
}

/// Predicate for a person's full name: at least two words of letters.
#[derive(Clone, Copy, Default, Debug)]
pub struct FullName;

pub(crate) fn is_name_mark(c: char) -> bool {
    matches!(c, '\'' | '’' | '-')
}

impl Predicate<str> for FullName {
    fn check(&self, value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.chars().count() < 3 {
            return false;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        tokens.len() >= 2
            && tokens.iter().all(|token| {
                token.chars().any(char::is_alphabetic)
                    && token.chars().all(|c| c.is_alphabetic() || is_name_mark(c))
            })
    }
}

/// Create a full-name predicate.
///
/// # Example
///
/// ```rust
/// use formcheck::predicate::*;
///
/// assert!(full_name().check("Ana M"));
/// assert!(full_name().check("José O'Neill-Pérez"));
/// assert!(!full_name().check("Ana"));
/// assert!(!full_name().check("Ana123"));
/// ```
pub fn full_name() -> FullName {
    FullName
}

/// Predicate for absolute `http`/`https` URLs with a host.
#[derive(Clone, Copy, Default, Debug)]
pub struct HttpUrl;

impl Predicate<str> for HttpUrl {
    fn check(&self, value: &str) -> bool {
        match Url::parse(value.trim()) {
            Ok(url) => {
                matches!(url.scheme(), "http" | "https")
                    && url.host_str().is_some_and(|host| !host.is_empty())
            }
            Err(_) => false,
        }
    }
}

/// Create an `http`/`https` URL predicate.
///
/// # Example
///
/// ```rust
/// use formcheck::predicate::*;
///
/// assert!(http_url().check("https://clinica.example/citas"));
/// assert!(!http_url().check("ftp://clinica.example"));
/// assert!(!http_url().check("/citas"));
/// ```
pub fn http_url() -> HttpUrl {
    HttpUrl
}

/// Predicate that checks a string matches a regular expression.
#[derive(Clone, Debug)]
pub struct Matches(pub Regex);

impl Matches {
    /// The compiled expression.
    pub fn regex(&self) -> &Regex {
        &self.0
    }
}

impl Predicate<str> for Matches {
    #[inline]
    fn check(&self, value: &str) -> bool {
        self.0.is_match(value.trim())
    }
}

/// Create a predicate from an already compiled regular expression.
///
/// The expression sees the trimmed value, so `^`/`$` anchors ignore
/// surrounding whitespace.
///
/// # Example
///
/// ```rust
/// use formcheck::predicate::*;
/// use regex::Regex;
///
/// let postcode = matches(Regex::new(r"^\d{5}$").unwrap());
/// assert!(postcode.check(" 28013 "));
/// assert!(!postcode.check("2801"));
/// ```
pub fn matches(regex: Regex) -> Matches {
    Matches(regex)
}

impl_for_string!(NotBlank, CharLen, Email, Phone, FullName, HttpUrl, Matches);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::PredicateExt;

    #[test]
    fn test_not_blank() {
        assert!(not_blank().check("a"));
        assert!(!not_blank().check(""));
        assert!(!not_blank().check(" \t\n"));
    }

    #[test]
    fn test_char_len_counts_characters_not_bytes() {
        assert!(char_len_max(3).check("ñaú"));
        assert!(char_len_min(3).check("ñaú"));
    }

    #[test]
    fn test_char_len_ignores_control_and_edges() {
        assert_eq!(measured_len("  ab\u{7}c  "), 3);
        assert!(char_len_max(3).check("  ab\u{7}c  "));
    }

    #[test]
    fn test_email_accepts_common_shapes() {
        assert!(email().check("user@example.com"));
        assert!(email().check("first.last+tag@mail.vet.example"));
        assert!(email().check("USER@EXAMPLE.COM"));
    }

    #[test]
    fn test_email_rejects_malformed() {
        for bad in [
            "user@@example.com",
            "user@.com",
            "user example.com",
            "user@example",
            "@example.com",
            "user@",
            "user..name@example.com",
            "user@example..com",
            ".user@example.com",
            "user.@example.com",
            "user@-example.com",
            "user@example.c",
            "user@example.c0m",
            "user@exa mple.com",
        ] {
            assert!(!email().check(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_phone_default_range() {
        assert!(phone().check("+1 (555) 123-4567"));
        assert!(phone().check("600123456"));
        assert!(phone().check("1234567"));
        assert!(!phone().check("123456"));
        assert!(!phone().check("1234567890123456"));
    }

    #[test]
    fn test_phone_rejects_misplaced_plus_and_letters() {
        assert!(!phone().check("34+600123456"));
        assert!(!phone().check("++34600123456"));
        assert!(!phone().check("600.123.456"));
    }

    #[test]
    fn test_phone_custom_range() {
        let p = phone_digits(9, 9);
        assert!(p.check("600 123 456"));
        assert!(!p.check("+34 600 123 456"));
    }

    #[test]
    fn test_full_name() {
        assert!(full_name().check("Ana M"));
        assert!(full_name().check("  María   de la Luz  "));
        assert!(full_name().check("Zoë D’Arcy"));
        assert!(!full_name().check("Ana"));
        assert!(!full_name().check("Ana123 Pérez"));
        assert!(!full_name().check("Ana -"));
        assert!(!full_name().check("Al"));
    }

    #[test]
    fn test_http_url() {
        assert!(http_url().check("http://localhost:8080/path"));
        assert!(http_url().check(" https://example.com "));
        assert!(!http_url().check("mailto:ana@example.com"));
        assert!(!http_url().check("javascript:alert(1)"));
        assert!(!http_url().check("not a url"));
    }

    #[test]
    fn test_matches() {
        let p = matches(Regex::new(r"^\d{5}$").unwrap());
        assert!(p.check("28013"));
        assert!(p.check("  28013\n"));
        assert!(!p.check("2801"));
    }

    #[test]
    fn test_string_impls_forward() {
        assert!(email().check(&String::from("a@b.co")));
        assert!(!not_blank().check(&String::new()));
    }

    #[test]
    fn test_combined_contact_predicate() {
        let contact = PredicateExt::<str>::or(email(), phone());
        assert!(contact.check("ana@vet.example"));
        assert!(contact.check("600 123 456"));
        assert!(!contact.check("tomorrow"));
    }
}
