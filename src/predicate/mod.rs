//! Predicate combinators for form input
//!
//! Predicates are small, reusable checks that can be composed with
//! `and`, `or` and `not`. The engine builds every built-in rule from them,
//! and callers can use them directly for ad-hoc checks.
//!
//! # Example
//!
//! ```rust
//! use formcheck::predicate::*;
//!
//! let contact = PredicateExt::<str>::or(email(), phone());
//! assert!(contact.check("ana@vet.example"));
//! assert!(contact.check("+34 600 123 456"));
//!
//! let nickname = PredicateExt::<str>::and(not_blank(), char_len_max(12));
//! assert!(nickname.check("Toby"));
//! assert!(!nickname.check("Sir Toby of the Hill"));
//! ```

mod combinators;
pub(crate) mod string;

pub mod prelude;

// Re-export core trait
pub use combinators::{Predicate, PredicateExt};

// Re-export combinator types
pub use combinators::{And, Not, Or};

// Re-export string predicates
pub use string::{
    char_len_between, char_len_max, char_len_min, email, full_name, http_url, matches, not_blank,
    phone, phone_digits, CharLen, Email, FullName, HttpUrl, Matches, NotBlank, Phone,
    PHONE_MAX_DIGITS, PHONE_MIN_DIGITS,
};
