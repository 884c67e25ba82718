//! Error types
//!
//! Validation failures are data (see [`crate::ValidationResult`]) and never
//! show up here. These enums cover the two ways a caller can misuse the
//! crate: a malformed configuration, and naming a field the form does not
//! have.

use thiserror::Error;

use crate::rule::RuleKind;

/// A rule, field or form definition that can never validate anything
/// meaningfully.
///
/// Returned at construction time so that it surfaces in development and
/// tests rather than in front of a user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A `pattern` rule whose regular expression does not compile.
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// The rejected expression.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A field whose `maxLength` is lower than its `minLength`.
    #[error("maxLength {max} is lower than minLength {min}")]
    LengthBounds {
        /// Largest declared minimum.
        min: usize,
        /// Smallest declared maximum.
        max: usize,
    },

    /// A phone rule whose digit range is empty or starts at zero.
    #[error("phone digit range {min}..={max} is not usable")]
    PhoneRange {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
    },

    /// A numeric rule parameter below zero.
    #[error("{rule} bound must not be negative, got {value}")]
    NegativeBound {
        /// The rule carrying the bound.
        rule: RuleKind,
        /// The rejected value.
        value: i64,
    },

    /// Two fields declared with the same name.
    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),

    /// A cross-field rule naming a field the form does not declare.
    #[error("rule refers to undeclared field `{0}`")]
    UnknownField(String),

    /// A locale tag other than Spanish or English.
    #[error("unsupported locale `{0}`")]
    UnknownLocale(String),
}

/// Misuse of a live [`crate::FormController`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The operation named a field the form does not declare.
    #[error("form has no field named `{0}`")]
    UnknownField(String),
}
