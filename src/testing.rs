//! Testing utilities for field validation
//!
//! Assertion macros for [`ValidationResult`](crate::ValidationResult) and,
//! with the `proptest` feature, `Arbitrary` implementations for the small
//! enums of this crate.
//!
//! # Examples
//!
//! ```rust
//! use formcheck::{assert_invalid, assert_rule_errors, assert_valid};
//! use formcheck::{validate_field, FieldRules, Locale, Rule, RuleKind};
//!
//! let rules = FieldRules::new([Rule::required(), Rule::email()]).unwrap();
//!
//! assert_valid!(validate_field("ana@example.com", &rules, Locale::Es));
//! assert_invalid!(validate_field("ana", &rules, Locale::Es));
//! assert_rule_errors!(validate_field("", &rules, Locale::Es), [RuleKind::Required]);
//! ```

/// Assert that a [`ValidationResult`](crate::ValidationResult) has no errors.
///
/// # Example
///
/// ```rust
/// use formcheck::{assert_valid, validate_field, FieldRules, Locale, Rule};
///
/// let rules = FieldRules::new([Rule::full_name()]).unwrap();
/// assert_valid!(validate_field("Ana Martínez", &rules, Locale::Es));
/// ```
#[macro_export]
macro_rules! assert_valid {
    ($result:expr) => {
        let result: $crate::ValidationResult = $result;
        if !result.is_valid() {
            panic!("Expected valid, got errors: {:?}", result.errors());
        }
    };
}

/// Assert that a [`ValidationResult`](crate::ValidationResult) has at least
/// one error.
///
/// # Example
///
/// ```rust
/// use formcheck::{assert_invalid, validate_field, FieldRules, Locale, Rule};
///
/// let rules = FieldRules::new([Rule::url()]).unwrap();
/// assert_invalid!(validate_field("ftp://vet.example", &rules, Locale::En));
/// ```
#[macro_export]
macro_rules! assert_invalid {
    ($result:expr) => {
        let result: $crate::ValidationResult = $result;
        if result.is_valid() {
            panic!(
                "Expected errors, got valid value: {:?}",
                result.sanitized_value()
            );
        }
    };
}

/// Assert that a [`ValidationResult`](crate::ValidationResult) failed with
/// exactly these rule kinds, in order.
///
/// # Example
///
/// ```rust
/// use formcheck::{assert_rule_errors, validate_field, FieldRules, Locale, Rule, RuleKind};
///
/// let rules = FieldRules::new([Rule::min_length(10), Rule::email()]).unwrap();
/// assert_rule_errors!(
///     validate_field("ana", &rules, Locale::Es),
///     [RuleKind::MinLength, RuleKind::Email]
/// );
/// ```
#[macro_export]
macro_rules! assert_rule_errors {
    ($result:expr, [$($kind:expr),* $(,)?]) => {
        let result: $crate::ValidationResult = $result;
        let kinds: ::std::vec::Vec<$crate::RuleKind> =
            result.errors().iter().map(|error| error.kind()).collect();
        let expected: ::std::vec::Vec<$crate::RuleKind> = ::std::vec![$($kind),*];
        if kinds != expected {
            panic!(
                "Expected errors {:?}, got {:?} ({:?})",
                expected,
                kinds,
                result.errors()
            );
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for crate::Locale {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::sample::select(crate::Locale::ALL.to_vec()).boxed()
    }
}

#[cfg(feature = "proptest")]
impl Arbitrary for crate::RuleKind {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::sample::select(crate::RuleKind::ALL.to_vec()).boxed()
    }
}

#[cfg(feature = "proptest")]
impl Arbitrary for crate::Sanitizer {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use crate::Sanitizer;

        prop_oneof![
            Just(Sanitizer::String),
            Just(Sanitizer::Email),
            Just(Sanitizer::Phone),
            Just(Sanitizer::Name),
            Just(Sanitizer::Html),
        ]
        .boxed()
    }
}

#[cfg(feature = "proptest")]
impl Arbitrary for crate::ValidateOn {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use crate::ValidateOn;

        prop_oneof![
            Just(ValidateOn::Change),
            Just(ValidateOn::Blur),
            Just(ValidateOn::Submit),
        ]
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use crate::{validate_field, FieldRules, Locale, Rule, RuleKind};

    fn email_rules() -> FieldRules {
        FieldRules::new([Rule::required(), Rule::email()]).unwrap()
    }

    #[test]
    fn assert_valid_macro() {
        assert_valid!(validate_field("ana@example.com", &email_rules(), Locale::Es));
    }

    #[test]
    fn assert_invalid_macro() {
        assert_invalid!(validate_field("ana@", &email_rules(), Locale::Es));
    }

    #[test]
    fn assert_rule_errors_macro() {
        assert_rule_errors!(
            validate_field("   ", &email_rules(), Locale::En),
            [RuleKind::Required]
        );
        assert_rule_errors!(validate_field("ana@example.com", &email_rules(), Locale::En), []);
    }

    #[test]
    #[should_panic(expected = "Expected valid, got errors")]
    fn assert_valid_panics_on_errors() {
        assert_valid!(validate_field("", &email_rules(), Locale::Es));
    }

    #[test]
    #[should_panic(expected = "Expected errors, got valid value")]
    fn assert_invalid_panics_on_valid() {
        assert_invalid!(validate_field("ana@example.com", &email_rules(), Locale::Es));
    }

    #[test]
    #[should_panic(expected = "Expected errors [Email]")]
    fn assert_rule_errors_panics_on_mismatch() {
        assert_rule_errors!(
            validate_field("", &email_rules(), Locale::Es),
            [RuleKind::Email]
        );
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use crate::{Locale, Sanitizer};
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sanitizer_arbitrary_is_idempotent(
                sanitizer in any::<Sanitizer>(),
                raw in ".{0,40}",
            ) {
                let once = sanitizer.apply(&raw);
                prop_assert_eq!(sanitizer.apply(&once), once);
            }

            #[test]
            fn locale_arbitrary_round_trips_code(locale in any::<Locale>()) {
                prop_assert_eq!(locale.code().parse::<Locale>().unwrap(), locale);
            }
        }
    }
}
