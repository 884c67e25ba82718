//! The validation engine
//!
//! [`validate_field`] applies a field's [`FieldRules`] to a value and
//! returns a [`ValidationResult`]. It is a pure function: the same value,
//! rules, locale and catalogue always produce the same result.
//!
//! # Policy
//!
//! - The declared sanitizer runs first; rules see the sanitized value.
//! - A blank value is checked only against `required`. An optional blank
//!   field is valid; a required one fails with exactly one error.
//! - Otherwise every rule runs, in order, and every failure is reported.
//!
//! # Example
//!
//! ```rust
//! use formcheck::{validate_field, FieldRules, Locale, Rule, RuleKind};
//!
//! let rules = FieldRules::new([Rule::min_length(5), Rule::email()]).unwrap();
//!
//! let result = validate_field("a", &rules, Locale::En);
//! assert!(!result.is_valid());
//! assert_eq!(
//!     result.errors().iter().map(|e| e.kind()).collect::<Vec<_>>(),
//!     vec![RuleKind::MinLength, RuleKind::Email]
//! );
//!
//! let empty = validate_field("", &rules, Locale::En);
//! assert!(empty.is_valid());
//! ```

use std::fmt;

use crate::locale::{Locale, Message, MessageArgs, MessageCatalog};
use crate::predicate::{not_blank, Predicate};
use crate::rule::{FieldRules, Rule, RuleKind};
use crate::{Semigroup, Validation};

/// One violated rule.
///
/// Besides the rendered message it keeps what the message was rendered
/// from, so the same failure can be shown again in another locale.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldError {
    kind: RuleKind,
    message: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    template: Option<Message>,
    #[cfg_attr(feature = "serde", serde(skip))]
    args: MessageArgs,
}

impl FieldError {
    /// Create an error for `kind` with an already rendered message.
    ///
    /// The message is kept as is in every locale.
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind,
            template: Some(Message::text(message.clone())),
            message,
            args: MessageArgs::default(),
        }
    }

    /// Render an error from a message override, or from `catalog` when
    /// there is none.
    pub(crate) fn render(
        kind: RuleKind,
        template: Option<Message>,
        args: MessageArgs,
        locale: Locale,
        catalog: &MessageCatalog,
    ) -> Self {
        let mut error = Self {
            kind,
            message: String::new(),
            template,
            args,
        };
        error.relocalize(locale, catalog);
        error
    }

    pub(crate) fn relocalize(&mut self, locale: Locale, catalog: &MessageCatalog) {
        self.message = match &self.template {
            Some(template) => self.args.apply(template.for_locale(locale)),
            None => catalog.render(self.kind, locale, &self.args),
        };
    }

    /// The rule that failed.
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// The localized message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Outcome of validating one value.
///
/// The value is valid exactly when there are no errors; the two can not
/// disagree because the error list is the only state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
    sanitized_value: String,
}

impl ValidationResult {
    pub(crate) fn new(sanitized_value: String, errors: Vec<FieldError>) -> Self {
        Self {
            errors,
            sanitized_value,
        }
    }

    /// Whether no rule failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failures in rule order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The first failure's message, the one an input shows inline.
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(FieldError::message)
    }

    /// The value after sanitization, whether or not it is valid.
    pub fn sanitized_value(&self) -> &str {
        &self.sanitized_value
    }

    /// Re-render every message in `locale` without re-checking the value.
    pub(crate) fn relocalize(&mut self, locale: Locale, catalog: &MessageCatalog) {
        for error in &mut self.errors {
            error.relocalize(locale, catalog);
        }
    }

    /// Convert into an accumulating [`Validation`] carrying the sanitized
    /// value on success.
    pub fn into_validation(self) -> Validation<String, Vec<FieldError>> {
        if self.errors.is_empty() {
            Validation::Success(self.sanitized_value)
        } else {
            Validation::Failure(self.errors)
        }
    }
}

/// Errors accumulate; the left-hand sanitized value is kept.
impl Semigroup for ValidationResult {
    fn combine(mut self, other: Self) -> Self {
        self.errors = self.errors.combine(other.errors);
        self
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValidationResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("sanitizedValue", &self.sanitized_value)?;
        state.end()
    }
}

pub(crate) fn render_error(
    rule: &Rule,
    locale: Locale,
    catalog: &MessageCatalog,
) -> FieldError {
    FieldError::render(
        rule.kind(),
        rule.message().cloned(),
        rule.message_args(),
        locale,
        catalog,
    )
}

/// Validate `value` against `rules` with the built-in message catalogue.
pub fn validate_field(value: &str, rules: &FieldRules, locale: Locale) -> ValidationResult {
    validate_field_with(value, rules, locale, MessageCatalog::builtin())
}

/// Validate `value` against `rules`, rendering messages from `catalog`.
///
/// ```rust
/// use formcheck::{validate_field_with, FieldRules, Locale, MessageCatalog, Rule, RuleKind};
///
/// let catalog = MessageCatalog::default()
///     .with_template(RuleKind::Required, Locale::Es, "Dinos el nombre de tu mascota");
/// let rules = FieldRules::new([Rule::required()]).unwrap();
///
/// let result = validate_field_with("  ", &rules, Locale::Es, &catalog);
/// assert_eq!(result.first_message(), Some("Dinos el nombre de tu mascota"));
/// ```
pub fn validate_field_with(
    value: &str,
    rules: &FieldRules,
    locale: Locale,
    catalog: &MessageCatalog,
) -> ValidationResult {
    let sanitized = rules.sanitize(value);

    let outcome = if not_blank().check(sanitized.as_str()) {
        Validation::all(rules.rules().iter().map(|rule| {
            Validation::check(rule.accepts(&sanitized), (), || {
                render_error(rule, locale, catalog)
            })
        }))
    } else {
        // Blank: format rules are vacuously satisfied, only `required` applies.
        match rules
            .rules()
            .iter()
            .find(|rule| rule.kind() == RuleKind::Required)
        {
            Some(required) => Validation::Failure(vec![render_error(required, locale, catalog)]),
            None => Validation::Success(Vec::new()),
        }
    };

    let errors = match outcome {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors,
    };

    tracing::trace!(
        rules = rules.len(),
        errors = errors.len(),
        %locale,
        "validated field value"
    );

    ValidationResult::new(sanitized, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Sanitizer;
    use proptest::prelude::*;

    fn kinds(result: &ValidationResult) -> Vec<RuleKind> {
        result.errors().iter().map(FieldError::kind).collect()
    }

    #[test]
    fn test_optional_empty_field_is_valid() {
        let rules = FieldRules::new([Rule::email()]).unwrap();
        let result = validate_field("", &rules, Locale::Es);
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_required_blank_short_circuits() {
        let rules =
            FieldRules::new([Rule::required(), Rule::min_length(3), Rule::email()]).unwrap();
        let result = validate_field("   ", &rules, Locale::En);
        assert_eq!(kinds(&result), vec![RuleKind::Required]);
        assert_eq!(result.first_message(), Some("This field is required"));
    }

    #[test]
    fn test_accumulates_every_failure() {
        let rules = FieldRules::new([Rule::min_length(5), Rule::email()]).unwrap();
        let result = validate_field("a", &rules, Locale::Es);
        assert_eq!(kinds(&result), vec![RuleKind::MinLength, RuleKind::Email]);
        assert_eq!(
            result.first_message(),
            Some("Debe tener al menos 5 caracteres")
        );
    }

    #[test]
    fn test_length_measures_sanitized_value() {
        let rules = FieldRules::new([Rule::max_length(3)])
            .unwrap()
            .with_sanitizer(Sanitizer::String);
        let result = validate_field("a\u{0}\u{0}\u{0}b  ", &rules, Locale::Es);
        assert!(result.is_valid());
        assert_eq!(result.sanitized_value(), "ab");
    }

    #[test]
    fn test_control_characters_not_counted_without_sanitizer() {
        let rules = FieldRules::new([Rule::min_length(3)]).unwrap();
        assert!(!validate_field("ab\u{1}\u{2}", &rules, Locale::Es).is_valid());
    }

    #[test]
    fn test_sanitized_value_reported_for_invalid_input() {
        let rules = FieldRules::new([Rule::email()])
            .unwrap()
            .with_sanitizer(Sanitizer::Email);
        let result = validate_field(" NOT AN EMAIL ", &rules, Locale::Es);
        assert!(!result.is_valid());
        assert_eq!(result.sanitized_value(), "notanemail");
    }

    #[test]
    fn test_sanitizer_can_make_value_valid() {
        let rules = FieldRules::new([Rule::required(), Rule::email()])
            .unwrap()
            .with_sanitizer(Sanitizer::Email);
        let result = validate_field(" Ana@Example.COM ", &rules, Locale::Es);
        assert!(result.is_valid());
        assert_eq!(result.sanitized_value(), "ana@example.com");
    }

    #[test]
    fn test_message_override_per_locale() {
        let rules = FieldRules::new([Rule::min_length(8)
            .with_message(Message::localized("Mínimo {min}", "At least {min}"))])
        .unwrap();
        assert_eq!(
            validate_field("abc", &rules, Locale::Es).first_message(),
            Some("Mínimo 8")
        );
        assert_eq!(
            validate_field("abc", &rules, Locale::En).first_message(),
            Some("At least 8")
        );
    }

    #[test]
    fn test_required_override_used_for_blank() {
        let rules = FieldRules::new([Rule::required().with_message("¿Cómo se llama?")]).unwrap();
        assert_eq!(
            validate_field("", &rules, Locale::En).first_message(),
            Some("¿Cómo se llama?")
        );
    }

    #[test]
    fn test_no_rules_always_valid() {
        let result = validate_field("<anything>", &FieldRules::none(), Locale::Es);
        assert!(result.is_valid());
        assert_eq!(result.sanitized_value(), "<anything>");
    }

    #[test]
    fn test_into_validation() {
        let rules = FieldRules::new([Rule::full_name()]).unwrap();
        assert_eq!(
            validate_field("Ana M", &rules, Locale::Es).into_validation(),
            Validation::Success("Ana M".to_string())
        );
        assert!(validate_field("Ana", &rules, Locale::Es)
            .into_validation()
            .is_failure());
    }

    #[test]
    fn test_relocalize_keeps_errors_and_rerenders() {
        let rules = FieldRules::new([
            Rule::min_length(8),
            Rule::email().with_message(Message::localized("Correo raro", "Odd e-mail")),
        ])
        .unwrap();
        let mut result = validate_field("ana", &rules, Locale::Es);
        let before = kinds(&result);

        result.relocalize(Locale::En, MessageCatalog::builtin());

        assert_eq!(kinds(&result), before);
        assert_eq!(result.sanitized_value(), "ana");
        let messages: Vec<&str> = result.errors().iter().map(FieldError::message).collect();
        assert_eq!(messages, vec!["Must be at least 8 characters", "Odd e-mail"]);
    }

    #[test]
    fn test_prerendered_error_survives_relocalize() {
        let mut error = FieldError::new(RuleKind::Custom, "Los correos no coinciden");
        error.relocalize(Locale::En, MessageCatalog::builtin());
        assert_eq!(error.message(), "Los correos no coinciden");
    }

    #[test]
    fn test_results_combine() {
        let left = ValidationResult::new(
            "x".to_string(),
            vec![FieldError::new(RuleKind::Email, "e")],
        );
        let right = ValidationResult::new(
            "y".to_string(),
            vec![FieldError::new(RuleKind::Custom, "c")],
        );
        let combined = left.combine(right);
        assert_eq!(combined.sanitized_value(), "x");
        assert_eq!(kinds(&combined), vec![RuleKind::Email, RuleKind::Custom]);
    }

    fn arb_rules() -> impl Strategy<Value = FieldRules> {
        let rule = prop_oneof![
            Just(Rule::required()),
            (0usize..10).prop_map(Rule::min_length),
            (10usize..20).prop_map(Rule::max_length),
            Just(Rule::email()),
            Just(Rule::phone()),
            Just(Rule::full_name()),
            Just(Rule::url()),
        ];
        prop::collection::vec(rule, 0..6).prop_map(|rules| FieldRules::new(rules).unwrap())
    }

    proptest! {
        #[test]
        fn prop_valid_iff_no_errors(value in ".{0,24}", rules in arb_rules()) {
            for locale in Locale::ALL {
                let result = validate_field(&value, &rules, locale);
                prop_assert_eq!(result.is_valid(), result.errors().is_empty());
            }
        }

        #[test]
        fn prop_deterministic(value in ".{0,24}", rules in arb_rules()) {
            prop_assert_eq!(
                validate_field(&value, &rules, Locale::En),
                validate_field(&value, &rules, Locale::En)
            );
        }

        #[test]
        fn prop_errors_never_exceed_rules(value in ".{0,24}", rules in arb_rules()) {
            prop_assert!(validate_field(&value, &rules, Locale::Es).errors().len() <= rules.len());
        }
    }
}
