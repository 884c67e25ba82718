//! Validation rules
//!
//! A [`Rule`] pairs one [`Constraint`] from a closed set with an optional
//! message override. [`FieldRules`] is the ordered rule list of one field
//! plus the [`Sanitizer`] its raw input goes through first.
//!
//! Constructors reject configurations that could never be satisfied or
//! never compile, so a `FieldRules` value is always usable.
//!
//! # Example
//!
//! ```rust
//! use formcheck::{FieldRules, Rule, Sanitizer};
//!
//! let rules = FieldRules::new([Rule::required(), Rule::email()])
//!     .unwrap()
//!     .with_sanitizer(Sanitizer::Email);
//! assert!(rules.is_required());
//! assert_eq!(rules.len(), 2);
//!
//! assert!(FieldRules::new([Rule::min_length(10), Rule::max_length(3)]).is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::ConfigError;
use crate::locale::{Message, MessageArgs};
use crate::predicate::{self, Predicate, PHONE_MAX_DIGITS, PHONE_MIN_DIGITS};
use crate::sanitize;

/// Fieldless identifier of a rule, reported with every failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum RuleKind {
    /// Value must not be blank.
    Required,
    /// Lower bound on length.
    MinLength,
    /// Upper bound on length.
    MaxLength,
    /// Regular expression match.
    Pattern,
    /// E-mail address.
    Email,
    /// Phone number.
    Phone,
    /// First and last name.
    FullName,
    /// `http`/`https` URL.
    Url,
    /// Caller-supplied check.
    Custom,
}

impl RuleKind {
    /// Every rule kind, in declaration order.
    pub const ALL: [RuleKind; 9] = [
        RuleKind::Required,
        RuleKind::MinLength,
        RuleKind::MaxLength,
        RuleKind::Pattern,
        RuleKind::Email,
        RuleKind::Phone,
        RuleKind::FullName,
        RuleKind::Url,
        RuleKind::Custom,
    ];

    /// Stable camelCase identifier.
    pub fn key(self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::MinLength => "minLength",
            RuleKind::MaxLength => "maxLength",
            RuleKind::Pattern => "pattern",
            RuleKind::Email => "email",
            RuleKind::Phone => "phone",
            RuleKind::FullName => "fullName",
            RuleKind::Url => "url",
            RuleKind::Custom => "custom",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// String transform applied to raw input before storage and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Sanitizer {
    /// [`sanitize::sanitize_string`].
    String,
    /// [`sanitize::sanitize_email`].
    Email,
    /// [`sanitize::sanitize_phone`].
    Phone,
    /// [`sanitize::sanitize_name`].
    Name,
    /// [`sanitize::sanitize_html`].
    Html,
}

impl Sanitizer {
    /// Run the transform.
    pub fn apply(self, raw: &str) -> String {
        match self {
            Sanitizer::String => sanitize::sanitize_string(raw),
            Sanitizer::Email => sanitize::sanitize_email(raw),
            Sanitizer::Phone => sanitize::sanitize_phone(raw),
            Sanitizer::Name => sanitize::sanitize_name(raw),
            Sanitizer::Html => sanitize::sanitize_html(raw),
        }
    }
}

/// A named, caller-supplied check.
#[derive(Clone)]
pub struct CustomCheck {
    name: String,
    check: Arc<dyn Fn(&str) -> bool + Send + Sync>,
}

impl CustomCheck {
    /// The name given at construction, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomCheck({})", self.name)
    }
}

/// The closed set of constraints a rule can express.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Fails for blank values.
    Required,
    /// Inclusive minimum length.
    MinLength(usize),
    /// Inclusive maximum length.
    MaxLength(usize),
    /// Must match the expression somewhere in the value; anchor it for a
    /// full match.
    Pattern(predicate::Matches),
    /// E-mail address.
    Email,
    /// Phone number with a digit count in `min_digits..=max_digits`.
    Phone {
        /// Fewest digits accepted.
        min_digits: usize,
        /// Most digits accepted.
        max_digits: usize,
    },
    /// At least two words of letters.
    FullName,
    /// `http`/`https` URL.
    Url,
    /// Caller-supplied predicate.
    Custom(CustomCheck),
}

impl Constraint {
    /// The identifier reported for failures of this constraint.
    pub fn kind(&self) -> RuleKind {
        match self {
            Constraint::Required => RuleKind::Required,
            Constraint::MinLength(_) => RuleKind::MinLength,
            Constraint::MaxLength(_) => RuleKind::MaxLength,
            Constraint::Pattern(_) => RuleKind::Pattern,
            Constraint::Email => RuleKind::Email,
            Constraint::Phone { .. } => RuleKind::Phone,
            Constraint::FullName => RuleKind::FullName,
            Constraint::Url => RuleKind::Url,
            Constraint::Custom(_) => RuleKind::Custom,
        }
    }

    fn accepts(&self, value: &str) -> bool {
        match self {
            Constraint::Required => predicate::not_blank().check(value),
            Constraint::MinLength(min) => predicate::char_len_min(*min).check(value),
            Constraint::MaxLength(max) => predicate::char_len_max(*max).check(value),
            Constraint::Pattern(pattern) => pattern.check(value),
            Constraint::Email => predicate::email().check(value.trim()),
            Constraint::Phone {
                min_digits,
                max_digits,
            } => predicate::phone_digits(*min_digits, *max_digits).check(value),
            Constraint::FullName => predicate::full_name().check(value),
            Constraint::Url => predicate::http_url().check(value),
            Constraint::Custom(custom) => (custom.check)(value.trim()),
        }
    }

    fn message_args(&self) -> MessageArgs {
        match self {
            Constraint::MinLength(min) => MessageArgs {
                min: Some(*min),
                max: None,
            },
            Constraint::MaxLength(max) => MessageArgs {
                min: None,
                max: Some(*max),
            },
            Constraint::Phone {
                min_digits,
                max_digits,
            } => MessageArgs {
                min: Some(*min_digits),
                max: Some(*max_digits),
            },
            _ => MessageArgs::default(),
        }
    }
}

/// One constraint plus an optional message override.
#[derive(Debug, Clone)]
pub struct Rule {
    constraint: Constraint,
    message: Option<Message>,
}

impl Rule {
    fn from_constraint(constraint: Constraint) -> Self {
        Self {
            constraint,
            message: None,
        }
    }

    /// Value must not be empty or whitespace-only.
    pub fn required() -> Self {
        Self::from_constraint(Constraint::Required)
    }

    /// Value must be at least `min` characters long.
    pub fn min_length(min: usize) -> Self {
        Self::from_constraint(Constraint::MinLength(min))
    }

    /// Value must be at most `max` characters long.
    pub fn max_length(max: usize) -> Self {
        Self::from_constraint(Constraint::MaxLength(max))
    }

    /// Value must match `pattern`.
    ///
    /// ```rust
    /// use formcheck::{ConfigError, Rule};
    ///
    /// assert!(Rule::pattern(r"^\d{5}$").is_ok());
    /// assert!(matches!(
    ///     Rule::pattern("(unclosed"),
    ///     Err(ConfigError::InvalidPattern { .. })
    /// ));
    /// ```
    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern).map_err(|err| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self::from_regex(regex))
    }

    /// Value must match an already compiled expression.
    pub fn from_regex(regex: Regex) -> Self {
        Self::from_constraint(Constraint::Pattern(predicate::matches(regex)))
    }

    /// Value must be an e-mail address.
    pub fn email() -> Self {
        Self::from_constraint(Constraint::Email)
    }

    /// Value must be a phone number with 7 to 15 digits.
    pub fn phone() -> Self {
        Self::from_constraint(Constraint::Phone {
            min_digits: PHONE_MIN_DIGITS,
            max_digits: PHONE_MAX_DIGITS,
        })
    }

    /// Value must be a phone number with `min..=max` digits.
    pub fn phone_digits(min: usize, max: usize) -> Result<Self, ConfigError> {
        if min == 0 || min > max {
            return Err(ConfigError::PhoneRange { min, max });
        }
        Ok(Self::from_constraint(Constraint::Phone {
            min_digits: min,
            max_digits: max,
        }))
    }

    /// Value must be a first and last name.
    pub fn full_name() -> Self {
        Self::from_constraint(Constraint::FullName)
    }

    /// Value must be an absolute `http` or `https` URL.
    pub fn url() -> Self {
        Self::from_constraint(Constraint::Url)
    }

    /// Value must satisfy `check`. The check sees the trimmed value.
    ///
    /// ```rust
    /// use formcheck::{Locale, Rule, FieldRules, validate_field};
    ///
    /// let species = Rule::custom("species", |v| ["perro", "gato"].contains(&v))
    ///     .with_message("Solo atendemos perros y gatos");
    /// let rules = FieldRules::new([species]).unwrap();
    ///
    /// let result = validate_field("loro", &rules, Locale::Es);
    /// assert_eq!(result.first_message(), Some("Solo atendemos perros y gatos"));
    /// ```
    pub fn custom<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::from_constraint(Constraint::Custom(CustomCheck {
            name: name.into(),
            check: Arc::new(check),
        }))
    }

    /// Replace the catalogue message for this rule.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The identifier reported when this rule fails.
    pub fn kind(&self) -> RuleKind {
        self.constraint.kind()
    }

    /// The rule's constraint.
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// The message override, if any.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub(crate) fn accepts(&self, value: &str) -> bool {
        self.constraint.accepts(value)
    }

    pub(crate) fn message_args(&self) -> MessageArgs {
        self.constraint.message_args()
    }
}

/// The ordered rules of one field and its input sanitizer.
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    rules: Vec<Rule>,
    sanitizer: Option<Sanitizer>,
}

impl FieldRules {
    /// Build a rule list, rejecting contradictory length bounds.
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Result<Self, ConfigError> {
        let rules: Vec<Rule> = rules.into_iter().collect();

        let min = rules
            .iter()
            .filter_map(|rule| match rule.constraint {
                Constraint::MinLength(min) => Some(min),
                _ => None,
            })
            .max();
        let max = rules
            .iter()
            .filter_map(|rule| match rule.constraint {
                Constraint::MaxLength(max) => Some(max),
                _ => None,
            })
            .min();

        if let (Some(min), Some(max)) = (min, max) {
            if max < min {
                return Err(ConfigError::LengthBounds { min, max });
            }
        }

        Ok(Self {
            rules,
            sanitizer: None,
        })
    }

    /// No rules and no sanitizer; every value is valid.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sanitize raw input with `sanitizer` before storing and validating it.
    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = Some(sanitizer);
        self
    }

    /// The rules, in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The declared sanitizer.
    pub fn sanitizer(&self) -> Option<Sanitizer> {
        self.sanitizer
    }

    /// Whether any rule is `required`.
    pub fn is_required(&self) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.kind() == RuleKind::Required)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply the sanitizer, or copy the input when none is declared.
    pub fn sanitize(&self, raw: &str) -> String {
        match self.sanitizer {
            Some(sanitizer) => sanitizer.apply(raw),
            None => raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_kinds() {
        assert_eq!(Rule::required().kind(), RuleKind::Required);
        assert_eq!(Rule::min_length(2).kind(), RuleKind::MinLength);
        assert_eq!(Rule::phone().kind(), RuleKind::Phone);
        assert_eq!(Rule::custom("x", |_| true).kind(), RuleKind::Custom);
    }

    #[test]
    fn test_rule_kind_keys_are_camel_case() {
        assert_eq!(RuleKind::FullName.to_string(), "fullName");
        assert_eq!(RuleKind::MaxLength.key(), "maxLength");
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let err = Rule::pattern("[a-").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "[a-"));
    }

    #[test]
    fn test_phone_range_checked() {
        assert_eq!(
            Rule::phone_digits(0, 5).unwrap_err(),
            ConfigError::PhoneRange { min: 0, max: 5 }
        );
        assert_eq!(
            Rule::phone_digits(9, 8).unwrap_err(),
            ConfigError::PhoneRange { min: 9, max: 8 }
        );
        assert!(Rule::phone_digits(9, 9).is_ok());
    }

    #[test]
    fn test_length_bounds_checked_across_rules() {
        let err = FieldRules::new([
            Rule::min_length(2),
            Rule::max_length(20),
            Rule::min_length(25),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigError::LengthBounds { min: 25, max: 20 });

        assert!(FieldRules::new([Rule::min_length(3), Rule::max_length(3)]).is_ok());
    }

    #[test]
    fn test_sanitize_without_sanitizer_copies() {
        let rules = FieldRules::none();
        assert_eq!(rules.sanitize("  raw  "), "  raw  ");
        assert!(rules.is_empty());
        assert!(!rules.is_required());
    }

    #[test]
    fn test_sanitize_with_sanitizer() {
        let rules = FieldRules::none().with_sanitizer(Sanitizer::Phone);
        assert_eq!(rules.sanitize("+34 600-123"), "+34600123");
    }

    #[test]
    fn test_custom_check_debug_hides_closure() {
        let rule = Rule::custom("especie", |_| true);
        assert!(format!("{:?}", rule).contains("CustomCheck(especie)"));
    }

    #[test]
    fn test_pattern_agrees_with_matches_predicate() {
        let regex = regex::Regex::new(r"^[A-Z]{2}-\d{6}$").unwrap();
        let rule = Rule::from_regex(regex.clone());
        let predicate = predicate::matches(regex);
        for value in ["ES-123456", "  ES-123456 ", "ES-12345", "es-123456"] {
            assert_eq!(rule.accepts(value), predicate.check(value), "{value:?}");
        }
    }

    #[test]
    fn test_pattern_sees_trimmed_value() {
        let rule = Rule::pattern(r"^\d{5}$").unwrap();
        assert!(rule.accepts(" 28013 "));
        assert!(!rule.accepts("2801"));
    }
}
