//! Declarative form definitions
//!
//! With the `serde` feature a whole form can be described as data, loaded
//! from JSON or any other serde format, and turned into a [`FormConfig`].
//! Rules are tagged by their camelCase kind; messages are either a plain
//! string or an object with one entry per locale.
//!
//! ```rust
//! use formcheck::schema::FormSchema;
//! use formcheck::FormController;
//!
//! let schema: FormSchema = serde_json::from_str(r#"{
//!     "locale": "en",
//!     "fields": [
//!         {
//!             "name": "phone",
//!             "sanitize": "phone",
//!             "validateOn": "change",
//!             "rules": [
//!                 { "kind": "required" },
//!                 { "kind": "phone", "minDigits": 9, "maxDigits": 12 }
//!             ]
//!         }
//!     ]
//! }"#).unwrap();
//!
//! let mut form = FormController::new(schema.into_config().unwrap()).unwrap();
//! form.set_value("phone", "600 12").unwrap();
//! assert_eq!(
//!     form.field("phone").unwrap().error(),
//!     Some("Enter a valid phone number (9-12 digits)")
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::form::{CrossFieldRule, FieldConfig, FormConfig, ValidateOn};
use crate::locale::{Locale, Message};
use crate::predicate::{PHONE_MAX_DIGITS, PHONE_MIN_DIGITS};
use crate::rule::{FieldRules, Rule, RuleKind, Sanitizer};

/// A whole form as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    /// Message locale; Spanish when omitted.
    #[serde(default)]
    pub locale: Locale,
    /// Fields in display order.
    pub fields: Vec<FieldSchema>,
    /// Equality constraints between fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<MatchSchema>,
}

/// One field as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    /// Field name, unique within the form.
    pub name: String,
    /// Initial value.
    #[serde(default)]
    pub initial: String,
    /// Validation trigger.
    #[serde(default)]
    pub validate_on: ValidateOn,
    /// Sanitizer applied before storage and validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitize: Option<Sanitizer>,
    /// Rules in evaluation order.
    #[serde(default)]
    pub rules: Vec<RuleSchema>,
}

/// `field` must equal `other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSchema {
    /// Field that reports the mismatch.
    pub field: String,
    /// Field it is compared against.
    pub other: String,
    /// Message shown on mismatch.
    pub message: Message,
}

/// One rule as data.
///
/// Numeric bounds are signed so that negative values in a document are
/// reported as [`ConfigError::NegativeBound`] instead of a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
#[allow(missing_docs)]
pub enum RuleSchema {
    Required {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<Message>,
    },
    MinLength {
        value: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<Message>,
    },
    MaxLength {
        value: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<Message>,
    },
    Pattern {
        regex: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<Message>,
    },
    Email {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<Message>,
    },
    Phone {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_digits: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_digits: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<Message>,
    },
    FullName {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<Message>,
    },
    Url {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<Message>,
    },
}

fn bound(rule: RuleKind, value: i64) -> Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| ConfigError::NegativeBound { rule, value })
}

impl RuleSchema {
    /// Build the rule, rejecting negative bounds and bad patterns.
    pub fn into_rule(self) -> Result<Rule, ConfigError> {
        let (rule, message) = match self {
            RuleSchema::Required { message } => (Rule::required(), message),
            RuleSchema::MinLength { value, message } => (
                Rule::min_length(bound(RuleKind::MinLength, value)?),
                message,
            ),
            RuleSchema::MaxLength { value, message } => (
                Rule::max_length(bound(RuleKind::MaxLength, value)?),
                message,
            ),
            RuleSchema::Pattern { regex, message } => (Rule::pattern(&regex)?, message),
            RuleSchema::Email { message } => (Rule::email(), message),
            RuleSchema::Phone {
                min_digits,
                max_digits,
                message,
            } => {
                let min = match min_digits {
                    Some(value) => bound(RuleKind::Phone, value)?,
                    None => PHONE_MIN_DIGITS,
                };
                let max = match max_digits {
                    Some(value) => bound(RuleKind::Phone, value)?,
                    None => PHONE_MAX_DIGITS,
                };
                (Rule::phone_digits(min, max)?, message)
            }
            RuleSchema::FullName { message } => (Rule::full_name(), message),
            RuleSchema::Url { message } => (Rule::url(), message),
        };

        Ok(match message {
            Some(message) => rule.with_message(message),
            None => rule,
        })
    }
}

impl FieldSchema {
    /// Build the field declaration.
    pub fn into_config(self) -> Result<FieldConfig, ConfigError> {
        let rules = self
            .rules
            .into_iter()
            .map(RuleSchema::into_rule)
            .collect::<Result<Vec<_>, _>>()?;

        let mut rules = FieldRules::new(rules)?;
        if let Some(sanitizer) = self.sanitize {
            rules = rules.with_sanitizer(sanitizer);
        }

        Ok(FieldConfig::new(self.name)
            .rules(rules)
            .initial(self.initial)
            .validate_on(self.validate_on))
    }
}

impl FormSchema {
    /// Build the form declaration.
    ///
    /// Field names are checked when the config is turned into a
    /// [`crate::FormController`].
    pub fn into_config(self) -> Result<FormConfig, ConfigError> {
        let mut config = FormConfig::new(self.locale);
        for field in self.fields {
            config = config.field(field.into_config()?);
        }
        for rule in self.matches {
            config = config.cross_field(CrossFieldRule::matches(rule.field, rule.other, rule.message));
        }
        tracing::debug!(fields = config.fields().len(), "form schema loaded");
        Ok(config)
    }
}
