//! Form declarations
//!
//! A [`FormConfig`] lists the fields of a form in display order, each with
//! its rules, initial value and validation trigger, plus the cross-field
//! rules and the message locale and catalogue.

use std::fmt;
use std::sync::Arc;

use crate::form::values::FormValues;
use crate::locale::{Locale, Message, MessageCatalog};
use crate::rule::FieldRules;

/// When a field validates on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValidateOn {
    /// On every value change.
    Change,
    /// When the field loses focus.
    #[default]
    Blur,
    /// Only when the whole form is validated.
    Submit,
}

/// Declaration of one field.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub(crate) name: String,
    pub(crate) rules: FieldRules,
    pub(crate) initial: String,
    pub(crate) validate_on: ValidateOn,
}

impl FieldConfig {
    /// A field without rules, an empty initial value, validated on blur.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: FieldRules::none(),
            initial: String::new(),
            validate_on: ValidateOn::default(),
        }
    }

    /// Set the field's rules.
    pub fn rules(mut self, rules: FieldRules) -> Self {
        self.rules = rules;
        self
    }

    /// Set the initial value.
    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.initial = value.into();
        self
    }

    /// Set the validation trigger.
    pub fn validate_on(mut self, trigger: ValidateOn) -> Self {
        self.validate_on = trigger;
        self
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

type CrossCheck = dyn Fn(&str, &FormValues) -> bool + Send + Sync;

/// A rule on one field that also reads other fields' values.
///
/// It runs after the field's own rules whenever that field validates with
/// a non-blank value, and reports failures as [`crate::RuleKind::Custom`].
#[derive(Clone)]
pub struct CrossFieldRule {
    pub(crate) field: String,
    pub(crate) depends_on: Vec<String>,
    pub(crate) message: Message,
    check: Arc<CrossCheck>,
}

impl CrossFieldRule {
    /// A check on `field` given its value and a snapshot of every field.
    ///
    /// `depends_on` lists the other fields `check` reads; the form rejects
    /// names it does not declare.
    pub fn new<F>(
        field: impl Into<String>,
        depends_on: impl IntoIterator<Item = impl Into<String>>,
        message: impl Into<Message>,
        check: F,
    ) -> Self
    where
        F: Fn(&str, &FormValues) -> bool + Send + Sync + 'static,
    {
        Self {
            field: field.into(),
            depends_on: depends_on.into_iter().map(Into::into).collect(),
            message: message.into(),
            check: Arc::new(check),
        }
    }

    /// `field` must equal `other`, e.g. an e-mail confirmation.
    ///
    /// ```rust
    /// use formcheck::{CrossFieldRule, FieldConfig, FormConfig, FormController, Locale, Message};
    ///
    /// let config = FormConfig::new(Locale::En)
    ///     .field(FieldConfig::new("email"))
    ///     .field(FieldConfig::new("confirm"))
    ///     .cross_field(CrossFieldRule::matches(
    ///         "confirm",
    ///         "email",
    ///         Message::localized("Los correos no coinciden", "Emails do not match"),
    ///     ));
    /// let mut form = FormController::new(config).unwrap();
    ///
    /// form.set_value("email", "ana@example.com").unwrap();
    /// form.set_value("confirm", "ana@example.org").unwrap();
    /// assert!(!form.validate_all());
    /// assert_eq!(form.field_props("confirm").unwrap().error.as_deref(), Some("Emails do not match"));
    /// ```
    pub fn matches(
        field: impl Into<String>,
        other: impl Into<String>,
        message: impl Into<Message>,
    ) -> Self {
        let other = other.into();
        let lookup = other.clone();
        Self::new(field, [other], message, move |value, values| {
            values.get(&lookup).unwrap_or_default() == value
        })
    }

    /// The field this rule reports on.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub(crate) fn check(&self, value: &str, values: &FormValues) -> bool {
        (self.check)(value, values)
    }
}

impl fmt::Debug for CrossFieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossFieldRule")
            .field("field", &self.field)
            .field("depends_on", &self.depends_on)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Everything needed to build a [`crate::FormController`].
#[derive(Debug, Clone)]
pub struct FormConfig {
    pub(crate) fields: Vec<FieldConfig>,
    pub(crate) cross_field: Vec<CrossFieldRule>,
    pub(crate) locale: Locale,
    pub(crate) catalog: MessageCatalog,
}

impl FormConfig {
    /// An empty form using the built-in catalogue.
    pub fn new(locale: Locale) -> Self {
        Self {
            fields: Vec::new(),
            cross_field: Vec::new(),
            locale,
            catalog: MessageCatalog::default(),
        }
    }

    /// Append a field; fields keep declaration order.
    pub fn field(mut self, field: FieldConfig) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a cross-field rule.
    pub fn cross_field(mut self, rule: CrossFieldRule) -> Self {
        self.cross_field.push(rule);
        self
    }

    /// Replace the message catalogue.
    pub fn catalog(mut self, catalog: MessageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// The declared fields.
    pub fn fields(&self) -> &[FieldConfig] {
        &self.fields
    }

    /// The message locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_config_defaults() {
        let field = FieldConfig::new("nombre");
        assert_eq!(field.name(), "nombre");
        assert_eq!(field.initial, "");
        assert_eq!(field.validate_on, ValidateOn::Blur);
        assert!(field.rules.is_empty());
    }

    #[test]
    fn test_form_config_keeps_declaration_order() {
        let config = FormConfig::default()
            .field(FieldConfig::new("b"))
            .field(FieldConfig::new("a"));
        let names: Vec<&str> = config.fields().iter().map(FieldConfig::name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(config.locale(), Locale::Es);
    }

    #[test]
    fn test_matches_rule_reads_other_field() {
        let rule = CrossFieldRule::matches("confirm", "email", "no");
        let values = FormValues::from_pairs([("email", "a@b.co"), ("confirm", "a@b.co")]);
        assert!(rule.check("a@b.co", &values));
        assert!(!rule.check("x@b.co", &values));
        assert_eq!(rule.depends_on, vec!["email".to_string()]);
    }
}
