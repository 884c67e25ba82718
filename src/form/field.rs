//! Per-field state

use crate::engine::ValidationResult;
use crate::form::config::{FieldConfig, ValidateOn};
use crate::locale::{Locale, MessageCatalog};
use crate::rule::FieldRules;

/// Where a field is in its lifecycle.
///
/// `Pristine → Dirty → {Valid, Invalid}`. A field validated before the user
/// edited it (for instance by a submit attempt) goes straight to `Valid` or
/// `Invalid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldStatus {
    /// Never edited, never validated.
    Pristine,
    /// Edited but not validated since.
    Dirty,
    /// Last validation passed.
    Valid,
    /// Last validation failed.
    Invalid,
}

/// State of one field in a live form.
#[derive(Debug, Clone)]
pub struct FormField {
    name: String,
    value: String,
    initial: String,
    rules: FieldRules,
    validate_on: ValidateOn,
    touched: bool,
    dirty: bool,
    result: Option<ValidationResult>,
}

impl FormField {
    pub(crate) fn from_config(config: FieldConfig) -> Self {
        Self {
            name: config.name,
            value: config.initial.clone(),
            initial: config.initial,
            rules: config.rules,
            validate_on: config.validate_on,
            touched: false,
            dirty: false,
            result: None,
        }
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The stored value, sanitized if the field declares a sanitizer.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The value the field resets to.
    pub fn initial_value(&self) -> &str {
        &self.initial
    }

    /// The field's rules.
    pub fn rules(&self) -> &FieldRules {
        &self.rules
    }

    /// When the field validates on its own.
    pub fn validate_on(&self) -> ValidateOn {
        self.validate_on
    }

    /// Whether the field has lost focus at least once.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Whether the value has moved away from the initial value.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The last validation result, if the field has been validated.
    pub fn result(&self) -> Option<&ValidationResult> {
        self.result.as_ref()
    }

    /// The inline error to show: the first message of the last result.
    pub fn error(&self) -> Option<&str> {
        self.result.as_ref().and_then(ValidationResult::first_message)
    }

    /// Lifecycle position derived from the flags and the last result.
    pub fn status(&self) -> FieldStatus {
        match &self.result {
            Some(result) if result.is_valid() => FieldStatus::Valid,
            Some(_) => FieldStatus::Invalid,
            None if self.dirty => FieldStatus::Dirty,
            None => FieldStatus::Pristine,
        }
    }

    /// Valid as far as the form is concerned: the last result passed, or the
    /// field was never validated and is optional.
    pub(crate) fn counts_as_valid(&self) -> bool {
        match &self.result {
            Some(result) => result.is_valid(),
            None => !self.rules.is_required(),
        }
    }

    pub(crate) fn store(&mut self, value: String) {
        if value != self.initial {
            self.dirty = true;
        }
        self.value = value;
    }

    pub(crate) fn touch(&mut self) {
        self.touched = true;
    }

    pub(crate) fn set_result(&mut self, result: ValidationResult) {
        self.result = Some(result);
    }

    pub(crate) fn relocalize(&mut self, locale: Locale, catalog: &MessageCatalog) {
        if let Some(result) = &mut self.result {
            result.relocalize(locale, catalog);
        }
    }

    pub(crate) fn reset(&mut self, initial: Option<String>) {
        if let Some(initial) = initial {
            self.initial = initial;
        }
        self.value = self.initial.clone();
        self.touched = false;
        self.dirty = false;
        self.result = None;
    }
}

/// What an input component needs to render one field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldProps {
    /// Current value.
    pub value: String,
    /// Localized inline error, if the last validation failed.
    pub error: Option<String>,
    /// Whether the field has been blurred.
    pub touched: bool,
    /// Whether input should be disabled because a submit is in flight.
    pub disabled: bool,
}
