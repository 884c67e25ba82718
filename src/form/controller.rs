//! The form state machine
//!
//! [`FormController`] owns the state of one mounted form. A UI layer binds
//! its input events to [`set_value`](FormController::set_value) and
//! [`handle_blur`](FormController::handle_blur), renders from
//! [`field_props`](FormController::field_props), and hands its submit
//! action to [`submit`](FormController::submit).
//!
//! Every method runs synchronously inside one event; the only suspension
//! point is the caller's handler future inside `submit`.

use std::collections::HashMap;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use futures::FutureExt;
use tracing::Instrument;

use crate::engine::{validate_field_with, FieldError, ValidationResult};
use crate::error::{ConfigError, FormError};
use crate::form::config::{CrossFieldRule, FormConfig, ValidateOn};
use crate::form::field::{FieldProps, FieldStatus, FormField};
use crate::form::values::FormValues;
use crate::locale::{Locale, MessageArgs, MessageCatalog};
use crate::predicate::{not_blank, Predicate};
use crate::rule::RuleKind;
use crate::Semigroup;

/// Result of [`FormController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<T, E> {
    /// A submission was already in flight; the handler was not called.
    Busy,
    /// At least one field failed validation; the handler was not called.
    Invalid,
    /// The handler ran and settled with this result.
    Submitted(Result<T, E>),
}

impl<T, E> SubmitOutcome<T, E> {
    /// Whether the handler was called.
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

/// Holds `is_submitting` set for as long as it lives.
struct SubmittingGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> SubmittingGuard<'a> {
    fn arm(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

/// State machine for one form.
///
/// # Example
///
/// ```rust
/// use formcheck::{FieldConfig, FieldRules, FormConfig, FormController, Locale, Rule, ValidateOn};
///
/// let config = FormConfig::new(Locale::En).field(
///     FieldConfig::new("email")
///         .rules(FieldRules::new([Rule::required(), Rule::email()]).unwrap())
///         .validate_on(ValidateOn::Change),
/// );
/// let mut form = FormController::new(config).unwrap();
///
/// form.set_value("email", "bad").unwrap();
/// assert_eq!(form.field("email").unwrap().error(), Some("Enter a valid email address"));
///
/// form.set_value("email", "user@example.com").unwrap();
/// assert_eq!(form.field("email").unwrap().error(), None);
/// assert!(form.is_valid());
/// ```
#[derive(Debug)]
pub struct FormController {
    fields: Vec<FormField>,
    index: HashMap<String, usize>,
    cross_field: Vec<CrossFieldRule>,
    locale: Locale,
    catalog: MessageCatalog,
    is_valid: bool,
    is_submitting: bool,
    submit_count: u32,
}

impl FormController {
    /// Build the initial state from `config`.
    ///
    /// Fails on duplicate field names and on cross-field rules that name
    /// undeclared fields.
    pub fn new(config: FormConfig) -> Result<Self, ConfigError> {
        let mut fields = Vec::with_capacity(config.fields.len());
        let mut index = HashMap::with_capacity(config.fields.len());

        for field in config.fields {
            if index.contains_key(&field.name) {
                return Err(ConfigError::DuplicateField(field.name));
            }
            index.insert(field.name.clone(), fields.len());
            fields.push(FormField::from_config(field));
        }

        for rule in &config.cross_field {
            let unknown = std::iter::once(&rule.field)
                .chain(&rule.depends_on)
                .find(|name| !index.contains_key(name.as_str()));
            if let Some(name) = unknown {
                return Err(ConfigError::UnknownField(name.clone()));
            }
        }

        let mut form = Self {
            fields,
            index,
            cross_field: config.cross_field,
            locale: config.locale,
            catalog: config.catalog,
            is_valid: true,
            is_submitting: false,
            submit_count: 0,
        };
        form.refresh_validity();

        tracing::debug!(fields = form.fields.len(), locale = %form.locale, "form created");
        Ok(form)
    }

    fn position(&self, name: &str) -> Result<usize, FormError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    fn refresh_validity(&mut self) {
        self.is_valid = self.fields.iter().all(FormField::counts_as_valid);
    }

    fn run_validation(&mut self, idx: usize) -> bool {
        let field = &self.fields[idx];
        let mut result =
            validate_field_with(field.value(), field.rules(), self.locale, &self.catalog);

        if not_blank().check(result.sanitized_value()) {
            let mut cross = self
                .cross_field
                .iter()
                .filter(|rule| rule.field == field.name())
                .peekable();

            if cross.peek().is_some() {
                let values = self.values();
                for rule in cross {
                    if !rule.check(result.sanitized_value(), &values) {
                        let error = FieldError::render(
                            RuleKind::Custom,
                            Some(rule.message.clone()),
                            MessageArgs::default(),
                            self.locale,
                            &self.catalog,
                        );
                        let failed =
                            ValidationResult::new(result.sanitized_value().to_string(), vec![error]);
                        result = result.combine(failed);
                    }
                }
            }
        }

        let valid = result.is_valid();
        tracing::debug!(
            field = field.name(),
            valid,
            errors = result.errors().len(),
            "field validated"
        );
        self.fields[idx].set_result(result);
        valid
    }

    /// Store a new value for `name`.
    ///
    /// The value is sanitized first when the field declares a sanitizer.
    /// Fields with [`ValidateOn::Change`] validate immediately.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let idx = self.position(name)?;
        let raw = value.into();
        let field = &mut self.fields[idx];
        let value = field.rules().sanitize(&raw);

        tracing::trace!(field = name, sanitized = value != raw, "value changed");
        field.store(value);

        if field.validate_on() == ValidateOn::Change {
            self.run_validation(idx);
            self.refresh_validity();
        }
        Ok(())
    }

    /// Mark `name` as touched; fields with [`ValidateOn::Blur`] validate now.
    pub fn handle_blur(&mut self, name: &str) -> Result<(), FormError> {
        let idx = self.position(name)?;
        let field = &mut self.fields[idx];
        field.touch();

        if field.validate_on() == ValidateOn::Blur {
            self.run_validation(idx);
            self.refresh_validity();
        }
        Ok(())
    }

    /// Validate one field now, whatever its trigger. Returns its validity.
    pub fn validate_field(&mut self, name: &str) -> Result<bool, FormError> {
        let idx = self.position(name)?;
        let valid = self.run_validation(idx);
        self.refresh_validity();
        Ok(valid)
    }

    /// Validate every field, whatever its trigger. Returns form validity.
    pub fn validate_all(&mut self) -> bool {
        for idx in 0..self.fields.len() {
            self.run_validation(idx);
        }
        self.refresh_validity();
        tracing::debug!(valid = self.is_valid, "form validated");
        self.is_valid
    }

    /// Restore every field to its initial value and clear touched, dirty
    /// and error state. `submit_count` returns to zero; `is_submitting` is
    /// left alone.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset(None);
        }
        self.submit_count = 0;
        self.refresh_validity();
        tracing::debug!("form reset");
    }

    /// Like [`reset`](Self::reset), but the supplied values become the new
    /// initial values of their fields. Nothing changes if any name is
    /// unknown.
    pub fn reset_to<K, V>(
        &mut self,
        values: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), FormError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let values = FormValues::from_pairs(values);
        if let Some(unknown) = values.names().find(|name| !self.index.contains_key(*name)) {
            return Err(FormError::UnknownField(unknown.to_string()));
        }

        for field in &mut self.fields {
            let initial = values.get(field.name()).map(str::to_string);
            field.reset(initial);
        }
        self.submit_count = 0;
        self.refresh_validity();
        tracing::debug!(fields = values.len(), "form reset to new values");
        Ok(())
    }

    /// Mark a submission as in flight. Returns `false`, changing nothing,
    /// when one already is.
    ///
    /// For callers that run the submit action themselves instead of through
    /// [`submit`](Self::submit).
    pub fn begin_submit(&mut self) -> bool {
        if self.is_submitting {
            return false;
        }
        self.is_submitting = true;
        true
    }

    /// Mark the in-flight submission as settled.
    pub fn end_submit(&mut self) {
        self.is_submitting = false;
    }

    /// Validate the form and, if it is valid, pass its values to `handler`.
    ///
    /// `is_submitting` stays set while the handler's future runs. It is
    /// cleared when the handler settles, when it panics (the panic then
    /// continues) and when the `submit` future is dropped before settling.
    pub async fn submit<F, Fut, T, E>(&mut self, handler: F) -> SubmitOutcome<T, E>
    where
        F: FnOnce(FormValues) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if self.is_submitting {
            tracing::warn!("submit ignored: a submission is already in flight");
            return SubmitOutcome::Busy;
        }

        if !self.validate_all() {
            tracing::debug!("submit blocked by invalid fields");
            return SubmitOutcome::Invalid;
        }

        self.submit_count += 1;
        let values = self.values();
        let span = tracing::debug_span!("form_submit", attempt = self.submit_count);

        let guard = SubmittingGuard::arm(&mut self.is_submitting);
        let settled = AssertUnwindSafe(async move { handler(values).await })
            .catch_unwind()
            .instrument(span)
            .await;
        drop(guard);

        match settled {
            Ok(result) => {
                tracing::debug!(ok = result.is_ok(), "submit handler settled");
                SubmitOutcome::Submitted(result)
            }
            Err(payload) => {
                tracing::error!("submit handler panicked");
                panic::resume_unwind(payload)
            }
        }
    }

    /// Switch the message locale and re-render the messages of validated
    /// fields. Nothing is re-validated, so form validity does not change.
    pub fn set_locale(&mut self, locale: Locale) {
        if locale == self.locale {
            return;
        }
        self.locale = locale;
        for field in &mut self.fields {
            field.relocalize(locale, &self.catalog);
        }
        tracing::debug!(%locale, "form locale changed");
    }

    /// The message locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// The field called `name`.
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.index.get(name).map(|&idx| &self.fields[idx])
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter()
    }

    /// Current values in declaration order.
    pub fn values(&self) -> FormValues {
        FormValues::from_pairs(
            self.fields
                .iter()
                .map(|field| (field.name(), field.value())),
        )
    }

    /// Every field's last result passed, or it was never validated and is
    /// optional.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Successful validations that reached the submit handler since the
    /// last reset.
    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Whether the submit action should be enabled: nothing is in flight
    /// and no touched field is invalid.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting
            && !self
                .fields
                .iter()
                .any(|field| field.is_touched() && field.status() == FieldStatus::Invalid)
    }

    /// The render contract for one input.
    pub fn field_props(&self, name: &str) -> Option<FieldProps> {
        self.field(name).map(|field| FieldProps {
            value: field.value().to_string(),
            error: field.error().map(str::to_string),
            touched: field.is_touched(),
            disabled: self.is_submitting,
        })
    }

    /// `(name, first message)` for every invalid field, in order.
    pub fn errors(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .filter_map(|field| field.error().map(|message| (field.name(), message)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::config::FieldConfig;
    use crate::rule::{FieldRules, Rule, Sanitizer};
    use tracing_test::traced_test;

    fn booking_form() -> FormController {
        let config = FormConfig::new(Locale::Es)
            .field(
                FieldConfig::new("owner")
                    .rules(FieldRules::new([Rule::required(), Rule::full_name()]).unwrap())
                    .validate_on(ValidateOn::Blur),
            )
            .field(
                FieldConfig::new("email")
                    .rules(
                        FieldRules::new([Rule::required(), Rule::email()])
                            .unwrap()
                            .with_sanitizer(Sanitizer::Email),
                    )
                    .validate_on(ValidateOn::Change),
            )
            .field(
                FieldConfig::new("notes")
                    .rules(
                        FieldRules::new([Rule::max_length(20)])
                            .unwrap()
                            .with_sanitizer(Sanitizer::Html),
                    )
                    .validate_on(ValidateOn::Submit),
            );
        FormController::new(config).unwrap()
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let config = FormConfig::default()
            .field(FieldConfig::new("a"))
            .field(FieldConfig::new("a"));
        assert_eq!(
            FormController::new(config).unwrap_err(),
            ConfigError::DuplicateField("a".to_string())
        );
    }

    #[test]
    fn test_cross_rule_on_unknown_field_rejected() {
        let config = FormConfig::default()
            .field(FieldConfig::new("a"))
            .cross_field(CrossFieldRule::matches("a", "b", "no"));
        assert_eq!(
            FormController::new(config).unwrap_err(),
            ConfigError::UnknownField("b".to_string())
        );
    }

    #[test]
    fn test_initial_validity_reflects_required_fields() {
        let form = booking_form();
        assert!(!form.is_valid());

        let optional = FormController::new(
            FormConfig::default().field(FieldConfig::new("notes")),
        )
        .unwrap();
        assert!(optional.is_valid());
    }

    #[test]
    fn test_unknown_field_is_error() {
        let mut form = booking_form();
        assert_eq!(
            form.set_value("pet", "Toby"),
            Err(FormError::UnknownField("pet".to_string()))
        );
        assert!(form.handle_blur("pet").is_err());
        assert!(form.field_props("pet").is_none());
    }

    #[test]
    fn test_blur_field_defers_until_blur() {
        let mut form = booking_form();
        form.set_value("owner", "Ana").unwrap();
        assert_eq!(form.field("owner").unwrap().status(), FieldStatus::Dirty);
        assert!(form.field("owner").unwrap().error().is_none());

        form.handle_blur("owner").unwrap();
        let owner = form.field("owner").unwrap();
        assert!(owner.is_touched());
        assert_eq!(owner.status(), FieldStatus::Invalid);
        assert_eq!(owner.error(), Some("Introduce nombre y apellido"));
    }

    #[test]
    fn test_change_field_sanitizes_and_validates() {
        let mut form = booking_form();
        form.set_value("email", " Ana@Example.COM ").unwrap();
        let email = form.field("email").unwrap();
        assert_eq!(email.value(), "ana@example.com");
        assert_eq!(email.status(), FieldStatus::Valid);
    }

    #[test]
    fn test_submit_field_ignores_blur() {
        let mut form = booking_form();
        form.set_value("notes", "<b>demasiado largo para la nota</b>").unwrap();
        form.handle_blur("notes").unwrap();
        assert!(form.field("notes").unwrap().result().is_none());

        assert!(!form.validate_field("notes").unwrap());
        assert_eq!(form.field("notes").unwrap().status(), FieldStatus::Invalid);
    }

    #[test]
    fn test_can_submit_only_blocks_on_touched_invalid() {
        let mut form = booking_form();
        form.set_value("email", "bad").unwrap();
        assert!(form.can_submit());

        form.handle_blur("email").unwrap();
        assert!(!form.can_submit());

        assert!(form.begin_submit());
        form.set_value("email", "ana@example.com").unwrap();
        assert!(!form.can_submit());
        assert!(form.field_props("email").unwrap().disabled);
        form.end_submit();
        assert!(form.can_submit());
    }

    #[test]
    fn test_begin_submit_is_exclusive() {
        let mut form = booking_form();
        assert!(form.begin_submit());
        assert!(!form.begin_submit());
        form.end_submit();
        assert!(form.begin_submit());
    }

    #[test]
    fn test_reset_keeps_submitting_flag() {
        let mut form = booking_form();
        assert!(form.begin_submit());
        form.reset();
        assert!(form.is_submitting());
    }

    #[test]
    fn test_reset_to_rejects_unknown_names_atomically() {
        let mut form = booking_form();
        form.set_value("owner", "Ana M").unwrap();
        let err = form
            .reset_to([("owner", "Luis P"), ("pet", "Toby")])
            .unwrap_err();
        assert_eq!(err, FormError::UnknownField("pet".to_string()));
        assert_eq!(form.field("owner").unwrap().value(), "Ana M");
    }

    #[test]
    fn test_set_locale_rerenders_messages() {
        let mut form = booking_form();
        form.set_value("email", "bad").unwrap();
        assert_eq!(
            form.field("email").unwrap().error(),
            Some("Introduce un correo electrónico válido")
        );

        form.set_locale(Locale::En);
        assert_eq!(
            form.field("email").unwrap().error(),
            Some("Enter a valid email address")
        );
        assert!(form.field("owner").unwrap().result().is_none());
    }

    #[test]
    fn test_errors_lists_invalid_fields_in_order() {
        let mut form = booking_form();
        form.validate_all();
        let names: Vec<&str> = form.errors().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["owner", "email"]);
    }

    #[test]
    fn test_dropped_submit_clears_submitting() {
        let mut form = booking_form();
        form.set_value("owner", "Ana Martínez").unwrap();
        form.set_value("email", "ana@example.com").unwrap();

        let pending = form
            .submit(|_| futures::future::pending::<Result<(), ()>>())
            .now_or_never();
        assert!(pending.is_none());

        assert!(!form.is_submitting());
        assert!(form.can_submit());
        assert_eq!(form.submit_count(), 1);
    }

    #[test]
    fn test_set_locale_does_not_validate_pending_edits() {
        let mut form = booking_form();
        form.set_value("owner", "Ana").unwrap();
        form.handle_blur("owner").unwrap();
        assert!(!form.is_valid());

        form.set_value("owner", "Ana Martínez").unwrap();
        form.set_locale(Locale::En);

        assert_eq!(
            form.field("owner").unwrap().error(),
            Some("Enter your first and last name")
        );
        assert_eq!(
            form.field("owner").unwrap().result().unwrap().sanitized_value(),
            "Ana"
        );
        assert!(!form.is_valid());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_busy_submit_is_logged() {
        let mut form = booking_form();
        assert!(form.begin_submit());
        let outcome = form.submit(|_| async { Ok::<_, ()>(()) }).await;
        assert_eq!(outcome, SubmitOutcome::Busy);
        assert!(logs_contain("submit ignored"));
    }
}
