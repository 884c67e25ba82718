//! # formcheck
//!
//! Input validation, sanitization and form state for the booking and
//! contact forms of a veterinary clinic website.
//!
//! The crate has two halves:
//! - a **pure engine**: [`validate_field`] sanitizes a raw value, checks it
//!   against an ordered list of [`Rule`]s and returns every violated rule
//!   with a message in Spanish or English;
//! - a **form controller**: [`FormController`] keeps per-field state
//!   (value, touched, dirty, last result), validates on change, blur or
//!   submit, and guards the submit action against double submission.
//!
//! ## Quick Example
//!
//! ```rust
//! use formcheck::{validate_field, FieldRules, Locale, Rule, RuleKind, Sanitizer};
//!
//! let rules = FieldRules::new([Rule::required(), Rule::min_length(3), Rule::email()])
//!     .unwrap()
//!     .with_sanitizer(Sanitizer::Email);
//!
//! let ok = validate_field("  Ana@Example.COM ", &rules, Locale::Es);
//! assert!(ok.is_valid());
//! assert_eq!(ok.sanitized_value(), "ana@example.com");
//!
//! let blank = validate_field("   ", &rules, Locale::En);
//! assert_eq!(blank.errors().len(), 1);
//! assert_eq!(blank.errors()[0].kind(), RuleKind::Required);
//! assert_eq!(blank.first_message(), Some("This field is required"));
//! ```
//!
//! ## Forms
//!
//! ```rust
//! use formcheck::{FieldConfig, FieldRules, FormConfig, FormController, Locale, Rule, SubmitOutcome};
//!
//! # tokio_test::block_on(async {
//! let config = FormConfig::new(Locale::Es)
//!     .field(FieldConfig::new("mascota").rules(FieldRules::new([Rule::required()]).unwrap()))
//!     .field(FieldConfig::new("dueño").rules(FieldRules::new([Rule::full_name()]).unwrap()));
//! let mut form = FormController::new(config).unwrap();
//!
//! form.set_value("mascota", "Toby").unwrap();
//! form.set_value("dueño", "Ana Martínez").unwrap();
//!
//! let outcome = form
//!     .submit(|values| async move { Ok::<_, ()>(values.get("mascota").map(str::to_owned)) })
//!     .await;
//! assert_eq!(outcome, SubmitOutcome::Submitted(Ok(Some("Toby".to_string()))));
//! assert_eq!(form.submit_count(), 1);
//! # });
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod engine;
pub mod error;
pub mod form;
pub mod locale;
pub mod predicate;
pub mod rule;
pub mod sanitize;
#[cfg(feature = "serde")]
pub mod schema;
pub mod semigroup;
pub mod testing;
pub mod validation;
pub mod validators;

// Re-exports
pub use engine::{validate_field, validate_field_with, FieldError, ValidationResult};
pub use error::{ConfigError, FormError};
pub use form::{
    CrossFieldRule, FieldConfig, FieldProps, FieldStatus, FormConfig, FormController, FormField,
    FormValues, SubmitOutcome, ValidateOn,
};
pub use locale::{Locale, Message, MessageArgs, MessageCatalog};
pub use rule::{Constraint, CustomCheck, FieldRules, Rule, RuleKind, Sanitizer};
pub use semigroup::Semigroup;
pub use validation::Validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::engine::{validate_field, validate_field_with, FieldError, ValidationResult};
    pub use crate::error::{ConfigError, FormError};
    pub use crate::form::{
        CrossFieldRule, FieldConfig, FieldProps, FormConfig, FormController, SubmitOutcome,
        ValidateOn,
    };
    pub use crate::locale::{Locale, Message, MessageCatalog};
    pub use crate::rule::{FieldRules, Rule, RuleKind, Sanitizer};
    pub use crate::semigroup::Semigroup;
    pub use crate::validation::Validation;
}
