//! Reactive form state
//!
//! A [`FormConfig`] declares the fields of a form; a [`FormController`]
//! built from it tracks each field's value, touched and dirty flags and
//! last [`ValidationResult`](crate::ValidationResult), derives form
//! validity, and guards submission so only one is in flight at a time.

mod config;
mod controller;
mod field;
mod values;

pub use config::{CrossFieldRule, FieldConfig, FormConfig, ValidateOn};
pub use controller::{FormController, SubmitOutcome};
pub use field::{FieldProps, FieldStatus, FormField};
pub use values::FormValues;
