//! Booking Form Example
//!
//! Drives a clinic booking form the way an input layer would:
//! - Declaring fields with rules, sanitizers and triggers
//! - Feeding change and blur events
//! - Rendering inline errors in two locales
//! - Submitting through an async handler
//!
//! Run with `cargo run --example booking_form`.

use formcheck::prelude::*;
use formcheck::FormValues;

// ==================== Form Declaration ====================

fn booking_config() -> Result<FormConfig, ConfigError> {
    Ok(FormConfig::new(Locale::Es)
        .field(
            FieldConfig::new("pet")
                .rules(FieldRules::new([Rule::required(), Rule::max_length(40)])?)
                .validate_on(ValidateOn::Blur),
        )
        .field(
            FieldConfig::new("owner")
                .rules(
                    FieldRules::new([Rule::required(), Rule::full_name()])?
                        .with_sanitizer(Sanitizer::Name),
                )
                .validate_on(ValidateOn::Blur),
        )
        .field(
            FieldConfig::new("email")
                .rules(
                    FieldRules::new([Rule::required(), Rule::email()])?
                        .with_sanitizer(Sanitizer::Email),
                )
                .validate_on(ValidateOn::Change),
        )
        .field(
            FieldConfig::new("phone")
                .rules(FieldRules::new([Rule::phone()])?.with_sanitizer(Sanitizer::Phone)),
        )
        .field(
            FieldConfig::new("notes")
                .rules(FieldRules::new([Rule::max_length(500)])?.with_sanitizer(Sanitizer::Html))
                .validate_on(ValidateOn::Submit),
        ))
}

fn print_errors(form: &FormController) {
    for (name, message) in form.errors() {
        println!("  {name}: {message}");
    }
}

// ==================== Mock API ====================

/// Stands in for the clinic's booking endpoint.
async fn book_visit(values: FormValues) -> Result<String, String> {
    let pet = values.get("pet").unwrap_or_default();
    let owner = values.get("owner").unwrap_or_default();
    Ok(format!("Cita reservada para {pet} ({owner})"))
}

// ==================== Main ====================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut form = FormController::new(booking_config()?)?;

    println!("\n=== Example 1: Typing and blurring ===");
    form.set_value("pet", "Toby")?;
    form.handle_blur("pet")?;
    form.set_value("owner", "  ana  ")?;
    form.handle_blur("owner")?;
    form.set_value("email", "ANA@")?;
    print_errors(&form);
    println!("  can submit: {}", form.can_submit());

    println!("\n=== Example 2: Switching locale ===");
    form.set_locale(Locale::En);
    print_errors(&form);

    println!("\n=== Example 3: Fixing the input ===");
    form.set_value("owner", "Ana   Martínez")?;
    form.handle_blur("owner")?;
    form.set_value("email", " Ana@Example.com ")?;
    form.set_value("phone", "+34 (600) 123-456")?;
    form.set_value("notes", "Toby <3 los paseos")?;
    println!("  props(email): {:?}", form.field_props("email"));

    println!("\n=== Example 4: Submitting ===");
    match form.submit(book_visit).await {
        SubmitOutcome::Submitted(Ok(receipt)) => println!("  {receipt}"),
        SubmitOutcome::Submitted(Err(err)) => println!("  API error: {err}"),
        SubmitOutcome::Invalid => print_errors(&form),
        SubmitOutcome::Busy => println!("  already submitting"),
    }
    println!("  submit count: {}", form.submit_count());

    println!("\n=== Example 5: Reset ===");
    form.reset();
    println!("  valid after reset: {}", form.is_valid());

    Ok(())
}
