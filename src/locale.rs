//! Locales and message catalogues
//!
//! Error messages are looked up by `(RuleKind, Locale)` in a
//! [`MessageCatalog`] that callers pass in explicitly. Nothing in this crate
//! reads an ambient locale.
//!
//! Templates may contain `{min}` and `{max}` placeholders, filled from the
//! rule's parameters when the message is rendered.
//!
//! # Example
//!
//! ```rust
//! use formcheck::{Locale, MessageArgs, MessageCatalog, RuleKind};
//!
//! let catalog = MessageCatalog::default();
//! let args = MessageArgs { min: Some(5), max: None };
//! assert_eq!(
//!     catalog.render(RuleKind::MinLength, Locale::En, &args),
//!     "Must be at least 5 characters"
//! );
//! assert_eq!(
//!     catalog.render(RuleKind::MinLength, Locale::Es, &args),
//!     "Debe tener al menos 5 caracteres"
//! );
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;

use crate::error::ConfigError;
use crate::rule::RuleKind;

/// Language used for validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Locale {
    /// Spanish.
    #[default]
    Es,
    /// English.
    En,
}

impl Locale {
    /// Every supported locale.
    pub const ALL: [Locale; 2] = [Locale::Es, Locale::En];

    /// The two-letter language code.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    /// Parse `es`, `en` or a regional tag such as `es-MX` or `en_US`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let language = s.trim().split(['-', '_']).next().unwrap_or_default();
        match language.to_ascii_lowercase().as_str() {
            "es" => Ok(Locale::Es),
            "en" => Ok(Locale::En),
            _ => Err(ConfigError::UnknownLocale(s.to_string())),
        }
    }
}

/// A message override attached to a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Message {
    /// The same text for every locale.
    Text(String),
    /// One text per locale.
    PerLocale {
        /// Spanish text.
        es: String,
        /// English text.
        en: String,
    },
}

impl Message {
    /// Create a locale-independent message.
    pub fn text(text: impl Into<String>) -> Self {
        Message::Text(text.into())
    }

    /// Create a message with a Spanish and an English variant.
    pub fn localized(es: impl Into<String>, en: impl Into<String>) -> Self {
        Message::PerLocale {
            es: es.into(),
            en: en.into(),
        }
    }

    /// The template for `locale`.
    pub fn for_locale(&self, locale: Locale) -> &str {
        match (self, locale) {
            (Message::Text(text), _) => text,
            (Message::PerLocale { es, .. }, Locale::Es) => es,
            (Message::PerLocale { en, .. }, Locale::En) => en,
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::text(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

/// Values substituted into a message template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageArgs {
    /// Replaces `{min}`.
    pub min: Option<usize>,
    /// Replaces `{max}`.
    pub max: Option<usize>,
}

impl MessageArgs {
    /// Substitute the placeholders of `template`.
    pub fn apply(&self, template: &str) -> String {
        let mut out = template.to_string();
        if let Some(min) = self.min {
            out = out.replace("{min}", &min.to_string());
        }
        if let Some(max) = self.max {
            out = out.replace("{max}", &max.to_string());
        }
        out
    }
}

const BUILTIN_TEMPLATES: [(RuleKind, &str, &str); 9] = [
    (
        RuleKind::Required,
        "Este campo es obligatorio",
        "This field is required",
    ),
    (
        RuleKind::MinLength,
        "Debe tener al menos {min} caracteres",
        "Must be at least {min} characters",
    ),
    (
        RuleKind::MaxLength,
        "Debe tener como máximo {max} caracteres",
        "Must be at most {max} characters",
    ),
    (
        RuleKind::Pattern,
        "El formato no es válido",
        "The format is not valid",
    ),
    (
        RuleKind::Email,
        "Introduce un correo electrónico válido",
        "Enter a valid email address",
    ),
    (
        RuleKind::Phone,
        "Introduce un teléfono válido ({min}-{max} dígitos)",
        "Enter a valid phone number ({min}-{max} digits)",
    ),
    (
        RuleKind::FullName,
        "Introduce nombre y apellido",
        "Enter your first and last name",
    ),
    (
        RuleKind::Url,
        "Introduce una URL válida (http o https)",
        "Enter a valid URL (http or https)",
    ),
    (RuleKind::Custom, "El valor no es válido", "The value is not valid"),
];

static BUILTIN: Lazy<MessageCatalog> = Lazy::new(|| {
    let mut catalog = MessageCatalog::empty();
    for (kind, es, en) in BUILTIN_TEMPLATES {
        catalog.insert(kind, Locale::Es, es);
        catalog.insert(kind, Locale::En, en);
    }
    catalog
});

/// Mapping from `(RuleKind, Locale)` to a message template.
///
/// `MessageCatalog::default()` holds the built-in Spanish and English
/// texts; start from it and override individual entries, or start from
/// [`MessageCatalog::empty`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    templates: HashMap<(RuleKind, Locale), String>,
}

impl MessageCatalog {
    /// A catalogue without any template.
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// The shared built-in catalogue.
    pub fn builtin() -> &'static MessageCatalog {
        &BUILTIN
    }

    /// Set the template for `kind` in `locale`, replacing any previous one.
    pub fn insert(&mut self, kind: RuleKind, locale: Locale, template: impl Into<String>) {
        self.templates.insert((kind, locale), template.into());
    }

    /// Builder form of [`MessageCatalog::insert`].
    ///
    /// ```rust
    /// use formcheck::{Locale, MessageArgs, MessageCatalog, RuleKind};
    ///
    /// let catalog = MessageCatalog::default()
    ///     .with_template(RuleKind::Required, Locale::En, "Please fill in this field");
    /// assert_eq!(
    ///     catalog.render(RuleKind::Required, Locale::En, &MessageArgs::default()),
    ///     "Please fill in this field"
    /// );
    /// ```
    pub fn with_template(
        mut self,
        kind: RuleKind,
        locale: Locale,
        template: impl Into<String>,
    ) -> Self {
        self.insert(kind, locale, template);
        self
    }

    /// The raw template for `kind` in `locale`, if any.
    pub fn template(&self, kind: RuleKind, locale: Locale) -> Option<&str> {
        self.templates.get(&(kind, locale)).map(String::as_str)
    }

    /// Render the message for `kind` in `locale`.
    ///
    /// Falls back to the default locale's template, then to the rule's key.
    pub fn render(&self, kind: RuleKind, locale: Locale, args: &MessageArgs) -> String {
        let template = self
            .template(kind, locale)
            .or_else(|| self.template(kind, Locale::default()))
            .unwrap_or_else(|| kind.key());
        args.apply(template)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale_is_spanish() {
        assert_eq!(Locale::default(), Locale::Es);
    }

    #[test]
    fn test_parse_locale_tags() {
        assert_eq!("es".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("es-MX".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!("en_US".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(
            "fr".parse::<Locale>(),
            Err(ConfigError::UnknownLocale("fr".to_string()))
        );
    }

    #[test]
    fn test_builtin_covers_every_kind_and_locale() {
        let catalog = MessageCatalog::builtin();
        for kind in RuleKind::ALL {
            for locale in Locale::ALL {
                assert!(
                    catalog.template(kind, locale).is_some(),
                    "missing {kind:?}/{locale}"
                );
            }
        }
    }

    #[test]
    fn test_render_interpolates_bounds() {
        let args = MessageArgs {
            min: Some(7),
            max: Some(15),
        };
        assert_eq!(
            MessageCatalog::default().render(RuleKind::Phone, Locale::En, &args),
            "Enter a valid phone number (7-15 digits)"
        );
    }

    #[test]
    fn test_render_falls_back_to_default_locale_then_key() {
        let catalog = MessageCatalog::empty().with_template(RuleKind::Email, Locale::Es, "correo");
        let args = MessageArgs::default();
        assert_eq!(catalog.render(RuleKind::Email, Locale::En, &args), "correo");
        assert_eq!(catalog.render(RuleKind::Url, Locale::En, &args), "url");
    }

    #[test]
    fn test_message_for_locale() {
        let msg = Message::localized("Obligatorio", "Required");
        assert_eq!(msg.for_locale(Locale::Es), "Obligatorio");
        assert_eq!(msg.for_locale(Locale::En), "Required");
        assert_eq!(Message::from("fixed").for_locale(Locale::En), "fixed");
    }
}
