//! Input sanitizers
//!
//! Pure `&str -> String` transforms applied to raw input before it is stored
//! or validated. Every sanitizer is idempotent: running it on its own output
//! returns that output unchanged.
//!
//! # Example
//!
//! ```rust
//! use formcheck::sanitize::*;
//!
//! assert_eq!(sanitize_string("  Max \t\u{0} (perro)  "), "Max (perro)");
//! assert_eq!(sanitize_email(" Ana.Ruiz @Example.COM "), "ana.ruiz@example.com");
//! assert_eq!(sanitize_phone("+34 (600) 12-34-56"), "+34600123456");
//! assert_eq!(sanitize_html("<b>hola</b>"), "&lt;b&gt;hola&lt;/b&gt;");
//! ```

use crate::predicate::string::is_name_mark;

/// Entities `sanitize_html` emits or accepts as already escaped.
const HTML_ENTITIES: [&str; 6] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#x27;", "&#39;"];

/// Collapse whitespace runs, trim the ends and drop everything `keep`
/// rejects.
fn collapse_whitespace(raw: &str, keep: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else if keep(c) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }

    out
}

/// Trim, collapse internal whitespace runs to one space and strip control
/// characters.
///
/// Tabs and newlines count as whitespace, so they collapse instead of being
/// deleted outright.
pub fn sanitize_string(raw: &str) -> String {
    collapse_whitespace(raw, |c| !c.is_control())
}

/// Lower-case an e-mail address and strip all whitespace and control
/// characters.
pub fn sanitize_email(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Keep only digits and a leading `+`.
pub fn sanitize_phone(raw: &str) -> String {
    let trimmed = raw.trim_start();
    let mut out = String::with_capacity(trimmed.len());
    if trimmed.starts_with('+') {
        out.push('+');
    }
    out.extend(trimmed.chars().filter(char::is_ascii_digit));
    out
}

/// Trim, collapse whitespace and strip characters outside letters,
/// apostrophes, hyphens and spaces.
///
/// ```rust
/// use formcheck::sanitize::sanitize_name;
///
/// assert_eq!(sanitize_name("  Ana <script>  Pérez2 "), "Ana script Pérez");
/// ```
pub fn sanitize_name(raw: &str) -> String {
    collapse_whitespace(raw, |c| c.is_alphabetic() || is_name_mark(c))
}

/// Escape `& < > " '` to HTML entities.
///
/// An `&` that already starts one of the produced entities is kept as is,
/// which makes the transform idempotent.
///
/// ```rust
/// use formcheck::sanitize::sanitize_html;
///
/// let once = sanitize_html(r#"<a href="x">Tom & 'Jerry'</a>"#);
/// assert_eq!(
///     once,
///     "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
/// );
/// assert_eq!(sanitize_html(&once), once);
/// ```
pub fn sanitize_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for (idx, c) in raw.char_indices() {
        match c {
            '&' => {
                let rest = &raw[idx..];
                if HTML_ENTITIES.iter().any(|entity| rest.starts_with(entity)) {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }

    out
}
