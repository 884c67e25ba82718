//! Predicate prelude for convenient imports
//!
//! # Example
//!
//! ```rust
//! use formcheck::predicate::prelude::*;
//!
//! let p = PredicateExt::<str>::and(full_name(), char_len_max(40));
//! assert!(p.check("Lucía Fernández"));
//! ```

// Core trait
pub use super::combinators::{Predicate, PredicateExt};

// Logical combinators
pub use super::combinators::{And, Not, Or};

// String predicates
pub use super::string::{
    char_len_between, char_len_max, char_len_min, email, full_name, http_url, matches, not_blank,
    phone, phone_digits,
};
