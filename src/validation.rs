//! Validation type for accumulating rule failures
//!
//! `Validation` is similar to `Result` but it combines failures instead of
//! short-circuiting on the first one. The engine folds one `Validation` per
//! rule into a single outcome so every violated constraint of a field can be
//! shown at once.
//!
//! # Examples
//!
//! ```
//! use formcheck::Validation;
//!
//! let too_short = Validation::<(), _>::failure(vec!["too short"]);
//! let not_email = Validation::<(), _>::failure(vec!["not an email"]);
//!
//! assert_eq!(
//!     too_short.and(not_email),
//!     Validation::Failure(vec!["too short", "not an email"])
//! );
//! ```

use crate::Semigroup;

/// A validation that either succeeds with a value or fails with accumulated errors
///
/// # Type Parameters
///
/// * `T` - The type of the success value
/// * `E` - The type of the error value (must implement `Semigroup` for accumulation)
///
/// # Examples
///
/// ```
/// use formcheck::Validation;
///
/// let v = Validation::<_, Vec<&str>>::success("ana@example.com");
/// assert_eq!(v.into_result(), Ok("ana@example.com"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T, E> {
    /// Successful validation with a value
    Success(T),
    /// Failed validation with accumulated errors
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// Create a successful validation
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Create a failed validation
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }

    /// Create a validation from a Result
    ///
    /// # Examples
    ///
    /// ```
    /// use formcheck::Validation;
    ///
    /// let v = Validation::from_result(Err::<i32, _>("bad phone".to_string()));
    /// assert_eq!(v, Validation::Failure("bad phone".to_string()));
    /// ```
    #[inline]
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Validation::Success(value),
            Err(error) => Validation::Failure(error),
        }
    }

    /// Convert this validation to a Result
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(error) => Err(error),
        }
    }

    /// Check if this validation is successful
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    /// Check if this validation failed
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// Transform the success value if present
    #[inline]
    pub fn map<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    /// Transform the error value if present
    ///
    /// # Examples
    ///
    /// ```
    /// use formcheck::Validation;
    ///
    /// let v = Validation::<i32, _>::failure(vec!["error"]);
    /// assert_eq!(v.map_err(|errors| errors.len()), Validation::Failure(1));
    /// ```
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Validation<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(error) => Validation::Failure(f(error)),
        }
    }
}

impl<T, E: Semigroup> Validation<T, E> {
    /// Combine two validations, accumulating errors using the Semigroup instance
    ///
    /// If both validations are successful, returns a success with a tuple of both values.
    /// If either or both fail, accumulates the errors using `Semigroup::combine`.
    ///
    /// # Examples
    ///
    /// ```
    /// use formcheck::Validation;
    ///
    /// let v1 = Validation::<i32, _>::failure(vec!["error1"]);
    /// let v2 = Validation::<i32, _>::failure(vec!["error2"]);
    /// assert_eq!(v1.and(v2), Validation::Failure(vec!["error1", "error2"]));
    /// ```
    pub fn and<U>(self, other: Validation<U, E>) -> Validation<(T, U), E> {
        match (self, other) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
            (Validation::Failure(e1), Validation::Failure(e2)) => {
                Validation::Failure(e1.combine(e2))
            }
            (Validation::Failure(e), _) => Validation::Failure(e),
            (_, Validation::Failure(e)) => Validation::Failure(e),
        }
    }

    /// Chain a dependent validation
    ///
    /// The function is only called if the current validation is successful.
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> Validation<U, E>,
    {
        match self {
            Validation::Success(value) => f(value),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    /// Combine any number of validations
    ///
    /// Returns a success with every success value, in order, if all
    /// validations succeed. Otherwise all errors are combined in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use formcheck::Validation;
    ///
    /// let checks = vec![
    ///     Validation::<(), _>::failure(vec!["error1"]),
    ///     Validation::success(()),
    ///     Validation::failure(vec!["error2"]),
    /// ];
    /// assert_eq!(
    ///     Validation::all(checks),
    ///     Validation::Failure(vec!["error1", "error2"])
    /// );
    /// ```
    pub fn all<I>(validations: I) -> Validation<Vec<T>, E>
    where
        I: IntoIterator<Item = Validation<T, E>>,
    {
        let mut successes = Vec::new();
        let mut failure: Option<E> = None;

        for validation in validations {
            match validation {
                Validation::Success(value) => successes.push(value),
                Validation::Failure(error) => {
                    failure = Some(match failure {
                        Some(acc) => acc.combine(error),
                        None => error,
                    });
                }
            }
        }

        match failure {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(successes),
        }
    }
}

impl<T> Validation<T, Vec<crate::FieldError>> {
    /// Fail with a single field error unless `ok` holds.
    pub(crate) fn check(ok: bool, value: T, error: impl FnOnce() -> crate::FieldError) -> Self {
        if ok {
            Validation::Success(value)
        } else {
            Validation::Failure(vec![error()])
        }
    }
}
