//! Normalized error representation.
//!
//! Any error-like value that ends up in a log record is reduced to an
//! [`ErrorShape`]: a name, a message and a single-line stack. The two ways an
//! error can reach the `error` entry point of the logger are modelled by
//! [`ErrorPayload`], and the looser input of `track_error` by [`Failure`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error as StdError;
use crate::{LogshimError, Metadata};

/// Name used when the concrete error type is unknown.
pub const GENERIC_ERROR_NAME: &str = "Error";

/// `{name, message, stack}` form of an error. All fields are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorShape {
    /// Error type name
    pub name: String,
    /// Display message
    pub message: String,
    /// Cause chain (and backtrace when one was captured), newlines escaped
    pub stack: String,
}

impl ErrorShape {
    /// Build a shape from raw parts, escaping the stack.
    pub fn new(name: impl Into<String>, message: impl Into<String>, stack: &str) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: escape_newlines(stack),
        }
    }

    /// Shape of a standard error: its type name, display text and source chain.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: StdError + ?Sized,
    {
        let name = short_type_name(std::any::type_name::<E>());
        let message = err.to_string();

        let mut stack = format!("{}: {}", name, message);
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        Self::new(name, message, &stack)
    }

    /// Coerce a non-error value into a generic error, like `new Error(String(x))`.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let stack = format!("{}: {}", GENERIC_ERROR_NAME, message);
        Self::new(GENERIC_ERROR_NAME, message, &stack)
    }

    /// Serialize into a metadata value.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "message": self.message,
            "stack": self.stack,
        })
    }
}

/// Replace every raw newline with the two characters `\n`.
pub fn escape_newlines(input: &str) -> String {
    input.replace('\n', "\\n")
}

fn short_type_name(full: &str) -> String {
    if full.starts_with("dyn ") {
        return GENERIC_ERROR_NAME.to_string();
    }
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

/// Values that can be normalized into an [`ErrorShape`].
pub trait ErrorLike {
    /// Normalize into an error shape.
    fn error_shape(&self) -> ErrorShape;
}

/// Implement [`ErrorLike`] for one or more `std::error::Error` types.
///
/// ```
/// #[derive(Debug)]
/// struct Timeout;
///
/// impl std::fmt::Display for Timeout {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("timed out")
///     }
/// }
///
/// impl std::error::Error for Timeout {}
///
/// logshim_types::error_like!(Timeout);
///
/// use logshim_types::ErrorLike;
/// assert_eq!(Timeout.error_shape().name, "Timeout");
/// ```
#[macro_export]
macro_rules! error_like {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::ErrorLike for $ty {
                fn error_shape(&self) -> $crate::ErrorShape {
                    $crate::ErrorShape::from_error(self)
                }
            }
        )+
    };
}

error_like!(
    LogshimError,
    std::io::Error,
    serde_json::Error,
    std::fmt::Error,
    std::num::ParseIntError,
);

impl ErrorLike for anyhow::Error {
    fn error_shape(&self) -> ErrorShape {
        // {:?} renders the context chain plus a backtrace when one was captured.
        ErrorShape::new(GENERIC_ERROR_NAME, self.to_string(), &format!("{:?}", self))
    }
}

impl ErrorLike for Box<dyn StdError + Send + Sync> {
    fn error_shape(&self) -> ErrorShape {
        ErrorShape::from_error(self.as_ref())
    }
}

impl ErrorLike for String {
    fn error_shape(&self) -> ErrorShape {
        ErrorShape::from_message(self.clone())
    }
}

impl ErrorLike for ErrorShape {
    fn error_shape(&self) -> ErrorShape {
        self.clone()
    }
}

/// The optional second argument of the logger's `error` entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// A real error; nested under the `error` key.
    Error(ErrorShape),
    /// Plain structured fields; merged into the record's top level.
    Structured(Metadata),
}

impl ErrorPayload {
    /// Wrap an error value.
    pub fn error<E: ErrorLike + ?Sized>(err: &E) -> Self {
        ErrorPayload::Error(err.error_shape())
    }

    /// Wrap plain fields.
    pub fn structured(fields: Metadata) -> Self {
        ErrorPayload::Structured(fields)
    }
}

impl From<ErrorShape> for ErrorPayload {
    fn from(shape: ErrorShape) -> Self {
        ErrorPayload::Error(shape)
    }
}

impl From<Metadata> for ErrorPayload {
    fn from(fields: Metadata) -> Self {
        ErrorPayload::Structured(fields)
    }
}

/// Whatever went wrong, as reported to `track_error`.
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    /// A real error; goes through the error-shape path.
    Error(ErrorShape),
    /// Anything else; recorded verbatim under `error`.
    Value(Value),
}

impl Failure {
    /// Wrap an error value.
    pub fn error<E: ErrorLike + ?Sized>(err: &E) -> Self {
        Failure::Error(err.error_shape())
    }

    /// Wrap an arbitrary value.
    pub fn value(value: impl Into<Value>) -> Self {
        Failure::Value(value.into())
    }
}
