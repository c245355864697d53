//! Defines error handling constructs for macroable.
//!
//! Registry mutation and query operations are infallible; absence of a macro is reported by
//! [`resolve`](crate::registry::MacroRegistry::resolve) returning `None`, never by an error.
//! The failures in this crate all occur on the invocation path, and every one of them is a
//! variant of [`InvokeError`].

use std::{error, fmt};

use crate::model::ModelName;

/// Error that can occur when invoking a macro on a model instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvokeError {
    /// No macro is registered under the invoked member name for the model type.
    ///
    /// This is the dispatch equivalent of calling an undefined method.
    UnresolvedMember {
        /// Name of the model type the invocation was dispatched on.
        model: ModelName,
        /// The member name that could not be resolved.
        name: String,
    },
    /// The macro was invoked with a receiver of a different model type than the one it was
    /// registered for.
    BadModelType {
        /// Name of the model type the macro was registered for.
        expected: ModelName,
    },
    /// The macro expected an argument at a position the invocation did not supply.
    MissingArg {
        /// Zero-based position of the missing argument.
        index: usize,
    },
    /// An argument was not of the type the macro expected.
    BadArgType {
        /// Zero-based position of the argument.
        index: usize,
        /// Name of the type the macro expected at this position.
        expected: &'static str,
    },
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeError::UnresolvedMember { model, name } => {
                write!(f, "no macro named `{}` is registered for model `{}`", name, model)
            }
            InvokeError::BadModelType { expected } => {
                write!(
                    f,
                    "macro registered for model `{}` was invoked with a different receiver type",
                    expected
                )
            }
            InvokeError::MissingArg { index } => {
                write!(f, "missing argument at position {}", index)
            }
            InvokeError::BadArgType { index, expected } => {
                write!(f, "argument at position {} is not a `{}`", index, expected)
            }
        }
    }
}

impl error::Error for InvokeError {}
