//! Core functionality for defining model types that macros attach to.
//!
//! A [`Model`] is any type macros can be attached to. Models are identified in a
//! [`MacroRegistry`] by their [`model_name`](Model::model_name), so the registry holds no
//! references to model instances and is decoupled from any particular instance's lifetime.
//!
//! The [`Macroable`] extension trait, implemented for every model, provides the invocation
//! surface: a call to a member with no native definition is expressed as an explicit
//! [`invoke`](Macroable::invoke) carrying the registry to resolve against, the member name,
//! and the argument list.

use std::{any, borrow::Cow};

use crate::{
    error::InvokeError,
    invoke::{Args, BoxValue},
    registry::MacroRegistry,
};

/// Name identifying a model type within a [`MacroRegistry`].
pub type ModelName = Cow<'static, str>;

/// A type that macros can be attached to.
///
/// # Example with Derive
///
/// ```
/// use macroable::Model;
///
/// #[derive(Model)]
/// struct User;
///
/// assert_eq!(User::model_name(), "User");
/// ```
pub trait Model: Sized + Send + 'static {
    /// The name of the model, used as its registry key.
    ///
    /// # Default Implementation
    /// By default, this returns the fully qualified type name of the model. The derive macro
    /// overrides this with the type's ident, or with the `#[model(name = "...")]` attribute
    /// when specified. Two types reporting the same name share their macros.
    #[inline]
    fn model_name() -> ModelName {
        Cow::Borrowed(any::type_name::<Self>())
    }
}

/// Dispatch surface for invoking macros on a model instance.
///
/// Implemented for every [`Model`]. The registry is passed explicitly on each invocation, so
/// one registry per application scope is a decision made by the caller rather than by global
/// state.
///
/// # Example
///
/// ```
/// use macroable::error::InvokeError;
/// use macroable::{args, Args, MacroRegistry, Macroable, Model};
///
/// #[derive(Model)]
/// struct Counter {
///     count: i64,
/// }
///
/// let registry = MacroRegistry::new();
/// registry.add_macro(
///     "add",
///     |counter: &mut Counter, mut args: Args| -> Result<i64, InvokeError> {
///         counter.count += args.take::<i64>()?;
///         Ok(counter.count)
///     },
/// );
///
/// let mut counter = Counter { count: 1 };
/// let reply = counter.invoke(&registry, "add", args![2i64]).unwrap();
/// assert_eq!(*reply.downcast::<i64>().unwrap(), 3);
/// ```
pub trait Macroable: Model {
    /// Invokes the macro registered under `name` for this model type, with this instance
    /// bound as the receiver.
    ///
    /// Returns the macro's reply verbatim, including a boxed `()` for macros which return no
    /// value. Fails with [`InvokeError::UnresolvedMember`] when no macro is registered under
    /// `name` for this model type, the same outcome as calling an undefined method.
    fn invoke(
        &mut self,
        registry: &MacroRegistry,
        name: &str,
        args: Args,
    ) -> Result<BoxValue, InvokeError> {
        registry.dispatch(self, name, args)
    }
}

impl<M: Model> Macroable for M {}
