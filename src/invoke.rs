//! Invocation primitives for macros.
//!
//! A macro is an opaque unit of behavior attached to a model type. This module provides the
//! constructs the registry and the dispatch layer agree on: [`Args`], the ordered argument
//! list an invocation carries; [`BoxValue`], the opaque reply value; [`MacroFn`], the trait a
//! function must satisfy to be registered for a model type; and [`Macro`], the type-erased
//! invocable the registry stores and hands back to callers.
//!
//! Argument marshaling is the invocable's responsibility: the registry never inspects or
//! constrains a macro's parameter list. A macro consumes its arguments in order with
//! [`Args::take`], which reports the position of a missing or mismatched argument.

use std::{
    any::{self, Any},
    collections::VecDeque,
    fmt,
    marker::PhantomData,
    sync::Arc,
};

use dyn_clone::DynClone;

use crate::{error::InvokeError, model::Model};

/// A boxed value passed into and returned from macro invocations.
pub type BoxValue = Box<dyn Any + Send>;

/// Ordered argument list for a macro invocation.
///
/// # Example
///
/// ```
/// use macroable::Args;
///
/// let mut args = Args::new().arg(1i32).arg("two");
/// assert_eq!(args.len(), 2);
/// assert_eq!(args.take::<i32>().unwrap(), 1);
/// assert_eq!(args.take::<&str>().unwrap(), "two");
/// ```
#[derive(Default)]
pub struct Args {
    values: VecDeque<BoxValue>,
    taken: usize,
}

impl Args {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Args::default()
    }

    /// Appends an argument, returning the list for chaining.
    pub fn arg<T: Send + 'static>(mut self, value: T) -> Self {
        self.values.push_back(Box::new(value));
        self
    }

    /// Removes and returns the next argument, downcast to `T`.
    ///
    /// Fails with [`InvokeError::MissingArg`] when the list is exhausted, or
    /// [`InvokeError::BadArgType`] when the next argument is not a `T`. Both carry the
    /// zero-based position of the argument within the invocation.
    pub fn take<T: Send + 'static>(&mut self) -> Result<T, InvokeError> {
        let index = self.taken;
        let value = self
            .values
            .pop_front()
            .ok_or(InvokeError::MissingArg { index })?;
        self.taken += 1;
        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(InvokeError::BadArgType {
                index,
                expected: any::type_name::<T>(),
            }),
        }
    }

    /// The number of arguments remaining in the list.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no arguments remain.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("remaining", &self.values.len())
            .finish()
    }
}

/// Builds an [`Args`] list from a sequence of values.
///
/// ```
/// use macroable::args;
///
/// let args = args![1i32, "two", 3.0f64];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => { $crate::invoke::Args::new() };
    ($($arg:expr),+ $(,)?) => { $crate::invoke::Args::new()$(.arg($arg))+ };
}

/// A function that can be registered as a macro for model type `M`.
///
/// Implemented for any `Fn(&mut M, Args) -> Result<R, InvokeError>` which is
/// `Send + Sync + 'static`, where `R` is any sendable reply value. The receiving model
/// instance is passed mutably, so a macro can read and modify the instance's state.
pub trait MacroFn<M: Model>: Send + Sync + 'static {
    /// The reply value returned by the macro.
    type Reply: Send + 'static;

    /// Invokes the macro with the receiving model instance and arguments.
    fn call(&self, model: &mut M, args: Args) -> Result<Self::Reply, InvokeError>;
}

impl<M, F, R> MacroFn<M> for F
where
    M: Model,
    F: Fn(&mut M, Args) -> Result<R, InvokeError> + Send + Sync + 'static,
    R: Send + 'static,
{
    type Reply = R;

    fn call(&self, model: &mut M, args: Args) -> Result<R, InvokeError> {
        self(model, args)
    }
}

trait ErasedMacroFn: DynClone + Send + Sync {
    fn call(&self, model: &mut dyn Any, args: Args) -> Result<BoxValue, InvokeError>;
}

dyn_clone::clone_trait_object!(ErasedMacroFn);

struct TypedMacroFn<M, F> {
    func: Arc<F>,
    phantom: PhantomData<fn(&mut M)>,
}

impl<M, F> Clone for TypedMacroFn<M, F> {
    fn clone(&self) -> Self {
        TypedMacroFn {
            func: Arc::clone(&self.func),
            phantom: PhantomData,
        }
    }
}

impl<M, F> ErasedMacroFn for TypedMacroFn<M, F>
where
    M: Model,
    F: MacroFn<M>,
{
    fn call(&self, model: &mut dyn Any, args: Args) -> Result<BoxValue, InvokeError> {
        let model = model
            .downcast_mut::<M>()
            .ok_or_else(|| InvokeError::BadModelType {
                expected: M::model_name(),
            })?;
        self.func
            .call(model, args)
            .map(|reply| Box::new(reply) as BoxValue)
    }
}

/// A registered macro, erased over its model and reply types.
///
/// The registry stores macros in this form and hands them back from
/// [`resolve`](crate::registry::MacroRegistry::resolve) and the snapshot queries. Cloning a
/// macro is cheap and yields a handle to the same underlying function.
#[derive(Clone)]
pub struct Macro {
    func: Box<dyn ErasedMacroFn>,
}

impl Macro {
    /// Creates a macro from a function for model type `M`.
    pub fn new<M, F>(func: F) -> Self
    where
        M: Model,
        F: MacroFn<M>,
    {
        Macro {
            func: Box::new(TypedMacroFn {
                func: Arc::new(func),
                phantom: PhantomData,
            }),
        }
    }

    /// Invokes the macro with a type-erased receiver.
    ///
    /// This is the entry point the dispatch layer uses once a macro has been resolved. Fails
    /// with [`InvokeError::BadModelType`] if `model` is not an instance of the model type the
    /// macro was registered for.
    pub fn call(&self, model: &mut dyn Any, args: Args) -> Result<BoxValue, InvokeError> {
        self.func.call(model, args)
    }
}

impl fmt::Debug for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Macro")
    }
}
