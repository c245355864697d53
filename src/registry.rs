//! Runtime registry attaching named macros to model types.

use std::{
    borrow::{Borrow, Cow},
    collections::{HashMap, HashSet},
    hash::Hash,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tracing::trace;

use crate::{
    error::InvokeError,
    invoke::{Args, BoxValue, Macro, MacroFn},
    model::{Model, ModelName},
};

/// Name a macro is registered under for a model type.
pub type MacroName = Cow<'static, str>;

/// The macros registered for a single model type, keyed by macro name.
pub type MacroSet = HashMap<MacroName, Macro>;

/// A registry attaching named macros to model types.
///
/// The registry is the single source of truth for which named behaviors are attached to
/// which model types. It stores macros by `(model, name)` pairs, treats them as opaque
/// invocables, and exposes registration, removal, and read-only introspection. Construct one
/// per application scope and pass it to whatever needs to register or invoke macros.
///
/// # Example
///
/// ```
/// use macroable::error::InvokeError;
/// use macroable::{Args, MacroRegistry, Model};
///
/// #[derive(Model)]
/// struct Order;
///
/// let registry = MacroRegistry::new();
/// registry.add_macro(
///     "total",
///     |_order: &mut Order, _args: Args| -> Result<u32, InvokeError> { Ok(42) },
/// );
///
/// assert!(registry.model_has_macro::<Order, _>("total"));
/// ```
#[derive(Debug)]
pub struct MacroRegistry {
    models: Mutex<HashMap<ModelName, MacroSet>>,
}

impl MacroRegistry {
    /// Creates a new empty macro registry.
    pub fn new() -> Self {
        MacroRegistry {
            models: Mutex::new(HashMap::new()),
        }
    }

    // One lock guards the outer and inner maps together, so a mutation can never expose a
    // half-updated macro set to a concurrent resolve.
    fn lock(&self) -> MutexGuard<'_, HashMap<ModelName, MacroSet>> {
        self.models.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a macro under a given name for model type `M`.
    ///
    /// Registering a name already present for `M` replaces the previous macro silently.
    ///
    /// # Example
    ///
    /// ```
    /// use macroable::error::InvokeError;
    /// use macroable::{Args, MacroRegistry, Model};
    ///
    /// #[derive(Model)]
    /// struct User;
    ///
    /// let registry = MacroRegistry::new();
    /// registry.add_macro(
    ///     "shout",
    ///     |_user: &mut User, mut args: Args| -> Result<String, InvokeError> {
    ///         Ok(args.take::<String>()?.to_uppercase())
    ///     },
    /// );
    /// ```
    pub fn add_macro<M, F>(&self, name: impl Into<MacroName>, func: F)
    where
        M: Model,
        F: MacroFn<M>,
    {
        let model = M::model_name();
        let name = name.into();
        trace!(model = %model, name = %name, "registering macro");
        self.lock()
            .entry(model)
            .or_default()
            .insert(name, Macro::new(func));
    }

    /// Removes the macro registered under `name` for model type `M`.
    ///
    /// Removing a name that was never registered is a no-op.
    pub fn remove_macro<M, Q>(&self, name: &Q)
    where
        M: Model,
        Q: Hash + Eq + ?Sized,
        MacroName: Borrow<Q>,
    {
        let model = M::model_name();
        let mut models = self.lock();
        if let Some(macros) = models.get_mut::<ModelName>(&model) {
            if macros.remove(name).is_some() {
                trace!(model = %model, "removed macro");
            }
            // a model with no macros left is indistinguishable from one never registered
            if macros.is_empty() {
                models.remove::<ModelName>(&model);
            }
        }
    }

    /// Returns `true` if model type `M` has a macro registered under `name`.
    pub fn model_has_macro<M, Q>(&self, name: &Q) -> bool
    where
        M: Model,
        Q: Hash + Eq + ?Sized,
        MacroName: Borrow<Q>,
    {
        self.lock()
            .get::<ModelName>(&M::model_name())
            .is_some_and(|macros| macros.contains_key(name))
    }

    /// Returns a snapshot of the macros currently registered for model type `M`, keyed by
    /// macro name.
    ///
    /// The snapshot reflects the state at call time; later registrations or removals do not
    /// update it. Empty if `M` has no macros.
    pub fn macros_for_model<M: Model>(&self) -> MacroSet {
        self.lock()
            .get(&M::model_name())
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the name of every model type with a macro registered under `name`, in
    /// arbitrary order.
    pub fn models_that_implement<Q>(&self, name: &Q) -> HashSet<ModelName>
    where
        Q: Hash + Eq + ?Sized,
        MacroName: Borrow<Q>,
    {
        self.lock()
            .iter()
            .filter(|(_, macros)| macros.contains_key(name))
            .map(|(model, _)| model.clone())
            .collect()
    }

    /// Returns a snapshot of the entire registry state, keyed by model name.
    ///
    /// Empty immediately after construction.
    pub fn all_macros(&self) -> HashMap<ModelName, MacroSet> {
        self.lock().clone()
    }

    /// Looks up the macro registered under `name` for model type `M`.
    ///
    /// Absence is an expected outcome reported as `None`, never an error; turning it into an
    /// unresolved-member failure is the dispatch layer's responsibility.
    pub fn resolve<M, Q>(&self, name: &Q) -> Option<Macro>
    where
        M: Model,
        Q: Hash + Eq + ?Sized,
        MacroName: Borrow<Q>,
    {
        self.lock()
            .get::<ModelName>(&M::model_name())
            .and_then(|macros| macros.get(name))
            .cloned()
    }

    /// Dispatches an invocation of member `name` on a model instance.
    ///
    /// Resolves the macro registered under `name` for `M` and invokes it with `model` bound
    /// as the receiver, returning the macro's reply verbatim. Fails with
    /// [`InvokeError::UnresolvedMember`] when no macro is registered, the same outcome as
    /// calling an undefined method.
    pub fn dispatch<M: Model>(
        &self,
        model: &mut M,
        name: &str,
        args: Args,
    ) -> Result<BoxValue, InvokeError> {
        match self.resolve::<M, str>(name) {
            Some(mac) => {
                trace!(model = %M::model_name(), name, "dispatching macro");
                mac.call(model, args)
            }
            None => Err(InvokeError::UnresolvedMember {
                model: M::model_name(),
                name: name.to_string(),
            }),
        }
    }

    /// The number of model types that currently have at least one macro.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no macros are registered for any model type.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clears the registry, removing all macros for all model types.
    pub fn clear(&self) {
        self.lock().clear()
    }

    /// The name of every model type with at least one macro, in arbitrary order.
    pub fn models(&self) -> Vec<ModelName> {
        self.lock().keys().cloned().collect()
    }
}

impl Default for MacroRegistry {
    fn default() -> Self {
        Self::new()
    }
}
