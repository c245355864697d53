//! Tests for macro registry operations: registration, removal, and introspection.

use std::{sync::Arc, thread};

use macroable::error::InvokeError;
use macroable::{Args, MacroRegistry, Model};

#[derive(Model)]
struct DummyModel;

#[derive(Model)]
struct AnotherDummy;

fn constant<M: Model>(
    value: i32,
) -> impl Fn(&mut M, Args) -> Result<i32, InvokeError> + Send + Sync + 'static {
    move |_model, _args| Ok(value)
}

#[test]
fn no_macros_are_registered_upon_construction() {
    let registry = MacroRegistry::new();

    assert!(registry.all_macros().is_empty());
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn model_has_macro_reflects_the_registration_lifecycle() {
    let registry = MacroRegistry::new();
    assert!(!registry.model_has_macro::<DummyModel, _>("example_macro"));

    registry.add_macro("example_macro", constant::<DummyModel>(1));
    assert!(registry.model_has_macro::<DummyModel, _>("example_macro"));
    assert!(!registry.model_has_macro::<AnotherDummy, _>("example_macro"));

    registry.remove_macro::<DummyModel, _>("example_macro");
    assert!(!registry.model_has_macro::<DummyModel, _>("example_macro"));
}

#[test]
fn removing_a_macro_that_was_never_registered_is_a_noop() {
    let registry = MacroRegistry::new();

    registry.remove_macro::<DummyModel, _>("example_macro");

    assert!(registry.all_macros().is_empty());
}

#[test]
fn models_that_implement_returns_no_models_before_registration() {
    let registry = MacroRegistry::new();

    assert!(registry.models_that_implement("example_macro").is_empty());
}

#[test]
fn models_that_implement_returns_every_registered_model() {
    let registry = MacroRegistry::new();

    registry.add_macro("example_macro", constant::<DummyModel>(1));
    let models = registry.models_that_implement("example_macro");
    assert_eq!(models.len(), 1);
    assert!(models.contains("DummyModel"));

    registry.add_macro("example_macro", constant::<AnotherDummy>(1));
    let models = registry.models_that_implement("example_macro");
    assert_eq!(models.len(), 2);
    assert!(models.contains("DummyModel"));
    assert!(models.contains("AnotherDummy"));
}

#[test]
fn removing_a_macro_from_one_model_does_not_affect_another() {
    let registry = MacroRegistry::new();
    registry.add_macro("example_macro", constant::<DummyModel>(1));
    registry.add_macro("example_macro", constant::<AnotherDummy>(1));

    registry.remove_macro::<DummyModel, _>("example_macro");

    let models = registry.models_that_implement("example_macro");
    assert_eq!(models.len(), 1);
    assert!(models.contains("AnotherDummy"));
    assert!(registry.model_has_macro::<AnotherDummy, _>("example_macro"));
}

#[test]
fn macros_for_model_returns_empty_before_registration() {
    let registry = MacroRegistry::new();

    assert!(registry.macros_for_model::<DummyModel>().is_empty());
    assert!(registry.macros_for_model::<AnotherDummy>().is_empty());
}

#[test]
fn macros_for_model_tracks_additions_and_removals() {
    let registry = MacroRegistry::new();

    registry.add_macro("example_macro", constant::<DummyModel>(1));
    registry.add_macro("another_macro", constant::<DummyModel>(2));

    let macros = registry.macros_for_model::<DummyModel>();
    assert_eq!(macros.len(), 2);
    assert!(macros.contains_key("example_macro"));
    assert!(macros.contains_key("another_macro"));

    registry.remove_macro::<DummyModel, _>("another_macro");
    assert_eq!(registry.macros_for_model::<DummyModel>().len(), 1);

    registry.remove_macro::<DummyModel, _>("example_macro");
    assert!(registry.macros_for_model::<DummyModel>().is_empty());
}

#[test]
fn a_model_with_no_macros_left_leaves_no_residue() {
    let registry = MacroRegistry::new();

    registry.add_macro("example_macro", constant::<DummyModel>(1));
    registry.remove_macro::<DummyModel, _>("example_macro");

    assert!(registry.all_macros().is_empty());
    assert!(registry.models().is_empty());
    assert_eq!(registry.len(), 0);
    assert!(registry.is_empty());
}

#[test]
fn redeclaring_a_macro_replaces_the_existing_one() {
    let registry = MacroRegistry::new();
    registry.add_macro("example_macro", constant::<DummyModel>(1));
    registry.add_macro("example_macro", constant::<DummyModel>(2));

    // still a single entry for the model
    assert_eq!(registry.macros_for_model::<DummyModel>().len(), 1);

    let mut model = DummyModel;
    let reply = registry
        .dispatch(&mut model, "example_macro", Args::new())
        .unwrap();
    assert_eq!(*reply.downcast::<i32>().unwrap(), 2);
}

#[test]
fn all_macros_snapshots_the_entire_registry() {
    let registry = MacroRegistry::new();
    registry.add_macro("example_macro", constant::<DummyModel>(1));
    registry.add_macro("example_macro", constant::<AnotherDummy>(1));

    let all = registry.all_macros();
    assert_eq!(all.len(), 2);
    assert!(all["DummyModel"].contains_key("example_macro"));
    assert!(all["AnotherDummy"].contains_key("example_macro"));
}

#[test]
fn clear_removes_all_macros() {
    let registry = MacroRegistry::new();
    registry.add_macro("example_macro", constant::<DummyModel>(1));
    registry.add_macro("another_macro", constant::<AnotherDummy>(2));

    registry.clear();

    assert!(registry.is_empty());
    assert!(registry.models_that_implement("example_macro").is_empty());
}

#[test]
fn a_fresh_registry_is_independent_of_previous_instances() {
    {
        let registry = MacroRegistry::new();
        registry.add_macro("example_macro", constant::<DummyModel>(1));
    }

    let registry = MacroRegistry::new();
    assert!(registry.all_macros().is_empty());
    assert!(!registry.model_has_macro::<DummyModel, _>("example_macro"));
}

#[test]
fn concurrent_registration_lands_every_macro() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let registry = Arc::new(MacroRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                registry.add_macro(format!("macro_{}", i), constant::<DummyModel>(i));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.macros_for_model::<DummyModel>().len(), 8);
}
