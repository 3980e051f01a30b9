//=========================================================================
// Script Registry
//=========================================================================
//
// Maps script class names to factories.
//
// The native side asks for scripts by class name (the names listed in
// an entity's script component), so every script type must be
// registered under the name it will be requested by.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::Behaviour;
use crate::core::error::HostError;

//=== ScriptRegistry ======================================================

type Factory = Box<dyn Fn() -> Box<dyn Behaviour> + Send>;

/// Name → constructor table for script classes.
#[derive(Default)]
pub struct ScriptRegistry {
    factories: HashMap<String, Factory>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Registration -----------------------------------------------------

    /// Registers a script type constructed through `Default`.
    pub fn register<T>(&mut self, name: &str)
    where
        T: Behaviour + Default + 'static,
    {
        self.register_with(name, || T::default());
    }

    /// Registers a script built by `factory`. Replaces any previous entry.
    pub fn register_with<T, F>(&mut self, name: &str, factory: F)
    where
        T: Behaviour + 'static,
        F: Fn() -> T + Send + 'static,
    {
        let boxed: Factory = Box::new(move || Box::new(factory()));
        if self.factories.insert(name.to_owned(), boxed).is_some() {
            warn!("Script `{}` was already registered and has been replaced", name);
        } else {
            debug!("Registered script `{}`", name);
        }
    }

    //--- Lookup -----------------------------------------------------------

    /// Builds a fresh instance of the named script.
    pub fn create(&self, name: &str) -> Result<Box<dyn Behaviour>, HostError> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| HostError::UnknownScript(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::ScriptContext;

    #[derive(Default)]
    struct Idle;

    impl Behaviour for Idle {
        fn update(&mut self, _ctx: &ScriptContext) {}
    }

    struct Tuned {
        _speed: f32,
    }

    impl Behaviour for Tuned {
        fn update(&mut self, _ctx: &ScriptContext) {}
    }

    #[test]
    fn creates_registered_scripts() {
        let mut registry = ScriptRegistry::new();
        registry.register::<Idle>("Idle");
        registry.register_with("Tuned", || Tuned { _speed: 4.0 });

        assert!(registry.create("Idle").is_ok());
        assert!(registry.create("Tuned").is_ok());
        assert_eq!(registry.names(), vec!["Idle", "Tuned"]);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let registry = ScriptRegistry::new();

        match registry.create("Missing") {
            Err(HostError::UnknownScript(name)) => assert_eq!(name, "Missing"),
            _ => panic!("expected UnknownScript"),
        }
    }

    #[test]
    fn re_registering_replaces() {
        let mut registry = ScriptRegistry::new();
        registry.register::<Idle>("Script");
        registry.register_with("Script", || Tuned { _speed: 1.0 });

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("Script"));
    }
}
