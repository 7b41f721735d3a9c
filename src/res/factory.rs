//! A registry of loader constructors keyed by resource type.
//!
//! The `LoaderFactory` is a cheap handle. Cloning it shares the same registrations, so an
//! application usually builds one at startup, registers its loaders, and hands clones to
//! every `ResourceManager` it creates.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::errors::*;

use super::loader::ResourceLoader;
use super::loaders::{BytesLoader, TextLoader};

type Constructor<R> = Rc<dyn Fn() -> Box<dyn ResourceLoader<R>>>;

#[derive(Default, Clone)]
pub struct LoaderFactory {
    constructors: Rc<RefCell<HashMap<TypeId, Box<dyn Any>>>>,
}

impl LoaderFactory {
    /// Creates a new and empty `LoaderFactory`.
    pub fn new() -> Self {
        LoaderFactory::default()
    }

    /// Creates a `LoaderFactory` with the built-in loaders of raw bytes and text.
    pub fn with_defaults() -> Self {
        let factory = LoaderFactory::new();
        factory.register::<Vec<u8>, BytesLoader>();
        factory.register::<String, TextLoader>();
        factory
    }

    /// Registers loader `L` for resource type `R`, replacing any previous registration.
    pub fn register<R, L>(&self)
    where
        R: 'static,
        L: ResourceLoader<R> + Default + 'static,
    {
        self.register_with::<R, _>(|| -> Box<dyn ResourceLoader<R>> {
            Box::new(L::default())
        });
    }

    /// Registers a constructor that builds loaders for resource type `R`, replacing any
    /// previous registration.
    pub fn register_with<R, F>(&self, constructor: F)
    where
        R: 'static,
        F: Fn() -> Box<dyn ResourceLoader<R>> + 'static,
    {
        let constructor: Constructor<R> = Rc::new(constructor);
        let prev = self
            .constructors
            .borrow_mut()
            .insert(TypeId::of::<R>(), Box::new(constructor));

        if prev.is_some() {
            debug!(
                "Replaces loader of resource type {}.",
                ::std::any::type_name::<R>()
            );
        }
    }

    /// Removes the loader registration of resource type `R`. Returns true if there was one.
    pub fn remove<R: 'static>(&self) -> bool {
        self.constructors
            .borrow_mut()
            .remove(&TypeId::of::<R>())
            .is_some()
    }

    /// Returns true if a loader has been registered for resource type `R`.
    pub fn contains<R: 'static>(&self) -> bool {
        self.constructors.borrow().contains_key(&TypeId::of::<R>())
    }

    /// Instantiates a loader that is capable of loading resource type `R`.
    pub fn create<R: 'static>(&self) -> Result<Box<dyn ResourceLoader<R>>> {
        // The constructor is cloned out so it could touch the factory itself.
        let constructor = self
            .constructors
            .borrow()
            .get(&TypeId::of::<R>())
            .and_then(|v| v.downcast_ref::<Constructor<R>>())
            .cloned()
            .ok_or_else(|| Error::LoaderNotFound(::std::any::type_name::<R>()))?;

        Ok(constructor())
    }
}
