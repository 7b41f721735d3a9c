//! A single-type cache that maps string ids to exclusively-owned resources.

use std::collections::hash_map::{Entry, HashMap};
use std::ptr;

use crate::errors::*;

/// Specifies how a store treats an id that is already occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheMode {
    /// Strict insert. Fails if the id is occupied already.
    Allocate,
    /// Replaces the occupant and releases it.
    Update,
    /// Keeps the occupant, the new resource is never produced or is discarded.
    Reuse,
}

/// Provides central point to store, access and destroy a particular type of resources.
pub struct ResourceContainer<R> {
    resources: HashMap<String, Box<R>>,
}

impl<R> Default for ResourceContainer<R> {
    fn default() -> Self {
        ResourceContainer::new()
    }
}

impl<R> ResourceContainer<R> {
    /// Creates a new and empty `ResourceContainer`.
    pub fn new() -> Self {
        ResourceContainer {
            resources: HashMap::new(),
        }
    }

    /// Stores `resource` with `id`. The mode defaults to `CacheMode::Update`.
    ///
    /// Returns a reference to the resource that lives in this container after the store,
    /// which is the existing one if `CacheMode::Reuse` found the id occupied.
    pub fn store<M>(&mut self, id: &str, resource: R, mode: M) -> Result<&R>
    where
        M: Into<Option<CacheMode>>,
    {
        let mode = mode.into().unwrap_or(CacheMode::Update);

        match self.resources.entry(id.to_owned()) {
            Entry::Occupied(entry) => match mode {
                CacheMode::Allocate => Err(Error::duplicated::<R>(id)),
                CacheMode::Update => {
                    let slot = entry.into_mut();
                    *slot = Box::new(resource);
                    Ok(&**slot)
                }
                CacheMode::Reuse => Ok(&**entry.into_mut()),
            },
            Entry::Vacant(entry) => Ok(&**entry.insert(Box::new(resource))),
        }
    }

    /// Stores the resource produced by `deserializer` with `id`. The mode defaults to
    /// `CacheMode::Reuse`.
    ///
    /// The `deserializer` is not invoked if the mode reuses an occupied id, or if the mode
    /// refuses it. A failed deserialization leaves this container untouched.
    pub fn store_with<F, M>(&mut self, id: &str, deserializer: F, mode: M) -> Result<&R>
    where
        F: FnOnce() -> Result<R>,
        M: Into<Option<CacheMode>>,
    {
        let mode = mode.into().unwrap_or(CacheMode::Reuse);

        if self.resources.contains_key(id) {
            match mode {
                CacheMode::Allocate => return Err(Error::duplicated::<R>(id)),
                CacheMode::Reuse => return self.find(id).ok_or_else(|| Error::not_found::<R>(id)),
                CacheMode::Update => {}
            }
        }

        let resource = deserializer().map_err(|err| Error::load::<R>(id, err))?;
        self.store(id, resource, mode)
    }

    /// Finds the resource with `id`.
    #[inline]
    pub fn find(&self, id: &str) -> Option<&R> {
        self.resources.get(id).map(|v| &**v)
    }

    /// Finds the resource with `id` mutably.
    #[inline]
    pub fn find_mut(&mut self, id: &str) -> Option<&mut R> {
        self.resources.get_mut(id).map(|v| &mut **v)
    }

    /// Returns true if there is a resource with `id` in this container.
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.resources.contains_key(id)
    }

    /// Gets the number of resources in this container.
    #[inline]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Destroys the resource with `id`. Returns true if it was found and removed.
    pub fn destroy(&mut self, id: &str) -> bool {
        self.resources.remove(id).is_some()
    }

    /// Destroys the resource that lives at the address of `resource`. Returns true if it
    /// was found and removed.
    ///
    /// Resources are matched by identity, the pointer is only compared and never read.
    pub fn destroy_instance(&mut self, resource: *const R) -> bool {
        let id = self
            .resources
            .iter()
            .find(|&(_, v)| ptr::eq(&**v, resource))
            .map(|(k, _)| k.clone());

        match id {
            Some(id) => self.resources.remove(&id).is_some(),
            None => false,
        }
    }

    /// Visits all the id-resource pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.resources.iter().map(|(k, v)| (k.as_str(), &**v))
    }

    /// Destroys all the resources in this container.
    pub fn clear(&mut self) {
        self.resources.clear();
    }
}
