//! The per-load handle that lets a loader pull in the resources it depends on.
//!
//! A `ResourceContext` is created by the `ResourceManager` for every resource it is about
//! to load, and borrows the manager exclusively for the duration of that single load.
//! Acquiring a dependency re-enters the manager for the dependency's own type, which may
//! run another loader with a context of its own.
//!
//! Dependency graphs among distinct resources must be acyclic. A load that comes back to a
//! resource still under construction fails with `Error::Circular` instead of recursing.

use std::path::Path;

use crate::errors::*;

use super::container::CacheMode;
use super::loader::InputStream;
use super::manager::ResourceManager;
use super::vfs::FileSystem;
use super::Resource;

pub struct ResourceContext<'a> {
    id: &'a str,
    manager: Option<&'a mut ResourceManager>,
}

impl<'a> ResourceContext<'a> {
    /// Creates a standalone context, used when running a loader without a manager.
    /// Dependencies could not be acquired from a standalone context.
    pub fn new(id: &'a str) -> Self {
        ResourceContext { id, manager: None }
    }

    pub(crate) fn with_manager(id: &'a str, manager: &'a mut ResourceManager) -> Self {
        ResourceContext {
            id,
            manager: Some(manager),
        }
    }

    /// Gets the id of resource that is being loaded.
    #[inline]
    pub fn id(&self) -> &str {
        self.id
    }

    /// Returns true if this context is bound to a manager.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.manager.is_some()
    }

    /// Acquires the dependency of type `T` with `id`, which must have been loaded into the
    /// manager already.
    pub fn acquire<T: Resource>(&self, id: &str) -> Result<&T> {
        let manager = self
            .manager
            .as_ref()
            .ok_or_else(|| Error::Unbound(id.to_owned()))?;

        not_loading::<T>(manager, id)?;
        manager.find::<T>(id).ok_or_else(|| Error::not_found::<T>(id))
    }

    /// Acquires the dependency of type `T` with `id`, loading it from the file at `path`
    /// if the manager does not have it yet.
    pub fn acquire_from_file<T: Resource>(&mut self, id: &str, path: &str) -> Result<&T> {
        let owner = self.id;
        let manager = self.bound(id)?;
        not_loading::<T>(manager, id)?;
        if !manager.contains::<T>(id) {
            trace!("[{}] Acquires dependency {} from file {}.", owner, id, path);
            manager.add_from_file::<T, _>(id, path, CacheMode::Update)?;
        }

        manager.find::<T>(id).ok_or_else(|| Error::not_found::<T>(id))
    }

    /// Acquires the dependency of type `T` with `id`, loading it from `bytes` if the
    /// manager does not have it yet.
    pub fn acquire_from_memory<T: Resource>(&mut self, id: &str, bytes: &[u8]) -> Result<&T> {
        let owner = self.id;
        let manager = self.bound(id)?;
        not_loading::<T>(manager, id)?;
        if !manager.contains::<T>(id) {
            trace!("[{}] Acquires dependency {} from memory.", owner, id);
            manager.add_from_memory::<T, _>(id, bytes, CacheMode::Update)?;
        }

        manager.find::<T>(id).ok_or_else(|| Error::not_found::<T>(id))
    }

    /// Acquires the dependency of type `T` with `id`, loading it from `stream` if the
    /// manager does not have it yet.
    pub fn acquire_from_stream<T: Resource>(
        &mut self,
        id: &str,
        stream: &mut dyn InputStream,
    ) -> Result<&T> {
        let owner = self.id;
        let manager = self.bound(id)?;
        not_loading::<T>(manager, id)?;
        if !manager.contains::<T>(id) {
            trace!("[{}] Acquires dependency {} from stream.", owner, id);
            manager.add_from_stream::<T, _>(id, stream, CacheMode::Update)?;
        }

        manager.find::<T>(id).ok_or_else(|| Error::not_found::<T>(id))
    }

    /// Checks if the file exists in the virtual file system.
    pub fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        match self.manager {
            Some(ref manager) => manager.filesystem().exists(path),
            None => FileSystem::default().exists(path),
        }
    }

    /// Opens the file in the virtual file system as a readable stream.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<Box<dyn InputStream>> {
        match self.manager {
            Some(ref manager) => manager.filesystem().open(path),
            None => FileSystem::default().open(path),
        }
    }

    /// Reads the whole file in the virtual file system and appends it into `buf`.
    pub fn read_to_end<P: AsRef<Path>>(&self, path: P, buf: &mut Vec<u8>) -> Result<usize> {
        match self.manager {
            Some(ref manager) => manager.filesystem().read_to_end(path, buf),
            None => FileSystem::default().read_to_end(path, buf),
        }
    }

    fn bound(&mut self, id: &str) -> Result<&mut ResourceManager> {
        match self.manager {
            Some(ref mut manager) => Ok(&mut **manager),
            None => Err(Error::Unbound(id.to_owned())),
        }
    }
}

/// A resource that is still under construction could not be handed out as a dependency,
/// not even the previous instance that an update is about to replace.
fn not_loading<T: Resource>(manager: &ResourceManager, id: &str) -> Result<()> {
    if manager.is_loading::<T>(id) {
        Err(Error::circular::<T>(id))
    } else {
        Ok(())
    }
}
