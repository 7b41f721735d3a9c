use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

use crate::errors::*;

use super::container::{CacheMode, ResourceContainer};
use super::ctx::ResourceContext;
use super::factory::LoaderFactory;
use super::loader::{InputStream, ResourceLoader};
use super::params::ResourceParams;
use super::vfs::FileSystem;
use super::Resource;

/// The per-type storage of a `ResourceManager`. The loader is created on first use and
/// kept around for the following loads of the same type.
struct Slot<R: Resource> {
    container: ResourceContainer<R>,
    loader: Option<Box<dyn ResourceLoader<R>>>,
}

trait ManagedContainer {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn len(&self) -> usize;
    fn type_name(&self) -> &'static str;
}

impl<R: Resource> ManagedContainer for Slot<R> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn len(&self) -> usize {
        self.container.len()
    }

    fn type_name(&self) -> &'static str {
        ::std::any::type_name::<R>()
    }
}

/// The central owner of every cached resource, keeps one `ResourceContainer` per type.
///
/// Resources are added through loaders resolved from the `LoaderFactory`. Loaders receive a
/// `ResourceContext` bound to this manager, which they use to acquire the resources they
/// depend on.
///
/// # Examples
///
/// ```
/// use reservoir::prelude::*;
///
/// let mut manager = ResourceManager::new(LoaderFactory::with_defaults());
/// manager.add_from_memory::<String, _>("greeting", b"Hello, World!", None).unwrap();
///
/// let mut copy = manager.instantiate::<String>("greeting").unwrap();
/// copy.push('!');
///
/// assert_eq!(manager.find::<String>("greeting").unwrap(), "Hello, World!");
/// ```
pub struct ResourceManager {
    containers: HashMap<TypeId, Box<dyn ManagedContainer>>,
    loading: HashSet<(TypeId, String)>,
    loaders: LoaderFactory,
    filesystem: FileSystem,
}

impl ResourceManager {
    /// Creates a new `ResourceManager` that reads files relative to the working directory.
    pub fn new(loaders: LoaderFactory) -> Self {
        ResourceManager::with_filesystem(loaders, FileSystem::default())
    }

    /// Creates a new `ResourceManager` that reads files through `filesystem`.
    pub fn with_filesystem(loaders: LoaderFactory, filesystem: FileSystem) -> Self {
        ResourceManager {
            containers: HashMap::new(),
            loading: HashSet::new(),
            loaders,
            filesystem,
        }
    }

    /// Creates a new `ResourceManager` with the file system described in `params`.
    pub fn from_params(loaders: LoaderFactory, params: &ResourceParams) -> Result<Self> {
        let filesystem = FileSystem::from_params(params)?;
        Ok(ResourceManager::with_filesystem(loaders, filesystem))
    }

    #[inline]
    pub fn loaders(&self) -> &LoaderFactory {
        &self.loaders
    }

    #[inline]
    pub fn filesystem(&self) -> &FileSystem {
        &self.filesystem
    }

    #[inline]
    pub fn filesystem_mut(&mut self) -> &mut FileSystem {
        &mut self.filesystem
    }

    /// Makes sure there is a container for resource type `R`.
    pub fn register<R: Resource>(&mut self) {
        self.slot_mut::<R>();
    }

    /// Destroys the container of resource type `R`, and every resource in it. Returns true
    /// if there was one.
    pub fn release<R: Resource>(&mut self) -> bool {
        match self.containers.remove(&TypeId::of::<R>()) {
            Some(v) => {
                info!("Releases {} resources of type {}.", v.len(), v.type_name());
                true
            }
            None => false,
        }
    }

    /// Returns true if there is a container for resource type `R`.
    #[inline]
    pub fn is_registered<R: Resource>(&self) -> bool {
        self.containers.contains_key(&TypeId::of::<R>())
    }

    /// Adds a resource from the file at `path`. The mode defaults to `CacheMode::Reuse`.
    pub fn add_from_file<R, M>(&mut self, id: &str, path: &str, mode: M) -> Result<&R>
    where
        R: Resource,
        M: Into<Option<CacheMode>>,
    {
        let mode = mode.into().unwrap_or(CacheMode::Reuse);
        self.add_with_loader::<R, _>(id, mode, |loader, ctx| {
            loader.load_from_file(path, ctx)
        })
    }

    /// Adds a resource from raw bytes. The mode defaults to `CacheMode::Update`.
    pub fn add_from_memory<R, M>(&mut self, id: &str, bytes: &[u8], mode: M) -> Result<&R>
    where
        R: Resource,
        M: Into<Option<CacheMode>>,
    {
        let mode = mode.into().unwrap_or(CacheMode::Update);
        self.add_with_loader::<R, _>(id, mode, |loader, ctx| {
            loader.load_from_memory(bytes, ctx)
        })
    }

    /// Adds a resource from a stream. The mode defaults to `CacheMode::Update`.
    pub fn add_from_stream<R, M>(
        &mut self,
        id: &str,
        stream: &mut dyn InputStream,
        mode: M,
    ) -> Result<&R>
    where
        R: Resource,
        M: Into<Option<CacheMode>>,
    {
        let mode = mode.into().unwrap_or(CacheMode::Update);
        self.add_with_loader::<R, _>(id, mode, |loader, ctx| {
            loader.load_from_stream(stream, ctx)
        })
    }

    /// Adds a resource built by `deserializer`, which does not need a registered loader.
    /// The mode defaults to `CacheMode::Update`.
    pub fn add_from_deserializer<R, F, M>(&mut self, id: &str, deserializer: F, mode: M) -> Result<&R>
    where
        R: Resource,
        F: FnOnce(&mut ResourceContext) -> Result<R>,
        M: Into<Option<CacheMode>>,
    {
        let mode = mode.into().unwrap_or(CacheMode::Update);
        if self.reusable::<R>(id, mode)? {
            return self.find_or_err(id);
        }

        self.construct::<R, _>(id, mode, deserializer)?;
        self.find_or_err(id)
    }

    /// Returns an independent copy of the cached resource with `id`.
    pub fn instantiate<R: Resource>(&self, id: &str) -> Result<R> {
        self.find_or_err::<R>(id).map(R::clone)
    }

    /// Returns an independent copy of the resource with `id`, loading it from the file at
    /// `path` if it is not cached yet.
    pub fn instantiate_from_file<R: Resource>(&mut self, id: &str, path: &str) -> Result<R> {
        self.add_from_file::<R, _>(id, path, CacheMode::Reuse)
            .map(R::clone)
    }

    /// Returns an independent copy of the resource with `id`, loading it from `bytes` if it
    /// is not cached yet.
    pub fn instantiate_from_memory<R: Resource>(&mut self, id: &str, bytes: &[u8]) -> Result<R> {
        self.add_from_memory::<R, _>(id, bytes, CacheMode::Reuse)
            .map(R::clone)
    }

    /// Returns an independent copy of the resource with `id`, loading it from `stream` if it
    /// is not cached yet.
    pub fn instantiate_from_stream<R: Resource>(
        &mut self,
        id: &str,
        stream: &mut dyn InputStream,
    ) -> Result<R> {
        self.add_from_stream::<R, _>(id, stream, CacheMode::Reuse)
            .map(R::clone)
    }

    /// Returns an independent copy of the resource with `id`, building it with
    /// `deserializer` if it is not cached yet.
    pub fn instantiate_from_deserializer<R, F>(&mut self, id: &str, deserializer: F) -> Result<R>
    where
        R: Resource,
        F: FnOnce(&mut ResourceContext) -> Result<R>,
    {
        self.add_from_deserializer(id, deserializer, CacheMode::Reuse)
            .map(R::clone)
    }

    /// Finds the cached resource with `id`.
    pub fn find<R: Resource>(&self, id: &str) -> Option<&R> {
        self.slot::<R>().and_then(|v| v.container.find(id))
    }

    /// Finds the cached resource with `id` mutably.
    pub fn find_mut<R: Resource>(&mut self, id: &str) -> Option<&mut R> {
        self.containers
            .get_mut(&TypeId::of::<R>())
            .and_then(|v| downcast_mut::<R>(&mut **v).container.find_mut(id))
    }

    /// Returns true if there is a cached resource of type `R` with `id`.
    pub fn contains<R: Resource>(&self, id: &str) -> bool {
        self.slot::<R>()
            .map(|v| v.container.contains(id))
            .unwrap_or(false)
    }

    /// Gets the number of cached resources of type `R`.
    pub fn count<R: Resource>(&self) -> usize {
        self.slot::<R>().map(|v| v.container.len()).unwrap_or(0)
    }

    /// Destroys the cached resource with `id`. Returns true if it was found and removed.
    pub fn destroy<R: Resource>(&mut self, id: &str) -> bool {
        match self.containers.get_mut(&TypeId::of::<R>()) {
            Some(v) => downcast_mut::<R>(&mut **v).container.destroy(id),
            None => false,
        }
    }

    /// Destroys the cached resource that lives at the address of `resource`. Returns true
    /// if it was found and removed.
    pub fn destroy_instance<R: Resource>(&mut self, resource: *const R) -> bool {
        match self.containers.get_mut(&TypeId::of::<R>()) {
            Some(v) => downcast_mut::<R>(&mut **v).container.destroy_instance(resource),
            None => false,
        }
    }

    /// Destroys every container and every cached resource.
    pub fn clear(&mut self) {
        let len: usize = self.containers.values().map(|v| v.len()).sum();
        info!(
            "Clears {} resources of {} types.",
            len,
            self.containers.len()
        );

        self.containers.clear();
    }

    fn add_with_loader<R, F>(&mut self, id: &str, mode: CacheMode, load: F) -> Result<&R>
    where
        R: Resource,
        F: FnOnce(&dyn ResourceLoader<R>, &mut ResourceContext) -> Result<R>,
    {
        if self.reusable::<R>(id, mode)? {
            return self.find_or_err(id);
        }

        // The cached loader could be in use by an outer load of the same type, a fresh
        // one is created from the factory then.
        let loader = match self.slot_mut::<R>().loader.take() {
            Some(loader) => loader,
            None => self.loaders.create::<R>()?,
        };

        let result = self.construct::<R, _>(id, mode, |ctx| load(&*loader, ctx));

        let slot = self.slot_mut::<R>();
        if slot.loader.is_none() {
            slot.loader = Some(loader);
        }

        result?;
        self.find_or_err(id)
    }

    /// Checks `mode` against the current occupant of `id`. Returns true if the occupant
    /// should be handed out as it is.
    fn reusable<R: Resource>(&mut self, id: &str, mode: CacheMode) -> Result<bool> {
        if !self.slot_mut::<R>().container.contains(id) {
            return Ok(false);
        }

        match mode {
            CacheMode::Allocate => {
                warn!(
                    "[{}] Rejects allocation of resource type {}, the id is occupied.",
                    id,
                    ::std::any::type_name::<R>()
                );

                Err(Error::duplicated::<R>(id))
            }
            CacheMode::Update => Ok(false),
            CacheMode::Reuse => {
                trace!("[{}] Reuses resource of type {}.", id, ::std::any::type_name::<R>());
                Ok(true)
            }
        }
    }

    fn construct<R, F>(&mut self, id: &str, mode: CacheMode, produce: F) -> Result<()>
    where
        R: Resource,
        F: FnOnce(&mut ResourceContext) -> Result<R>,
    {
        let key = (TypeId::of::<R>(), id.to_owned());
        if !self.loading.insert(key.clone()) {
            warn!(
                "[{}] Resource of type {} depends on itself.",
                id,
                ::std::any::type_name::<R>()
            );

            return Err(Error::circular::<R>(id));
        }

        let result = produce(&mut ResourceContext::with_manager(id, self));
        self.loading.remove(&key);

        match result {
            Ok(resource) => {
                self.slot_mut::<R>().container.store(id, resource, mode)?;
                debug!(
                    "[{}] Loads resource of type {} with {:?}.",
                    id,
                    ::std::any::type_name::<R>(),
                    mode
                );

                Ok(())
            }
            Err(err) => {
                warn!(
                    "[{}] Failed to load resource of type {}. {}",
                    id,
                    ::std::any::type_name::<R>(),
                    err
                );

                Err(Error::load::<R>(id, err))
            }
        }
    }

    pub(crate) fn is_loading<R: Resource>(&self, id: &str) -> bool {
        self.loading.contains(&(TypeId::of::<R>(), id.to_owned()))
    }

    fn find_or_err<R: Resource>(&self, id: &str) -> Result<&R> {
        self.find::<R>(id).ok_or_else(|| Error::not_found::<R>(id))
    }

    fn slot<R: Resource>(&self) -> Option<&Slot<R>> {
        self.containers.get(&TypeId::of::<R>()).map(|v| {
            v.as_any()
                .downcast_ref::<Slot<R>>()
                .expect("Containers are keyed by the TypeId of their resource type.")
        })
    }

    fn slot_mut<R: Resource>(&mut self) -> &mut Slot<R> {
        let container = self
            .containers
            .entry(TypeId::of::<R>())
            .or_insert_with(|| {
                debug!("Registers resource type {}.", ::std::any::type_name::<R>());
                let slot: Box<dyn ManagedContainer> = Box::new(Slot::<R> {
                    container: ResourceContainer::new(),
                    loader: None,
                });
                slot
            });

        downcast_mut::<R>(&mut **container)
    }
}

fn downcast_mut<R: Resource>(container: &mut dyn ManagedContainer) -> &mut Slot<R> {
    container
        .as_any_mut()
        .downcast_mut::<Slot<R>>()
        .expect("Containers are keyed by the TypeId of their resource type.")
}
