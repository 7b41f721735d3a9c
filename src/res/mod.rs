//! A typed cache of resources, and the loaders that populate it.
//!
//! # Resource
//!
//! A _resource_ is any owned, in-memory value that is identified by a string id, such as a
//! decoded texture, a sound buffer or a parsed configuration. Ids are opaque to the cache and
//! are scoped by resource type, so a texture and a sound buffer could both be named `"A"`.
//!
//! Every type that implements `Clone` and is `'static` is a resource. The `Clone` is used when
//! the application asks for an independent copy with `ResourceManager::instantiate`.
//!
//! # Cache Modes
//!
//! Storing into an id that is occupied already is governed by a `CacheMode`:
//!
//! - `Allocate` fails with `Error::Duplicated`, the occupant stays.
//! - `Update` replaces the occupant.
//! - `Reuse` hands out the occupant, and never runs the loader.
//!
//! # Dependencies
//!
//! A `ResourceLoader` receives a `ResourceContext` bound to the `ResourceManager` that
//! started the load. Calling `acquire_from_file` and friends on the context loads the
//! dependency into the same manager, or returns the cached one:
//!
//! ```
//! use reservoir::prelude::*;
//!
//! #[derive(Clone)]
//! struct Material {
//!     texture: Vec<u8>,
//! }
//!
//! #[derive(Default)]
//! struct MaterialLoader {}
//!
//! impl ResourceLoader<Material> for MaterialLoader {
//!     fn load_from_memory(&self, bytes: &[u8], ctx: &mut ResourceContext) -> Result<Material> {
//!         let texture = ctx.acquire_from_memory::<Vec<u8>>("texture", bytes)?.clone();
//!         Ok(Material { texture })
//!     }
//! }
//!
//! let loaders = LoaderFactory::with_defaults();
//! loaders.register::<Material, MaterialLoader>();
//!
//! let mut manager = ResourceManager::new(loaders);
//! manager.add_from_memory::<Material, _>("material", &[1, 2, 3], None).unwrap();
//!
//! assert!(manager.contains::<Vec<u8>>("texture"));
//! ```

pub mod container;
pub mod ctx;
pub mod factory;
pub mod loader;
pub mod loaders;
pub mod manager;
pub mod params;
pub mod vfs;

use std::any::Any;

/// The capability every managed type must have.
pub trait Resource: Any + Clone {}

impl<T: Any + Clone> Resource for T {}

pub mod prelude {
    pub use super::container::{CacheMode, ResourceContainer};
    pub use super::ctx::ResourceContext;
    pub use super::factory::LoaderFactory;
    pub use super::loader::{InputStream, ResourceLoader};
    pub use super::loaders::{BytesLoader, JsonLoader, TextLoader};
    pub use super::manager::ResourceManager;
    pub use super::params::{MountParams, ResourceParams};
    pub use super::vfs::{Directory, FileSystem, Memory, VFS};
    pub use super::Resource;
}
