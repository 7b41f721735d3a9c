use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::errors::Result;
use crate::res::ctx::ResourceContext;
use crate::res::loader::{InputStream, ResourceLoader};

/// Loads any deserializable type from JSON documents.
///
/// Resources that reference other resources are better served by a dedicated loader, which
/// parses an intermediate description and acquires the dependencies through the context.
pub struct JsonLoader<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T> JsonLoader<T> {
    pub fn new() -> Self {
        JsonLoader {
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for JsonLoader<T> {
    fn default() -> Self {
        JsonLoader::new()
    }
}

impl<T> fmt::Debug for JsonLoader<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "JsonLoader")
    }
}

impl<T: DeserializeOwned> ResourceLoader<T> for JsonLoader<T> {
    fn load_from_memory(&self, bytes: &[u8], _: &mut ResourceContext) -> Result<T> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn load_from_stream(&self, stream: &mut dyn InputStream, _: &mut ResourceContext) -> Result<T> {
        Ok(serde_json::from_reader(stream)?)
    }
}
