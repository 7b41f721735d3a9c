use crate::errors::Result;
use crate::res::ctx::ResourceContext;
use crate::res::loader::ResourceLoader;

/// Loads raw bytes as `Vec<u8>` resources.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesLoader {}

impl BytesLoader {
    pub fn new() -> Self {
        BytesLoader {}
    }
}

impl ResourceLoader<Vec<u8>> for BytesLoader {
    fn load_from_memory(&self, bytes: &[u8], ctx: &mut ResourceContext) -> Result<Vec<u8>> {
        trace!("[BytesLoader] {} loads {} bytes.", ctx.id(), bytes.len());
        Ok(bytes.to_vec())
    }
}
