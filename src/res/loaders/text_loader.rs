use std::str;

use crate::errors::*;
use crate::res::ctx::ResourceContext;
use crate::res::loader::ResourceLoader;

/// Loads UTF-8 encoded text as `String` resources.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextLoader {}

impl TextLoader {
    pub fn new() -> Self {
        TextLoader {}
    }
}

impl ResourceLoader<String> for TextLoader {
    fn load_from_memory(&self, bytes: &[u8], ctx: &mut ResourceContext) -> Result<String> {
        match str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_owned()),
            Err(err) => Err(Error::Malformed(format!(
                "[TextLoader] {} is not valid UTF-8. {}",
                ctx.id(),
                err
            ))),
        }
    }
}
