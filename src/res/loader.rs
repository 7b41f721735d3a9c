//! The contract between the cache and the format-specific code that builds resources.

use std::io::{Read, Seek};

use crate::errors::*;

use super::ctx::ResourceContext;

/// A readable and seekable source of bytes.
pub trait InputStream: Read + Seek {}

impl<T> InputStream for T where T: Read + Seek {}

/// Describes how a particular type of resource gets deserialized.
///
/// A loader must never hand out a partially initialized resource; any failure is reported
/// with an `Err` instead. Dependencies are pulled in through `ctx`.
///
/// Only `load_from_memory` is required, files and streams are read to the end and passed
/// to it by default.
pub trait ResourceLoader<R> {
    /// Loads a resource from the file at `path`, resolved through the virtual file system.
    fn load_from_file(&self, path: &str, ctx: &mut ResourceContext) -> Result<R> {
        let mut buf = Vec::new();
        ctx.read_to_end(path, &mut buf)?;
        self.load_from_memory(&buf, ctx)
    }

    /// Loads a resource from raw bytes.
    fn load_from_memory(&self, bytes: &[u8], ctx: &mut ResourceContext) -> Result<R>;

    /// Loads a resource from a stream.
    fn load_from_stream(&self, stream: &mut dyn InputStream, ctx: &mut ResourceContext) -> Result<R> {
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf)?;
        self.load_from_memory(&buf, ctx)
    }
}
