//! # Reservoir
//!
//! A typed resource cache for applications that load many heterogeneous assets by string
//! ids, where some assets reference other assets while being constructed.
//!
//! The `ResourceManager` owns one cache per resource type, runs the loaders registered in a
//! shared `LoaderFactory`, and lets every loader pull in its dependencies through a
//! `ResourceContext`. Raw bytes are read through a virtual `FileSystem` that searches its
//! mounted backends in order.
//!
//! The whole crate is single-threaded. Neither the manager nor the factory is `Send`.

#[macro_use]
extern crate log;

pub mod errors;
pub mod res;

pub mod prelude {
    pub use crate::errors::{Error, ErrorKind, Result};
    pub use crate::res::prelude::*;
}
