//! Format-agnostic loaders that ship with the crate.

pub mod bytes_loader;
pub use self::bytes_loader::BytesLoader;

pub mod text_loader;
pub use self::text_loader::TextLoader;

pub mod json_loader;
pub use self::json_loader::JsonLoader;
