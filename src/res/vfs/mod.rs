//! The virtual file system that lets loaders read named files from several backends.
//!
//! Backends are mounted under unique identifiers and searched in the order they were
//! mounted. The first backend that reports a file as existing serves every request for it.

pub mod dir;
pub use self::dir::Directory;

pub mod memory;
pub use self::memory::Memory;

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::errors::*;

use super::loader::InputStream;
use super::params::ResourceParams;

/// `VFS` enumerates all the io operations that a backend should support.
pub trait VFS: 'static {
    /// Checks if the file exists.
    fn exists(&self, path: &Path) -> bool;

    /// Opens the file as a readable stream.
    fn open(&self, path: &Path) -> Result<Box<dyn InputStream>>;

    /// Gets the length of file in bytes.
    fn len(&self, path: &Path) -> Result<u64>;

    /// Reads all bytes until EOF and appends them into `buf`.
    fn read_to_end(&self, path: &Path, buf: &mut Vec<u8>) -> Result<usize> {
        let mut file = self.open(path)?;
        Ok(file.read_to_end(buf)?)
    }

    /// Reads as many bytes as possible into `buf`, and returns the number of bytes read.
    fn read(&self, path: &Path, buf: &mut [u8]) -> Result<usize> {
        let mut file = self.open(path)?;
        let mut len = 0;

        while len < buf.len() {
            match file.read(&mut buf[len..])? {
                0 => break,
                n => len += n,
            }
        }

        Ok(len)
    }

    /// Resolves the path on the host file system, if this backend maps onto one.
    fn full_path(&self, _: &Path) -> Option<PathBuf> {
        None
    }
}

struct Mount {
    name: String,
    vfs: Box<dyn VFS>,
}

/// An ordered collection of mounted backends.
pub struct FileSystem {
    mounts: Vec<Mount>,
}

impl Default for FileSystem {
    /// Creates a `FileSystem` with the working directory mounted as `cwd`.
    fn default() -> Self {
        let mut fs = FileSystem::new();
        fs.mounts.push(Mount {
            name: "cwd".into(),
            vfs: Box::new(Directory::default()),
        });
        fs
    }
}

impl FileSystem {
    /// Creates a `FileSystem` without any backend.
    pub fn new() -> Self {
        FileSystem { mounts: Vec::new() }
    }

    /// Creates a `FileSystem` with the mounts described in `params`.
    pub fn from_params(params: &ResourceParams) -> Result<Self> {
        let mut fs = FileSystem::new();
        for v in &params.mounts {
            fs.mount(v.name.as_str(), Directory::new(v.root.clone())?)?;
        }

        if params.working_dir {
            fs.mount("cwd", Directory::default())?;
        }

        Ok(fs)
    }

    /// Mounts a backend with identifier `name` after all the existing ones.
    pub fn mount<T, F>(&mut self, name: T, vfs: F) -> Result<()>
    where
        T: Into<String>,
        F: VFS,
    {
        let name = name.into();
        if self.is_mounted(&name) {
            return Err(Error::Mounted(name));
        }

        info!("Mounts virtual file system {}.", name);
        self.mounts.push(Mount {
            name,
            vfs: Box::new(vfs),
        });

        Ok(())
    }

    /// Unmounts the backend with identifier `name`. Returns true if it was mounted.
    pub fn unmount<T: AsRef<str>>(&mut self, name: T) -> bool {
        let name = name.as_ref();
        let len = self.mounts.len();
        self.mounts.retain(|v| v.name != name);

        if self.mounts.len() != len {
            info!("Unmounts virtual file system {}.", name);
            true
        } else {
            false
        }
    }

    /// Checks if there is a backend mounted with identifier `name`.
    pub fn is_mounted<T: AsRef<str>>(&self, name: T) -> bool {
        let name = name.as_ref();
        self.mounts.iter().any(|v| v.name == name)
    }

    /// Gets the identifiers of mounted backends in lookup order.
    pub fn mounts(&self) -> impl Iterator<Item = &str> {
        self.mounts.iter().map(|v| v.name.as_str())
    }

    /// Checks if the file exists in any of the mounted backends.
    pub fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        self.locate(path.as_ref()).is_some()
    }

    /// Opens the file as a readable stream.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<Box<dyn InputStream>> {
        let path = path.as_ref();
        self.locate_or_err(path)?.open(path)
    }

    /// Reads all bytes until EOF and appends them into `buf`.
    pub fn read_to_end<P: AsRef<Path>>(&self, path: P, buf: &mut Vec<u8>) -> Result<usize> {
        let path = path.as_ref();
        self.locate_or_err(path)?.read_to_end(path, buf)
    }

    /// Reads as many bytes as possible into `buf`, and returns the number of bytes read.
    pub fn read<P: AsRef<Path>>(&self, path: P, buf: &mut [u8]) -> Result<usize> {
        let path = path.as_ref();
        self.locate_or_err(path)?.read(path, buf)
    }

    /// Gets the length of file in bytes.
    pub fn len<P: AsRef<Path>>(&self, path: P) -> Result<u64> {
        let path = path.as_ref();
        self.locate_or_err(path)?.len(path)
    }

    /// Resolves the file into a path on the host file system, if the backend that serves it
    /// maps onto one.
    pub fn full_path<P: AsRef<Path>>(&self, path: P) -> Option<PathBuf> {
        let path = path.as_ref();
        self.locate(path).and_then(|v| v.full_path(path))
    }

    fn locate(&self, path: &Path) -> Option<&dyn VFS> {
        self.mounts
            .iter()
            .find(|v| v.vfs.exists(path))
            .map(|v| &*v.vfs)
    }

    fn locate_or_err(&self, path: &Path) -> Result<&dyn VFS> {
        self.locate(path)
            .ok_or_else(|| Error::FileNotFound(path.to_owned()))
    }
}
