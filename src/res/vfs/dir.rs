use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::*;
use crate::res::loader::InputStream;

use super::VFS;

/// Maps a local host directory into the virtual file system.
#[derive(Debug, Default, Clone)]
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    /// Creates a `Directory` rooted at `root`, which must be a readable directory.
    pub fn new<T: Into<PathBuf>>(root: T) -> Result<Self> {
        let root = root.into();
        info!("Creates directory based virtual file system at {:?}.", root);

        let metadata = fs::metadata(&root)?;
        if metadata.is_dir() {
            Ok(Directory { root })
        } else {
            Err(Error::Malformed(format!(
                "Directory file system must be associated with a readable directory, but {:?} is not.",
                root
            )))
        }
    }

    /// Gets the root of this directory. An empty root means the working directory.
    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn join(&self, path: &Path) -> PathBuf {
        if self.root.as_os_str().is_empty() {
            path.to_owned()
        } else {
            self.root.join(path)
        }
    }
}

impl VFS for Directory {
    fn exists(&self, path: &Path) -> bool {
        fs::metadata(self.join(path))
            .map(|v| v.is_file())
            .unwrap_or(false)
    }

    fn open(&self, path: &Path) -> Result<Box<dyn InputStream>> {
        let file = fs::File::open(self.join(path))?;
        Ok(Box::new(file))
    }

    fn len(&self, path: &Path) -> Result<u64> {
        Ok(fs::metadata(self.join(path))?.len())
    }

    fn full_path(&self, path: &Path) -> Option<PathBuf> {
        Some(self.join(path))
    }
}
