use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::errors::*;
use crate::res::loader::InputStream;

use super::VFS;

/// A virtual file system that keeps whole files in memory.
#[derive(Debug, Default, Clone)]
pub struct Memory {
    files: HashMap<PathBuf, Rc<[u8]>>,
}

/// A cursor over a shared in-memory file.
struct MemoryFile(Rc<[u8]>);

impl AsRef<[u8]> for MemoryFile {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Memory {
    pub fn new() -> Self {
        Memory::default()
    }

    /// Adds or replaces the file at `path`.
    pub fn insert<P, T>(&mut self, path: P, bytes: T)
    where
        P: Into<PathBuf>,
        T: Into<Vec<u8>>,
    {
        let bytes: Vec<u8> = bytes.into();
        self.files.insert(path.into(), bytes.into());
    }

    /// Removes the file at `path`. Returns true if it was present.
    pub fn remove<P: AsRef<Path>>(&mut self, path: P) -> bool {
        self.files.remove(path.as_ref()).is_some()
    }

    fn get(&self, path: &Path) -> Result<&Rc<[u8]>> {
        self.files
            .get(path)
            .ok_or_else(|| Error::FileNotFound(path.to_owned()))
    }
}

impl VFS for Memory {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn open(&self, path: &Path) -> Result<Box<dyn InputStream>> {
        let bytes = self.get(path)?.clone();
        Ok(Box::new(Cursor::new(MemoryFile(bytes))))
    }

    fn len(&self, path: &Path) -> Result<u64> {
        Ok(self.get(path)?.len() as u64)
    }

    fn read_to_end(&self, path: &Path, buf: &mut Vec<u8>) -> Result<usize> {
        let bytes = self.get(path)?;
        buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod test {
    use std::io::{Read, Seek, SeekFrom};

    use super::*;

    #[test]
    fn stream() {
        let mut memory = Memory::new();
        memory.insert("mock.txt", "Hello, World!");

        let mut file = memory.open("mock.txt".as_ref()).unwrap();
        file.seek(SeekFrom::Start(7)).unwrap();

        let mut text = String::new();
        file.read_to_string(&mut text).unwrap();
        assert_eq!(text, "World!");
    }

    #[test]
    fn read_partially() {
        let mut memory = Memory::new();
        memory.insert("mock.txt", "Hello, World!");

        let mut buf = [0; 5];
        assert_eq!(memory.read("mock.txt".as_ref(), &mut buf).unwrap(), 5);
        assert_eq!(&buf, b"Hello");
        assert_eq!(memory.len("mock.txt".as_ref()).unwrap(), 13);
        assert!(memory.read("none.txt".as_ref(), &mut buf).is_err());
    }

    #[test]
    fn remove() {
        let mut memory = Memory::new();
        memory.insert("mock.txt", "Hello, World!");
        assert!(memory.exists("mock.txt".as_ref()));

        assert!(memory.remove("mock.txt"));
        assert!(!memory.remove("mock.txt"));
        assert!(!memory.exists("mock.txt".as_ref()));
        assert!(memory.open("mock.txt".as_ref()).is_err());
    }
}
