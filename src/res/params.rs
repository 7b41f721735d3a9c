//! Configuration of the virtual file system a `ResourceManager` reads through.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::*;

/// A structure containing configuration data for the resource subsystem.
///
/// ```json
/// {
///     "mounts": [{ "name": "res", "root": "assets" }],
///     "working_dir": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceParams {
    /// Directories to mount, in lookup order.
    pub mounts: Vec<MountParams>,
    /// Mounts the working directory after all the `mounts`.
    pub working_dir: bool,
}

impl Default for ResourceParams {
    fn default() -> Self {
        ResourceParams {
            mounts: Vec::new(),
            working_dir: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountParams {
    /// The identifier of mounted directory.
    pub name: String,
    /// The directory on the host file system.
    pub root: PathBuf,
}

impl ResourceParams {
    /// Parses the params from a JSON document. Missing fields keep their default values.
    pub fn from_json<T: AsRef<str>>(json: T) -> Result<Self> {
        Ok(serde_json::from_str(json.as_ref())?)
    }

    /// Adds a directory to mount after the existing ones.
    pub fn mount<T1, T2>(&mut self, name: T1, root: T2) -> &mut Self
    where
        T1: Into<String>,
        T2: Into<PathBuf>,
    {
        self.mounts.push(MountParams {
            name: name.into(),
            root: root.into(),
        });
        self
    }
}
