//! Errors raised by the resource cache, the loaders and the virtual file system.

use std::path::PathBuf;

use failure::Fail;

/// The coarse classification of an `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No loader has been registered for the requested resource type.
    Configuration,
    /// A loader ran but could not produce a valid resource.
    Load,
    /// A store was rejected by the cache policy.
    Store,
    /// A dependency lookup found nothing usable.
    Access,
    /// A resource depends on its own in-progress load.
    Reentrancy,
    /// The virtual file system failed.
    IO,
}

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{}", _0)]
    IO(#[cause] ::std::io::Error),
    #[fail(display = "{}", _0)]
    Json(#[cause] ::serde_json::Error),
    #[fail(display = "{}", _0)]
    Malformed(String),
    #[fail(display = "Undefined path {:?}.", _0)]
    FileNotFound(PathBuf),
    #[fail(display = "Virtual file system with identifier {} has been mounted already.", _0)]
    Mounted(String),
    #[fail(display = "Could not find loader for resource type {}.", _0)]
    LoaderNotFound(&'static str),
    #[fail(display = "[{}] Failed to load resource of type {}. {}", id, ty, cause)]
    Load {
        ty: &'static str,
        id: String,
        cause: Box<Error>,
    },
    #[fail(display = "[{}] Resource of type {} has been allocated already.", id, ty)]
    Duplicated { ty: &'static str, id: String },
    #[fail(display = "[{}] Resource of type {} is not found.", id, ty)]
    NotFound { ty: &'static str, id: String },
    #[fail(display = "[{}] Dependency could not be resolved without a resource manager.", _0)]
    Unbound(String),
    #[fail(display = "[{}] Circular reference of resource type {} found.", id, ty)]
    Circular { ty: &'static str, id: String },
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl Error {
    /// Gets the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::IO(_) | Error::FileNotFound(_) | Error::Mounted(_) => ErrorKind::IO,
            Error::Json(_) | Error::Malformed(_) | Error::Load { .. } => ErrorKind::Load,
            Error::LoaderNotFound(_) => ErrorKind::Configuration,
            Error::Duplicated { .. } => ErrorKind::Store,
            Error::NotFound { .. } | Error::Unbound(_) => ErrorKind::Access,
            Error::Circular { .. } => ErrorKind::Reentrancy,
        }
    }

    /// Walks through nested load failures and returns the error that started them.
    pub fn root(&self) -> &Error {
        let mut err = self;
        while let Error::Load { ref cause, .. } = *err {
            err = &**cause;
        }

        err
    }

    /// Gets the resource id carried by this error, if any.
    pub fn id(&self) -> Option<&str> {
        match *self {
            Error::Load { ref id, .. }
            | Error::Duplicated { ref id, .. }
            | Error::NotFound { ref id, .. }
            | Error::Circular { ref id, .. }
            | Error::Unbound(ref id) => Some(id.as_str()),
            _ => None,
        }
    }

    pub(crate) fn load<R>(id: &str, cause: Error) -> Self {
        Error::Load {
            ty: ::std::any::type_name::<R>(),
            id: id.to_owned(),
            cause: Box::new(cause),
        }
    }

    pub(crate) fn duplicated<R>(id: &str) -> Self {
        Error::Duplicated {
            ty: ::std::any::type_name::<R>(),
            id: id.to_owned(),
        }
    }

    pub(crate) fn not_found<R>(id: &str) -> Self {
        Error::NotFound {
            ty: ::std::any::type_name::<R>(),
            id: id.to_owned(),
        }
    }

    pub(crate) fn circular<R>(id: &str) -> Self {
        Error::Circular {
            ty: ::std::any::type_name::<R>(),
            id: id.to_owned(),
        }
    }
}

impl From<::std::io::Error> for Error {
    fn from(err: ::std::io::Error) -> Self {
        Error::IO(err)
    }
}

impl From<::serde_json::Error> for Error {
    fn from(err: ::serde_json::Error) -> Self {
        Error::Json(err)
    }
}
