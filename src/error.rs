use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error an action hands back to abort the walk.
///
/// Anything implementing [`std::error::Error`] converts with `?` or `.into()`.
pub type ActionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type returned by actions.
pub type ActionResult<T> = Result<T, ActionError>;

/// Every failure is fatal: the walk stops at the first one and `run` returns it.
#[derive(Error, Debug)]
pub enum WalkError {
    // Opening a directory
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("IO error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // stat / lstat
    #[error("metadata fetch failed for {}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Caller code
    #[error("action failed for {}", path.display())]
    Action {
        path: PathBuf,
        #[source]
        source: ActionError,
    },
}

impl WalkError {
    /// The path this error occurred at.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotADirectory(p) | Self::NotFound(p) | Self::PermissionDenied(p) => p.as_path(),
            Self::Io { path, .. } | Self::Metadata { path, .. } | Self::Action { path, .. } => {
                path.as_path()
            }
        }
    }

    /// Map a failure to open `path` as a directory stream.
    pub(crate) fn open(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            io::ErrorKind::NotADirectory => Self::NotADirectory(path),
            _ => Self::Io { path, source: err },
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn metadata(path: &Path, source: io::Error) -> Self {
        Self::Metadata {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn action(path: &Path, source: ActionError) -> Self {
        Self::Action {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn open_errors_map_by_kind() {
        let p = Path::new("x");
        assert!(matches!(
            WalkError::open(p, io::Error::from(io::ErrorKind::NotFound)),
            WalkError::NotFound(_)
        ));
        assert!(matches!(
            WalkError::open(p, io::Error::from(io::ErrorKind::PermissionDenied)),
            WalkError::PermissionDenied(_)
        ));
        assert!(matches!(
            WalkError::open(p, io::Error::from(io::ErrorKind::NotADirectory)),
            WalkError::NotADirectory(_)
        ));
        assert!(matches!(
            WalkError::open(p, io::Error::from(io::ErrorKind::Interrupted)),
            WalkError::Io { .. }
        ));
    }

    #[test]
    fn action_error_keeps_its_source() {
        let err = WalkError::action(Path::new("a/b"), "boom".into());
        assert_eq!(err.path(), Path::new("a/b"));
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("boom"));
    }
}
