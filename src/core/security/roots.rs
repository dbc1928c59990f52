use std::io;
use std::path::{Path, PathBuf};

/// Errors from allowed-root validation and path authorization.
#[derive(Debug, thiserror::Error)]
pub enum RootError {
    #[error("allowed directory '{path}' is not accessible: {error}")]
    Inaccessible { path: PathBuf, error: io::Error },

    #[error("allowed directory '{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("cannot resolve path '{path}': {error}")]
    CannotResolve { path: PathBuf, error: io::Error },

    #[error("path '{path}' is outside the allowed directories")]
    OutsideRoots { path: PathBuf },
}

/// The ordered set of directory roots the server may operate within.
///
/// Roots are canonicalized once at construction; every root must exist and
/// be a directory, otherwise construction fails and the process never
/// starts serving. Authorization of request paths is a canonical prefix
/// check against this set.
#[derive(Debug, Clone)]
pub struct RootSet {
    roots: Vec<PathBuf>,
}

impl RootSet {
    /// Validate and canonicalize the configured allowed directories.
    pub fn new(dirs: &[String]) -> Result<Self, RootError> {
        let mut roots = Vec::with_capacity(dirs.len());
        for dir in dirs {
            let raw = Path::new(dir);
            let canonical = raw.canonicalize().map_err(|error| RootError::Inaccessible {
                path: raw.to_path_buf(),
                error,
            })?;
            if !canonical.is_dir() {
                return Err(RootError::NotADirectory {
                    path: raw.to_path_buf(),
                });
            }
            roots.push(canonical);
        }
        Ok(Self { roots })
    }

    /// The canonicalized roots, in configuration order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Resolve a request path and authorize it against the roots.
    ///
    /// The path is canonicalized (so symlinks and `..` cannot escape) and
    /// must be inside, or equal to, one of the configured roots.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, RootError> {
        let path = Path::new(raw);
        let canonical = path.canonicalize().map_err(|error| RootError::CannotResolve {
            path: path.to_path_buf(),
            error,
        })?;
        if self.roots.iter().any(|root| canonical.starts_with(root)) {
            Ok(canonical)
        } else {
            Err(RootError::OutsideRoots { path: canonical })
        }
    }
}
