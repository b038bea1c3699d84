//! Retrieval configuration: repository description and cache location.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use url::Url;

use crate::{Result, StubError};

/// Environment override for the local artifact cache directory.
pub const CACHE_DIR_ENV: &str = "STUBFETCH_CACHE_DIR";

/// Where and how to look for stub artifacts.
#[derive(Debug, Clone)]
pub struct RepositorySpec {
    /// Root of the remote artifact repository (`http(s)://` or `file://`).
    pub root: Url,
    /// Skip the local cache and resolve against the remote only.
    pub skip_local_cache: bool,
}

impl RepositorySpec {
    pub fn new(root: Url) -> Self {
        Self {
            root,
            skip_local_cache: false,
        }
    }

    pub fn skip_local_cache(mut self, skip: bool) -> Self {
        self.skip_local_cache = skip;
        self
    }
}

/// Resolve the local artifact cache directory.
///
/// `STUBFETCH_CACHE_DIR` wins when set; otherwise the per-user cache
/// directory is used.
pub fn default_cache_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(CACHE_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let dirs = ProjectDirs::from("", "", "stubfetch")
        .ok_or_else(|| StubError::CacheDir("no home directory for this user".to_string()))?;
    Ok(dirs.cache_dir().join("repository"))
}
