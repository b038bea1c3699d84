use std::path::{Path, PathBuf};

use url::Url;

/// Per-call lookup configuration for a resolution engine: the local cache
/// directory plus any remote repository roots, in priority order.
///
/// Passing this per call (instead of registering remotes into shared engine
/// state) keeps concurrent retrievals from leaking sources into each other.
/// The cache directory itself is still a filesystem-shared resource;
/// concurrent invocations race on its metadata files without coordination.
#[derive(Debug, Clone)]
pub struct LookupSources {
    local_cache: PathBuf,
    remotes: Vec<Url>,
}

impl LookupSources {
    /// Sources consisting of the local cache only.
    pub fn local(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            local_cache: cache_dir.into(),
            remotes: Vec::new(),
        }
    }

    /// Register an additional remote repository root (lowest priority).
    pub fn with_remote(mut self, root: Url) -> Self {
        self.remotes.push(root);
        self
    }

    pub fn local_cache(&self) -> &Path {
        &self.local_cache
    }

    pub fn remotes(&self) -> &[Url] {
        &self.remotes
    }

    pub fn has_remotes(&self) -> bool {
        !self.remotes.is_empty()
    }
}
