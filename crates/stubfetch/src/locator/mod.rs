//! Artifact location: the resolution-engine boundary and its default
//! implementation.

mod engine;
mod remote;
mod repository;
mod sources;

pub use engine::{LocateError, ResolutionEngine, ResolvedLocation};
pub use repository::RepositoryEngine;
pub use sources::LookupSources;

use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use crate::coordinates::StubCoordinates;

/// Thin adapter over a [`ResolutionEngine`]: builds the per-call lookup
/// sources (local cache, plus the remote root when one is given) and
/// delegates. Registration of a remote is explicit per call rather than
/// shared mutable engine state.
#[derive(Clone)]
pub struct ArtifactLocator {
    engine: Arc<dyn ResolutionEngine>,
    cache_dir: PathBuf,
}

impl ArtifactLocator {
    pub fn new(engine: Arc<dyn ResolutionEngine>, cache_dir: PathBuf) -> Self {
        Self { engine, cache_dir }
    }

    pub fn cache_dir(&self) -> &std::path::Path {
        &self.cache_dir
    }

    /// Resolve `coordinates` against the local cache, extended with
    /// `remote` as an additional lookup source when given.
    pub fn locate(
        &self,
        remote: Option<&Url>,
        coordinates: &StubCoordinates,
    ) -> Result<ResolvedLocation, LocateError> {
        let mut sources = LookupSources::local(self.cache_dir.clone());
        if let Some(url) = remote {
            sources = sources.with_remote(url.clone());
        }
        self.engine.resolve(&sources, coordinates)
    }
}
