//! Top-level entry point: resolve, extract, hand over the bundle.

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, warn};

use crate::config::{default_cache_dir, RepositorySpec};
use crate::coordinates::StubCoordinates;
use crate::extractor::{ArchiveExtractor, ExtractedBundle};
use crate::locator::{ArtifactLocator, RepositoryEngine, ResolutionEngine};
use crate::resolver::{DependencyResolver, LocalFirstThenRemoteResolver, RemoteOnlyResolver};
use crate::Result;

/// Retrieves one stub bundle per call: pick a lookup strategy from the
/// repository spec, resolve the coordinates, unpack the archive.
///
/// Every resolution-stage failure is absorbed into `Ok(None)`; a stub that
/// does not exist yet is a normal outcome. Extraction failures are the one
/// hard error: a located artifact that cannot be unpacked is corruption the
/// caller should not silently swallow.
pub struct StubFetcher {
    locator: ArtifactLocator,
}

impl StubFetcher {
    /// Fetcher with the default engine and the default per-user cache.
    pub fn new() -> Result<Self> {
        Self::with_cache_dir(default_cache_dir()?)
    }

    /// Fetcher with the default engine over an explicit cache directory.
    pub fn with_cache_dir(cache_dir: PathBuf) -> Result<Self> {
        let engine: Arc<dyn ResolutionEngine> = Arc::new(RepositoryEngine::new()?);
        Ok(Self::with_engine(engine, cache_dir))
    }

    /// Fetcher over a custom resolution engine.
    pub fn with_engine(engine: Arc<dyn ResolutionEngine>, cache_dir: PathBuf) -> Self {
        Self {
            locator: ArtifactLocator::new(engine, cache_dir),
        }
    }

    /// Resolve `coordinates` against `repository` and unpack the result.
    pub fn retrieve(
        &self,
        repository: &RepositorySpec,
        coordinates: &StubCoordinates,
    ) -> Result<Option<ExtractedBundle>> {
        let resolver: Box<dyn DependencyResolver> = if repository.skip_local_cache {
            Box::new(RemoteOnlyResolver::new(self.locator.clone()))
        } else {
            Box::new(LocalFirstThenRemoteResolver::new(self.locator.clone()))
        };

        let Some(location) = resolver.resolve(&repository.root, coordinates) else {
            warn!(
                "no stub bundle for {}:{} in {}",
                coordinates.group, coordinates.module, repository.root
            );
            return Ok(None);
        };

        debug!("resolved {coordinates} to {}", location.uri);
        let bundle = ArchiveExtractor::extract(&location)?;
        Ok(Some(bundle))
    }

    /// Retrieve the highest available version of `group:module`.
    pub fn retrieve_latest(
        &self,
        repository: &RepositorySpec,
        group: &str,
        module: &str,
    ) -> Result<Option<ExtractedBundle>> {
        self.retrieve(repository, &StubCoordinates::latest(group, module))
    }
}
