use log::warn;
use url::Url;

use crate::coordinates::StubCoordinates;
use crate::locator::{ArtifactLocator, ResolvedLocation};

use super::{DependencyResolver, LocalOnlyResolver, RemoteOnlyResolver};

/// Tries the local cache first and falls back to the remote repository.
pub struct LocalFirstThenRemoteResolver {
    local: LocalOnlyResolver,
    remote: RemoteOnlyResolver,
}

impl LocalFirstThenRemoteResolver {
    pub fn new(locator: ArtifactLocator) -> Self {
        Self {
            local: LocalOnlyResolver::new(locator.clone()),
            remote: RemoteOnlyResolver::new(locator),
        }
    }
}

impl DependencyResolver for LocalFirstThenRemoteResolver {
    fn resolve(
        &self,
        repository_root: &Url,
        coordinates: &StubCoordinates,
    ) -> Option<ResolvedLocation> {
        if let Some(location) = self.local.resolve(repository_root, coordinates) {
            return Some(location);
        }

        warn!("{coordinates} not in the local cache, trying {repository_root}");
        self.remote.resolve(repository_root, coordinates)
    }
}
