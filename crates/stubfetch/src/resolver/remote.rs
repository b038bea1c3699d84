use log::debug;
use url::Url;

use crate::coordinates::StubCoordinates;
use crate::invalidator::FreshnessInvalidator;
use crate::locator::{ArtifactLocator, ResolvedLocation};

use super::{log_locate_failure, DependencyResolver};

/// Resolves against the remote repository, bypassing any local-first
/// attempt.
///
/// The remote path is a two-phase protocol, not redundancy: the first
/// locate may be served from a stale cached "latest" pointer, so its result
/// is discarded, the module's cached metadata is invalidated, and a second
/// locate, now forced to re-evaluate against the remote, produces the
/// returned location.
pub struct RemoteOnlyResolver {
    locator: ArtifactLocator,
}

impl RemoteOnlyResolver {
    pub fn new(locator: ArtifactLocator) -> Self {
        Self { locator }
    }
}

impl DependencyResolver for RemoteOnlyResolver {
    fn resolve(
        &self,
        repository_root: &Url,
        coordinates: &StubCoordinates,
    ) -> Option<ResolvedLocation> {
        let first = match self.locator.locate(Some(repository_root), coordinates) {
            Ok(location) => location,
            Err(err) => {
                log_locate_failure(repository_root, coordinates, &err);
                return None;
            }
        };

        debug!("{coordinates} located once, invalidating cached metadata and re-resolving");
        FreshnessInvalidator::invalidate(&first);

        match self.locator.locate(Some(repository_root), coordinates) {
            Ok(location) => Some(location),
            Err(err) => {
                log_locate_failure(repository_root, coordinates, &err);
                None
            }
        }
    }
}
